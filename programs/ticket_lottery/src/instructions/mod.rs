pub mod buy;
pub mod draw;
pub mod init;
pub mod void;
pub mod withdraw;


pub use buy::*;
pub use draw::*;
pub use init::*;
pub use void::*;
pub use withdraw::*;

use std::collections::BTreeSet;

use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::{Accounts, AccountsExit, Bumps};

use crate::instruction::LotteryInstruction;

pub struct Processor;

impl Processor {
    /// Decodes `tag || payload` exactly and runs the matching handler.
    ///
    /// Accounts go through the same `try_accounts` / handler / `exit` cycle
    /// `#[program]` generates, minus Anchor's 8-byte discriminator.
    pub fn process<'info>(
        program_id: &Pubkey,
        accounts: &'info [AccountInfo<'info>],
        data: &[u8],
    ) -> Result<()> {
        if *program_id != crate::ID {
            return Err(ErrorCode::DeclaredProgramIdMismatch.into());
        }
        let instruction = LotteryInstruction::unpack(data)?;
        match instruction {
            LotteryInstruction::Init {
                max_amount,
                ended_slot,
            } => {
                msg!("Instruction: Init");
                Self::run::<Init, _>(program_id, accounts, |ctx| {
                    init::handler(ctx, max_amount, ended_slot)
                })
            }
            LotteryInstruction::Buy { amount } => {
                msg!("Instruction: Buy");
                Self::run::<Buy, _>(program_id, accounts, |ctx| buy::handler(ctx, amount))
            }
            LotteryInstruction::Draw => {
                msg!("Instruction: Draw");
                Self::run::<Draw, _>(program_id, accounts, draw::handler)
            }
            LotteryInstruction::Withdraw => {
                msg!("Instruction: Withdraw");
                Self::run::<Withdraw, _>(program_id, accounts, withdraw::handler)
            }
            LotteryInstruction::Void => {
                msg!("Instruction: Void");
                Self::run::<Void, _>(program_id, accounts, void::handler)
            }
        }
    }

    fn run<'info, T, F>(
        program_id: &Pubkey,
        accounts: &'info [AccountInfo<'info>],
        run_handler: F,
    ) -> Result<()>
    where
        T: Bumps + Accounts<'info, <T as Bumps>::Bumps> + AccountsExit<'info>,
        <T as Bumps>::Bumps: Default,
        F: FnOnce(Context<'_, '_, 'info, 'info, T>) -> Result<()>,
    {
        let mut bumps = <T as Bumps>::Bumps::default();
        let mut reallocs = BTreeSet::new();
        let mut remaining = accounts;
        let mut validated = T::try_accounts(program_id, &mut remaining, &[], &mut bumps, &mut reallocs)?;
        run_handler(Context::new(program_id, &mut validated, remaining, bumps))?;
        validated.exit(program_id)
    }
}
