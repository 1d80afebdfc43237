use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, CreateAccount};
use anchor_spl::token::{self, TransferChecked};

use crate::constants::CUSTODY_SEED;
use crate::state::{Lottery, Ticket};

/// PDA that signs for a lottery's custody token account.
pub fn find_custody_address(lottery: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CUSTODY_SEED, lottery.as_ref()], program_id)
}

pub fn load_lottery(info: &AccountInfo) -> Result<Lottery> {
    let data = info.try_borrow_data()?;
    Ok(Lottery::unpack(&data)?)
}

pub fn store_lottery(info: &AccountInfo, lottery: &Lottery) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    lottery.pack(&mut data)?;
    Ok(())
}

pub fn load_ticket(info: &AccountInfo) -> Result<Ticket> {
    let data = info.try_borrow_data()?;
    Ok(Ticket::unpack(&data)?)
}

/// Allocates a rent-exempt, program-owned account of `space` bytes.
///
/// `new_account` signs for itself; accounts holding data are rejected.
pub fn create_program_account<'info>(
    payer: &AccountInfo<'info>,
    new_account: &AccountInfo<'info>,
    space: usize,
    owner: &Pubkey,
    system_program: &AccountInfo<'info>,
) -> Result<()> {
    let lamports = Rent::get()?.minimum_balance(space);
    system_program::create_account(
        CpiContext::new(
            system_program.clone(),
            CreateAccount {
                from: payer.clone(),
                to: new_account.clone(),
            },
        ),
        lamports,
        space as u64,
        owner,
    )
}

/// Moves `amount` base units between token accounts; zero is a no-op.
#[allow(clippy::too_many_arguments)]
pub fn transfer_tokens<'info>(
    token_program: &AccountInfo<'info>,
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    authority: &AccountInfo<'info>,
    mint: &AccountInfo<'info>,
    amount: u64,
    decimals: u8,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token::transfer_checked(
        CpiContext::new_with_signer(
            token_program.clone(),
            TransferChecked {
                from: from.clone(),
                mint: mint.clone(),
                to: to.clone(),
                authority: authority.clone(),
            },
            signer_seeds,
        ),
        amount,
        decimals,
    )
}
