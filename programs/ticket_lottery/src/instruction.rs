use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::sysvar;
use anchor_spl::associated_token::get_associated_token_address;
use arrayref::{array_ref, array_refs};

use crate::constants::fee_authority;
use crate::errors::LotteryError;
use crate::state::Lottery;
use crate::utils::find_custody_address;

/// Instructions understood by the program, encoded as `tag(u8) || payload`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LotteryInstruction {
    /// 0. `[writable, signer]` lottery
    /// 1. `[writable, signer]` authority
    /// 2. `[]` fee authority
    /// 3. `[]` custody PDA
    /// 4. `[writable]` custody token account (ATA of the custody PDA)
    /// 5. `[writable]` fee token account (ATA of the fee authority)
    /// 6. `[]` token mint
    /// 7. `[]` token program
    /// 8. `[]` associated token program
    /// 9. `[]` system program
    Init { max_amount: u64, ended_slot: u64 },
    /// 0. `[writable]` lottery
    /// 1. `[writable, signer]` ticket
    /// 2. `[writable, signer]` buyer
    /// 3. `[writable]` custody token account
    /// 4. `[writable]` buyer token account
    /// 5. `[]` token mint
    /// 6. `[]` token program
    /// 7. `[]` system program
    Buy { amount: u64 },
    /// 0. `[writable]` lottery
    /// 1. `[signer]` caller, any wallet
    /// 2. `[]` slot hashes sysvar
    Draw,
    /// 0. `[writable]` lottery
    /// 1. `[writable, signer]` authority
    /// 2. `[]` custody PDA
    /// 3. `[writable]` custody token account
    /// 4. `[writable]` fee token account
    /// 5. `[writable]` winner token account (ATA of the winner)
    /// 6. `[]` winning ticket
    /// 7. `[]` winner wallet
    /// 8. `[]` token mint
    /// 9. `[]` token program
    /// 10. `[]` associated token program
    /// 11. `[]` system program
    Withdraw,
    /// 0. `[writable]` lottery
    /// 1. `[signer]` authority
    Void,
}

impl LotteryInstruction {
    pub fn unpack(input: &[u8]) -> std::result::Result<Self, LotteryError> {
        let (tag, rest) = input
            .split_first()
            .ok_or(LotteryError::MalformedPayload)?;

        Ok(match (tag, rest.len()) {
            (0, 16) => {
                let (max_amount, ended_slot) = array_refs![array_ref![rest, 0, 16], 8, 8];
                Self::Init {
                    max_amount: u64::from_le_bytes(*max_amount),
                    ended_slot: u64::from_le_bytes(*ended_slot),
                }
            }
            (1, 8) => Self::Buy {
                amount: u64::from_le_bytes(*array_ref![rest, 0, 8]),
            },
            (2, 0) => Self::Draw,
            (3, 0) => Self::Withdraw,
            (4, 0) => Self::Void,
            _ => return Err(LotteryError::MalformedPayload),
        })
    }

    pub fn pack(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(17);
        match self {
            Self::Init {
                max_amount,
                ended_slot,
            } => {
                data.push(0);
                data.extend_from_slice(&max_amount.to_le_bytes());
                data.extend_from_slice(&ended_slot.to_le_bytes());
            }
            Self::Buy { amount } => {
                data.push(1);
                data.extend_from_slice(&amount.to_le_bytes());
            }
            Self::Draw => data.push(2),
            Self::Withdraw => data.push(3),
            Self::Void => data.push(4),
        }
        data
    }
}

pub fn init(
    program_id: &Pubkey,
    lottery: &Pubkey,
    authority: &Pubkey,
    token_mint: &Pubkey,
    max_amount: u64,
    ended_slot: u64,
) -> Instruction {
    let (custody, _) = find_custody_address(lottery, program_id);
    let fee_authority = fee_authority::ID;
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*lottery, true),
            AccountMeta::new(*authority, true),
            AccountMeta::new_readonly(fee_authority, false),
            AccountMeta::new_readonly(custody, false),
            AccountMeta::new(get_associated_token_address(&custody, token_mint), false),
            AccountMeta::new(get_associated_token_address(&fee_authority, token_mint), false),
            AccountMeta::new_readonly(*token_mint, false),
            AccountMeta::new_readonly(anchor_spl::token::ID, false),
            AccountMeta::new_readonly(anchor_spl::associated_token::ID, false),
            AccountMeta::new_readonly(anchor_lang::system_program::ID, false),
        ],
        data: LotteryInstruction::Init {
            max_amount,
            ended_slot,
        }
        .pack(),
    }
}

pub fn buy(
    program_id: &Pubkey,
    lottery: &Pubkey,
    lottery_info: &Lottery,
    ticket: &Pubkey,
    buyer: &Pubkey,
    buyer_token_account: &Pubkey,
    amount: u64,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*lottery, false),
            AccountMeta::new(*ticket, true),
            AccountMeta::new(*buyer, true),
            AccountMeta::new(lottery_info.token_receiver, false),
            AccountMeta::new(*buyer_token_account, false),
            AccountMeta::new_readonly(lottery_info.token_mint, false),
            AccountMeta::new_readonly(anchor_spl::token::ID, false),
            AccountMeta::new_readonly(anchor_lang::system_program::ID, false),
        ],
        data: LotteryInstruction::Buy { amount }.pack(),
    }
}

pub fn draw(program_id: &Pubkey, lottery: &Pubkey, caller: &Pubkey) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*lottery, false),
            AccountMeta::new_readonly(*caller, true),
            AccountMeta::new_readonly(sysvar::slot_hashes::ID, false),
        ],
        data: LotteryInstruction::Draw.pack(),
    }
}

/// `winning_ticket` is usually located with [`crate::ticket_index::TicketIndex::winner`].
pub fn withdraw(
    program_id: &Pubkey,
    lottery: &Pubkey,
    lottery_info: &Lottery,
    authority: &Pubkey,
    winning_ticket: &Pubkey,
    winner: &Pubkey,
) -> Instruction {
    let (custody, _) = find_custody_address(lottery, program_id);
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*lottery, false),
            AccountMeta::new(*authority, true),
            AccountMeta::new_readonly(custody, false),
            AccountMeta::new(lottery_info.token_receiver, false),
            AccountMeta::new(lottery_info.fee_receiver, false),
            AccountMeta::new(
                get_associated_token_address(winner, &lottery_info.token_mint),
                false,
            ),
            AccountMeta::new_readonly(*winning_ticket, false),
            AccountMeta::new_readonly(*winner, false),
            AccountMeta::new_readonly(lottery_info.token_mint, false),
            AccountMeta::new_readonly(anchor_spl::token::ID, false),
            AccountMeta::new_readonly(anchor_spl::associated_token::ID, false),
            AccountMeta::new_readonly(anchor_lang::system_program::ID, false),
        ],
        data: LotteryInstruction::Withdraw.pack(),
    }
}

pub fn void(program_id: &Pubkey, lottery: &Pubkey, authority: &Pubkey) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*lottery, false),
            AccountMeta::new_readonly(*authority, true),
        ],
        data: LotteryInstruction::Void.pack(),
    }
}
