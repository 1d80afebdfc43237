use anchor_lang::prelude::*;
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};

use crate::errors::LotteryError;
use crate::state::AccountType;

/// One purchase: the half-open range `[start_number, end_number)` of a lottery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub lottery_id: Pubkey,
    pub buyer: Pubkey,
    pub start_number: u64,
    pub end_number: u64,
}

impl Ticket {
    pub const LEN: usize = 1 // account_type
    + 32 // lottery_id
    + 32 // buyer
    + 8 // start_number
    + 8; // end_number

    pub fn size(&self) -> u64 {
        self.end_number.saturating_sub(self.start_number)
    }

    pub fn contains(&self, number: u64) -> bool {
        self.start_number <= number && number < self.end_number
    }

    pub fn unpack(src: &[u8]) -> std::result::Result<Ticket, LotteryError> {
        if src.len() != Ticket::LEN {
            return Err(LotteryError::MalformedPayload);
        }
        let src = array_ref![src, 0, Ticket::LEN];
        let (account_type, lottery_id, buyer, start_number, end_number) =
            array_refs![src, 1, 32, 32, 8, 8];

        if AccountType::from(account_type[0])? != AccountType::Ticket {
            return Err(LotteryError::MalformedPayload);
        }
        let ticket = Ticket {
            lottery_id: Pubkey::new_from_array(*lottery_id),
            buyer: Pubkey::new_from_array(*buyer),
            start_number: u64::from_le_bytes(*start_number),
            end_number: u64::from_le_bytes(*end_number),
        };
        if ticket.start_number >= ticket.end_number {
            return Err(LotteryError::MalformedPayload);
        }
        Ok(ticket)
    }

    pub fn pack(&self, dst: &mut [u8]) -> std::result::Result<(), LotteryError> {
        if dst.len() != Ticket::LEN {
            return Err(LotteryError::MalformedPayload);
        }
        let dst = array_mut_ref![dst, 0, Ticket::LEN];
        let (account_type_dst, lottery_id_dst, buyer_dst, start_number_dst, end_number_dst) =
            mut_array_refs![dst, 1, 32, 32, 8, 8];

        account_type_dst[0] = AccountType::Ticket.to_code();
        lottery_id_dst.copy_from_slice(self.lottery_id.as_ref());
        buyer_dst.copy_from_slice(self.buyer.as_ref());
        *start_number_dst = self.start_number.to_le_bytes();
        *end_number_dst = self.end_number.to_le_bytes();
        Ok(())
    }
}
