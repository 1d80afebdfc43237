use anchor_lang::prelude::*;
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};

use crate::constants::FEE_BASIS_POINTS;
use crate::errors::LotteryError;
use crate::randomness::{derive_winning_number, SlotHashSample};
use crate::state::{AccountType, LotteryStatus, Payout, Ticket};

/// Program-owned record of one lottery instance.
///
/// `current_amount` is the high-water mark of allocated ticket numbers and
/// the only field concurrent buyers contend on. `lottery_number` is unset
/// (zero) until the account type moves to `DrawnLottery`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lottery {
    pub account_type: AccountType,
    pub authority: Pubkey,
    pub token_receiver: Pubkey,
    pub fee_receiver: Pubkey,
    pub max_amount: u64,
    pub ended_slot: u64,
    pub lottery_number: u64,
    pub current_amount: u64,
    pub token_mint: Pubkey,
}

impl Lottery {
    pub const LEN: usize = 1 // account_type
    + 32 // authority
    + 32 // token_receiver
    + 32 // fee_receiver
    + 8 // max_amount
    + 8 // ended_slot
    + 8 // lottery_number
    + 8 // current_amount
    + 32; // token_mint

    pub fn initialize(
        authority: Pubkey,
        token_receiver: Pubkey,
        fee_receiver: Pubkey,
        token_mint: Pubkey,
        max_amount: u64,
        ended_slot: u64,
        current_slot: u64,
    ) -> std::result::Result<Lottery, LotteryError> {
        if max_amount == 0 {
            return Err(LotteryError::InvalidCapacity);
        }
        if ended_slot <= current_slot {
            return Err(LotteryError::InvalidDeadline);
        }

        Ok(Lottery {
            account_type: AccountType::Lottery,
            authority,
            token_receiver,
            fee_receiver,
            max_amount,
            ended_slot,
            lottery_number: 0,
            current_amount: 0,
            token_mint,
        })
    }

    pub fn status(&self, slot: u64) -> LotteryStatus {
        match self.account_type {
            AccountType::DrawnLottery => LotteryStatus::Drawn,
            AccountType::SettledLottery => LotteryStatus::Settled,
            AccountType::VoidedLottery => LotteryStatus::Voided,
            _ if slot >= self.ended_slot || self.current_amount >= self.max_amount => {
                LotteryStatus::Closed
            }
            _ => LotteryStatus::Open,
        }
    }

    pub fn winning_number(&self) -> Option<u64> {
        match self.account_type {
            AccountType::DrawnLottery | AccountType::SettledLottery => Some(self.lottery_number),
            _ => None,
        }
    }

    pub fn check_authority(&self, signer: &Pubkey) -> std::result::Result<(), LotteryError> {
        if *signer != self.authority {
            return Err(LotteryError::Unauthorized);
        }
        Ok(())
    }

    /// Allocates `[current_amount, current_amount + amount)` to `buyer`.
    ///
    /// Nothing is written unless every check passes.
    pub fn issue_ticket(
        &mut self,
        lottery_id: Pubkey,
        buyer: Pubkey,
        amount: u64,
        slot: u64,
    ) -> std::result::Result<Ticket, LotteryError> {
        if self.account_type != AccountType::Lottery || slot >= self.ended_slot {
            return Err(LotteryError::LotteryClosed);
        }
        if amount == 0 {
            return Err(LotteryError::InvalidAmount);
        }
        let end_number = self
            .current_amount
            .checked_add(amount)
            .ok_or(LotteryError::ArithmeticOverflow)?;
        if end_number > self.max_amount {
            return Err(LotteryError::CapacityExceeded);
        }

        let ticket = Ticket {
            lottery_id,
            buyer,
            start_number: self.current_amount,
            end_number,
        };
        self.current_amount = end_number;
        Ok(ticket)
    }

    /// Fails unless a draw may run at `slot`.
    pub fn check_drawable(&self, slot: u64) -> std::result::Result<(), LotteryError> {
        match self.account_type {
            AccountType::Lottery => {}
            AccountType::DrawnLottery | AccountType::SettledLottery => {
                return Err(LotteryError::AlreadyDrawn)
            }
            AccountType::VoidedLottery => return Err(LotteryError::NoTicketsSold),
            _ => return Err(LotteryError::MalformedPayload),
        }
        if slot < self.ended_slot {
            return Err(LotteryError::LotteryStillOpen);
        }
        if self.current_amount == 0 {
            return Err(LotteryError::NoTicketsSold);
        }
        Ok(())
    }

    /// Sets the winning number from `sample`, once.
    ///
    /// `sample` must be the checkpoint picked by
    /// [`crate::randomness::checkpoint_slot_hash`] for this lottery.
    pub fn record_draw(
        &mut self,
        lottery_id: &Pubkey,
        sample: &SlotHashSample,
        slot: u64,
    ) -> std::result::Result<u64, LotteryError> {
        self.check_drawable(slot)?;
        // the sampled hash must postdate the last slot a purchase could land in
        if sample.slot <= self.ended_slot {
            return Err(LotteryError::LotteryStillOpen);
        }

        let lottery_number = derive_winning_number(sample, lottery_id, self.current_amount)?;
        self.lottery_number = lottery_number;
        self.account_type = AccountType::DrawnLottery;
        Ok(lottery_number)
    }

    /// Checks `ticket` holds the winning number, splits `custody_balance` and
    /// marks the lottery settled.
    pub fn settle(
        &mut self,
        lottery_id: &Pubkey,
        ticket: &Ticket,
        custody_balance: u64,
    ) -> std::result::Result<Payout, LotteryError> {
        match self.account_type {
            AccountType::DrawnLottery => {}
            AccountType::SettledLottery | AccountType::VoidedLottery => {
                return Err(LotteryError::AlreadySettled)
            }
            AccountType::Lottery => return Err(LotteryError::NotDrawn),
            _ => return Err(LotteryError::MalformedPayload),
        }
        if ticket.lottery_id != *lottery_id {
            return Err(LotteryError::InvalidAccount);
        }
        if !ticket.contains(self.lottery_number) {
            return Err(LotteryError::NotWinningTicket);
        }

        let payout = Payout::split(custody_balance, FEE_BASIS_POINTS)?;
        self.account_type = AccountType::SettledLottery;
        Ok(payout)
    }

    /// Closes out a lottery whose deadline passed without a single sale.
    pub fn void(&mut self, slot: u64) -> std::result::Result<(), LotteryError> {
        match self.account_type {
            AccountType::Lottery => {}
            AccountType::DrawnLottery => return Err(LotteryError::AlreadyDrawn),
            AccountType::SettledLottery | AccountType::VoidedLottery => {
                return Err(LotteryError::AlreadySettled)
            }
            _ => return Err(LotteryError::MalformedPayload),
        }
        if slot < self.ended_slot {
            return Err(LotteryError::LotteryStillOpen);
        }
        if self.current_amount != 0 {
            return Err(LotteryError::TicketsSold);
        }

        self.account_type = AccountType::VoidedLottery;
        Ok(())
    }

    pub fn unpack(src: &[u8]) -> std::result::Result<Lottery, LotteryError> {
        if src.len() != Lottery::LEN {
            return Err(LotteryError::MalformedPayload);
        }
        let src = array_ref![src, 0, Lottery::LEN];
        let (
            account_type,
            authority,
            token_receiver,
            fee_receiver,
            max_amount,
            ended_slot,
            lottery_number,
            current_amount,
            token_mint,
        ) = array_refs![src, 1, 32, 32, 32, 8, 8, 8, 8, 32];

        let account_type = AccountType::from(account_type[0])?;
        if !account_type.is_lottery() {
            return Err(LotteryError::MalformedPayload);
        }
        let lottery = Lottery {
            account_type,
            authority: Pubkey::new_from_array(*authority),
            token_receiver: Pubkey::new_from_array(*token_receiver),
            fee_receiver: Pubkey::new_from_array(*fee_receiver),
            max_amount: u64::from_le_bytes(*max_amount),
            ended_slot: u64::from_le_bytes(*ended_slot),
            lottery_number: u64::from_le_bytes(*lottery_number),
            current_amount: u64::from_le_bytes(*current_amount),
            token_mint: Pubkey::new_from_array(*token_mint),
        };
        if lottery.current_amount > lottery.max_amount {
            return Err(LotteryError::MalformedPayload);
        }
        Ok(lottery)
    }

    pub fn pack(&self, dst: &mut [u8]) -> std::result::Result<(), LotteryError> {
        if dst.len() != Lottery::LEN {
            return Err(LotteryError::MalformedPayload);
        }
        let dst = array_mut_ref![dst, 0, Lottery::LEN];
        let (
            account_type_dst,
            authority_dst,
            token_receiver_dst,
            fee_receiver_dst,
            max_amount_dst,
            ended_slot_dst,
            lottery_number_dst,
            current_amount_dst,
            token_mint_dst,
        ) = mut_array_refs![dst, 1, 32, 32, 32, 8, 8, 8, 8, 32];

        account_type_dst[0] = self.account_type.to_code();
        authority_dst.copy_from_slice(self.authority.as_ref());
        token_receiver_dst.copy_from_slice(self.token_receiver.as_ref());
        fee_receiver_dst.copy_from_slice(self.fee_receiver.as_ref());
        *max_amount_dst = self.max_amount.to_le_bytes();
        *ended_slot_dst = self.ended_slot.to_le_bytes();
        *lottery_number_dst = self.lottery_number.to_le_bytes();
        *current_amount_dst = self.current_amount.to_le_bytes();
        token_mint_dst.copy_from_slice(self.token_mint.as_ref());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_lottery(max_amount: u64, ended_slot: u64) -> Lottery {
        Lottery::initialize(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            max_amount,
            ended_slot,
            0,
        )
        .unwrap()
    }

    fn sample(slot: u64) -> SlotHashSample {
        SlotHashSample {
            slot,
            hash: [9u8; 32],
        }
    }

    #[test]
    fn test_initialize() {
        let lottery = open_lottery(100, 1_000);
        assert_eq!(lottery.account_type, AccountType::Lottery);
        assert_eq!(lottery.current_amount, 0);
        assert_eq!(lottery.winning_number(), None);
        assert_eq!(lottery.status(0), LotteryStatus::Open);
    }

    #[test]
    fn test_initialize_rejects_zero_capacity() {
        let result = Lottery::initialize(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            0,
            1_000,
            0,
        );
        assert!(matches!(result, Err(LotteryError::InvalidCapacity)));
    }

    #[test]
    fn test_initialize_rejects_past_deadline() {
        let result = Lottery::initialize(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            10,
            500,
            500,
        );
        assert!(matches!(result, Err(LotteryError::InvalidDeadline)));
    }

    #[test]
    fn test_layout_is_fixed() {
        let mut lottery = open_lottery(100, 1_000);
        lottery.current_amount = 30;
        let mut buf = [0u8; Lottery::LEN];
        lottery.pack(&mut buf).unwrap();

        assert_eq!(Lottery::LEN, 161);
        assert_eq!(buf[0], 1);
        assert_eq!(&buf[1..33], lottery.authority.as_ref());
        assert_eq!(buf[97..105], 100u64.to_le_bytes());
        assert_eq!(buf[105..113], 1_000u64.to_le_bytes());
        assert_eq!(buf[121..129], 30u64.to_le_bytes());
        assert_eq!(&buf[129..161], lottery.token_mint.as_ref());
        assert_eq!(Lottery::unpack(&buf).unwrap(), lottery);
    }

    #[test]
    fn test_unpack_rejects_bad_buffers() {
        let lottery = open_lottery(100, 1_000);
        let mut buf = [0u8; Lottery::LEN];
        lottery.pack(&mut buf).unwrap();

        assert!(matches!(
            Lottery::unpack(&buf[..Lottery::LEN - 1]),
            Err(LotteryError::MalformedPayload)
        ));
        let mut zeroed = [0u8; Lottery::LEN];
        assert!(matches!(Lottery::unpack(&zeroed), Err(LotteryError::MalformedPayload)));
        zeroed[0] = 2;
        assert!(matches!(Lottery::unpack(&zeroed), Err(LotteryError::MalformedPayload)));

        // current_amount above max_amount
        buf[121..129].copy_from_slice(&101u64.to_le_bytes());
        assert!(matches!(Lottery::unpack(&buf), Err(LotteryError::MalformedPayload)));
    }

    #[test]
    fn test_issue_ticket_allocates_contiguous_ranges() {
        let lottery_id = Pubkey::new_unique();
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
        let mut lottery = open_lottery(100, 1_000);

        let first = lottery.issue_ticket(lottery_id, a, 30, 10).unwrap();
        assert_eq!((first.start_number, first.end_number), (0, 30));
        assert_eq!(first.buyer, a);
        assert_eq!(first.lottery_id, lottery_id);

        let second = lottery.issue_ticket(lottery_id, b, 70, 11).unwrap();
        assert_eq!((second.start_number, second.end_number), (30, 100));
        assert_eq!(lottery.current_amount, 100);
        assert_eq!(lottery.status(12), LotteryStatus::Closed);
    }

    #[test]
    fn test_issue_ticket_rejects_over_capacity_without_change() {
        let mut lottery = open_lottery(100, 1_000);
        lottery
            .issue_ticket(Pubkey::new_unique(), Pubkey::new_unique(), 60, 1)
            .unwrap();
        let before = lottery;

        let result = lottery.issue_ticket(Pubkey::new_unique(), Pubkey::new_unique(), 41, 2);
        assert!(matches!(result, Err(LotteryError::CapacityExceeded)));
        assert_eq!(lottery, before);
    }

    #[test]
    fn test_issue_ticket_rejects_zero_and_overflow() {
        let mut lottery = open_lottery(u64::MAX, 1_000);
        assert!(matches!(
            lottery.issue_ticket(Pubkey::new_unique(), Pubkey::new_unique(), 0, 1),
            Err(LotteryError::InvalidAmount)
        ));
        lottery
            .issue_ticket(Pubkey::new_unique(), Pubkey::new_unique(), u64::MAX - 1, 1)
            .unwrap();
        assert!(matches!(
            lottery.issue_ticket(Pubkey::new_unique(), Pubkey::new_unique(), 2, 1),
            Err(LotteryError::ArithmeticOverflow)
        ));
        assert_eq!(lottery.current_amount, u64::MAX - 1);
    }

    #[test]
    fn test_issue_ticket_rejects_after_deadline() {
        let mut lottery = open_lottery(100, 1_000);
        assert_eq!(lottery.status(1_000), LotteryStatus::Closed);
        assert!(matches!(
            lottery.issue_ticket(Pubkey::new_unique(), Pubkey::new_unique(), 1, 1_000),
            Err(LotteryError::LotteryClosed)
        ));
        assert_eq!(lottery.current_amount, 0);
    }

    #[test]
    fn test_record_draw_once() {
        let lottery_id = Pubkey::new_unique();
        let mut lottery = open_lottery(100, 1_000);
        lottery
            .issue_ticket(lottery_id, Pubkey::new_unique(), 40, 5)
            .unwrap();

        let number = lottery.record_draw(&lottery_id, &sample(1_001), 1_002).unwrap();
        assert!(number < 40);
        assert_eq!(lottery.winning_number(), Some(number));
        assert_eq!(lottery.status(1_002), LotteryStatus::Drawn);

        let again = lottery.record_draw(&lottery_id, &sample(1_050), 1_051);
        assert!(matches!(again, Err(LotteryError::AlreadyDrawn)));
        assert_eq!(lottery.winning_number(), Some(number));
    }

    #[test]
    fn test_record_draw_before_deadline() {
        let lottery_id = Pubkey::new_unique();
        let mut lottery = open_lottery(100, 1_000);
        lottery
            .issue_ticket(lottery_id, Pubkey::new_unique(), 40, 5)
            .unwrap();

        assert!(matches!(
            lottery.record_draw(&lottery_id, &sample(998), 999),
            Err(LotteryError::LotteryStillOpen)
        ));
        // hash of the deadline slot itself is not eligible
        assert!(matches!(
            lottery.record_draw(&lottery_id, &sample(1_000), 1_001),
            Err(LotteryError::LotteryStillOpen)
        ));
        assert_eq!(lottery.account_type, AccountType::Lottery);
    }

    #[test]
    fn test_record_draw_without_tickets() {
        let mut lottery = open_lottery(100, 1_000);
        assert!(matches!(
            lottery.record_draw(&Pubkey::new_unique(), &sample(1_001), 1_002),
            Err(LotteryError::NoTicketsSold)
        ));
    }

    #[test]
    fn test_check_drawable_follows_lifecycle() {
        let mut lottery = open_lottery(100, 1_000);
        assert!(matches!(lottery.check_drawable(1_000), Err(LotteryError::NoTicketsSold)));
        lottery
            .issue_ticket(Pubkey::new_unique(), Pubkey::new_unique(), 1, 5)
            .unwrap();
        assert!(matches!(lottery.check_drawable(999), Err(LotteryError::LotteryStillOpen)));
        assert!(lottery.check_drawable(1_000).is_ok());

        lottery.account_type = AccountType::DrawnLottery;
        assert!(matches!(lottery.check_drawable(1_000), Err(LotteryError::AlreadyDrawn)));
    }

    #[test]
    fn test_settle_pays_once() {
        let lottery_id = Pubkey::new_unique();
        let mut lottery = open_lottery(100, 1_000);
        let ticket = lottery
            .issue_ticket(lottery_id, Pubkey::new_unique(), 100, 5)
            .unwrap();
        lottery.record_draw(&lottery_id, &sample(1_001), 1_001).unwrap();

        let payout = lottery.settle(&lottery_id, &ticket, 100).unwrap();
        assert_eq!(payout, Payout { winner_amount: 95, fee_amount: 5 });
        assert_eq!(lottery.status(2_000), LotteryStatus::Settled);
        assert!(matches!(
            lottery.settle(&lottery_id, &ticket, 100),
            Err(LotteryError::AlreadySettled)
        ));
    }

    #[test]
    fn test_settle_rejects_losing_or_foreign_ticket() {
        let lottery_id = Pubkey::new_unique();
        let mut lottery = open_lottery(100, 1_000);
        let low = lottery
            .issue_ticket(lottery_id, Pubkey::new_unique(), 50, 5)
            .unwrap();
        let high = lottery
            .issue_ticket(lottery_id, Pubkey::new_unique(), 50, 6)
            .unwrap();
        let number = lottery.record_draw(&lottery_id, &sample(1_001), 1_001).unwrap();
        let (winner, loser) = if low.contains(number) { (low, high) } else { (high, low) };

        assert!(matches!(
            lottery.settle(&lottery_id, &loser, 100),
            Err(LotteryError::NotWinningTicket)
        ));
        let mut foreign = winner;
        foreign.lottery_id = Pubkey::new_unique();
        assert!(matches!(
            lottery.settle(&lottery_id, &foreign, 100),
            Err(LotteryError::InvalidAccount)
        ));
        assert_eq!(lottery.account_type, AccountType::DrawnLottery);
        assert!(lottery.settle(&lottery_id, &winner, 100).is_ok());
    }

    #[test]
    fn test_settle_before_draw() {
        let lottery_id = Pubkey::new_unique();
        let mut lottery = open_lottery(100, 1_000);
        let ticket = lottery
            .issue_ticket(lottery_id, Pubkey::new_unique(), 10, 5)
            .unwrap();
        assert!(matches!(
            lottery.settle(&lottery_id, &ticket, 10),
            Err(LotteryError::NotDrawn)
        ));
    }

    #[test]
    fn test_void_empty_lottery() {
        let mut lottery = open_lottery(100, 1_000);
        assert!(matches!(lottery.void(999), Err(LotteryError::LotteryStillOpen)));
        lottery.void(1_000).unwrap();
        assert_eq!(lottery.status(1_000), LotteryStatus::Voided);
        assert!(matches!(lottery.void(1_001), Err(LotteryError::AlreadySettled)));
        assert!(matches!(
            lottery.record_draw(&Pubkey::new_unique(), &sample(1_001), 1_001),
            Err(LotteryError::NoTicketsSold)
        ));
        assert!(matches!(
            lottery.issue_ticket(Pubkey::new_unique(), Pubkey::new_unique(), 1, 1),
            Err(LotteryError::LotteryClosed)
        ));
    }

    #[test]
    fn test_void_rejects_sold_lottery() {
        let mut lottery = open_lottery(100, 1_000);
        lottery
            .issue_ticket(Pubkey::new_unique(), Pubkey::new_unique(), 1, 1)
            .unwrap();
        assert!(matches!(lottery.void(1_000), Err(LotteryError::TicketsSold)));
    }

    #[test]
    fn test_check_authority() {
        let lottery = open_lottery(100, 1_000);
        assert!(lottery.check_authority(&lottery.authority).is_ok());
        assert!(matches!(
            lottery.check_authority(&Pubkey::new_unique()),
            Err(LotteryError::Unauthorized)
        ));
    }
}
