use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::errors::LotteryError;
use crate::state::{Lottery, Ticket};

/// A ticket record together with the address it lives at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TicketEntry {
    pub ticket_id: Pubkey,
    pub ticket: Ticket,
}

/// Ticket ranges of one lottery keyed by `start_number`.
///
/// Ranges never overlap, so the entry owning a number is the one with the
/// greatest start at or below it.
#[derive(Clone, Debug, Default)]
pub struct TicketIndex {
    lottery_id: Pubkey,
    entries: BTreeMap<u64, TicketEntry>,
}

impl TicketIndex {
    pub fn new(lottery_id: Pubkey) -> Self {
        TicketIndex {
            lottery_id,
            entries: BTreeMap::new(),
        }
    }

    /// Builds the index from records fetched in any order.
    pub fn from_tickets<I>(lottery_id: Pubkey, tickets: I) -> std::result::Result<Self, LotteryError>
    where
        I: IntoIterator<Item = (Pubkey, Ticket)>,
    {
        let mut index = TicketIndex::new(lottery_id);
        for (ticket_id, ticket) in tickets {
            index.insert(ticket_id, ticket)?;
        }
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, ticket_id: Pubkey, ticket: Ticket) -> std::result::Result<(), LotteryError> {
        if ticket.lottery_id != self.lottery_id {
            return Err(LotteryError::InvalidAccount);
        }
        if ticket.start_number >= ticket.end_number {
            return Err(LotteryError::InvalidTicketRange);
        }
        if let Some((_, below)) = self.entries.range(..=ticket.start_number).next_back() {
            if below.ticket.end_number > ticket.start_number {
                return Err(LotteryError::InvalidTicketRange);
            }
        }
        if let Some((&above, _)) = self.entries.range(ticket.start_number..).next() {
            if above < ticket.end_number {
                return Err(LotteryError::InvalidTicketRange);
            }
        }

        self.entries
            .insert(ticket.start_number, TicketEntry { ticket_id, ticket });
        Ok(())
    }

    pub fn find(&self, number: u64) -> Option<&TicketEntry> {
        self.entries
            .range(..=number)
            .next_back()
            .map(|(_, entry)| entry)
            .filter(|entry| entry.ticket.contains(number))
    }

    /// Locates the ticket holding `lottery`'s winning number.
    pub fn winner(&self, lottery: &Lottery) -> std::result::Result<&TicketEntry, LotteryError> {
        let number = lottery.winning_number().ok_or(LotteryError::NotDrawn)?;
        match self.find(number) {
            Some(entry) => Ok(entry),
            None => {
                msg!(
                    "Partition broken: no ticket of {} holds {}",
                    self.lottery_id,
                    number
                );
                Err(LotteryError::NoWinningTicketFound)
            }
        }
    }

    /// True when the ranges tile `[0, current_amount)` with no gaps.
    pub fn covers(&self, current_amount: u64) -> bool {
        let mut next = 0u64;
        for (&start, entry) in self.entries.iter() {
            if start != next {
                return false;
            }
            next = entry.ticket.end_number;
        }
        next == current_amount
    }

    pub fn iter(&self) -> impl Iterator<Item = &TicketEntry> {
        self.entries.values()
    }
}
