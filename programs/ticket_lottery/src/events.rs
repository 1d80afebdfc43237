use anchor_lang::prelude::*;

#[event]
pub struct LotteryInitialized {
    pub lottery: Pubkey,
    pub authority: Pubkey,
    pub max_amount: u64,
    pub ended_slot: u64,
    pub token_mint: Pubkey,
}

#[event]
pub struct TicketsPurchased {
    pub lottery: Pubkey,
    pub ticket: Pubkey,
    pub buyer: Pubkey,
    pub start_number: u64,
    pub end_number: u64,
    pub amount: u64,
    pub current_amount: u64,
}

#[event]
pub struct WinnerDrawn {
    pub lottery: Pubkey,
    pub lottery_number: u64,
    pub sampled_slot: u64,
    pub current_amount: u64,
}

#[event]
pub struct LotterySettled {
    pub lottery: Pubkey,
    pub ticket: Pubkey,
    pub winner: Pubkey,
    pub pool: u64,
    pub winner_amount: u64,
    pub fee_amount: u64,
}

#[event]
pub struct LotteryVoided {
    pub lottery: Pubkey,
    pub ended_slot: u64,
}
