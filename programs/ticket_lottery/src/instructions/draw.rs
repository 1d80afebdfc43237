use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar;

use crate::errors::LotteryError;
use crate::events::WinnerDrawn;
use crate::randomness::checkpoint_slot_hash;
use crate::utils::{load_lottery, store_lottery};

/// Anyone may submit the draw: the sampled hash is fixed by `ended_slot`,
/// not by when the transaction lands.
pub fn handler(ctx: Context<Draw>) -> Result<()> {
    let accounts = ctx.accounts;
    let mut lottery = load_lottery(&accounts.lottery)?;
    let slot = Clock::get()?.slot;
    lottery.check_drawable(slot)?;

    let sample = {
        let data = accounts.slot_hashes.try_borrow_data()?;
        checkpoint_slot_hash(&data, lottery.ended_slot)?
    };
    let lottery_number = lottery.record_draw(&accounts.lottery.key(), &sample, slot)?;

    store_lottery(&accounts.lottery, &lottery)?;
    msg!(
        "Lottery {} drew {} from slot {}",
        accounts.lottery.key(),
        lottery_number,
        sample.slot
    );
    emit!(WinnerDrawn {
        lottery: accounts.lottery.key(),
        lottery_number,
        sampled_slot: sample.slot,
        current_amount: lottery.current_amount,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct Draw<'info> {
    /// CHECK: decoded by `Lottery::unpack`
    #[account(mut, owner = crate::ID)]
    pub lottery: UncheckedAccount<'info>,
    pub caller: Signer<'info>,
    /// CHECK: read entry by entry, the sysvar is too large to deserialize
    #[account(address = sysvar::slot_hashes::ID @ LotteryError::InvalidAccount)]
    pub slot_hashes: UncheckedAccount<'info>,
}
