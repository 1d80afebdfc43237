use anchor_lang::prelude::*;

use crate::events::LotteryVoided;
use crate::utils::{load_lottery, store_lottery};

pub fn handler(ctx: Context<Void>) -> Result<()> {
    let accounts = ctx.accounts;
    let mut lottery = load_lottery(&accounts.lottery)?;
    lottery.check_authority(accounts.authority.key)?;
    lottery.void(Clock::get()?.slot)?;

    store_lottery(&accounts.lottery, &lottery)?;
    msg!("Lottery {} voided", accounts.lottery.key());
    emit!(LotteryVoided {
        lottery: accounts.lottery.key(),
        ended_slot: lottery.ended_slot,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct Void<'info> {
    /// CHECK: decoded by `Lottery::unpack`
    #[account(mut, owner = crate::ID)]
    pub lottery: UncheckedAccount<'info>,
    pub authority: Signer<'info>,
}
