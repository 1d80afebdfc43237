use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::constants::CUSTODY_SEED;
use crate::errors::LotteryError;
use crate::events::LotterySettled;
use crate::utils::{load_lottery, load_ticket, store_lottery, transfer_tokens};

pub fn handler(ctx: Context<Withdraw>) -> Result<()> {
    let accounts = ctx.accounts;
    let mut lottery = load_lottery(&accounts.lottery)?;
    lottery.check_authority(accounts.authority.key)?;
    require_keys_eq!(
        accounts.custody_ata.key(),
        lottery.token_receiver,
        LotteryError::InvalidAccount
    );
    require_keys_eq!(
        accounts.fee_ata.key(),
        lottery.fee_receiver,
        LotteryError::InvalidAccount
    );
    require_keys_eq!(
        accounts.token_mint.key(),
        lottery.token_mint,
        LotteryError::InvalidAccount
    );

    let ticket = load_ticket(&accounts.ticket)?;
    require_keys_eq!(accounts.winner.key(), ticket.buyer, LotteryError::InvalidAccount);

    let balance = accounts.custody_ata.amount;
    let payout = lottery.settle(&accounts.lottery.key(), &ticket, balance)?;

    let lottery_key = accounts.lottery.key();
    let bump_seed = [ctx.bumps.custody];
    let seeds: &[&[u8]] = &[CUSTODY_SEED, lottery_key.as_ref(), &bump_seed];
    let custody = accounts.custody.to_account_info();
    let mint = accounts.token_mint.to_account_info();
    let from = accounts.custody_ata.to_account_info();

    msg!("Pay winner {} of {}", payout.winner_amount, balance);
    transfer_tokens(
        &accounts.token_program,
        &from,
        &accounts.winner_ata.to_account_info(),
        &custody,
        &mint,
        payout.winner_amount,
        accounts.token_mint.decimals,
        &[seeds],
    )?;
    msg!("Pay fee {}", payout.fee_amount);
    transfer_tokens(
        &accounts.token_program,
        &from,
        &accounts.fee_ata.to_account_info(),
        &custody,
        &mint,
        payout.fee_amount,
        accounts.token_mint.decimals,
        &[seeds],
    )?;

    store_lottery(&accounts.lottery, &lottery)?;
    emit!(LotterySettled {
        lottery: lottery_key,
        ticket: accounts.ticket.key(),
        winner: accounts.winner.key(),
        pool: payout.total()?,
        winner_amount: payout.winner_amount,
        fee_amount: payout.fee_amount,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// CHECK: decoded by `Lottery::unpack`
    #[account(mut, owner = crate::ID)]
    pub lottery: UncheckedAccount<'info>,
    #[account(mut)]
    pub authority: Signer<'info>,
    /// CHECK: custody signer PDA, holds no data
    #[account(
        seeds = [CUSTODY_SEED, lottery.key().as_ref()],
        bump,
    )]
    pub custody: UncheckedAccount<'info>,
    #[account(
        mut,
        associated_token::mint = token_mint,
        associated_token::authority = custody,
    )]
    pub custody_ata: Box<Account<'info, TokenAccount>>,
    #[account(mut, token::mint = token_mint)]
    pub fee_ata: Box<Account<'info, TokenAccount>>,
    #[account(
        init_if_needed,
        payer = authority,
        associated_token::mint = token_mint,
        associated_token::authority = winner,
    )]
    pub winner_ata: Box<Account<'info, TokenAccount>>,
    /// CHECK: decoded by `Ticket::unpack`
    #[account(owner = crate::ID)]
    pub ticket: UncheckedAccount<'info>,
    /// CHECK: must be the ticket's buyer
    pub winner: UncheckedAccount<'info>,
    pub token_mint: Account<'info, Mint>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}
