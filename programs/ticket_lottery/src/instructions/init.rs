use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::constants::{CUSTODY_SEED, FEE_AUTHORITY};
use crate::errors::LotteryError;
use crate::events::LotteryInitialized;
use crate::state::Lottery;
use crate::utils::{create_program_account, store_lottery};

pub fn handler(ctx: Context<Init>, max_amount: u64, ended_slot: u64) -> Result<()> {
    let accounts = ctx.accounts;
    let slot = Clock::get()?.slot;
    let lottery = Lottery::initialize(
        accounts.authority.key(),
        accounts.custody_ata.key(),
        accounts.fee_ata.key(),
        accounts.token_mint.key(),
        max_amount,
        ended_slot,
        slot,
    )?;

    msg!("Create lottery account");
    create_program_account(
        &accounts.authority,
        &accounts.lottery,
        Lottery::LEN,
        ctx.program_id,
        &accounts.system_program,
    )?;
    store_lottery(&accounts.lottery, &lottery)?;

    msg!(
        "Lottery {} initialized: max_amount {}, ended_slot {}",
        accounts.lottery.key(),
        max_amount,
        ended_slot
    );
    emit!(LotteryInitialized {
        lottery: accounts.lottery.key(),
        authority: accounts.authority.key(),
        max_amount,
        ended_slot,
        token_mint: accounts.token_mint.key(),
    });
    Ok(())
}

#[derive(Accounts)]
pub struct Init<'info> {
    #[account(
        mut,
        constraint = lottery.data_is_empty() @ LotteryError::AlreadyInitialized,
    )]
    pub lottery: Signer<'info>,
    #[account(mut)]
    pub authority: Signer<'info>,
    /// CHECK: fixed protocol fee wallet
    #[account(address = FEE_AUTHORITY @ LotteryError::InvalidAccount)]
    pub fee_authority: UncheckedAccount<'info>,
    /// CHECK: custody signer PDA, holds no data
    #[account(
        seeds = [CUSTODY_SEED, lottery.key().as_ref()],
        bump,
    )]
    pub custody: UncheckedAccount<'info>,
    #[account(
        init_if_needed,
        payer = authority,
        associated_token::mint = token_mint,
        associated_token::authority = custody,
    )]
    pub custody_ata: Box<Account<'info, TokenAccount>>,
    #[account(
        init_if_needed,
        payer = authority,
        associated_token::mint = token_mint,
        associated_token::authority = fee_authority,
    )]
    pub fee_ata: Box<Account<'info, TokenAccount>>,
    pub token_mint: Account<'info, Mint>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}
