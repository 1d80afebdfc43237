use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::errors::LotteryError;
use crate::events::TicketsPurchased;
use crate::state::Ticket;
use crate::utils::{create_program_account, load_lottery, store_lottery, transfer_tokens};

pub fn handler(ctx: Context<Buy>, amount: u64) -> Result<()> {
    let accounts = ctx.accounts;
    let mut lottery = load_lottery(&accounts.lottery)?;
    require_keys_eq!(
        accounts.custody_ata.key(),
        lottery.token_receiver,
        LotteryError::InvalidAccount
    );
    require_keys_eq!(
        accounts.token_mint.key(),
        lottery.token_mint,
        LotteryError::InvalidAccount
    );

    let slot = Clock::get()?.slot;
    let ticket = lottery.issue_ticket(accounts.lottery.key(), accounts.buyer.key(), amount, slot)?;
    if accounts.buyer_token_account.amount < amount {
        msg!(
            "Buyer holds {} of {} requested",
            accounts.buyer_token_account.amount,
            amount
        );
        return err!(LotteryError::InsufficientFunds);
    }

    msg!("Create ticket account");
    create_program_account(
        &accounts.buyer,
        &accounts.ticket,
        Ticket::LEN,
        ctx.program_id,
        &accounts.system_program,
    )?;
    transfer_tokens(
        &accounts.token_program,
        &accounts.buyer_token_account.to_account_info(),
        &accounts.custody_ata.to_account_info(),
        &accounts.buyer,
        &accounts.token_mint.to_account_info(),
        amount,
        accounts.token_mint.decimals,
        &[],
    )?;

    {
        let mut data = accounts.ticket.try_borrow_mut_data()?;
        ticket.pack(&mut data)?;
    }
    store_lottery(&accounts.lottery, &lottery)?;
    msg!(
        "Ticket {} holds [{}, {})",
        accounts.ticket.key(),
        ticket.start_number,
        ticket.end_number
    );
    emit!(TicketsPurchased {
        lottery: accounts.lottery.key(),
        ticket: accounts.ticket.key(),
        buyer: accounts.buyer.key(),
        start_number: ticket.start_number,
        end_number: ticket.end_number,
        amount: ticket.size(),
        current_amount: lottery.current_amount,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct Buy<'info> {
    /// CHECK: decoded by `Lottery::unpack`
    #[account(mut, owner = crate::ID)]
    pub lottery: UncheckedAccount<'info>,
    #[account(
        mut,
        constraint = ticket.data_is_empty() @ LotteryError::AlreadyInitialized,
    )]
    pub ticket: Signer<'info>,
    #[account(mut)]
    pub buyer: Signer<'info>,
    #[account(mut)]
    pub custody_ata: Box<Account<'info, TokenAccount>>,
    #[account(
        mut,
        constraint = buyer_token_account.mint == token_mint.key() @ LotteryError::InvalidAccount,
        token::authority = buyer,
    )]
    pub buyer_token_account: Box<Account<'info, TokenAccount>>,
    pub token_mint: Account<'info, Mint>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}
