//! Numbered-ticket lottery.
//!
//! Buyers take contiguous ranges of `[0, max_amount)` paid one token unit per
//! number into a custody account. After the deadline slot anyone may draw a
//! number from the first `SlotHashes` entry past the deadline, and the ticket
//! holding it is paid the custody balance less the protocol fee.

pub mod constants;
pub mod errors;
pub mod events;
pub mod instruction;
pub mod instructions;
pub mod randomness;
pub mod state;
pub mod ticket_index;
pub mod utils;

pub use instructions::Processor;
pub use state::*;

use anchor_lang::prelude::*;
use anchor_lang::solana_program::entrypoint::ProgramResult;

declare_id!("AyEABFUrsVqdD5GuXc2y5pqvGa71AebrMaetinXbTqqy");

#[cfg(not(feature = "no-entrypoint"))]
anchor_lang::solana_program::entrypoint!(process_instruction);

pub fn process_instruction<'info>(
    program_id: &Pubkey,
    accounts: &'info [AccountInfo<'info>],
    instruction_data: &[u8],
) -> ProgramResult {
    Processor::process(program_id, accounts, instruction_data).map_err(|err| {
        err.log();
        err.into()
    })
}
