use anchor_lang::prelude::*;

#[error_code]
pub enum LotteryError {
    // 6000
    /// Buffer length, record type or instruction tag did not decode.
    #[msg("Malformed account data or instruction payload")]
    MalformedPayload,
    #[msg("Lottery capacity must be greater than zero")]
    InvalidCapacity,
    #[msg("Purchase would exceed the lottery capacity")]
    CapacityExceeded,
    #[msg("Lottery no longer accepts purchases")]
    LotteryClosed,
    #[msg("Lottery deadline has not passed yet")]
    LotteryStillOpen,
    #[msg("Ticket amount must be greater than zero")]
    InvalidAmount,
    #[msg("Winning number has already been drawn")]
    AlreadyDrawn,
    #[msg("No tickets were sold for this lottery")]
    NoTicketsSold,
    #[msg("Lottery has already been settled")]
    AlreadySettled,
    /// Raised only when the ticket partition is broken.
    #[msg("No ticket covers the winning number")]
    NoWinningTicketFound,
    // 6010
    #[msg("Signer is not the lottery authority")]
    Unauthorized,
    #[msg("Insufficient funds for transfer")]
    InsufficientFunds,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Deadline slot must be in the future")]
    InvalidDeadline,
    #[msg("Winning number has not been drawn yet")]
    NotDrawn,
    #[msg("Ticket does not hold the winning number")]
    NotWinningTicket,
    #[msg("Lottery with sold tickets cannot be voided")]
    TicketsSold,
    #[msg("Account does not match the lottery")]
    InvalidAccount,
    #[msg("Account is already initialized")]
    AlreadyInitialized,
    // 6020
    #[msg("Ticket range is empty or overlaps another ticket")]
    InvalidTicketRange,
    /// The first slot after the deadline fell out of the `SlotHashes` window.
    #[msg("Draw checkpoint is no longer in the slot hash history")]
    CheckpointExpired,
}
