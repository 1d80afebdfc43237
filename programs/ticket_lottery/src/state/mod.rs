pub mod lottery;
pub mod payout;
pub mod ticket;

pub use lottery::*;
pub use payout::*;
pub use ticket::*;

use crate::errors::LotteryError;

/// Leading byte of every record owned by the program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountType {
    Uninitialized,
    //open or closed, not drawn yet
    Lottery,
    Ticket,
    //winner paid
    SettledLottery,
    //winning number set
    DrawnLottery,
    //deadline passed without sales
    VoidedLottery,
}

impl AccountType {
    pub fn to_code(&self) -> u8 {
        match self {
            AccountType::Uninitialized => 0,
            AccountType::Lottery => 1,
            AccountType::Ticket => 2,
            AccountType::SettledLottery => 3,
            AccountType::DrawnLottery => 4,
            AccountType::VoidedLottery => 5,
        }
    }

    pub fn from(val: u8) -> std::result::Result<AccountType, LotteryError> {
        match val {
            0 => Ok(AccountType::Uninitialized),
            1 => Ok(AccountType::Lottery),
            2 => Ok(AccountType::Ticket),
            3 => Ok(AccountType::SettledLottery),
            4 => Ok(AccountType::DrawnLottery),
            5 => Ok(AccountType::VoidedLottery),
            _ => Err(LotteryError::MalformedPayload),
        }
    }

    pub fn is_lottery(&self) -> bool {
        matches!(
            self,
            AccountType::Lottery
                | AccountType::SettledLottery
                | AccountType::DrawnLottery
                | AccountType::VoidedLottery
        )
    }
}

/// Position of a lottery in its one-way lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LotteryStatus {
    //accepting purchases
    Open,
    //deadline reached or sold out, waiting for the draw
    Closed,
    Drawn,
    Settled,
    Voided,
}
