use crate::constants::BASIS_POINTS_DENOMINATOR;
use crate::errors::LotteryError;

/// How a custody balance is divided at settlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payout {
    pub winner_amount: u64,
    pub fee_amount: u64,
}

impl Payout {
    /// Fee rounds down, the winner receives the remainder.
    pub fn split(balance: u64, fee_basis_points: u64) -> std::result::Result<Payout, LotteryError> {
        let fee_amount = (balance as u128)
            .checked_mul(fee_basis_points as u128)
            .ok_or(LotteryError::ArithmeticOverflow)?
            .checked_div(BASIS_POINTS_DENOMINATOR as u128)
            .ok_or(LotteryError::ArithmeticOverflow)?;
        let fee_amount =
            u64::try_from(fee_amount).map_err(|_| LotteryError::ArithmeticOverflow)?;
        let winner_amount = balance
            .checked_sub(fee_amount)
            .ok_or(LotteryError::ArithmeticOverflow)?;

        Ok(Payout {
            winner_amount,
            fee_amount,
        })
    }

    pub fn total(&self) -> std::result::Result<u64, LotteryError> {
        self.winner_amount
            .checked_add(self.fee_amount)
            .ok_or(LotteryError::ArithmeticOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_five_percent() {
        let payout = Payout::split(100, 500).unwrap();
        assert_eq!(payout.fee_amount, 5);
        assert_eq!(payout.winner_amount, 95);
    }

    #[test]
    fn test_split_rounds_fee_down() {
        let payout = Payout::split(39, 500).unwrap();
        assert_eq!(payout.fee_amount, 1);
        assert_eq!(payout.winner_amount, 38);

        let payout = Payout::split(19, 500).unwrap();
        assert_eq!(payout.fee_amount, 0);
        assert_eq!(payout.winner_amount, 19);
    }

    #[test]
    fn test_split_conserves_balance_at_the_top_of_the_range() {
        let payout = Payout::split(u64::MAX, 500).unwrap();
        assert_eq!(payout.total().unwrap(), u64::MAX);
        assert_eq!(payout.fee_amount, u64::MAX / 20);
    }

    #[test]
    fn test_split_rejects_rate_above_whole() {
        assert!(matches!(
            Payout::split(100, 20_000),
            Err(LotteryError::ArithmeticOverflow)
        ));
        assert!(matches!(
            Payout::split(u64::MAX, u64::MAX),
            Err(LotteryError::ArithmeticOverflow)
        ));
    }

    #[test]
    fn test_split_empty_custody() {
        let payout = Payout::split(0, 500).unwrap();
        assert_eq!(payout, Payout { winner_amount: 0, fee_amount: 0 });
    }
}
