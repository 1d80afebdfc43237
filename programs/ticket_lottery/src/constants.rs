/// Seed prefix of the PDA that owns a lottery's custody token account.
pub const CUSTODY_SEED: &[u8] = b"custody";

/// Share of the custody balance kept by the fee receiver at settlement.
pub const FEE_BASIS_POINTS: u64 = 500;

pub const BASIS_POINTS_DENOMINATOR: u64 = 10_000;

/// Wallet whose associated token account collects fees for every lottery.
pub mod fee_authority {
    anchor_lang::declare_id!("2wnEcArzCpX1QRdtpHRXxZ7k9b1UeK16mPt26LPWFZ6V");
}

pub const FEE_AUTHORITY: anchor_lang::prelude::Pubkey = fee_authority::ID;
