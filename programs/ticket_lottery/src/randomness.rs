use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hashv;
use arrayref::array_ref;
use bytemuck::{Pod, Zeroable};

use crate::errors::LotteryError;

/// Raw `(slot, hash)` pair as laid out in the `SlotHashes` sysvar.
#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
struct SlotHashEntry {
    slot: u64,
    hash: [u8; 32],
}

const ENTRY_LEN: usize = std::mem::size_of::<SlotHashEntry>();

/// Capacity of the `SlotHashes` sysvar.
pub const MAX_SLOT_HASH_ENTRIES: usize = 512;

/// A ledger hash and the slot it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotHashSample {
    pub slot: u64,
    pub hash: [u8; 32],
}

fn entry_at(data: &[u8], index: usize) -> SlotHashEntry {
    let offset = 8 + index * ENTRY_LEN;
    bytemuck::pod_read_unaligned(&data[offset..offset + ENTRY_LEN])
}

/// Picks the hash of the first slot produced after `ended_slot`.
///
/// Layout: `len(u64) || [(slot(u64), hash([u8; 32]))]`, newest first. The
/// checkpoint depends only on `ended_slot`, so every draw of a lottery reads
/// the same entry no matter when it is submitted.
pub fn checkpoint_slot_hash(
    data: &[u8],
    ended_slot: u64,
) -> std::result::Result<SlotHashSample, LotteryError> {
    if data.len() < 8 {
        return Err(LotteryError::MalformedPayload);
    }
    let count = u64::from_le_bytes(*array_ref![data, 0, 8]) as usize;
    let span = count
        .checked_mul(ENTRY_LEN)
        .and_then(|len| len.checked_add(8))
        .ok_or(LotteryError::MalformedPayload)?;
    if count == 0 || data.len() < span {
        return Err(LotteryError::MalformedPayload);
    }

    // entries after the deadline form a prefix; find its length
    let (mut lo, mut hi) = (0usize, count);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if entry_at(data, mid).slot > ended_slot {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    if lo == 0 {
        return Err(LotteryError::LotteryStillOpen);
    }
    // a full history with nothing at or before the deadline may have
    // dropped the real checkpoint, unless its oldest entry is the very next slot
    if lo == count
        && count >= MAX_SLOT_HASH_ENTRIES
        && entry_at(data, count - 1).slot != ended_slot.saturating_add(1)
    {
        msg!("Checkpoint after slot {} left the slot hash history", ended_slot);
        return Err(LotteryError::CheckpointExpired);
    }

    let entry = entry_at(data, lo - 1);
    Ok(SlotHashSample {
        slot: entry.slot,
        hash: entry.hash,
    })
}

/// Mixes the sampled hash with the lottery address and reduces it into
/// `[0, current_amount)`.
///
/// The address keeps two lotteries drawn against the same slot from sharing
/// a winning number.
pub fn derive_winning_number(
    sample: &SlotHashSample,
    lottery_id: &Pubkey,
    current_amount: u64,
) -> std::result::Result<u64, LotteryError> {
    if current_amount == 0 {
        return Err(LotteryError::NoTicketsSold);
    }
    let mixed = hashv(&[sample.hash.as_ref(), lottery_id.as_ref()]).to_bytes();
    let value = u128::from_le_bytes(*array_ref![mixed, 0, 16]);
    msg!("Mixed randomness {} over {} tickets", value, current_amount);

    Ok((value % current_amount as u128) as u64)
}

#[cfg(test)]
pub(crate) fn slot_hashes_data(entries: &[(u64, [u8; 32])]) -> Vec<u8> {
    let mut data = Vec::with_capacity(8 + entries.len() * ENTRY_LEN);
    data.extend_from_slice(&(entries.len() as u64).to_le_bytes());
    for (slot, hash) in entries {
        data.extend_from_slice(&slot.to_le_bytes());
        data.extend_from_slice(hash);
    }
    data
}

/// History as seen at `current_slot`: every slot of
/// `[current_slot - count, current_slot)` except `skipped`, newest first.
#[cfg(test)]
pub(crate) fn slot_history(current_slot: u64, count: u64, skipped: &[u64]) -> Vec<u8> {
    let entries: Vec<(u64, [u8; 32])> = (current_slot.saturating_sub(count)..current_slot)
        .rev()
        .filter(|slot| !skipped.contains(slot))
        .map(|slot| (slot, hashv(&[slot.to_le_bytes().as_ref()]).to_bytes()))
        .collect();
    slot_hashes_data(&entries)
}
