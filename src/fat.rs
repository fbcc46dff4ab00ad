use alloc::vec::Vec;

use crate::error::AllocationError;
pub use crate::region::fat::Entry;
use crate::region::fat::{Pair, ENTRY_MASK};
use crate::types::ClusterID;

/// Decoded FAT, indexed by cluster number.
///
/// Entries 0 and 1 mirror media descriptor and are never part of a chain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    entries: Vec<u16>,
}

impl From<Vec<u16>> for Table {
    fn from(mut entries: Vec<u16>) -> Self {
        entries.iter_mut().for_each(|entry| *entry &= ENTRY_MASK);
        Self { entries }
    }
}

impl Table {
    /// Unpack `count` entries from raw FAT bytes, bounded by capacity of `raw`
    pub fn decode(raw: &[u8], count: usize) -> Result<Self, AllocationError> {
        let capacity = raw.len() * 2 / Pair::SIZE;
        let count = if count > capacity {
            warn!("FAT holds {} entries only, {} expected", capacity, count);
            capacity
        } else {
            count
        };
        let mut entries = Vec::new();
        entries.try_reserve_exact(count)?;
        for bytes in raw.chunks(Pair::SIZE) {
            let pair = Pair::new(bytes);
            for entry in [pair.even(), pair.odd()] {
                if entries.len() == count {
                    return Ok(Self { entries });
                }
                entries.push(entry);
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[u16] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, cluster_id: ClusterID) -> Option<u16> {
        self.entries.get(cluster_id.index()).copied()
    }

    pub fn entry(&self, cluster_id: ClusterID) -> Option<Result<Entry, u16>> {
        self.get(cluster_id).map(|value| Entry::classify(value, self.len()))
    }

    /// Low byte of entry 0, which shall equal media descriptor of boot sector
    pub fn media_descriptor(&self) -> Option<u8> {
        self.entries.first().map(|&entry| entry as u8)
    }

    fn data_entries(&self) -> impl Iterator<Item = &u16> {
        self.entries.iter().skip(ClusterID::FIRST.index())
    }

    pub fn num_free(&self) -> usize {
        self.data_entries().filter(|&&entry| entry == u16::from(Entry::Free)).count()
    }

    pub fn num_bad(&self) -> usize {
        self.data_entries().filter(|&&entry| entry == u16::from(Entry::BadCluster)).count()
    }
}

/// Whether `value` may appear in a table of `size` entries:
/// free or end-of-chain markers, or pointer into the table.
///
/// Chain walks reject a cluster whose entry fails this check.
pub fn is_valid_entry(value: u16, size: usize) -> bool {
    matches!(Entry::classify(value, size), Ok(entry) if entry != Entry::BadCluster)
}

/// Pack entries into their 12-bit on-disk form, odd count padded with a zero nibble
pub fn pack(entries: &[u16]) -> Result<Vec<u8>, AllocationError> {
    let size = (entries.len() * Pair::SIZE).div_ceil(2);
    let mut bytes = Vec::new();
    bytes.try_reserve_exact(size)?;
    for chunk in entries.chunks(2) {
        let mut pair = Pair::default();
        pair.set_even(chunk[0] & ENTRY_MASK);
        pair.set_odd(chunk.get(1).map_or(0, |entry| entry & ENTRY_MASK));
        bytes.extend_from_slice(&pair.bytes());
    }
    bytes.truncate(size);
    Ok(bytes)
}
