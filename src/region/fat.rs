use bitfield::bitfield;

use crate::types::ClusterID;

pub(crate) const ENTRY_MASK: u16 = 0x0FFF;

bitfield! {
    /// Two 12-bit entries packed into three bytes, nibbles interleaved
    #[derive(Copy, Clone, Debug, Default)]
    pub struct Pair(u32);
    pub u16, even, set_even: 11, 0;
    pub u16, odd, set_odd: 23, 12;
}

impl Pair {
    pub const SIZE: usize = 3;

    /// Bytes beyond the end of `bytes` are taken as zero
    pub fn new(bytes: &[u8]) -> Self {
        let mut array = [0u8; 4];
        let size = bytes.len().min(Self::SIZE);
        array[..size].copy_from_slice(&bytes[..size]);
        Self(u32::from_le_bytes(array))
    }

    pub fn bytes(&self) -> [u8; 3] {
        let [b0, b1, b2, _] = self.0.to_le_bytes();
        [b0, b1, b2]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    Free,
    Next(ClusterID),
    BadCluster,
    Last,
}

impl Entry {
    /// Classify an entry of a table holding `size` entries,
    /// pointers out of table and reserved values are returned as error
    pub fn classify(value: u16, size: usize) -> Result<Self, u16> {
        match value {
            0x000 => Ok(Self::Free),
            0xFF7 => Ok(Self::BadCluster),
            0xFF8..=0xFFF => Ok(Self::Last),
            next if next >= 2 && (next as usize) < size => Ok(Self::Next(next.into())),
            _ => Err(value),
        }
    }
}

impl From<Entry> for u16 {
    fn from(entry: Entry) -> u16 {
        match entry {
            Entry::Free => 0x000,
            Entry::Next(cluster_id) => u32::from(cluster_id) as u16 & ENTRY_MASK,
            Entry::BadCluster => 0xFF7,
            Entry::Last => 0xFFF,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Entry, Pair};
    use crate::types::ClusterID;

    #[test]
    fn test_pair() {
        let pair = Pair::new(&hex!("03 40 00"));
        assert_eq!(pair.even(), 0x003);
        assert_eq!(pair.odd(), 0x004);

        let pair = Pair::new(&hex!("F8 FF FF"));
        assert_eq!(pair.even(), 0xFF8);
        assert_eq!(pair.odd(), 0xFFF);

        let mut pair = Pair::default();
        pair.set_even(0xABC);
        pair.set_odd(0x123);
        assert_eq!(pair.bytes(), hex!("BC 3A 12"));
    }

    #[test]
    fn test_pair_truncated() {
        let pair = Pair::new(&hex!("21 F3"));
        assert_eq!(pair.even(), 0x321);
        assert_eq!(pair.odd(), 0x00F);
    }

    #[test]
    fn test_classify() {
        assert_eq!(Entry::classify(0x000, 10), Ok(Entry::Free));
        assert_eq!(Entry::classify(0x001, 10), Err(0x001));
        assert_eq!(Entry::classify(0x002, 10), Ok(Entry::Next(ClusterID::FIRST)));
        assert_eq!(Entry::classify(0x009, 10), Ok(Entry::Next(ClusterID::from(9u32))));
        assert_eq!(Entry::classify(0x00A, 10), Err(0x00A));
        assert_eq!(Entry::classify(0xFF0, 10), Err(0xFF0));
        assert_eq!(Entry::classify(0xFF7, 10), Ok(Entry::BadCluster));
        assert_eq!(Entry::classify(0xFF8, 10), Ok(Entry::Last));
        assert_eq!(Entry::classify(0xFFF, 10), Ok(Entry::Last));
        assert_eq!(u16::from(Entry::Next(ClusterID::from(9u32))), 0x009);
        assert_eq!(u16::from(Entry::Last), 0xFFF);
    }
}
