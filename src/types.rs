use derive_more::{Display, From, Into};

#[derive(Copy, Clone, Debug, Default, Display, From, Into, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub struct SectorID(u32);

impl SectorID {
    pub(crate) const BOOT: Self = Self(0);
}

impl<I: Into<u32>> core::ops::Add<I> for SectorID {
    type Output = Self;

    fn add(self, rhs: I) -> Self {
        Self(self.0 + rhs.into())
    }
}

#[derive(Copy, Clone, Debug, Default, Display, From, Into, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub struct ClusterID(u32);

impl ClusterID {
    /// First cluster addressing the data area, 0 and 1 are FAT metadata slots
    pub const FIRST: Self = Self(2);

    pub fn valid(&self) -> bool {
        self.0 >= Self::FIRST.0
    }

    /// Cluster index relative to the start of data area
    pub(crate) fn offset(self) -> Option<u32> {
        self.0.checked_sub(Self::FIRST.0)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u16> for ClusterID {
    fn from(value: u16) -> Self {
        Self(value as u32)
    }
}

impl From<usize> for ClusterID {
    fn from(value: usize) -> Self {
        Self(value as u32)
    }
}
