use alloc::collections::TryReserveError;
use core::fmt::Debug;

use displaydoc::Display;
use thiserror::Error;

use crate::types::ClusterID;

#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum AllocationError {
    /// Unable to reserve memory: {0}
    TryReserve(TryReserveError),
}

impl From<TryReserveError> for AllocationError {
    fn from(error: TryReserveError) -> Self {
        Self::TryReserve(error)
    }
}

/// Geometry which makes a derived quantity meaningless
#[derive(Copy, Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum GeometryError {
    /// Bytes per sector is zero
    ZeroBytesPerSector,
    /// Sectors per cluster is zero
    ZeroSectorsPerCluster,
    /// System area does not fit into the volume
    SystemAreaOverflow,
    /// Cluster {0} is reserved and does not address data area
    ReservedCluster(ClusterID),
}

#[derive(Copy, Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum DataError {
    /// FAT copy {copy} differs from the first copy
    FATMismatch { copy: u8 },
    /// FAT copy {copy} does not exist
    NoSuchFATCopy { copy: u8 },
}

#[derive(Debug, Display, Error)]
pub enum Error<E: Debug> {
    /// Invalid or unreadable byte source: {0:?}
    InvalidSource(E),
    /// Short read, expect {expected} bytes but got {actual}
    Read { expected: usize, actual: usize },
    /// Allocation error: {0}
    Allocation(#[from] AllocationError),
    /// Geometry error: {0}
    Geometry(#[from] GeometryError),
    /// Data error: {0}
    Data(#[from] DataError),
}

impl<E: Debug> From<TryReserveError> for Error<E> {
    fn from(error: TryReserveError) -> Self {
        Self::Allocation(error.into())
    }
}
