#![doc = include_str!("../README.md")]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate hex_literal;
#[macro_use]
extern crate log;

pub mod chain;
mod endian;
pub mod error;
pub mod fat;
pub mod geometry;
pub mod io;
mod region;
pub mod types;

use alloc::vec::Vec;
use core::fmt::Debug;

pub use chain::{Chain, ChainSet, Defect, Rejection};
use error::{DataError, Error};
pub use fat::{Entry, Table};
pub use geometry::Geometry;
use io::IOWrapper;
use region::boot::BootSector;
pub use region::boot::BOOT_SECTOR_SIZE;

pub struct FAT12<IO> {
    io: IOWrapper<IO>,
    geometry: Geometry,
}

impl<E: Debug, IO: io::IO<Error = E>> FAT12<IO> {
    pub fn new(io: IO) -> Result<Self, Error<E>> {
        let mut io = IOWrapper::new(io);
        let mut bytes = [0u8; BOOT_SECTOR_SIZE];
        io.read_exact(0, &mut bytes)?;
        let geometry = Geometry::from(BootSector::from(bytes));
        if !geometry.has_valid_jump() {
            warn!("Unexpected jump instruction {:02X?}", geometry.jump_boot);
        }
        debug!("Geometry {:?}", geometry);
        debug!("FAT offset {} length {}", geometry.fat_start(), geometry.fat_size());
        Ok(Self { io, geometry })
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn fat_region(&mut self, copy: u8) -> Result<Vec<u8>, Error<E>> {
        if copy > 0 && copy >= self.geometry.number_of_fats {
            return Err(DataError::NoSuchFATCopy { copy }.into());
        }
        let size = self.geometry.fat_size();
        let offset = self.geometry.fat_start() + copy as u64 * size;
        trace!("Read FAT copy {} at offset {}", copy, offset);
        self.io.read_vec(offset, size as usize)
    }

    /// Decode specified FAT copy, first copy is 0
    pub fn fat_table_copy(&mut self, copy: u8) -> Result<Table, Error<E>> {
        let count = self.geometry.data_clusters()? as usize;
        let raw = self.fat_region(copy)?;
        let table = Table::decode(&raw, count)?;
        let media_descriptor = self.geometry.media_descriptor;
        match table.media_descriptor() {
            Some(media) if media != media_descriptor => {
                warn!("FAT media {:#04X} mismatch boot sector {:#04X}", media, media_descriptor)
            }
            _ => (),
        }
        Ok(table)
    }

    pub fn fat_table(&mut self) -> Result<Table, Error<E>> {
        self.fat_table_copy(0)
    }

    /// Every FAT copy shall be byte-identical to the first one
    pub fn validate_fat_copies(&mut self) -> Result<(), Error<E>> {
        let first = self.fat_region(0)?;
        for copy in 1..self.geometry.number_of_fats {
            if self.fat_region(copy)? != first {
                return Err(DataError::FATMismatch { copy }.into());
            }
        }
        Ok(())
    }

    /// Decode the first FAT copy and collect its chains
    pub fn chains(&mut self) -> Result<ChainSet, Error<E>> {
        let table = self.fat_table()?;
        Ok(ChainSet::build(&table)?)
    }

    pub fn free(self) -> IO {
        self.io.unwrap()
    }
}
