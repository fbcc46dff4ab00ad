#[cfg(feature = "std")]
pub mod std;

use alloc::vec::Vec;
use core::convert::Infallible;
use core::fmt::Debug;

use crate::error::Error;

/// Readable and seekable byte source, addressed by absolute byte offset
pub trait IO {
    type Error: Debug;

    /// Returns number of bytes read, less than `buf.len()` only when source ends
    fn read(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

impl IO for &[u8] {
    type Error = Infallible;

    fn read(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let start = usize::try_from(offset).unwrap_or(usize::MAX).min(self.len());
        let size = buf.len().min(self.len() - start);
        buf[..size].copy_from_slice(&self[start..start + size]);
        Ok(size)
    }
}

pub(crate) struct IOWrapper<IO>(IO);

impl<E: Debug, IO: crate::io::IO<Error = E>> IOWrapper<IO> {
    pub(crate) fn new(io: IO) -> Self {
        Self(io)
    }

    pub(crate) fn unwrap(self) -> IO {
        self.0
    }

    pub(crate) fn read_exact(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Error<E>> {
        let actual = self.0.read(offset, buf).map_err(|e| Error::InvalidSource(e))?;
        if actual < buf.len() {
            return Err(Error::Read { expected: buf.len(), actual });
        }
        Ok(())
    }

    pub(crate) fn read_vec(&mut self, offset: u64, size: usize) -> Result<Vec<u8>, Error<E>> {
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(size)?;
        bytes.resize(size, 0);
        self.read_exact(offset, &mut bytes)?;
        Ok(bytes)
    }
}
