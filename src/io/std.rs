use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

#[derive(Debug)]
pub struct FileIO {
    file: File,
}

impl FileIO {
    pub fn open<P: AsRef<Path>>(filepath: P) -> std::io::Result<Self> {
        let file = File::options().read(true).open(filepath)?;
        Ok(Self { file })
    }
}

impl super::IO for FileIO {
    type Error = std::io::Error;

    fn read(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.file.seek(SeekFrom::Start(offset))?;
        let mut size = 0;
        while size < buf.len() {
            match self.file.read(&mut buf[size..]) {
                Ok(0) => break,
                Ok(n) => size += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(size)
    }
}
