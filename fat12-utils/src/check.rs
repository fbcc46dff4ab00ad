use fat12::error::Error as FATError;
use fat12::io::std::FileIO;
use fat12::FAT12;
use log::{info, warn};

use super::Error;

pub fn check(fat12: &mut FAT12<FileIO>) -> Result<(), Error> {
    let mismatch = match fat12.validate_fat_copies() {
        Ok(()) => None,
        Err(FATError::Data(error)) => Some(error),
        Err(error) => return Err(error.into()),
    };
    let chain_set = fat12.chains()?;
    info!("{} chains occupying {} clusters", chain_set.len(), chain_set.num_clusters());
    let (marks, broken): (Vec<_>, Vec<_>) =
        chain_set.rejections().iter().partition(|rejection| rejection.is_bad_cluster());
    if !marks.is_empty() {
        info!("{} clusters marked bad", marks.len());
    }
    for rejection in broken.iter() {
        warn!("Chain at cluster {} rejected: {}", rejection.head, rejection.defect);
    }
    if let Some(error) = mismatch {
        return Err(FATError::Data(error).into());
    }
    if !broken.is_empty() {
        return Err(Error::Corrupted(broken.len()));
    }
    Ok(())
}
