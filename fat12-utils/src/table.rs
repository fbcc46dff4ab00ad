use fat12::io::std::FileIO;
use fat12::types::ClusterID;
use fat12::{Entry, FAT12};

use super::Error;

pub fn table(fat12: &mut FAT12<FileIO>, all: bool) -> Result<(), Error> {
    let table = fat12.fat_table()?;
    let first = u32::from(ClusterID::FIRST) as usize;
    for (index, &value) in table.entries().iter().enumerate().skip(first) {
        let description = match Entry::classify(value, table.len()) {
            Ok(Entry::Free) if !all => continue,
            Ok(Entry::Free) => "free".to_owned(),
            Ok(Entry::Next(cluster_id)) => format!("next {}", cluster_id),
            Ok(Entry::BadCluster) => "bad".to_owned(),
            Ok(Entry::Last) => "last".to_owned(),
            Err(_) => "invalid".to_owned(),
        };
        println!("{:5} {:03X} {}", index, value, description);
    }
    println!("{} entries, {} free, {} bad", table.len(), table.num_free(), table.num_bad());
    Ok(())
}
