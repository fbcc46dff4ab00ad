use fat12::io::std::FileIO;
use fat12::io::IO;
use fat12::{BOOT_SECTOR_SIZE, FAT12};
use pretty_hex::pretty_hex;

use super::Error;

pub fn info(fat12: FAT12<FileIO>, raw: bool) -> Result<(), Error> {
    let geometry = *fat12.geometry();
    println!("OEM name:            {}", String::from_utf8_lossy(geometry.oem_label()));
    println!("Jump instruction:    {:02X?}", geometry.jump_boot);
    println!("Bytes per sector:    {}", geometry.bytes_per_sector);
    println!("Sectors per cluster: {}", geometry.sectors_per_cluster);
    println!("Reserved sectors:    {}", geometry.reserved_sectors);
    println!("Number of FATs:      {}", geometry.number_of_fats);
    println!("Sectors per FAT:     {}", geometry.sectors_per_fat);
    println!("Root entries:        {}", geometry.root_entries);
    println!("Total sectors:       {}", geometry.total_sectors());
    println!("Media descriptor:    {:#04X}", geometry.media_descriptor);
    println!("Sectors per track:   {}", geometry.sectors_per_track);
    println!("Number of heads:     {}", geometry.number_of_heads);
    println!("Hidden sectors:      {}", geometry.hidden_sectors);
    println!();
    println!("FAT region:          offset {} size {}", geometry.fat_start(), geometry.fat_size());
    println!("Root directory:      {} sectors", geometry.root_dir_sectors()?);
    let (start, offset) = (geometry.data_area_start()?, geometry.data_area_start_bytes()?);
    println!("Data area:           sector {} offset {}", start, offset);
    println!("Cluster size:        {}", geometry.cluster_size());
    let (total, system) = (geometry.total_clusters()?, geometry.system_clusters()?);
    let data = geometry.data_clusters()?;
    println!("Clusters:            total {} system {} data {}", total, system, data);

    if raw {
        let mut io = fat12.free();
        let mut bytes = [0u8; BOOT_SECTOR_SIZE];
        let size = io.read(0, &mut bytes).map_err(|e| fat12::error::Error::InvalidSource(e))?;
        println!();
        let bytes = &bytes[..size];
        println!("{}", pretty_hex(&bytes));
    }
    Ok(())
}
