// Boot sector record, BIOS parameter block as laid out by DOS 3.31

use core::mem::{size_of, transmute};

use crate::endian::Little as LE;

/// Size of boot sector record, without extended BIOS parameter block
pub const BOOT_SECTOR_SIZE: usize = 36;

#[derive(Copy, Clone, Debug)]
#[repr(C, packed)]
pub(crate) struct BootSector {
    pub jump_boot: [u8; 3],
    pub oem_name: [u8; 8],
    pub bytes_per_sector: LE<u16>,
    pub sectors_per_cluster: u8,
    pub reserved_sectors: LE<u16>, // unit sector
    pub number_of_fats: u8,
    pub root_entries: LE<u16>,
    pub total_sectors_16: LE<u16>, // 0 when total_sectors_32 used
    pub media_descriptor: u8,
    pub sectors_per_fat: LE<u16>,
    pub sectors_per_track: LE<u16>,
    pub number_of_heads: LE<u16>,
    pub hidden_sectors: LE<u32>,
    pub total_sectors_32: LE<u32>,
}

const _: () = assert!(size_of::<BootSector>() == BOOT_SECTOR_SIZE);

impl From<[u8; BOOT_SECTOR_SIZE]> for BootSector {
    fn from(bytes: [u8; BOOT_SECTOR_SIZE]) -> Self {
        // Integers and byte arrays only, any bit pattern is valid
        unsafe { transmute(bytes) }
    }
}

#[cfg(test)]
impl From<BootSector> for [u8; BOOT_SECTOR_SIZE] {
    fn from(boot_sector: BootSector) -> Self {
        unsafe { transmute(boot_sector) }
    }
}

#[cfg(test)]
mod test {
    use memoffset::offset_of;

    use super::{BOOT_SECTOR_SIZE, BootSector};

    #[test]
    fn test_layout() {
        assert_eq!(offset_of!(BootSector, oem_name), 3);
        assert_eq!(offset_of!(BootSector, bytes_per_sector), 11);
        assert_eq!(offset_of!(BootSector, sectors_per_cluster), 13);
        assert_eq!(offset_of!(BootSector, reserved_sectors), 14);
        assert_eq!(offset_of!(BootSector, number_of_fats), 16);
        assert_eq!(offset_of!(BootSector, root_entries), 17);
        assert_eq!(offset_of!(BootSector, total_sectors_16), 19);
        assert_eq!(offset_of!(BootSector, media_descriptor), 21);
        assert_eq!(offset_of!(BootSector, sectors_per_fat), 22);
        assert_eq!(offset_of!(BootSector, sectors_per_track), 24);
        assert_eq!(offset_of!(BootSector, number_of_heads), 26);
        assert_eq!(offset_of!(BootSector, hidden_sectors), 28);
        assert_eq!(offset_of!(BootSector, total_sectors_32), 32);
    }

    #[test]
    fn test_little_endian_fields() {
        let mut bytes = [0u8; BOOT_SECTOR_SIZE];
        bytes[..11].copy_from_slice(&hex!("EB 3C 90 4D 53 44 4F 53 35 2E 30"));
        bytes[11..14].copy_from_slice(&hex!("00 02 04"));
        bytes[19..24].copy_from_slice(&hex!("40 0B F0 09 00"));
        bytes[32..36].copy_from_slice(&hex!("78 56 34 12"));
        let boot_sector = BootSector::from(bytes);
        assert_eq!(boot_sector.bytes_per_sector.to_ne(), 512);
        assert_eq!(boot_sector.sectors_per_cluster, 4);
        assert_eq!(boot_sector.total_sectors_16.to_ne(), 2880);
        assert_eq!(boot_sector.media_descriptor, 0xF0);
        assert_eq!(boot_sector.sectors_per_fat.to_ne(), 9);
        assert_eq!(boot_sector.total_sectors_32.to_ne(), 0x12345678);
        assert_eq!(&boot_sector.oem_name, b"MSDOS5.0");
        assert_eq!(<[u8; BOOT_SECTOR_SIZE]>::from(boot_sector), bytes);
    }
}
