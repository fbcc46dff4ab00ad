use crate::error::GeometryError;
use crate::region::boot::BootSector;
use crate::types::{ClusterID, SectorID};

const DIRECTORY_ENTRY_SIZE: u32 = 32;

/// Volume geometry read from boot sector.
///
/// Fields are kept as they are on disk, no value is validated on read.
/// Derived quantities which divide by a zero field fail with [`GeometryError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub jump_boot: [u8; 3],
    pub oem_name: [u8; 8],
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    pub reserved_sectors: u16,
    pub number_of_fats: u8,
    pub root_entries: u16,
    pub total_sectors_16: u16,
    pub media_descriptor: u8,
    pub sectors_per_fat: u16,
    pub sectors_per_track: u16,
    pub number_of_heads: u16,
    pub hidden_sectors: u32,
    pub total_sectors_32: u32,
}

impl From<BootSector> for Geometry {
    fn from(boot_sector: BootSector) -> Self {
        Self {
            jump_boot: boot_sector.jump_boot,
            oem_name: boot_sector.oem_name,
            bytes_per_sector: boot_sector.bytes_per_sector.to_ne(),
            sectors_per_cluster: boot_sector.sectors_per_cluster,
            reserved_sectors: boot_sector.reserved_sectors.to_ne(),
            number_of_fats: boot_sector.number_of_fats,
            root_entries: boot_sector.root_entries.to_ne(),
            total_sectors_16: boot_sector.total_sectors_16.to_ne(),
            media_descriptor: boot_sector.media_descriptor,
            sectors_per_fat: boot_sector.sectors_per_fat.to_ne(),
            sectors_per_track: boot_sector.sectors_per_track.to_ne(),
            number_of_heads: boot_sector.number_of_heads.to_ne(),
            hidden_sectors: boot_sector.hidden_sectors.to_ne(),
            total_sectors_32: boot_sector.total_sectors_32.to_ne(),
        }
    }
}

#[cfg(test)]
impl From<&Geometry> for BootSector {
    fn from(geometry: &Geometry) -> Self {
        Self {
            jump_boot: geometry.jump_boot,
            oem_name: geometry.oem_name,
            bytes_per_sector: geometry.bytes_per_sector.into(),
            sectors_per_cluster: geometry.sectors_per_cluster,
            reserved_sectors: geometry.reserved_sectors.into(),
            number_of_fats: geometry.number_of_fats,
            root_entries: geometry.root_entries.into(),
            total_sectors_16: geometry.total_sectors_16.into(),
            media_descriptor: geometry.media_descriptor,
            sectors_per_fat: geometry.sectors_per_fat.into(),
            sectors_per_track: geometry.sectors_per_track.into(),
            number_of_heads: geometry.number_of_heads.into(),
            hidden_sectors: geometry.hidden_sectors.into(),
            total_sectors_32: geometry.total_sectors_32.into(),
        }
    }
}

impl Geometry {
    fn sector_size(&self) -> Result<u32, GeometryError> {
        match self.bytes_per_sector {
            0 => Err(GeometryError::ZeroBytesPerSector),
            size => Ok(size as u32),
        }
    }

    fn cluster_sectors(&self) -> Result<u32, GeometryError> {
        match self.sectors_per_cluster {
            0 => Err(GeometryError::ZeroSectorsPerCluster),
            sectors => Ok(sectors as u32),
        }
    }

    /// Jump instruction is either `EB xx 90` or `E9 xx xx`
    pub fn has_valid_jump(&self) -> bool {
        matches!(self.jump_boot, [0xEB, _, 0x90] | [0xE9, _, _])
    }

    /// OEM name without trailing space or NUL padding
    pub fn oem_label(&self) -> &[u8] {
        let size = self.oem_name.iter().rposition(|&b| b != b' ' && b != 0).map_or(0, |i| i + 1);
        &self.oem_name[..size]
    }

    /// FAT region start, in bytes
    pub fn fat_start(&self) -> u64 {
        self.reserved_sectors as u64 * self.bytes_per_sector as u64
    }

    /// Size of one FAT copy, in bytes
    pub fn fat_size(&self) -> u64 {
        self.sectors_per_fat as u64 * self.bytes_per_sector as u64
    }

    pub fn total_sectors(&self) -> u32 {
        match self.total_sectors_16 {
            0 => self.total_sectors_32,
            sectors => sectors as u32,
        }
    }

    /// Root directory size rounded up to whole sectors
    pub fn root_dir_sectors(&self) -> Result<u32, GeometryError> {
        let sector_size = self.sector_size()?;
        Ok((self.root_entries as u32 * DIRECTORY_ENTRY_SIZE).div_ceil(sector_size))
    }

    /// First sector of data area, right after the system area
    pub fn data_area_start(&self) -> Result<SectorID, GeometryError> {
        let fat_sectors = self.number_of_fats as u32 * self.sectors_per_fat as u32;
        let sectors = self.reserved_sectors as u32 + fat_sectors + self.root_dir_sectors()?;
        Ok(SectorID::BOOT + sectors)
    }

    pub fn data_area_start_bytes(&self) -> Result<u64, GeometryError> {
        let sector = u32::from(self.data_area_start()?);
        Ok(sector as u64 * self.sector_size()? as u64)
    }

    /// Cluster size in bytes
    pub fn cluster_size(&self) -> u32 {
        self.sectors_per_cluster as u32 * self.bytes_per_sector as u32
    }

    /// Byte offset of specified cluster within the volume
    pub fn cluster_offset(&self, cluster_id: ClusterID) -> Result<u64, GeometryError> {
        let offset = cluster_id.offset().ok_or(GeometryError::ReservedCluster(cluster_id))?;
        let cluster_size = self.cluster_sectors()? as u64 * self.sector_size()? as u64;
        Ok(self.data_area_start_bytes()? + offset as u64 * cluster_size)
    }

    pub fn total_clusters(&self) -> Result<u32, GeometryError> {
        Ok(self.total_sectors() / self.cluster_sectors()?)
    }

    /// Clusters occupied by reserved sectors, FAT copies and root directory,
    /// a partially covered cluster counts as a whole
    pub fn system_clusters(&self) -> Result<u32, GeometryError> {
        let sectors = u32::from(self.data_area_start()?);
        Ok(sectors.div_ceil(self.cluster_sectors()?))
    }

    pub fn data_clusters(&self) -> Result<u32, GeometryError> {
        let total = self.total_clusters()?;
        total.checked_sub(self.system_clusters()?).ok_or(GeometryError::SystemAreaOverflow)
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::Geometry;
    use crate::error::GeometryError;
    use crate::types::{ClusterID, SectorID};

    pub(crate) fn floppy() -> Geometry {
        Geometry {
            jump_boot: hex!("EB 3C 90"),
            oem_name: *b"MSWIN4.1",
            bytes_per_sector: 512,
            sectors_per_cluster: 1,
            reserved_sectors: 1,
            number_of_fats: 1,
            root_entries: 16,
            total_sectors_16: 40,
            media_descriptor: 0xF0,
            sectors_per_fat: 2,
            sectors_per_track: 18,
            number_of_heads: 2,
            hidden_sectors: 0,
            total_sectors_32: 0,
        }
    }

    #[test]
    fn test_derived() {
        let geometry = floppy();
        assert_eq!(geometry.fat_start(), 512);
        assert_eq!(geometry.fat_size(), 1024);
        assert_eq!(geometry.root_dir_sectors(), Ok(1));
        assert_eq!(geometry.data_area_start(), Ok(SectorID::from(4u32)));
        assert_eq!(geometry.data_area_start_bytes(), Ok(2048));
        assert_eq!(geometry.total_clusters(), Ok(40));
        assert_eq!(geometry.system_clusters(), Ok(4));
        assert_eq!(geometry.data_clusters(), Ok(36));
        assert_eq!(geometry.cluster_size(), 512);
    }

    #[test]
    fn test_cluster_offset() {
        let geometry = floppy();
        let data_area = geometry.data_area_start_bytes().unwrap();
        assert_eq!(geometry.cluster_offset(ClusterID::FIRST), Ok(data_area));
        assert_eq!(geometry.cluster_offset(ClusterID::from(5u32)), Ok(data_area + 3 * 512));
        let cluster_id = ClusterID::from(1u32);
        let expected = Err(GeometryError::ReservedCluster(cluster_id));
        assert_eq!(geometry.cluster_offset(cluster_id), expected);

        let geometry = Geometry { sectors_per_cluster: 4, ..floppy() };
        assert_eq!(geometry.cluster_offset(ClusterID::from(3u32)), Ok(data_area + 2048));
        assert_eq!(geometry.total_clusters(), Ok(10));
        assert_eq!(geometry.system_clusters(), Ok(1));
    }

    #[test]
    fn test_root_dir_rounding() {
        let geometry = Geometry { root_entries: 17, ..floppy() };
        assert_eq!(geometry.root_dir_sectors(), Ok(2));
        let geometry = Geometry { root_entries: 224, ..floppy() };
        assert_eq!(geometry.root_dir_sectors(), Ok(14));
    }

    #[test]
    fn test_zero_geometry() {
        let geometry = Geometry { bytes_per_sector: 0, ..floppy() };
        assert_eq!(geometry.fat_size(), 0);
        assert_eq!(geometry.root_dir_sectors(), Err(GeometryError::ZeroBytesPerSector));
        assert_eq!(geometry.data_clusters(), Err(GeometryError::ZeroBytesPerSector));

        let geometry = Geometry { sectors_per_cluster: 0, ..floppy() };
        assert_eq!(geometry.total_clusters(), Err(GeometryError::ZeroSectorsPerCluster));
        let result = geometry.cluster_offset(ClusterID::FIRST);
        assert_eq!(result, Err(GeometryError::ZeroSectorsPerCluster));
    }

    #[test]
    fn test_system_area_overflow() {
        let geometry = Geometry { total_sectors_16: 3, ..floppy() };
        assert_eq!(geometry.data_clusters(), Err(GeometryError::SystemAreaOverflow));
    }

    #[test]
    fn test_total_sectors_32() {
        let geometry = Geometry { total_sectors_16: 0, total_sectors_32: 70000, ..floppy() };
        assert_eq!(geometry.total_sectors(), 70000);
        assert_eq!(geometry.total_clusters(), Ok(70000));
    }

    #[test]
    fn test_boot_fields() {
        let geometry = floppy();
        assert!(geometry.has_valid_jump());
        assert_eq!(geometry.oem_label(), b"MSWIN4.1");
        let geometry = Geometry { jump_boot: [0; 3], oem_name: *b"mkfs\0\0\0\0", ..floppy() };
        assert!(!geometry.has_valid_jump());
        assert_eq!(geometry.oem_label(), b"mkfs");
    }
}
