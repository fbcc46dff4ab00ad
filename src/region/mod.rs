/// Boot sector, volume geometry parameters at byte 0
pub(crate) mod boot;

/// FAT region, [`reserved-sectors`][link] sectors into the volume,
/// [`number-of-fats`][link] copies of [`sectors-per-fat`][link] sectors each
///
/// [link]: boot::BootSector
pub(crate) mod fat;
