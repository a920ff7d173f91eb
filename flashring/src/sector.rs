//! Sector-level operations: addressing, status, and reclaim.

use crate::error::{Error, FlashOp, IoResultExt};
use crate::flash::Flash;
use crate::geometry::PartitionGeometry;
use crate::header::SectorStatus;

pub fn get_status<F: Flash>(
    flash: &mut F,
    geometry: &PartitionGeometry,
    sector: u32,
) -> Result<SectorStatus, Error> {
    let mut raw = [0u8; 4];
    flash
        .read(geometry.sector_status_address(sector), &mut raw)
        .io(FlashOp::Read)?;
    Ok(SectorStatus::from_raw(u32::from_le_bytes(raw)))
}

pub fn set_status<F: Flash>(
    flash: &mut F,
    geometry: &PartitionGeometry,
    sector: u32,
    status: SectorStatus,
) -> Result<(), Error> {
    flash
        .program(
            geometry.sector_status_address(sector),
            &status.to_raw().to_le_bytes(),
        )
        .io(FlashOp::Program)
}

fn get_version<F: Flash>(
    flash: &mut F,
    geometry: &PartitionGeometry,
    sector: u32,
) -> Result<u32, Error> {
    let mut raw = [0u8; 4];
    flash
        .read(geometry.sector_version_address(sector), &mut raw)
        .io(FlashOp::Read)?;
    Ok(u32::from_le_bytes(raw))
}

/// Reclaim a sector: erase it, stamp it with `schema_version`, and mark it
/// FREE.
///
/// Steps 1, 3 and 4 below are bit-clearing programs on a freshly erased
/// (all-ones) sector, so they're crash-safe: any prefix of this sequence is
/// either detected as ERASING on the next scan (and restarted) or leaves a
/// usable sector.
pub fn reclaim<F: Flash>(
    flash: &mut F,
    geometry: &PartitionGeometry,
    sector: u32,
    schema_version: u32,
) -> Result<(), Error> {
    set_status(flash, geometry, sector, SectorStatus::Erasing)?;
    flash
        .erase(geometry.sector_address(sector))
        .io(FlashOp::Erase)?;
    flash
        .program(
            geometry.sector_version_address(sector),
            &schema_version.to_le_bytes(),
        )
        .io(FlashOp::Program)?;
    set_status(flash, geometry, sector, SectorStatus::Free)?;
    Ok(())
}

/// Read back a sector's header in one call (used by `scan`).
pub fn header<F: Flash>(
    flash: &mut F,
    geometry: &PartitionGeometry,
    sector: u32,
) -> Result<(SectorStatus, u32), Error> {
    let status = get_status(flash, geometry, sector)?;
    let version = get_version(flash, geometry, sector)?;
    Ok((status, version))
}
