//! Scan/recovery: reconstruct the read and write cursors after power-up,
//! repairing partial erases and rejecting partial formats or version
//! mismatches in the process.

use crate::error::Error;
use crate::flash::Flash;
use crate::geometry::PartitionGeometry;
use crate::header::{SectorStatus, SlotStatus};
use crate::location::Location;
use crate::sector;
use crate::slot;

/// Result of a successful scan: the reconstructed read and write heads.
/// The caller sets `cursor = read`.
pub struct ScanResult {
    pub read: Location,
    pub write: Location,
}

pub fn scan<F: Flash>(
    flash: &mut F,
    geometry: &PartitionGeometry,
    schema_version: u32,
    object_size: u32,
    slots_per_sector: u32,
) -> Result<ScanResult, Error> {
    let sector_count = geometry.sector_count;

    // The read sector is the first IN_USE sector *after* a FREE sector (or
    // the first one, if the used run starts at index 0 and wraps).
    let mut read_sector: u32 = 0;
    // The write sector is the last IN_USE sector *before* a FREE sector (or
    // the last one, if nothing ever goes FREE after it).
    let mut write_sector: u32 = sector_count - 1;
    let mut previous_status = SectorStatus::Free;
    let mut free_seen = false;
    let mut used_seen = false;

    for current in 0..sector_count {
        let (mut status, mut version) = sector::header(flash, geometry, current)?;

        if status == SectorStatus::Formatting {
            #[cfg(feature = "defmt")]
            defmt::warn!("flashring: sector {} is FORMATTING, partial format", current);
            return Err(Error::MountFormatInProgress);
        }

        if status == SectorStatus::Erasing || status == SectorStatus::Erased {
            #[cfg(feature = "defmt")]
            defmt::trace!("flashring: repairing sector {} ({})", current, status);
            sector::reclaim(flash, geometry, current, schema_version)?;
            status = SectorStatus::Free;
            version = schema_version;
        }

        if status != SectorStatus::Free && status != SectorStatus::InUse {
            #[cfg(feature = "defmt")]
            defmt::warn!("flashring: sector {} has corrupt status", current);
            return Err(Error::MountCorruptSector);
        }

        if version != schema_version {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "flashring: sector {} has version {}, expected {}",
                current,
                version,
                schema_version
            );
            return Err(Error::MountVersionMismatch);
        }

        if status == SectorStatus::Free {
            free_seen = true;
        }
        if status == SectorStatus::InUse {
            used_seen = true;
        }

        if status == SectorStatus::InUse && previous_status == SectorStatus::Free {
            read_sector = current;
        }
        if status == SectorStatus::Free && previous_status == SectorStatus::InUse {
            // current >= 1 here: the loop starts at previous_status == Free,
            // so the first iteration can never take this branch.
            write_sector = current - 1;
        }

        previous_status = status;
    }

    if !free_seen {
        return Err(Error::MountNoFreeSector);
    }
    if !used_seen {
        write_sector = 0;
    }

    // Locate the write slot: the first ERASED slot in write_sector, or the
    // sector boundary if the sector is full.
    let mut write = Location::new(write_sector, 0);
    while write.sector == write_sector {
        let status = slot::get_status(flash, geometry, write, object_size)?;
        if status == SlotStatus::Erased {
            break;
        }
        write.advance_slot(slots_per_sector, sector_count);
    }

    // Locate the read slot: skip GARBAGE/RESERVED entries at the head of
    // the oldest IN_USE sector until something VALID is found, or we catch
    // up with write (empty ring).
    let mut read = Location::new(read_sector, 0);
    while read != write {
        let status = slot::get_status(flash, geometry, read, object_size)?;
        if status == SlotStatus::Valid {
            break;
        }
        read.advance_slot(slots_per_sector, sector_count);
    }

    Ok(ScanResult { read, write })
}
