//! The append path: upholds "the sector after `write.sector` is FREE",
//! reclaiming it (and relocating `read`/`cursor` out of the way first) when
//! the ring has wrapped and the next sector is still IN_USE.

use crate::error::Error;
use crate::flash::Flash;
use crate::geometry::PartitionGeometry;
use crate::header::{SectorStatus, SlotStatus};
use crate::location::Location;
use crate::sector;
use crate::slot;

/// Cursors touched by `append`. `read`/`cursor` are only moved when a
/// reclaim collides with them; `write` always advances by one slot on
/// success.
pub struct AppendCursors {
    pub read: Location,
    pub cursor: Location,
    pub write: Location,
}

pub fn append<F: Flash>(
    flash: &mut F,
    geometry: &PartitionGeometry,
    schema_version: u32,
    object_size: u32,
    slots_per_sector: u32,
    mut cursors: AppendCursors,
    object: &[u8],
) -> Result<AppendCursors, Error> {
    debug_assert_eq!(object.len() as u32, object_size);
    let sector_count = geometry.sector_count;

    // There are three sectors involved: the one we're writing into (must be
    // writable), the next one (must be FREE, the single-free-sector
    // invariant), and the one after that (read/cursor are moved there if
    // reclaiming the next sector would otherwise strand them inside it).
    let next_sector = (cursors.write.sector + 1) % sector_count;
    if sector::get_status(flash, geometry, next_sector)? != SectorStatus::Free {
        #[cfg(feature = "defmt")]
        defmt::trace!("flashring: wrap, reclaiming sector {}", next_sector);

        if cursors.read.sector == next_sector {
            cursors.read.advance_sector(sector_count);
        }
        if cursors.cursor.sector == next_sector {
            cursors.cursor.advance_sector(sector_count);
        }

        sector::reclaim(flash, geometry, next_sector, schema_version)?;
    }

    match sector::get_status(flash, geometry, cursors.write.sector)? {
        SectorStatus::Free => {
            sector::set_status(flash, geometry, cursors.write.sector, SectorStatus::InUse)?;
        }
        SectorStatus::InUse => {}
        _ => return Err(Error::AppendCorrupt),
    }

    slot::set_status(
        flash,
        geometry,
        cursors.write,
        object_size,
        SlotStatus::Reserved,
    )?;

    flash
        .program(
            slot::payload_address(geometry, cursors.write, object_size),
            object,
        )
        .map_err(|()| Error::IoFailure(crate::error::FlashOp::Program))?;

    slot::set_status(
        flash,
        geometry,
        cursors.write,
        object_size,
        SlotStatus::Valid,
    )?;

    cursors.write.advance_slot(slots_per_sector, sector_count);

    Ok(cursors)
}
