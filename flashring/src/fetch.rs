//! Consumer-side cursor manipulation: fetch, discard, item_discard, rewind.

use crate::error::{Error, FlashOp};
use crate::flash::Flash;
use crate::geometry::PartitionGeometry;
use crate::header::SlotStatus;
use crate::location::Location;
use crate::slot;

/// Advance `cursor` from its current position towards `write`, delivering
/// the first VALID slot found into `out`. Returns `Ok(true)` if an object
/// was delivered, `Ok(false)` if `cursor` reached `write` with nothing left.
pub fn fetch<F: Flash>(
    flash: &mut F,
    geometry: &PartitionGeometry,
    object_size: u32,
    slots_per_sector: u32,
    sector_count: u32,
    cursor: &mut Location,
    write: Location,
    out: &mut [u8],
) -> Result<bool, Error> {
    while *cursor != write {
        let status = slot::get_status(flash, geometry, *cursor, object_size)?;
        if status == SlotStatus::Valid {
            flash
                .read(slot::payload_address(geometry, *cursor, object_size), out)
                .map_err(|()| Error::IoFailure(FlashOp::Read))?;
            cursor.advance_slot(slots_per_sector, sector_count);
            return Ok(true);
        }
        cursor.advance_slot(slots_per_sector, sector_count);
    }
    Ok(false)
}

/// Mark every slot from `read` up to (but not including) `cursor` as
/// GARBAGE, advancing `read` past each. Commits consumption: those records
/// can no longer be re-fetched via `rewind`.
pub fn discard<F: Flash>(
    flash: &mut F,
    geometry: &PartitionGeometry,
    object_size: u32,
    slots_per_sector: u32,
    sector_count: u32,
    read: &mut Location,
    cursor: Location,
) -> Result<(), Error> {
    while *read != cursor {
        slot::set_status(flash, geometry, *read, object_size, SlotStatus::Garbage)?;
        read.advance_slot(slots_per_sector, sector_count);
    }
    Ok(())
}

/// Drop a single head record without involving `cursor`.
pub fn item_discard<F: Flash>(
    flash: &mut F,
    geometry: &PartitionGeometry,
    object_size: u32,
    slots_per_sector: u32,
    sector_count: u32,
    read: &mut Location,
) -> Result<(), Error> {
    slot::set_status(flash, geometry, *read, object_size, SlotStatus::Garbage)?;
    read.advance_slot(slots_per_sector, sector_count);
    Ok(())
}

/// Reset `cursor` back to `read`. Subsequent fetches re-deliver records
/// that were fetched but not yet discarded.
pub fn rewind(read: Location) -> Location {
    read
}
