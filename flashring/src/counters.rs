//! Capacity and object counts.

use crate::error::Error;
use crate::flash::Flash;
use crate::geometry::PartitionGeometry;
use crate::header::SlotStatus;
use crate::location::Location;
use crate::slot;

/// `slots_per_sector * (sector_count - 1)`: one sector is always held FREE.
pub fn capacity(geometry: &PartitionGeometry, slots_per_sector: u32) -> u32 {
    slots_per_sector * (geometry.sector_count - 1)
}

/// O(1) estimate: treats the ring as contiguous, overcounting whenever
/// there are internal GARBAGE/RESERVED slots between `read` and `write`.
pub fn count_estimate(
    geometry: &PartitionGeometry,
    slots_per_sector: u32,
    read: Location,
    write: Location,
) -> u32 {
    let sector_diff = (write.sector + geometry.sector_count - read.sector) % geometry.sector_count;
    sector_diff * slots_per_sector + write.slot - read.slot
}

/// O(n) exact count: walks from `read` to `write`, counting only VALID
/// slots.
pub fn count_exact<F: Flash>(
    flash: &mut F,
    geometry: &PartitionGeometry,
    object_size: u32,
    slots_per_sector: u32,
    read: Location,
    write: Location,
) -> Result<u32, Error> {
    let mut count = 0;
    let mut loc = read;
    while loc != write {
        if slot::get_status(flash, geometry, loc, object_size)? == SlotStatus::Valid {
            count += 1;
        }
        loc.advance_slot(slots_per_sector, geometry.sector_count);
    }
    Ok(count)
}
