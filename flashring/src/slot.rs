//! Slot-level operations: addressing and status.

use crate::error::{Error, FlashOp, IoResultExt};
use crate::flash::Flash;
use crate::geometry::PartitionGeometry;
use crate::header::SlotStatus;
use crate::location::Location;

fn status_address(geometry: &PartitionGeometry, location: Location, object_size: u32) -> u32 {
    geometry.slot_address(location, object_size)
}

pub fn get_status<F: Flash>(
    flash: &mut F,
    geometry: &PartitionGeometry,
    location: Location,
    object_size: u32,
) -> Result<SlotStatus, Error> {
    let mut raw = [0u8; 4];
    flash
        .read(status_address(geometry, location, object_size), &mut raw)
        .io(FlashOp::Read)?;
    Ok(SlotStatus::from_raw(u32::from_le_bytes(raw)))
}

pub fn set_status<F: Flash>(
    flash: &mut F,
    geometry: &PartitionGeometry,
    location: Location,
    object_size: u32,
    status: SlotStatus,
) -> Result<(), Error> {
    flash
        .program(
            status_address(geometry, location, object_size),
            &status.to_raw().to_le_bytes(),
        )
        .io(FlashOp::Program)
}

/// Absolute byte address of the payload (just past the slot header).
pub fn payload_address(geometry: &PartitionGeometry, location: Location, object_size: u32) -> u32 {
    geometry.slot_address(location, object_size) + crate::geometry::SLOT_HEADER_SIZE
}
