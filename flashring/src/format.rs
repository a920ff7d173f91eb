//! Initialize an empty partition with crash-safe intermediate marking.
//!
//! If power fails while every sector is being marked FORMATTING, the next
//! `scan` sees at least one FORMATTING sector and refuses to mount. If it
//! fails during the reclaim pass, the affected sector is left
//! ERASING/ERASED, which `scan` repairs in place.

use crate::error::Error;
use crate::flash::Flash;
use crate::geometry::PartitionGeometry;
use crate::header::SectorStatus;
use crate::location::Location;
use crate::sector;

pub fn format<F: Flash>(
    flash: &mut F,
    geometry: &PartitionGeometry,
    schema_version: u32,
) -> Result<(Location, Location, Location), Error> {
    for current in 0..geometry.sector_count {
        sector::set_status(flash, geometry, current, SectorStatus::Formatting)?;
    }

    for current in 0..geometry.sector_count {
        sector::reclaim(flash, geometry, current, schema_version)?;
    }

    #[cfg(feature = "defmt")]
    defmt::trace!("flashring: formatted {} sectors", geometry.sector_count);

    Ok((Location::start(), Location::start(), Location::start()))
}
