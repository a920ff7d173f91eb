//! `RingStore`: the mounted instance tying geometry, schema version, and
//! the three cursors together behind the public API surface.

use crate::append::{self, AppendCursors};
use crate::counters;
use crate::error::Error;
use crate::fetch;
use crate::flash::Flash;
use crate::format;
use crate::geometry::PartitionGeometry;
use crate::location::Location;
use crate::scan;

/// A mounted ring-buffer object store.
///
/// Owns its three cursors (`read`, `cursor`, `write`) and the geometry; the
/// flash device is owned by the caller and handed in by value (or as a
/// `&mut` target implementing [`Flash`]).
///
/// Every public method here runs to completion on the calling thread: there
/// is no internal concurrency, and callers must serialize their own access
/// (see spec.md §5). `RingStore` is not safe to share between threads
/// without external mutual exclusion.
pub struct RingStore<F> {
    flash: F,
    geometry: PartitionGeometry,
    schema_version: u32,
    object_size: u32,
    slots_per_sector: u32,

    read: Location,
    cursor: Location,
    write: Location,

    mounted: bool,
}

impl<F: Flash> RingStore<F> {
    /// Construct a store over `flash` with the given geometry. Performs no
    /// I/O: the partition must still be `format`ted or `scan`ned before
    /// `append`/`fetch` can be used.
    pub fn new(
        flash: F,
        geometry: PartitionGeometry,
        schema_version: u32,
        object_size: u32,
    ) -> Result<Self, Error> {
        let slots_per_sector = geometry.slots_per_sector(object_size)?;
        Ok(RingStore {
            flash,
            geometry,
            schema_version,
            object_size,
            slots_per_sector,
            read: Location::start(),
            cursor: Location::start(),
            write: Location::start(),
            mounted: false,
        })
    }

    /// Number of slots per sector, derived from geometry and `object_size`.
    pub fn slots_per_sector(&self) -> u32 {
        self.slots_per_sector
    }

    /// This partition's geometry.
    pub fn geometry(&self) -> PartitionGeometry {
        self.geometry
    }

    /// The configured object size, in bytes.
    pub fn object_size(&self) -> u32 {
        self.object_size
    }

    /// Current position of the read head.
    pub fn read(&self) -> Location {
        self.read
    }

    /// Current position of the read-ahead cursor.
    pub fn cursor(&self) -> Location {
        self.cursor
    }

    /// Current position of the write head.
    pub fn write(&self) -> Location {
        self.write
    }

    /// Initialize an empty partition. Poisons every sector's status first
    /// (FORMATTING) so a crash mid-format is detectable on the next `scan`,
    /// then reclaims every sector (erase, stamp version, mark FREE), then
    /// resets all three cursors to `(0, 0)`.
    pub fn format(&mut self) -> Result<(), Error> {
        let (read, cursor, write) =
            format::format(&mut self.flash, &self.geometry, self.schema_version)?;
        self.read = read;
        self.cursor = cursor;
        self.write = write;
        self.mounted = true;
        Ok(())
    }

    /// Reconstruct `read`/`cursor`/`write` by scanning the partition.
    /// Repairs partial erases in place; fails (and leaves the instance
    /// unmounted) on partial formats, corrupt sectors, or a version
    /// mismatch.
    pub fn scan(&mut self) -> Result<(), Error> {
        let result = scan::scan(
            &mut self.flash,
            &self.geometry,
            self.schema_version,
            self.object_size,
            self.slots_per_sector,
        )?;
        self.read = result.read;
        self.cursor = result.read;
        self.write = result.write;
        self.mounted = true;
        Ok(())
    }

    fn require_mounted(&self) -> Result<(), Error> {
        if self.mounted {
            Ok(())
        } else {
            // Mirrors the original's assumption that `format`/`scan` always
            // runs first; an un-mounted store's cursors are meaningless to
            // evaluate, but this is a call-site ordering mistake, not a
            // finding about the partition's contents.
            Err(Error::NotMounted)
        }
    }

    /// Maximum number of objects the ring can hold:
    /// `slots_per_sector * (sector_count - 1)`.
    pub fn capacity(&self) -> u32 {
        counters::capacity(&self.geometry, self.slots_per_sector)
    }

    /// O(1) estimate of the number of stored objects. Overcounts in the
    /// presence of internal GARBAGE/RESERVED slots.
    pub fn count_estimate(&self) -> Result<u32, Error> {
        self.require_mounted()?;
        Ok(counters::count_estimate(
            &self.geometry,
            self.slots_per_sector,
            self.read,
            self.write,
        ))
    }

    /// O(n) exact count of VALID slots between `read` and `write`.
    pub fn count_exact(&mut self) -> Result<u32, Error> {
        self.require_mounted()?;
        counters::count_exact(
            &mut self.flash,
            &self.geometry,
            self.object_size,
            self.slots_per_sector,
            self.read,
            self.write,
        )
    }

    /// Append `object` (must be exactly `object_size` bytes, or this
    /// returns `Error::InvalidArgument`) at the tail of the ring. If the
    /// ring is full, silently reclaims the oldest sector first: the caller
    /// receives no warning that data was overwritten.
    pub fn append(&mut self, object: &[u8]) -> Result<(), Error> {
        self.require_mounted()?;
        if object.len() as u32 != self.object_size {
            return Err(Error::InvalidArgument("object does not match configured object_size"));
        }

        let cursors = AppendCursors {
            read: self.read,
            cursor: self.cursor,
            write: self.write,
        };
        let cursors = append::append(
            &mut self.flash,
            &self.geometry,
            self.schema_version,
            self.object_size,
            self.slots_per_sector,
            cursors,
            object,
        )?;
        self.read = cursors.read;
        self.cursor = cursors.cursor;
        self.write = cursors.write;
        Ok(())
    }

    /// Fetch the next object, oldest-first, into `out` (must be exactly
    /// `object_size` bytes, or this returns `Error::InvalidArgument`).
    /// Advances `cursor` past it. Returns `Ok(())` on success,
    /// `Err(Error::FetchEmpty)` once `cursor` reaches `write`.
    pub fn fetch(&mut self, out: &mut [u8]) -> Result<(), Error> {
        self.require_mounted()?;
        if out.len() as u32 != self.object_size {
            return Err(Error::InvalidArgument("out does not match configured object_size"));
        }

        let delivered = fetch::fetch(
            &mut self.flash,
            &self.geometry,
            self.object_size,
            self.slots_per_sector,
            self.geometry.sector_count,
            &mut self.cursor,
            self.write,
            out,
        )?;
        if delivered {
            Ok(())
        } else {
            Err(Error::FetchEmpty)
        }
    }

    /// Commit consumption: mark every slot from `read` up to (but not
    /// including) `cursor` as GARBAGE. Those records can no longer be
    /// re-fetched via `rewind`.
    pub fn discard(&mut self) -> Result<(), Error> {
        self.require_mounted()?;
        fetch::discard(
            &mut self.flash,
            &self.geometry,
            self.object_size,
            self.slots_per_sector,
            self.geometry.sector_count,
            &mut self.read,
            self.cursor,
        )
    }

    /// Drop a single head record without involving `cursor`.
    pub fn item_discard(&mut self) -> Result<(), Error> {
        self.require_mounted()?;
        fetch::item_discard(
            &mut self.flash,
            &self.geometry,
            self.object_size,
            self.slots_per_sector,
            self.geometry.sector_count,
            &mut self.read,
        )
    }

    /// Reset `cursor` back to `read`. Subsequent fetches re-deliver records
    /// that have been fetched but not yet discarded.
    pub fn rewind(&mut self) {
        self.cursor = fetch::rewind(self.read);
    }

    /// Borrow the underlying flash device.
    pub fn flash(&self) -> &F {
        &self.flash
    }

    /// Borrow the underlying flash device mutably. Callers must not touch
    /// the partition's byte range through this while relying on `RingStore`
    /// invariants elsewhere.
    pub fn flash_mut(&mut self) -> &mut F {
        &mut self.flash
    }

    /// Consume the store, returning the underlying flash device.
    pub fn into_flash(self) -> F {
        self.flash
    }
}
