//! # flashring
//!
//! A persistent ring-buffer object store for raw NOR flash.
//!
//! `flashring` turns a flash partition — a fixed number of equally sized
//! erase sectors — into a durable FIFO queue of fixed-size objects.
//! Producers [`RingStore::append`] at the tail; consumers
//! [`RingStore::fetch`] oldest-first and [`RingStore::discard`] once
//! they're done with them. When the ring is full, appending silently
//! reclaims the oldest sector: this is a shock absorber for the newest N
//! records, not a guaranteed-durable log.
//!
//! ## What this crate is not
//!
//!  - No per-object addressing or random access — reads are strictly
//!    sequential from the read cursor.
//!  - No concurrent access from multiple producers or consumers; callers
//!    serialize their own access (see the module docs on [`RingStore`]).
//!  - No wear-leveling beyond the natural round-robin rotation of sectors.
//!  - No variable-length records: `object_size` is fixed for the lifetime
//!    of a partition.
//!  - No payload checksumming. Integrity is limited to the four-state
//!    status words described in the `header` module.
//!
//! ## Surviving power loss
//!
//! Every status word moves through a small chain of bit patterns using
//! only 1->0 programs (see the `header` module), so a crash mid-program
//! always leaves a pattern that the next [`RingStore::scan`] can recognize
//! and either repair (a half-erased sector) or treat as not-yet-committed
//! (a half-written slot). See `scan` and `append` for the exact rules.
//!
//! ## Getting started
//!
//! ```
//! use flashring::{Flash, PartitionGeometry, RingStore};
//!
//! struct MemFlash(Vec<u8>);
//!
//! impl Flash for MemFlash {
//!     fn erase(&mut self, address: u32) -> Result<(), ()> {
//!         let sector_size = 1024usize;
//!         let start = (address as usize) / sector_size * sector_size;
//!         self.0[start..start + sector_size].fill(0xFF);
//!         Ok(())
//!     }
//!     fn program(&mut self, address: u32, data: &[u8]) -> Result<(), ()> {
//!         let start = address as usize;
//!         for (i, b) in data.iter().enumerate() {
//!             self.0[start + i] &= b;
//!         }
//!         Ok(())
//!     }
//!     fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<(), ()> {
//!         let start = address as usize;
//!         buf.copy_from_slice(&self.0[start..start + buf.len()]);
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<(), flashring::Error> {
//! let flash = MemFlash(vec![0xFFu8; 4 * 1024]);
//! let geometry = PartitionGeometry { sector_size: 1024, sector_offset: 0, sector_count: 4 };
//! let mut store = RingStore::new(flash, geometry, 1, 16)?;
//! store.format()?;
//! store.append(&[0x41; 16])?;
//!
//! let mut out = [0u8; 16];
//! store.fetch(&mut out)?;
//! assert_eq!(out, [0x41; 16]);
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), no_std)]

mod append;
pub mod cache;
mod counters;
mod dump;
mod error;
mod fetch;
mod flash;
mod format;
mod geometry;
pub mod header;
mod location;
mod scan;
mod sector;
mod slot;
mod store;

pub use error::Error;
pub use flash::Flash;
pub use geometry::PartitionGeometry;
pub use header::{SectorStatus, SlotStatus};
pub use location::Location;
pub use store::RingStore;
