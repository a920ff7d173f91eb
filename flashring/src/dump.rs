//! Debug dumping: render sector/slot status for human inspection.
//!
//! Out of scope for the core algorithm (spec.md §1), but useful enough to
//! keep as an external-collaborator-style helper. Unlike the original's
//! `ringfs_dump`, which writes straight to a `FILE*`, this writes into any
//! `core::fmt::Write` sink, so it composes with whatever output the caller
//! already has (a buffer, a UART, a host tool's `String`, ...).

use core::fmt::{self, Write};

use crate::flash::Flash;
use crate::header::{SectorStatus, SlotStatus};
use crate::location::Location;
use crate::sector;
use crate::slot;
use crate::store::RingStore;

impl<F: Flash> RingStore<F> {
    /// Render every sector's status/version and every slot's status into
    /// `w`, for debugging. Reads the whole partition back off flash; not
    /// part of any invariant.
    pub fn dump<W: Write>(&mut self, w: &mut W) -> fmt::Result {
        writeln!(
            w,
            "read: {{{}, {}}} cursor: {{{}, {}}} write: {{{}, {}}}",
            self.read().sector,
            self.read().slot,
            self.cursor().sector,
            self.cursor().slot,
            self.write().sector,
            self.write().slot,
        )?;

        let geometry = self.geometry();
        let object_size = self.object_size();
        let slots_per_sector = self.slots_per_sector();

        for sec in 0..geometry.sector_count {
            let (status, version) =
                sector::header(self.flash_mut(), &geometry, sec).map_err(|_| fmt::Error)?;
            write!(
                w,
                "[{:4}] [v={:#010x}] [{:10}] ",
                sec,
                version,
                sector_status_name(status)
            )?;

            for s in 0..slots_per_sector {
                let loc = Location::new(sec, s);
                let status = slot::get_status(self.flash_mut(), &geometry, loc, object_size)
                    .map_err(|_| fmt::Error)?;
                write!(w, "{}", slot_status_char(status))?;
            }
            writeln!(w)?;
        }

        Ok(())
    }
}

fn sector_status_name(status: SectorStatus) -> &'static str {
    match status {
        SectorStatus::Erased => "ERASED",
        SectorStatus::Free => "FREE",
        SectorStatus::InUse => "IN_USE",
        SectorStatus::Erasing => "ERASING",
        SectorStatus::Formatting => "FORMATTING",
        SectorStatus::Corrupt(_) => "UNKNOWN",
    }
}

fn slot_status_char(status: SlotStatus) -> char {
    match status {
        SlotStatus::Erased => 'E',
        SlotStatus::Reserved => 'R',
        SlotStatus::Valid => 'V',
        SlotStatus::Garbage => 'G',
        SlotStatus::Corrupt(_) => '?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PartitionGeometry;

    struct NullFlash {
        data: [u8; 4096],
    }

    impl Flash for NullFlash {
        fn erase(&mut self, address: u32) -> Result<(), ()> {
            let sector_size = 1024usize;
            let start = (address as usize) / sector_size * sector_size;
            self.data[start..start + sector_size].fill(0xFF);
            Ok(())
        }

        fn program(&mut self, address: u32, data: &[u8]) -> Result<(), ()> {
            let start = address as usize;
            for (i, byte) in data.iter().enumerate() {
                self.data[start + i] &= byte;
            }
            Ok(())
        }

        fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<(), ()> {
            let start = address as usize;
            buf.copy_from_slice(&self.data[start..start + buf.len()]);
            Ok(())
        }
    }

    #[test]
    fn dump_renders_header_line_and_one_slot_row_per_sector() {
        let flash = NullFlash { data: [0xFF; 4096] };
        let geometry = PartitionGeometry {
            sector_size: 1024,
            sector_offset: 0,
            sector_count: 4,
        };
        let mut store = RingStore::new(flash, geometry, 1, 8).unwrap();
        store.format().unwrap();
        store.append(&[1; 8]).unwrap();

        let mut out = heapless_string();
        store.dump(&mut out).unwrap();
        assert!(out.contains("read: {0, 0}"));
        assert!(out.contains("IN_USE"));
        assert!(out.contains('V'));
    }

    // A tiny fixed-capacity `core::fmt::Write` sink so this test doesn't
    // need `std::string::String` or an extra dependency.
    struct FixedString {
        buf: [u8; 2048],
        len: usize,
    }

    impl FixedString {
        fn contains(&self, needle: &str) -> bool {
            let s = core::str::from_utf8(&self.buf[..self.len]).unwrap();
            s.contains(needle)
        }
    }

    impl Write for FixedString {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            let bytes = s.as_bytes();
            self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
            self.len += bytes.len();
            Ok(())
        }
    }

    fn heapless_string() -> FixedString {
        FixedString {
            buf: [0; 2048],
            len: 0,
        }
    }
}
