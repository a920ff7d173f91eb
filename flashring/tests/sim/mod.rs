//! In-memory flash simulator used by the integration tests in `ring.rs`.
//!
//! Grounded directly on `ringfs`'s `tests/flashsim.c`: a flat byte buffer,
//! `erase` fills a sector with `0xFF`, `program` ANDs new bytes into the
//! existing contents (so attempting to set a cleared bit back to one
//! silently fails to do so, exactly like real NOR flash), `read` copies out
//! the requested window. On top of that, two knobs let the crash-recovery
//! scenarios in `ring.rs` be expressed as ordinary `#[test]` functions
//! instead of hand-rolled byte surgery every time.

use flashring::Flash;

pub struct MemFlash {
    data: Vec<u8>,
    sector_size: u32,
    ops_until_failure: Option<u32>,
    truncate_next_program: Option<usize>,
}

impl MemFlash {
    /// A freshly "erased" device: every byte all-ones.
    pub fn new(total_size: u32, sector_size: u32) -> Self {
        MemFlash {
            data: vec![0xFFu8; total_size as usize],
            sector_size,
            ops_until_failure: None,
            truncate_next_program: None,
        }
    }

    /// Every physical operation (`erase`/`program`/`read`) after the `n`th
    /// from now returns the I/O-failure sentinel. `n == 0` fails the very
    /// next call.
    pub fn fail_after(&mut self, n: u32) {
        self.ops_until_failure = Some(n);
    }

    /// The next `program` call only writes its first `bytes` bytes before
    /// returning success, simulating power loss partway through a program.
    /// Used to land a slot in RESERVED without ever reaching VALID (S3), or
    /// a sector in ERASING without reaching FREE (S4, via direct status
    /// pokes below).
    pub fn truncate_next_program(&mut self, bytes: usize) {
        self.truncate_next_program = Some(bytes);
    }

    /// Poke bytes directly, bypassing the AND-into-existing-contents
    /// semantics of `program`. Used to set up crash scenarios (S5: mark
    /// sectors FORMATTING; S4: mark a sector ERASING) without going through
    /// the library under test.
    pub fn raw_write(&mut self, address: u32, data: &[u8]) {
        let start = address as usize;
        self.data[start..start + data.len()].copy_from_slice(data);
    }

    fn tick(&mut self) -> Result<(), ()> {
        match self.ops_until_failure {
            Some(0) => Err(()),
            Some(n) => {
                self.ops_until_failure = Some(n - 1);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Flash for MemFlash {
    fn erase(&mut self, address: u32) -> Result<(), ()> {
        self.tick()?;
        let sector_start = (address / self.sector_size) * self.sector_size;
        let start = sector_start as usize;
        self.data[start..start + self.sector_size as usize].fill(0xFF);
        Ok(())
    }

    fn program(&mut self, address: u32, data: &[u8]) -> Result<(), ()> {
        self.tick()?;
        let start = address as usize;
        let len = match self.truncate_next_program.take() {
            Some(n) => n.min(data.len()),
            None => data.len(),
        };
        for i in 0..len {
            self.data[start + i] &= data[i];
        }
        Ok(())
    }

    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<(), ()> {
        self.tick()?;
        let start = address as usize;
        buf.copy_from_slice(&self.data[start..start + buf.len()]);
        Ok(())
    }
}
