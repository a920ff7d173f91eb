//! The error taxonomy. Surfaced to the caller unmodified: a mount failure
//! leaves the instance unmountable (the caller's only remediation is
//! `format`); append/fetch failures never roll back cursor state beyond
//! what prior successful steps already committed.

/// What kind of flash primitive failed, for [`Error::IoFailure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashOp {
    Erase,
    Program,
    Read,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// `scan` saw a sector with status FORMATTING: the partition was in the
    /// middle of a format when power was lost. The caller's only
    /// remediation is to re-format.
    #[error("partition is mid-format, re-format required")]
    MountFormatInProgress,

    /// A sector's status is not in its legal chain even after the
    /// ERASING/ERASED repair pass.
    #[error("sector has a corrupt status")]
    MountCorruptSector,

    /// A sector's `version` does not match the configured `schema_version`.
    #[error("sector version does not match configured schema_version")]
    MountVersionMismatch,

    /// The single-FREE-sector invariant does not hold: no sector is FREE.
    #[error("no FREE sector found, invariant violated")]
    MountNoFreeSector,

    /// The current write sector is neither FREE nor IN_USE.
    #[error("write sector is corrupt")]
    AppendCorrupt,

    /// `fetch` reached the write cursor with nothing left to deliver.
    #[error("no more objects to fetch")]
    FetchEmpty,

    /// The geometry given to `RingStore::new` cannot hold the configured
    /// `object_size`.
    #[error("invalid partition geometry: {0}")]
    InvalidGeometry(&'static str),

    /// A caller-supplied argument (e.g. a `fetch`/`append` buffer) does not
    /// match the store's configured `object_size`. Distinct from
    /// `AppendCorrupt`/`FetchEmpty`: this is a programming error at the call
    /// site, not a statement about the partition's on-disk state.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A method that requires `format`/`scan` to have run first was called
    /// on a store that hasn't been mounted yet. Distinct from
    /// `MountCorruptSector`: nothing on the partition has been examined, so
    /// nothing has been found corrupt.
    #[error("store has not been mounted: call format() or scan() first")]
    NotMounted,

    /// An underlying flash primitive returned an error.
    #[error("flash {0:?} failed")]
    IoFailure(FlashOp),
}

pub(crate) trait IoResultExt<T> {
    fn io(self, op: FlashOp) -> Result<T, Error>;
}

impl<T> IoResultExt<T> for Result<T, ()> {
    fn io(self, op: FlashOp) -> Result<T, Error> {
        self.map_err(|()| Error::IoFailure(op))
    }
}
