//! Extraction backends behind one contract.
//!
//! Both backends take an archive path, a destination directory and
//! `ExtractOptions`, and produce an `ExtractReport`. Call sites pick a
//! backend once, through `Extractor::new`, instead of branching per call.

use std::path::Path;

use crate::entry::ExtractReport;
use crate::error::Result;
use crate::format::Compression;
use crate::options::ExtractOptions;

mod stream;
mod system;

pub use stream::StreamExtractor;
pub use system::SystemTar;

/// Which implementation carries out the extraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Backend {
    /// In-process, via the `tar` crate (and `flate2` for gzip).
    #[default]
    Stream,
    /// Delegate to the platform `tar` binary.
    System,
}

pub enum Extractor {
    Stream(StreamExtractor),
    System(SystemTar),
}

impl Extractor {
    /// Build an extractor for `backend`. Fails with `TarBinaryMissing` when
    /// the system backend is requested and no `tar` is on PATH.
    pub fn new(backend: Backend, compression: Compression) -> Result<Self> {
        match backend {
            Backend::Stream => Ok(Self::Stream(StreamExtractor::new(compression))),
            Backend::System => Ok(Self::System(SystemTar::locate(compression)?)),
        }
    }

    pub fn extract(
        &self,
        archive: &Path,
        destination: &Path,
        options: &ExtractOptions,
    ) -> Result<ExtractReport> {
        match self {
            Self::Stream(extractor) => extractor.extract(archive, destination, options),
            Self::System(extractor) => extractor.extract(archive, destination, options),
        }
    }
}
