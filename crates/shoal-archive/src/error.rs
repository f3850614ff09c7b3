use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open archive '{path}': {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("gzip stream failed to decompress: {source}")]
    Decompress { source: io::Error },

    #[error("archive is corrupted")]
    Corrupted,

    #[error("entry '{entry}' resolves outside the destination: '{resolved}'")]
    PathEscape { entry: PathBuf, resolved: PathBuf },

    #[error("symlink target escapes the destination: '{target}' -> '{resolved}'")]
    SymlinkEscape { target: PathBuf, resolved: PathBuf },

    #[error("symlink target is an absolute path: '{target}' in '{link}'")]
    AbsoluteSymlinkTarget { target: PathBuf, link: PathBuf },

    #[error("entry path is not valid")]
    InvalidPath,

    #[error("strip_components({count}) removed every component of '{original}'")]
    StripExhausted { original: PathBuf, count: usize },

    #[error("unsupported entry kind at '{path}'")]
    UnsupportedEntry { path: PathBuf },

    #[error("failed to write '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to create directory '{path}': {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to create symlink '{link}' -> '{target}': {source}")]
    Symlink {
        target: PathBuf,
        link: PathBuf,
        source: shoal_fs::Error,
    },

    #[error("no tar binary found on PATH")]
    TarBinaryMissing,

    #[error("failed to run '{program}': {source}")]
    Command { program: PathBuf, source: io::Error },

    #[error("'{program}' exited with {status}: {stderr}")]
    CommandStatus {
        program: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error("staging workspace failed: {source}")]
    Staging { source: shoal_fs::Error },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<shoal_fs::Error> for Error {
    fn from(e: shoal_fs::Error) -> Self {
        Self::Staging { source: e }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
