#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("path not found")]
    NotFound,

    #[error("permission denied")]
    PermissionDenied,

    #[error("already exists")]
    AlreadyExists,

    #[error("symlink not supported on this platform")]
    SymlinkNotSupported,

    #[error("operation failed: {0}")]
    Failed(std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub fn from_io(err: std::io::Error) -> Error {
    match err.kind() {
        std::io::ErrorKind::NotFound => Error::NotFound,
        std::io::ErrorKind::PermissionDenied => Error::PermissionDenied,
        std::io::ErrorKind::AlreadyExists => Error::AlreadyExists,
        std::io::ErrorKind::Unsupported => Error::SymlinkNotSupported,
        _ => Error::Failed(err),
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        from_io(err)
    }
}
