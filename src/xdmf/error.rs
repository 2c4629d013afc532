use std::error;
use std::fmt;
use std::io;
use std::path::PathBuf;
use crate::volume;

#[derive(Debug)]

/**
 * Error to represent a failure to index a set of volume files.
 */
pub enum Error {
    Io(PathBuf, io::Error),
    NoVolumeFiles(String),
    NoFiles,
    Pattern(globset::Error),
    MismatchedObservations { path: String, reference: String },
    MalformedExtents { path: String, observation: String, len: usize },
    InvalidStride,
    Volume(volume::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        use Error::*;

        match self {
            Io(path, e) => write!(fmt, "{}: {}", path.display(), e),
            NoVolumeFiles(prefix) => write!(fmt, "no volume files match '{}*.h5'", prefix),
            NoFiles => write!(fmt, "no volume files were given"),
            Pattern(e) => write!(fmt, "invalid file pattern: {}", e),
            MismatchedObservations { path, reference } => {
                write!(fmt, "{} does not hold the same observations as {}", path, reference)
            }
            MalformedExtents { path, observation, len } => write!(
                fmt,
                "{}: observation '{}' has {} extents, which is not a multiple of 3",
                path, observation, len
            ),
            InvalidStride => write!(fmt, "the stride must be at least 1"),
            Volume(e) => write!(fmt, "{}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(_, e) => Some(e),
            Error::Volume(e) => Some(e),
            Error::Pattern(e) => Some(e),
            _ => None,
        }
    }
}

impl From<volume::Error> for Error {
    fn from(e: volume::Error) -> Self {
        Error::Volume(e)
    }
}
