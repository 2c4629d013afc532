use std::error;
use std::fmt;
use crate::volume;

#[derive(Debug)]

/**
 * Error to represent an invalid domain or a failure to dump the results of a
 * verification.
 */
pub enum Error {
    InvalidDomain(String),
    Volume(volume::Error),
    #[cfg(not(feature = "hdf5"))]
    DumpUnavailable(std::path::PathBuf),
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        use Error::*;

        match self {
            InvalidDomain(msg) => write!(fmt, "invalid domain: {}", msg),
            Volume(e) => write!(fmt, "{}", e),
            #[cfg(not(feature = "hdf5"))]
            DumpUnavailable(path) => write!(
                fmt,
                "{}: writing volume data requires the hdf5 feature",
                path.display()
            ),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Volume(e) => Some(e),
            _ => None,
        }
    }
}

impl From<volume::Error> for Error {
    fn from(e: volume::Error) -> Self {
        Error::Volume(e)
    }
}
