use std::error;
use std::fmt;

#[derive(Debug)]

/**
 * Error to represent a missing or unreadable piece of a volume data file.
 */
pub enum Error {
    MissingObservation { path: String, observation: String },
    MissingDataset { path: String, observation: String, dataset: String },
    #[cfg(feature = "hdf5")]
    Hdf5 { path: String, source: hdf5::Error },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        use Error::*;

        match self {
            MissingObservation { path, observation } => {
                write!(fmt, "{}: no observation '{}'", path, observation)
            }
            MissingDataset { path, observation, dataset } => {
                write!(fmt, "{}: observation '{}' has no dataset '{}'", path, observation, dataset)
            }
            #[cfg(feature = "hdf5")]
            Hdf5 { path, source } => write!(fmt, "{}: {}", path, source),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            #[cfg(feature = "hdf5")]
            Error::Hdf5 { source, .. } => Some(source),
            _ => None,
        }
    }
}
