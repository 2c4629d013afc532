use std::error;
use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]

/**
 * Error to represent a failure while post-processing the generated
 * documentation.
 */
pub enum Error {
    Io(PathBuf, io::Error),
    Bibliography(String),
    MissingReference(String),
    MissingCitationText(String),
    Rewrite(String),
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        use Error::*;

        match self {
            Io(path, e) => write!(fmt, "{}: {}", path.display(), e),
            Bibliography(msg) => write!(fmt, "could not parse bibliography: {}", msg),
            MissingReference(key) => write!(fmt, "no bibliography entry for citation key '{}'", key),
            MissingCitationText(key) => write!(fmt, "no paragraph follows the citation anchor for '{}'", key),
            Rewrite(msg) => write!(fmt, "could not rewrite the citation list: {}", msg),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(_, e) => Some(e),
            _ => None,
        }
    }
}
