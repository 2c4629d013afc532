use log::{LevelFilter, SetLoggerError};
use simple_logger::SimpleLogger;




/**
 * Logger configuration, built once from the command line and handed to the
 * process at startup. Each repetition of `-v` lowers the threshold by one
 * level, starting from warnings.
 */
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogConfig {
    pub verbosity: u8,
}




// ============================================================================
impl LogConfig {

    pub fn new(verbosity: u8) -> Self {
        Self { verbosity }
    }

    pub fn level_filter(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /**
     * Install a `SimpleLogger` at this configuration's level. Fails if a
     * logger was already installed in this process.
     */
    pub fn init(&self) -> Result<(), SetLoggerError> {
        SimpleLogger::new().with_level(self.level_filter()).init()
    }
}
