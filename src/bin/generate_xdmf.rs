use std::error::Error;
use clap::Parser;
use log::info;
use simtools::logging::LogConfig;
use simtools::xdmf::{self, XdmfOptions};




/// Generate an XDMF file that indexes the volume data of a simulation, for
/// visualization in ParaView or VisIt.
#[derive(Debug, Parser)]
#[clap(version)]
struct Opts {
    /// Prefix of the volume data files, e.g. 'Run/VolumeData'
    #[clap(long)]
    file_prefix: String,

    /// Output file name, the '.xmf' extension is appended
    #[clap(long)]
    output: String,

    /// Index only every n-th observation
    #[clap(long, default_value = "1")]
    stride: usize,

    /// Skip observations before this time
    #[clap(long, default_value = "0.0")]
    start_time: f64,

    /// Stop at the first observation after this time
    #[clap(long, default_value = "1e300")]
    stop_time: f64,

    /// Log more (repeat for even more)
    #[clap(short, long, parse(from_occurrences))]
    verbose: u8,
}




fn main() -> Result<(), Box<dyn Error>> {
    let opts = Opts::parse();
    LogConfig::new(opts.verbose).init()?;

    let options = XdmfOptions {
        start_time: opts.start_time,
        stop_time: opts.stop_time,
        stride: opts.stride,
    };
    let path = xdmf::generate_xdmf(&opts.file_prefix, &opts.output, &options)?;
    info!("Wrote {}", path.display());
    Ok(())
}
