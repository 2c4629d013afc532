use std::error::Error;
use std::path::PathBuf;
use clap::Parser;
use log::info;
use simtools::docs;
use simtools::logging::LogConfig;




/// Post-process the generated documentation: append arXiv links to the
/// entries of the citation list.
#[derive(Debug, Parser)]
#[clap(version)]
struct Opts {
    /// Directory holding the generated HTML pages
    #[clap(long)]
    html_dir: PathBuf,

    /// BibTeX file the citations were generated from
    #[clap(long)]
    references_file: PathBuf,

    /// Log more (repeat for even more)
    #[clap(short, long, parse(from_occurrences))]
    verbose: u8,
}




fn main() -> Result<(), Box<dyn Error>> {
    let opts = Opts::parse();
    LogConfig::new(opts.verbose).init()?;

    info!("Adding eprint links to {}", opts.html_dir.join(docs::citelist::CITELIST_FILE).display());
    let count = docs::append_eprint_links_to_citelist(&opts.html_dir, &opts.references_file)?;
    info!("Appended {} eprint links", count);
    Ok(())
}
