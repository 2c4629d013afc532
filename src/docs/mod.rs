//! Post-processing of the HTML documentation generated by Doxygen. Currently
//! this only adds eprint links to the bibliography page.

pub mod bibliography;
pub mod citelist;
mod error;

pub use citelist::append_eprint_links_to_citelist;
pub use error::Error;
