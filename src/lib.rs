//! Simtools collects the post-processing chores that surround a simulation
//! code: adding arXiv links to the citation list of the generated HTML
//! documentation, indexing HDF5 volume data with an XDMF file so ParaView
//! and VisIt can load it, and verifying analytic solutions of the Poisson
//! equation against the discretized operator.
//!
//! Reading HDF5 files requires the system HDF5 library and is enabled with
//! the `hdf5` feature. Everything else, including the XDMF generation logic
//! itself, works against the in-memory `volume::MemoryVolumeFile`.

pub mod docs;
pub mod logging;
pub mod verify;
pub mod volume;
pub mod xdmf;
