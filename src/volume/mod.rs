//! Read access to volume data files: the per-observation element data that
//! the simulation writes, one file per node. Each file holds a group
//! `element_data.vol` with one sub-group per observation. An observation
//! group carries an `observation_value` attribute (usually the simulation
//! time) and, for every element written at that observation, contributes
//! points to a set of contiguous datasets: the inertial coordinates, the
//! connectivity, one dataset per tensor component, and the `total_extents`
//! and `grid_names` bookkeeping needed to split them back up by element.
//!
//! The `VolumeFile` trait is implemented by an in-memory store and, with the
//! `hdf5` feature enabled, by an HDF5 reader.

mod error;
pub mod memory;
#[cfg(feature = "hdf5")]
pub mod h5;

pub use error::Error;




/// Name of the group holding all observations.
pub const VOLUME_GROUP: &str = "element_data.vol";

/// Name of the attribute holding an observation's value.
pub const OBSERVATION_VALUE: &str = "observation_value";

/// Character terminating each element name in the `grid_names` dataset.
pub const GRID_NAME_SEPARATOR: char = ':';

pub const COORDINATES: [&str; 3] = [
    "InertialCoordinates_x",
    "InertialCoordinates_y",
    "InertialCoordinates_z",
];
pub const CONNECTIVITY: &str = "connectivity";
pub const TOTAL_EXTENTS: &str = "total_extents";
pub const GRID_NAMES: &str = "grid_names";




/**
 * Determine whether a dataset is part of the mesh bookkeeping rather than a
 * tensor component.
 */
pub fn is_bookkeeping(dataset: &str) -> bool {
    COORDINATES.contains(&dataset) || dataset == CONNECTIVITY || dataset == TOTAL_EXTENTS || dataset == GRID_NAMES
}




/**
 * An observation: a named snapshot inside a volume file together with its
 * observation value.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    pub name: String,
    pub value: f64,
}




/// Interface to a volume data file. Observation and dataset names are the
/// names of the HDF5 groups and datasets, so they can be used to build
/// references into the file.
///
pub trait VolumeFile {
    /// Must be implemented to return the path of the file, spelled the way
    /// it should appear in references to its datasets.
    fn path(&self) -> &str;

    /// Must be implemented to list the observation groups, in storage order.
    fn observation_names(&self) -> Result<Vec<String>, Error>;

    /// Must be implemented to return the value recorded with an observation.
    fn observation_value(&self, observation: &str) -> Result<f64, Error>;

    /// Must be implemented to list every dataset of an observation, sorted
    /// by name.
    fn dataset_names(&self, observation: &str) -> Result<Vec<String>, Error>;

    /// Must be implemented to return the extents of every element in the
    /// observation, flattened: entry `i` belongs to axis `i % dim`.
    fn extents(&self, observation: &str) -> Result<Vec<u64>, Error>;

    /// Must be implemented to return the raw `grid_names` characters.
    fn grid_names_raw(&self, observation: &str) -> Result<String, Error>;

    /// Must be implemented to read one dataset of an observation, holding
    /// the data of all elements back to back.
    fn tensor_component(&self, observation: &str, component: &str) -> Result<Vec<f64>, Error>;

    /// List the observations of this file with their values, in storage
    /// order.
    ///
    fn observations(&self) -> Result<Vec<Observation>, Error> {
        self.observation_names()?
            .into_iter()
            .map(|name| {
                let value = self.observation_value(&name)?;
                Ok(Observation { name, value })
            })
            .collect()
    }

    /// List the tensor components of an observation, i.e. all datasets
    /// except the coordinates and the mesh bookkeeping.
    ///
    fn tensor_components(&self, observation: &str) -> Result<Vec<String>, Error> {
        Ok(self
            .dataset_names(observation)?
            .into_iter()
            .filter(|name| !is_bookkeeping(name))
            .collect())
    }

    /// List the names of the elements written at an observation, in the
    /// order their data appears in each dataset.
    ///
    fn grid_names(&self, observation: &str) -> Result<Vec<String>, Error> {
        Ok(split_grid_names(&self.grid_names_raw(observation)?))
    }
}




/**
 * Split the `grid_names` dataset into element names. Every name is followed
 * by the separator, so the piece after the last one is dropped.
 */
pub fn split_grid_names(raw: &str) -> Vec<String> {
    let mut names: Vec<String> = raw.split(GRID_NAME_SEPARATOR).map(String::from).collect();
    names.pop();
    names
}




/**
 * Return the hexahedral connectivity of a tensor-product element with the
 * given extents, whose first point has global index `offset`. Each cell
 * contributes eight point indices, bottom face then top face, both counter
 * clockwise. Points are numbered with the x index varying fastest.
 */
pub fn hexahedral_connectivity(extents: [u64; 3], offset: u64) -> Vec<i32> {
    let [nx, ny, nz] = extents;
    let point = |i: u64, j: u64, k: u64| (offset + i + nx * (j + ny * k)) as i32;
    let mut connectivity = Vec::new();

    for k in 0..nz.saturating_sub(1) {
        for j in 0..ny.saturating_sub(1) {
            for i in 0..nx.saturating_sub(1) {
                connectivity.extend_from_slice(&[
                    point(i, j, k),
                    point(i + 1, j, k),
                    point(i + 1, j + 1, k),
                    point(i, j + 1, k),
                    point(i, j, k + 1),
                    point(i + 1, j, k + 1),
                    point(i + 1, j + 1, k + 1),
                    point(i, j + 1, k + 1),
                ]);
            }
        }
    }
    connectivity
}




/**
 * Join element names into the `grid_names` dataset layout.
 */
pub fn join_grid_names<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|name| format!("{}{}", name.as_ref(), GRID_NAME_SEPARATOR))
        .collect()
}
