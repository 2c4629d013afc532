use std::path::Path;
use hdf5::types::H5Type;
use hdf5::{Dataset, File, Group};
use log::debug;
use super::memory::ObservationData;
use super::{join_grid_names, Error, VolumeFile, CONNECTIVITY, GRID_NAMES, OBSERVATION_VALUE, TOTAL_EXTENTS, VOLUME_GROUP};




/**
 * A volume data file on disk, opened through the HDF5 library. The file is
 * closed when this value is dropped, on every exit path.
 */
pub struct H5VolumeFile {
    path: String,
    volume: Group,
    _file: File,
}




// ============================================================================
impl H5VolumeFile {

    /**
     * Open an existing volume file read-only.
     */
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_string_lossy().into_owned();
        let file = File::open(&path).map_err(|source| Error::Hdf5 { path: path.clone(), source })?;
        let volume = file.group(VOLUME_GROUP).map_err(|source| Error::Hdf5 { path: path.clone(), source })?;
        debug!("Opened volume file {}", path);
        Ok(Self { path, volume, _file: file })
    }

    /**
     * Create a new, empty volume file, truncating any existing file.
     */
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_string_lossy().into_owned();
        let file = File::create(&path).map_err(|source| Error::Hdf5 { path: path.clone(), source })?;
        let volume = file.create_group(VOLUME_GROUP).map_err(|source| Error::Hdf5 { path: path.clone(), source })?;
        Ok(Self { path, volume, _file: file })
    }

    /**
     * Write one observation in the layout the simulation uses: the
     * observation value as an attribute of the observation group, and one
     * contiguous dataset per tensor component plus the mesh bookkeeping.
     */
    pub fn write_observation(&self, name: &str, data: &ObservationData) -> Result<(), Error> {
        let group = self.h5(self.volume.create_group(name))?;
        let attr = self.h5(group.new_attr::<f64>().create(OBSERVATION_VALUE))?;
        self.h5(attr.write_scalar(&data.value))?;

        for (component, values) in &data.components {
            self.write_dataset(&group, component, values)?;
        }
        self.write_dataset(&group, TOTAL_EXTENTS, &data.extents)?;
        self.write_dataset(&group, CONNECTIVITY, &data.connectivity)?;
        self.write_dataset(&group, GRID_NAMES, join_grid_names(&data.grid_names).as_bytes())?;
        Ok(())
    }

    fn write_dataset<T: H5Type>(&self, group: &Group, name: &str, values: &[T]) -> Result<(), Error> {
        let dataset = self.h5(group.new_dataset::<T>().shape(values.len()).create(name))?;
        self.h5(dataset.write_raw(values))
    }

    fn observation_group(&self, observation: &str) -> Result<Group, Error> {
        if !self.volume.link_exists(observation) {
            return Err(Error::MissingObservation {
                path: self.path.clone(),
                observation: observation.to_string(),
            });
        }
        self.h5(self.volume.group(observation))
    }

    fn dataset(&self, observation: &str, name: &str) -> Result<Dataset, Error> {
        let group = self.observation_group(observation)?;

        if !group.link_exists(name) {
            return Err(Error::MissingDataset {
                path: self.path.clone(),
                observation: observation.to_string(),
                dataset: name.to_string(),
            });
        }
        self.h5(group.dataset(name))
    }

    fn h5<T>(&self, result: hdf5::Result<T>) -> Result<T, Error> {
        result.map_err(|source| Error::Hdf5 { path: self.path.clone(), source })
    }
}




// ============================================================================
impl VolumeFile for H5VolumeFile {

    fn path(&self) -> &str {
        &self.path
    }

    fn observation_names(&self) -> Result<Vec<String>, Error> {
        self.h5(self.volume.member_names())
    }

    fn observation_value(&self, observation: &str) -> Result<f64, Error> {
        let group = self.observation_group(observation)?;
        let attr = self.h5(group.attr(OBSERVATION_VALUE))?;
        self.h5(attr.read_scalar::<f64>())
    }

    fn dataset_names(&self, observation: &str) -> Result<Vec<String>, Error> {
        let group = self.observation_group(observation)?;
        let mut names = self.h5(group.member_names())?;
        names.sort();
        Ok(names)
    }

    fn extents(&self, observation: &str) -> Result<Vec<u64>, Error> {
        let dataset = self.dataset(observation, TOTAL_EXTENTS)?;
        self.h5(dataset.read_raw::<u64>())
    }

    fn grid_names_raw(&self, observation: &str) -> Result<String, Error> {
        let dataset = self.dataset(observation, GRID_NAMES)?;
        let bytes = self.h5(dataset.read_raw::<u8>())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn tensor_component(&self, observation: &str, component: &str) -> Result<Vec<f64>, Error> {
        let dataset = self.dataset(observation, component)?;
        self.h5(dataset.read_raw::<f64>())
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::H5VolumeFile;
    use crate::volume::memory::ObservationData;
    use crate::volume::{Error, VolumeFile};

    fn element(value: f64) -> ObservationData {
        ObservationData::new(value).with_element("[B0,(L0I0,L0I0,L0I0)]", [2, 2, 2], &[
            ("InertialCoordinates_x", vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0]),
            ("InertialCoordinates_y", vec![0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0]),
            ("InertialCoordinates_z", vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]),
            ("Psi", vec![value; 8]),
        ])
    }

    #[test]
    fn written_observations_can_be_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Volume0.h5");
        {
            let file = H5VolumeFile::create(&path).unwrap();
            file.write_observation("ObservationId7", &element(0.25)).unwrap();
            file.write_observation("ObservationId3", &element(0.5)).unwrap();
        }
        let file = H5VolumeFile::open(&path).unwrap();
        assert_eq!(file.observation_names().unwrap(), vec!["ObservationId3", "ObservationId7"]);
        assert_eq!(file.observation_value("ObservationId7").unwrap(), 0.25);
        assert_eq!(file.extents("ObservationId3").unwrap(), vec![2, 2, 2]);
        assert_eq!(file.grid_names("ObservationId3").unwrap(), vec!["[B0,(L0I0,L0I0,L0I0)]"]);
        assert_eq!(file.tensor_components("ObservationId3").unwrap(), vec!["Psi"]);
        assert_eq!(file.tensor_component("ObservationId3", "Psi").unwrap(), vec![0.5; 8]);
        assert!(matches!(file.extents("ObservationId1"), Err(Error::MissingObservation { .. })));
    }
}
