use std::collections::BTreeMap;
use super::{hexahedral_connectivity, join_grid_names, Error, VolumeFile, CONNECTIVITY, GRID_NAMES, TOTAL_EXTENTS};




/**
 * The data written at one observation: the observation value and, for every
 * element, its extents, name, connectivity and tensor components, all
 * concatenated in the order the elements were added.
 */
#[derive(Clone, Debug, Default)]
pub struct ObservationData {
    pub value: f64,
    pub extents: Vec<u64>,
    pub grid_names: Vec<String>,
    pub connectivity: Vec<i32>,
    pub components: BTreeMap<String, Vec<f64>>,
}




// ============================================================================
impl ObservationData {

    pub fn new(value: f64) -> Self {
        Self { value, ..Self::default() }
    }

    /**
     * Append one element. Every component slice must hold one value per
     * point of the element; the coordinates are passed as the components
     * `InertialCoordinates_x/y/z`.
     */
    pub fn with_element(mut self, name: &str, extents: [u64; 3], components: &[(&str, Vec<f64>)]) -> Self {
        let offset = self.number_of_points();
        self.extents.extend_from_slice(&extents);
        self.grid_names.push(name.to_string());
        self.connectivity.extend(hexahedral_connectivity(extents, offset));

        for (component, data) in components {
            self.components
                .entry(component.to_string())
                .or_default()
                .extend_from_slice(data);
        }
        self
    }

    pub fn number_of_points(&self) -> u64 {
        self.extents.chunks(3).map(|e| e.iter().product::<u64>()).sum()
    }
}




/**
 * A volume file held in memory. Observations are kept sorted by name, the
 * way HDF5 lists group members.
 */
#[derive(Clone, Debug)]
pub struct MemoryVolumeFile {
    path: String,
    observations: BTreeMap<String, ObservationData>,
}




// ============================================================================
impl MemoryVolumeFile {

    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            observations: BTreeMap::new(),
        }
    }

    pub fn insert_observation(&mut self, name: &str, data: ObservationData) {
        self.observations.insert(name.to_string(), data);
    }

    pub fn with_observation(mut self, name: &str, data: ObservationData) -> Self {
        self.insert_observation(name, data);
        self
    }

    pub fn observation(&self, observation: &str) -> Result<&ObservationData, Error> {
        self.observations
            .get(observation)
            .ok_or_else(|| Error::MissingObservation {
                path: self.path.clone(),
                observation: observation.to_string(),
            })
    }
}




// ============================================================================
impl VolumeFile for MemoryVolumeFile {

    fn path(&self) -> &str {
        &self.path
    }

    fn observation_names(&self) -> Result<Vec<String>, Error> {
        Ok(self.observations.keys().cloned().collect())
    }

    fn observation_value(&self, observation: &str) -> Result<f64, Error> {
        Ok(self.observation(observation)?.value)
    }

    fn dataset_names(&self, observation: &str) -> Result<Vec<String>, Error> {
        let data = self.observation(observation)?;
        let mut names: Vec<String> = data.components.keys().cloned().collect();
        names.extend([CONNECTIVITY, GRID_NAMES, TOTAL_EXTENTS].iter().map(|s| s.to_string()));
        names.sort();
        Ok(names)
    }

    fn extents(&self, observation: &str) -> Result<Vec<u64>, Error> {
        Ok(self.observation(observation)?.extents.clone())
    }

    fn grid_names_raw(&self, observation: &str) -> Result<String, Error> {
        Ok(join_grid_names(&self.observation(observation)?.grid_names))
    }

    fn tensor_component(&self, observation: &str, component: &str) -> Result<Vec<f64>, Error> {
        self.observation(observation)?
            .components
            .get(component)
            .cloned()
            .ok_or_else(|| Error::MissingDataset {
                path: self.path.clone(),
                observation: observation.to_string(),
                dataset: component.to_string(),
            })
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::{MemoryVolumeFile, ObservationData};
    use crate::volume::{Error, VolumeFile};

    fn cube(value: f64) -> ObservationData {
        let x = vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0];
        let y = vec![0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0];
        let z = vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
        ObservationData::new(value)
            .with_element("[B0,(L0I0,L0I0,L0I0)]", [2, 2, 2], &[
                ("InertialCoordinates_x", x.clone()),
                ("InertialCoordinates_y", y.clone()),
                ("InertialCoordinates_z", z.clone()),
                ("Psi", vec![1.0; 8]),
            ])
            .with_element("[B1,(L0I0,L0I0,L0I0)]", [2, 2, 2], &[
                ("InertialCoordinates_x", x.iter().map(|x| x + 1.0).collect()),
                ("InertialCoordinates_y", y),
                ("InertialCoordinates_z", z),
                ("Psi", vec![2.0; 8]),
            ])
    }

    #[test]
    fn elements_are_concatenated_in_order() {
        let data = cube(0.5);
        assert_eq!(data.extents, vec![2, 2, 2, 2, 2, 2]);
        assert_eq!(data.number_of_points(), 16);
        assert_eq!(data.connectivity.len(), 16);
        assert_eq!(&data.connectivity[8..], &[8, 9, 11, 10, 12, 13, 15, 14]);
    }

    #[test]
    fn observations_are_listed_with_their_values() {
        let file = MemoryVolumeFile::new("Volume0.h5")
            .with_observation("ObservationId2", cube(0.2))
            .with_observation("ObservationId1", cube(0.1));
        let observations = file.observations().unwrap();
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].name, "ObservationId1");
        assert_eq!(observations[0].value, 0.1);
        assert_eq!(observations[1].value, 0.2);
    }

    #[test]
    fn datasets_split_into_bookkeeping_and_components() {
        let file = MemoryVolumeFile::new("Volume0.h5").with_observation("ObservationId1", cube(0.1));
        assert_eq!(file.dataset_names("ObservationId1").unwrap().len(), 7);
        assert_eq!(file.tensor_components("ObservationId1").unwrap(), vec!["Psi"]);
        assert_eq!(
            file.grid_names("ObservationId1").unwrap(),
            vec!["[B0,(L0I0,L0I0,L0I0)]", "[B1,(L0I0,L0I0,L0I0)]"]
        );
        let psi = file.tensor_component("ObservationId1", "Psi").unwrap();
        assert_eq!(psi.len(), 16);
        assert_eq!(psi[15], 2.0);
    }

    #[test]
    fn missing_names_are_reported() {
        let file = MemoryVolumeFile::new("Volume0.h5").with_observation("ObservationId1", cube(0.1));
        assert!(matches!(file.extents("ObservationId9"), Err(Error::MissingObservation { .. })));
        assert!(matches!(
            file.tensor_component("ObservationId1", "Pi"),
            Err(Error::MissingDataset { dataset, .. }) if dataset == "Pi"
        ));
    }
}
