//! Generation of XDMF files, which let ParaView and VisIt load volume data
//! straight out of a set of HDF5 files. The XDMF document only describes the
//! mesh and field layout and points at the datasets inside the volume files.
//!
//! To load the result in ParaView choose the "Xdmf Reader", not the "Xdmf3
//! Reader".

mod discover;
mod error;
pub mod render;
pub mod select;

use std::fs;
use std::path::PathBuf;
use log::info;
use crate::volume::VolumeFile;

pub use discover::discover_volume_files;
pub use error::Error;
pub use render::render;
pub use select::{observations, select_observations, XdmfOptions};




/// Extension appended to the output name.
pub const XDMF_EXTENSION: &str = "xmf";




/**
 * Build the XDMF document indexing the given volume files. The first file
 * defines the observations; the others must hold the same ones.
 */
pub fn generate_xdmf_from_files<F: VolumeFile>(files: &[F], options: &XdmfOptions) -> Result<String, Error> {
    let observations = observations(files)?;
    let selected = select_observations(&observations, options)?;
    info!(
        "Indexing {} of {} observations across {} files",
        selected.len(),
        observations.len(),
        files.len()
    );
    render(files, &selected)
}




/**
 * Write an XDMF document to `output_filename` with the `.xmf` extension
 * appended, returning the path written.
 */
pub fn write_xdmf(output_filename: &str, document: &str) -> Result<PathBuf, Error> {
    let path = PathBuf::from(format!("{}.{}", output_filename, XDMF_EXTENSION));
    fs::write(&path, document).map_err(|e| Error::Io(path.clone(), e))?;
    info!("Wrote {}", path.display());
    Ok(path)
}




/**
 * Index all HDF5 volume files whose names start with `file_prefix` into one
 * XDMF file. The input files stay open only for the duration of this call,
 * and are closed on every exit path.
 */
#[cfg(feature = "hdf5")]
pub fn generate_xdmf(file_prefix: &str, output_filename: &str, options: &XdmfOptions) -> Result<PathBuf, Error> {
    use crate::volume::h5::H5VolumeFile;

    let paths = discover_volume_files(file_prefix)?;
    info!("Found {} volume files matching {}*.h5", paths.len(), file_prefix);

    let files = paths
        .iter()
        .map(H5VolumeFile::open)
        .collect::<Result<Vec<_>, _>>()?;
    let document = generate_xdmf_from_files(&files, options)?;
    write_xdmf(output_filename, &document)
}




// ============================================================================
#[cfg(test)]
mod test {

    use std::fs;
    use super::{generate_xdmf_from_files, write_xdmf, XdmfOptions};
    use crate::volume::memory::{MemoryVolumeFile, ObservationData};

    fn cell(value: f64) -> ObservationData {
        ObservationData::new(value).with_element("[B0,(L0I0,L0I0,L0I0)]", [2, 2, 2], &[
            ("InertialCoordinates_x", vec![0.0; 8]),
            ("InertialCoordinates_y", vec![0.0; 8]),
            ("InertialCoordinates_z", vec![0.0; 8]),
            ("pressure", vec![value; 8]),
            ("velocity_x", vec![value; 8]),
            ("velocity_y", vec![value; 8]),
            ("velocity_z", vec![value; 8]),
        ])
    }

    fn run(values: &[(&str, f64)]) -> Vec<MemoryVolumeFile> {
        ["Volume0.h5", "Volume1.h5"]
            .iter()
            .map(|path| {
                values.iter().fold(MemoryVolumeFile::new(path), |file, &(name, value)| {
                    file.with_observation(name, cell(value))
                })
            })
            .collect()
    }

    fn time_values(xml: &str) -> Vec<String> {
        xml.lines()
            .filter_map(|line| line.trim().strip_prefix("<Time Value=\""))
            .map(|rest| rest.trim_end_matches("\"/>").to_string())
            .collect()
    }

    #[test]
    fn every_observation_appears_once_in_time_order() {
        let files = run(&[("ObservationId9", 0.0), ("ObservationId3", 2.0), ("ObservationId5", 1.0)]);
        let xml = generate_xdmf_from_files(&files, &XdmfOptions::default()).unwrap();
        assert_eq!(time_values(&xml), vec![
            "0.00000000000000e+00",
            "1.00000000000000e+00",
            "2.00000000000000e+00",
        ]);
        assert_eq!(xml.matches("GridType=\"Uniform\"").count(), 6);
        assert_eq!(xml.matches("<Attribute Name=\"velocity\" AttributeType=\"Vector\"").count(), 6);
        assert_eq!(xml.matches("<Attribute Name=\"pressure\" AttributeType=\"Scalar\"").count(), 6);
        assert!(!xml.contains("Name=\"velocity_x\""));
        assert!(xml.contains("          Volume1.h5:/element_data.vol/ObservationId3/velocity_z\n"));
    }

    #[test]
    fn stride_two_keeps_every_other_snapshot() {
        let files = run(&[("A", 0.0), ("B", 0.1), ("C", 0.2), ("D", 0.3), ("E", 0.4)]);
        let options = XdmfOptions { stride: 2, ..XdmfOptions::default() };
        let xml = generate_xdmf_from_files(&files, &options).unwrap();
        assert_eq!(time_values(&xml), vec![
            "0.00000000000000e+00",
            "2.00000000000000e-01",
            "4.00000000000000e-01",
        ]);
    }

    #[test]
    fn output_gets_the_xmf_extension() {
        let dir = tempfile::tempdir().unwrap();
        let output = format!("{}/Evolution", dir.path().display());
        let path = write_xdmf(&output, "<Xdmf/>").unwrap();
        assert_eq!(path.to_string_lossy(), format!("{}.xmf", output));
        assert_eq!(fs::read_to_string(path).unwrap(), "<Xdmf/>");
    }

    #[cfg(feature = "hdf5")]
    #[test]
    fn hdf5_volume_files_are_indexed() {
        use crate::volume::h5::H5VolumeFile;

        let dir = tempfile::tempdir().unwrap();
        for n in 0..2 {
            let file = H5VolumeFile::create(dir.path().join(format!("Volume{}.h5", n))).unwrap();
            file.write_observation("ObservationId2", &cell(0.2)).unwrap();
            file.write_observation("ObservationId1", &cell(0.1)).unwrap();
        }
        let prefix = format!("{}/Volume", dir.path().display());
        let output = format!("{}/Evolution", dir.path().display());
        let path = super::generate_xdmf(&prefix, &output, &XdmfOptions::default()).unwrap();

        let xml = fs::read_to_string(path).unwrap();
        assert_eq!(time_values(&xml), vec!["1.00000000000000e-01", "2.00000000000000e-01"]);
        assert!(xml.contains(&format!("<Grid Name=\"{}0.h5\" GridType=\"Uniform\">", prefix)));
        assert!(xml.contains(&format!("<Grid Name=\"{}1.h5\" GridType=\"Uniform\">", prefix)));
    }
}
