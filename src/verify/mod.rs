//! Verification of analytic solutions against the discretized Poisson
//! operator. The operator is applied to the analytic solution sampled on the
//! collocation points of every element, and the source is subtracted; the
//! norm of what is left over is reported per element. A residual that does
//! not converge away under refinement points at a bug in either the solution
//! or the operator.

pub mod domain;
mod error;
pub mod solution;
pub mod spectral;

use std::collections::HashMap;
use std::path::Path;
use log::{debug, info};
use crate::volume::memory::ObservationData;

pub use domain::{Element, ElementId, Interval, SegmentId};
pub use error::Error;
pub use solution::{AnalyticSolution, ProductOfSinusoids1D};
use spectral::{lobatto_points, DifferentiationMatrix};




/// Observation the volume data of a verification is written under.
pub const DUMP_OBSERVATION: &str = "ObservationId0";




/**
 * The outcome of applying the operator on a domain: the residual norm of
 * every element, and the volume data (coordinates, analytic fields, source
 * and residuals) of all elements as one observation.
 */
#[derive(Clone, Debug)]
pub struct Verification {
    pub residuals: HashMap<ElementId, f64>,
    pub volume_data: ObservationData,
}




/**
 * Apply the first-order Poisson operator to `solution` on every element of
 * `domain` and return the L2 norm of the field residual `-v' - f` per
 * element, where `v` is the analytic gradient. If `dump_to_file` is given,
 * the volume data is written there as an HDF5 volume file that
 * `xdmf::generate_xdmf` can index.
 */
pub fn verify_solution<S: AnalyticSolution>(
    solution: &S,
    domain: &Interval,
    dump_to_file: Option<&Path>,
) -> Result<HashMap<ElementId, f64>, Error> {
    let verification = apply_operator(solution, domain);

    if let Some(path) = dump_to_file {
        dump_volume_data(path, &verification.volume_data)?;
        info!("Wrote volume data for {} elements to {}", verification.residuals.len(), path.display());
    }
    Ok(verification.residuals)
}




/**
 * Apply the operator element by element. Boundary terms are left out since
 * the analytic solution is continuous across element boundaries, which also
 * makes the result independent of the domain's periodicity.
 */
pub fn apply_operator<S: AnalyticSolution>(solution: &S, domain: &Interval) -> Verification {
    let elements = domain.create_elements();
    let mut residuals = HashMap::new();
    let mut volume_data = ObservationData::new(0.0);

    info!(
        "Applying the operator on {} elements ({})",
        elements.len(),
        if domain.is_periodic() { "periodic" } else { "non-periodic" }
    );

    for element in elements {
        let points = lobatto_points(element.number_of_grid_points);
        let derivative = DifferentiationMatrix::new(&points);
        let x = element.inertial_coordinates(&points);
        let inverse_jacobian = 1.0 / element.jacobian();
        let field: Vec<f64> = x.iter().map(|&x| solution.field(x)).collect();
        let gradient: Vec<f64> = x.iter().map(|&x| solution.field_gradient(x)).collect();
        let source: Vec<f64> = x.iter().map(|&x| solution.source(x)).collect();

        let field_residual: Vec<f64> = derivative
            .apply(&gradient)
            .iter()
            .zip(&source)
            .map(|(dv, f)| -dv * inverse_jacobian - f)
            .collect();
        let auxiliary_residual: Vec<f64> = derivative
            .apply(&field)
            .iter()
            .zip(&gradient)
            .map(|(du, v)| v - du * inverse_jacobian)
            .collect();

        let norm = l2_norm(&field_residual);
        debug!("{}: residual {:e}", element.id, norm);
        residuals.insert(element.id, norm);

        let zeros = vec![0.0; x.len()];
        volume_data = volume_data.with_element(
            &element.id.to_string(),
            [x.len() as u64, 1, 1],
            &[
                ("InertialCoordinates_x", x),
                ("InertialCoordinates_y", zeros.clone()),
                ("InertialCoordinates_z", zeros),
                ("Field", field),
                ("AuxiliaryField", gradient),
                ("FixedSource", source),
                ("FieldResidual", field_residual),
                ("AuxiliaryResidual", auxiliary_residual),
            ],
        );
    }
    Verification { residuals, volume_data }
}




#[cfg(feature = "hdf5")]
fn dump_volume_data(path: &Path, volume_data: &ObservationData) -> Result<(), Error> {
    use crate::volume::h5::H5VolumeFile;

    let file = H5VolumeFile::create(path)?;
    file.write_observation(DUMP_OBSERVATION, volume_data)?;
    Ok(())
}

#[cfg(not(feature = "hdf5"))]
fn dump_volume_data(path: &Path, _volume_data: &ObservationData) -> Result<(), Error> {
    Err(Error::DumpUnavailable(path.to_path_buf()))
}

/**
 * Root mean square of the values.
 */
pub fn l2_norm(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    (values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64).sqrt()
}
