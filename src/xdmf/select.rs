use std::collections::BTreeSet;
use log::debug;
use crate::volume::{Observation, VolumeFile};
use super::error::Error;




/**
 * Which observations to index: those with `start_time <= t`, scanning in
 * time order until the first `t > stop_time`, keeping every `stride`-th one.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct XdmfOptions {
    pub start_time: f64,
    pub stop_time: f64,
    pub stride: usize,
}

impl Default for XdmfOptions {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            stop_time: 1e300,
            stride: 1,
        }
    }
}




/**
 * Return the observations of the first file, sorted by observation value.
 * Every other file must hold exactly the same set of observation names.
 */
pub fn observations<F: VolumeFile>(files: &[F]) -> Result<Vec<Observation>, Error> {
    let (reference, rest) = files
        .split_first()
        .ok_or(Error::NoFiles)?;

    let mut observations = reference.observations()?;
    observations.sort_by(|a, b| a.value.total_cmp(&b.value));

    let names: BTreeSet<&str> = observations.iter().map(|o| o.name.as_str()).collect();

    for file in rest {
        let other = file.observation_names()?;
        if other.len() != names.len() || other.iter().any(|name| !names.contains(name.as_str())) {
            return Err(Error::MismatchedObservations {
                path: file.path().to_string(),
                reference: reference.path().to_string(),
            });
        }
    }
    Ok(observations)
}




/**
 * Apply the time window and stride to observations given in time order.
 *
 * The stride counts only observations that passed the start-time filter,
 * and the first observation past `stop_time` ends the scan outright rather
 * than being filtered out.
 */
pub fn select_observations(observations: &[Observation], options: &XdmfOptions) -> Result<Vec<Observation>, Error> {
    if options.stride == 0 {
        return Err(Error::InvalidStride);
    }
    let mut selected = Vec::new();
    let mut stride_counter = 0;

    for observation in observations {
        if observation.value < options.start_time {
            continue;
        }
        if observation.value > options.stop_time {
            debug!("Stopping at {} (t = {})", observation.name, observation.value);
            break;
        }
        stride_counter += 1;

        if (stride_counter - 1) % options.stride != 0 {
            continue;
        }
        selected.push(observation.clone());
    }
    Ok(selected)
}
