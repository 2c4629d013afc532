use std::fmt;
use super::error::Error;




/**
 * A segment of the logical interval [-1, 1], obtained by bisecting it
 * `refinement_level` times and taking the piece at `index`.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId {
    pub refinement_level: u32,
    pub index: u64,
}




// ============================================================================
impl SegmentId {

    /**
     * Return the segment at `index` of the given refinement level. Fails if
     * the level does not have that many segments.
     */
    pub fn new(refinement_level: u32, index: u64) -> Result<Self, Error> {
        if refinement_level >= 64 || index >= 1 << refinement_level {
            return Err(Error::InvalidDomain(format!(
                "no segment {} on refinement level {}",
                index, refinement_level
            )));
        }
        Ok(Self { refinement_level, index })
    }

    /**
     * Return the logical coordinates of the segment's endpoints.
     */
    pub fn endpoints(&self) -> (f64, f64) {
        let count = (1u64 << self.refinement_level) as f64;
        let lower = -1.0 + 2.0 * self.index as f64 / count;
        let upper = -1.0 + 2.0 * (self.index + 1) as f64 / count;
        (lower, upper)
    }
}




/**
 * Identifies an element of a one-dimensional domain: the block it belongs to
 * and its segment of that block.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId {
    pub block_id: usize,
    pub segment: SegmentId,
}

impl ElementId {
    pub fn new(block_id: usize, segment: SegmentId) -> Self {
        Self { block_id, segment }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(fmt, "[B{},(L{}I{})]", self.block_id, self.segment.refinement_level, self.segment.index)
    }
}




/**
 * An element of the domain: its id, the inertial interval it covers, and the
 * number of collocation points on it.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub lower: f64,
    pub upper: f64,
    pub number_of_grid_points: usize,
}




// ============================================================================
impl Element {

    /**
     * Return dx/dxi of the affine map from logical to inertial coordinates.
     */
    pub fn jacobian(&self) -> f64 {
        0.5 * (self.upper - self.lower)
    }

    /**
     * Map logical coordinates in [-1, 1] to inertial coordinates.
     */
    pub fn inertial_coordinates(&self, logical: &[f64]) -> Vec<f64> {
        logical
            .iter()
            .map(|xi| self.lower + (xi + 1.0) * self.jacobian())
            .collect()
    }
}




/**
 * A one-dimensional domain consisting of a single block covering
 * `[lower_x, upper_x]`, uniformly refined.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct Interval {
    lower_x: f64,
    upper_x: f64,
    is_periodic_in_x: bool,
    initial_refinement_level_x: u32,
    initial_number_of_grid_points_in_x: usize,
}




// ============================================================================
impl Interval {

    pub fn new(
        lower_x: f64,
        upper_x: f64,
        is_periodic_in_x: bool,
        initial_refinement_level_x: u32,
        initial_number_of_grid_points_in_x: usize,
    ) -> Result<Self, Error> {
        if !(lower_x < upper_x) {
            return Err(Error::InvalidDomain(format!(
                "lower bound {} is not below upper bound {}",
                lower_x, upper_x
            )));
        }
        if initial_number_of_grid_points_in_x < 2 {
            return Err(Error::InvalidDomain(format!(
                "{} grid points per element, at least 2 are required",
                initial_number_of_grid_points_in_x
            )));
        }
        if initial_refinement_level_x >= 32 {
            return Err(Error::InvalidDomain(format!(
                "refinement level {} is too deep",
                initial_refinement_level_x
            )));
        }
        Ok(Self {
            lower_x,
            upper_x,
            is_periodic_in_x,
            initial_refinement_level_x,
            initial_number_of_grid_points_in_x,
        })
    }

    pub fn number_of_elements(&self) -> u64 {
        1 << self.initial_refinement_level_x
    }

    pub fn is_periodic(&self) -> bool {
        self.is_periodic_in_x
    }

    /**
     * Return the elements, ordered from left to right.
     */
    pub fn create_elements(&self) -> Vec<Element> {
        (0..self.number_of_elements())
            .map(|index| {
                let segment = SegmentId {
                    refinement_level: self.initial_refinement_level_x,
                    index,
                };
                let (lo, hi) = segment.endpoints();
                Element {
                    id: ElementId::new(0, segment),
                    lower: self.logical_to_inertial(lo),
                    upper: self.logical_to_inertial(hi),
                    number_of_grid_points: self.initial_number_of_grid_points_in_x,
                }
            })
            .collect()
    }

    fn logical_to_inertial(&self, xi: f64) -> f64 {
        self.lower_x + 0.5 * (xi + 1.0) * (self.upper_x - self.lower_x)
    }
}
