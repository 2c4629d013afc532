/**
 * An analytic solution of the one-dimensional Poisson equation `-u'' = f`.
 * The gradient is the auxiliary variable of the first-order formulation.
 */
pub trait AnalyticSolution {
    fn field(&self, x: f64) -> f64;
    fn field_gradient(&self, x: f64) -> f64;
    fn source(&self, x: f64) -> f64;
}




/**
 * The solution `u(x) = sin(k x)` with source `f(x) = k^2 sin(k x)`.
 */
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProductOfSinusoids1D {
    wave_number: f64,
}




// ============================================================================
impl ProductOfSinusoids1D {

    pub fn new(wave_number: f64) -> Self {
        Self { wave_number }
    }
}

impl AnalyticSolution for ProductOfSinusoids1D {

    fn field(&self, x: f64) -> f64 {
        (self.wave_number * x).sin()
    }

    fn field_gradient(&self, x: f64) -> f64 {
        self.wave_number * (self.wave_number * x).cos()
    }

    fn source(&self, x: f64) -> f64 {
        self.wave_number.powi(2) * self.field(x)
    }
}
