use std::f64::consts::PI;




const NEWTON_TOLERANCE: f64 = 1e-15;
const NEWTON_MAX_ITERATIONS: usize = 100;




/**
 * Return the Legendre-Gauss-Lobatto collocation points on [-1, 1], in
 * ascending order. The points include both endpoints and are exactly
 * mirror-symmetric about zero. At least two points are required.
 */
pub fn lobatto_points(num_points: usize) -> Vec<f64> {
    assert!(num_points >= 2, "at least two Lobatto points are required");

    let degree = num_points - 1;
    let mut x: Vec<f64> = (0..num_points)
        .map(|i| -(PI * i as f64 / degree as f64).cos())
        .collect();

    // Newton iteration for the roots of (1 - x^2) P'_N(x)
    for _ in 0..NEWTON_MAX_ITERATIONS {
        let mut max_change: f64 = 0.0;

        for xi in x.iter_mut() {
            let (p, p_prev) = legendre(degree, *xi);
            let dx = (*xi * p - p_prev) / (num_points as f64 * p);
            *xi -= dx;
            max_change = max_change.max(dx.abs());
        }
        if max_change < NEWTON_TOLERANCE {
            break;
        }
    }

    let n = num_points;
    for i in 0..n / 2 {
        let half = 0.5 * (x[n - 1 - i] - x[i]);
        x[i] = -half;
        x[n - 1 - i] = half;
    }
    if n % 2 == 1 {
        x[n / 2] = 0.0;
    }
    x
}




/**
 * Evaluate the Legendre polynomials of degree `n` and `n - 1` at `x` by the
 * three-term recurrence.
 */
fn legendre(n: usize, x: f64) -> (f64, f64) {
    let mut p_prev = 1.0;
    let mut p = x;

    for k in 2..=n {
        let k = k as f64;
        let p_next = ((2.0 * k - 1.0) * x * p - (k - 1.0) * p_prev) / k;
        p_prev = p;
        p = p_next;
    }
    (p, p_prev)
}




/**
 * The matrix differentiating the Lagrange interpolant through a set of
 * collocation points, evaluated at those same points.
 */
#[derive(Clone, Debug)]
pub struct DifferentiationMatrix {
    size: usize,
    entries: Vec<f64>,
}




// ============================================================================
impl DifferentiationMatrix {

    /**
     * Build the matrix from barycentric weights. The diagonal is set so that
     * every row sums to zero, which makes constants differentiate to exactly
     * zero.
     */
    pub fn new(points: &[f64]) -> Self {
        let size = points.len();
        let weights: Vec<f64> = (0..size)
            .map(|j| {
                1.0 / (0..size)
                    .filter(|&k| k != j)
                    .map(|k| points[j] - points[k])
                    .product::<f64>()
            })
            .collect();

        let mut entries = vec![0.0; size * size];

        for i in 0..size {
            let mut diagonal = 0.0;
            for j in 0..size {
                if i != j {
                    let d = (weights[j] / weights[i]) / (points[i] - points[j]);
                    entries[i * size + j] = d;
                    diagonal -= d;
                }
            }
            entries[i * size + i] = diagonal;
        }
        Self { size, entries }
    }

    /**
     * Differentiate nodal values given at the collocation points.
     */
    pub fn apply(&self, values: &[f64]) -> Vec<f64> {
        assert_eq!(values.len(), self.size, "wrong number of nodal values");

        self.entries
            .chunks_exact(self.size)
            .map(|row| row.iter().zip(values).map(|(d, u)| d * u).sum())
            .collect()
    }
}
