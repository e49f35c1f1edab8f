use num_traits::Float;
use std::fmt::Debug;

/// Default discount factor.
pub const DEFAULT_GAMMA: f64 = 0.8;
/// Default convergence threshold on the per-sweep sup-norm change.
pub const DEFAULT_THETA: f64 = 1e-6;
/// Default sweep cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

/// How a sweep writes the value function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateScheme {
    /// Gauss-Seidel: each backup is visible to the states that follow it in
    /// the same sweep. The order of `states` shapes the trajectory.
    #[default]
    InPlace,
    /// Jacobi: every backup of a sweep reads the previous sweep's values.
    Synchronous,
}

/// Configuration options for value iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueIterationConfig<T = f64>
where
    T: Float + Debug,
{
    /// Discount factor applied to successor values, expected in [0, 1)
    pub gamma: T,
    /// Stop once the largest value change of a sweep falls below this
    pub theta: T,
    /// Sweep cap; the loop stops once the sweep count exceeds it
    pub max_iterations: usize,
    /// Value update scheme
    pub scheme: UpdateScheme,
}

impl<T> Default for ValueIterationConfig<T>
where
    T: Float + Debug,
{
    fn default() -> Self {
        Self {
            gamma: T::from(DEFAULT_GAMMA).unwrap(),
            theta: T::from(DEFAULT_THETA).unwrap(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            scheme: UpdateScheme::InPlace,
        }
    }
}

impl<T> ValueIterationConfig<T>
where
    T: Float + Debug,
{
    pub fn with_gamma(mut self, gamma: T) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_theta(mut self, theta: T) -> Self {
        self.theta = theta;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_scheme(mut self, scheme: UpdateScheme) -> Self {
        self.scheme = scheme;
        self
    }
}
