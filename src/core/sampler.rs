//! Probabilistic sampling filter
//!
//! Each record is forwarded with independent probability `rate`. The
//! boundary rates 0.0 and 1.0 are special-cased so the hot path never
//! touches the random number generator when sampling is effectively off.

use rand::Rng;

/// Sampling filter applied before encoding.
///
/// Thread-safe: the random draw uses the thread-local RNG, so no shared
/// state is mutated per decision.
///
/// # Example
///
/// ```
/// use wirelog::Sampler;
///
/// let sampler = Sampler::new(1.0);
/// assert!(sampler.should_forward());
///
/// let sampler = Sampler::new(0.0);
/// assert!(!sampler.should_forward());
/// ```
#[derive(Debug, Clone)]
pub struct Sampler {
    rate: f64,
}

impl Sampler {
    /// Create a sampler with the given forward probability.
    ///
    /// The rate must already be validated to lie in `[0.0, 1.0]`; the
    /// logger constructor rejects anything else.
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// Decide whether a record is forwarded to encoding.
    pub fn should_forward(&self) -> bool {
        // Fast paths: no random draw at the boundaries
        if self.rate >= 1.0 {
            return true;
        }
        if self.rate <= 0.0 {
            return false;
        }
        rand::thread_rng().gen::<f64>() < self.rate
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}
