//! Split source terms.
//!
//! For q_t + f(q)_x = psi(q, x, t) the stage evaluator adds a source
//! increment to the hyperbolic increment (Godunov splitting inside each
//! stage). The increment is already multiplied by dt.

mod relaxation;

pub use relaxation::Relaxation;

use crate::error::SolverError;
use crate::solver::Field;

/// Trait for source terms evaluated on the physical cells.
pub trait SourceTerm: Send + Sync {
    /// Source increment dt * psi(q, t) for every physical cell.
    ///
    /// # Arguments
    /// * `q` - Stage state (physical cells only)
    /// * `aux` - Aux field on the same cells, if any
    /// * `t` - Stage time
    /// * `dt` - Step size
    ///
    /// # Returns
    /// A field with the shape of `q`
    fn increment(
        &self,
        q: &Field,
        aux: Option<&Field>,
        t: f64,
        dt: f64,
    ) -> Result<Field, SolverError>;

    /// Name of this source term for debugging.
    fn name(&self) -> &'static str;
}

/// Sum of several source terms.
pub struct CombinedSource {
    sources: Vec<Box<dyn SourceTerm>>,
}

impl CombinedSource {
    /// Create a new combined source from a list of source terms.
    pub fn new(sources: Vec<Box<dyn SourceTerm>>) -> Self {
        Self { sources }
    }

    /// Append a source term.
    pub fn with(mut self, source: impl SourceTerm + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Number of combined terms.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no terms are combined.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl SourceTerm for CombinedSource {
    fn increment(
        &self,
        q: &Field,
        aux: Option<&Field>,
        t: f64,
        dt: f64,
    ) -> Result<Field, SolverError> {
        let mut total = Field::new(q.n_cells, q.n_eqn);
        for source in &self.sources {
            let contrib = source.increment(q, aux, t, dt)?;
            if !contrib.same_shape(q) {
                return Err(SolverError::Source(format!(
                    "{} returned {} x {} values for {} x {}",
                    source.name(),
                    contrib.n_cells,
                    contrib.n_eqn,
                    q.n_cells,
                    q.n_eqn
                )));
            }
            total.add(&contrib);
        }
        Ok(total)
    }

    fn name(&self) -> &'static str {
        "combined"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ConstantRate {
        rate: f64,
    }

    impl SourceTerm for ConstantRate {
        fn increment(
            &self,
            q: &Field,
            _: Option<&Field>,
            _: f64,
            dt: f64,
        ) -> Result<Field, SolverError> {
            let mut out = Field::new(q.n_cells, q.n_eqn);
            out.data.fill(dt * self.rate);
            Ok(out)
        }

        fn name(&self) -> &'static str {
            "constant"
        }
    }

    struct Failing;

    impl SourceTerm for Failing {
        fn increment(
            &self,
            _: &Field,
            _: Option<&Field>,
            _: f64,
            _: f64,
        ) -> Result<Field, SolverError> {
            Err(SolverError::Source("forcing data exhausted".into()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn test_combined_source() {
        let combined = CombinedSource::new(vec![])
            .with(ConstantRate { rate: 1.0 })
            .with(ConstantRate { rate: 0.5 });
        assert_eq!(combined.len(), 2);

        let q = Field::new(3, 2);
        let inc = combined.increment(&q, None, 0.0, 0.1).unwrap();
        for &v in &inc.data {
            assert!((v - 0.15).abs() < 1e-14);
        }
    }

    #[test]
    fn test_combined_source_propagates_failure() {
        let combined =
            CombinedSource::new(vec![Box::new(ConstantRate { rate: 1.0 }), Box::new(Failing)]);
        let err = combined
            .increment(&Field::new(2, 1), None, 0.0, 0.1)
            .unwrap_err();
        assert_eq!(err, SolverError::Source("forcing data exhausted".into()));
    }
}
