//! Evaluator trait for position evaluation
//!
//! Defines a common interface for different evaluation strategies.

/// Trait for evaluating positions at search leaves
pub trait Evaluator<S> {
    /// Evaluate the position from First's perspective
    ///
    /// Returns:
    ///   - Positive score: First advantage
    ///   - Negative score: Second advantage
    ///   - Zero: Equal position or a draw
    ///
    /// Won positions should score far beyond any positional term.
    fn evaluate(&self, position: &S) -> i32;

    /// Get evaluator name for debugging
    fn name(&self) -> &str;
}

impl<S, E: Evaluator<S> + ?Sized> Evaluator<S> for Box<E> {
    fn evaluate(&self, position: &S) -> i32 {
        (**self).evaluate(position)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<S, E: Evaluator<S> + ?Sized> Evaluator<S> for &E {
    fn evaluate(&self, position: &S) -> i32 {
        (**self).evaluate(position)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
