//! Rational Speech Acts (RSA) predictions for two fixed pragmatic games.
//!
//! The crate computes the probability matrices of the recursive Bayesian RSA
//! model: a literal listener derived from truth-conditional semantics, a
//! pragmatic speaker that soft-maximizes a cost-adjusted (or socially
//! blended) log-utility, and a pragmatic listener that inverts the speaker
//! via Bayes' rule. Two scenarios are built in:
//!
//! - [`reference`]: a forced-choice reference game in which a speaker picks
//!   one of four utterances to single out one of three objects;
//! - [`politeness`]: an utterance-choice game over a five-point rating
//!   scale in which the speaker trades informativeness off against how good
//!   the conveyed state makes the listener feel, and the listener jointly
//!   infers the state and the speaker's politeness weight.
//!
//! All computations are pure and synchronous; outputs are plain `ndarray`
//! matrices with label accessors, ready for downstream tabulation or
//! plotting.

pub mod math;
pub mod politeness;
pub mod reference;

use thiserror::Error;

/// Errors surfaced by the model computations.
///
/// Configuration problems are rejected before any arithmetic runs; the
/// numerical-degeneracy variants fire only when a computation produced
/// non-finite values or an empty distribution despite valid configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    /// A scalar parameter that must be strictly positive was not.
    #[error("{label} must be positive and finite, got {value}")]
    NonPositiveParameter { label: &'static str, value: f64 },
    /// A weight that must lie in the unit interval was outside it.
    #[error("{label} must lie in [0, 1], got {value}")]
    OutOfUnitInterval { label: &'static str, value: f64 },
    /// A vector length does not match the scenario it is applied to.
    #[error("{label} length mismatch: expected {expected}, got {got}")]
    LengthMismatch {
        label: &'static str,
        expected: usize,
        got: usize,
    },
    /// A weight vector or matrix entry that must be non-negative was not.
    #[error("{label} must contain non-negative finite entries, got {value}")]
    NegativeWeight { label: &'static str, value: f64 },
    /// A distribution lost all probability mass and cannot be normalized.
    #[error("{label} has no probability mass left to normalize")]
    DegenerateDistribution { label: &'static str },
    /// A value that must be finite was NaN or infinite: either a supplied
    /// parameter, or a computed distribution caught by the output guard
    /// before NaNs could propagate downstream.
    #[error("{label} is not finite ({value})")]
    NonFiniteValue { label: &'static str, value: f64 },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ModelError>;

pub use math::{normalize, softmax};
pub use politeness::{
    ListenerPosterior, PhiGrid, PolitenessConfig, PolitenessScenario,
};
pub use reference::{ReferenceConfig, ReferencePredictions, ReferenceScenario};
