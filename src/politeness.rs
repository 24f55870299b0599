//! RSA model with politeness: a speaker that blends informativeness with
//! social "face", and a listener that jointly infers the state and the
//! speaker's politeness weight.
//!
//! The speaker utility is a convex combination of an epistemic term (the
//! log belief a literal listener would end up with) and a social term (the
//! expected state value that belief conveys, scaled by a social-value
//! factor). The mixing weight `phi` is unknown to the listener, who runs
//! the speaker model once per mark on a fixed grid over `[0, 1]` and
//! normalizes the stacked result into a joint posterior per utterance.

use crate::math::{ensure_finite, normalize, softmax};
use crate::{ModelError, Result};
use ndarray::{s, Array1, Array2, Array3, Axis};
use serde::{Deserialize, Serialize};

/// Immutable description of a politeness game: utterance labels, numeric
/// state values, and a graded semantic matrix.
#[derive(Debug, Clone, Serialize)]
pub struct PolitenessScenario {
    utterances: Vec<String>,
    /// Numeric value of each state (the politeness target of the social
    /// utility); order fixes the state axis.
    state_values: Array1<f64>,
    /// `[utterance, state]` applicability in `[0, 1]`.
    semantics: Array2<f64>,
}

impl PolitenessScenario {
    /// The fixed five-point review game: states 1–5 described by the
    /// utterances `terrible`, `bad`, `okay`, `good`, `amazing` with graded
    /// truth-conditions.
    pub fn review_game() -> Self {
        let utterances = ["terrible", "bad", "okay", "good", "amazing"];
        let semantics = Array2::from_shape_vec(
            (5, 5),
            vec![
                0.95, 0.85, 0.02, 0.02, 0.02, // terrible
                0.85, 0.95, 0.02, 0.02, 0.02, // bad
                0.02, 0.25, 0.95, 0.65, 0.35, // okay
                0.02, 0.05, 0.55, 0.95, 0.93, // good
                0.02, 0.02, 0.02, 0.65, 0.95, // amazing
            ],
        )
        .expect("review_game semantics shape is static");
        Self::new(
            utterances.iter().map(|s| s.to_string()).collect(),
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            semantics,
        )
        .expect("review_game scenario is well-formed")
    }

    /// Builds a scenario from explicit parts, validating shapes and support.
    pub fn new(
        utterances: Vec<String>,
        state_values: Vec<f64>,
        semantics: Array2<f64>,
    ) -> Result<Self> {
        let (rows, cols) = semantics.dim();
        if rows != utterances.len() {
            return Err(ModelError::LengthMismatch {
                label: "semantic matrix rows",
                expected: utterances.len(),
                got: rows,
            });
        }
        if cols != state_values.len() {
            return Err(ModelError::LengthMismatch {
                label: "semantic matrix columns",
                expected: state_values.len(),
                got: cols,
            });
        }
        for &value in &semantics {
            if !value.is_finite() || value < 0.0 {
                return Err(ModelError::NegativeWeight {
                    label: "semantic value",
                    value,
                });
            }
            if value > 1.0 {
                return Err(ModelError::OutOfUnitInterval {
                    label: "semantic value",
                    value,
                });
            }
        }
        for row in semantics.outer_iter() {
            if row.sum() <= 0.0 {
                return Err(ModelError::DegenerateDistribution {
                    label: "semantic row support",
                });
            }
        }
        for &value in &state_values {
            if !value.is_finite() {
                return Err(ModelError::NonFiniteValue {
                    label: "state value",
                    value,
                });
            }
        }
        Ok(Self {
            utterances,
            state_values: Array1::from_vec(state_values),
            semantics,
        })
    }

    pub fn utterances(&self) -> &[String] {
        &self.utterances
    }

    pub fn state_values(&self) -> &Array1<f64> {
        &self.state_values
    }

    /// `[utterance, state]` applicability values.
    pub fn semantics(&self) -> &Array2<f64> {
        &self.semantics
    }

    pub fn utterance_index(&self, name: &str) -> Option<usize> {
        self.utterances.iter().position(|u| u == name)
    }

    /// Expected state value per utterance under the literal listener's
    /// belief, scaled by the social-value factor.
    fn social_utility(&self, literal_listener: &Array2<f64>, social_value: f64) -> Array1<f64> {
        let mut social = Array1::<f64>::zeros(self.utterances.len());
        for (u, row) in literal_listener.outer_iter().enumerate() {
            social[u] = row
                .iter()
                .zip(self.state_values.iter())
                .map(|(&belief, &value)| belief * value * social_value)
                .sum();
        }
        social
    }

    /// Speaker distribution `[state, utterance]` for a fixed mixing weight.
    pub fn speaker(&self, config: &PolitenessConfig) -> Result<Array2<f64>> {
        config.validate()?;

        let n_utterances = self.utterances.len();
        let n_states = self.state_values.len();
        let literal_listener = normalize(&self.semantics, Axis(1));
        let social = self.social_utility(&literal_listener, config.social_value);

        let mut utility = Array2::<f64>::zeros((n_states, n_utterances));
        for (u, row) in literal_listener.outer_iter().enumerate() {
            for (state, &belief) in row.iter().enumerate() {
                // phi = 0 must fully suppress the epistemic term even for
                // zero-support entries (0 · ln 0 would otherwise poison the
                // utility with NaN).
                let epistemic = if config.phi > 0.0 {
                    config.phi * belief.ln()
                } else {
                    0.0
                };
                utility[[state, u]] = epistemic + (1.0 - config.phi) * social[u];
            }
        }

        let speaker = softmax(&utility.mapv(|v| config.alpha * v), Axis(1));
        ensure_finite("politeness speaker", &speaker)?;
        Ok(speaker)
    }

    /// Listener posterior over `(phi, state)` pairs for every utterance.
    ///
    /// Runs the speaker once per grid mark, weights each slice by the
    /// normalized prior mass of that mark, and normalizes the stacked
    /// `[phi, utterance, state]` array per utterance, so each heard
    /// utterance carries a proper joint posterior.
    pub fn listener(
        &self,
        alpha: f64,
        social_value: f64,
        grid: &PhiGrid,
    ) -> Result<ListenerPosterior> {
        let weights = grid.normalized_weights();
        let n_utterances = self.utterances.len();
        let n_states = self.state_values.len();
        tracing::debug!(
            alpha,
            social_value,
            grid_points = grid.len(),
            "running politeness grid inference"
        );

        let mut joint = Array3::<f64>::zeros((grid.len(), n_utterances, n_states));
        for (i, (&mark, &weight)) in grid.marks().iter().zip(weights.iter()).enumerate() {
            let config = PolitenessConfig {
                alpha,
                phi: mark,
                social_value,
            };
            let speaker = self.speaker(&config)?;
            for state in 0..n_states {
                for u in 0..n_utterances {
                    joint[[i, u, state]] = speaker[[state, u]] * weight;
                }
            }
            tracing::trace!(mark, weight, "accumulated speaker slice");
        }

        for u in 0..n_utterances {
            let mut slice = joint.slice_mut(s![.., u, ..]);
            let total = slice.sum();
            if total <= 0.0 {
                return Err(ModelError::DegenerateDistribution {
                    label: "listener posterior",
                });
            }
            slice.mapv_inplace(|v| v / total);
        }
        ensure_finite("listener posterior", &joint)?;

        Ok(ListenerPosterior {
            utterances: self.utterances.clone(),
            state_values: self.state_values.to_vec(),
            phi_marks: grid.marks().to_vec(),
            joint,
        })
    }
}

/// Parameters of the politeness speaker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolitenessConfig {
    /// Softmax optimality parameter.
    pub alpha: f64,
    /// Weight of the epistemic utility; `1 - phi` weights the social term.
    pub phi: f64,
    /// How much social value one additional state unit carries.
    pub social_value: f64,
}

impl PolitenessConfig {
    fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(ModelError::NonPositiveParameter {
                label: "alpha",
                value: self.alpha,
            });
        }
        if !self.phi.is_finite() || !(0.0..=1.0).contains(&self.phi) {
            return Err(ModelError::OutOfUnitInterval {
                label: "phi",
                value: self.phi,
            });
        }
        if !self.social_value.is_finite() {
            return Err(ModelError::NonFiniteValue {
                label: "social_value",
                value: self.social_value,
            });
        }
        Ok(())
    }
}

/// Discretization grid over the mixing weight together with an unnormalized
/// prior over its marks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhiGrid {
    marks: Vec<f64>,
    weights: Vec<f64>,
}

impl PhiGrid {
    /// Number of marks used by the built-in grids.
    pub const DEFAULT_POINTS: usize = 11;

    /// Evenly spaced marks over `[0, 1]` with a flat prior.
    pub fn flat() -> Self {
        Self {
            marks: Self::even_marks(Self::DEFAULT_POINTS),
            weights: vec![1.0; Self::DEFAULT_POINTS],
        }
    }

    /// Evenly spaced marks with linearly increasing prior weight, favoring
    /// high mixing weights (a listener who expects a mostly truthful
    /// speaker).
    pub fn linearly_increasing() -> Self {
        Self {
            marks: Self::even_marks(Self::DEFAULT_POINTS),
            weights: (1..=Self::DEFAULT_POINTS).map(|w| w as f64).collect(),
        }
    }

    /// Builds a grid from explicit marks and prior weights.
    pub fn new(marks: Vec<f64>, weights: Vec<f64>) -> Result<Self> {
        if marks.is_empty() {
            return Err(ModelError::DegenerateDistribution {
                label: "phi grid",
            });
        }
        if weights.len() != marks.len() {
            return Err(ModelError::LengthMismatch {
                label: "phi prior",
                expected: marks.len(),
                got: weights.len(),
            });
        }
        for &mark in &marks {
            if !mark.is_finite() || !(0.0..=1.0).contains(&mark) {
                return Err(ModelError::OutOfUnitInterval {
                    label: "phi grid mark",
                    value: mark,
                });
            }
        }
        let mut total = 0.0;
        for &weight in &weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ModelError::NegativeWeight {
                    label: "phi prior weight",
                    value: weight,
                });
            }
            total += weight;
        }
        if total <= 0.0 {
            return Err(ModelError::DegenerateDistribution {
                label: "phi prior",
            });
        }
        Ok(Self { marks, weights })
    }

    fn even_marks(points: usize) -> Vec<f64> {
        let step = 1.0 / (points - 1) as f64;
        (0..points).map(|i| i as f64 * step).collect()
    }

    pub fn marks(&self) -> &[f64] {
        &self.marks
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Prior weights rescaled to sum to 1.
    pub fn normalized_weights(&self) -> Array1<f64> {
        let total: f64 = self.weights.iter().sum();
        Array1::from_iter(self.weights.iter().map(|w| w / total))
    }
}

/// Joint listener posterior `[phi, utterance, state]`, normalized per
/// utterance, labeled for downstream tabulation.
#[derive(Debug, Clone, Serialize)]
pub struct ListenerPosterior {
    pub utterances: Vec<String>,
    pub state_values: Vec<f64>,
    pub phi_marks: Vec<f64>,
    joint: Array3<f64>,
}

impl ListenerPosterior {
    /// The full `[phi, utterance, state]` posterior.
    pub fn joint(&self) -> &Array3<f64> {
        &self.joint
    }

    /// Posterior over states for a heard utterance, marginal over phi.
    pub fn state_marginal(&self, utterance: usize) -> Array1<f64> {
        self.joint.index_axis(Axis(1), utterance).sum_axis(Axis(0))
    }

    /// Posterior over phi marks for a heard utterance, marginal over
    /// states.
    pub fn phi_marginal(&self, utterance: usize) -> Array1<f64> {
        self.joint.index_axis(Axis(1), utterance).sum_axis(Axis(1))
    }

    /// Posterior mean of the mixing weight given a heard utterance.
    pub fn expected_phi(&self, utterance: usize) -> f64 {
        self.phi_marginal(utterance)
            .iter()
            .zip(self.phi_marks.iter())
            .map(|(&mass, &mark)| mass * mark)
            .sum()
    }
}
