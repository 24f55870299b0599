//! Vanilla RSA model for a forced-choice reference game.
//!
//! A speaker sees one of three objects and picks one of four utterances to
//! single it out; a listener inverts that choice. The module implements one
//! level of the standard RSA recursion: literal listener → pragmatic
//! speaker (cost-adjusted log-utility, softmax choice) → pragmatic listener
//! (Bayesian inversion against an object-salience prior).

use crate::math::{ensure_finite, normalize, softmax};
use crate::{ModelError, Result};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// Empirical salience counts for the built-in objects (production-frequency
/// alternative to a flat prior).
pub const EMPIRICAL_SALIENCE: [f64; 3] = [71.0, 139.0, 30.0];

/// Immutable description of a reference game: labels, the truth-conditional
/// semantic matrix, and per-utterance cost weights.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceScenario {
    utterances: Vec<String>,
    objects: Vec<String>,
    /// `[utterance, object]` truth values.
    semantics: Array2<f64>,
    /// 1.0 for marked utterances (adjectives), 0.0 for unmarked ones.
    cost_weights: Array1<f64>,
}

impl ReferenceScenario {
    /// The fixed three-object game: a blue circle, a green square and a blue
    /// square, describable by two color adjectives and two shape nouns.
    pub fn forced_choice() -> Self {
        let utterances = ["blue", "circle", "green", "square"];
        let objects = ["blue_circle", "green_square", "blue_square"];
        let semantics = Array2::from_shape_vec(
            (4, 3),
            vec![
                1.0, 0.0, 1.0, // blue
                1.0, 0.0, 0.0, // circle
                0.0, 1.0, 0.0, // green
                0.0, 1.0, 1.0, // square
            ],
        )
        .expect("forced_choice semantics shape is static");
        let cost_weights = Array1::from_vec(vec![1.0, 0.0, 1.0, 0.0]);
        Self::new(
            utterances.iter().map(|s| s.to_string()).collect(),
            objects.iter().map(|s| s.to_string()).collect(),
            semantics,
            cost_weights,
        )
        .expect("forced_choice scenario is well-formed")
    }

    /// Builds a scenario from explicit parts, validating shapes and support.
    ///
    /// Every semantic entry must lie in `[0, 1]` and every utterance row
    /// must carry positive total support, so the literal listener is
    /// well-defined for each utterance.
    pub fn new(
        utterances: Vec<String>,
        objects: Vec<String>,
        semantics: Array2<f64>,
        cost_weights: Array1<f64>,
    ) -> Result<Self> {
        let (rows, cols) = semantics.dim();
        if rows != utterances.len() {
            return Err(ModelError::LengthMismatch {
                label: "semantic matrix rows",
                expected: utterances.len(),
                got: rows,
            });
        }
        if cols != objects.len() {
            return Err(ModelError::LengthMismatch {
                label: "semantic matrix columns",
                expected: objects.len(),
                got: cols,
            });
        }
        if cost_weights.len() != utterances.len() {
            return Err(ModelError::LengthMismatch {
                label: "cost weights",
                expected: utterances.len(),
                got: cost_weights.len(),
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
        for &weight in &cost_weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ModelError::NegativeWeight {
                    label: "cost weight",
                    value: weight,
                });
            }
        }
        Ok(Self {
            utterances,
            objects,
            semantics,
            cost_weights,
        })
    }

    pub fn utterances(&self) -> &[String] {
        &self.utterances
    }

    pub fn objects(&self) -> &[String] {
        &self.objects
    }

    /// `[utterance, object]` truth values.
    pub fn semantics(&self) -> &Array2<f64> {
        &self.semantics
    }

    pub fn utterance_index(&self, name: &str) -> Option<usize> {
        self.utterances.iter().position(|u| u == name)
    }

    pub fn object_index(&self, name: &str) -> Option<usize> {
        self.objects.iter().position(|o| o == name)
    }

    /// Runs the speaker/listener pipeline for this scenario.
    pub fn predictions(&self, config: &ReferenceConfig) -> Result<ReferencePredictions> {
        config.validate(self.objects.len())?;
        tracing::debug!(
            alpha = config.alpha,
            cost_adjectives = config.cost_adjectives,
            "computing reference game predictions"
        );

        let n_utterances = self.utterances.len();
        let n_objects = self.objects.len();
        let literal_listener = normalize(&self.semantics, Axis(1));

        // utility[object, utterance]; ln(0) = -inf silences false pairs.
        let mut utility = Array2::<f64>::zeros((n_objects, n_utterances));
        for (u, row) in literal_listener.outer_iter().enumerate() {
            let cost = config.cost_adjectives * self.cost_weights[u];
            for (o, &belief) in row.iter().enumerate() {
                utility[[o, u]] = belief.ln() - cost;
            }
        }

        let speaker = softmax(&utility.mapv(|v| config.alpha * v), Axis(1));
        ensure_finite("reference speaker", &speaker)?;

        let mut weighted = Array2::<f64>::zeros((n_utterances, n_objects));
        for u in 0..n_utterances {
            for o in 0..n_objects {
                weighted[[u, o]] = speaker[[o, u]] * config.salience_prior[o];
            }
        }
        let listener = normalize(&weighted, Axis(1));
        ensure_finite("reference listener", &listener)?;

        Ok(ReferencePredictions {
            objects: self.objects.clone(),
            utterances: self.utterances.clone(),
            speaker,
            listener,
        })
    }
}

/// Parameters of the vanilla model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceConfig {
    /// Softmax optimality: higher values push the speaker toward the
    /// utility-maximizing utterance.
    pub alpha: f64,
    /// Differential production cost applied to marked utterances.
    pub cost_adjectives: f64,
    /// Prior belief over which object is under discussion; need not be
    /// normalized.
    pub salience_prior: Vec<f64>,
}

impl ReferenceConfig {
    /// Config with a flat salience prior over `objects` objects.
    pub fn flat(alpha: f64, cost_adjectives: f64, objects: usize) -> Self {
        Self {
            alpha,
            cost_adjectives,
            salience_prior: vec![1.0; objects],
        }
    }

    fn validate(&self, objects: usize) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(ModelError::NonPositiveParameter {
                label: "alpha",
                value: self.alpha,
            });
        }
        if !self.cost_adjectives.is_finite() || self.cost_adjectives < 0.0 {
            return Err(ModelError::NegativeWeight {
                label: "cost_adjectives",
                value: self.cost_adjectives,
            });
        }
        if self.salience_prior.len() != objects {
            return Err(ModelError::LengthMismatch {
                label: "salience prior",
                expected: objects,
                got: self.salience_prior.len(),
            });
        }
        let mut total = 0.0;
        for &weight in &self.salience_prior {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ModelError::NegativeWeight {
                    label: "salience prior weight",
                    value: weight,
                });
            }
            total += weight;
        }
        if total <= 0.0 {
            return Err(ModelError::DegenerateDistribution {
                label: "salience prior",
            });
        }
        Ok(())
    }
}

/// Output matrices of the vanilla model, labeled for downstream tabulation.
#[derive(Debug, Clone, Serialize)]
pub struct ReferencePredictions {
    pub objects: Vec<String>,
    pub utterances: Vec<String>,
    /// `[object, utterance]`: P(utterance | object).
    pub speaker: Array2<f64>,
    /// `[utterance, object]`: P(object | utterance).
    pub listener: Array2<f64>,
}
