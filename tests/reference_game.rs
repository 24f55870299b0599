//! Behavioral and regression tests for the forced-choice reference game.

use approx::assert_abs_diff_eq;
use rsa_pragmatics::reference::EMPIRICAL_SALIENCE;
use rsa_pragmatics::{ReferenceConfig, ReferencePredictions, ReferenceScenario};

fn predict(alpha: f64, cost_adjectives: f64, prior: Vec<f64>) -> ReferencePredictions {
    let scenario = ReferenceScenario::forced_choice();
    scenario
        .predictions(&ReferenceConfig {
            alpha,
            cost_adjectives,
            salience_prior: prior,
        })
        .unwrap()
}

#[test]
fn speaker_and_listener_rows_are_stochastic() {
    for prior in [vec![1.0, 1.0, 1.0], EMPIRICAL_SALIENCE.to_vec()] {
        let predictions = predict(1.0, 0.1, prior);
        for row in predictions.speaker.outer_iter() {
            assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-9);
        }
        for row in predictions.listener.outer_iter() {
            assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-9);
        }
    }
}

#[test]
fn semantically_false_pairs_get_zero_mass() {
    let scenario = ReferenceScenario::forced_choice();
    let predictions = predict(1.0, 0.0, vec![1.0, 1.0, 1.0]);

    let blue = scenario.utterance_index("blue").unwrap();
    let green_square = scenario.object_index("green_square").unwrap();
    assert_eq!(predictions.listener[[blue, green_square]], 0.0);

    // Wherever the semantics say false, both distributions must be silent.
    for (u, row) in scenario.semantics().outer_iter().enumerate() {
        for (o, &truth) in row.iter().enumerate() {
            if truth == 0.0 {
                assert_eq!(predictions.speaker[[o, u]], 0.0);
                assert_eq!(predictions.listener[[u, o]], 0.0);
            }
        }
    }
}

#[test]
fn cost_biases_the_speaker_toward_unmarked_utterances() {
    let scenario = ReferenceScenario::forced_choice();
    let predictions = predict(1.0, 0.1, vec![1.0, 1.0, 1.0]);

    let blue_circle = scenario.object_index("blue_circle").unwrap();
    let blue = scenario.utterance_index("blue").unwrap();
    let circle = scenario.utterance_index("circle").unwrap();

    // "circle" uniquely identifies the blue circle and carries no cost, so
    // it dominates the costly, ambiguous "blue".
    assert_abs_diff_eq!(
        predictions.speaker[[blue_circle, blue]],
        0.311493308513,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(
        predictions.speaker[[blue_circle, circle]],
        0.688506691487,
        epsilon = 1e-9
    );
}

#[test]
fn flat_prior_listener_matches_reference_values() {
    let predictions = predict(1.0, 0.1, vec![1.0, 1.0, 1.0]);

    // Hearing "blue": the blue square wins because "square" is a cheap
    // unambiguous alternative for it less often than "circle" is for the
    // blue circle.
    let blue_row = predictions.listener.row(0);
    assert_abs_diff_eq!(blue_row[0], 0.396042868376, epsilon = 1e-9);
    assert_eq!(blue_row[1], 0.0);
    assert_abs_diff_eq!(blue_row[2], 0.603957131624, epsilon = 1e-9);

    let square_row = predictions.listener.row(3);
    assert_abs_diff_eq!(square_row[1], 0.404037006453, epsilon = 1e-9);
    assert_abs_diff_eq!(square_row[2], 0.595962993547, epsilon = 1e-9);
}

#[test]
fn empirical_salience_shifts_the_listener() {
    let flat = predict(1.0, 0.1, vec![1.0, 1.0, 1.0]);
    let empirical = predict(1.0, 0.1, EMPIRICAL_SALIENCE.to_vec());

    // The blue circle is far more salient empirically, so it overtakes the
    // blue square as the referent of "blue".
    assert_abs_diff_eq!(empirical.listener[[0, 0]], 0.608140297285, epsilon = 1e-9);
    assert_abs_diff_eq!(empirical.listener[[0, 2]], 0.391859702715, epsilon = 1e-9);
    assert!(empirical.listener[[0, 0]] > flat.listener[[0, 0]]);
}

#[test]
fn predictions_serialize_with_labels() {
    let predictions = predict(1.0, 0.1, vec![1.0, 1.0, 1.0]);
    let value = serde_json::to_value(&predictions).unwrap();

    assert_eq!(value["objects"][1], "green_square");
    assert_eq!(value["utterances"][3], "square");
    assert_eq!(value["speaker"]["dim"][0], 3);
    assert_eq!(value["listener"]["dim"][0], 4);
}
