//! Serialized regression models over one-hot encoded match context.
//!
//! Artifacts are JSON:
//!   { "intercept": f64, "coefficients": { "team1=Mumbai Indians": f64, ... },
//!     "confidence": f64 }
//!
//! Each context field becomes one `field=value` feature with value 1. A key
//! absent from `coefficients` contributes nothing, which is how a
//! dummy-encoded model treats both its baseline level and unseen levels.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::context::MatchContext;
use super::score::{confidence_band, ScorePrediction, MAX_SCORE, MIN_SCORE};
use super::win::WinPrediction;

const DEFAULT_CONFIDENCE: f64 = 0.8;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("model {path} has a non-finite weight for '{feature}'")]
    NonFinite { path: PathBuf, feature: String },

    #[error("model {path} confidence {confidence} is outside 0..=1")]
    BadConfidence { path: PathBuf, confidence: f64 },
}

#[derive(Debug, Clone, Deserialize)]
struct Artifact {
    intercept: f64,
    #[serde(default)]
    coefficients: HashMap<String, f64>,
    confidence: Option<f64>,
}

impl Artifact {
    fn read(path: &Path) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: Artifact = serde_json::from_str(&raw).map_err(|source| ModelError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if !artifact.intercept.is_finite() {
            return Err(ModelError::NonFinite {
                path: path.to_path_buf(),
                feature: "intercept".into(),
            });
        }
        if let Some((feature, _)) = artifact.coefficients.iter().find(|(_, w)| !w.is_finite()) {
            return Err(ModelError::NonFinite {
                path: path.to_path_buf(),
                feature: feature.clone(),
            });
        }
        if let Some(confidence) = artifact.confidence {
            if !(0.0..=1.0).contains(&confidence) {
                return Err(ModelError::BadConfidence {
                    path: path.to_path_buf(),
                    confidence,
                });
            }
        }
        Ok(artifact)
    }

    /// intercept + Σ weights of the active one-hot features
    fn linear_term(&self, ctx: &MatchContext) -> f64 {
        self.intercept
            + ctx
                .feature_keys()
                .iter()
                .filter_map(|key| self.coefficients.get(key))
                .sum::<f64>()
    }
}

/// Linear regressor for the first-innings total.
#[derive(Debug, Clone)]
pub struct ScoreModel {
    artifact: Artifact,
}

impl ScoreModel {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        Ok(ScoreModel {
            artifact: Artifact::read(path)?,
        })
    }

    pub fn predict(&self, ctx: &MatchContext) -> ScorePrediction {
        let raw = self.artifact.linear_term(ctx).round() as i32;
        let predicted_score = raw.clamp(MIN_SCORE, MAX_SCORE);
        let confidence = self.artifact.confidence.unwrap_or(DEFAULT_CONFIDENCE);
        ScorePrediction {
            predicted_score,
            confidence_interval: confidence_band(predicted_score),
            confidence_percent: confidence * 100.0,
            factors: None,
        }
    }

    pub fn feature_count(&self) -> usize {
        self.artifact.coefficients.len()
    }
}

/// Logistic classifier for P(team 1 wins).
#[derive(Debug, Clone)]
pub struct WinModel {
    artifact: Artifact,
}

impl WinModel {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        Ok(WinModel {
            artifact: Artifact::read(path)?,
        })
    }

    pub fn predict(&self, ctx: &MatchContext) -> WinPrediction {
        WinPrediction::from_team1(sigmoid(self.artifact.linear_term(ctx)))
    }

    pub fn feature_count(&self) -> usize {
        self.artifact.coefficients.len()
    }
}

fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::context::sample_context;
    use approx::assert_relative_eq;

    fn write_artifact(name: &str, raw: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, raw).unwrap();
        path
    }

    #[test]
    fn score_model_sums_active_features() {
        let path = write_artifact(
            "cricket_predictor_score_model.json",
            r#"{
                "intercept": 150.0,
                "coefficients": {
                    "team1=Mumbai Indians": 12.4,
                    "pitch_type=flat": 20.0,
                    "weather=rainy": -30.0
                },
                "confidence": 0.82
            }"#,
        );
        let model = ScoreModel::load(&path).unwrap();
        let ctx = sample_context("Mumbai Indians", "Punjab Kings", "Wankhede Stadium", "Mumbai Indians");
        let p = model.predict(&ctx);
        // 150 + 12.4 + 20 = 182.4, weather is sunny
        assert_eq!(p.predicted_score, 182);
        assert_eq!(p.confidence_interval, (164, 200));
        assert_relative_eq!(p.confidence_percent, 82.0, epsilon = 1e-9);
        assert_eq!(model.feature_count(), 3);
    }

    #[test]
    fn score_model_clamps_and_defaults_confidence() {
        let path = write_artifact(
            "cricket_predictor_score_model_low.json",
            r#"{"intercept": 40.0}"#,
        );
        let model = ScoreModel::load(&path).unwrap();
        let p = model.predict(&sample_context("A", "B", "C", "A"));
        assert_eq!(p.predicted_score, MIN_SCORE);
        assert_relative_eq!(p.confidence_percent, 80.0, epsilon = 1e-9);
    }

    #[test]
    fn win_model_is_logistic_and_complementary() {
        let path = write_artifact(
            "cricket_predictor_win_model.json",
            r#"{
                "intercept": 0.0,
                "coefficients": {"team1=Mumbai Indians": 0.4, "toss_winner=Mumbai Indians": 0.2}
            }"#,
        );
        let model = WinModel::load(&path).unwrap();
        let p = model.predict(&sample_context(
            "Mumbai Indians",
            "Punjab Kings",
            "Eden Gardens",
            "Mumbai Indians",
        ));
        assert_relative_eq!(p.team1_win_probability, 1.0 / (1.0 + (-0.6f64).exp()), epsilon = 1e-12);
        assert_relative_eq!(p.team1_win_probability + p.team2_win_probability, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn unseen_categories_contribute_nothing() {
        let path = write_artifact(
            "cricket_predictor_win_model_unseen.json",
            r#"{"intercept": 0.0, "coefficients": {"team1=Mumbai Indians": 2.0}}"#,
        );
        let model = WinModel::load(&path).unwrap();
        let p = model.predict(&sample_context("Unknown FC", "Nobody XI", "Lord's", "Nobody XI"));
        assert_relative_eq!(p.team1_win_probability, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn sigmoid_is_stable_at_extremes() {
        assert!(sigmoid(1000.0) <= 1.0);
        assert!(sigmoid(-1000.0) >= 0.0);
        assert_relative_eq!(sigmoid(0.0), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn rejects_bad_artifacts() {
        let missing = ScoreModel::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(missing, ModelError::Io { .. }));

        let path = write_artifact("cricket_predictor_bad_model.json", r#"{"coefficients": {}}"#);
        assert!(matches!(WinModel::load(&path), Err(ModelError::Parse { .. })));

        let path = write_artifact(
            "cricket_predictor_bad_confidence.json",
            r#"{"intercept": 1.0, "confidence": 1.5}"#,
        );
        assert!(matches!(ScoreModel::load(&path), Err(ModelError::BadConfidence { .. })));
    }
}
