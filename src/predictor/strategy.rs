use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use super::context::MatchContext;
use super::model::{ScoreModel, WinModel};
use super::noise::NoiseSource;
use super::score::{estimate_score, ScorePrediction};
use super::tables::StaticData;
use super::win::{estimate_win, WinPrediction};

/// Factor-table estimator.
#[derive(Debug, Clone)]
pub struct HeuristicStrategy {
    data: Arc<StaticData>,
}

impl HeuristicStrategy {
    pub fn new(data: Arc<StaticData>) -> Self {
        HeuristicStrategy { data }
    }
}

/// Regression models loaded from disk at startup.
#[derive(Debug, Clone)]
pub struct TrainedModelStrategy {
    score_model: ScoreModel,
    win_model: WinModel,
}

impl TrainedModelStrategy {
    pub fn load(score_model_path: &Path, win_model_path: &Path) -> Result<Self> {
        let score_model = ScoreModel::load(score_model_path).context("Failed to load score model")?;
        let win_model = WinModel::load(win_model_path).context("Failed to load win model")?;
        info!(
            "Loaded trained models ({} score features, {} win features)",
            score_model.feature_count(),
            win_model.feature_count()
        );
        Ok(TrainedModelStrategy {
            score_model,
            win_model,
        })
    }
}

/// How predictions are produced. Chosen once at startup.
#[derive(Debug, Clone)]
pub enum PredictionStrategy {
    Heuristic(HeuristicStrategy),
    TrainedModel(TrainedModelStrategy),
}

impl PredictionStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            PredictionStrategy::Heuristic(_) => "heuristic",
            PredictionStrategy::TrainedModel(_) => "trained",
        }
    }

    /// The trained strategy ignores `noise`.
    pub fn predict_score(&self, ctx: &MatchContext, noise: &mut dyn NoiseSource) -> ScorePrediction {
        match self {
            PredictionStrategy::Heuristic(h) => estimate_score(ctx, &h.data, noise),
            PredictionStrategy::TrainedModel(t) => t.score_model.predict(ctx),
        }
    }

    pub fn predict_win(&self, ctx: &MatchContext) -> WinPrediction {
        match self {
            PredictionStrategy::Heuristic(h) => estimate_win(ctx, &h.data),
            PredictionStrategy::TrainedModel(t) => t.win_model.predict(ctx),
        }
    }
}
