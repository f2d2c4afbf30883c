//! Wire types for the prediction endpoints.

use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::predictor::score::ScoreFactors;
use crate::predictor::win::WinFactors;
use crate::predictor::{
    MatchContext, PitchType, ScorePrediction, TeamId, VenueId, WeatherCondition, WinPrediction,
};

/// Body of `POST /api/predict_score` and `POST /api/predict_win`.
///
/// Every field is optional on the wire so that a missing one is reported as
/// a 400 naming the field instead of a generic deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictRequest {
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub venue: Option<String>,
    pub pitch_type: Option<String>,
    pub weather: Option<String>,
    pub toss_winner: Option<String>,
}

fn required(value: &Option<String>, field: &'static str) -> Result<String, ApiError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ApiError::MissingField(field)),
    }
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl PredictRequest {
    /// Context for a score prediction. The toss winner defaults to team 1.
    pub fn score_context(&self) -> Result<MatchContext, ApiError> {
        let team1 = required(&self.team1, "team1")?;
        let team2 = required(&self.team2, "team2")?;
        let venue = required(&self.venue, "venue")?;
        let pitch_type = required(&self.pitch_type, "pitch_type")?;
        let weather = required(&self.weather, "weather")?;
        let toss_winner = optional(&self.toss_winner).unwrap_or_else(|| team1.clone());
        Ok(MatchContext {
            team1: TeamId(team1),
            team2: TeamId(team2),
            venue: VenueId(venue),
            weather: WeatherCondition::parse(&weather),
            pitch_type: PitchType::parse(&pitch_type),
            toss_winner: TeamId(toss_winner),
        })
    }

    /// Context for a win prediction. Pitch and weather may be omitted.
    pub fn win_context(&self) -> Result<MatchContext, ApiError> {
        let team1 = required(&self.team1, "team1")?;
        let team2 = required(&self.team2, "team2")?;
        let venue = required(&self.venue, "venue")?;
        let toss_winner = required(&self.toss_winner, "toss_winner")?;
        Ok(MatchContext {
            team1: TeamId(team1),
            team2: TeamId(team2),
            venue: VenueId(venue),
            weather: WeatherCondition::parse(&optional(&self.weather).unwrap_or_default()),
            pitch_type: PitchType::parse(&optional(&self.pitch_type).unwrap_or_default()),
            toss_winner: TeamId(toss_winner),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreResponse {
    pub predicted_score: i32,
    pub confidence_interval: [i32; 2],
    /// Percentage, one decimal
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factors: Option<ScoreFactors>,
    pub strategy: String,
}

impl ScoreResponse {
    pub fn new(p: &ScorePrediction, strategy: &str) -> Self {
        ScoreResponse {
            predicted_score: p.predicted_score,
            confidence_interval: [p.confidence_interval.0, p.confidence_interval.1],
            confidence: round_1dp(p.confidence_percent),
            factors: p.factors,
            strategy: strategy.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WinResponse {
    /// Percentage, one decimal
    pub team1_win_probability: f64,
    /// Percentage, one decimal
    pub team2_win_probability: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factors: Option<WinFactorsView>,
    pub strategy: String,
}

/// Human-readable summary of what moved the win split.
#[derive(Debug, Clone, Serialize)]
pub struct WinFactorsView {
    pub team1_rating: i32,
    pub team2_rating: i32,
    pub toss_advantage: i32,
    pub home_advantage: i32,
    /// Home team name, or "Neutral"
    pub venue_advantage: String,
    /// Toss winner name
    pub toss_impact: String,
}

impl From<&WinFactors> for WinFactorsView {
    fn from(f: &WinFactors) -> Self {
        WinFactorsView {
            team1_rating: f.team1_rating,
            team2_rating: f.team2_rating,
            toss_advantage: f.toss_advantage,
            home_advantage: f.home_advantage,
            venue_advantage: f
                .home_team
                .as_ref()
                .map(|t| t.to_string())
                .unwrap_or_else(|| "Neutral".to_string()),
            toss_impact: f.toss_winner.to_string(),
        }
    }
}

impl WinResponse {
    pub fn new(p: &WinPrediction, strategy: &str) -> Self {
        let (team1, team2) = split_percentages(p.team1_win_probability);
        WinResponse {
            team1_win_probability: team1,
            team2_win_probability: team2,
            factors: p.factors.as_ref().map(WinFactorsView::from),
            strategy: strategy.to_string(),
        }
    }
}

pub fn round_1dp(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Percentages to one decimal whose sum is exactly 100.0.
fn split_percentages(p1: f64) -> (f64, f64) {
    let tenths = (p1.clamp(0.0, 1.0) * 1000.0).round();
    (tenths / 10.0, (1000.0 - tenths) / 10.0)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerQuery {
    pub team_id: Option<i64>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LiveMatch {
    pub match_id: i64,
    pub team1: String,
    pub team2: String,
    pub status: String,
    pub current_score: String,
    pub target: String,
    pub required: String,
    pub current_rr: String,
    pub required_rr: String,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn full_request() -> PredictRequest {
        PredictRequest {
            team1: Some("Mumbai Indians".into()),
            team2: Some("Chennai Super Kings".into()),
            venue: Some("Wankhede Stadium".into()),
            pitch_type: Some("flat".into()),
            weather: Some("sunny".into()),
            toss_winner: Some("Mumbai Indians".into()),
        }
    }

    #[test]
    fn score_context_requires_pitch_and_weather() {
        let mut req = full_request();
        req.weather = None;
        assert!(matches!(req.score_context(), Err(ApiError::MissingField("weather"))));
    }

    #[test]
    fn blank_fields_count_as_missing() {
        let mut req = full_request();
        req.team2 = Some("   ".into());
        assert!(matches!(req.win_context(), Err(ApiError::MissingField("team2"))));
    }

    #[test]
    fn score_toss_defaults_to_team1() {
        let mut req = full_request();
        req.toss_winner = None;
        let ctx = req.score_context().unwrap();
        assert_eq!(ctx.toss_winner, ctx.team1);
    }

    #[test]
    fn win_context_requires_toss_but_not_conditions() {
        let mut req = full_request();
        req.pitch_type = None;
        req.weather = None;
        let ctx = req.win_context().unwrap();
        assert_eq!(ctx.weather, WeatherCondition::Other(String::new()));

        req.toss_winner = None;
        assert!(matches!(req.win_context(), Err(ApiError::MissingField("toss_winner"))));
    }

    #[test]
    fn fields_are_trimmed() {
        let mut req = full_request();
        req.team1 = Some("  Mumbai Indians ".into());
        assert_eq!(req.win_context().unwrap().team1, TeamId::from("Mumbai Indians"));
    }

    #[test]
    fn percentages_sum_to_hundred() {
        let (a, b) = split_percentages(98.0 / 180.0);
        assert_relative_eq!(a, 54.4, epsilon = 1e-9);
        assert_relative_eq!(b, 45.6, epsilon = 1e-9);
        let (a, b) = split_percentages(0.12345);
        assert_relative_eq!(a + b, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn round_to_one_decimal() {
        assert_relative_eq!(round_1dp(87.3456), 87.3, epsilon = 1e-9);
        assert_relative_eq!(round_1dp(94.96), 95.0, epsilon = 1e-9);
    }
}
