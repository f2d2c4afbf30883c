//! First-innings score estimate for the heuristic strategy.
//!
//! ```text
//! raw   = 160 + team(team1) + venue + weather + pitch + U{-15..=15}
//! score = clamp(raw, 120, 250)
//! band  = [max(score - ⌊0.1·score⌋, 100), min(score + ⌊0.1·score⌋, 300)]
//! ```

use serde::Serialize;

use super::context::MatchContext;
use super::noise::NoiseSource;
use super::tables::StaticData;

pub const BASE_SCORE: i32 = 160;
pub const MIN_SCORE: i32 = 120;
pub const MAX_SCORE: i32 = 250;

const JITTER: std::ops::RangeInclusive<i32> = -15..=15;
const CONFIDENCE: std::ops::RangeInclusive<f64> = 0.75..=0.95;
const MARGIN_FRACTION: f64 = 0.1;
const BAND_FLOOR: i32 = 100;
const BAND_CEILING: i32 = 300;

/// Per-factor contribution to the raw score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScoreFactors {
    pub team_strength: i32,
    pub venue_advantage: i32,
    pub pitch_factor: i32,
    pub weather_impact: i32,
    pub jitter: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScorePrediction {
    pub predicted_score: i32,
    pub confidence_interval: (i32, i32),
    /// 0–100
    pub confidence_percent: f64,
    pub factors: Option<ScoreFactors>,
}

pub fn estimate_score(
    ctx: &MatchContext,
    data: &StaticData,
    noise: &mut dyn NoiseSource,
) -> ScorePrediction {
    let factors = ScoreFactors {
        team_strength: data.team_deltas.delta(&ctx.team1),
        venue_advantage: data.venue_deltas.delta(&ctx.venue),
        pitch_factor: data.pitch_deltas.delta(&ctx.pitch_type),
        weather_impact: data.weather_deltas.delta(&ctx.weather),
        jitter: noise.int_in(JITTER),
    };
    let raw = BASE_SCORE
        + factors.team_strength
        + factors.venue_advantage
        + factors.weather_impact
        + factors.pitch_factor
        + factors.jitter;
    let predicted_score = raw.clamp(MIN_SCORE, MAX_SCORE);
    let confidence = noise.float_in(CONFIDENCE);

    ScorePrediction {
        predicted_score,
        confidence_interval: confidence_band(predicted_score),
        confidence_percent: confidence * 100.0,
        factors: Some(factors),
    }
}

/// Interval of ±10% around `score`, floored at 100 and capped at 300.
pub fn confidence_band(score: i32) -> (i32, i32) {
    let margin = (score as f64 * MARGIN_FRACTION).floor() as i32;
    (
        (score - margin).max(BAND_FLOOR),
        (score + margin).min(BAND_CEILING),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::context::{sample_context, PitchType, WeatherCondition};
    use crate::predictor::noise::FixedNoise;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn no_noise() -> FixedNoise {
        FixedNoise { jitter: 0, confidence: 0.85 }
    }

    #[test]
    fn sums_factor_deltas_onto_base() {
        let data = StaticData::builtin();
        // MI +10, Wankhede +10, sunny +10, flat +25
        let ctx = sample_context("Mumbai Indians", "Chennai Super Kings", "Wankhede Stadium", "Mumbai Indians");
        let p = estimate_score(&ctx, &data, &mut no_noise());
        assert_eq!(p.predicted_score, 215);
        assert_eq!(p.factors.unwrap().team_strength, 10);
        assert_eq!(p.factors.unwrap().venue_advantage, 10);
        assert_eq!(p.factors.unwrap().weather_impact, 10);
        assert_eq!(p.factors.unwrap().pitch_factor, 25);
        assert_relative_eq!(p.confidence_percent, 85.0, epsilon = 1e-9);
    }

    #[test]
    fn unknown_categories_are_neutral() {
        let data = StaticData::builtin();
        let mut ctx = sample_context("Unknown FC", "Mumbai Indians", "Lord's", "Unknown FC");
        ctx.weather = WeatherCondition::parse("foggy");
        ctx.pitch_type = PitchType::parse("green top");
        let p = estimate_score(&ctx, &data, &mut no_noise());
        assert_eq!(p.predicted_score, BASE_SCORE);
        assert_eq!(p.factors, Some(ScoreFactors::default()));
    }

    #[test]
    fn jitter_is_added_to_raw_score() {
        let data = StaticData::builtin();
        let ctx = sample_context("Unknown FC", "Mumbai Indians", "Lord's", "Unknown FC");
        let mut noise = FixedNoise { jitter: -15, confidence: 0.75 };
        let p = estimate_score(&ctx, &data, &mut noise);
        // 160 + sunny 10 + flat 25 - 15
        assert_eq!(p.predicted_score, 180);
        assert_eq!(p.factors.unwrap().jitter, -15);
    }

    #[test]
    fn raw_score_is_clamped_high() {
        let data = StaticData::builtin();
        // RCB +15, Chinnaswamy +20, sunny +10, flat +25, jitter +15 → 245; still in range
        let ctx = sample_context(
            "Royal Challengers Bangalore",
            "Mumbai Indians",
            "M. Chinnaswamy Stadium",
            "Mumbai Indians",
        );
        let mut noise = FixedNoise { jitter: 15, confidence: 0.95 };
        assert_eq!(estimate_score(&ctx, &data, &mut noise).predicted_score, 245);

        let raw = r#"{"teams": {"Sluggers": {"rating": 90, "score_delta": 200}}}"#;
        let path = std::env::temp_dir().join("cricket_predictor_score_clamp.json");
        std::fs::write(&path, raw).unwrap();
        let heavy = StaticData::load(&path).unwrap();
        let ctx = sample_context("Sluggers", "Mumbai Indians", "Lord's", "Sluggers");
        assert_eq!(estimate_score(&ctx, &heavy, &mut noise).predicted_score, MAX_SCORE);
    }

    #[test]
    fn raw_score_is_clamped_low() {
        let data = StaticData::builtin();
        // CSK +8, Chidambaram -10, rainy -15, spin -5, jitter -15 → 123
        let mut ctx = sample_context(
            "Chennai Super Kings",
            "Mumbai Indians",
            "MA Chidambaram Stadium",
            "Mumbai Indians",
        );
        ctx.weather = WeatherCondition::Rainy;
        ctx.pitch_type = PitchType::SpinFriendly;
        let mut noise = FixedNoise { jitter: -15, confidence: 0.75 };
        assert_eq!(estimate_score(&ctx, &data, &mut noise).predicted_score, 123);

        ctx.team1 = "Unknown FC".into();
        // 160 - 10 - 15 - 5 - 15 = 115 → 120
        assert_eq!(estimate_score(&ctx, &data, &mut noise).predicted_score, MIN_SCORE);
    }

    #[test]
    fn confidence_band_uses_floored_ten_percent() {
        assert_eq!(confidence_band(215), (194, 236));
        assert_eq!(confidence_band(120), (108, 132));
        assert_eq!(confidence_band(250), (225, 275));
    }

    #[test]
    fn confidence_band_respects_outer_bounds() {
        assert_eq!(confidence_band(105).0, 100);
        assert_eq!(confidence_band(290).1, 300);
    }

    #[test]
    fn random_predictions_stay_within_bounds() {
        let data = StaticData::builtin();
        let mut rng = StdRng::seed_from_u64(2024);
        let teams = ["Mumbai Indians", "Royal Challengers Bangalore", "Unknown FC"];
        let venues = ["M. Chinnaswamy Stadium", "MA Chidambaram Stadium", "Lord's"];
        let weathers = ["sunny", "rainy", "foggy"];
        let pitches = ["flat", "spin-friendly", "green top"];
        for team in teams {
            for venue in venues {
                for weather in weathers {
                    for pitch in pitches {
                        let mut ctx = sample_context(team, "Punjab Kings", venue, team);
                        ctx.weather = WeatherCondition::parse(weather);
                        ctx.pitch_type = PitchType::parse(pitch);
                        for _ in 0..20 {
                            let p = estimate_score(&ctx, &data, &mut rng);
                            assert!((MIN_SCORE..=MAX_SCORE).contains(&p.predicted_score));
                            assert!(p.confidence_interval.0 >= 100);
                            assert!(p.confidence_interval.1 <= 300);
                            assert!((75.0..=95.0).contains(&p.confidence_percent));
                        }
                    }
                }
            }
        }
    }
}
