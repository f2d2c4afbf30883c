//! Per-request match description fed to every prediction strategy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Team name as supplied by the client (e.g. "Mumbai Indians").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub String);

/// Venue name as supplied by the client (e.g. "Wankhede Stadium").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueId(pub String);

impl From<&str> for TeamId {
    fn from(s: &str) -> Self {
        TeamId(s.to_string())
    }
}

impl From<&str> for VenueId {
    fn from(s: &str) -> Self {
        VenueId(s.to_string())
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Weather on match day. Labels the estimator has no entry for are kept
/// verbatim in `Other` so they can still be logged and one-hot encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WeatherCondition {
    Sunny,
    Overcast,
    Humid,
    Rainy,
    Other(String),
}

impl WeatherCondition {
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "sunny" => WeatherCondition::Sunny,
            "overcast" => WeatherCondition::Overcast,
            "humid" => WeatherCondition::Humid,
            "rainy" => WeatherCondition::Rainy,
            _ => WeatherCondition::Other(label.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            WeatherCondition::Sunny => "sunny",
            WeatherCondition::Overcast => "overcast",
            WeatherCondition::Humid => "humid",
            WeatherCondition::Rainy => "rainy",
            WeatherCondition::Other(s) => s,
        }
    }
}

impl From<String> for WeatherCondition {
    fn from(s: String) -> Self {
        WeatherCondition::parse(&s)
    }
}

impl From<WeatherCondition> for String {
    fn from(w: WeatherCondition) -> Self {
        w.label().to_string()
    }
}

/// Pitch character as reported by the ground staff.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PitchType {
    Flat,
    Balanced,
    SpinFriendly,
    PaceFriendly,
    Other(String),
}

impl PitchType {
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "flat" => PitchType::Flat,
            "balanced" => PitchType::Balanced,
            "spin-friendly" | "spin_friendly" => PitchType::SpinFriendly,
            "pace-friendly" | "pace_friendly" => PitchType::PaceFriendly,
            _ => PitchType::Other(label.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PitchType::Flat => "flat",
            PitchType::Balanced => "balanced",
            PitchType::SpinFriendly => "spin-friendly",
            PitchType::PaceFriendly => "pace-friendly",
            PitchType::Other(s) => s,
        }
    }
}

impl From<String> for PitchType {
    fn from(s: String) -> Self {
        PitchType::parse(&s)
    }
}

impl From<PitchType> for String {
    fn from(p: PitchType) -> Self {
        p.label().to_string()
    }
}

/// Everything a strategy needs to know about the fixture being predicted.
/// Built fresh for each request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchContext {
    pub team1: TeamId,
    pub team2: TeamId,
    pub venue: VenueId,
    pub weather: WeatherCondition,
    pub pitch_type: PitchType,
    pub toss_winner: TeamId,
}

impl MatchContext {
    /// One-hot feature keys (`field=value`) for the trained models.
    pub fn feature_keys(&self) -> [String; 6] {
        [
            format!("team1={}", self.team1),
            format!("team2={}", self.team2),
            format!("venue={}", self.venue),
            format!("pitch_type={}", self.pitch_type.label()),
            format!("weather={}", self.weather.label()),
            format!("toss_winner={}", self.toss_winner),
        ]
    }
}

#[cfg(test)]
pub(crate) fn sample_context(team1: &str, team2: &str, venue: &str, toss: &str) -> MatchContext {
    MatchContext {
        team1: team1.into(),
        team2: team2.into(),
        venue: venue.into(),
        weather: WeatherCondition::Sunny,
        pitch_type: PitchType::Flat,
        toss_winner: toss.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_labels_parse_case_insensitively() {
        assert_eq!(WeatherCondition::parse("Sunny"), WeatherCondition::Sunny);
        assert_eq!(WeatherCondition::parse(" RAINY "), WeatherCondition::Rainy);
    }

    #[test]
    fn unknown_labels_are_kept() {
        assert_eq!(
            WeatherCondition::parse("foggy"),
            WeatherCondition::Other("foggy".into())
        );
        assert_eq!(PitchType::parse("green top").label(), "green top");
    }

    #[test]
    fn pitch_accepts_underscore_spelling() {
        assert_eq!(PitchType::parse("spin_friendly"), PitchType::SpinFriendly);
        assert_eq!(PitchType::SpinFriendly.label(), "spin-friendly");
    }

    #[test]
    fn weather_deserializes_from_json_string() {
        let w: WeatherCondition = serde_json::from_str("\"overcast\"").unwrap();
        assert_eq!(w, WeatherCondition::Overcast);
        assert_eq!(serde_json::to_string(&w).unwrap(), "\"overcast\"");
    }

    #[test]
    fn feature_keys_cover_every_field() {
        let ctx = sample_context("Mumbai Indians", "Punjab Kings", "Eden Gardens", "Punjab Kings");
        let keys = ctx.feature_keys();
        assert_eq!(keys[0], "team1=Mumbai Indians");
        assert_eq!(keys[3], "pitch_type=flat");
        assert_eq!(keys[5], "toss_winner=Punjab Kings");
    }
}
