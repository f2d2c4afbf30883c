//! Static lookup tables behind the heuristic estimator.
//!
//! Everything here is built once at startup (either the built-in IPL tables
//! or a JSON file passed via `--tables-path`) and shared read-only through an
//! `Arc`. Lookups never fail: a missing key yields the neutral default.

use serde::Deserialize;
use std::collections::HashMap;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::context::{PitchType, TeamId, VenueId, WeatherCondition};

/// Rating used for any team absent from the ratings table.
pub const DEFAULT_RATING: u8 = 70;

/// Fixed category → signed delta mapping. Missing keys contribute 0.
#[derive(Debug, Clone)]
pub struct FactorTable<K> {
    deltas: HashMap<K, i32>,
}

impl<K: Eq + Hash> FactorTable<K> {
    pub fn new(deltas: HashMap<K, i32>) -> Self {
        FactorTable { deltas }
    }

    pub fn delta(&self, key: &K) -> i32 {
        self.deltas.get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }
}

impl<K: Eq + Hash> FromIterator<(K, i32)> for FactorTable<K> {
    fn from_iter<I: IntoIterator<Item = (K, i32)>>(iter: I) -> Self {
        FactorTable::new(iter.into_iter().collect())
    }
}

/// Team strength on a 0–100 scale.
#[derive(Debug, Clone)]
pub struct TeamRatings {
    ratings: HashMap<TeamId, u8>,
}

impl TeamRatings {
    pub fn rating(&self, team: &TeamId) -> u8 {
        self.ratings.get(team).copied().unwrap_or(DEFAULT_RATING)
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }
}

/// All tables the heuristic strategy consults.
#[derive(Debug, Clone)]
pub struct StaticData {
    pub team_ratings: TeamRatings,
    pub team_deltas: FactorTable<TeamId>,
    pub venue_deltas: FactorTable<VenueId>,
    pub weather_deltas: FactorTable<WeatherCondition>,
    pub pitch_deltas: FactorTable<PitchType>,
    home_grounds: HashMap<VenueId, TeamId>,
}

#[derive(Debug, Error)]
pub enum TablesError {
    #[error("failed to read tables file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tables file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("rating {rating} for team '{team}' is outside 0..=100")]
    RatingOutOfRange { team: String, rating: i64 },
}

/// On-disk layout of a tables file.
#[derive(Debug, Deserialize)]
struct TablesFile {
    #[serde(default)]
    teams: HashMap<String, TeamEntry>,
    #[serde(default)]
    venues: HashMap<String, i32>,
    #[serde(default)]
    weather: HashMap<String, i32>,
    #[serde(default)]
    pitch: HashMap<String, i32>,
}

#[derive(Debug, Deserialize)]
struct TeamEntry {
    rating: i64,
    #[serde(default)]
    score_delta: i32,
    home_ground: Option<String>,
}

// name, rating, score delta, home ground
const BUILTIN_TEAMS: [(&str, u8, i32, &str); 8] = [
    ("Mumbai Indians", 85, 10, "Wankhede Stadium"),
    ("Chennai Super Kings", 82, 8, "MA Chidambaram Stadium"),
    ("Royal Challengers Bangalore", 78, 15, "M. Chinnaswamy Stadium"),
    ("Kolkata Knight Riders", 80, 5, "Eden Gardens"),
    ("Delhi Capitals", 75, 3, "Arun Jaitley Stadium"),
    ("Punjab Kings", 72, 6, "PCA Stadium"),
    ("Rajasthan Royals", 76, 0, "Sawai Mansingh Stadium"),
    ("Sunrisers Hyderabad", 77, 12, "Rajiv Gandhi Stadium"),
];

const BUILTIN_VENUES: [(&str, i32); 7] = [
    ("Wankhede Stadium", 10),
    ("M. Chinnaswamy Stadium", 20),
    ("Eden Gardens", 5),
    ("Arun Jaitley Stadium", 8),
    ("MA Chidambaram Stadium", -10),
    ("Narendra Modi Stadium", 5),
    ("Rajiv Gandhi Stadium", 5),
];

impl StaticData {
    /// The IPL tables served when no tables file is given.
    pub fn builtin() -> Self {
        let team_ratings = TeamRatings {
            ratings: BUILTIN_TEAMS
                .iter()
                .map(|(name, rating, _, _)| (TeamId::from(*name), *rating))
                .collect(),
        };
        let team_deltas = BUILTIN_TEAMS
            .iter()
            .map(|(name, _, delta, _)| (TeamId::from(*name), *delta))
            .collect();
        let home_grounds = BUILTIN_TEAMS
            .iter()
            .map(|(name, _, _, ground)| (VenueId::from(*ground), TeamId::from(*name)))
            .collect();
        let venue_deltas = BUILTIN_VENUES
            .iter()
            .map(|(name, delta)| (VenueId::from(*name), *delta))
            .collect();
        let weather_deltas = [
            (WeatherCondition::Sunny, 10),
            (WeatherCondition::Overcast, 5),
            (WeatherCondition::Humid, -5),
            (WeatherCondition::Rainy, -15),
        ]
        .into_iter()
        .collect();
        let pitch_deltas = [
            (PitchType::Flat, 25),
            (PitchType::Balanced, 10),
            (PitchType::SpinFriendly, -5),
            (PitchType::PaceFriendly, 5),
        ]
        .into_iter()
        .collect();

        StaticData {
            team_ratings,
            team_deltas,
            venue_deltas,
            weather_deltas,
            pitch_deltas,
            home_grounds,
        }
    }

    /// Load tables from a JSON file. Sections that are absent are empty, so
    /// every lookup in them falls back to its neutral default.
    pub fn load(path: &Path) -> Result<Self, TablesError> {
        let raw = std::fs::read_to_string(path).map_err(|source| TablesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw).map_err(|e| match e {
            TablesError::Parse { source, .. } => TablesError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    fn from_json(raw: &str) -> Result<Self, TablesError> {
        let file: TablesFile = serde_json::from_str(raw).map_err(|source| TablesError::Parse {
            path: PathBuf::new(),
            source,
        })?;

        let mut ratings = HashMap::new();
        let mut team_deltas = HashMap::new();
        let mut home_grounds = HashMap::new();
        for (name, entry) in file.teams {
            if !(0..=100).contains(&entry.rating) {
                return Err(TablesError::RatingOutOfRange {
                    team: name,
                    rating: entry.rating,
                });
            }
            let team = TeamId(name);
            ratings.insert(team.clone(), entry.rating as u8);
            team_deltas.insert(team.clone(), entry.score_delta);
            if let Some(ground) = entry.home_ground {
                home_grounds.insert(VenueId(ground), team);
            }
        }

        Ok(StaticData {
            team_ratings: TeamRatings { ratings },
            team_deltas: FactorTable::new(team_deltas),
            venue_deltas: file
                .venues
                .into_iter()
                .map(|(k, v)| (VenueId(k), v))
                .collect(),
            weather_deltas: file
                .weather
                .into_iter()
                .map(|(k, v)| (WeatherCondition::parse(&k), v))
                .collect(),
            pitch_deltas: file
                .pitch
                .into_iter()
                .map(|(k, v)| (PitchType::parse(&k), v))
                .collect(),
            home_grounds,
        })
    }

    /// Team whose home ground is `venue`, if any.
    pub fn home_team(&self, venue: &VenueId) -> Option<&TeamId> {
        self.home_grounds.get(venue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ratings_cover_all_franchises() {
        let data = StaticData::builtin();
        assert_eq!(data.team_ratings.rating(&"Mumbai Indians".into()), 85);
        assert_eq!(data.team_ratings.rating(&"Chennai Super Kings".into()), 82);
        assert_eq!(data.team_ratings.len(), 8);
    }

    #[test]
    fn unknown_keys_fall_back_to_neutral() {
        let data = StaticData::builtin();
        assert_eq!(data.team_ratings.rating(&"Unknown FC".into()), DEFAULT_RATING);
        assert_eq!(data.team_deltas.delta(&"Unknown FC".into()), 0);
        assert_eq!(data.venue_deltas.delta(&"Lord's".into()), 0);
        assert_eq!(
            data.weather_deltas.delta(&WeatherCondition::Other("foggy".into())),
            0
        );
        assert_eq!(data.pitch_deltas.delta(&PitchType::Other("".into())), 0);
    }

    #[test]
    fn home_grounds_resolve_to_teams() {
        let data = StaticData::builtin();
        assert_eq!(
            data.home_team(&"Wankhede Stadium".into()),
            Some(&TeamId::from("Mumbai Indians"))
        );
        assert_eq!(data.home_team(&"Narendra Modi Stadium".into()), None);
    }

    #[test]
    fn tables_load_from_json() {
        let raw = r#"{
            "teams": {
                "Gujarat Titans": {"rating": 79, "score_delta": 4, "home_ground": "Narendra Modi Stadium"}
            },
            "venues": {"Narendra Modi Stadium": 12},
            "weather": {"Sunny": 7, "foggy": -3},
            "pitch": {"spin-friendly": -8}
        }"#;
        let data = StaticData::from_json(raw).unwrap();
        assert_eq!(data.team_ratings.rating(&"Gujarat Titans".into()), 79);
        assert_eq!(data.team_deltas.delta(&"Gujarat Titans".into()), 4);
        assert_eq!(data.venue_deltas.delta(&"Narendra Modi Stadium".into()), 12);
        assert_eq!(data.weather_deltas.delta(&WeatherCondition::Sunny), 7);
        assert_eq!(data.weather_deltas.delta(&WeatherCondition::parse("foggy")), -3);
        assert_eq!(data.pitch_deltas.delta(&PitchType::SpinFriendly), -8);
        assert_eq!(
            data.home_team(&"Narendra Modi Stadium".into()),
            Some(&TeamId::from("Gujarat Titans"))
        );
        // absent from this file
        assert_eq!(data.team_ratings.rating(&"Mumbai Indians".into()), DEFAULT_RATING);
    }

    #[test]
    fn out_of_range_rating_is_rejected() {
        let raw = r#"{"teams": {"Mumbai Indians": {"rating": 120}}}"#;
        match StaticData::from_json(raw) {
            Err(TablesError::RatingOutOfRange { team, rating }) => {
                assert_eq!(team, "Mumbai Indians");
                assert_eq!(rating, 120);
            }
            other => panic!("Expected RatingOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_reports_path() {
        let err = StaticData::load(Path::new("/nonexistent/tables.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/tables.json"));
    }
}
