use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An IPL franchise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    /// e.g. "MI", "CSK"
    pub short_name: String,
    pub logo_url: Option<String>,
    pub home_ground: Option<String>,
    pub captain: Option<String>,
    pub coach: Option<String>,
    pub founded_year: Option<i32>,
    pub titles: i32,
    pub matches_played: i32,
    pub wins: i32,
    pub losses: i32,
    pub created_at: DateTime<Utc>,
}

/// A squad member with career aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub team_id: Option<i64>,
    /// "Batsman" | "Bowler" | "All Rounder" | "Wicket Keeper"
    pub role: String,
    pub batting_style: Option<String>,
    pub bowling_style: Option<String>,
    pub image_url: Option<String>,
    pub nationality: Option<String>,
    pub age: Option<i32>,
    pub matches_played: i32,
    pub runs_scored: i32,
    pub wickets_taken: i32,
    pub batting_average: f64,
    pub bowling_average: f64,
    pub strike_rate: f64,
    pub economy_rate: f64,
    pub centuries: i32,
    pub fifties: i32,
    pub highest_score: i32,
    /// e.g. "4/14"
    pub best_bowling: Option<String>,
    /// Auction price in crore rupees
    pub price_crores: f64,
    pub created_at: DateTime<Utc>,
    pub team_name: Option<String>,
    pub team_short_name: Option<String>,
}

/// A played fixture, joined with the names of the teams involved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: i64,
    pub team1_id: i64,
    pub team2_id: i64,
    pub venue: Option<String>,
    pub match_date: Option<NaiveDate>,
    pub toss_winner_id: Option<i64>,
    /// "bat" | "field"
    pub toss_decision: Option<String>,
    pub team1_score: Option<i32>,
    pub team2_score: Option<i32>,
    pub team1_wickets: Option<i32>,
    pub team2_wickets: Option<i32>,
    pub winner_id: Option<i64>,
    pub pitch_type: Option<String>,
    pub weather: Option<String>,
    pub overs: i32,
    pub team1_name: Option<String>,
    pub team1_short: Option<String>,
    pub team2_name: Option<String>,
    pub team2_short: Option<String>,
    pub toss_winner_name: Option<String>,
    pub winner_name: Option<String>,
}

/// Team row plus squad aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamStats {
    #[serde(flatten)]
    pub team: Team,
    pub total_players: i64,
    pub avg_batting_avg: Option<f64>,
    pub avg_bowling_avg: Option<f64>,
    pub total_runs: Option<i64>,
    pub total_wickets: Option<i64>,
}

/// A prediction served by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: Option<i64>,
    /// "score" | "win"
    pub kind: String,
    /// "heuristic" | "trained"
    pub strategy: String,
    pub team1: String,
    pub team2: String,
    pub venue: String,
    pub predicted_score: Option<i32>,
    /// Percentage, 0–100
    pub confidence: Option<f64>,
    /// Percentage, 0–100
    pub team1_win_probability: Option<f64>,
    pub team2_win_probability: Option<f64>,
    pub created_at: DateTime<Utc>,
}
