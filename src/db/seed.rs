//! Sample IPL teams, squads and fixtures inserted on startup.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use rusqlite::params;
use tracing::debug;

use super::Database;

struct SeedTeam {
    name: &'static str,
    short_name: &'static str,
    home_ground: &'static str,
    captain: &'static str,
    coach: &'static str,
    founded_year: i32,
    titles: i32,
    matches_played: i32,
    wins: i32,
    losses: i32,
}

const TEAMS: [SeedTeam; 8] = [
    SeedTeam { name: "Mumbai Indians", short_name: "MI", home_ground: "Wankhede Stadium", captain: "Rohit Sharma", coach: "Mark Boucher", founded_year: 2008, titles: 5, matches_played: 220, wins: 140, losses: 80 },
    SeedTeam { name: "Chennai Super Kings", short_name: "CSK", home_ground: "MA Chidambaram Stadium", captain: "MS Dhoni", coach: "Stephen Fleming", founded_year: 2008, titles: 4, matches_played: 210, wins: 130, losses: 80 },
    SeedTeam { name: "Royal Challengers Bangalore", short_name: "RCB", home_ground: "M. Chinnaswamy Stadium", captain: "Virat Kohli", coach: "Mike Hesson", founded_year: 2008, titles: 0, matches_played: 230, wins: 110, losses: 120 },
    SeedTeam { name: "Kolkata Knight Riders", short_name: "KKR", home_ground: "Eden Gardens", captain: "Shreyas Iyer", coach: "Brendon McCullum", founded_year: 2008, titles: 2, matches_played: 200, wins: 100, losses: 100 },
    SeedTeam { name: "Delhi Capitals", short_name: "DC", home_ground: "Arun Jaitley Stadium", captain: "Rishabh Pant", coach: "Ricky Ponting", founded_year: 2008, titles: 0, matches_played: 180, wins: 85, losses: 95 },
    SeedTeam { name: "Punjab Kings", short_name: "PBKS", home_ground: "PCA Stadium", captain: "Shikhar Dhawan", coach: "Anil Kumble", founded_year: 2008, titles: 0, matches_played: 190, wins: 90, losses: 100 },
    SeedTeam { name: "Rajasthan Royals", short_name: "RR", home_ground: "Sawai Mansingh Stadium", captain: "Sanju Samson", coach: "Kumar Sangakkara", founded_year: 2008, titles: 1, matches_played: 170, wins: 80, losses: 90 },
    SeedTeam { name: "Sunrisers Hyderabad", short_name: "SRH", home_ground: "Rajiv Gandhi Stadium", captain: "Aiden Markram", coach: "Brian Lara", founded_year: 2013, titles: 1, matches_played: 160, wins: 75, losses: 85 },
];

struct SeedPlayer {
    name: &'static str,
    team: &'static str,
    role: &'static str,
    batting_style: &'static str,
    bowling_style: Option<&'static str>,
    nationality: &'static str,
    age: i32,
    matches_played: i32,
    runs_scored: i32,
    wickets_taken: i32,
    batting_average: f64,
    bowling_average: f64,
    strike_rate: f64,
    economy_rate: f64,
    centuries: i32,
    fifties: i32,
    highest_score: i32,
    best_bowling: Option<&'static str>,
    price_crores: f64,
}

const PLAYERS: [SeedPlayer; 17] = [
    // Mumbai Indians
    SeedPlayer { name: "Rohit Sharma", team: "MI", role: "Batsman", batting_style: "Right-hand bat", bowling_style: Some("Right-arm off-break"), nationality: "India", age: 36, matches_played: 243, runs_scored: 6211, wickets_taken: 0, batting_average: 30.35, bowling_average: 0.0, strike_rate: 130.61, economy_rate: 0.0, centuries: 1, fifties: 40, highest_score: 109, best_bowling: None, price_crores: 16.0 },
    SeedPlayer { name: "Jasprit Bumrah", team: "MI", role: "Bowler", batting_style: "Right-hand bat", bowling_style: Some("Right-arm fast"), nationality: "India", age: 30, matches_played: 120, runs_scored: 400, wickets_taken: 145, batting_average: 15.5, bowling_average: 24.54, strike_rate: 120.5, economy_rate: 7.39, centuries: 0, fifties: 0, highest_score: 28, best_bowling: Some("4/14"), price_crores: 12.0 },
    SeedPlayer { name: "Hardik Pandya", team: "MI", role: "All Rounder", batting_style: "Right-hand bat", bowling_style: Some("Right-arm fast-medium"), nationality: "India", age: 30, matches_played: 104, runs_scored: 2915, wickets_taken: 42, batting_average: 28.89, bowling_average: 28.67, strike_rate: 143.89, economy_rate: 8.24, centuries: 0, fifties: 16, highest_score: 91, best_bowling: Some("3/17"), price_crores: 15.0 },
    SeedPlayer { name: "Ishan Kishan", team: "MI", role: "Wicket Keeper", batting_style: "Left-hand bat", bowling_style: None, nationality: "India", age: 25, matches_played: 105, runs_scored: 2644, wickets_taken: 0, batting_average: 29.93, bowling_average: 0.0, strike_rate: 135.04, economy_rate: 0.0, centuries: 0, fifties: 15, highest_score: 99, best_bowling: None, price_crores: 15.25 },
    SeedPlayer { name: "Suryakumar Yadav", team: "MI", role: "Batsman", batting_style: "Right-hand bat", bowling_style: Some("Right-arm off-break"), nationality: "India", age: 33, matches_played: 115, runs_scored: 3389, wickets_taken: 0, batting_average: 31.12, bowling_average: 0.0, strike_rate: 145.73, economy_rate: 0.0, centuries: 1, fifties: 22, highest_score: 103, best_bowling: None, price_crores: 8.0 },
    // Chennai Super Kings
    SeedPlayer { name: "MS Dhoni", team: "CSK", role: "Wicket Keeper", batting_style: "Right-hand bat", bowling_style: Some("Right-arm medium"), nationality: "India", age: 42, matches_played: 264, runs_scored: 5082, wickets_taken: 0, batting_average: 38.09, bowling_average: 0.0, strike_rate: 135.92, economy_rate: 0.0, centuries: 0, fifties: 24, highest_score: 84, best_bowling: None, price_crores: 12.0 },
    SeedPlayer { name: "Ravindra Jadeja", team: "CSK", role: "All Rounder", batting_style: "Left-hand bat", bowling_style: Some("Slow left-arm orthodox"), nationality: "India", age: 35, matches_played: 240, runs_scored: 2756, wickets_taken: 157, batting_average: 29.95, bowling_average: 29.85, strike_rate: 127.3, economy_rate: 7.68, centuries: 0, fifties: 13, highest_score: 62, best_bowling: Some("5/16"), price_crores: 16.0 },
    SeedPlayer { name: "Ruturaj Gaikwad", team: "CSK", role: "Batsman", batting_style: "Right-hand bat", bowling_style: Some("Right-arm off-break"), nationality: "India", age: 27, matches_played: 68, runs_scored: 2380, wickets_taken: 0, batting_average: 32.43, bowling_average: 0.0, strike_rate: 129.18, economy_rate: 0.0, centuries: 1, fifties: 15, highest_score: 101, best_bowling: None, price_crores: 6.0 },
    SeedPlayer { name: "Deepak Chahar", team: "CSK", role: "Bowler", batting_style: "Right-hand bat", bowling_style: Some("Right-arm fast-medium"), nationality: "India", age: 31, matches_played: 76, runs_scored: 154, wickets_taken: 59, batting_average: 12.83, bowling_average: 27.81, strike_rate: 116.54, economy_rate: 7.28, centuries: 0, fifties: 0, highest_score: 39, best_bowling: Some("6/7"), price_crores: 14.0 },
    SeedPlayer { name: "Moeen Ali", team: "CSK", role: "All Rounder", batting_style: "Left-hand bat", bowling_style: Some("Right-arm off-break"), nationality: "England", age: 36, matches_played: 92, runs_scored: 1162, wickets_taken: 25, batting_average: 23.24, bowling_average: 32.12, strike_rate: 157.59, economy_rate: 7.65, centuries: 0, fifties: 5, highest_score: 93, best_bowling: Some("3/7"), price_crores: 7.0 },
    // Royal Challengers Bangalore
    SeedPlayer { name: "Virat Kohli", team: "RCB", role: "Batsman", batting_style: "Right-hand bat", bowling_style: Some("Right-arm medium"), nationality: "India", age: 35, matches_played: 237, runs_scored: 7263, wickets_taken: 4, batting_average: 37.25, bowling_average: 52.5, strike_rate: 131.97, economy_rate: 7.39, centuries: 5, fifties: 50, highest_score: 113, best_bowling: Some("4/13"), price_crores: 17.0 },
    SeedPlayer { name: "Glenn Maxwell", team: "RCB", role: "All Rounder", batting_style: "Right-hand bat", bowling_style: Some("Right-arm off-break"), nationality: "Australia", age: 35, matches_played: 120, runs_scored: 2771, wickets_taken: 32, batting_average: 26.44, bowling_average: 28.84, strike_rate: 154.67, economy_rate: 7.45, centuries: 0, fifties: 16, highest_score: 95, best_bowling: Some("4/3"), price_crores: 11.0 },
    SeedPlayer { name: "Mohammed Siraj", team: "RCB", role: "Bowler", batting_style: "Right-hand bat", bowling_style: Some("Right-arm fast"), nationality: "India", age: 30, matches_played: 93, runs_scored: 89, wickets_taken: 93, batting_average: 8.9, bowling_average: 26.77, strike_rate: 120.43, economy_rate: 8.32, centuries: 0, fifties: 0, highest_score: 22, best_bowling: Some("4/21"), price_crores: 7.0 },
    SeedPlayer { name: "Faf du Plessis", team: "RCB", role: "Batsman", batting_style: "Right-hand bat", bowling_style: Some("Right-arm medium"), nationality: "South Africa", age: 39, matches_played: 100, runs_scored: 2935, wickets_taken: 0, batting_average: 34.94, bowling_average: 0.0, strike_rate: 131.09, economy_rate: 0.0, centuries: 2, fifties: 22, highest_score: 120, best_bowling: None, price_crores: 7.0 },
    // Kolkata Knight Riders
    SeedPlayer { name: "Shreyas Iyer", team: "KKR", role: "Batsman", batting_style: "Right-hand bat", bowling_style: Some("Right-arm leg-break"), nationality: "India", age: 29, matches_played: 115, runs_scored: 3127, wickets_taken: 0, batting_average: 31.27, bowling_average: 0.0, strike_rate: 123.89, economy_rate: 0.0, centuries: 2, fifties: 23, highest_score: 96, best_bowling: None, price_crores: 12.25 },
    SeedPlayer { name: "Andre Russell", team: "KKR", role: "All Rounder", batting_style: "Right-hand bat", bowling_style: Some("Right-arm fast"), nationality: "West Indies", age: 36, matches_played: 140, runs_scored: 2556, wickets_taken: 73, batting_average: 29.49, bowling_average: 24.89, strike_rate: 179.33, economy_rate: 8.76, centuries: 0, fifties: 11, highest_score: 88, best_bowling: Some("4/20"), price_crores: 12.0 },
    SeedPlayer { name: "Sunil Narine", team: "KKR", role: "All Rounder", batting_style: "Left-hand bat", bowling_style: Some("Right-arm off-break"), nationality: "West Indies", age: 35, matches_played: 162, runs_scored: 1025, wickets_taken: 180, batting_average: 15.54, bowling_average: 24.63, strike_rate: 168.3, economy_rate: 6.67, centuries: 0, fifties: 4, highest_score: 75, best_bowling: Some("4/21"), price_crores: 6.0 },
];

// team1, team2, venue, date, toss winner, decision, scores, wickets, winner, pitch, weather
type SeedMatch = (&'static str, &'static str, &'static str, (i32, u32, u32), &'static str, &'static str, (i32, i32), (i32, i32), &'static str, &'static str, &'static str);

const MATCHES: [SeedMatch; 2] = [
    ("MI", "CSK", "Wankhede Stadium", (2024, 4, 14), "CSK", "field", (186, 206), (6, 4), "CSK", "flat", "sunny"),
    ("RCB", "KKR", "M. Chinnaswamy Stadium", (2024, 3, 29), "KKR", "field", (182, 186), (6, 3), "KKR", "balanced", "humid"),
];

/// Insert the sample teams, squads and results. Safe to call on every start.
pub fn seed_sample_data(db: &Database) -> Result<()> {
    let mut conn = db.conn()?;
    let tx = conn.transaction()?;
    let now = Utc::now();

    for t in &TEAMS {
        tx.execute(
            "INSERT OR IGNORE INTO teams (
                name, short_name, home_ground, captain, coach, founded_year,
                titles, matches_played, wins, losses, created_at
             ) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11)",
            params![
                t.name,
                t.short_name,
                t.home_ground,
                t.captain,
                t.coach,
                t.founded_year,
                t.titles,
                t.matches_played,
                t.wins,
                t.losses,
                now,
            ],
        )?;
    }

    let team_id = |short: &str| -> Result<i64> {
        tx.query_row(
            "SELECT id FROM teams WHERE short_name = ?1",
            params![short],
            |row| row.get(0),
        )
        .with_context(|| format!("sample team {short} missing"))
    };

    let mut players_inserted = 0;
    for p in &PLAYERS {
        players_inserted += tx.execute(
            "INSERT OR IGNORE INTO players (
                name, team_id, role, batting_style, bowling_style, nationality, age,
                matches_played, runs_scored, wickets_taken, batting_average,
                bowling_average, strike_rate, economy_rate, centuries, fifties,
                highest_score, best_bowling, price_crores, created_at
             ) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17,?18,?19,?20)",
            params![
                p.name,
                team_id(p.team)?,
                p.role,
                p.batting_style,
                p.bowling_style,
                p.nationality,
                p.age,
                p.matches_played,
                p.runs_scored,
                p.wickets_taken,
                p.batting_average,
                p.bowling_average,
                p.strike_rate,
                p.economy_rate,
                p.centuries,
                p.fifties,
                p.highest_score,
                p.best_bowling,
                p.price_crores,
                now,
            ],
        )?;
    }

    for (t1, t2, venue, (y, m, d), toss, decision, scores, wickets, winner, pitch, weather) in MATCHES {
        let date = NaiveDate::from_ymd_opt(y, m, d)
            .with_context(|| format!("invalid sample match date {y}-{m}-{d}"))?;
        tx.execute(
            "INSERT OR IGNORE INTO matches (
                team1_id, team2_id, venue, match_date, toss_winner_id, toss_decision,
                team1_score, team2_score, team1_wickets, team2_wickets, winner_id,
                pitch_type, weather, overs, created_at
             ) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,20,?14)",
            params![
                team_id(t1)?,
                team_id(t2)?,
                venue,
                date,
                team_id(toss)?,
                decision,
                scores.0,
                scores.1,
                wickets.0,
                wickets.1,
                team_id(winner)?,
                pitch,
                weather,
                now,
            ],
        )?;
    }

    tx.commit()?;
    debug!("Sample data seeded ({} new players)", players_inserted);
    Ok(())
}
