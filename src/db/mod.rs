use anyhow::{anyhow, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

pub mod models;
pub mod seed;
use models::*;

/// Thread-safe SQLite connection pool (single connection with mutex)
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

/// Optional filters for `GET /api/players`
#[derive(Debug, Clone, Default)]
pub struct PlayerFilter {
    pub team_id: Option<i64>,
    pub role: Option<String>,
}

impl Database {
    /// Open (or create) the SQLite database at the given path
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        let db = Database {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("database connection mutex poisoned"))
    }

    /// Run schema migrations (idempotent)
    fn run_migrations(&self) -> Result<()> {
        self.conn()?.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    /// Cheap liveness probe for the health endpoint
    pub fn ping(&self) -> Result<()> {
        self.conn()?.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }

    // ── Teams ─────────────────────────────────────────────────────────────────

    /// List all teams ordered by name
    pub fn list_teams(&self) -> Result<Vec<Team>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("SELECT {TEAM_COLUMNS} FROM teams t ORDER BY t.name"))?;
        let teams = stmt
            .query_map([], map_team)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(teams)
    }

    pub fn get_team(&self, id: i64) -> Result<Option<Team>> {
        let conn = self.conn()?;
        let team = conn
            .query_row(
                &format!("SELECT {TEAM_COLUMNS} FROM teams t WHERE t.id = ?1"),
                params![id],
                map_team,
            )
            .optional()?;
        Ok(team)
    }

    /// Team row plus squad aggregates
    pub fn team_stats(&self, id: i64) -> Result<Option<TeamStats>> {
        let conn = self.conn()?;
        let stats = conn
            .query_row(
                &format!(
                    "SELECT {TEAM_COLUMNS},
                            COUNT(DISTINCT p.id),
                            AVG(p.batting_average),
                            AVG(p.bowling_average),
                            SUM(p.runs_scored),
                            SUM(p.wickets_taken)
                     FROM teams t
                     LEFT JOIN players p ON t.id = p.team_id
                     WHERE t.id = ?1
                     GROUP BY t.id"
                ),
                params![id],
                |row| {
                    Ok(TeamStats {
                        team: map_team(row)?,
                        total_players: row.get(13)?,
                        avg_batting_avg: row.get(14)?,
                        avg_bowling_avg: row.get(15)?,
                        total_runs: row.get(16)?,
                        total_wickets: row.get(17)?,
                    })
                },
            )
            .optional()?;
        Ok(stats)
    }

    // ── Players ───────────────────────────────────────────────────────────────

    /// List players, best run-scorers first
    pub fn list_players(&self, filter: &PlayerFilter) -> Result<Vec<Player>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {PLAYER_COLUMNS}
             FROM players p
             LEFT JOIN teams t ON p.team_id = t.id
             WHERE (?1 IS NULL OR p.team_id = ?1)
               AND (?2 IS NULL OR p.role = ?2)
             ORDER BY p.runs_scored DESC, p.wickets_taken DESC"
        ))?;
        let players = stmt
            .query_map(params![filter.team_id, filter.role], map_player)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(players)
    }

    pub fn get_player(&self, id: i64) -> Result<Option<Player>> {
        let conn = self.conn()?;
        let player = conn
            .query_row(
                &format!(
                    "SELECT {PLAYER_COLUMNS}
                     FROM players p
                     LEFT JOIN teams t ON p.team_id = t.id
                     WHERE p.id = ?1"
                ),
                params![id],
                map_player,
            )
            .optional()?;
        Ok(player)
    }

    // ── Matches ───────────────────────────────────────────────────────────────

    /// List recent matches, newest first
    pub fn list_matches(&self, limit: i64) -> Result<Vec<MatchRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT m.id, m.team1_id, m.team2_id, m.venue, m.match_date,
                    m.toss_winner_id, m.toss_decision, m.team1_score, m.team2_score,
                    m.team1_wickets, m.team2_wickets, m.winner_id,
                    m.pitch_type, m.weather, m.overs,
                    t1.name, t1.short_name, t2.name, t2.short_name,
                    tw.name, w.name
             FROM matches m
             LEFT JOIN teams t1 ON m.team1_id = t1.id
             LEFT JOIN teams t2 ON m.team2_id = t2.id
             LEFT JOIN teams tw ON m.toss_winner_id = tw.id
             LEFT JOIN teams w ON m.winner_id = w.id
             ORDER BY m.match_date DESC
             LIMIT ?1",
        )?;
        let matches = stmt
            .query_map(params![limit], map_match)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(matches)
    }

    // ── Predictions ───────────────────────────────────────────────────────────

    /// Persist a served prediction
    pub fn insert_prediction(&self, rec: &PredictionRecord) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO predictions (
                kind, strategy, team1, team2, venue, predicted_score, confidence,
                team1_win_probability, team2_win_probability, created_at
             ) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10)",
            params![
                rec.kind,
                rec.strategy,
                rec.team1,
                rec.team2,
                rec.venue,
                rec.predicted_score,
                rec.confidence,
                rec.team1_win_probability,
                rec.team2_win_probability,
                rec.created_at,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// List recent predictions
    pub fn list_predictions(&self, limit: i64) -> Result<Vec<PredictionRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, kind, strategy, team1, team2, venue, predicted_score, confidence,
                    team1_win_probability, team2_win_probability, created_at
             FROM predictions ORDER BY created_at DESC, id DESC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit], map_prediction)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

// ── SQL helpers ────────────────────────────────────────────────────────────────

const TEAM_COLUMNS: &str = "t.id, t.name, t.short_name, t.logo_url, t.home_ground, t.captain, \
     t.coach, t.founded_year, t.titles, t.matches_played, t.wins, t.losses, t.created_at";

const PLAYER_COLUMNS: &str = "p.id, p.name, p.team_id, p.role, p.batting_style, p.bowling_style, \
     p.image_url, p.nationality, p.age, p.matches_played, p.runs_scored, p.wickets_taken, \
     p.batting_average, p.bowling_average, p.strike_rate, p.economy_rate, p.centuries, \
     p.fifties, p.highest_score, p.best_bowling, p.price_crores, p.created_at, \
     t.name, t.short_name";

fn map_team(row: &rusqlite::Row) -> rusqlite::Result<Team> {
    Ok(Team {
        id: row.get(0)?,
        name: row.get(1)?,
        short_name: row.get(2)?,
        logo_url: row.get(3)?,
        home_ground: row.get(4)?,
        captain: row.get(5)?,
        coach: row.get(6)?,
        founded_year: row.get(7)?,
        titles: row.get(8)?,
        matches_played: row.get(9)?,
        wins: row.get(10)?,
        losses: row.get(11)?,
        created_at: row.get(12)?,
    })
}

fn map_player(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        team_id: row.get(2)?,
        role: row.get(3)?,
        batting_style: row.get(4)?,
        bowling_style: row.get(5)?,
        image_url: row.get(6)?,
        nationality: row.get(7)?,
        age: row.get(8)?,
        matches_played: row.get(9)?,
        runs_scored: row.get(10)?,
        wickets_taken: row.get(11)?,
        batting_average: row.get(12)?,
        bowling_average: row.get(13)?,
        strike_rate: row.get(14)?,
        economy_rate: row.get(15)?,
        centuries: row.get(16)?,
        fifties: row.get(17)?,
        highest_score: row.get(18)?,
        best_bowling: row.get(19)?,
        price_crores: row.get(20)?,
        created_at: row.get(21)?,
        team_name: row.get(22)?,
        team_short_name: row.get(23)?,
    })
}

fn map_match(row: &rusqlite::Row) -> rusqlite::Result<MatchRecord> {
    Ok(MatchRecord {
        id: row.get(0)?,
        team1_id: row.get(1)?,
        team2_id: row.get(2)?,
        venue: row.get(3)?,
        match_date: row.get(4)?,
        toss_winner_id: row.get(5)?,
        toss_decision: row.get(6)?,
        team1_score: row.get(7)?,
        team2_score: row.get(8)?,
        team1_wickets: row.get(9)?,
        team2_wickets: row.get(10)?,
        winner_id: row.get(11)?,
        pitch_type: row.get(12)?,
        weather: row.get(13)?,
        overs: row.get(14)?,
        team1_name: row.get(15)?,
        team1_short: row.get(16)?,
        team2_name: row.get(17)?,
        team2_short: row.get(18)?,
        toss_winner_name: row.get(19)?,
        winner_name: row.get(20)?,
    })
}

fn map_prediction(row: &rusqlite::Row) -> rusqlite::Result<PredictionRecord> {
    Ok(PredictionRecord {
        id: row.get(0)?,
        kind: row.get(1)?,
        strategy: row.get(2)?,
        team1: row.get(3)?,
        team2: row.get(4)?,
        venue: row.get(5)?,
        predicted_score: row.get(6)?,
        confidence: row.get(7)?,
        team1_win_probability: row.get(8)?,
        team2_win_probability: row.get(9)?,
        created_at: row.get(10)?,
    })
}

/// SQLite schema (idempotent CREATE IF NOT EXISTS)
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS teams (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    name           TEXT    UNIQUE NOT NULL,
    short_name     TEXT    NOT NULL,
    logo_url       TEXT,
    home_ground    TEXT,
    captain        TEXT,
    coach          TEXT,
    founded_year   INTEGER,
    titles         INTEGER NOT NULL DEFAULT 0,
    matches_played INTEGER NOT NULL DEFAULT 0,
    wins           INTEGER NOT NULL DEFAULT 0,
    losses         INTEGER NOT NULL DEFAULT 0,
    created_at     TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS players (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    name            TEXT    NOT NULL,
    team_id         INTEGER,
    role            TEXT    NOT NULL,
    batting_style   TEXT,
    bowling_style   TEXT,
    image_url       TEXT,
    nationality     TEXT,
    age             INTEGER,
    matches_played  INTEGER NOT NULL DEFAULT 0,
    runs_scored     INTEGER NOT NULL DEFAULT 0,
    wickets_taken   INTEGER NOT NULL DEFAULT 0,
    batting_average REAL    NOT NULL DEFAULT 0,
    bowling_average REAL    NOT NULL DEFAULT 0,
    strike_rate     REAL    NOT NULL DEFAULT 0,
    economy_rate    REAL    NOT NULL DEFAULT 0,
    centuries       INTEGER NOT NULL DEFAULT 0,
    fifties         INTEGER NOT NULL DEFAULT 0,
    highest_score   INTEGER NOT NULL DEFAULT 0,
    best_bowling    TEXT,
    price_crores    REAL    NOT NULL DEFAULT 0,
    created_at      TEXT    NOT NULL,
    UNIQUE (name, team_id),
    FOREIGN KEY (team_id) REFERENCES teams(id)
);

CREATE TABLE IF NOT EXISTS matches (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    team1_id       INTEGER NOT NULL,
    team2_id       INTEGER NOT NULL,
    venue          TEXT,
    match_date     TEXT,
    toss_winner_id INTEGER,
    toss_decision  TEXT,
    team1_score    INTEGER,
    team2_score    INTEGER,
    team1_wickets  INTEGER,
    team2_wickets  INTEGER,
    winner_id      INTEGER,
    pitch_type     TEXT,
    weather        TEXT,
    overs          INTEGER NOT NULL DEFAULT 20,
    created_at     TEXT    NOT NULL,
    UNIQUE (team1_id, team2_id, match_date),
    FOREIGN KEY (team1_id) REFERENCES teams(id),
    FOREIGN KEY (team2_id) REFERENCES teams(id),
    FOREIGN KEY (toss_winner_id) REFERENCES teams(id),
    FOREIGN KEY (winner_id) REFERENCES teams(id)
);

CREATE TABLE IF NOT EXISTS predictions (
    id                    INTEGER PRIMARY KEY AUTOINCREMENT,
    kind                  TEXT    NOT NULL,
    strategy              TEXT    NOT NULL,
    team1                 TEXT    NOT NULL,
    team2                 TEXT    NOT NULL,
    venue                 TEXT    NOT NULL,
    predicted_score       INTEGER,
    confidence            REAL,
    team1_win_probability REAL,
    team2_win_probability REAL,
    created_at            TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_players_team ON players(team_id);
CREATE INDEX IF NOT EXISTS idx_matches_date ON matches(match_date);
CREATE INDEX IF NOT EXISTS idx_predictions_created ON predictions(created_at);
"#;

#[cfg(test)]
impl Database {
    /// In-memory handle whose connection lock is poisoned, so every query fails.
    pub(crate) fn poisoned() -> Self {
        let db = Database::open(":memory:").unwrap();
        let conn = Arc::clone(&db.conn);
        let _ = std::thread::spawn(move || {
            let _guard = conn.lock().unwrap();
            panic!("poison the connection lock");
        })
        .join();
        db
    }
}
