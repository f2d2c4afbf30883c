use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How `/api/predict_*` produce their numbers
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Static factor tables plus random jitter
    Heuristic,
    /// Regression artifacts loaded from SCORE_MODEL_PATH / WIN_MODEL_PATH
    Trained,
}

/// Cricket match prediction API
#[derive(Parser, Debug, Clone)]
#[command(name = "cricket-predictor", version, about)]
pub struct Config {
    /// API listen address
    #[arg(long, env = "API_ADDR", default_value = "0.0.0.0:5000")]
    pub api_addr: String,

    /// SQLite database path
    #[arg(long, env = "DATABASE_PATH", default_value = "cricket.db")]
    pub database_path: String,

    /// Prediction strategy
    #[arg(long, env = "STRATEGY", value_enum, default_value = "heuristic")]
    pub strategy: StrategyKind,

    /// JSON file overriding the built-in team/venue/weather/pitch tables
    #[arg(long, env = "TABLES_PATH")]
    pub tables_path: Option<PathBuf>,

    /// Score model artifact (trained strategy only)
    #[arg(long, env = "SCORE_MODEL_PATH", default_value = "models/score_model.json")]
    pub score_model_path: PathBuf,

    /// Win model artifact (trained strategy only)
    #[arg(long, env = "WIN_MODEL_PATH", default_value = "models/win_model.json")]
    pub win_model_path: PathBuf,

    /// Seed for score jitter; unset means a fresh thread-local RNG
    #[arg(long, env = "NOISE_SEED")]
    pub noise_seed: Option<u64>,

    /// Insert the sample teams, players and matches on startup
    #[arg(
        long,
        env = "SEED_SAMPLE_DATA",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub seed_sample_data: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_addr.parse::<std::net::SocketAddr>().is_err() {
            anyhow::bail!("api_addr must be a socket address like 0.0.0.0:5000");
        }
        if self.database_path.trim().is_empty() {
            anyhow::bail!("database_path must not be empty");
        }
        if let Some(path) = &self.tables_path {
            if !path.is_file() {
                anyhow::bail!("tables_path {} does not exist", path.display());
            }
        }
        if self.strategy == StrategyKind::Trained {
            for path in [&self.score_model_path, &self.win_model_path] {
                if !path.is_file() {
                    anyhow::bail!(
                        "model artifact {} is required by the trained strategy",
                        path.display()
                    );
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["cricket-predictor"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_are_valid() {
        let cfg = parse(&["--database-path", "test.db"]);
        assert_eq!(cfg.strategy, StrategyKind::Heuristic);
        assert!(cfg.seed_sample_data);
        assert!(cfg.noise_seed.is_none());
        cfg.validate().unwrap();
    }

    #[test]
    fn strategy_and_seed_flags() {
        let cfg = parse(&["--strategy", "trained", "--noise-seed", "42", "--seed-sample-data", "false"]);
        assert_eq!(cfg.strategy, StrategyKind::Trained);
        assert_eq!(cfg.noise_seed, Some(42));
        assert!(!cfg.seed_sample_data);
    }

    #[test]
    fn bad_address_is_rejected() {
        let cfg = parse(&["--api-addr", "localhost"]);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn trained_strategy_needs_artifacts() {
        let cfg = parse(&[
            "--strategy",
            "trained",
            "--score-model-path",
            "/nonexistent/score.json",
        ]);
        let err = cfg.validate().unwrap_err().to_string();
        assert!(err.contains("/nonexistent/score.json"));
    }

    #[test]
    fn missing_tables_file_is_rejected() {
        let cfg = parse(&["--tables-path", "/nonexistent/tables.json"]);
        assert!(cfg.validate().is_err());
    }
}
