pub mod context;
pub mod model;
pub mod noise;
pub mod score;
pub mod strategy;
pub mod tables;
pub mod win;

pub use context::{MatchContext, PitchType, TeamId, VenueId, WeatherCondition};
pub use noise::NoiseProvider;
pub use score::ScorePrediction;
pub use strategy::{HeuristicStrategy, PredictionStrategy, TrainedModelStrategy};
pub use tables::StaticData;
pub use win::WinPrediction;
