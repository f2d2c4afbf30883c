//! Two-way win probability from static team ratings.

use super::context::{MatchContext, TeamId};
use super::tables::StaticData;

pub const TOSS_ADVANTAGE: i32 = 5;
pub const HOME_ADVANTAGE: i32 = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct WinFactors {
    pub team1_rating: i32,
    pub team2_rating: i32,
    pub toss_advantage: i32,
    pub home_advantage: i32,
    /// Team playing at its home ground, if either.
    pub home_team: Option<TeamId>,
    pub toss_winner: TeamId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WinPrediction {
    pub team1_win_probability: f64,
    pub team2_win_probability: f64,
    pub factors: Option<WinFactors>,
}

impl WinPrediction {
    /// Split where team 2's share is the complement of team 1's.
    pub fn from_team1(p1: f64) -> Self {
        WinPrediction {
            team1_win_probability: p1,
            team2_win_probability: 1.0 - p1,
            factors: None,
        }
    }

    fn with_factors(mut self, factors: WinFactors) -> Self {
        self.factors = Some(factors);
        self
    }
}

pub fn estimate_win(ctx: &MatchContext, data: &StaticData) -> WinPrediction {
    let rating1 = data.team_ratings.rating(&ctx.team1) as i32;
    let rating2 = data.team_ratings.rating(&ctx.team2) as i32;
    let toss_advantage = if ctx.toss_winner == ctx.team1 {
        TOSS_ADVANTAGE
    } else {
        -TOSS_ADVANTAGE
    };
    let home_team = data.home_team(&ctx.venue).cloned();
    let home_advantage = if home_team.as_ref() == Some(&ctx.team1) {
        HOME_ADVANTAGE
    } else {
        0
    };

    // A team rated below the toss penalty would otherwise go negative.
    let adjusted1 = (rating1 + toss_advantage + home_advantage).max(0);
    let total = adjusted1 + rating2;
    let p1 = if total == 0 {
        0.5
    } else {
        adjusted1 as f64 / total as f64
    };

    WinPrediction::from_team1(p1).with_factors(WinFactors {
        team1_rating: rating1,
        team2_rating: rating2,
        toss_advantage,
        home_advantage,
        home_team,
        toss_winner: ctx.toss_winner.clone(),
    })
}
