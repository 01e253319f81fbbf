//! Trader behavior profiles
//!
//! Profiles are static per user; nothing derives them from trades.

use serde::{Deserialize, Serialize};

/// Scores below this are flagged high risk
pub const HIGH_RISK_BELOW: u8 = 60;

/// Scores below this (and at or above [`HIGH_RISK_BELOW`]) are moderate
pub const MODERATE_RISK_BELOW: u8 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
    Disciplined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    Revenge,
    Overtrading,
    Overconfidence,
    NoSl,
    Exposure,
    Discipline,
    Patience,
    Strategy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertSeverity {
    Critical,
    High,
    Moderate,
    Low,
    Positive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorAlert {
    pub id: String,
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub message: String,
    pub suggestion: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorMetrics {
    pub sl_usage_percent: f64,
    pub win_streak: u32,
    pub trades_last_hour: u32,
    /// Display label ("90s", "N/A")
    pub avg_loss_recovery: String,
    pub exposure_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorProfile {
    /// 0–100
    pub score: u8,
    pub risk_level: RiskLevel,
    pub metrics: BehaviorMetrics,
    pub alerts: Vec<BehaviorAlert>,
}

/// Headline band derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreBand {
    HighRisk,
    ModerateRisk,
    Disciplined,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        if score < HIGH_RISK_BELOW {
            ScoreBand::HighRisk
        } else if score < MODERATE_RISK_BELOW {
            ScoreBand::ModerateRisk
        } else {
            ScoreBand::Disciplined
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            ScoreBand::HighRisk => "HIGH RISK DETECTED",
            ScoreBand::ModerateRisk => "MODERATE RISK",
            ScoreBand::Disciplined => "DISCIPLINED TRADER",
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, ScoreBand::Disciplined)
    }
}

impl BehaviorProfile {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }

    /// Alerts that need attention, most severe first
    pub fn warnings(&self) -> Vec<&BehaviorAlert> {
        let mut warnings: Vec<&BehaviorAlert> = self
            .alerts
            .iter()
            .filter(|a| a.severity != AlertSeverity::Positive)
            .collect();
        warnings.sort_by_key(|a| a.severity as u8);
        warnings
    }
}

/// What the behavior screen shows for a user
#[derive(Debug, Clone, Copy)]
pub enum BehaviorView<'a> {
    /// The user has no trading history yet
    NoData,
    Profile {
        profile: &'a BehaviorProfile,
        band: ScoreBand,
    },
}

impl<'a> BehaviorView<'a> {
    pub fn for_profile(profile: Option<&'a BehaviorProfile>) -> Self {
        match profile {
            Some(profile) => BehaviorView::Profile {
                profile,
                band: profile.band(),
            },
            None => BehaviorView::NoData,
        }
    }
}
