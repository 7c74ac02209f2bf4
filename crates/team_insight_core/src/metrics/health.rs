//! Team health composition and classification.
//!
//! # Invariants
//! - Health lies in `[0, 100]` and is non-increasing in every risk.
//! - Status bands do not overlap: `>= 70` Healthy, `>= 40` At Risk, else
//!   Critical. Color bands follow the same thresholds.

use crate::metrics::MAX_CATEGORY_RISK;
use serde::{Deserialize, Serialize};

/// Lowest health still classified as [`HealthStatus::Healthy`].
pub const HEALTHY_THRESHOLD: f64 = 70.0;
/// Lowest health still classified as [`HealthStatus::AtRisk`].
pub const AT_RISK_THRESHOLD: f64 = 40.0;

const MAX_HEALTH: f64 = 100.0;

/// The three category risks that make up team health.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskBreakdown {
    pub workload_risk: f64,
    pub meeting_risk: f64,
    pub communication_risk: f64,
}

impl RiskBreakdown {
    pub fn total(&self) -> f64 {
        self.workload_risk + self.meeting_risk + self.communication_risk
    }
}

/// `100 - (sum of risks)`, clamped to `[0, 100]`.
pub fn team_health(risks: &RiskBreakdown) -> f64 {
    (MAX_HEALTH - risks.total()).clamp(0.0, MAX_HEALTH)
}

/// Coarse classification of a health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    AtRisk,
    Critical,
}

impl HealthStatus {
    /// Classifies a health score.
    pub fn from_health(health: f64) -> Self {
        if health >= HEALTHY_THRESHOLD {
            Self::Healthy
        } else if health >= AT_RISK_THRESHOLD {
            Self::AtRisk
        } else {
            Self::Critical
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::AtRisk => "At Risk",
            Self::Critical => "Critical",
        }
    }

    /// One-sentence guidance shown next to the score.
    pub fn description(self) -> &'static str {
        match self {
            Self::Healthy => {
                "Your team is performing well with balanced workload and healthy communication."
            }
            Self::AtRisk => "Some areas need attention. Consider reviewing workload distribution.",
            Self::Critical => {
                "Critical issues detected. Immediate action recommended to prevent burnout."
            }
        }
    }

    pub fn color(self) -> HealthColor {
        match self {
            Self::Healthy => HealthColor::Green,
            Self::AtRisk => HealthColor::Yellow,
            Self::Critical => HealthColor::Red,
        }
    }
}

/// Color band of a health score, independent of any renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthColor {
    Green,
    Yellow,
    Red,
}

impl HealthColor {
    /// CSS `hsl()` value used by the web dashboard theme.
    pub fn hsl(self) -> &'static str {
        match self {
            Self::Green => "hsl(142, 76%, 36%)",
            Self::Yellow => "hsl(45, 93%, 47%)",
            Self::Red => "hsl(0, 84%, 60%)",
        }
    }
}

/// Status label for a health score.
pub fn health_status(health: f64) -> HealthStatus {
    HealthStatus::from_health(health)
}

/// Color band for a health score.
pub fn health_color(health: f64) -> HealthColor {
    HealthStatus::from_health(health).color()
}

/// Severity of a single category risk relative to its maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Share above two thirds of the category maximum is high, above one
    /// third is medium.
    pub fn from_risk(risk: f64) -> Self {
        let share = risk / MAX_CATEGORY_RISK * 100.0;
        if share > 66.0 {
            Self::High
        } else if share > 33.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}
