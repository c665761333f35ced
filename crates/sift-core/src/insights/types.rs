//! Core types for the insight pipeline

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::dataset::Metric;
use crate::visualization::Visualization;

use super::engine::Insight;

/// Types of insights that can be generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsightType {
    /// Two variables move together
    Correlation,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::Correlation => "CORRELATION",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CORRELATION" | "correlation" => Ok(InsightType::Correlation),
            _ => Err(format!("Unknown insight type: {}", s)),
        }
    }
}

/// Where an insight instance is in its screen → generate lifecycle
///
/// A visualization only exists in the `Relevant` stage, so an insight can
/// never carry a visual while being irrelevant.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Stage {
    /// Not screened yet; reads as not relevant
    #[default]
    Unscreened,
    /// Passed the feasibility screen, not generated yet
    Screened,
    /// Rejected by screening or generation
    Irrelevant,
    /// Generated and accepted
    Relevant(Visualization),
}

impl Stage {
    pub fn is_relevant(&self) -> bool {
        matches!(self, Stage::Screened | Stage::Relevant(_))
    }

    pub fn visual(&self) -> Option<&Visualization> {
        match self {
            Stage::Relevant(visual) => Some(visual),
            _ => None,
        }
    }
}

/// A candidate insight proposed from domain knowledge, not yet validated
#[derive(Debug)]
pub struct ProposedInsight {
    /// The insight instance to screen and generate
    pub insight: Box<dyn Insight>,
    /// Metrics the insight will use
    pub metrics: Vec<Metric>,
}

impl ProposedInsight {
    pub fn new(insight: Box<dyn Insight>, metrics: Vec<Metric>) -> Self {
        Self { insight, metrics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insight_type_serialization() {
        assert_eq!(InsightType::Correlation.as_str(), "CORRELATION");
        assert_eq!(
            InsightType::from_str("correlation").unwrap(),
            InsightType::Correlation
        );
        assert!(InsightType::from_str("regression").is_err());
        assert_eq!(
            serde_json::to_value(InsightType::Correlation).unwrap(),
            "CORRELATION"
        );
    }

    #[test]
    fn test_stage_relevance() {
        assert!(!Stage::Unscreened.is_relevant());
        assert!(!Stage::Irrelevant.is_relevant());
        assert!(Stage::Screened.is_relevant());
        assert!(Stage::default().visual().is_none());
        assert!(Stage::Screened.visual().is_none());
    }
}
