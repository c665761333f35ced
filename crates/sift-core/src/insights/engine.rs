//! Insight Engine - proposes, screens and generates insights for a dataset

use std::fmt;
use std::sync::Arc;

use crate::config::PipelineConfig;
use crate::dataset::{Dataset, Metric};
use crate::visualization::Visualization;

use super::types::{InsightType, ProposedInsight};
use super::CorrelationInsight;

/// Capabilities every insight variant provides
///
/// Failures inside `fsfa` and `generate` are never returned. They show up
/// only as `relevant() == false`, with the cause logged.
pub trait Insight: fmt::Debug + Send + Sync {
    /// New instance of this variant bound to `dataset` and `metrics`
    fn instantiate(&self, dataset: Arc<Dataset>, metrics: Vec<Metric>) -> Box<dyn Insight>;

    /// Unique identifier for this insight type
    fn insight_type(&self) -> InsightType;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Metrics the insight is computed over
    fn metrics(&self) -> &[Metric];

    /// Visualization for the finding, present once generation succeeded
    fn visual(&self) -> Option<&Visualization>;

    fn relevant(&self) -> bool;

    /// Fast statistical feasibility analysis
    ///
    /// Decides from the metric descriptors alone whether the insight is worth
    /// generating, without touching the data.
    fn fsfa(&mut self);

    /// Run the full analysis and build the visualization
    fn generate(&mut self);

    /// Candidate insights of this variant for `dataset`
    fn propose(&self, dataset: &Arc<Dataset>) -> Vec<ProposedInsight>;
}

/// The main insight engine that orchestrates the pipeline
pub struct InsightEngine {
    insights: Vec<Box<dyn Insight>>,
    warn_above: usize,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create a new insight engine with built-in insight types
    pub fn new() -> Self {
        Self::from_config(&PipelineConfig::default())
    }

    /// Create an engine whose built-in insights use `config`
    pub fn from_config(config: &PipelineConfig) -> Self {
        let mut engine = Self::empty();
        engine.warn_above = config.proposals.warn_above;

        // Register built-in insights
        engine.register(Box::new(CorrelationInsight::with_threshold(
            config.correlation.threshold,
        )));

        engine
    }

    /// Engine without any registered insight
    pub fn empty() -> Self {
        Self {
            insights: vec![],
            warn_above: PipelineConfig::default().proposals.warn_above,
        }
    }

    /// Register an insight variant
    pub fn register(&mut self, insight: Box<dyn Insight>) {
        self.insights.push(insight);
    }

    /// Get list of registered insight types, in registration order
    pub fn insight_types(&self) -> Vec<InsightType> {
        self.insights.iter().map(|i| i.insight_type()).collect()
    }

    /// Get names of registered insights, in registration order
    pub fn insight_names(&self) -> Vec<&'static str> {
        self.insights.iter().map(|i| i.name()).collect()
    }

    /// Proposals from every registered variant, in registration order
    pub fn propose(&self, dataset: &Arc<Dataset>) -> Vec<ProposedInsight> {
        let mut all_proposals = vec![];

        for insight in &self.insights {
            let proposals = insight.propose(dataset);
            if proposals.len() > self.warn_above {
                tracing::warn!(
                    insight = insight.name(),
                    count = proposals.len(),
                    limit = self.warn_above,
                    "Proposal count grows quadratically with metric count"
                );
            }
            tracing::debug!(
                insight = insight.name(),
                count = proposals.len(),
                "Proposals generated"
            );
            all_proposals.extend(proposals);
        }

        all_proposals
    }

    /// Run the full pipeline and keep only relevant insights
    pub fn generate_insights(&self, dataset: &Arc<Dataset>) -> Vec<Box<dyn Insight>> {
        let proposals = self.propose(dataset);
        let proposed = proposals.len();
        let mut insights = vec![];

        for ProposedInsight { mut insight, .. } in proposals {
            insight.fsfa();
            if !insight.relevant() {
                continue;
            }

            insight.generate();
            if !insight.relevant() {
                continue;
            }

            insights.push(insight);
        }

        tracing::info!(
            proposed,
            relevant = insights.len(),
            "Insight generation complete"
        );
        insights
    }
}

/// Propose insights for `dataset` with the default engine
pub fn propose(dataset: &Arc<Dataset>) -> Vec<ProposedInsight> {
    InsightEngine::new().propose(dataset)
}

/// Generate relevant insights for `dataset` with the default engine
pub fn generate_insights(dataset: &Arc<Dataset>) -> Vec<Box<dyn Insight>> {
    InsightEngine::new().generate_insights(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Metric;
    use crate::insights::Stage;

    fn dataset(columns: &[(&str, Vec<f64>)]) -> Arc<Dataset> {
        let mut d = Dataset::new();
        for (name, values) in columns {
            d.add_metric(Metric::float(*name), values.clone()).unwrap();
        }
        Arc::new(d)
    }

    /// Variant that proposes one insight per Float metric and accepts all of them
    #[derive(Debug, Default)]
    struct EveryMetric {
        metrics: Vec<Metric>,
        stage: Stage,
    }

    impl Insight for EveryMetric {
        fn instantiate(&self, _dataset: Arc<Dataset>, metrics: Vec<Metric>) -> Box<dyn Insight> {
            Box::new(EveryMetric {
                metrics,
                stage: Stage::Unscreened,
            })
        }

        fn insight_type(&self) -> InsightType {
            InsightType::Correlation
        }

        fn name(&self) -> &'static str {
            "Every Metric"
        }

        fn metrics(&self) -> &[Metric] {
            &self.metrics
        }

        fn visual(&self) -> Option<&Visualization> {
            self.stage.visual()
        }

        fn relevant(&self) -> bool {
            self.stage.is_relevant()
        }

        fn fsfa(&mut self) {
            self.stage = Stage::Screened;
        }

        fn generate(&mut self) {}

        fn propose(&self, dataset: &Arc<Dataset>) -> Vec<ProposedInsight> {
            dataset
                .float_metrics()
                .map(|m| {
                    let metrics = vec![m.clone()];
                    let insight = self.instantiate(Arc::clone(dataset), metrics.clone());
                    ProposedInsight::new(insight, metrics)
                })
                .collect()
        }
    }

    #[test]
    fn test_engine_creation() {
        let engine = InsightEngine::new();
        assert_eq!(engine.insight_types(), vec![InsightType::Correlation]);
        assert!(InsightEngine::empty().insight_types().is_empty());
    }

    #[test]
    fn test_registered_insight_names() {
        let mut engine = InsightEngine::new();
        engine.register(Box::new(EveryMetric::default()));
        assert_eq!(engine.insight_names(), vec!["Correlation", "Every Metric"]);
    }

    #[test]
    fn test_propose_counts_pairs() {
        let d = dataset(&[
            ("a", vec![1.0, 2.0]),
            ("b", vec![2.0, 1.0]),
            ("c", vec![3.0, 3.5]),
            ("d", vec![0.0, 1.0]),
            ("e", vec![5.0, 2.0]),
        ]);
        assert_eq!(propose(&d).len(), 10);
    }

    #[test]
    fn test_propose_preserves_registration_order() {
        let d = dataset(&[("a", vec![1.0, 2.0]), ("b", vec![2.0, 1.0])]);

        let mut engine = InsightEngine::new();
        engine.register(Box::new(EveryMetric::default()));

        let proposals = engine.propose(&d);
        assert_eq!(proposals.len(), 3);
        assert_eq!(proposals[0].metrics.len(), 2);
        assert_eq!(proposals[1].metrics[0].name, "a");
        assert_eq!(proposals[2].metrics[0].name, "b");
    }

    #[test]
    fn test_generate_insights_correlated() {
        let d = dataset(&[
            ("age", vec![10.0, 20.0, 30.0]),
            ("height", vec![150.0, 180.0, 188.0]),
        ]);

        let insights = generate_insights(&d);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].insight_type(), InsightType::Correlation);
        assert!(insights[0].relevant());

        let visual = insights[0].visual().unwrap();
        assert_eq!(visual.data().len(), 3);
        for (i, row) in visual.data().iter().enumerate() {
            assert_eq!(row.len(), 2);
            assert_eq!(row["age"], d.float_column(0).unwrap()[i]);
            assert_eq!(row["height"], d.float_column(1).unwrap()[i]);
        }
    }

    #[test]
    fn test_generate_insights_uncorrelated() {
        let d = dataset(&[
            ("age", vec![10.0, 20.0, 30.0]),
            ("height", vec![150.0, 0.0, 100.0]),
        ]);
        assert!(generate_insights(&d).is_empty());
    }

    #[test]
    fn test_generate_insights_filters_in_order() {
        let d = dataset(&[
            ("a", vec![1.0, 2.0, 3.0, 4.0]),
            ("b", vec![2.0, 4.1, 5.9, 8.0]),
            ("c", vec![4.0, 1.0, 3.0, 2.0]),
            ("d", vec![1.1, 2.0, 3.2, 3.9]),
        ]);

        let insights = generate_insights(&d);
        let pairs: Vec<(&str, &str)> = insights
            .iter()
            .map(|i| (i.metrics()[0].name.as_str(), i.metrics()[1].name.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a", "b"), ("a", "d"), ("b", "d")]);
    }

    #[test]
    fn test_from_config_threshold() {
        let d = dataset(&[
            ("age", vec![10.0, 20.0, 30.0]),
            ("height", vec![140.0, 178.0, 190.0]),
        ]);

        let mut config = PipelineConfig::default();
        config.correlation.threshold = 0.99;
        assert!(InsightEngine::from_config(&config)
            .generate_insights(&d)
            .is_empty());

        assert_eq!(InsightEngine::new().generate_insights(&d).len(), 1);
    }
}
