//! Correlation Insight
//!
//! States whether two Float metrics of a dataset move together. Accepted
//! correlations are shown as a scatter plot.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::dataset::{DataType, Dataset, Metric};
use crate::visualization::{Row, ScatterPlot, VisualMetric, Visualization};

use super::engine::Insight;
use super::types::{InsightType, ProposedInsight, Stage};

/// Minimum signed coefficient for a correlation to be kept
///
/// The comparison is against the signed value, so strong negative
/// correlations are discarded too.
pub const DEFAULT_CORRELATION_THRESHOLD: f64 = 0.7;

/// Insight that finds correlated pairs of Float metrics
#[derive(Debug, Clone)]
pub struct CorrelationInsight {
    dataset: Arc<Dataset>,
    metrics: Vec<Metric>,
    threshold: f64,
    stage: Stage,
}

impl CorrelationInsight {
    /// Create a correlation over `metrics` of a shared dataset
    pub fn new(dataset: Arc<Dataset>, metrics: Vec<Metric>) -> Self {
        Self {
            dataset,
            metrics,
            threshold: DEFAULT_CORRELATION_THRESHOLD,
            stage: Stage::Unscreened,
        }
    }

    /// Unbound instance used for registration and proposals
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    fn screen(&self) -> bool {
        self.metrics.len() == 2 && self.metrics.iter().all(|m| m.data_type == DataType::Float)
    }

    /// Run the full analysis; `None` means the pair is not relevant
    fn compute(&self) -> Option<Visualization> {
        let (m1, m2) = match self.metrics.as_slice() {
            [m1, m2, ..] => (m1, m2),
            _ => {
                debug!(count = self.metrics.len(), "Correlation needs two metrics");
                return None;
            }
        };

        // Stale descriptors can point past the stored columns
        let (x, y) = match (
            self.dataset.float_column(m1.index),
            self.dataset.float_column(m2.index),
        ) {
            (Some(x), Some(y)) => (x, y),
            _ => {
                debug!(
                    metric1 = m1.name.as_str(),
                    metric2 = m2.name.as_str(),
                    columns = self.dataset.float_column_count(),
                    "Metric index out of range"
                );
                return None;
            }
        };

        // Equal weighting for now
        let weights = vec![1.0; x.len()];

        let coefficient = match self.dataset.correlation(&m1.name, &m2.name, &weights) {
            Ok(coefficient) => coefficient,
            Err(e) => {
                warn!(
                    metric1 = m1.name.as_str(),
                    metric2 = m2.name.as_str(),
                    error = %e,
                    "Correlation failed"
                );
                return None;
            }
        };

        // NaN never passes
        if !(coefficient >= self.threshold) {
            debug!(
                metric1 = m1.name.as_str(),
                metric2 = m2.name.as_str(),
                coefficient,
                threshold = self.threshold,
                "Correlation below threshold"
            );
            return None;
        }

        let mut data: Vec<Row> = x
            .iter()
            .map(|v| {
                let mut row = Row::new();
                row.insert(m1.name.clone(), json!(v));
                row
            })
            .collect();
        for (row, v) in data.iter_mut().zip(y) {
            row.insert(m2.name.clone(), json!(v));
        }

        let plot = ScatterPlot {
            metrics: vec![
                VisualMetric::new(&m1.name, m1.label(), DataType::Float, 0),
                VisualMetric::new(&m2.name, m2.label(), DataType::Float, 1),
            ],
            title: format!("{} and {}", m1.label(), m2.label()),
            description: format!("have a correlation of {}", coefficient),
            data,
        };

        Some(plot.into())
    }
}

impl Default for CorrelationInsight {
    fn default() -> Self {
        Self::new(Arc::new(Dataset::new()), Vec::new())
    }
}

impl Insight for CorrelationInsight {
    fn instantiate(&self, dataset: Arc<Dataset>, metrics: Vec<Metric>) -> Box<dyn Insight> {
        let mut insight = Self::new(dataset, metrics);
        insight.threshold = self.threshold;
        Box::new(insight)
    }

    fn insight_type(&self) -> InsightType {
        InsightType::Correlation
    }

    fn name(&self) -> &'static str {
        "Correlation"
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
        self.stage = if self.screen() {
            Stage::Screened
        } else {
            debug!(
                metrics = ?self.metrics.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(),
                "Correlation not feasible"
            );
            Stage::Irrelevant
        };
    }

    fn generate(&mut self) {
        if !self.stage.is_relevant() {
            return;
        }
        self.stage = match self.compute() {
            Some(visual) => Stage::Relevant(visual),
            None => Stage::Irrelevant,
        };
    }

    fn propose(&self, dataset: &Arc<Dataset>) -> Vec<ProposedInsight> {
        let floats: Vec<&Metric> = dataset.float_metrics().collect();
        let mut proposals =
            Vec::with_capacity(floats.len() * floats.len().saturating_sub(1) / 2);

        for (i, first) in floats.iter().enumerate() {
            for second in &floats[i + 1..] {
                let metrics = vec![(*first).clone(), (*second).clone()];
                let insight = self.instantiate(Arc::clone(dataset), metrics.clone());
                proposals.push(ProposedInsight::new(insight, metrics));
            }
        }

        proposals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(columns: &[(&str, Vec<f64>)]) -> Arc<Dataset> {
        let mut d = Dataset::new();
        for (name, values) in columns {
            d.add_metric(Metric::float(*name), values.clone()).unwrap();
        }
        Arc::new(d)
    }

    fn registered(d: &Dataset, names: &[&str]) -> Vec<Metric> {
        names.iter().map(|n| d.metric(n).unwrap().clone()).collect()
    }

    fn screened(d: &Arc<Dataset>, names: &[&str]) -> CorrelationInsight {
        let mut insight = CorrelationInsight::new(Arc::clone(d), registered(d, names));
        insight.stage = Stage::Screened;
        insight
    }

    #[test]
    fn test_new_shares_dataset() {
        let d = dataset(&[("age", vec![1.0, 2.0, 3.0])]);
        let insight = CorrelationInsight::new(Arc::clone(&d), registered(&d, &["age"]));

        assert!(Arc::ptr_eq(insight.dataset(), &d));
        assert_eq!(insight.metrics().len(), 1);
        assert_eq!(insight.dataset().len(), 3);
        assert_eq!(insight.threshold(), DEFAULT_CORRELATION_THRESHOLD);
    }

    #[test]
    fn test_accessors_before_generate() {
        let insight = CorrelationInsight::default();
        assert_eq!(insight.insight_type(), InsightType::Correlation);
        assert!(!insight.relevant());
        assert!(insight.visual().is_none());
        assert_eq!(insight.stage(), &Stage::Unscreened);
    }

    #[test]
    fn test_fsfa_requires_two_metrics() {
        let mut insight =
            CorrelationInsight::new(Arc::new(Dataset::new()), vec![Metric::float("age")]);
        insight.fsfa();
        assert!(!insight.relevant());

        let mut insight = CorrelationInsight::new(
            Arc::new(Dataset::new()),
            vec![Metric::float("a"), Metric::float("b"), Metric::float("c")],
        );
        insight.fsfa();
        assert!(!insight.relevant());
    }

    #[test]
    fn test_fsfa_requires_float_metrics() {
        let mut insight = CorrelationInsight::new(
            Arc::new(Dataset::new()),
            vec![Metric::float("age"), Metric::string("name")],
        );
        insight.fsfa();
        assert!(!insight.relevant());
        assert_eq!(insight.stage(), &Stage::Irrelevant);
    }

    #[test]
    fn test_fsfa_accepts_two_floats() {
        let mut insight = CorrelationInsight::new(
            Arc::new(Dataset::new()),
            vec![Metric::float("age"), Metric::float("height")],
        );
        insight.fsfa();
        assert!(insight.relevant());
        assert!(insight.visual().is_none());
    }

    #[test]
    fn test_generate_without_screening_is_noop() {
        let d = dataset(&[
            ("age", vec![10.0, 20.0, 30.0]),
            ("height", vec![150.0, 180.0, 188.0]),
        ]);
        let metrics = registered(&d, &["age", "height"]);
        let mut insight = CorrelationInsight::new(Arc::clone(&d), metrics);
        insight.generate();
        assert!(!insight.relevant());
        assert_eq!(insight.stage(), &Stage::Unscreened);
    }

    #[test]
    fn test_generate_insufficient_metrics() {
        let mut insight = CorrelationInsight::default();
        insight.stage = Stage::Screened;
        insight.generate();
        assert!(!insight.relevant());
    }

    #[test]
    fn test_generate_stale_index() {
        let d = dataset(&[
            ("age", vec![10.0, 20.0]),
            ("height", vec![1.5, 1.8]),
        ]);
        let mut insight = CorrelationInsight::new(
            Arc::clone(&d),
            vec![
                Metric::float("age").with_index(0),
                Metric::float("height").with_index(2),
            ],
        );
        insight.stage = Stage::Screened;
        insight.generate();
        assert!(!insight.relevant());
    }

    #[test]
    fn test_generate_unknown_metric() {
        let d = dataset(&[
            ("age", vec![10.0, 20.0]),
            ("fheight", vec![1.5, 1.8]),
        ]);
        let mut insight = CorrelationInsight::new(
            Arc::clone(&d),
            vec![
                Metric::float("age").with_index(0),
                Metric::string("height").with_index(1),
            ],
        );
        insight.stage = Stage::Screened;
        insight.generate();
        assert!(!insight.relevant());
        assert!(insight.visual().is_none());
    }

    #[test]
    fn test_generate_weak_correlation() {
        let d = dataset(&[
            ("age", vec![10.0, 20.0, 21.0]),
            ("height", vec![1.5, 0.8, 100.0]),
        ]);
        let mut insight = screened(&d, &["age", "height"]);
        insight.generate();
        assert!(!insight.relevant());
    }

    #[test]
    fn test_generate_strong_negative_correlation_is_rejected() {
        let d = dataset(&[
            ("age", vec![10.0, 20.0, 30.0]),
            ("speed", vec![30.0, 20.0, 10.0]),
        ]);
        let mut insight = screened(&d, &["age", "speed"]);
        insight.generate();
        assert!(!insight.relevant());
    }

    #[test]
    fn test_generate_correlated_metrics() {
        let mut d = Dataset::new();
        d.add_metric(
            Metric::float("age").with_display_name("Age"),
            vec![10.0, 20.0],
        )
        .unwrap();
        d.add_metric(
            Metric::float("height").with_display_name("Height"),
            vec![150.0, 170.0],
        )
        .unwrap();
        let d = Arc::new(d);

        let mut insight = screened(&d, &["age", "height"]);
        insight.generate();
        assert!(insight.relevant());

        let visual = insight.visual().expect("visual after generate");
        assert_eq!(visual.title(), "Age and Height");
        assert_eq!(visual.description(), "have a correlation of 1");
        assert_eq!(visual.metrics()[0].name, "age");
        assert_eq!(visual.metrics()[0].dimension, 0);
        assert_eq!(visual.metrics()[1].name, "height");
        assert_eq!(visual.metrics()[1].dimension, 1);
        assert_eq!(visual.data().len(), 2);
        assert_eq!(visual.data()[1]["age"], json!(20.0));
        assert_eq!(visual.data()[1]["height"], json!(170.0));
    }

    #[test]
    fn test_generate_is_idempotent() {
        let d = dataset(&[
            ("age", vec![10.0, 20.0, 30.0]),
            ("height", vec![150.0, 180.0, 188.0]),
        ]);
        let mut insight = screened(&d, &["age", "height"]);
        insight.generate();
        let first = insight.visual().cloned().unwrap();
        insight.generate();
        assert_eq!(insight.visual(), Some(&first));
    }

    #[test]
    fn test_generate_respects_threshold() {
        let d = dataset(&[
            ("age", vec![10.0, 20.0, 30.0]),
            ("height", vec![140.0, 178.0, 190.0]),
        ]);
        let prototype = CorrelationInsight::with_threshold(0.99);
        let mut insight = prototype.instantiate(Arc::clone(&d), registered(&d, &["age", "height"]));
        insight.fsfa();
        insight.generate();
        assert!(!insight.relevant());
    }

    #[test]
    fn test_propose_pairs_float_metrics() {
        let mut d = Dataset::new();
        d.add_metric(Metric::float("a"), vec![1.0, 2.0]).unwrap();
        d.add_metric(Metric::float("b"), vec![1.0, 2.0]).unwrap();
        d.add_metric(Metric::string("name"), vec!["x", "y"]).unwrap();
        d.add_metric(Metric::float("c"), vec![1.0, 2.0]).unwrap();
        d.add_metric(Metric::float("d"), vec![1.0, 2.0]).unwrap();
        let d = Arc::new(d);

        let proposals = CorrelationInsight::default().propose(&d);
        assert_eq!(proposals.len(), 6);

        let pairs: Vec<(String, String)> = proposals
            .iter()
            .map(|p| (p.metrics[0].name.clone(), p.metrics[1].name.clone()))
            .collect();
        assert_eq!(pairs[0], ("a".to_string(), "b".to_string()));
        assert_eq!(pairs[5], ("c".to_string(), "d".to_string()));
        for (first, second) in &pairs {
            assert!(first < second);
        }
        for p in &proposals {
            assert_eq!(p.insight.metrics(), p.metrics.as_slice());
            assert!(!p.insight.relevant());
        }
    }

    #[test]
    fn test_propose_without_enough_floats() {
        let mut d = Dataset::new();
        d.add_metric(Metric::float("age"), vec![1.0, 2.0, 3.0]).unwrap();
        d.add_metric(Metric::string("height"), vec!["1", "2", "3"]).unwrap();
        let d = Arc::new(d);

        assert!(CorrelationInsight::default().propose(&d).is_empty());
        assert!(CorrelationInsight::default()
            .propose(&Arc::new(Dataset::new()))
            .is_empty());
    }
}
