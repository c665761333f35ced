//! Insight command implementations (analyze, propose)

use anyhow::{bail, Context, Result};
use serde::Serialize;
use sift_core::{
    Insight, InsightEngine, InsightType, PipelineConfig, ProposedInsight, Visualization,
};

use super::{open_dataset, truncate};
use crate::cli::DatasetArgs;

/// Serializable view of one relevant insight
#[derive(Debug, Serialize)]
pub struct InsightReport<'a> {
    pub insight_type: InsightType,
    pub metrics: Vec<&'a str>,
    pub visual: Option<&'a Visualization>,
}

impl<'a> InsightReport<'a> {
    pub fn from_insight(insight: &'a dyn Insight) -> Self {
        Self {
            insight_type: insight.insight_type(),
            metrics: insight.metrics().iter().map(|m| m.name.as_str()).collect(),
            visual: insight.visual(),
        }
    }
}

pub fn cmd_analyze(args: &DatasetArgs, config: &PipelineConfig, format: &str) -> Result<()> {
    let dataset = open_dataset(args)?;
    let engine = InsightEngine::from_config(config);
    let insights = engine.generate_insights(&dataset);

    let output = match format {
        "json" => render_json(&insights)?,
        "text" => render_text(&insights),
        other => bail!("Unknown output format: {} (expected text or json)", other),
    };
    println!("{}", output);
    Ok(())
}

pub fn cmd_propose(args: &DatasetArgs, config: &PipelineConfig) -> Result<()> {
    let dataset = open_dataset(args)?;
    let engine = InsightEngine::from_config(config);
    let proposals = engine.propose(&dataset);

    print!("{}", render_proposals(&proposals));
    Ok(())
}

/// Pretty JSON array of insight reports
pub fn render_json(insights: &[Box<dyn Insight>]) -> Result<String> {
    let reports: Vec<InsightReport> = insights
        .iter()
        .map(|i| InsightReport::from_insight(i.as_ref()))
        .collect();
    serde_json::to_string_pretty(&reports).context("Failed to serialize insights")
}

/// Human-readable summary of insights
pub fn render_text(insights: &[Box<dyn Insight>]) -> String {
    if insights.is_empty() {
        return "No relevant insights found.".to_string();
    }

    let mut out = format!("Found {} insight(s)\n", insights.len());
    for (i, insight) in insights.iter().enumerate() {
        let Some(visual) = insight.visual() else {
            continue;
        };
        out.push('\n');
        out.push_str(&format!(
            "{:>3}. [{}] {} {}\n",
            i + 1,
            insight.insight_type(),
            visual.title(),
            visual.description()
        ));
        out.push_str(&format!(
            "     {} with {} rows\n",
            visual.visual_type(),
            visual.data().len()
        ));
        for metric in visual.metrics() {
            out.push_str(&format!(
                "     axis {}: {}\n",
                metric.dimension,
                truncate(&metric.display_name, 40)
            ));
        }
    }
    out
}

/// One line per proposal, grouped in proposal order
pub fn render_proposals(proposals: &[ProposedInsight]) -> String {
    let mut out = format!("{} proposal(s)\n", proposals.len());
    for p in proposals {
        let names: Vec<&str> = p.metrics.iter().map(|m| m.name.as_str()).collect();
        out.push_str(&format!(
            "  {:<12} {}\n",
            p.insight.insight_type().as_str(),
            names.join(", ")
        ));
    }
    out
}
