//! Insight Engine - Automatic Insight Discovery
//!
//! Turns raw dataset columns into validated, visualizable findings. Every
//! registered insight variant runs through the same protocol:
//!
//! 1. **Propose** - enumerate candidate metric groupings from domain knowledge
//! 2. **FSFA** - cheap feasibility screen on metric descriptors only
//! 3. **Generate** - full computation, which may still reject the candidate
//! 4. **Filter** - keep only insights that are relevant after generation
//!
//! ## Insight Types
//!
//! - **Correlation** - pairs of Float metrics with a strong positive correlation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sift_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::new();
//! let insights = engine.generate_insights(&Arc::new(dataset));
//! ```

pub mod correlation;
pub mod engine;
pub mod types;

pub use correlation::{CorrelationInsight, DEFAULT_CORRELATION_THRESHOLD};
pub use engine::{generate_insights, propose, Insight, InsightEngine};
pub use types::{InsightType, ProposedInsight, Stage};
