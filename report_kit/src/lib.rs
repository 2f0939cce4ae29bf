//! # Report Kit
//!
//! Turns a compliance scan summary (a benchmark evaluated as a set of rules
//! across a set of targets) into a categorized, cross-linked report model.
//!
//! ## Modules
//!
//! - `outcome` - Outcomes, rollup categories and per-outcome counters
//! - `document` - Serde types for the scan summary JSON
//! - `normalizer` - Fills in results for targets that could not be evaluated
//! - `cross_index` - Target name to position index
//! - `model` - The aggregated report model handed to renderers
//! - `aggregators` - Rule-centric and target-centric passes
//! - `references` - Reference-system link table
//! - `config` - TOML configuration
//! - `report_api` - High-level build entry points
//!
//! ## Usage
//!
//! ```rust,ignore
//! use report_kit::report_api::build_report_from_str;
//! use report_kit::{Outcome, ReportConfig};
//!
//! let model = build_report_from_str(&json, &ReportConfig::default())?;
//!
//! println!("rules by category: {:?}", model.rule_result_totals);
//! for target in model.targets_for(0, Outcome::Fail) {
//!     println!("rule 0 failed on {}", target.name);
//! }
//! ```
//!
//! Rendering (HTML, charts) is left to the caller; the model carries
//! everything a renderer needs, including anchors and reference links.

pub mod aggregators;
pub mod config;
pub mod cross_index;
pub mod document;
pub mod error;
pub mod model;
pub mod normalizer;
pub mod outcome;
pub mod references;
pub mod report_api;

pub use config::ReportConfig;
pub use cross_index::{DuplicateNamePolicy, TargetIndex};
pub use document::{Benchmark, Reference, ReportDocument};
pub use error::{ReportError, ReportResult};
pub use model::{ReportModel, Rule, RuleRef, Target, TargetRef};
pub use outcome::{CategoryTotals, Outcome, OutcomeBuckets, OutcomeCounts, RollupCategory};
pub use references::{render_reference, ReferenceDisplay, ReferenceLinker};
