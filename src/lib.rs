//! Synthetic multi-source log generation library
//! Generates SIEM-, ERP-, and application-style batches, injects anomaly
//! archetypes, links records across sources through shared request ids, and
//! scores every record with a business-impact severity

pub mod anomaly;
pub mod config;
pub mod correlation;
pub mod error;
pub mod fields;
pub mod generator;
pub mod model;
pub mod pipeline;
pub mod scoring;
pub mod sink;
pub mod stats;

// Re-export commonly used types
pub use anomaly::{AnomalyCatalog, AnomalyInjector};
pub use config::SynthConfig;
pub use correlation::{CorrelationConfig, CorrelationEngine, CorrelationReport};
pub use error::{Result, SynthError};
pub use fields::FieldLibrary;
pub use generator::{
    ApplicationGenerator, ErpGenerator, SiemGenerator, SourceGenerator, TimeWindow,
};
pub use model::{AnomalyKind, LogLevel, LogRecord, Severity, SourceFields, SourceType};
pub use pipeline::{Batch, Pipeline, PipelineConfig, SourceSpec};
pub use scoring::{ScoringTable, SeverityScorer};
pub use sink::{write_ndjson, IngestClient};
pub use stats::BatchSummary;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
