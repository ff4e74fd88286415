//! One-shot batch pipeline: Generate → Inject → Correlate → Score
//!
//! Per-source generation fans out across rayon workers (generators share no
//! mutable state); correlation is the single synchronization point; scoring
//! annotates every record last.

use crate::anomaly::{AnomalyCatalog, AnomalyInjector};
use crate::correlation::{CorrelationConfig, CorrelationEngine, CorrelationReport};
use crate::error::{Result, SynthError};
use crate::fields::FieldLibrary;
use crate::generator::{
    ApplicationGenerator, ErpGenerator, SiemGenerator, SourceGenerator, TimeWindow,
};
use crate::model::{LogRecord, SourceType};
use crate::scoring::SeverityScorer;
use log::{debug, info};
use std::sync::Arc;

// fixed per-stage seed streams so every RNG is independent of the others
const SIEM_STREAM: u64 = 0x5155;
const ERP_STREAM: u64 = 0x4550;
const APP_STREAM: u64 = 0x4150;
const INJECT_STREAM: u64 = 0x494e;
const CORRELATE_STREAM: u64 = 0x434f;

/// Per-source generation parameters
#[derive(Debug, Clone, Copy)]
pub struct SourceSpec {
    pub count: usize,
    pub anomaly_rate: f64,
}

impl SourceSpec {
    fn validate(&self, source: SourceType) -> Result<()> {
        if !(0.0..=1.0).contains(&self.anomaly_rate) {
            return Err(SynthError::config(format!(
                "generation stage: {}_anomaly_rate must be within 0.0..=1.0, got {}",
                source, self.anomaly_rate
            )));
        }
        Ok(())
    }
}

/// Complete configuration for one pipeline invocation
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub window: TimeWindow,
    pub siem: SourceSpec,
    pub erp: SourceSpec,
    pub application: SourceSpec,
    pub correlation: CorrelationConfig,
    pub seed: u64,
}

impl PipelineConfig {
    /// All parameter checks run here, before any generation work
    pub fn validate(&self) -> Result<()> {
        self.siem.validate(SourceType::Siem)?;
        self.erp.validate(SourceType::Erp)?;
        self.application.validate(SourceType::Application)?;
        self.correlation.validate()?;
        Ok(())
    }
}

/// Finished output of one pipeline run
#[derive(Debug, Clone)]
pub struct Batch {
    pub application: Vec<LogRecord>,
    pub erp: Vec<LogRecord>,
    pub siem: Vec<LogRecord>,
    pub correlation: CorrelationReport,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.application.len() + self.erp.len() + self.siem.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn records(&self) -> impl Iterator<Item = &LogRecord> {
        self.application
            .iter()
            .chain(self.erp.iter())
            .chain(self.siem.iter())
    }

    pub fn into_records(self) -> Vec<LogRecord> {
        let mut records = self.application;
        records.extend(self.erp);
        records.extend(self.siem);
        records
    }
}

pub struct Pipeline {
    config: PipelineConfig,
    library: Arc<FieldLibrary>,
    scorer: SeverityScorer,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_library(config, Arc::new(FieldLibrary::default()))
    }

    pub fn with_library(config: PipelineConfig, library: Arc<FieldLibrary>) -> Self {
        Self {
            config,
            library,
            scorer: SeverityScorer::default(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full Generate → Inject → Correlate → Score transformation
    /// and hand back the scored batch.
    pub fn run(&self) -> Result<Batch> {
        self.config.validate()?;

        let window = self.config.window;
        let seed = self.config.seed;

        let ((mut siem, mut erp), mut application) = rayon::join(
            || {
                rayon::join(
                    || {
                        SiemGenerator::new(Arc::clone(&self.library), seed ^ SIEM_STREAM)
                            .generate(self.config.siem.count, &window)
                    },
                    || {
                        ErpGenerator::new(Arc::clone(&self.library), seed ^ ERP_STREAM)
                            .generate(self.config.erp.count, &window)
                    },
                )
            },
            || {
                ApplicationGenerator::new(Arc::clone(&self.library), seed ^ APP_STREAM)
                    .generate(self.config.application.count, &window)
            },
        );
        debug!(
            "generated batches: siem={} erp={} application={}",
            siem.len(),
            erp.len(),
            application.len()
        );

        let mut injected = 0usize;
        for (records, spec, stream) in [
            (&mut siem, &self.config.siem, 1u64),
            (&mut erp, &self.config.erp, 2),
            (&mut application, &self.config.application, 3),
        ] {
            let mut injector = AnomalyInjector::new(
                AnomalyCatalog::default(),
                Arc::clone(&self.library),
                seed ^ INJECT_STREAM ^ stream,
            );
            injected += injector.inject(records, spec.anomaly_rate)?;
        }
        debug!("injected {} anomalies", injected);

        let mut engine =
            CorrelationEngine::new(self.config.correlation, seed ^ CORRELATE_STREAM);
        let correlation = engine.correlate(&mut application, &mut [&mut erp, &mut siem])?;
        debug!(
            "correlation pool={} linked={}",
            correlation.pool_size,
            correlation.total_linked()
        );

        // severity is assigned last, after every other field is final
        for record in siem
            .iter_mut()
            .chain(erp.iter_mut())
            .chain(application.iter_mut())
        {
            record.severity = Some(self.scorer.score(record));
        }

        let batch = Batch {
            application,
            erp,
            siem,
            correlation,
        };
        info!(
            "pipeline complete: {} records, {} anomalies, {} correlated",
            batch.len(),
            injected,
            batch.correlation.total_linked()
        );
        Ok(batch)
    }
}
