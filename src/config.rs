//! Configuration for the batch driver
//! CLI argument parsing plus validation; every parameter check runs before
//! the pipeline does any work

use crate::correlation::CorrelationConfig;
use crate::error::{Result, SynthError};
use crate::generator::TimeWindow;
use crate::model::SourceType;
use crate::pipeline::{PipelineConfig, SourceSpec};
use chrono::{DateTime, Duration, Utc};
use clap::Parser;
use std::fmt;
use std::path::PathBuf;

#[derive(Parser, Clone, Debug)]
#[command(name = "logsynth", about = "Synthetic multi-source log generator with correlation and severity scoring")]
#[command(version = "1.0", author = "SIEM Team")]
pub struct SynthConfig {
    /// Sources to generate, comma separated
    #[arg(long, default_value = "siem,erp,application", help = "Sources: siem, erp, application")]
    pub sources: String,

    /// Records per source
    #[arg(long, default_value_t = 1000, help = "SIEM-style record count")]
    pub siem_count: usize,

    #[arg(long, default_value_t = 1000, help = "ERP-style record count")]
    pub erp_count: usize,

    #[arg(long, default_value_t = 1000, help = "Application-style record count")]
    pub app_count: usize,

    /// Anomaly rate applied to every source unless overridden per source
    #[arg(long, default_value_t = 0.05, help = "Anomaly rate in 0.0..=1.0")]
    pub anomaly_rate: f64,

    #[arg(long, help = "Override anomaly rate for SIEM-style records")]
    pub siem_anomaly_rate: Option<f64>,

    #[arg(long, help = "Override anomaly rate for ERP-style records")]
    pub erp_anomaly_rate: Option<f64>,

    #[arg(long, help = "Override anomaly rate for application-style records")]
    pub app_anomaly_rate: Option<f64>,

    /// Window start in RFC 3339; defaults to window-hours before now
    #[arg(long, help = "Generation window start (RFC 3339)")]
    pub window_start: Option<String>,

    #[arg(long, default_value_t = 24, help = "Generation window length in hours")]
    pub window_hours: i64,

    #[arg(long, default_value_t = 0.3, help = "Fraction of origin request ids shared")]
    pub share_fraction: f64,

    #[arg(long, default_value_t = 0.4, help = "Per-record probability of receiving a shared id")]
    pub inject_fraction: f64,

    #[arg(long, default_value_t = 1337, help = "Base RNG seed")]
    pub seed: u64,

    #[arg(long, default_value = "http://127.0.0.1:8081/ingest/raw", help = "HTTP endpoint for ingestion")]
    pub endpoint: String,

    /// Write NDJSON to this file instead of posting to the endpoint
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    #[arg(long, default_value = "gzip", help = "Compression: gzip or none")]
    pub compression: String,

    #[arg(long, default_value_t = 1000, help = "Records per HTTP batch")]
    pub batch_size: usize,

    #[arg(long, help = "Generate and summarize without forwarding output")]
    pub dry_run: bool,

    #[arg(long, default_value_t = 30, help = "HTTP request timeout (seconds)")]
    pub timeout: u64,

    #[arg(long, default_value_t = 3, help = "Maximum HTTP retry attempts")]
    pub max_retries: usize,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl SynthConfig {
    /// Validate every parameter; errors name the offending flag
    pub fn validate(&self) -> Result<()> {
        self.enabled_sources()?;

        let rates = [
            ("anomaly_rate", Some(self.anomaly_rate)),
            ("siem_anomaly_rate", self.siem_anomaly_rate),
            ("erp_anomaly_rate", self.erp_anomaly_rate),
            ("app_anomaly_rate", self.app_anomaly_rate),
            ("share_fraction", Some(self.share_fraction)),
            ("inject_fraction", Some(self.inject_fraction)),
        ];
        for (name, rate) in rates {
            if let Some(rate) = rate {
                if !(0.0..=1.0).contains(&rate) {
                    return Err(SynthError::config(format!(
                        "{} must be within 0.0..=1.0, got {}",
                        name, rate
                    )));
                }
            }
        }

        if self.window_hours < 1 {
            return Err(SynthError::config(format!(
                "window_hours must be at least 1, got {}",
                self.window_hours
            )));
        }

        if self.batch_size == 0 {
            return Err(SynthError::config("batch_size must be greater than 0"));
        }

        match self.compression.as_str() {
            "gzip" | "none" => {}
            other => {
                return Err(SynthError::config(format!(
                    "compression must be gzip or none, got {}",
                    other
                )))
            }
        }

        if self.out.is_none()
            && !self.dry_run
            && !self.endpoint.starts_with("http://")
            && !self.endpoint.starts_with("https://")
        {
            return Err(SynthError::config(format!(
                "endpoint must be an HTTP/HTTPS URL, got {}",
                self.endpoint
            )));
        }

        Ok(())
    }

    /// Parse the requested source list; unknown names are fatal
    pub fn enabled_sources(&self) -> Result<Vec<SourceType>> {
        let mut enabled = Vec::new();
        for name in self.sources.split(',').filter(|s| !s.trim().is_empty()) {
            let source = SourceType::parse(name)?;
            if !enabled.contains(&source) {
                enabled.push(source);
            }
        }
        if enabled.is_empty() {
            return Err(SynthError::config("sources must name at least one source"));
        }
        Ok(enabled)
    }

    /// Resolve the generation window
    pub fn window(&self) -> Result<TimeWindow> {
        let span = Duration::hours(self.window_hours);
        let (start, end) = match &self.window_start {
            Some(raw) => {
                let start = DateTime::parse_from_rfc3339(raw)
                    .map_err(|e| {
                        SynthError::config(format!(
                            "window_start must be RFC 3339 ({}): {}",
                            raw, e
                        ))
                    })?
                    .with_timezone(&Utc);
                (start, start + span)
            }
            None => {
                let end = Utc::now();
                (end - span, end)
            }
        };
        TimeWindow::new(start, end)
    }

    /// Translate into the pipeline's structured configuration
    pub fn to_pipeline_config(&self) -> Result<PipelineConfig> {
        self.validate()?;
        let enabled = self.enabled_sources()?;

        let spec = |source: SourceType, count: usize, rate: Option<f64>| SourceSpec {
            count: if enabled.contains(&source) { count } else { 0 },
            anomaly_rate: rate.unwrap_or(self.anomaly_rate),
        };

        Ok(PipelineConfig {
            window: self.window()?,
            siem: spec(SourceType::Siem, self.siem_count, self.siem_anomaly_rate),
            erp: spec(SourceType::Erp, self.erp_count, self.erp_anomaly_rate),
            application: spec(SourceType::Application, self.app_count, self.app_anomaly_rate),
            correlation: CorrelationConfig {
                share_fraction: self.share_fraction,
                inject_fraction: self.inject_fraction,
            },
            seed: self.seed,
        })
    }
}

impl fmt::Display for SynthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SynthConfig {{ sources: {}, counts: {}/{}/{}, anomaly_rate: {}, window_hours: {}, seed: {} }}",
            self.sources,
            self.siem_count,
            self.erp_count,
            self.app_count,
            self.anomaly_rate,
            self.window_hours,
            self.seed
        )
    }
}
