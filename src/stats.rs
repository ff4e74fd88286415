//! Batch distribution summary
//! Read-only pass over a finished batch for quality checks: level/severity
//! percentages, anomaly fraction, and correlation coverage

use crate::model::{LogLevel, LogRecord, Severity, SourceType};
use crate::pipeline::Batch;
use log::info;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub by_level: BTreeMap<LogLevel, usize>,
    pub by_source: BTreeMap<SourceType, usize>,
    pub by_severity: BTreeMap<Severity, usize>,
    pub anomaly_count: usize,
    pub correlated_count: usize,
    pub unscored_count: usize,
}

impl BatchSummary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a LogRecord>,
    {
        let mut summary = BatchSummary::default();
        for record in records {
            summary.total += 1;
            *summary.by_level.entry(record.level).or_insert(0) += 1;
            *summary.by_source.entry(record.source_type).or_insert(0) += 1;
            match record.severity {
                Some(severity) => *summary.by_severity.entry(severity).or_insert(0) += 1,
                None => summary.unscored_count += 1,
            }
            if record.is_anomaly {
                summary.anomaly_count += 1;
            }
            if record.correlation_id.is_some() {
                summary.correlated_count += 1;
            }
        }
        summary
    }

    pub fn from_batch(batch: &Batch) -> Self {
        Self::from_records(batch.records())
    }

    pub fn anomaly_fraction(&self) -> f64 {
        if self.total > 0 {
            self.anomaly_count as f64 / self.total as f64
        } else {
            0.0
        }
    }

    pub fn level_percent(&self, level: LogLevel) -> f64 {
        self.percent(self.by_level.get(&level).copied().unwrap_or(0))
    }

    pub fn severity_percent(&self, severity: Severity) -> f64 {
        self.percent(self.by_severity.get(&severity).copied().unwrap_or(0))
    }

    pub fn source_count(&self, source: SourceType) -> usize {
        self.by_source.get(&source).copied().unwrap_or(0)
    }

    fn percent(&self, count: usize) -> f64 {
        if self.total > 0 {
            (count as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Emit the summary through the logging facade
    pub fn log_summary(&self) {
        info!("BATCH SUMMARY:");
        info!("   Records: {}", self.total);
        for (source, count) in &self.by_source {
            info!("   {}: {} records", source, count);
        }
        for (level, count) in &self.by_level {
            info!("   {}: {} ({:.1}%)", level, count, self.level_percent(*level));
        }
        for (severity, count) in &self.by_severity {
            info!(
                "   severity {}: {} ({:.1}%)",
                severity,
                count,
                self.severity_percent(*severity)
            );
        }
        info!(
            "   Anomalies: {} ({:.2}%)",
            self.anomaly_count,
            self.anomaly_fraction() * 100.0
        );
        info!("   Correlated: {}", self.correlated_count);
        if self.unscored_count > 0 {
            info!("   Unscored: {}", self.unscored_count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlation::CorrelationConfig;
    use crate::generator::TimeWindow;
    use crate::pipeline::{Pipeline, PipelineConfig, SourceSpec};
    use chrono::{TimeZone, Utc};

    fn run_batch() -> Batch {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap();
        Pipeline::new(PipelineConfig {
            window: TimeWindow::new(start, end).unwrap(),
            siem: SourceSpec { count: 300, anomaly_rate: 0.1 },
            erp: SourceSpec { count: 300, anomaly_rate: 0.1 },
            application: SourceSpec { count: 400, anomaly_rate: 0.1 },
            correlation: CorrelationConfig { share_fraction: 0.3, inject_fraction: 0.4 },
            seed: 404,
        })
        .run()
        .unwrap()
    }

    #[test]
    fn test_summary_counts_add_up() {
        let batch = run_batch();
        let summary = BatchSummary::from_batch(&batch);

        assert_eq!(summary.total, 1_000);
        assert_eq!(summary.by_level.values().sum::<usize>(), 1_000);
        assert_eq!(
            summary.by_severity.values().sum::<usize>() + summary.unscored_count,
            1_000
        );
        assert_eq!(summary.source_count(SourceType::Application), 400);
        assert_eq!(summary.unscored_count, 0);
    }

    #[test]
    fn test_anomaly_fraction_matches_rate() {
        let batch = run_batch();
        let summary = BatchSummary::from_batch(&batch);
        assert!((summary.anomaly_fraction() - 0.1).abs() < 0.005);
    }

    #[test]
    fn test_empty_summary_is_all_zero() {
        let summary = BatchSummary::from_records(std::iter::empty());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.anomaly_fraction(), 0.0);
        assert_eq!(summary.level_percent(LogLevel::Info), 0.0);
    }

    #[test]
    fn test_info_dominates_level_distribution() {
        let batch = run_batch();
        let summary = BatchSummary::from_batch(&batch);
        let info_pct = summary.level_percent(LogLevel::Info);
        assert!(info_pct > 35.0, "info {:.1}%", info_pct);
    }
}
