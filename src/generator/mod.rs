//! Source generators for the three simulated log origins
//! Each generator owns a seeded RNG and an injected field library

pub mod application;
pub mod erp;
pub mod siem;

use crate::error::{Result, SynthError};
use crate::model::{LogLevel, LogRecord, SourceType};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

pub use application::ApplicationGenerator;
pub use erp::ErpGenerator;
pub use siem::SiemGenerator;

/// Generation time window. End must be strictly after start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end <= start {
            return Err(SynthError::config(format!(
                "generation stage: time_window end ({}) must be after start ({})",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts <= self.end
    }

    /// Uniform sample inside the window, millisecond granularity
    pub fn sample<R: Rng>(&self, rng: &mut R) -> DateTime<Utc> {
        let span_ms = (self.end - self.start).num_milliseconds().max(1);
        self.start + Duration::milliseconds(rng.gen_range(0..span_ms))
    }
}

/// Weighted level-distribution table. Weights are per-source defaults;
/// every record's level is sampled independently.
#[derive(Debug, Clone)]
pub struct LevelTable {
    entries: &'static [(LogLevel, u32)],
    total: u32,
}

impl LevelTable {
    pub fn new(entries: &'static [(LogLevel, u32)]) -> Self {
        let total = entries.iter().map(|(_, w)| w).sum();
        Self { entries, total }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> LogLevel {
        let mut roll = rng.gen_range(0..self.total);
        for (level, weight) in self.entries {
            if roll < *weight {
                return *level;
            }
            roll -= weight;
        }
        // unreachable for non-empty tables; keep a safe floor
        LogLevel::Info
    }
}

/// Contract every source generator implements.
///
/// A zero count yields an empty batch, not an error. Window validity is
/// enforced at `TimeWindow` construction, before any generation starts.
pub trait SourceGenerator {
    fn source_type(&self) -> SourceType;

    fn generate(&mut self, count: usize, window: &TimeWindow) -> Vec<LogRecord>;
}

pub(crate) fn pick<'a, R: Rng>(rng: &mut R, arr: &'a [&'a str]) -> &'a str {
    arr[rng.gen_range(0..arr.len())]
}

pub(crate) fn random_ip<R: Rng>(rng: &mut R) -> String {
    format!(
        "{}.{}.{}.{}",
        rng.gen_range(1..=223),
        rng.gen_range(0..=255),
        rng.gen_range(0..=255),
        rng.gen_range(1..=254)
    )
}

pub(crate) fn internal_ip<R: Rng>(rng: &mut R) -> String {
    format!("10.{}.{}.{}", rng.gen_range(0..=63), rng.gen_range(0..=255), rng.gen_range(1..=254))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::{rngs::StdRng, SeedableRng};

    fn window() -> TimeWindow {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap();
        TimeWindow::new(start, end).unwrap()
    }

    #[test]
    fn test_window_rejects_inverted_bounds() {
        let start = Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let err = TimeWindow::new(start, end).unwrap_err();
        assert!(err.to_string().contains("time_window"));
        // equal bounds are also rejected
        assert!(TimeWindow::new(start, start).is_err());
    }

    #[test]
    fn test_window_sampling_stays_in_bounds() {
        let window = window();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let ts = window.sample(&mut rng);
            assert!(window.contains(ts));
        }
    }

    #[test]
    fn test_level_table_distribution() {
        let table = LevelTable::new(&[
            (LogLevel::Info, 55),
            (LogLevel::Debug, 15),
            (LogLevel::Warn, 15),
            (LogLevel::Error, 12),
            (LogLevel::Fatal, 3),
        ]);
        let mut rng = StdRng::seed_from_u64(11);
        let mut info = 0usize;
        let mut fatal = 0usize;
        let n = 10_000;
        for _ in 0..n {
            match table.sample(&mut rng) {
                LogLevel::Info => info += 1,
                LogLevel::Fatal => fatal += 1,
                _ => {}
            }
        }
        let info_pct = info as f64 / n as f64;
        let fatal_pct = fatal as f64 / n as f64;
        assert!((0.50..0.60).contains(&info_pct), "info {}", info_pct);
        assert!((0.01..0.06).contains(&fatal_pct), "fatal {}", fatal_pct);
    }

    #[test]
    fn test_random_ip_shape() {
        let mut rng = StdRng::seed_from_u64(3);
        let ip = random_ip(&mut rng);
        assert_eq!(ip.split('.').count(), 4);
        let internal = internal_ip(&mut rng);
        assert!(internal.starts_with("10."));
    }
}
