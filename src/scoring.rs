//! Severity Scorer: pure weighted-factor mapping from record fields to a
//! business-impact bucket.
//!
//! Each factor is an ordered tier table of (match list, points); the highest
//! matching tier wins, the four factor scores add on a 0-100 scale, and fixed
//! thresholds pick the bucket. Ties at a boundary resolve to the lower
//! bucket. Tier lists and thresholds are data, calibrated via
//! `ScoringTable::default`.

use crate::model::{LogLevel, LogRecord, Severity};

/// One tier of a factor: points awarded when any needle matches
#[derive(Debug, Clone)]
pub struct Tier {
    pub points: u32,
    pub needles: Vec<&'static str>,
}

/// Ordered tier list (highest tier first) with a floor for unmatched input
#[derive(Debug, Clone)]
pub struct TierTable {
    tiers: Vec<Tier>,
    unmatched_points: u32,
}

impl TierTable {
    pub fn new(tiers: Vec<Tier>, unmatched_points: u32) -> Self {
        Self { tiers, unmatched_points }
    }

    /// Score a lowercased haystack against the tiers, first match wins
    pub fn score(&self, haystack: &str) -> u32 {
        for tier in &self.tiers {
            if tier.needles.iter().any(|needle| haystack.contains(needle)) {
                return tier.points;
            }
        }
        self.unmatched_points
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SeverityThresholds {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
}

/// Complete factor configuration for the scorer
#[derive(Debug, Clone)]
pub struct ScoringTable {
    pub service: TierTable,
    pub message: TierTable,
    pub route: TierTable,
    pub level_points: Vec<(LogLevel, u32)>,
    pub thresholds: SeverityThresholds,
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self {
            service: TierTable::new(
                vec![
                    Tier {
                        points: 40,
                        needles: vec!["payment", "auth", "checkout", "billing", "idp"],
                    },
                    Tier {
                        points: 30,
                        needles: vec!["order", "user", "database", "vpn", "dc-ad", "finance"],
                    },
                    Tier {
                        points: 20,
                        needles: vec![
                            "inventory",
                            "cart",
                            "search",
                            "notification",
                            "proxy",
                            "sales",
                            "procurement",
                            "fw-edge",
                        ],
                    },
                    Tier {
                        points: 10,
                        needles: vec!["health", "ping", "test", "monitor", "report", "analytics", "mail"],
                    },
                ],
                10,
            ),
            message: TierTable::new(
                vec![
                    Tier {
                        points: 20,
                        needles: vec![
                            "unauthorized",
                            "breach",
                            "security violation",
                            "integrity check failed",
                            "tampering",
                            "data corruption",
                        ],
                    },
                    Tier {
                        points: 13,
                        needles: vec![
                            "connection failed",
                            "timeout",
                            "rolled back",
                            "unhandled exception",
                            "aborted",
                            "unavailable",
                            "unresponsive",
                        ],
                    },
                    Tier {
                        points: 7,
                        needles: vec![
                            "slow",
                            "retry",
                            "degraded",
                            "rate limit",
                            "multiple failed attempts",
                            "posted with warnings",
                        ],
                    },
                ],
                0,
            ),
            route: TierTable::new(
                vec![
                    Tier {
                        points: 15,
                        needles: vec!["/payment", "/auth", "/checkout", "f110", "fb60", "miro", "vf01"],
                    },
                    Tier {
                        points: 9,
                        needles: vec![
                            "/orders", "/users", "/cart", "/api", "va01", "me21n", "pa30", "fb01",
                            "fk01", "mm01",
                        ],
                    },
                    Tier {
                        points: 2,
                        needles: vec!["/health", "/ping", "/metrics", "/test"],
                    },
                ],
                5,
            ),
            level_points: vec![
                (LogLevel::Fatal, 25),
                (LogLevel::Error, 18),
                (LogLevel::Warn, 10),
                (LogLevel::Info, 2),
                (LogLevel::Debug, 2),
            ],
            thresholds: SeverityThresholds { critical: 80, high: 60, medium: 35 },
        }
    }
}

/// Pure scorer over a single record; holds no mutable state
#[derive(Debug, Clone, Default)]
pub struct SeverityScorer {
    table: ScoringTable,
}

impl SeverityScorer {
    pub fn new(table: ScoringTable) -> Self {
        Self { table }
    }

    /// Raw additive score on the 0-100 scale
    pub fn score_value(&self, record: &LogRecord) -> u32 {
        let service = record.fields.service_label().to_ascii_lowercase();
        let message = record.message.to_ascii_lowercase();

        let service_points = self.table.service.score(&service);
        let level_points = self
            .table
            .level_points
            .iter()
            .find(|(level, _)| *level == record.level)
            .map(|(_, points)| *points)
            .unwrap_or(0);
        let message_points = self.table.message.score(&message);
        let route_points = match record.fields.route_label() {
            Some(route) => self.table.route.score(&route.to_ascii_lowercase()),
            None => self.table.route.unmatched_points,
        };

        service_points + level_points + message_points + route_points
    }

    /// Map a record to its severity bucket. Boundary ties resolve downward.
    pub fn score(&self, record: &LogRecord) -> Severity {
        let value = self.score_value(record);
        let t = self.table.thresholds;
        if value > t.critical {
            Severity::Critical
        } else if value > t.high {
            Severity::High
        } else if value > t.medium {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}
