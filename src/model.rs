//! Core record model shared by every pipeline stage
//! A single tagged-variant record type covers all three simulated sources

use crate::error::{Result, SynthError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Log level, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Simulated log origin. Fixed at record creation, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Siem,
    Erp,
    Application,
}

impl SourceType {
    /// All supported sources, in pipeline order
    pub const ALL: [SourceType; 3] = [SourceType::Siem, SourceType::Erp, SourceType::Application];

    /// Parse a source name. Unknown names are a fatal configuration error,
    /// never defaulted.
    pub fn parse(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "siem" => Ok(SourceType::Siem),
            "erp" => Ok(SourceType::Erp),
            "application" | "app" => Ok(SourceType::Application),
            other => Err(SynthError::unknown_source(other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Siem => "siem",
            SourceType::Erp => "erp",
            SourceType::Application => "application",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Business-impact severity bucket assigned by the scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of injected anomaly archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnomalyKind {
    SystemFailure,
    SecurityViolation,
    PerformanceDegradation,
    DataIntegrityError,
}

impl AnomalyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyKind::SystemFailure => "system-failure",
            AnomalyKind::SecurityViolation => "security-violation",
            AnomalyKind::PerformanceDegradation => "performance-degradation",
            AnomalyKind::DataIntegrityError => "data-integrity-error",
        }
    }
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source-specific structured fields. One variant per source; the variant
/// always matches the record's `source_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceFields {
    Siem {
        host: String,
        event_id: String,
        event_category: String,
        rule_name: String,
        outcome: String,
        user_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        affected_services: Option<Vec<String>>,
    },
    Erp {
        transaction_code: String,
        module: String,
        department: String,
        amount: f64,
        currency: String,
        document_id: String,
    },
    Application {
        service: String,
        http_method: String,
        endpoint: String,
        http_status: u16,
        response_time_ms: u64,
    },
}

impl SourceFields {
    /// Name-like label used for service-criticality matching
    pub fn service_label(&self) -> &str {
        match self {
            SourceFields::Siem { host, .. } => host,
            SourceFields::Erp { department, .. } => department,
            SourceFields::Application { service, .. } => service,
        }
    }

    /// Endpoint or transaction code, if the source carries one
    pub fn route_label(&self) -> Option<&str> {
        match self {
            SourceFields::Siem { .. } => None,
            SourceFields::Erp { transaction_code, .. } => Some(transaction_code),
            SourceFields::Application { endpoint, .. } => Some(endpoint),
        }
    }
}

/// A single synthetic log record flowing through the pipeline.
///
/// `severity` and the anomaly markers are populated by their owning stages;
/// everything else is final at generation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub source_type: SourceType,
    pub message: String,
    #[serde(rename = "structured_fields")]
    pub fields: SourceFields,
    pub correlation_id: Option<String>,
    pub request_id: Option<String>,
    pub session_id: Option<String>,
    pub ip_address: Option<String>,
    pub is_anomaly: bool,
    #[serde(rename = "anomaly_type", skip_serializing_if = "Option::is_none")]
    pub anomaly_kind: Option<AnomalyKind>,
    pub severity: Option<Severity>,
}

impl LogRecord {
    /// Create a fresh record with no linkage keys and no anomaly/severity
    /// markers; generators fill the rest in before handing it downstream.
    pub fn new(
        timestamp: DateTime<Utc>,
        level: LogLevel,
        source_type: SourceType,
        message: String,
        fields: SourceFields,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            level,
            source_type,
            message,
            fields,
            correlation_id: None,
            request_id: None,
            session_id: None,
            ip_address: None,
            is_anomaly: false,
            anomaly_kind: None,
            severity: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_record() -> LogRecord {
        LogRecord::new(
            Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            LogLevel::Info,
            SourceType::Application,
            "GET /health 200 12ms request completed".to_string(),
            SourceFields::Application {
                service: "health-check".to_string(),
                http_method: "GET".to_string(),
                endpoint: "/health".to_string(),
                http_status: 200,
                response_time_ms: 12,
            },
        )
    }

    #[test]
    fn test_source_type_parse() {
        assert_eq!(SourceType::parse("siem").unwrap(), SourceType::Siem);
        assert_eq!(SourceType::parse("ERP").unwrap(), SourceType::Erp);
        assert_eq!(SourceType::parse("app").unwrap(), SourceType::Application);
        assert!(SourceType::parse("mainframe").is_err());
        assert!(SourceType::parse("").is_err());
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Fatal);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_new_record_defaults() {
        let record = sample_record();
        assert!(!record.is_anomaly);
        assert!(record.anomaly_kind.is_none());
        assert!(record.severity.is_none());
        assert!(record.request_id.is_none());
    }

    #[test]
    fn test_serialization_shape() {
        let record = sample_record();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["level"], "INFO");
        assert_eq!(value["source_type"], "application");
        assert_eq!(value["structured_fields"]["endpoint"], "/health");
        // anomaly_type is omitted entirely for non-anomalous records
        assert!(value.get("anomaly_type").is_none());
        assert!(value["severity"].is_null());
    }

    #[test]
    fn test_anomaly_kind_serializes_kebab_case() {
        let kind = serde_json::to_value(AnomalyKind::SecurityViolation).unwrap();
        assert_eq!(kind, "security-violation");
    }

    #[test]
    fn test_field_labels() {
        let record = sample_record();
        assert_eq!(record.fields.service_label(), "health-check");
        assert_eq!(record.fields.route_label(), Some("/health"));

        let erp = SourceFields::Erp {
            transaction_code: "VA01".to_string(),
            module: "SD".to_string(),
            department: "sales".to_string(),
            amount: 1250.0,
            currency: "EUR".to_string(),
            document_id: "DOC-000123".to_string(),
        };
        assert_eq!(erp.service_label(), "sales");
        assert_eq!(erp.route_label(), Some("VA01"));
    }
}
