//! Field Library: per-source vocabularies used by all generators
//! Read-only data injected at generator construction, never module state

/// Amount range paired with a currency code. Zero-decimal currencies use
/// larger magnitudes so rendered amounts stay plausible.
#[derive(Debug, Clone, Copy)]
pub struct CurrencyRange {
    pub code: &'static str,
    pub min_amount: f64,
    pub max_amount: f64,
    pub decimals: u32,
}

/// Immutable vocabulary tables for every source type.
///
/// Constructed once and shared between generators (wrap in `Arc` for the
/// parallel pipeline); holding it by reference keeps test invocations
/// independent of each other.
#[derive(Debug, Clone)]
pub struct FieldLibrary {
    // Application-style
    pub app_services: &'static [&'static str],
    pub app_endpoints: &'static [&'static str],
    pub http_methods: &'static [&'static str],
    pub app_ok_phrases: &'static [&'static str],
    pub app_warn_phrases: &'static [&'static str],
    pub app_error_phrases: &'static [&'static str],

    // ERP-style
    pub erp_transaction_codes: &'static [&'static str],
    pub erp_modules: &'static [&'static str],
    pub erp_departments: &'static [&'static str],
    pub erp_currencies: &'static [CurrencyRange],

    // SIEM-style
    pub siem_hosts: &'static [&'static str],
    pub siem_event_categories: &'static [&'static str],
    pub siem_rule_names: &'static [&'static str],
    pub siem_event_ids: &'static [&'static str],

    // Shared
    pub user_names: &'static [&'static str],
}

const APP_SERVICES: &[&str] = &[
    "payment-api",
    "auth-service",
    "checkout-service",
    "order-service",
    "user-service",
    "inventory-service",
    "cart-service",
    "search-api",
    "notification-service",
    "report-service",
    "analytics-service",
    "health-check",
];

const APP_ENDPOINTS: &[&str] = &[
    "/payment/process",
    "/payment/refund",
    "/auth/login",
    "/auth/token",
    "/checkout/confirm",
    "/orders",
    "/orders/status",
    "/users/profile",
    "/cart/items",
    "/search",
    "/api/v1/products",
    "/notifications/send",
    "/health",
    "/ping",
    "/metrics",
];

const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE", "PATCH"];

const APP_OK_PHRASES: &[&str] = &[
    "request completed",
    "operation completed",
    "payload validated",
    "response served from cache",
    "session refreshed",
];

const APP_WARN_PHRASES: &[&str] = &[
    "slow response detected",
    "retrying upstream call",
    "rate limit approaching",
    "deprecated parameter used",
];

const APP_ERROR_PHRASES: &[&str] = &[
    "connection failed to upstream",
    "upstream timeout exceeded",
    "unhandled exception in handler",
    "circuit breaker open",
];

const ERP_TRANSACTION_CODES: &[&str] = &[
    "VA01", "ME21N", "FB60", "MIRO", "VF01", "F110", "PA30", "MM01", "FB01", "FK01",
];

const ERP_MODULES: &[&str] = &["FI", "MM", "SD", "HR", "PP", "CO"];

const ERP_DEPARTMENTS: &[&str] = &[
    "finance",
    "procurement",
    "sales",
    "hr",
    "logistics",
    "manufacturing",
];

const ERP_CURRENCIES: &[CurrencyRange] = &[
    CurrencyRange { code: "USD", min_amount: 10.0, max_amount: 50_000.0, decimals: 2 },
    CurrencyRange { code: "EUR", min_amount: 10.0, max_amount: 45_000.0, decimals: 2 },
    CurrencyRange { code: "GBP", min_amount: 10.0, max_amount: 40_000.0, decimals: 2 },
    CurrencyRange { code: "CHF", min_amount: 10.0, max_amount: 48_000.0, decimals: 2 },
    CurrencyRange { code: "JPY", min_amount: 1_000.0, max_amount: 5_000_000.0, decimals: 0 },
];

const SIEM_HOSTS: &[&str] = &[
    "fw-edge-01",
    "fw-edge-02",
    "idp-auth-01",
    "vpn-gw-01",
    "dc-ad-01",
    "proxy-dmz-01",
    "ids-sensor-03",
    "mail-gw-01",
];

const SIEM_EVENT_CATEGORIES: &[&str] = &[
    "authentication",
    "firewall",
    "ids",
    "vpn",
    "endpoint",
    "proxy",
];

const SIEM_RULE_NAMES: &[&str] = &[
    "Failed Logon Threshold",
    "Firewall Deny Burst",
    "Suspicious Process Spawn",
    "VPN Login From New Location",
    "Outbound Beacon Pattern",
    "Privilege Escalation Attempt",
];

const SIEM_EVENT_IDS: &[&str] = &["4624", "4625", "4648", "4672", "4688", "4720"];

const USER_NAMES: &[&str] = &[
    "alice.johnson",
    "bob.smith",
    "carol.davis",
    "david.martinez",
    "emma.wilson",
    "frank.brown",
    "grace.lee",
    "henry.taylor",
    "irene.anderson",
    "jack.thomas",
    "svc.batch",
    "svc.interface",
];

impl Default for FieldLibrary {
    fn default() -> Self {
        Self {
            app_services: APP_SERVICES,
            app_endpoints: APP_ENDPOINTS,
            http_methods: HTTP_METHODS,
            app_ok_phrases: APP_OK_PHRASES,
            app_warn_phrases: APP_WARN_PHRASES,
            app_error_phrases: APP_ERROR_PHRASES,
            erp_transaction_codes: ERP_TRANSACTION_CODES,
            erp_modules: ERP_MODULES,
            erp_departments: ERP_DEPARTMENTS,
            erp_currencies: ERP_CURRENCIES,
            siem_hosts: SIEM_HOSTS,
            siem_event_categories: SIEM_EVENT_CATEGORIES,
            siem_rule_names: SIEM_RULE_NAMES,
            siem_event_ids: SIEM_EVENT_IDS,
            user_names: USER_NAMES,
        }
    }
}
