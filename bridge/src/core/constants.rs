// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "SpanBridge";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "spanbridge";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "spanbridge.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "SPANBRIDGE_CONFIG";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "SPANBRIDGE_LOG";

// =============================================================================
// Environment Variables - Exporter
// =============================================================================

/// Environment variable for the consumer kind
pub const ENV_EXPORTER: &str = "SPANBRIDGE_EXPORTER";

/// Environment variable for the file consumer output path
pub const ENV_OUTPUT: &str = "SPANBRIDGE_OUTPUT";

// =============================================================================
// Environment Variables - Sample Batch
// =============================================================================

/// Environment variable for the number of sample services
pub const ENV_SAMPLE_SERVICES: &str = "SPANBRIDGE_SAMPLE_SERVICES";

/// Environment variable for the number of spans per sample service
pub const ENV_SAMPLE_SPANS: &str = "SPANBRIDGE_SAMPLE_SPANS";

// =============================================================================
// Defaults
// =============================================================================

/// Default consumer kind
pub const DEFAULT_EXPORTER: &str = "logging";

/// Default number of services in the sample batch
pub const DEFAULT_SAMPLE_SERVICES: usize = 2;

/// Default number of spans per sample service
pub const DEFAULT_SAMPLE_SPANS_PER_SERVICE: usize = 3;

/// Upper bound for either sample dimension
pub const MAX_SAMPLE_SIZE: usize = 10_000;

/// Upper bound for the total number of sample spans
pub const MAX_SAMPLE_SPANS: usize = 100_000;

/// Instrumentation scope of generated sample spans
pub const SAMPLE_SCOPE_NAME: &str = "spanbridge.sample";
