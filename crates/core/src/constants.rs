use std::time::Duration;

/// Currency every stored rate is quoted against
pub const BASE_CURRENCY_CODE: &str = "PLN";

/// Provider name reported on resolved rates
pub const PROVIDER_NAME: &str = "NBP";

/// Human readable provider description
pub const PROVIDER_DESCRIPTION: &str = "Narodowy Bank Polski";

/// How long a query waits for the first successful load
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Days walked back from the requested date when it has no publication
pub const DEFAULT_WALK_BACK_DAYS: u32 = 7;

/// Significant digits kept after a division (64-bit decimal context)
pub const DIVISION_SIGNIFICANT_DIGITS: u32 = 16;

/// Concurrent one-off resource loads at startup
pub const DEFAULT_STARTUP_CONCURRENCY: usize = 4;
