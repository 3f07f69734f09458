//! Engine and configuration errors

/// Errors returned by a spin request
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid bet: {0} (must be a finite amount greater than zero)")]
    InvalidBet(f64),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration parsing and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown config format: {0} (expected .json, .yaml or .yml)")]
    UnknownFormat(String),

    #[error("Weight table '{0}' is empty")]
    EmptyTable(&'static str),

    #[error("Weight table '{table}' has a zero weight at index {index}")]
    ZeroWeight { table: &'static str, index: usize },

    #[error("Spawn chance must be within [0, 1], got {0}")]
    InvalidChance(f64),

    #[error("Invalid spawn count range {min}..={max}")]
    InvalidCountRange { min: u32, max: u32 },

    #[error("Tumble limit must be at least 1")]
    InvalidTumbleLimit,

    #[error("Invalid pay tier for {symbol}: {reason}")]
    InvalidTier { symbol: String, reason: String },

    #[error("Paytable lists {0} more than once")]
    DuplicatePayEntry(String),

    #[error("Multiplier value at index {index} must be finite and positive, got {value}")]
    InvalidMultiplierValue { index: usize, value: f64 },

    #[error("Invalid scatter award at index {index}: {reason}")]
    InvalidScatterAward { index: usize, reason: String },

    #[error("Invalid win tier thresholds: big {big_win}, mega {mega_win}")]
    InvalidWinTiers { big_win: f64, mega_win: f64 },
}
