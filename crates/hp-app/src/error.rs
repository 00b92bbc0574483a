//! Error types for the hp-app service layer.

/// Unified error surface for front ends.
///
/// Design failures and per-cell failures are values in the result types, not
/// errors; what escalates here is rejected configuration, an unusable store
/// or an unusable solver layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unknown topology: {0}")]
    UnknownTopology(String),

    #[error("Unknown refrigerant '{refrigerant}' in slot '{slot}'")]
    UnknownRefrigerant { refrigerant: String, slot: String },

    #[error(
        "Component vocabulary mismatch: solver does not support {component} required by topology '{topology}'"
    )]
    VocabularyMismatch { component: String, topology: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] hp_params::ValidationError),

    #[error("Store error: {0}")]
    Store(#[from] hp_store::StoreError),

    #[error("Sweep error: {0}")]
    Sweep(#[from] hp_sweep::SweepError),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for hp-app operations.
pub type AppResult<T> = Result<T, AppError>;
