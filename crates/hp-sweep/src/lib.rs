//! hp-sweep: off-design grid generation and sweep execution.

pub mod grid;
pub mod partload;
pub mod sweep;

pub use grid::{Grid, GridCell, linspace, load_axis};
pub use partload::extract_partload;
pub use sweep::{OperatingPoint, SweepOptions, sweep};

pub type SweepResult<T> = Result<T, SweepError>;

#[derive(thiserror::Error, Debug)]
pub enum SweepError {
    #[error("Invalid axis: {0}")]
    InvalidAxis(#[from] hp_params::ValidationError),

    #[error("Unusable design baseline: {what}")]
    InvalidBaseline { what: String },

    #[error("Solver layer unusable: {what}")]
    Solver { what: String },

    #[error("Worker pool error: {what}")]
    WorkerPool { what: String },
}
