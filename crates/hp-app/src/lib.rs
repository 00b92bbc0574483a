//! Shared application service layer for heatsim.
//!
//! This crate wires the orchestration pipeline together for any front end:
//! parameter resolution against the catalog, the design point driver with its
//! baseline cache, off-design and part-load execution, and result
//! aggregation with partial-failure semantics.

pub mod error;
pub mod report;
pub mod result;
pub mod service;

pub use error::{AppError, AppResult};
pub use report::{ReportSink, report_document};
pub use result::{DesignOutcome, DesignReport, SimulationResult, aggregate};
pub use service::SimulationService;
