//! HTTP handlers for the acquisition service.

pub mod acquire;

pub use acquire::{router, AcquireFailure, AcquireParams, HealthResponse};
