//! Client for the metrics gateway that feeds the site dashboard.
//!
//! [`GatewayClient`] wraps a blocking HTTP client with the configured bearer
//! token and timeout. [`collect`] queries every endpoint and folds the
//! results into a [`DashboardSnapshot`], recording failures per section
//! instead of returning them.
pub mod client;
pub mod error;
pub mod models;
pub mod snapshot;

pub use client::{Endpoint, GatewayClient};
pub use error::FetchError;
pub use models::{Agent, CronJob, CronPayload, SystemMetrics};
pub use snapshot::{DashboardSnapshot, Limits, Section, collect};
