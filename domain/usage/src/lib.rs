//! Usage metering for compute instances: prorates instance lifecycles over a
//! reporting window and folds them into per-tenant summaries.

pub mod exception;
#[cfg(feature = "mock")]
pub mod mock;
pub mod model;
pub mod repository;
pub mod service;
