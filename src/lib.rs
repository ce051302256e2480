//! Back office for a pet grooming shop.
//!
//! [`gateway::PersistenceGateway`] owns the single database connection and
//! exposes the appointment, payment and user operations. [`pricing`] holds
//! the service catalog and the payment arithmetic, and [`desk::FrontDesk`]
//! drives both the way the shop counter does.

pub mod auth;
pub mod config;
pub mod db;
pub mod desk;
pub mod error;
pub mod gateway;
pub mod models;
pub mod pricing;

pub use error::{ErrorKind, GatewayError};
pub use gateway::PersistenceGateway;
