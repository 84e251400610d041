//! Engine access with actor pattern
//!
//! EngineService owns the ActionScheduler and processes commands via
//! channels, providing serialized access from any number of callers.

mod manager;
mod messages;

pub use manager::EngineService;
pub use messages::{EngineCommand, ServiceError, ServiceResponse};
