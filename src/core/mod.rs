//! Shared foundations: identifiers, errors, time and configuration

pub mod config;
pub mod error;
pub mod types;

pub use error::{ArcanumError, Result};
pub use types::{AbilityId, AgentId, ClassId};
