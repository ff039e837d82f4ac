mod application;
pub mod data;
mod runtime_config;

pub use application::{Application, ApplicationError, SessionReport};
pub use runtime_config::RuntimeConfig;
