//! Project-level pipelines: configuration, source loading, persistence,
//! and the condense and bundle builds.

mod bundle;
mod condense;
pub mod config;
mod error;
pub mod file_loader;
mod host;
mod store;

pub use bundle::{Bundle, DependencyResolver, GemOutcome, GemSpec};
pub use condense::{Condense, CondenseReport};
pub use config::IndexConfig;
pub use error::ProjectError;
pub use host::{IndexHost, LoadReport};
pub use store::{MemoryStore, RegistryStore};
