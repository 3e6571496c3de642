pub mod builtin;
pub mod contract;
pub mod error;
pub mod integrity;
pub mod manager;
pub mod manifest;
pub mod registry;
pub mod runtime;
pub mod store;

pub use contract::Plugin;
pub use error::PluginLoadError;
pub use manager::{LoadReport, PluginManager};
