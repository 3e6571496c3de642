//! Menu-driven operator shell whose tree is extended at startup by plugins.

pub mod app;
pub mod executor;
pub mod model;
pub mod msg;
pub mod plugin;

pub use app::MenuShell;
pub use executor::{CommandExecutor, ConsoleExecutor, Flow};
pub use model::command::{CommandDescriptor, CommandKind, CommandRegistry, TrustContext};
pub use model::menu::{MenuNode, MenuTree, NodeId};
pub use msg::Outcome;
