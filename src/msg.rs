use crate::executor::Flow;
use crate::model::command::CommandKind;
use crate::model::menu::NodeId;

/// Result of feeding one line of input to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Blank line; nothing happens.
    Ignored,
    /// Moved into an interior node.
    Descended(NodeId),
    /// Back token popped the stack.
    Returned(NodeId),
    /// Back token at the root with nothing to pop.
    AtTop,
    /// No child matched. Recoverable, state unchanged.
    InvalidSelection {
        input: String,
        suggestion: Option<String>,
    },
    /// The gate refused the leaf's command kind.
    Denied(CommandKind),
    /// The leaf was forwarded to the executor.
    Executed { kind: CommandKind, flow: Flow },
}

impl Outcome {
    pub fn halts(&self) -> bool {
        matches!(
            self,
            Outcome::Executed {
                flow: Flow::Halt,
                ..
            }
        )
    }
}
