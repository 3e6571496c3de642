use std::io::{self, Write};

use crate::model::command::{CommandDescriptor, CommandKind};

/// Whether the shell loop keeps going after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Halt,
}

/// Performs the effect of a command that already passed the gate.
pub trait CommandExecutor {
    fn execute(&mut self, command: CommandDescriptor, out: &mut dyn Write) -> io::Result<Flow>;
}

/// Prints what each command would do on the simulated device. Reboot and
/// shutdown end the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleExecutor;

impl CommandExecutor for ConsoleExecutor {
    fn execute(&mut self, command: CommandDescriptor, out: &mut dyn Write) -> io::Result<Flow> {
        tracing::info!("executing {} command", command.kind);

        let flow = match command.kind {
            CommandKind::SystemInfo => {
                writeln!(out, "Displaying system info...")?;
                Flow::Continue
            }
            CommandKind::Settings => {
                writeln!(out, "Opening settings...")?;
                Flow::Continue
            }
            CommandKind::Diagnostics => {
                writeln!(out, "Running diagnostics...")?;
                Flow::Continue
            }
            CommandKind::Help => {
                writeln!(out, "Showing help...")?;
                Flow::Continue
            }
            CommandKind::Reboot => {
                writeln!(out, "Rebooting system...")?;
                writeln!(out, "System reboot initiated.")?;
                Flow::Halt
            }
            CommandKind::Shutdown => {
                writeln!(out, "Shutting down system...")?;
                writeln!(out, "System shutdown initiated.")?;
                Flow::Halt
            }
            _ => {
                writeln!(out, "Command not implemented yet.")?;
                Flow::Continue
            }
        };

        Ok(flow)
    }
}
