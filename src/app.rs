use std::io::{self, BufRead, Write};

use crossterm::style::Stylize;
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use smallvec::SmallVec;

use crate::executor::CommandExecutor;
use crate::model::command::{CommandRegistry, TrustContext};
use crate::model::config::ShellConfig;
use crate::model::menu::{MenuTree, NodeId, normalize_title};
use crate::msg::Outcome;

const INVALID_SELECTION: &str = "Invalid selection. Please choose a valid menu item.";
const ACCESS_DENIED: &str = "Blocked: unauthorized command.";

/// Interactive navigation over a finished menu tree.
///
/// State is the current node plus a back-stack of the interior nodes left
/// behind on each descent. Leaf execution never moves the cursor.
pub struct MenuShell<E: CommandExecutor> {
    tree: MenuTree,
    registry: CommandRegistry,
    trust: TrustContext,
    executor: E,
    config: ShellConfig,
    current: NodeId,
    back_stack: SmallVec<[NodeId; 8]>,
}

impl<E: CommandExecutor> MenuShell<E> {
    pub fn new(tree: MenuTree, executor: E, config: ShellConfig) -> Self {
        let current = tree.root();
        Self {
            tree,
            registry: CommandRegistry,
            trust: TrustContext::anonymous(),
            executor,
            config,
            current,
            back_stack: SmallVec::new(),
        }
    }

    pub fn with_trust(mut self, trust: TrustContext) -> Self {
        self.trust = trust;
        self
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.back_stack.len()
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Titles from the root down to the current node.
    pub fn breadcrumb(&self) -> Vec<&str> {
        self.back_stack
            .iter()
            .chain(std::iter::once(&self.current))
            .map(|id| self.tree.title(*id))
            .collect()
    }

    // ── Update ───────────────────────────────────────────────────

    /// Consume exactly one line of input. Executor output goes to `out`.
    pub fn step(&mut self, input: &str, out: &mut dyn Write) -> io::Result<Outcome> {
        let selection = normalize_title(input);

        if selection.is_empty() {
            return Ok(Outcome::Ignored);
        }

        if selection == normalize_title(&self.config.back_token) {
            return Ok(match self.back_stack.pop() {
                Some(previous) => {
                    self.current = previous;
                    tracing::debug!("returned to '{}'", self.tree.title(previous));
                    Outcome::Returned(previous)
                }
                None => Outcome::AtTop,
            });
        }

        let Some(selected) = self.tree.get_child(self.current, &selection) else {
            tracing::debug!("invalid selection '{}'", input.trim());
            return Ok(Outcome::InvalidSelection {
                input: input.trim().to_string(),
                suggestion: self.suggest(&selection),
            });
        };

        if !self.tree.is_leaf(selected) {
            self.back_stack.push(self.current);
            self.current = selected;
            tracing::debug!("entered '{}'", self.tree.title(selected));
            return Ok(Outcome::Descended(selected));
        }

        // Leaves always carry a command.
        let Some(command) = self.tree.node(selected).and_then(|node| node.command) else {
            return Ok(Outcome::Ignored);
        };

        if self.registry.is_blocked(command.kind, &self.trust) {
            tracing::warn!(
                "blocked {} command '{}'",
                command.kind,
                self.tree.title(selected)
            );
            return Ok(Outcome::Denied(command.kind));
        }

        let flow = self.executor.execute(command, out)?;
        Ok(Outcome::Executed {
            kind: command.kind,
            flow,
        })
    }

    fn suggest(&self, selection: &str) -> Option<String> {
        let matcher = SkimMatcherV2::default();
        self.tree
            .children(self.current)
            .into_iter()
            .filter_map(|id| {
                let title = self.tree.title(id);
                matcher
                    .fuzzy_match(title, selection)
                    .map(|score| (score, title))
            })
            .max_by_key(|(score, _)| *score)
            .map(|(_, title)| title.to_string())
    }

    // ── View ─────────────────────────────────────────────────────

    pub fn render_menu(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "==== {} ====", self.tree.title(self.current))?;
        for (idx, child) in self.tree.children(self.current).into_iter().enumerate() {
            writeln!(out, "{}. {}", idx + 1, self.tree.title(child))?;
        }
        writeln!(
            out,
            "Type the menu name to select. Type {} to go back.",
            self.config.back_token
        )
    }

    pub fn report(&self, outcome: &Outcome, out: &mut dyn Write) -> io::Result<()> {
        match outcome {
            Outcome::InvalidSelection { suggestion, .. } => {
                self.error_line(INVALID_SELECTION, out)?;
                if let Some(title) = suggestion {
                    writeln!(out, "Did you mean '{title}'?")?;
                }
                Ok(())
            }
            Outcome::Denied(_) => self.error_line(ACCESS_DENIED, out),
            Outcome::AtTop => writeln!(out, "Already at the top-level menu."),
            Outcome::Ignored
            | Outcome::Descended(_)
            | Outcome::Returned(_)
            | Outcome::Executed { .. } => Ok(()),
        }
    }

    fn error_line(&self, message: &str, out: &mut dyn Write) -> io::Result<()> {
        let line = format!("[ERROR] {message}");
        if self.config.color {
            writeln!(out, "{}", line.as_str().red())
        } else {
            writeln!(out, "{line}")
        }
    }

    // ── Loop ─────────────────────────────────────────────────────

    /// Read-eval loop. Ends when a command halts the session or input is exhausted.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> io::Result<()> {
        let mut buf = Vec::new();

        loop {
            self.render_menu(&mut out)?;
            write!(out, "{}", self.config.prompt)?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                tracing::info!("input closed, leaving shell");
                writeln!(out)?;
                return Ok(());
            }

            // Undecodable bytes become U+FFFD and fail lookup like any other typo.
            let line = String::from_utf8_lossy(&buf);
            let outcome = self.step(&line, &mut out)?;
            self.report(&outcome, &mut out)?;

            if outcome.halts() {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::Flow;
    use crate::model::command::{CommandDescriptor, CommandKind};

    #[derive(Default)]
    struct Recorder {
        calls: Vec<CommandKind>,
    }

    impl CommandExecutor for Recorder {
        fn execute(&mut self, command: CommandDescriptor, _out: &mut dyn Write) -> io::Result<Flow> {
            self.calls.push(command.kind);
            Ok(match command.kind {
                CommandKind::Shutdown => Flow::Halt,
                _ => Flow::Continue,
            })
        }
    }

    fn shell() -> MenuShell<Recorder> {
        let mut tree = MenuTree::new("Main Menu");
        let root = tree.root();
        tree.add_entry(root, "System Info", CommandKind::SystemInfo);
        tree.add_entry(root, "Shutdown", CommandKind::Shutdown);
        let plugins = tree.add_entry(root, "Plugins", CommandKind::OpenSubmenu).unwrap();
        tree.add_entry(plugins, "List Installed", CommandKind::OpenSubmenu);
        let developer = tree.add_entry(root, "Developer", CommandKind::Developer).unwrap();
        tree.add_entry(developer, "Security Logs", CommandKind::Admin);
        tree.add_entry(developer, "Debug Tools", CommandKind::Developer);

        MenuShell::new(tree, Recorder::default(), ShellConfig::default())
    }

    fn feed(shell: &mut MenuShell<Recorder>, input: &str) -> Outcome {
        shell.step(input, &mut io::sink()).unwrap()
    }

    #[test]
    fn descend_then_exit_returns_to_root() {
        let mut shell = shell();
        let root = shell.current();

        let outcome = feed(&mut shell, "plugins");
        assert!(matches!(outcome, Outcome::Descended(_)));
        assert_eq!(shell.breadcrumb(), vec!["Main Menu", "Plugins"]);

        assert_eq!(feed(&mut shell, "EXIT"), Outcome::Returned(root));
        assert_eq!(shell.current(), root);
        assert_eq!(shell.depth(), 0);
    }

    #[test]
    fn leaf_executes_once_and_stays_in_place() {
        let mut shell = shell();
        let root = shell.current();

        let outcome = feed(&mut shell, "System Info");

        assert_eq!(
            outcome,
            Outcome::Executed {
                kind: CommandKind::SystemInfo,
                flow: Flow::Continue
            }
        );
        assert_eq!(shell.executor().calls, vec![CommandKind::SystemInfo]);
        assert_eq!(shell.current(), root);
    }

    #[test]
    fn gated_leaves_never_reach_the_executor() {
        let mut shell = shell().with_trust(TrustContext::for_user(
            "admin",
            ["Admin".to_string(), "Developer".to_string()],
        ));
        feed(&mut shell, "developer");
        let inside = shell.current();

        assert_eq!(
            feed(&mut shell, "Security Logs"),
            Outcome::Denied(CommandKind::Admin)
        );
        assert_eq!(
            feed(&mut shell, "debug tools"),
            Outcome::Denied(CommandKind::Developer)
        );
        assert!(shell.executor().calls.is_empty());
        assert_eq!(shell.current(), inside);
    }

    #[test]
    fn unknown_input_is_recoverable_with_hint() {
        let mut shell = shell();
        let root = shell.current();

        let outcome = feed(&mut shell, "plugns");

        assert_eq!(
            outcome,
            Outcome::InvalidSelection {
                input: "plugns".to_string(),
                suggestion: Some("Plugins".to_string()),
            }
        );
        assert_eq!(shell.current(), root);
    }

    #[test]
    fn back_at_root_and_blank_lines_are_no_ops() {
        let mut shell = shell();
        let root = shell.current();

        assert_eq!(feed(&mut shell, "exit"), Outcome::AtTop);
        assert_eq!(feed(&mut shell, "   \n"), Outcome::Ignored);
        assert_eq!(shell.current(), root);
    }

    #[test]
    fn empty_submenu_can_be_entered_and_left() {
        let mut shell = shell();
        feed(&mut shell, "plugins");
        let plugins = shell.current();

        assert!(matches!(feed(&mut shell, "list installed"), Outcome::Descended(_)));
        assert_eq!(shell.depth(), 2);
        assert_eq!(feed(&mut shell, "EXIT"), Outcome::Returned(plugins));
    }

    #[test]
    fn run_renders_menu_and_stops_on_halt() {
        let mut shell = shell();
        let input = io::Cursor::new("nonsense\nsystem info\nshutdown\nsystem info\n");
        let mut out = Vec::new();

        shell.run(input, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("==== Main Menu ===="));
        assert!(text.contains("1. Developer"));
        assert!(text.contains("[ERROR] Invalid selection."));
        assert_eq!(
            shell.executor().calls,
            vec![CommandKind::SystemInfo, CommandKind::Shutdown]
        );
    }

    #[test]
    fn run_ends_when_input_closes() {
        let mut shell = shell();
        let mut out = Vec::new();

        shell.run(io::Cursor::new("plugins\n"), &mut out).unwrap();

        assert_eq!(shell.depth(), 1);
        assert!(String::from_utf8(out).unwrap().contains("==== Plugins ===="));
    }

    #[test]
    fn invalid_utf8_line_does_not_end_session() {
        let mut shell = shell();
        let mut input = vec![0xff, 0xfe, b'\n'];
        input.extend_from_slice(b"System Info\n");
        let mut out = Vec::new();

        shell.run(io::Cursor::new(input), &mut out).unwrap();

        assert_eq!(shell.executor().calls, vec![CommandKind::SystemInfo]);
        assert!(String::from_utf8(out).unwrap().contains("[ERROR] Invalid selection."));
    }
}
