//! Navigation over the first-party menu with bundled plugins attached.

use std::io::{self, Write};

use bootmenu::app::MenuShell;
use bootmenu::executor::{CommandExecutor, ConsoleExecutor, Flow};
use bootmenu::model::builder::build_root_menu;
use bootmenu::model::command::{CommandDescriptor, CommandKind, TrustContext};
use bootmenu::model::config::ShellConfig;
use bootmenu::model::menu::MenuTree;
use bootmenu::msg::Outcome;
use bootmenu::plugin::PluginManager;
use bootmenu::plugin::builtin::register_builtin;
use bootmenu::plugin::integrity::TrustAll;
use bootmenu::plugin::registry::StaticUnits;
use bootmenu::plugin::store::MemoryStore;

#[derive(Default)]
struct CountingExecutor {
    calls: Vec<CommandKind>,
}

impl CommandExecutor for CountingExecutor {
    fn execute(&mut self, command: CommandDescriptor, _out: &mut dyn Write) -> io::Result<Flow> {
        self.calls.push(command.kind);
        Ok(Flow::Continue)
    }
}

fn tree_with_plugins() -> MenuTree {
    let mut tree = build_root_menu();
    let root = tree.root();
    let mut units = StaticUnits::new();
    register_builtin(&mut units);

    let store = MemoryStore::new()
        .with("sample.toml", "name = \"SamplePlugin\"\nversion = \"1.0.0\"\n")
        .with("extended.toml", "name = \"ExtendedPlugin\"\nversion = \"2.1.0\"\n");
    let mut manager = PluginManager::new(store, TrustAll, units);
    let report = manager.load_all(&mut tree, root);
    assert_eq!(report.loaded_count(), 2);
    tree
}

fn step(shell: &mut MenuShell<CountingExecutor>, input: &str) -> Outcome {
    shell.step(input, &mut io::sink()).unwrap()
}

#[test]
fn security_logs_is_denied_for_every_trust_context() {
    let contexts = [
        TrustContext::anonymous(),
        TrustContext::for_user("ops", ["Admin".to_string()]),
        TrustContext::for_user("dev", ["Developer".to_string()]),
    ];

    for trust in contexts {
        let mut shell = MenuShell::new(
            tree_with_plugins(),
            CountingExecutor::default(),
            ShellConfig::default(),
        )
        .with_trust(trust);

        assert!(matches!(step(&mut shell, "Developer"), Outcome::Descended(_)));
        assert_eq!(
            step(&mut shell, "security logs"),
            Outcome::Denied(CommandKind::Admin)
        );
        assert!(shell.executor().calls.is_empty());
    }
}

#[test]
fn back_stack_is_symmetric_at_any_depth() {
    let mut shell = MenuShell::new(
        tree_with_plugins(),
        CountingExecutor::default(),
        ShellConfig::default(),
    );

    let path = ["Plugins", "List Installed"];
    let mut visited = vec![shell.current()];
    for title in path {
        assert!(matches!(step(&mut shell, title), Outcome::Descended(_)));
        visited.push(shell.current());
    }
    assert_eq!(shell.depth(), path.len());

    visited.pop();
    while let Some(expected) = visited.pop() {
        assert_eq!(step(&mut shell, "Exit"), Outcome::Returned(expected));
        assert_eq!(shell.current(), expected);
    }
    assert_eq!(step(&mut shell, "EXIT"), Outcome::AtTop);
}

#[test]
fn plugin_commands_are_reachable_from_the_root() {
    let mut shell = MenuShell::new(
        tree_with_plugins(),
        CountingExecutor::default(),
        ShellConfig::default(),
    );

    step(&mut shell, "extendedplugin");
    assert_eq!(shell.breadcrumb(), vec!["Main Menu", "ExtendedPlugin"]);

    let outcome = step(&mut shell, "ADVANCED DIAGNOSTICS");
    assert_eq!(
        outcome,
        Outcome::Executed {
            kind: CommandKind::Diagnostics,
            flow: Flow::Continue
        }
    );
    assert_eq!(shell.breadcrumb(), vec!["Main Menu", "ExtendedPlugin"]);
}

#[test]
fn interior_nodes_with_gated_kind_are_still_navigable() {
    let mut shell = MenuShell::new(
        tree_with_plugins(),
        CountingExecutor::default(),
        ShellConfig::default(),
    );

    assert!(matches!(
        step(&mut shell, "access control"),
        Outcome::Descended(_)
    ));
    assert_eq!(
        step(&mut shell, "user management"),
        Outcome::Denied(CommandKind::Admin)
    );
}

#[test]
fn console_session_transcript() {
    let mut shell = MenuShell::new(tree_with_plugins(), ConsoleExecutor, ShellConfig::default());
    let input = io::Cursor::new("plugins\nEXIT\nSystem Info\nDeveloper\nSecurity Logs\nEXIT\nReboot\n");
    let mut out = Vec::new();

    shell.run(input, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("==== Plugins ===="));
    assert_eq!(text.matches("Displaying system info...").count(), 1);
    assert!(text.contains("[ERROR] Blocked: unauthorized command."));
    assert!(text.contains("System reboot initiated."));
    assert_eq!(shell.current(), shell.tree().root());
}
