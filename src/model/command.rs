/// Every kind of command a menu node can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Sentinel: the node only opens its children.
    OpenSubmenu,
    SystemInfo,
    Settings,
    Diagnostics,
    Help,
    Accessibility,
    Network,
    User,
    Admin,
    Developer,
    Integrations,
    Tools,
    Data,
    MlLogics,
    AgenticPatterns,
    BootstrapSequence,
    Reboot,
    Shutdown,
}

impl CommandKind {
    pub const ALL: [CommandKind; 18] = [
        CommandKind::OpenSubmenu,
        CommandKind::SystemInfo,
        CommandKind::Settings,
        CommandKind::Diagnostics,
        CommandKind::Help,
        CommandKind::Accessibility,
        CommandKind::Network,
        CommandKind::User,
        CommandKind::Admin,
        CommandKind::Developer,
        CommandKind::Integrations,
        CommandKind::Tools,
        CommandKind::Data,
        CommandKind::MlLogics,
        CommandKind::AgenticPatterns,
        CommandKind::BootstrapSequence,
        CommandKind::Reboot,
        CommandKind::Shutdown,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CommandKind::OpenSubmenu => "open_submenu",
            CommandKind::SystemInfo => "system_info",
            CommandKind::Settings => "settings",
            CommandKind::Diagnostics => "diagnostics",
            CommandKind::Help => "help",
            CommandKind::Accessibility => "accessibility",
            CommandKind::Network => "network",
            CommandKind::User => "user",
            CommandKind::Admin => "admin",
            CommandKind::Developer => "developer",
            CommandKind::Integrations => "integrations",
            CommandKind::Tools => "tools",
            CommandKind::Data => "data",
            CommandKind::MlLogics => "ml_logics",
            CommandKind::AgenticPatterns => "agentic_patterns",
            CommandKind::BootstrapSequence => "bootstrap_sequence",
            CommandKind::Reboot => "reboot",
            CommandKind::Shutdown => "shutdown",
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The command attached to a menu node. Identity only, no state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandDescriptor {
    pub kind: CommandKind,
}

impl CommandDescriptor {
    pub const fn new(kind: CommandKind) -> Self {
        Self { kind }
    }

    pub fn opens_submenu(&self) -> bool {
        self.kind == CommandKind::OpenSubmenu
    }
}

impl From<CommandKind> for CommandDescriptor {
    fn from(kind: CommandKind) -> Self {
        Self::new(kind)
    }
}

/// Who is driving the shell. Carried through the gate so a role-aware policy can
/// replace the fixed denylist later without changing call sites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustContext {
    pub principal: Option<String>,
    pub roles: Vec<String>,
}

impl TrustContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_user(principal: impl Into<String>, roles: impl IntoIterator<Item = String>) -> Self {
        Self {
            principal: Some(principal.into()),
            roles: roles.into_iter().collect(),
        }
    }
}

/// Kinds that never reach the executor, whoever is signed in.
// TODO: reconcile with role grants once the access-control product decision lands.
const BLOCKED_KINDS: [CommandKind; 2] = [CommandKind::Developer, CommandKind::Admin];

/// Command enumeration plus the execution gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRegistry;

impl CommandRegistry {
    pub fn kinds(&self) -> &'static [CommandKind] {
        &CommandKind::ALL
    }

    /// Gate evaluated once per leaf-execution attempt. The trust context does not
    /// unlock anything: admin and developer kinds are refused unconditionally.
    pub fn is_blocked(&self, kind: CommandKind, _trust: &TrustContext) -> bool {
        BLOCKED_KINDS.contains(&kind)
    }
}
