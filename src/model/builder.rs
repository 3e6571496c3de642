use super::command::CommandKind;
use super::menu::{MenuTree, NodeId};

use CommandKind::*;

/// First-party branches present before any plugin attaches.
pub fn build_root_menu() -> MenuTree {
    let mut tree = MenuTree::new("Main Menu");
    let root = tree.root();

    for (title, kind) in [
        ("System Info", SystemInfo),
        ("Settings", Settings),
        ("Diagnostics", Diagnostics),
        ("Help", Help),
        ("Reboot", Reboot),
        ("Shutdown", Shutdown),
        ("Security Audit", Admin),
        ("Configuration", Settings),
    ] {
        tree.add_entry(root, title, kind);
    }

    branch(
        &mut tree,
        root,
        ("Access Control", Admin),
        &[
            ("User Management", Admin),
            ("Role Management", Admin),
            ("Permission Audit", Admin),
        ],
    );

    branch(
        &mut tree,
        root,
        ("Plugins", OpenSubmenu),
        &[
            ("List Installed", OpenSubmenu),
            ("Install New", OpenSubmenu),
            ("Update All", OpenSubmenu),
            ("Plugin Audit", Admin),
        ],
    );

    branch(
        &mut tree,
        root,
        ("Cloud Integration", Integrations),
        &[
            ("AWS SageMaker", Integrations),
            ("Azure ML", Integrations),
            ("Google AI Platform", Integrations),
            ("Upload Model", Tools),
            ("Invoke Prediction", Tools),
        ],
    );

    branch(
        &mut tree,
        root,
        ("Developer", Developer),
        &[
            ("API Explorer", Developer),
            ("Debug Tools", Developer),
            ("Test Harness", Developer),
            ("Security Logs", Admin),
        ],
    );

    branch(
        &mut tree,
        root,
        ("Tools", Tools),
        &[
            ("Model Inspector", Tools),
            ("Hyperparameter Tuner", Tools),
            ("Performance Profiler", Tools),
            ("Explainability", Tools),
        ],
    );

    branch(
        &mut tree,
        root,
        ("Data", Data),
        &[
            ("Import", Data),
            ("Export", Data),
            ("Preprocessing", Data),
            ("Visualization", Data),
        ],
    );

    branch(
        &mut tree,
        root,
        ("ML Logics", MlLogics),
        &[
            ("Classification", MlLogics),
            ("Regression", MlLogics),
            ("Clustering", MlLogics),
            ("Dimensionality Reduction", MlLogics),
            ("Neural Networks", MlLogics),
            ("Ensemble Methods", MlLogics),
            ("Reinforcement Learning", MlLogics),
            ("Transformers", MlLogics),
            ("Agentic Patterns", AgenticPatterns),
        ],
    );

    branch(
        &mut tree,
        root,
        ("Bootstrap Sequence", BootstrapSequence),
        &[
            ("Stage 1: Loader", OpenSubmenu),
            ("Stage 2: Memory Setup", OpenSubmenu),
            ("Stage 3: Menu Shell", OpenSubmenu),
            ("Stage 4: ML Logic Init", OpenSubmenu),
        ],
    );

    tree
}

/// Add `head` under `parent`, then each of `entries` under `head`.
pub fn branch(
    tree: &mut MenuTree,
    parent: NodeId,
    head: (&str, CommandKind),
    entries: &[(&str, CommandKind)],
) -> Option<NodeId> {
    let (title, kind) = head;
    let node = tree.add_entry(parent, title, kind)?;
    for (title, kind) in entries {
        tree.add_entry(node, *title, *kind);
    }
    Some(node)
}
