use std::collections::HashMap;

use slotmap::{SlotMap, new_key_type};

use super::command::{CommandDescriptor, CommandKind};

new_key_type! {
    /// Handle to a node stored in a [`MenuTree`].
    pub struct NodeId;
}

/// Case-folded key used for sibling lookup.
pub fn normalize_title(text: &str) -> String {
    text.trim().to_lowercase()
}

#[derive(Debug, Clone)]
pub struct MenuNode {
    pub title: String,
    pub command: Option<CommandDescriptor>,
    children: HashMap<String, NodeId>,
}

impl MenuNode {
    fn new(title: impl Into<String>, command: Option<CommandDescriptor>) -> Self {
        Self {
            title: title.into(),
            command,
            children: HashMap::new(),
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn kind(&self) -> Option<CommandKind> {
        self.command.map(|command| command.kind)
    }
}

/// Arena-backed menu hierarchy.
///
/// Nodes are only ever created by [`MenuTree::add_child`], so every node has exactly
/// one parent and cycles cannot be formed.
#[derive(Debug, Clone)]
pub struct MenuTree {
    nodes: SlotMap<NodeId, MenuNode>,
    root: NodeId,
}

impl MenuTree {
    pub fn new(root_title: impl Into<String>) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(MenuNode::new(root_title, None));
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&MenuNode> {
        self.nodes.get(id)
    }

    pub fn title(&self, id: NodeId) -> &str {
        self.nodes
            .get(id)
            .map(|node| node.title.as_str())
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a fresh child under `parent`, keyed by its normalized title.
    ///
    /// A sibling with the same normalized title is replaced and its whole subtree
    /// is dropped. Returns `None` only when `parent` is not part of this tree.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        title: impl Into<String>,
        command: Option<CommandDescriptor>,
    ) -> Option<NodeId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }

        let title = title.into();
        let key = normalize_title(&title);
        let child = self.nodes.insert(MenuNode::new(title, command));

        let replaced = self
            .nodes
            .get_mut(parent)
            .and_then(|node| node.children.insert(key, child));

        if let Some(old) = replaced {
            tracing::debug!("menu entry '{}' replaced", self.title(child));
            self.drop_subtree(old);
        }

        Some(child)
    }

    /// Shorthand for a node carrying `kind`.
    pub fn add_entry(
        &mut self,
        parent: NodeId,
        title: impl Into<String>,
        kind: CommandKind,
    ) -> Option<NodeId> {
        self.add_child(parent, title, Some(CommandDescriptor::new(kind)))
    }

    /// Single-level, case-insensitive lookup by displayed title.
    pub fn get_child(&self, parent: NodeId, text: &str) -> Option<NodeId> {
        self.nodes
            .get(parent)?
            .children
            .get(&normalize_title(text))
            .copied()
    }

    /// A leaf has no children and a command other than the submenu sentinel.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };

        !node.has_children()
            && node
                .command
                .map(|command| !command.opens_submenu())
                .unwrap_or(false)
    }

    /// Children of `parent`, ordered by title for display.
    pub fn children(&self, parent: NodeId) -> Vec<NodeId> {
        let Some(node) = self.nodes.get(parent) else {
            return Vec::new();
        };

        let mut children: Vec<NodeId> = node.children.values().copied().collect();
        children.sort_by_key(|id| normalize_title(self.title(*id)));
        children
    }

    fn drop_subtree(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(next) {
                pending.extend(node.children.into_values());
            }
        }
    }
}
