//! Tree navigation: sibling queries and structural edits.
//!
//! Every operation locates position by id search within the parent's child
//! list — O(children) per call. Queries against detached nodes or siblings
//! that are not current children report absent instead of failing; rewrite
//! passes probe structure speculatively and expect no-ops.

use crate::ast::{Ast, NodeId};

impl Ast {
    /// Position of `id` in its parent's child list. Absent when detached.
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.node(parent).children.iter().position(|&c| c == id)
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let idx = self.index_of(id)?;
        if idx == 0 {
            return None;
        }
        self.node(parent).children.get(idx - 1).copied()
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let idx = self.index_of(id)?;
        self.node(parent).children.get(idx + 1).copied()
    }

    /// The child of `parent` immediately before `child`.
    pub fn child_before(&self, parent: NodeId, child: NodeId) -> Option<NodeId> {
        let children = &self.node(parent).children;
        let idx = children.iter().position(|&c| c == child)?;
        if idx == 0 {
            return None;
        }
        children.get(idx - 1).copied()
    }

    /// The child of `parent` immediately after `child`.
    pub fn child_after(&self, parent: NodeId, child: NodeId) -> Option<NodeId> {
        let children = &self.node(parent).children;
        let idx = children.iter().position(|&c| c == child)?;
        children.get(idx + 1).copied()
    }

    /// Insert `new` into `target`'s parent list. The insertion point is one
    /// slot before `target` (historical placement, kept for compatibility
    /// with existing rewrite passes), clamped at the head of the list.
    /// Returns false when `target` is detached.
    pub fn insert_before(&mut self, target: NodeId, new: NodeId) -> bool {
        let Some(parent) = self.parent(target) else {
            return false;
        };
        let Some(idx) = self.index_of(target) else {
            return false;
        };
        self.node_mut(parent).children.insert(idx.saturating_sub(1), new);
        self.node_mut(new).parent = Some(parent);
        true
    }

    /// Insert `new` immediately after `target` in its parent list.
    /// Returns false when `target` is detached.
    pub fn insert_after(&mut self, target: NodeId, new: NodeId) -> bool {
        let Some(parent) = self.parent(target) else {
            return false;
        };
        let Some(idx) = self.index_of(target) else {
            return false;
        };
        self.node_mut(parent).children.insert(idx + 1, new);
        self.node_mut(new).parent = Some(parent);
        true
    }

    /// Detach `id` from its parent. Returns false when already detached.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        self.node_mut(parent).children.remove(idx);
        self.node_mut(id).parent = None;
        true
    }

    /// Substitute `new` at `old`'s position; `old` is detached. Returns the
    /// inserted node, or absent when `old` is not attached anywhere.
    pub fn replace(&mut self, old: NodeId, new: NodeId) -> Option<NodeId> {
        let parent = self.parent(old)?;
        let idx = self.index_of(old)?;
        self.node_mut(parent).children[idx] = new;
        self.node_mut(new).parent = Some(parent);
        self.node_mut(old).parent = None;
        Some(new)
    }

    /// Replace the child at `idx` of `parent`, rewiring both parent links.
    /// No-op when the slot does not exist.
    pub fn set_child(&mut self, parent: NodeId, idx: usize, new: NodeId) -> bool {
        if idx >= self.node(parent).children.len() {
            return false;
        }
        let old = self.node(parent).children[idx];
        self.node_mut(parent).children[idx] = new;
        self.node_mut(new).parent = Some(parent);
        self.node_mut(old).parent = None;
        true
    }

    /// Depth-first preorder walk over the exposed children of `root`,
    /// yielding `root` first.
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        Descendants {
            ast: self,
            stack: vec![root],
        }
    }
}

pub struct Descendants<'a> {
    ast: &'a Ast,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let children = self.ast.children(id);
        self.stack.extend(children.iter().rev().copied());
        Some(id)
    }
}
