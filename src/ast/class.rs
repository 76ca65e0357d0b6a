//! Class lowering onto a target with no native object model.
//!
//! A class becomes a synthesized global constructor function returning a
//! dictionary; instance methods become flat `g:` functions taking the
//! object dictionary through an implicit receiver parameter; `super`
//! becomes a direct call to the parent implementation, forwarding the
//! enclosing method's own parameters when written bare.

use crate::ast::{Ast, ClassData, DefData, NodeData, NodeId, NodeKind};

/// Method names that mark a constructor.
const INITIALIZE: &str = "initialize";
const CONSTRUCTOR_SUFFIX: &str = "Constructor";

impl Ast {
    /// Payload of a class-definition node.
    pub fn class_data(&self, id: NodeId) -> Option<&ClassData> {
        match &self.node(id).data {
            NodeData::ClassDefinition(data) => Some(data),
            _ => None,
        }
    }

    /// The constructor method in the class body: a function named
    /// `initialize` or ending in `Constructor`. Absent means the class has
    /// no constructor.
    pub fn constructor(&self, class: NodeId) -> Option<NodeId> {
        self.class_data(class)?;
        let body = self.body(class)?;
        self.node(body).children.iter().copied().find(|&stmt| {
            self.def_data(stmt).is_some_and(|def| {
                def.name == INITIALIZE || def.name.ends_with(CONSTRUCTOR_SUFFIX)
            })
        })
    }

    pub fn has_constructor(&self, class: NodeId) -> bool {
        self.constructor(class).is_some()
    }

    /// Convert a method into a standalone `g:` function carrying the
    /// `dict` receiver marker, occupying the method's former position.
    /// Returns the new function node.
    pub fn method_to_def(&mut self, method: NodeId) -> Option<NodeId> {
        let data = match &self.node(method).data {
            NodeData::DefMethod(data) => data.clone(),
            _ => return None,
        };
        let def = self.add(NodeData::Def(DefData {
            bang: data.bang,
            scope_modifier: Some("g:".to_string()),
            name: data.name,
            parameters: data.parameters,
            keyword: Some("dict".to_string()),
            original_name: data.original_name,
        }));

        // the body moves wholesale to the new node
        let children = std::mem::take(&mut self.node_mut(method).children);
        for &child in &children {
            self.node_mut(child).parent = Some(def);
        }
        self.node_mut(def).children = children;

        if self.parent(method).is_some() {
            self.replace(method, def);
        }
        Some(def)
    }

    /// A bare `super` (no parens, no arguments) forwards the enclosing
    /// method's parameter list.
    pub fn super_use_all_arguments(&self, id: NodeId) -> bool {
        match self.node(id).data {
            NodeData::Super { with_parens } => {
                self.node(id).children.is_empty() && !with_parens
            }
            _ => false,
        }
    }

    /// Nearest enclosing function definition, following parent links.
    pub fn enclosing_def(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if matches!(self.kind(node), NodeKind::Def | NodeKind::DefMethod) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// Parameter names a bare `super` forwards to the parent
    /// implementation: the enclosing method's list, verbatim.
    pub fn super_forwarded_parameters(&self, super_node: NodeId) -> Option<Vec<String>> {
        if !self.super_use_all_arguments(super_node) {
            return None;
        }
        let def = self.enclosing_def(super_node)?;
        Some(self.def_data(def)?.parameters.clone())
    }
}
