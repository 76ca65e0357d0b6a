use std::collections::HashSet;

use crate::ast::{Ast, NodeData, NodeId};
use crate::error::Error;

/// Variable-visibility snapshot attached to function- and loop-defining
/// nodes.
///
/// Invariant: a name in `for_node_variable_names` is never simultaneously in
/// `argument_variable_names` — loop bindings shadow same-named parameters.
/// `function` is a non-owning back-reference into the arena.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scope {
    pub argument_variable_names: HashSet<String>,
    pub for_node_variable_names: HashSet<String>,
    pub function: Option<NodeId>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when this scope belongs to a function body.
    pub fn in_function(&self) -> bool {
        self.function.is_some()
    }

    /// Non-mutating merge; see [`Scope::merge_mut`].
    pub fn merge(&self, other: &Scope) -> Scope {
        let mut merged = self.clone();
        merged.merge_mut(other);
        merged
    }

    /// Combine `other` into `self`: union the loop-bound names, then drop
    /// from the argument names anything the *final* loop-name set shadows.
    /// The function back-reference is first-assigned-wins.
    pub fn merge_mut(&mut self, other: &Scope) {
        for name in &other.for_node_variable_names {
            self.for_node_variable_names.insert(name.clone());
        }
        self.argument_variable_names
            .retain(|name| !self.for_node_variable_names.contains(name));
        if self.function.is_none() {
            self.function = other.function;
        }
    }
}

impl Ast {
    /// Fresh scope snapshot for a scope-introducing node.
    ///
    /// Function definitions contribute their parameter names (splat
    /// excluded) and a back-reference to themselves; `for` loops contribute
    /// their bound name(s). Other variants introduce no scope.
    pub fn to_scope(&self, id: NodeId) -> Option<Scope> {
        match &self.node(id).data {
            NodeData::Def(data) | NodeData::DefMethod(data) => Some(Scope {
                argument_variable_names: data
                    .argument_variable_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                for_node_variable_names: HashSet::new(),
                function: Some(id),
            }),
            NodeData::For => Some(Scope {
                argument_variable_names: HashSet::new(),
                for_node_variable_names: self.for_node_variable_names(id).into_iter().collect(),
                function: None,
            }),
            _ => None,
        }
    }

    /// Merge the scope attached to `src` into the one attached to `dst`.
    ///
    /// Both slots must hold a snapshot; merging through an empty slot is a
    /// programmer error and fails with a type mismatch.
    pub fn merge_scope_from(&mut self, dst: NodeId, src: NodeId) -> Result<(), Error> {
        let other = match &self.node(src).scope {
            Some(scope) => scope.clone(),
            None => {
                return Err(Error::TypeMismatch {
                    expected: "a scope snapshot".to_string(),
                    found: "a node without one".to_string(),
                })
            }
        };
        match &mut self.node_mut(dst).scope {
            Some(scope) => {
                scope.merge_mut(&other);
                Ok(())
            }
            None => Err(Error::TypeMismatch {
                expected: "a scope snapshot".to_string(),
                found: "a node without one".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn arg_scope(args: &[&str]) -> Scope {
        Scope {
            argument_variable_names: names(args),
            ..Scope::default()
        }
    }

    fn loop_scope(vars: &[&str]) -> Scope {
        Scope {
            for_node_variable_names: names(vars),
            ..Scope::default()
        }
    }

    #[test]
    fn test_merge_unions_loop_names() {
        let merged = loop_scope(&["i"]).merge(&loop_scope(&["j"]));
        assert_eq!(merged.for_node_variable_names, names(&["i", "j"]));
    }

    #[test]
    fn test_merge_is_associative_on_loop_names() {
        let (a, b, c) = (loop_scope(&["i"]), loop_scope(&["j"]), loop_scope(&["k"]));
        let left = a.merge(&b).merge(&c);
        let right = a.merge(&b.merge(&c));
        assert_eq!(left.for_node_variable_names, right.for_node_variable_names);
    }

    #[test]
    fn test_loop_names_shadow_arguments() {
        let merged = arg_scope(&["a", "b"]).merge(&loop_scope(&["b"]));
        assert_eq!(merged.argument_variable_names, names(&["a"]));
        assert_eq!(merged.for_node_variable_names, names(&["b"]));
    }

    #[test]
    fn test_pruning_uses_final_loop_set() {
        // `a` survives merging with X alone, but merging X then Y prunes it:
        // the subtraction runs against the cumulative loop-name set.
        let base = arg_scope(&["a", "b"]);
        let x = loop_scope(&["b"]);
        let y = loop_scope(&["a"]);
        let after_x = base.merge(&x);
        assert!(after_x.argument_variable_names.contains("a"));
        let after_xy = after_x.merge(&y);
        assert!(after_xy.argument_variable_names.is_empty());
    }

    #[test]
    fn test_function_reference_first_assigned_wins() {
        let mut with_fn = Scope::default();
        with_fn.function = Some(NodeId::from_raw(1));
        let mut other = Scope::default();
        other.function = Some(NodeId::from_raw(2));

        let kept = with_fn.merge(&other);
        assert_eq!(kept.function, Some(NodeId::from_raw(1)));

        let adopted = Scope::default().merge(&other);
        assert_eq!(adopted.function, Some(NodeId::from_raw(2)));
    }

    #[test]
    fn test_clone_is_deep() {
        let original = arg_scope(&["a"]);
        let mut copy = original.clone();
        copy.argument_variable_names.insert("b".to_string());
        assert_eq!(original.argument_variable_names, names(&["a"]));
    }

    #[test]
    fn test_merge_does_not_mutate_receiver() {
        let base = arg_scope(&["a"]);
        let _ = base.merge(&loop_scope(&["a"]));
        assert!(base.argument_variable_names.contains("a"));
    }

    #[test]
    fn test_def_to_scope_excludes_splat_and_references_function() {
        let mut ast = Ast::new();
        let body = ast.nodes(vec![]);
        let def = ast
            .def(
                false,
                None,
                "Walk",
                vec!["a".into(), "b".into(), "*rest".into()],
                None,
                body,
            )
            .unwrap();
        let scope = ast.to_scope(def).unwrap();
        assert_eq!(scope.argument_variable_names, names(&["a", "b"]));
        assert!(scope.for_node_variable_names.is_empty());
        assert_eq!(scope.function, Some(def));
        assert!(scope.in_function());
    }

    #[test]
    fn test_for_to_scope_binds_loop_names() {
        let mut ast = Ast::new();
        let key = ast.get_variable(None, "key");
        let val = ast.get_variable(None, "val");
        let pair = ast.list(vec![key, val]);
        let in_expr = ast.get_variable(None, "items");
        let body = ast.nodes(vec![]);
        let for_n = ast.for_node(pair, in_expr, body);
        let scope = ast.to_scope(for_n).unwrap();
        assert_eq!(scope.for_node_variable_names, names(&["key", "val"]));
        assert!(!scope.in_function());
    }

    #[test]
    fn test_function_scope_merged_with_loop_scope_round_trip() {
        let mut ast = Ast::new();
        let def_body = ast.nodes(vec![]);
        let def = ast
            .def(
                false,
                None,
                "Walk",
                vec!["a".into(), "b".into(), "*rest".into()],
                None,
                def_body,
            )
            .unwrap();
        let b = ast.get_variable(None, "b");
        let in_expr = ast.get_variable(None, "items");
        let for_body = ast.nodes(vec![]);
        let for_n = ast.for_node(b, in_expr, for_body);

        let merged = ast.to_scope(def).unwrap().merge(&ast.to_scope(for_n).unwrap());
        assert_eq!(merged.argument_variable_names, names(&["a"]));
        assert_eq!(merged.for_node_variable_names, names(&["b"]));
        assert_eq!(merged.function, Some(def));
    }

    #[test]
    fn test_merge_scope_from_requires_snapshots() {
        let mut ast = Ast::new();
        let a = ast.nodes(vec![]);
        let b = ast.nodes(vec![]);
        let err = ast.merge_scope_from(a, b).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));

        ast.node_mut(a).scope = Some(arg_scope(&["x"]));
        let err = ast.merge_scope_from(a, b).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));

        ast.node_mut(b).scope = Some(loop_scope(&["x"]));
        ast.merge_scope_from(a, b).unwrap();
        let merged = ast.node(a).scope.as_ref().unwrap();
        assert!(merged.argument_variable_names.is_empty(), "loop binding shadows the argument");
        assert_eq!(merged.for_node_variable_names, names(&["x"]));
    }
}
