//! Call-family nodes: classification and the include directive.
//!
//! A call can take any of these forms:
//!
//! ```text
//! Method()
//! s:Method(argument1, argument2)
//! call s:Method(argument1, argument2)
//! riml_include 'lib.riml'
//! ```
//!
//! Classification decides the emission form: builtin functions stay
//! expression calls, builtin commands take bare argument lists, and user
//! calls in statement position need Vim's explicit `call` marker.

use std::path::Path;

use log::debug;

use crate::ast::{Ast, CallData, CallTarget, NodeData, NodeId, NodeKind};
use crate::constants::{is_builtin_command, is_builtin_function};
use crate::error::Error;

impl Ast {
    pub fn call(
        &mut self,
        scope_modifier: Option<&str>,
        name: impl Into<String>,
        arguments: Vec<NodeId>,
    ) -> NodeId {
        self.build_call(
            NodeData::Call,
            scope_modifier,
            CallTarget::Name(name.into()),
            None,
            arguments,
        )
    }

    /// Call whose callee is itself a computed expression.
    pub fn call_dynamic(
        &mut self,
        scope_modifier: Option<&str>,
        callee: NodeId,
        arguments: Vec<NodeId>,
    ) -> NodeId {
        self.build_call(
            NodeData::Call,
            scope_modifier,
            CallTarget::Dynamic,
            Some(callee),
            arguments,
        )
    }

    pub fn explicit_call(
        &mut self,
        scope_modifier: Option<&str>,
        name: impl Into<String>,
        arguments: Vec<NodeId>,
    ) -> NodeId {
        self.build_call(
            NodeData::ExplicitCall,
            scope_modifier,
            CallTarget::Name(name.into()),
            None,
            arguments,
        )
    }

    /// Include/source directive. Every argument must be a string literal
    /// naming a source file.
    pub fn riml_command(
        &mut self,
        name: impl Into<String>,
        arguments: Vec<NodeId>,
    ) -> Result<NodeId, Error> {
        let name = name.into();
        let id = self.build_call(
            NodeData::RimlCommand,
            None,
            CallTarget::Name(name.clone()),
            None,
            arguments,
        );
        let all_strings = self
            .call_arguments(id)
            .iter()
            .all(|&arg| self.kind(arg) == NodeKind::Str);
        if self.call_arguments(id).is_empty() || !all_strings {
            return Err(Error::UserArgument(format!(
                "\"{}\" error: must pass string (name of file)",
                name
            )));
        }
        Ok(id)
    }

    fn build_call(
        &mut self,
        make: fn(CallData) -> NodeData,
        scope_modifier: Option<&str>,
        target: CallTarget,
        callee: Option<NodeId>,
        mut arguments: Vec<NodeId>,
    ) -> NodeId {
        // Builtin commands take bare argument lists, so a sole
        // parenthesized wrapper is stripped and its inner expression
        // substituted at construction.
        let is_command = scope_modifier.is_none()
            && matches!(&target, CallTarget::Name(name) if is_builtin_command(name));
        if is_command && arguments.len() == 1 {
            let wrapper = arguments[0];
            if self.kind(wrapper) == NodeKind::WrapInParens {
                if let Some(&inner) = self.node(wrapper).children.first() {
                    self.node_mut(wrapper).children.clear();
                    self.node_mut(inner).parent = None;
                    arguments[0] = inner;
                }
            }
        }

        let data = CallData {
            scope_modifier: scope_modifier.map(str::to_string),
            target,
        };
        let mut children = Vec::new();
        children.extend(callee);
        children.extend(arguments);
        self.add_with_children(make(data), children)
    }

    fn call_data_of(&self, id: NodeId) -> Option<&CallData> {
        match &self.node(id).data {
            NodeData::Call(data) | NodeData::ExplicitCall(data) | NodeData::RimlCommand(data) => {
                Some(data)
            }
            _ => None,
        }
    }

    /// Callee expression, when the call target is computed.
    pub fn call_callee(&self, id: NodeId) -> Option<NodeId> {
        let data = self.call_data_of(id)?;
        match data.target {
            CallTarget::Dynamic => self.node(id).children.first().copied(),
            CallTarget::Name(_) => None,
        }
    }

    /// Ordered argument list (excludes a computed callee).
    pub fn call_arguments(&self, id: NodeId) -> &[NodeId] {
        let Some(data) = self.call_data_of(id) else {
            return &[];
        };
        let children = self.node(id).children.as_slice();
        match data.target {
            CallTarget::Dynamic if !children.is_empty() => &children[1..],
            _ => children,
        }
    }

    /// True when the call resolves to a Vim builtin usable in expression
    /// position. Always false under a scope modifier or a computed callee.
    pub fn builtin_function(&self, id: NodeId) -> bool {
        match self.call_data_of(id) {
            Some(data) => {
                data.scope_modifier.is_none()
                    && data.name().is_some_and(is_builtin_function)
            }
            None => false,
        }
    }

    /// True when the call must be emitted statement-style with bare
    /// arguments. Always false under a scope modifier or a computed callee.
    pub fn builtin_command(&self, id: NodeId) -> bool {
        match self.call_data_of(id) {
            Some(data) => {
                data.scope_modifier.is_none()
                    && data.name().is_some_and(is_builtin_command)
            }
            None => false,
        }
    }

    /// A non-command call in direct statement position needs Vim's
    /// explicit `call` marker.
    pub fn must_be_explicit_call(&self, id: NodeId) -> bool {
        if self.call_data_of(id).is_none() || self.builtin_command(id) {
            return false;
        }
        self.parent_is(id, NodeKind::Nodes)
    }

    /// Namespaced callee resolved through Vim's lazy autoload convention.
    pub fn autoload(&self, id: NodeId) -> bool {
        match &self.node(id).data {
            NodeData::Call(data) | NodeData::ExplicitCall(data) | NodeData::RimlCommand(data) => {
                data.autoload()
            }
            NodeData::Def(data) | NodeData::DefMethod(data) => data.autoload(),
            _ => false,
        }
    }

    // ─── Include directive ───────────────────────────────────────────

    /// File names the directive currently carries.
    pub fn include_files(&self, id: NodeId) -> Vec<String> {
        self.call_arguments(id)
            .iter()
            .filter_map(|&arg| match &self.node(arg).data {
                NodeData::Str { value, .. } => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    /// Check that every named file exists under `source_path`, then hand
    /// each to `compile` in argument order. A compile result of
    /// [`Error::IncludeFileLoop`] prunes that file's argument from this
    /// directive permanently and continues with the remaining files; any
    /// other error propagates.
    pub fn each_existing_file<F>(
        &mut self,
        id: NodeId,
        source_path: &Path,
        mut compile: F,
    ) -> Result<(), Error>
    where
        F: FnMut(&str) -> Result<(), Error>,
    {
        let files = self.include_files(id);

        for file in &files {
            debug!("resolving include \"{}\" against {}", file, source_path.display());
            if !source_path.join(file).exists() {
                return Err(Error::FileNotFound {
                    file: file.clone(),
                    source_path: source_path.to_path_buf(),
                });
            }
        }

        // all files exist
        for file in &files {
            match compile(file) {
                Ok(()) => {}
                Err(Error::IncludeFileLoop { .. }) => {
                    debug!("pruning cyclic include \"{}\"", file);
                    self.prune_include_argument(id, file);
                }
                Err(other) => return Err(other),
            }
        }
        Ok(())
    }

    fn prune_include_argument(&mut self, id: NodeId, file: &str) {
        let doomed: Vec<NodeId> = self
            .call_arguments(id)
            .iter()
            .copied()
            .filter(|&arg| {
                matches!(&self.node(arg).data, NodeData::Str { value, .. } if value.as_str() == file)
            })
            .collect();
        for arg in doomed {
            self.remove(arg);
        }
    }
}
