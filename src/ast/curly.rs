//! Curly-brace variable names: identifiers whose text is partly computed.
//!
//! `my_{flavor}_setting` is an ordered part sequence — literal fragments
//! interleaved with wrapped references. The interpolation predicate drives
//! the emitter's choice between literal text and a dynamic sub-expression
//! per part.

use crate::ast::{Ast, CurlyPartData, NodeData, NodeId, NodeKind};

impl Ast {
    /// A part is interpolated when it wraps a plain or special variable
    /// reference, or is a nested sequence containing at least one
    /// interpolated part.
    pub fn curly_part_interpolated(&self, part: NodeId) -> bool {
        match &self.node(part).data {
            NodeData::CurlyBracePart(CurlyPartData::Literal(_)) => false,
            NodeData::CurlyBracePart(CurlyPartData::Reference) => {
                self.node(part).children.first().is_some_and(|&wrapped| {
                    matches!(
                        self.kind(wrapped),
                        NodeKind::GetVariable | NodeKind::GetSpecialVariable
                    )
                })
            }
            NodeData::CurlyBracePart(CurlyPartData::Nested) => self
                .node(part)
                .children
                .iter()
                .any(|&sub| self.curly_part_interpolated(sub)),
            _ => false,
        }
    }

    /// True when any part of the curly-brace variable is interpolated.
    /// Accepts the variable itself or the name node wrapping it.
    pub fn curly_name_interpolated(&self, id: NodeId) -> bool {
        let variable = match self.node(id).data {
            NodeData::CurlyBraceVariable => id,
            NodeData::GetCurlyBraceName { .. } => match self.node(id).children.first() {
                Some(&child) => child,
                None => return false,
            },
            _ => return false,
        };
        self.node(variable)
            .children
            .iter()
            .any(|&part| self.curly_part_interpolated(part))
    }

    /// Append a part to a curly-brace variable.
    pub fn curly_push_part(&mut self, variable: NodeId, part: NodeId) {
        if matches!(self.node(variable).data, NodeData::CurlyBraceVariable) {
            self.adopt(variable, part);
        }
    }
}
