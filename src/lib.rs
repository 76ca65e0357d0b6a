pub mod ast;
pub mod constants;
pub mod diagnostic;
pub mod error;
pub mod scope;
pub mod walk;

// Re-exports — preserves `riml::X` paths used by the parser and emitter
pub use ast::{
    Ast, CallData, CallTarget, ClassData, CurlyPartData, DefData, Node, NodeData, NodeId,
    NodeKind, QuoteKind,
};
pub use diagnostic::{render_diagnostics, Diagnostic, Severity};
pub use error::Error;
pub use scope::Scope;
