//! AST for riml source — the node catalog and the arena that owns it.
//!
//! The external parser builds one [`Ast`] per compilation unit through the
//! per-variant constructors, which wire parent links as the tree grows.
//! Later passes query and rewrite local structure through the navigation
//! operations in [`crate::walk`] and mutate nodes in place; nodes are never
//! destroyed individually — the whole arena is dropped at the end of the
//! run. Parent links and every other back-reference are plain [`NodeId`]
//! indices, so no teardown order or cycle concerns exist.

pub mod call;
pub mod class;
pub mod curly;

use crate::error::Error;
use crate::scope::Scope;

/// Index of a node inside its [`Ast`] arena. Ids are minted only by the
/// arena and never reused; node identity for all structural operations is
/// id equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn from_raw(raw: u32) -> Self {
        NodeId(raw)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Quoting style a string literal was written with. Interpolation and
/// escaping rules differ per style in Vim script, so the emitter needs it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuoteKind {
    Single,
    Double,
}

/// Callee of a call-family node: a plain name, or a computed expression
/// (first child of the node).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallTarget {
    Name(String),
    Dynamic,
}

/// Payload shared by `Call`, `ExplicitCall`, and `RimlCommand`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallData {
    pub scope_modifier: Option<String>,
    pub target: CallTarget,
}

impl CallData {
    /// The callee name, when it is not a computed expression.
    pub fn name(&self) -> Option<&str> {
        match &self.target {
            CallTarget::Name(name) => Some(name),
            CallTarget::Dynamic => None,
        }
    }

    pub fn full_name(&self) -> Option<String> {
        let name = self.name()?;
        Some(format!("{}{}", self.scope_modifier.as_deref().unwrap_or(""), name))
    }

    /// Namespaced names (`foo#bar`) resolve through Vim's autoload
    /// convention.
    pub fn autoload(&self) -> bool {
        self.name().is_some_and(|n| n.contains('#'))
    }
}

/// Payload shared by `Def` and `DefMethod`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefData {
    pub bang: bool,
    pub scope_modifier: Option<String>,
    pub name: String,
    pub parameters: Vec<String>,
    pub keyword: Option<String>,
    /// Set by rewrite passes that rename the function (e.g. class lowering).
    pub original_name: Option<String>,
}

fn is_splat(param: &str) -> bool {
    param == "..." || param.starts_with('*')
}

impl DefData {
    /// Parameter names excluding any splat marker.
    pub fn argument_variable_names(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .filter(|p| !is_splat(p))
            .map(String::as_str)
            .collect()
    }

    /// The splat parameter, if declared.
    pub fn splat(&self) -> Option<&str> {
        self.parameters.iter().find(|p| is_splat(p)).map(String::as_str)
    }

    /// Dotted names are dictionary functions regardless of the declared
    /// keyword.
    pub fn keyword(&self) -> Option<&str> {
        if self.name.contains('.') {
            Some("dict")
        } else {
            self.keyword.as_deref()
        }
    }

    pub fn autoload(&self) -> bool {
        self.name.contains('#')
    }

    pub fn full_name(&self) -> String {
        format!("{}{}", self.scope_modifier.as_deref().unwrap_or(""), self.name)
    }
}

/// Payload of `ClassDefinition`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassData {
    pub name: String,
    pub superclass_name: Option<String>,
}

impl ClassData {
    pub fn has_superclass(&self) -> bool {
        self.superclass_name.is_some()
    }

    /// Name of the synthesized global constructor function.
    pub fn constructor_name(&self) -> String {
        format!("{}Constructor", self.name)
    }

    /// Name of the implicit receiver parameter used inside lowered methods.
    pub fn constructor_obj_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => format!("{}{}Obj", first.to_lowercase(), chars.as_str()),
            None => "Obj".to_string(),
        }
    }
}

/// One segment of a curly-brace variable name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CurlyPartData {
    /// Plain text fragment, a traversal leaf.
    Literal(String),
    /// Wraps a variable reference (the node's single child).
    Reference,
    /// Wraps a further part sequence (the node's children).
    Nested,
}

/// The closed set of node variants. Payloads hold non-child data only;
/// children live in the node's ordered child list.
#[derive(Clone, Debug)]
pub enum NodeData {
    /// Ordered statement list.
    Nodes,
    Sublist,
    Number { value: String },
    Str { value: String, quote: QuoteKind },
    Regexp { value: String },
    /// Children are the ordered elements.
    List,
    /// Like `List`; the trailing element is the destructuring rest.
    ListUnpack,
    /// Key/value pairs are payload, not traversal children.
    Dictionary { entries: Vec<(NodeId, NodeId)> },
    ScopeModifierLiteral { value: String },
    True,
    False,
    Nil,
    Newline,
    /// Raw line passed through to the output verbatim.
    ExLiteral { value: String },
    Finish,
    Break,
    Continue,
    Return,
    WrapInParens,
    Call(CallData),
    /// Call emitted with Vim's `call` statement marker.
    ExplicitCall(CallData),
    /// Include/source directive; see [`Ast::each_existing_file`].
    RimlCommand(CallData),
    BinaryOperator { operator: String },
    UnaryOperator { operator: String },
    /// Children: condition, if-expression, else-expression.
    TernaryOperator,
    Assign { operator: String },
    GetVariable { scope_modifier: Option<String>, name: String },
    GetSpecialVariable { prefix: String, name: String },
    GetCurlyBraceName { scope_modifier: Option<String> },
    CurlyBraceVariable,
    CurlyBracePart(CurlyPartData),
    Unlet { bang: bool },
    Def(DefData),
    DefMethod(DefData),
    ClassDefinition(ClassData),
    Super { with_parens: bool },
    ObjectInstantiation,
    If,
    While,
    Unless,
    Until,
    Else,
    Elseif,
    For,
    DictGetBracket,
    /// Dot access; the key names are plain identifiers, kept as payload.
    DictGetDot { keys: Vec<String> },
    ListOrDictGet,
    Try,
    Catch { pattern: Option<NodeId> },
}

impl NodeData {
    /// Fixed statement text for the keyword variants.
    pub fn keyword_text(&self) -> Option<&'static str> {
        match self {
            NodeData::Finish => Some("finish\n"),
            NodeData::Break => Some("break\n"),
            NodeData::Continue => Some("continue\n"),
            _ => None,
        }
    }
}

/// Fieldless variant tags, used for single-comparison kind tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Nodes,
    Sublist,
    Number,
    Str,
    Regexp,
    List,
    ListUnpack,
    Dictionary,
    ScopeModifierLiteral,
    True,
    False,
    Nil,
    Newline,
    ExLiteral,
    Finish,
    Break,
    Continue,
    Return,
    WrapInParens,
    Call,
    ExplicitCall,
    RimlCommand,
    BinaryOperator,
    UnaryOperator,
    TernaryOperator,
    Assign,
    GetVariable,
    GetSpecialVariable,
    GetCurlyBraceName,
    CurlyBraceVariable,
    CurlyBracePart,
    Unlet,
    Def,
    DefMethod,
    ClassDefinition,
    Super,
    ObjectInstantiation,
    If,
    While,
    Unless,
    Until,
    Else,
    Elseif,
    For,
    DictGetBracket,
    DictGetDot,
    ListOrDictGet,
    Try,
    Catch,
}

/// One node in the arena.
#[derive(Clone, Debug)]
pub struct Node {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    /// Canonical ordered child list (source order, preserved through edits).
    pub children: Vec<NodeId>,
    /// Scope snapshot, attached by the resolver.
    pub scope: Option<Scope>,
    /// Layout hint for the emitter.
    pub force_newline: bool,
    /// Output cache: written by the emitter, read by later stages. Empty
    /// until first write.
    pub compiled_output: String,
}

impl Node {
    fn new(data: NodeData) -> Self {
        let force_newline = matches!(data, NodeData::ExLiteral { .. });
        Self {
            data,
            parent: None,
            children: Vec::new(),
            scope: None,
            force_newline,
            compiled_output: String::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::Nodes => NodeKind::Nodes,
            NodeData::Sublist => NodeKind::Sublist,
            NodeData::Number { .. } => NodeKind::Number,
            NodeData::Str { .. } => NodeKind::Str,
            NodeData::Regexp { .. } => NodeKind::Regexp,
            NodeData::List => NodeKind::List,
            NodeData::ListUnpack => NodeKind::ListUnpack,
            NodeData::Dictionary { .. } => NodeKind::Dictionary,
            NodeData::ScopeModifierLiteral { .. } => NodeKind::ScopeModifierLiteral,
            NodeData::True => NodeKind::True,
            NodeData::False => NodeKind::False,
            NodeData::Nil => NodeKind::Nil,
            NodeData::Newline => NodeKind::Newline,
            NodeData::ExLiteral { .. } => NodeKind::ExLiteral,
            NodeData::Finish => NodeKind::Finish,
            NodeData::Break => NodeKind::Break,
            NodeData::Continue => NodeKind::Continue,
            NodeData::Return => NodeKind::Return,
            NodeData::WrapInParens => NodeKind::WrapInParens,
            NodeData::Call(_) => NodeKind::Call,
            NodeData::ExplicitCall(_) => NodeKind::ExplicitCall,
            NodeData::RimlCommand(_) => NodeKind::RimlCommand,
            NodeData::BinaryOperator { .. } => NodeKind::BinaryOperator,
            NodeData::UnaryOperator { .. } => NodeKind::UnaryOperator,
            NodeData::TernaryOperator => NodeKind::TernaryOperator,
            NodeData::Assign { .. } => NodeKind::Assign,
            NodeData::GetVariable { .. } => NodeKind::GetVariable,
            NodeData::GetSpecialVariable { .. } => NodeKind::GetSpecialVariable,
            NodeData::GetCurlyBraceName { .. } => NodeKind::GetCurlyBraceName,
            NodeData::CurlyBraceVariable => NodeKind::CurlyBraceVariable,
            NodeData::CurlyBracePart(_) => NodeKind::CurlyBracePart,
            NodeData::Unlet { .. } => NodeKind::Unlet,
            NodeData::Def(_) => NodeKind::Def,
            NodeData::DefMethod(_) => NodeKind::DefMethod,
            NodeData::ClassDefinition(_) => NodeKind::ClassDefinition,
            NodeData::Super { .. } => NodeKind::Super,
            NodeData::ObjectInstantiation => NodeKind::ObjectInstantiation,
            NodeData::If => NodeKind::If,
            NodeData::While => NodeKind::While,
            NodeData::Unless => NodeKind::Unless,
            NodeData::Until => NodeKind::Until,
            NodeData::Else => NodeKind::Else,
            NodeData::Elseif => NodeKind::Elseif,
            NodeData::For => NodeKind::For,
            NodeData::DictGetBracket => NodeKind::DictGetBracket,
            NodeData::DictGetDot { .. } => NodeKind::DictGetDot,
            NodeData::ListOrDictGet => NodeKind::ListOrDictGet,
            NodeData::Try => NodeKind::Try,
            NodeData::Catch { .. } => NodeKind::Catch,
        }
    }
}

/// Arena owning every node of one compilation unit.
#[derive(Clone, Debug, Default)]
pub struct Ast {
    nodes: Vec<Node>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Single-comparison test of the *immediate* parent's variant tag.
    pub fn parent_is(&self, id: NodeId, kind: NodeKind) -> bool {
        match self.node(id).parent {
            Some(parent) => self.node(parent).kind() == kind,
            None => false,
        }
    }

    /// Ordered semantic children. Leaf variants yield an empty slice;
    /// non-interpolated curly-brace parts hide their payload from traversal.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        let node = self.node(id);
        match node.data {
            NodeData::CurlyBracePart(_) if !self.curly_part_interpolated(id) => &[],
            _ => &node.children,
        }
    }

    fn add(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        id
    }

    fn adopt(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    fn add_with_children(&mut self, data: NodeData, children: Vec<NodeId>) -> NodeId {
        let id = self.add(data);
        for child in children {
            self.adopt(id, child);
        }
        id
    }

    // ─── Constructors: containers and literals ───────────────────────

    pub fn nodes(&mut self, statements: Vec<NodeId>) -> NodeId {
        self.add_with_children(NodeData::Nodes, statements)
    }

    pub fn sublist(&mut self, statements: Vec<NodeId>) -> NodeId {
        self.add_with_children(NodeData::Sublist, statements)
    }

    pub fn number(&mut self, value: impl Into<String>) -> NodeId {
        self.add(NodeData::Number { value: value.into() })
    }

    pub fn string(&mut self, value: impl Into<String>, quote: QuoteKind) -> NodeId {
        self.add(NodeData::Str { value: value.into(), quote })
    }

    pub fn regexp(&mut self, value: impl Into<String>) -> NodeId {
        self.add(NodeData::Regexp { value: value.into() })
    }

    pub fn list(&mut self, elements: Vec<NodeId>) -> NodeId {
        self.add_with_children(NodeData::List, elements)
    }

    pub fn list_unpack(&mut self, elements: Vec<NodeId>) -> NodeId {
        self.add_with_children(NodeData::ListUnpack, elements)
    }

    /// Trailing "rest" element of a destructuring list.
    pub fn list_rest(&self, id: NodeId) -> Option<NodeId> {
        match self.node(id).data {
            NodeData::ListUnpack => self.node(id).children.last().copied(),
            _ => None,
        }
    }

    pub fn dictionary(&mut self, entries: Vec<(NodeId, NodeId)>) -> NodeId {
        self.add(NodeData::Dictionary { entries })
    }

    pub fn scope_modifier_literal(&mut self, value: impl Into<String>) -> NodeId {
        self.add(NodeData::ScopeModifierLiteral { value: value.into() })
    }

    pub fn true_node(&mut self) -> NodeId {
        self.add(NodeData::True)
    }

    pub fn false_node(&mut self) -> NodeId {
        self.add(NodeData::False)
    }

    pub fn nil_node(&mut self) -> NodeId {
        self.add(NodeData::Nil)
    }

    pub fn newline_node(&mut self) -> NodeId {
        self.add(NodeData::Newline)
    }

    pub fn ex_literal(&mut self, value: impl Into<String>) -> NodeId {
        self.add(NodeData::ExLiteral { value: value.into() })
    }

    pub fn finish_node(&mut self) -> NodeId {
        self.add(NodeData::Finish)
    }

    pub fn break_node(&mut self) -> NodeId {
        self.add(NodeData::Break)
    }

    pub fn continue_node(&mut self) -> NodeId {
        self.add(NodeData::Continue)
    }

    // ─── Constructors: expressions ───────────────────────────────────

    pub fn return_node(&mut self, expression: NodeId) -> NodeId {
        self.add_with_children(NodeData::Return, vec![expression])
    }

    pub fn wrap_in_parens(&mut self, expression: NodeId) -> NodeId {
        self.add_with_children(NodeData::WrapInParens, vec![expression])
    }

    pub fn binary_op(&mut self, operator: impl Into<String>, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.add_with_children(
            NodeData::BinaryOperator { operator: operator.into() },
            vec![lhs, rhs],
        )
    }

    pub fn unary_op(&mut self, operator: impl Into<String>, operands: Vec<NodeId>) -> NodeId {
        self.add_with_children(NodeData::UnaryOperator { operator: operator.into() }, operands)
    }

    pub fn ternary_op(&mut self, condition: NodeId, if_expr: NodeId, else_expr: NodeId) -> NodeId {
        self.add_with_children(NodeData::TernaryOperator, vec![condition, if_expr, else_expr])
    }

    pub fn assign(&mut self, operator: impl Into<String>, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.add_with_children(NodeData::Assign { operator: operator.into() }, vec![lhs, rhs])
    }

    pub fn get_variable(
        &mut self,
        scope_modifier: Option<&str>,
        name: impl Into<String>,
    ) -> NodeId {
        self.add(NodeData::GetVariable {
            scope_modifier: scope_modifier.map(str::to_string),
            name: name.into(),
        })
    }

    pub fn get_special_variable(
        &mut self,
        prefix: impl Into<String>,
        name: impl Into<String>,
    ) -> NodeId {
        self.add(NodeData::GetSpecialVariable {
            prefix: prefix.into(),
            name: name.into(),
        })
    }

    pub fn get_curly_brace_name(
        &mut self,
        scope_modifier: Option<&str>,
        variable: NodeId,
    ) -> NodeId {
        self.add_with_children(
            NodeData::GetCurlyBraceName {
                scope_modifier: scope_modifier.map(str::to_string),
            },
            vec![variable],
        )
    }

    pub fn curly_brace_variable(&mut self, parts: Vec<NodeId>) -> NodeId {
        self.add_with_children(NodeData::CurlyBraceVariable, parts)
    }

    pub fn curly_part_literal(&mut self, value: impl Into<String>) -> NodeId {
        self.add(NodeData::CurlyBracePart(CurlyPartData::Literal(value.into())))
    }

    pub fn curly_part_ref(&mut self, reference: NodeId) -> NodeId {
        self.add_with_children(
            NodeData::CurlyBracePart(CurlyPartData::Reference),
            vec![reference],
        )
    }

    pub fn curly_part_nested(&mut self, parts: Vec<NodeId>) -> NodeId {
        self.add_with_children(NodeData::CurlyBracePart(CurlyPartData::Nested), parts)
    }

    pub fn unlet(&mut self, bang: bool, variables: Vec<NodeId>) -> NodeId {
        self.add_with_children(NodeData::Unlet { bang }, variables)
    }

    pub fn dict_get_bracket(&mut self, dict: NodeId, keys: Vec<NodeId>) -> NodeId {
        let mut children = vec![dict];
        children.extend(keys);
        self.add_with_children(NodeData::DictGetBracket, children)
    }

    pub fn dict_get_dot(&mut self, dict: NodeId, keys: Vec<String>) -> NodeId {
        self.add_with_children(NodeData::DictGetDot { keys }, vec![dict])
    }

    pub fn list_or_dict_get(&mut self, subject: NodeId, keys: Vec<NodeId>) -> NodeId {
        let mut children = vec![subject];
        children.extend(keys);
        self.add_with_children(NodeData::ListOrDictGet, children)
    }

    // ─── Constructors: definitions ───────────────────────────────────

    pub fn def(
        &mut self,
        bang: bool,
        scope_modifier: Option<&str>,
        name: impl Into<String>,
        parameters: Vec<String>,
        keyword: Option<&str>,
        body: NodeId,
    ) -> Result<NodeId, Error> {
        let data = Self::new_def_data(bang, scope_modifier, name, parameters, keyword)?;
        Ok(self.add_with_children(NodeData::Def(data), vec![body]))
    }

    pub fn def_method(
        &mut self,
        bang: bool,
        scope_modifier: Option<&str>,
        name: impl Into<String>,
        parameters: Vec<String>,
        keyword: Option<&str>,
        body: NodeId,
    ) -> Result<NodeId, Error> {
        let data = Self::new_def_data(bang, scope_modifier, name, parameters, keyword)?;
        Ok(self.add_with_children(NodeData::DefMethod(data), vec![body]))
    }

    fn new_def_data(
        bang: bool,
        scope_modifier: Option<&str>,
        name: impl Into<String>,
        parameters: Vec<String>,
        keyword: Option<&str>,
    ) -> Result<DefData, Error> {
        let data = DefData {
            bang,
            scope_modifier: scope_modifier.map(str::to_string),
            name: name.into(),
            parameters,
            keyword: keyword.map(str::to_string),
            original_name: None,
        };
        // Vim's hard limit on function parameters.
        if data.parameters.len() > 20 {
            return Err(Error::UserArgument(format!(
                "can't have more than 20 parameters for {}",
                data.full_name()
            )));
        }
        Ok(data)
    }

    pub fn class_definition(
        &mut self,
        name: impl Into<String>,
        superclass_name: Option<&str>,
        body: NodeId,
    ) -> NodeId {
        self.add_with_children(
            NodeData::ClassDefinition(ClassData {
                name: name.into(),
                superclass_name: superclass_name.map(str::to_string),
            }),
            vec![body],
        )
    }

    pub fn super_node(&mut self, arguments: Vec<NodeId>, with_parens: bool) -> NodeId {
        self.add_with_children(NodeData::Super { with_parens }, arguments)
    }

    pub fn object_instantiation(&mut self, call: NodeId) -> NodeId {
        self.add_with_children(NodeData::ObjectInstantiation, vec![call])
    }

    // ─── Constructors: control flow ──────────────────────────────────

    pub fn if_node(&mut self, condition: NodeId, body: NodeId) -> NodeId {
        self.add_with_children(NodeData::If, vec![condition, body])
    }

    pub fn while_node(&mut self, condition: NodeId, body: NodeId) -> NodeId {
        self.add_with_children(NodeData::While, vec![condition, body])
    }

    pub fn unless_node(&mut self, condition: NodeId, body: NodeId) -> NodeId {
        let id = self.add_with_children(NodeData::Unless, vec![condition, body]);
        self.wrap_condition_in_parens(id);
        id
    }

    pub fn until_node(&mut self, condition: NodeId, body: NodeId) -> NodeId {
        let id = self.add_with_children(NodeData::Until, vec![condition, body]);
        self.wrap_condition_in_parens(id);
        id
    }

    pub fn else_node(&mut self, body: NodeId) -> NodeId {
        self.add_with_children(NodeData::Else, vec![body])
    }

    pub fn elseif_node(&mut self, condition: NodeId, body: NodeId) -> NodeId {
        self.add_with_children(NodeData::Elseif, vec![condition, body])
    }

    pub fn for_node(&mut self, variable: NodeId, in_expression: NodeId, body: NodeId) -> NodeId {
        self.add_with_children(NodeData::For, vec![variable, in_expression, body])
    }

    pub fn try_node(
        &mut self,
        try_block: NodeId,
        catches: Vec<NodeId>,
        finally_block: Option<NodeId>,
    ) -> NodeId {
        let mut children = vec![try_block];
        children.extend(catches);
        children.extend(finally_block);
        self.add_with_children(NodeData::Try, children)
    }

    pub fn catch_node(&mut self, pattern: Option<NodeId>, body: NodeId) -> NodeId {
        self.add_with_children(NodeData::Catch { pattern }, vec![body])
    }

    // ─── Shared accessors ────────────────────────────────────────────

    /// Condition child of control-flow and ternary nodes.
    pub fn condition(&self, id: NodeId) -> Option<NodeId> {
        match self.node(id).data {
            NodeData::If
            | NodeData::While
            | NodeData::Unless
            | NodeData::Until
            | NodeData::Elseif
            | NodeData::TernaryOperator => self.node(id).children.first().copied(),
            _ => None,
        }
    }

    /// Body (statement-list child) of block-introducing nodes.
    pub fn body(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id);
        match node.data {
            NodeData::If
            | NodeData::While
            | NodeData::Unless
            | NodeData::Until
            | NodeData::Elseif => node.children.get(1).copied(),
            NodeData::Else
            | NodeData::Def(_)
            | NodeData::DefMethod(_)
            | NodeData::ClassDefinition(_)
            | NodeData::Catch { .. } => node.children.first().copied(),
            NodeData::For => node.children.get(2).copied(),
            _ => None,
        }
    }

    pub fn operand1(&self, id: NodeId) -> Option<NodeId> {
        match self.node(id).data {
            NodeData::BinaryOperator { .. } | NodeData::UnaryOperator { .. } => {
                self.node(id).children.first().copied()
            }
            _ => None,
        }
    }

    pub fn operand2(&self, id: NodeId) -> Option<NodeId> {
        match self.node(id).data {
            NodeData::BinaryOperator { .. } => self.node(id).children.get(1).copied(),
            _ => None,
        }
    }

    pub fn ternary_if_expr(&self, id: NodeId) -> Option<NodeId> {
        match self.node(id).data {
            NodeData::TernaryOperator => self.node(id).children.get(1).copied(),
            _ => None,
        }
    }

    pub fn ternary_else_expr(&self, id: NodeId) -> Option<NodeId> {
        match self.node(id).data {
            NodeData::TernaryOperator => self.node(id).children.get(2).copied(),
            _ => None,
        }
    }

    /// True for comparison operators that accept `#`/`?` suffixes.
    pub fn ignorecase_capable(&self, id: NodeId) -> bool {
        match &self.node(id).data {
            NodeData::BinaryOperator { operator } => {
                crate::constants::IGNORECASE_CAPABLE_OPERATORS.contains(&operator.as_str())
            }
            _ => false,
        }
    }

    /// Idempotently wrap the condition child of a control structure in a
    /// paren wrapper, keeping the old condition's position under the new
    /// wrapper.
    pub fn wrap_condition_in_parens(&mut self, id: NodeId) {
        if !matches!(
            self.node(id).data,
            NodeData::If | NodeData::While | NodeData::Unless | NodeData::Until | NodeData::Elseif
        ) {
            return;
        }
        let Some(condition) = self.condition(id) else {
            return;
        };
        if self.kind(condition) == NodeKind::WrapInParens {
            return;
        }
        let wrapper = self.add(NodeData::WrapInParens);
        self.node_mut(condition).parent = Some(wrapper);
        self.node_mut(wrapper).children.push(condition);
        self.node_mut(wrapper).parent = Some(id);
        self.node_mut(id).children[0] = wrapper;
    }

    /// Scope-modified or prefixed full name of a named node.
    pub fn full_name(&self, id: NodeId) -> Option<String> {
        match &self.node(id).data {
            NodeData::GetVariable { scope_modifier, .. } => Some(format!(
                "{}{}",
                scope_modifier.as_deref().unwrap_or(""),
                self.variable_name(id).unwrap_or_default()
            )),
            NodeData::GetSpecialVariable { prefix, name } => Some(format!("{}{}", prefix, name)),
            NodeData::Call(data) | NodeData::ExplicitCall(data) | NodeData::RimlCommand(data) => {
                data.full_name()
            }
            NodeData::Def(data) | NodeData::DefMethod(data) => Some(data.full_name()),
            _ => None,
        }
    }

    /// Variable name with any trailing existence-query `?` stripped.
    pub fn variable_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).data {
            NodeData::GetVariable { name, .. } => Some(name.strip_suffix('?').unwrap_or(name)),
            _ => None,
        }
    }

    /// True when the variable was written as an existence query (`foo?`).
    pub fn question_existence(&self, id: NodeId) -> bool {
        match &self.node(id).data {
            NodeData::GetVariable { name, .. } => name.ends_with('?'),
            _ => false,
        }
    }

    // ─── Statement-container helpers ─────────────────────────────────

    /// The backing statement list of a container (`Nodes`/`Sublist`
    /// directly; `Else`/`Elseif` through their body child).
    fn statement_list(&self, id: NodeId) -> Option<NodeId> {
        match self.node(id).data {
            NodeData::Nodes | NodeData::Sublist => Some(id),
            NodeData::Else => self.node(id).children.first().copied(),
            NodeData::Elseif => self.node(id).children.get(1).copied(),
            _ => None,
        }
    }

    pub fn push_stmt(&mut self, container: NodeId, statement: NodeId) {
        if let Some(list) = self.statement_list(container) {
            self.adopt(list, statement);
        }
    }

    pub fn concat_stmts(&mut self, container: NodeId, statements: Vec<NodeId>) {
        if let Some(list) = self.statement_list(container) {
            for statement in statements {
                self.adopt(list, statement);
            }
        }
    }

    pub fn pop_stmt(&mut self, container: NodeId) -> Option<NodeId> {
        let list = self.statement_list(container)?;
        let popped = self.node_mut(list).children.pop()?;
        self.node_mut(popped).parent = None;
        Some(popped)
    }

    pub fn last_stmt(&self, container: NodeId) -> Option<NodeId> {
        let list = self.statement_list(container)?;
        self.node(list).children.last().copied()
    }

    // ─── Def / For structure ─────────────────────────────────────────

    /// Payload of a function definition node.
    pub fn def_data(&self, id: NodeId) -> Option<&DefData> {
        match &self.node(id).data {
            NodeData::Def(data) | NodeData::DefMethod(data) => Some(data),
            _ => None,
        }
    }

    /// Direct `super` statement inside a function body, if any.
    pub fn super_node_of(&self, def: NodeId) -> Option<NodeId> {
        let body = self.body(def)?;
        self.node(body)
            .children
            .iter()
            .copied()
            .find(|&stmt| self.kind(stmt) == NodeKind::Super)
    }

    /// Names bound by a `for` loop: the single induction variable, or every
    /// element name when the loop destructures a list.
    pub fn for_node_variable_names(&self, id: NodeId) -> Vec<String> {
        if !matches!(self.node(id).data, NodeData::For) {
            return Vec::new();
        }
        let Some(&variable) = self.node(id).children.first() else {
            return Vec::new();
        };
        match self.node(variable).data {
            NodeData::List | NodeData::ListUnpack => self
                .node(variable)
                .children
                .iter()
                .filter_map(|&el| self.variable_name(el).map(str::to_string))
                .collect(),
            _ => self
                .variable_name(variable)
                .map(str::to_string)
                .into_iter()
                .collect(),
        }
    }

    // ─── Try clause structure ────────────────────────────────────────

    pub fn try_block(&self, id: NodeId) -> Option<NodeId> {
        match self.node(id).data {
            NodeData::Try => self.node(id).children.first().copied(),
            _ => None,
        }
    }

    pub fn catch_nodes(&self, id: NodeId) -> Vec<NodeId> {
        match self.node(id).data {
            NodeData::Try => self
                .node(id)
                .children
                .iter()
                .copied()
                .filter(|&child| self.kind(child) == NodeKind::Catch)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The finally block is the trailing non-catch child, when present.
    pub fn finally_block(&self, id: NodeId) -> Option<NodeId> {
        match self.node(id).data {
            NodeData::Try => {
                let children = &self.node(id).children;
                let &last = children.last()?;
                if children.len() > 1 && self.kind(last) != NodeKind::Catch {
                    Some(last)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}
