use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use riml::{Ast, Error, NodeId, NodeKind, QuoteKind};

// ── include expansion across units ──

/// Minimal stand-in for the compilation driver: one `Ast` per unit, a set
/// of files currently being compiled to detect cycles, and a record of
/// what each directive still carries after compilation.
struct Driver {
    root: PathBuf,
    includes: HashMap<String, Vec<String>>,
    in_progress: HashSet<String>,
    remaining: HashMap<String, Vec<String>>,
    compiled: Vec<String>,
}

impl Driver {
    fn new(root: PathBuf, includes: &[(&str, &[&str])]) -> Self {
        Self {
            root,
            includes: includes
                .iter()
                .map(|(file, deps)| {
                    (file.to_string(), deps.iter().map(|d| d.to_string()).collect())
                })
                .collect(),
            in_progress: HashSet::new(),
            remaining: HashMap::new(),
            compiled: Vec::new(),
        }
    }

    fn compile_unit(&mut self, file: &str) -> Result<(), Error> {
        if self.in_progress.contains(file) {
            return Err(Error::IncludeFileLoop { file: file.to_string() });
        }
        self.in_progress.insert(file.to_string());

        let deps = self.includes.get(file).cloned().unwrap_or_default();
        if !deps.is_empty() {
            let mut ast = Ast::new();
            let args: Vec<NodeId> = deps
                .iter()
                .map(|d| ast.string(d.clone(), QuoteKind::Single))
                .collect();
            let cmd = ast.riml_command("riml_include", args)?;
            let root = self.root.clone();
            ast.each_existing_file(cmd, &root, |f| self.compile_unit(f))?;
            self.remaining.insert(file.to_string(), ast.include_files(cmd));
        }

        self.in_progress.remove(file);
        self.compiled.push(file.to_string());
        Ok(())
    }
}

#[test]
fn test_include_cycle_is_pruned_and_compilation_continues() {
    // main.riml includes a.riml, a.riml includes b.riml, b.riml includes
    // a.riml again — the second attempt at a.riml must be dropped from
    // b.riml's directive instead of aborting.
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.riml"), "").unwrap();
    std::fs::write(dir.path().join("b.riml"), "").unwrap();

    let mut driver = Driver::new(
        dir.path().to_path_buf(),
        &[
            ("main.riml", &["a.riml"][..]),
            ("a.riml", &["b.riml"][..]),
            ("b.riml", &["a.riml"][..]),
        ],
    );
    driver.compile_unit("main.riml").unwrap();

    assert_eq!(
        driver.compiled,
        vec!["b.riml", "a.riml", "main.riml"],
        "dependencies finish before their includers"
    );
    assert_eq!(
        driver.remaining["b.riml"],
        Vec::<String>::new(),
        "the cyclic argument must be gone from b.riml's directive"
    );
    assert_eq!(driver.remaining["a.riml"], vec!["b.riml"]);
}

#[test]
fn test_include_missing_file_aborts_with_search_root() {
    let dir = tempfile::tempdir().unwrap();
    let mut driver = Driver::new(
        dir.path().to_path_buf(),
        &[("main.riml", &["ghost.riml"][..])],
    );
    let err = driver.compile_unit("main.riml").unwrap_err();
    match err {
        Error::FileNotFound { file, source_path } => {
            assert_eq!(file, "ghost.riml");
            assert_eq!(source_path, dir.path());
        }
        other => panic!("expected FileNotFound, got {:?}", other),
    }
}

// ── class lowering ──

#[test]
fn test_class_lowering_end_to_end() {
    let mut ast = Ast::new();

    // class Puppy < Dog with a constructor (containing a bare super) and
    // an instance method
    let sup = ast.super_node(vec![], false);
    let init_body = ast.nodes(vec![sup]);
    let init = ast
        .def_method(false, None, "initialize", vec!["name".into()], None, init_body)
        .unwrap();

    let bark_body = ast.nodes(vec![]);
    let bark = ast
        .def_method(false, None, "bark", vec![], None, bark_body)
        .unwrap();

    let class_body = ast.nodes(vec![init, bark]);
    let class = ast.class_definition("Puppy", Some("Dog"), class_body);

    let data = ast.class_data(class).unwrap();
    assert!(data.has_superclass());
    assert_eq!(data.constructor_name(), "PuppyConstructor");
    assert_eq!(data.constructor_obj_name(), "puppyObj");
    assert_eq!(ast.constructor(class), Some(init));

    // bare super forwards the constructor's own parameters
    assert_eq!(ast.super_node_of(init), Some(sup));
    assert_eq!(
        ast.super_forwarded_parameters(sup).unwrap(),
        vec!["name".to_string()]
    );

    // lower the instance method to a flat g: dict function in place
    let flat = ast.method_to_def(bark).unwrap();
    assert_eq!(ast.children(class_body), &[init, flat]);
    let flat_data = ast.def_data(flat).unwrap();
    assert_eq!(flat_data.scope_modifier.as_deref(), Some("g:"));
    assert_eq!(flat_data.keyword(), Some("dict"));

    // the constructor scan still finds the untouched initialize
    assert_eq!(ast.constructor(class), Some(init));
}

// ── rewrite passes over statement lists ──

#[test]
fn test_unwrap_redundant_parens_rewrite() {
    let mut ast = Ast::new();
    let var = ast.get_variable(None, "x");
    let wrapped = ast.wrap_in_parens(var);
    let ret = ast.return_node(wrapped);
    let _stmts = ast.nodes(vec![ret]);

    // a rewrite pass deems the wrapper redundant and splices the inner
    // expression into its place
    assert!(ast.remove(var));
    assert_eq!(ast.replace(wrapped, var), Some(var));
    assert_eq!(ast.children(ret), &[var]);
    assert_eq!(ast.parent(var), Some(ret));
    assert_eq!(ast.index_of(wrapped), None, "the wrapper is fully detached");
}

#[test]
fn test_statement_position_classification_follows_edits() {
    let mut ast = Ast::new();
    let call = ast.call(None, "Setup", vec![]);
    let stmts = ast.nodes(vec![call]);
    assert!(ast.must_be_explicit_call(call));

    // moved into expression position, the marker is no longer needed
    ast.remove(call);
    let ret = ast.return_node(call);
    ast.push_stmt(stmts, ret);
    assert!(!ast.must_be_explicit_call(call));
    assert_eq!(ast.kind(ret), NodeKind::Return);
}

// ── scope resolution across nested constructs ──

#[test]
fn test_scope_resolution_through_nested_loop() {
    let mut ast = Ast::new();

    // def Walk(a, b, *rest) containing `for b in items`
    let loop_var = ast.get_variable(None, "b");
    let in_expr = ast.get_variable(None, "items");
    let loop_body = ast.nodes(vec![]);
    let for_n = ast.for_node(loop_var, in_expr, loop_body);
    let def_body = ast.nodes(vec![for_n]);
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

    // the resolver attaches snapshots while descending, merging the loop
    // scope over the function scope for the loop body
    let def_scope = ast.to_scope(def).unwrap();
    ast.node_mut(def).scope = Some(def_scope.clone());
    let loop_scope = ast.to_scope(for_n).unwrap();
    ast.node_mut(for_n).scope = Some(def_scope.merge(&loop_scope));

    let inner = ast.node(for_n).scope.as_ref().unwrap();
    assert_eq!(
        inner.argument_variable_names,
        ["a".to_string()].into_iter().collect(),
        "the loop binding shadows parameter b and the splat never counts"
    );
    assert!(inner.for_node_variable_names.contains("b"));
    assert_eq!(inner.function, Some(def), "function reference survives the merge");
}
