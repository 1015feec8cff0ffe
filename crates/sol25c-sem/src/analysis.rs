//! Semantic passes over the parsed program.
//!
//! Pass order matters and is fixed: duplicate classes, duplicate selectors,
//! `Main`/`run` presence and arity, parent resolution, inheritance cycles,
//! dynamic-attribute harvest, block analysis. The first violation aborts
//! the whole analysis.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};

use sol25c_par::{is_reserved, Block, ClassDecl, Expr, LiteralKind, Program, Stmt};
use sol25c_util::{Diagnostic, ErrorKind, Result};

use crate::builtins;
use crate::scope::{Env, Role};

/// Validate `program`. The AST is not modified; success means the program
/// is ready for emission.
pub fn analyze(program: &Program) -> Result<()> {
    SemanticAnalyzer::new(program).run()
}

/// Analyzer state: the class table in source order and the per-class
/// dynamic-attribute sets. Both are transient; they live only for the
/// duration of the analysis.
pub struct SemanticAnalyzer<'a> {
    program: &'a Program,
    classes: IndexMap<&'a str, &'a ClassDecl>,
    dynamic_attrs: FxHashMap<&'a str, FxHashSet<&'a str>>,
}

impl<'a> SemanticAnalyzer<'a> {
    pub fn new(program: &'a Program) -> Self {
        Self {
            program,
            classes: IndexMap::new(),
            dynamic_attrs: FxHashMap::default(),
        }
    }

    /// Run every pass in order.
    pub fn run(mut self) -> Result<()> {
        self.build_class_table()?;
        self.check_duplicate_selectors()?;
        self.check_main()?;
        self.check_parents()?;
        self.check_inheritance_cycles()?;
        self.harvest_dynamic_attributes();

        let program = self.program;
        for class in &program.classes {
            for method in &class.methods {
                self.analyze_block(&method.body, class)?;
            }
        }

        Ok(())
    }

    /// Build the source-ordered class table, rejecting duplicates.
    fn build_class_table(&mut self) -> Result<()> {
        let program = self.program;
        for class in &program.classes {
            if self.classes.insert(class.name.as_str(), class).is_some() {
                return Err(Diagnostic::semantic_other(format!(
                    "duplicate class definition '{}'",
                    class.name
                )));
            }
        }
        Ok(())
    }

    /// Selectors must be unique within each class.
    fn check_duplicate_selectors(&self) -> Result<()> {
        for class in &self.program.classes {
            let mut seen = FxHashSet::default();
            for method in &class.methods {
                if !seen.insert(method.selector.as_str()) {
                    return Err(Diagnostic::semantic_other(format!(
                        "duplicate method '{}' in class '{}'",
                        method.selector, class.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// A `Main` class with a parameterless `run` method must exist.
    fn check_main(&self) -> Result<()> {
        if let Some(main) = self.classes.get("Main") {
            if let Some(run) = main.methods.iter().find(|m| m.selector == "run") {
                if !run.body.parameters.is_empty() {
                    return Err(Diagnostic::arity(
                        "the run method of class Main must have no parameters",
                    ));
                }
                return Ok(());
            }
        }
        Err(Diagnostic::missing_main(
            "no Main class with a run method found",
        ))
    }

    /// Every parent must be a user-defined or built-in class.
    fn check_parents(&self) -> Result<()> {
        for class in &self.program.classes {
            if !self.classes.contains_key(class.parent.as_str())
                && !builtins::is_builtin(&class.parent)
            {
                return Err(Diagnostic::undefined(format!(
                    "undefined parent class '{}'",
                    class.parent
                )));
            }
        }
        Ok(())
    }

    /// Three-color DFS over the user-defined part of the hierarchy.
    /// Built-in parents terminate a chain and cannot participate in a
    /// cycle.
    fn check_inheritance_cycles(&self) -> Result<()> {
        let mut states: FxHashMap<&str, VisitState> = FxHashMap::default();
        for &name in self.classes.keys() {
            if !states.contains_key(name) && self.dfs_finds_cycle(name, &mut states) {
                return Err(Diagnostic::semantic_other(format!(
                    "inheritance cycle involving class '{name}'"
                )));
            }
        }
        Ok(())
    }

    fn dfs_finds_cycle(&self, name: &'a str, states: &mut FxHashMap<&'a str, VisitState>) -> bool {
        states.insert(name, VisitState::OnStack);

        let class = self.classes[name];
        if let Some((_, parent, _)) = self.classes.get_full(class.parent.as_str()) {
            let parent: &'a str = *parent;
            match states.get(parent) {
                Some(VisitState::OnStack) => return true,
                Some(VisitState::Done) => {},
                None => {
                    if self.dfs_finds_cycle(parent, states) {
                        return true;
                    }
                },
            }
        }

        states.insert(name, VisitState::Done);
        false
    }

    // ---- dynamic attributes ----

    /// First traversal: register every `self attr: v` setter send in the
    /// whole program, per class, before any use is checked.
    fn harvest_dynamic_attributes(&mut self) {
        let program = self.program;
        for class in &program.classes {
            self.dynamic_attrs.entry(class.name.as_str()).or_default();
        }
        for class in &program.classes {
            for method in &class.methods {
                self.harvest_block(&method.body, class.name.as_str());
            }
        }
    }

    fn harvest_block(&mut self, block: &'a Block, class_name: &'a str) {
        for stmt in &block.statements {
            self.harvest_expr(stmt.value(), class_name);
        }
    }

    fn harvest_expr(&mut self, expr: &'a Expr, class_name: &'a str) {
        match expr {
            Expr::Send {
                selector,
                target,
                args,
                ..
            } => {
                if is_self_var(target) {
                    if let Some(attr) = setter_attribute(selector) {
                        self.dynamic_attrs
                            .entry(class_name)
                            .or_default()
                            .insert(attr);
                    }
                }
                self.harvest_expr(target, class_name);
                for arg in args {
                    self.harvest_expr(arg, class_name);
                }
            },
            Expr::Block(inner) => self.harvest_block(inner, class_name),
            Expr::Literal { .. } | Expr::Var { .. } => {},
        }
    }

    // ---- block and expression analysis ----

    /// Analyze one block under a fresh environment of its parameters plus
    /// `self`. Statements are processed left to right; a local becomes
    /// visible only after the assignment that defines it.
    fn analyze_block(&mut self, block: &'a Block, class: &'a ClassDecl) -> Result<()> {
        let mut seen = FxHashSet::default();
        for param in &block.parameters {
            if !seen.insert(param.name.as_str()) {
                return Err(Diagnostic::semantic_other(format!(
                    "duplicate formal parameter '{}'",
                    param.name
                )));
            }
        }

        let mut env = Env::new(&block.parameters);
        for stmt in &block.statements {
            match stmt {
                Stmt::Assign { target, value, .. } => {
                    if env.role(target) == Some(Role::Param) {
                        return Err(Diagnostic::var_collision(format!(
                            "assignment to formal parameter '{target}'"
                        )));
                    }
                    self.analyze_expr(value, &env, class)?;
                    env.define_local(target);
                },
                Stmt::Expr { value, .. } => {
                    self.analyze_expr(value, &env, class)?;
                },
            }
        }

        Ok(())
    }

    fn analyze_expr(&mut self, expr: &'a Expr, env: &Env<'a>, class: &'a ClassDecl) -> Result<()> {
        match expr {
            Expr::Var { name, span } => {
                if env.contains(name) {
                    return Ok(());
                }
                if name.starts_with(|c: char| c.is_ascii_uppercase()) {
                    if self.is_known_class(name) {
                        Ok(())
                    } else {
                        Err(Diagnostic::new(
                            ErrorKind::Undefined,
                            format!("use of undefined class '{name}'"),
                            *span,
                        ))
                    }
                } else {
                    Err(Diagnostic::new(
                        ErrorKind::Undefined,
                        format!("use of uninitialized variable '{name}'"),
                        *span,
                    ))
                }
            },
            Expr::Literal {
                kind: LiteralKind::Class,
                value,
                span,
            } => {
                if self.is_known_class(value) {
                    Ok(())
                } else {
                    Err(Diagnostic::new(
                        ErrorKind::Undefined,
                        format!("use of undefined class '{value}'"),
                        *span,
                    ))
                }
            },
            Expr::Literal { .. } => Ok(()),
            Expr::Block(inner) => self.analyze_block(inner, class),
            Expr::Send {
                selector,
                target,
                args,
                span,
            } => {
                if is_reserved(selector) {
                    return Err(Diagnostic::new(
                        ErrorKind::Syntactic,
                        format!("reserved identifier '{selector}' used as selector"),
                        *span,
                    ));
                }

                self.analyze_expr(target, env, class)?;
                for arg in args {
                    self.analyze_expr(arg, env, class)?;
                }

                if is_self_var(target) {
                    self.check_self_send(selector, args.len(), class)?;
                }
                if let Some(receiver) = class_receiver(target) {
                    if !self.lookup_method(receiver, selector) {
                        return Err(Diagnostic::new(
                            ErrorKind::Undefined,
                            format!("class '{receiver}' does not understand '{selector}'"),
                            *span,
                        ));
                    }
                }

                Ok(())
            },
        }
    }

    /// A message to `self`: either a call of a method the current class
    /// defines (arity-checked), an attribute setter (`attr:` with one
    /// argument, which also registers the attribute), or an attribute
    /// getter (no arguments, attribute must be registered).
    fn check_self_send(
        &mut self,
        selector: &'a str,
        arg_count: usize,
        class: &'a ClassDecl,
    ) -> Result<()> {
        if let Some(method) = class.methods.iter().find(|m| m.selector == selector) {
            let expected = method.body.parameters.len();
            if arg_count != expected {
                return Err(Diagnostic::arity(format!(
                    "method '{selector}' of class '{}' expects {expected} argument(s), got {arg_count}",
                    class.name
                )));
            }
        } else if let Some(attr) = setter_attribute(selector) {
            if arg_count != 1 {
                return Err(Diagnostic::arity(format!(
                    "attribute setter '{selector}' expects 1 argument, got {arg_count}"
                )));
            }
            self.dynamic_attrs
                .entry(class.name.as_str())
                .or_default()
                .insert(attr);
        } else {
            if arg_count != 0 {
                return Err(Diagnostic::arity(format!(
                    "attribute getter '{selector}' expects no arguments, got {arg_count}"
                )));
            }
            let known = self
                .dynamic_attrs
                .get(class.name.as_str())
                .is_some_and(|attrs| attrs.contains(selector));
            if !known {
                return Err(Diagnostic::undefined(format!(
                    "use of undefined attribute '{selector}' in class '{}'",
                    class.name
                )));
            }
        }

        Ok(())
    }

    /// Resolve `selector` starting at `class_name` and walking parents.
    /// User-defined classes are searched by their declared methods; the
    /// chain ends in the built-in tables.
    fn lookup_method(&self, class_name: &str, selector: &str) -> bool {
        match self.classes.get(class_name) {
            Some(class) => {
                class.methods.iter().any(|m| m.selector == selector)
                    || self.lookup_method(&class.parent, selector)
            },
            None => builtins::lookup(class_name, selector),
        }
    }

    fn is_known_class(&self, name: &str) -> bool {
        self.classes.contains_key(name) || builtins::is_builtin(name)
    }
}

/// DFS coloring for cycle detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VisitState {
    OnStack,
    Done,
}

/// True if the expression is exactly the variable `self`.
fn is_self_var(expr: &Expr) -> bool {
    matches!(expr, Expr::Var { name, .. } if name == "self")
}

/// Attribute name of a setter selector: exactly one colon, at the end.
/// Multi-keyword selectors are not setters.
fn setter_attribute(selector: &str) -> Option<&str> {
    let attr = selector.strip_suffix(':')?;
    if attr.contains(':') {
        return None;
    }
    Some(attr)
}

/// Receiver class name when the target is a class reference.
fn class_receiver(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Literal {
            kind: LiteralKind::Class,
            value,
            ..
        } => Some(value),
        Expr::Var { name, .. } if name.starts_with(|c: char| c.is_ascii_uppercase()) => Some(name),
        _ => None,
    }
}
