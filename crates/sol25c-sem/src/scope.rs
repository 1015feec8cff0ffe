//! Block environments.
//!
//! An environment is created per block and discarded when its analysis
//! ends. Formal parameters and `self` enter with the `Param` role and can
//! never be assigned; locals appear with the `Local` role as assignments
//! define them, so a name is visible only after the statement that first
//! assigns it.

use rustc_hash::FxHashMap;
use sol25c_par::Parameter;

/// How a name entered the environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Role {
    /// Formal parameter or `self`; assignment is a collision.
    Param,
    /// Local variable introduced by an assignment.
    Local,
}

/// Name bindings visible inside one block.
pub(crate) struct Env<'a> {
    bindings: FxHashMap<&'a str, Role>,
}

impl<'a> Env<'a> {
    /// Environment for a block: its parameters plus `self`.
    pub(crate) fn new(parameters: &'a [Parameter]) -> Self {
        let mut bindings = FxHashMap::default();
        for param in parameters {
            bindings.insert(param.name.as_str(), Role::Param);
        }
        bindings.insert("self", Role::Param);
        Self { bindings }
    }

    /// Role of `name`, if bound.
    pub(crate) fn role(&self, name: &str) -> Option<Role> {
        self.bindings.get(name).copied()
    }

    /// True if `name` is bound at all.
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Bind `name` as a local unless it is already bound.
    pub(crate) fn define_local(&mut self, name: &'a str) {
        self.bindings.entry(name).or_insert(Role::Local);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(names: &[&str]) -> Vec<Parameter> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Parameter {
                name: name.to_string(),
                order: i + 1,
            })
            .collect()
    }

    #[test]
    fn test_parameters_and_self_are_params() {
        let params = params(&["x", "y"]);
        let env = Env::new(&params);
        assert_eq!(env.role("x"), Some(Role::Param));
        assert_eq!(env.role("y"), Some(Role::Param));
        assert_eq!(env.role("self"), Some(Role::Param));
        assert_eq!(env.role("z"), None);
    }

    #[test]
    fn test_locals_appear_on_definition() {
        let params = params(&[]);
        let mut env = Env::new(&params);
        assert!(!env.contains("tmp"));
        env.define_local("tmp");
        assert_eq!(env.role("tmp"), Some(Role::Local));
    }

    #[test]
    fn test_define_local_does_not_demote_param() {
        let params = params(&["x"]);
        let mut env = Env::new(&params);
        env.define_local("x");
        assert_eq!(env.role("x"), Some(Role::Param));
    }
}
