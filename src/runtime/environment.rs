use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::runtime::{Builtin, Value};

/// Environment for variable scoping
///
/// A stack of nested scopes walked innermost-first, plus a builtins table
/// consulted before the scope chain. Builtin names cannot be assigned.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Stack of nested scopes
    scopes: Vec<Scope>,
    /// Builtin callables, shared by every scope
    builtins: HashMap<String, Value>,
}

/// Single scope in the environment
#[derive(Debug, Clone)]
struct Scope {
    /// Variables defined in this scope
    variables: HashMap<String, Value>,
    /// Index of parent scope (None for global scope)
    parent: Option<usize>,
}

impl Environment {
    /// Creates a new environment with a global scope and the builtin table
    pub fn new() -> Self {
        let mut builtins = HashMap::new();
        builtins.insert(
            Builtin::Print.name().to_string(),
            Value::Builtin(Builtin::Print),
        );

        Environment {
            scopes: vec![Scope {
                variables: HashMap::new(),
                parent: None,
            }],
            builtins,
        }
    }

    /// Enters a new nested scope
    pub fn enter_scope(&mut self) {
        let parent_idx = self.scopes.len() - 1;
        self.scopes.push(Scope {
            variables: HashMap::new(),
            parent: Some(parent_idx),
        });
    }

    /// Exits the current scope and returns to the parent scope
    pub fn exit_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Defines a variable in the innermost scope
    pub fn define(&mut self, name: String, value: Value) {
        let current_scope = self.scopes.last_mut().expect("global scope always exists");
        current_scope.variables.insert(name, value);
    }

    /// Gets the value of a variable or builtin by name
    ///
    /// Walks the scope chain from innermost to outermost and stops at the
    /// first match; builtins resolve first.
    pub fn get(&self, name: &str) -> Result<Value> {
        if let Some(val) = self.builtins.get(name) {
            return Ok(val.clone());
        }

        let mut scope_idx = self.scopes.len() - 1;
        loop {
            let scope = &self.scopes[scope_idx];
            if let Some(val) = scope.variables.get(name) {
                return Ok(val.clone());
            }
            match scope.parent {
                Some(parent) => scope_idx = parent,
                None => {
                    return Err(Error::UndefinedVariable {
                        name: name.to_string(),
                    })
                }
            }
        }
    }

    /// Assigns a variable (updates the first enclosing match, or creates the
    /// variable in the innermost scope when no scope defines it)
    pub fn assign(&mut self, name: &str, value: Value) -> Result<()> {
        if self.builtins.contains_key(name) {
            return Err(Error::BuiltinReassignment {
                name: name.to_string(),
            });
        }

        let mut scope_idx = self.scopes.len() - 1;
        loop {
            let scope = &mut self.scopes[scope_idx];
            if scope.variables.contains_key(name) {
                scope.variables.insert(name.to_string(), value);
                return Ok(());
            }
            match scope.parent {
                Some(parent) => scope_idx = parent,
                None => {
                    let current_scope =
                        self.scopes.last_mut().expect("global scope always exists");
                    current_scope.variables.insert(name.to_string(), value);
                    return Ok(());
                }
            }
        }
    }

    /// Checks if a variable or builtin is visible from the current scope
    pub fn exists(&self, name: &str) -> bool {
        if self.builtins.contains_key(name) {
            return true;
        }

        let mut scope_idx = self.scopes.len() - 1;
        loop {
            let scope = &self.scopes[scope_idx];
            if scope.variables.contains_key(name) {
                return true;
            }
            match scope.parent {
                Some(parent) => scope_idx = parent,
                None => return false,
            }
        }
    }

    /// Returns the current scope depth (1 for global scope only)
    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_define_and_get() {
        let mut env = Environment::new();
        env.define("x".to_string(), Value::Int(42));

        let val = env.get("x").unwrap();
        assert_eq!(val, Value::Int(42));
    }

    #[test]
    fn test_undefined_variable() {
        let env = Environment::new();
        let result = env.get("undefined");
        assert_eq!(
            result,
            Err(Error::UndefinedVariable {
                name: "undefined".to_string()
            })
        );
    }

    #[test]
    fn test_variable_scoping() {
        let mut env = Environment::new();

        env.define("x".to_string(), Value::Int(10));

        env.enter_scope();
        env.define("x".to_string(), Value::Int(20));
        env.define("y".to_string(), Value::Int(30));

        assert_eq!(env.get("x").unwrap(), Value::Int(20));
        assert_eq!(env.get("y").unwrap(), Value::Int(30));

        env.exit_scope();

        assert_eq!(env.get("x").unwrap(), Value::Int(10));
        assert!(env.get("y").is_err());
    }

    #[test]
    fn test_assign_updates_enclosing_scope() {
        let mut env = Environment::new();

        env.define("x".to_string(), Value::Int(1));
        env.enter_scope();
        env.assign("x", Value::Int(2)).unwrap();
        env.exit_scope();

        assert_eq!(env.get("x").unwrap(), Value::Int(2));
    }

    #[test]
    fn test_assign_creates_in_innermost_scope() {
        let mut env = Environment::new();

        env.enter_scope();
        env.assign("local", Value::Int(5)).unwrap();
        assert_eq!(env.get("local").unwrap(), Value::Int(5));
        env.exit_scope();

        // the variable was created in the inner scope, so it is gone now
        assert!(env.get("local").is_err());
    }

    #[test]
    fn test_variable_shadowing() {
        let mut env = Environment::new();

        env.define("x".to_string(), Value::Int(10));

        env.enter_scope();
        env.define("x".to_string(), Value::String("shadowed".to_string()));

        assert_eq!(env.get("x").unwrap(), Value::String("shadowed".to_string()));

        env.exit_scope();
        assert_eq!(env.get("x").unwrap(), Value::Int(10));
    }

    #[test]
    fn test_builtins_resolve_and_resist_assignment() {
        let mut env = Environment::new();

        assert_eq!(env.get("print").unwrap(), Value::Builtin(Builtin::Print));

        let result = env.assign("print", Value::Int(1));
        assert_eq!(
            result,
            Err(Error::BuiltinReassignment {
                name: "print".to_string()
            })
        );
    }

    #[test]
    fn test_exists() {
        let mut env = Environment::new();

        assert!(!env.exists("x"));
        assert!(env.exists("print"));

        env.define("x".to_string(), Value::Int(42));
        assert!(env.exists("x"));

        env.enter_scope();
        assert!(env.exists("x"));

        env.define("y".to_string(), Value::Int(10));
        assert!(env.exists("y"));

        env.exit_scope();
        assert!(!env.exists("y"));
    }

    #[test]
    fn test_scope_depth() {
        let mut env = Environment::new();
        assert_eq!(env.scope_depth(), 1);

        env.enter_scope();
        assert_eq!(env.scope_depth(), 2);

        env.enter_scope();
        assert_eq!(env.scope_depth(), 3);

        env.exit_scope();
        env.exit_scope();
        assert_eq!(env.scope_depth(), 1);
    }
}
