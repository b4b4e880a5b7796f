//! Lexical scopes for variables and functions.
//!
//! Scopes live in an arena (`ScopeTree`) and point at their parent by
//! index. The linker creates one scope per block (program root, each `if`,
//! `while` and `function` body); nodes refer to their scope by `ScopeId`
//! for the whole run, so scopes are never removed.

use rustc_hash::FxHashMap;
use thiserror::Error;

use lino_ir::{Value, ValueKind};

use crate::node::NodeId;

/// Index into the scope arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The program's root scope, always present.
    pub const ROOT: ScopeId = ScopeId(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Error returned when a name is declared twice in the same scope.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("`{name}` is already declared in this scope")]
pub struct AlreadyDeclared {
    pub name: String,
}

/// A single lexical scope.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    variables: FxHashMap<String, Value>,
    /// Functions declared in this scope, by their header node.
    functions: FxHashMap<String, NodeId>,
    parent: Option<ScopeId>,
}

impl Scope {
    fn with_parent(parent: ScopeId) -> Self {
        Scope {
            parent: Some(parent),
            ..Scope::default()
        }
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// A variable declared directly in this scope.
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Variables declared directly in this scope.
    pub fn variables(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.variables.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Arena of all scopes of a program.
#[derive(Clone, Debug)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl ScopeTree {
    /// Create a tree holding only the root scope.
    pub fn new() -> Self {
        ScopeTree {
            scopes: vec![Scope::default()],
        }
    }

    #[inline]
    pub fn root(&self) -> ScopeId {
        ScopeId::ROOT
    }

    /// Create a new scope nested in `parent`.
    pub fn child(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId(u32::try_from(self.scopes.len()).unwrap_or(u32::MAX));
        self.scopes.push(Scope::with_parent(parent));
        id
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.scope(id).parent
    }

    /// Number of scopes, the root included.
    pub fn count(&self) -> usize {
        self.scopes.len()
    }

    /// `scope` followed by each of its ancestors up to the root.
    pub fn ancestors(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), move |id| self.parent(*id))
    }

    /// Declare a variable of `kind` in exactly this scope, starting at its zero value.
    ///
    /// Shadowing a name from an enclosing scope is allowed; declaring it
    /// twice in the same scope is not.
    pub fn declare(
        &mut self,
        scope: ScopeId,
        name: &str,
        kind: ValueKind,
    ) -> Result<(), AlreadyDeclared> {
        let variables = &mut self.scopes[scope.index()].variables;
        if variables.contains_key(name) {
            return Err(AlreadyDeclared {
                name: name.to_string(),
            });
        }
        variables.insert(name.to_string(), kind.zero());
        Ok(())
    }

    pub fn declare_number(&mut self, scope: ScopeId, name: &str) -> Result<(), AlreadyDeclared> {
        self.declare(scope, name, ValueKind::Number)
    }

    pub fn declare_string(&mut self, scope: ScopeId, name: &str) -> Result<(), AlreadyDeclared> {
        self.declare(scope, name, ValueKind::Text)
    }

    /// Register a function header in exactly this scope.
    pub fn declare_function(
        &mut self,
        scope: ScopeId,
        name: &str,
        header: NodeId,
    ) -> Result<(), AlreadyDeclared> {
        let functions = &mut self.scopes[scope.index()].functions;
        if functions.contains_key(name) {
            return Err(AlreadyDeclared {
                name: name.to_string(),
            });
        }
        functions.insert(name.to_string(), header);
        Ok(())
    }

    /// Look a variable up, nearest scope first.
    pub fn get(&self, scope: ScopeId, name: &str) -> Option<&Value> {
        self.ancestors(scope)
            .find_map(|id| self.scopes[id.index()].variables.get(name))
    }

    /// Overwrite the nearest existing binding. Returns whether one was found.
    pub fn set_existing(&mut self, scope: ScopeId, name: &str, value: Value) -> bool {
        let Some(owner) = self
            .ancestors(scope)
            .find(|id| self.scopes[id.index()].variables.contains_key(name))
        else {
            return false;
        };
        if let Some(slot) = self.scopes[owner.index()].variables.get_mut(name) {
            *slot = value;
        }
        true
    }

    /// Overwrite the nearest existing binding, or create one in `scope`.
    pub fn set(&mut self, scope: ScopeId, name: &str, value: Value) {
        if !self.set_existing(scope, name, value.clone()) {
            self.scopes[scope.index()]
                .variables
                .insert(name.to_string(), value);
        }
    }

    /// Look a function up, nearest scope first.
    pub fn lookup_function(&self, scope: ScopeId, name: &str) -> Option<NodeId> {
        self.ancestors(scope)
            .find_map(|id| self.scopes[id.index()].functions.get(name).copied())
    }

    /// Every binding visible from `scope`, nearest first, shadowed names omitted.
    pub fn bindings(&self, scope: ScopeId) -> Vec<(&str, &Value)> {
        let mut seen = rustc_hash::FxHashSet::default();
        let mut result = Vec::new();
        for id in self.ancestors(scope) {
            let mut local: Vec<_> = self.scopes[id.index()].variables().collect();
            local.sort_by(|a, b| a.0.cmp(b.0));
            for (name, value) in local {
                if seen.insert(name) {
                    result.push((name, value));
                }
            }
        }
        result
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use expect to panic on unexpected state"
)]
mod tests;
