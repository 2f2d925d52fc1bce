use crate::{compile, Scope};
use autoscope_core::{
    schema::ModelId,
    stmt::{Fragment, Value},
    Error, Metadata, Result,
};
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};
use tracing::debug;

/// Compiled scopes, memoized per model and name.
///
/// The registry is shared between threads. Hits take a read lock. On a miss
/// the scope is compiled without holding the lock and the first compiled
/// scope to be inserted is kept, so every caller observes the same
/// [`Arc<Scope>`].
///
/// Names that match no convention are not remembered and are compiled
/// again on every lookup.
#[derive(Debug, Default)]
pub struct Registry {
    scopes: RwLock<HashMap<ModelId, HashMap<String, Arc<Scope>>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the scope `name` of `model`, compiling it on first use.
    pub fn resolve(
        &self,
        metadata: &dyn Metadata,
        model: ModelId,
        name: &str,
    ) -> Result<Option<Arc<Scope>>> {
        if let Some(scope) = self.get(model, name) {
            return Ok(Some(scope));
        }

        let Some(scope) = compile(metadata, model, name)? else {
            return Ok(None);
        };

        let mut scopes = self.scopes.write().unwrap_or_else(PoisonError::into_inner);

        let scope = scopes
            .entry(model)
            .or_default()
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!(model = ?model, scope = name, "registered automatic scope");
                Arc::new(scope)
            });

        Ok(Some(scope.clone()))
    }

    /// Looks up an already compiled scope.
    pub fn get(&self, model: ModelId, name: &str) -> Option<Arc<Scope>> {
        let scopes = self.scopes.read().unwrap_or_else(PoisonError::into_inner);
        scopes.get(&model)?.get(name).cloned()
    }

    /// Resolves and invokes a scope. Names that resolve to no scope are an
    /// [`unknown scope`](Error::unknown_scope) error.
    pub fn call(
        &self,
        metadata: &dyn Metadata,
        model: ModelId,
        name: &str,
        args: &[Value],
    ) -> Result<Fragment> {
        match self.resolve(metadata, model, name)? {
            Some(scope) => scope.call(metadata, args),
            None => Err(Error::unknown_scope(
                metadata.model_name(model)?.upper_camel_case(),
                name,
            )),
        }
    }

    /// Number of cached scopes across all models.
    pub fn len(&self) -> usize {
        let scopes = self.scopes.read().unwrap_or_else(PoisonError::into_inner);
        scopes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
