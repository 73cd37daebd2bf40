//! Process-time registry of module factories.
//!
//! A factory is the entry point a manifest refers to by `kind`. Built-in kinds
//! are registered by [`ModuleFactories::builtin`]; tests and embedders can add
//! their own with [`ModuleFactories::register`].

use crate::error::Result;
use crate::module::{CommandModule, ModuleEnv};
use crate::notes;
use std::collections::BTreeMap;
use std::fmt;

pub type ModuleFactory = Box<dyn Fn(&ModuleEnv) -> Result<Box<dyn CommandModule>>>;

#[derive(Default)]
pub struct ModuleFactories {
    factories: BTreeMap<String, ModuleFactory>,
}

impl ModuleFactories {
    pub fn new() -> Self {
        Self::default()
    }

    /// All module kinds compiled into this binary.
    pub fn builtin() -> Self {
        let mut factories = Self::new();
        factories.register(notes::KIND, notes::create);
        factories
    }

    /// Register a factory. Kinds are matched case-insensitively; a later
    /// registration for the same kind replaces the earlier one.
    pub fn register<F>(&mut self, kind: &str, factory: F) -> &mut Self
    where
        F: Fn(&ModuleEnv) -> Result<Box<dyn CommandModule>> + 'static,
    {
        self.factories
            .insert(kind.to_lowercase(), Box::new(factory));
        self
    }

    pub fn get(&self, kind: &str) -> Option<&ModuleFactory> {
        self.factories.get(&kind.to_lowercase())
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.get(kind).is_some()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl fmt::Debug for ModuleFactories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.kinds()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_includes_notes() {
        let factories = ModuleFactories::builtin();
        assert!(factories.contains("notes"));
        assert!(factories.contains("Notes"));
        assert!(!factories.contains("weather"));
    }

    #[test]
    fn kinds_are_sorted() {
        let mut factories = ModuleFactories::new();
        factories.register("zeta", notes::create);
        factories.register("Alpha", notes::create);
        assert_eq!(factories.kinds().collect::<Vec<_>>(), vec!["alpha", "zeta"]);
    }
}
