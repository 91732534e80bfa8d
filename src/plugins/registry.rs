//! Plugin registry.
//!
//! Maps plugin names to their capability implementations. The engine resolves
//! the name carried by each entry's action against this registry.

use super::command::CommandPlugin;
use super::file::FilePlugin;
use super::ActionPlugin;
use crate::models::config::Config;
use std::collections::HashMap;

/// Registry of action plugins, keyed by name.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: HashMap<String, Box<dyn ActionPlugin>>,
}

impl PluginRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in plugins registered.
    pub fn builtin(config: &Config) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(FilePlugin::new(config.backup_dir.clone())));
        registry.register(Box::new(CommandPlugin::new()));
        registry
    }

    /// Register a plugin under its own name, replacing any previous one.
    pub fn register(&mut self, plugin: Box<dyn ActionPlugin>) {
        self.plugins.insert(plugin.name().to_string(), plugin);
    }

    /// Look up a plugin by name.
    pub fn get(&self, name: &str) -> Option<&dyn ActionPlugin> {
        self.plugins.get(name).map(|p| p.as_ref())
    }

    /// Whether a plugin with the given name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Names of all registered plugins, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.plugins.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_contains_file_and_command() {
        let registry = PluginRegistry::builtin(&Config::default());
        assert!(registry.contains("file"));
        assert!(registry.contains("command"));
        assert!(!registry.contains("nonexistent"));
        assert_eq!(registry.names(), vec!["command", "file"]);
    }
}
