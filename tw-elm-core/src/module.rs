//! Accumulation of declarations and rendering of whole Elm modules.
use std::{collections::HashMap, path::PathBuf};

use crate::{config::FormatSpec, declaration::elm_function};

/// Map from class name to value with an explicit ordering contract:
/// - iteration follows the position where a key was first inserted;
/// - inserting an existing key replaces its value in place (last write wins).
#[derive(Clone, Debug)]
pub struct ClassMap<V> {
    index: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V> Default for ClassMap<V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<V> ClassMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns previous value if key was already present.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.index.get(&key) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

/// Rendered declaration for one class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub identifier: String,
    pub text: String,
}

/// Two distinct classes that produced the same identifier.
/// Both declarations stay in the module, so the Elm compiler rejects it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collision {
    pub identifier: String,
    pub first_class: String,
    pub second_class: String,
}

/// Final text of one module, ready to be written by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedModule {
    pub path: PathBuf,
    pub module_name: String,
    pub text: String,
}

#[derive(Debug)]
pub struct ModuleAssembler {
    module_name: String,
    path: PathBuf,
    format: FormatSpec,
    declarations: ClassMap<Declaration>,
}

impl ModuleAssembler {
    pub fn new(
        module_name: impl Into<String>,
        path: impl Into<PathBuf>,
        format: FormatSpec,
    ) -> Self {
        Self {
            module_name: module_name.into(),
            path: path.into(),
            format,
            declarations: ClassMap::new(),
        }
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn declarations(&self) -> &ClassMap<Declaration> {
        &self.declarations
    }

    /// Render and store declaration for `class`.
    /// Identifier collisions are not checked here, see [`crate::Generator::collisions`].
    pub fn insert(&mut self, class: &str, identifier: &str) {
        let declaration = Declaration {
            identifier: identifier.to_owned(),
            text: elm_function(&self.format, class, identifier),
        };
        self.declarations.insert(class, declaration);
    }

    pub fn header(&self) -> String {
        let mut header = format!("module {} exposing\n", self.module_name);
        if self.declarations.is_empty() {
            header.push_str("    (..)\n");
        } else {
            for (i, declaration) in self.declarations.values().enumerate() {
                let separator = if i == 0 { '(' } else { ',' };
                header.push_str(&format!("    {separator} {}\n", declaration.identifier));
            }
            header.push_str("    )\n");
        }
        if !self.format.imports.is_empty() {
            header.push('\n');
            for import in &self.format.imports {
                header.push_str(&format!("import {import}\n"));
            }
        }
        header
    }

    pub fn body(&self) -> String {
        self.declarations
            .values()
            .map(|declaration| declaration.text.as_str())
            .collect()
    }

    pub fn render(&self) -> GeneratedModule {
        GeneratedModule {
            path: self.path.clone(),
            module_name: self.module_name.clone(),
            text: self.header() + &self.body(),
        }
    }
}
