//! Type-safe Elm bindings for CSS classes.
//!
//! Scans rule selectors of a stylesheet, extracts class names and renders
//! Elm modules with one declaration per class:
//!
//! ```elm
//! sm__mx_auto : Html.Attribute msg
//! sm__mx_auto =
//!     A.class "sm:mx-auto"
//! ```
//!
//! Pipeline for each rule: [`selector::is_class_selector`] ->
//! [`selector::fix_class`] -> [`ident::to_elm_name`] ->
//! [`module::ModuleAssembler::insert`] (which renders with
//! [`declaration::elm_function`]). A [`Generator`] owns the state of one run.
use std::collections::HashMap;

use thiserror::Error;

pub mod config;
pub mod declaration;
pub mod ident;
pub mod module;
pub mod selector;
#[cfg(feature = "lightningcss")]
mod visitor;

pub use config::{Config, DeclarationKind, FormatSpec, NameStyle};
pub use module::{ClassMap, Collision, GeneratedModule, ModuleAssembler};
#[cfg(feature = "lightningcss")]
pub use visitor::collect_selectors;

#[derive(Error, Debug)]
pub enum Error {
    #[cfg(feature = "lightningcss")]
    #[error("Failed to print selector as css")]
    PrintFailed(#[from] lightningcss::error::PrinterError),
    #[error("Failed to parse stylesheet: {0}")]
    ParseError(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// State of a single generation run.
/// Create a new one for each stylesheet; nothing is shared between runs.
#[derive(Debug)]
pub struct Generator {
    config: Config,
    // Main module first, then one per configured format.
    modules: Vec<ModuleAssembler>,
    // identifier -> class that first produced it
    owners: HashMap<String, String>,
    collisions: Vec<Collision>,
}

impl Generator {
    pub fn new(config: Config) -> Self {
        let mut modules = vec![ModuleAssembler::new(
            config.output_module_name.clone(),
            config.output_file.clone(),
            FormatSpec::html(),
        )];
        for (tag, format) in &config.formats {
            let (path, name) = config.format_target(tag, format);
            modules.push(ModuleAssembler::new(name, path, format.clone()));
        }
        Self {
            config,
            modules,
            owners: HashMap::new(),
            collisions: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn modules(&self) -> &[ModuleAssembler] {
        &self.modules
    }

    /// Handle selector of one rule.
    /// Returns normalized class, or `None` if selector was skipped.
    pub fn process_selector(&mut self, selector: &str) -> Option<String> {
        if !selector::is_class_selector(selector) {
            log::debug!("Skipping non-class selector {selector:?}");
            return None;
        }
        let class = selector::fix_class(selector);
        if class.is_empty() {
            log::debug!("Skipping selector without class name {selector:?}");
            return None;
        }
        let identifier = ident::to_elm_name(&class, &self.config);
        self.check_collision(&class, &identifier);
        for module in &mut self.modules {
            module.insert(&class, &identifier);
        }
        Some(class)
    }

    fn check_collision(&mut self, class: &str, identifier: &str) {
        let owner = self
            .owners
            .entry(identifier.to_owned())
            .or_insert_with(|| class.to_owned());
        // Every module holds the same classes, the main one is enough.
        if owner.as_str() == class || self.modules[0].declarations().contains_key(class) {
            return;
        }
        log::warn!("Classes {owner:?} and {class:?} both map to {identifier:?}");
        self.collisions.push(Collision {
            identifier: identifier.to_owned(),
            first_class: owner.clone(),
            second_class: class.to_owned(),
        });
    }

    pub fn process_rules<I, S>(&mut self, selectors: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for selector in selectors {
            self.process_selector(selector.as_ref());
        }
    }

    /// Parse stylesheet and process every style rule in source order.
    #[cfg(feature = "lightningcss")]
    pub fn process_stylesheet(&mut self, style: &str) -> Result<()> {
        let selectors = collect_selectors(style)?;
        self.process_rules(selectors);
        Ok(())
    }

    /// Distinct classes that produced the same identifier, in the order found.
    /// Both declarations are kept in every module.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    pub fn finish(self) -> Vec<GeneratedModule> {
        self.modules.iter().map(ModuleAssembler::render).collect()
    }
}
