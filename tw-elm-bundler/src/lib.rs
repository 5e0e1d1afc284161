#[cfg(feature = "full")]
pub mod full;
use std::path::{Path, PathBuf};

#[cfg(feature = "full")]
pub use full::*;

use serde_json::Value;
use thiserror::Error;
use tw_elm_core::{Config, GeneratedModule, Generator};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] tw_elm_core::Error),
    #[error("Failed to read stylesheet {path}")]
    ReadStyle {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[cfg(feature = "full")]
    #[error("Failed to read cargo metadata")]
    Metadata(#[from] cargo_metadata::Error),
    #[cfg(feature = "full")]
    #[error("No stylesheet configured for package {0}")]
    NoInput(String),
    #[cfg(feature = "full")]
    #[error("Failed to find package by manifest path: {}", .0.display())]
    PackageNotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Outcome of writing generated modules.
/// Write failures are collected here instead of failing the build.
#[derive(Debug, Default)]
pub struct Report {
    pub saved: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, std::io::Error)>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Overwrite each module file with its generated text.
pub fn write_modules(modules: &[GeneratedModule]) -> Report {
    let mut report = Report::default();
    for module in modules {
        match std::fs::write(&module.path, module.text.as_bytes()) {
            Ok(()) => {
                log::info!("{} was saved!", module.path.display());
                report.saved.push(module.path.clone());
            }
            Err(e) => {
                log::error!("Failed to save {}: {e}", module.path.display());
                report.failed.push((module.path.clone(), e));
            }
        }
    }
    report
}

/// Generate modules for `style` without touching the disk.
pub fn generate_modules(style: &str, config: Config) -> Result<Vec<GeneratedModule>> {
    let mut generator = Generator::new(config);
    generator.process_stylesheet(style)?;
    Ok(generator.finish())
}

/// Generate and save modules for `style`, options are read with [`Config::normalize`].
pub fn generate_from_str(style: &str, options: Option<&Value>) -> Result<Report> {
    let modules = generate_modules(style, Config::normalize(options))?;
    Ok(write_modules(&modules))
}

pub fn generate_from_file(input: &Path, config: Config) -> Result<Report> {
    let style = std::fs::read_to_string(input).map_err(|source| Error::ReadStyle {
        path: input.to_path_buf(),
        source,
    })?;
    let modules = generate_modules(&style, config)?;
    Ok(write_modules(&modules))
}
