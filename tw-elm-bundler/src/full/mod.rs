use std::path::{Path, PathBuf};

use camino::Utf8Path;
use cargo_metadata::{Metadata, MetadataCommand, Package};
use tw_elm_core::Config;

use crate::{generate_from_file, Error, Report, Result};

pub const METADATA_KEY: &str = "tw-elm";

#[derive(Debug, Clone)]
pub struct BundleOption {
    /// Stylesheet to scan.
    pub input: PathBuf,
    pub config: Config,
}

/// Read `[package.metadata.tw-elm]`.
/// Relative paths are resolved against `manifest_root`.
pub fn get_config_from_metadata(
    metadata: &serde_json::Value,
    manifest_root: &Path,
) -> Option<BundleOption> {
    log::debug!("Reading metadata: {:?}", metadata);
    let tw_metadata = metadata.get(METADATA_KEY)?;

    let input = tw_metadata.get("input").and_then(|v| v.as_str())?;
    let mut config = Config::normalize(Some(tw_metadata));
    config.output_file = manifest_root.join(&config.output_file);
    for format in config.formats.values_mut() {
        if let Some(output_file) = &mut format.output_file {
            *output_file = manifest_root.join(&*output_file);
        }
    }
    Some(BundleOption {
        input: manifest_root.join(input),
        config,
    })
}

fn find_package<'a>(metadata: &'a Metadata, manifest_path: &Path) -> Option<&'a Package> {
    let manifest_path = Utf8Path::from_path(manifest_path)?;
    metadata
        .packages
        .iter()
        .find(|package| package.manifest_path.as_path() == manifest_path)
}

/// Read options of the package that owns `manifest_path`.
pub fn get_package_options(manifest_path: &Path) -> Result<BundleOption> {
    let metadata = MetadataCommand::new()
        .manifest_path(manifest_path)
        .no_deps()
        .exec()?;

    let package = find_package(&metadata, manifest_path)
        .ok_or_else(|| Error::PackageNotFound(manifest_path.to_path_buf()))?;
    let mut root = package.manifest_path.clone();
    root.pop();

    get_config_from_metadata(&package.metadata, root.as_std_path())
        .ok_or_else(|| Error::NoInput(package.name.clone()))
}

pub fn bundle(manifest_path: &Path) -> Result<(BundleOption, Report)> {
    let options = get_package_options(manifest_path)?;
    log::info!("Processing stylesheet: {}", options.input.display());
    let report = generate_from_file(&options.input, options.config.clone())?;
    Ok((options, report))
}

/// Entry point for `build.rs`.
///
/// ```no_run
/// fn main() {
///     tw_elm_bundler::bundle_build_rs().expect("Elm classes generated");
/// }
/// ```
pub fn bundle_build_rs() -> Result<Report> {
    let mut path: PathBuf = std::env::var("CARGO_MANIFEST_DIR")
        .unwrap_or_else(|_| ".".to_string())
        .into();
    path.push("Cargo.toml");
    println!("cargo:rerun-if-changed=Cargo.toml");

    let (options, report) = bundle(&path)?;
    for instruction in build_rs_instructions(&options, &report) {
        println!("{instruction}");
    }
    Ok(report)
}

/// `cargo:` lines for a finished bundle: rebuild when the stylesheet changes,
/// and one warning per module that could not be saved.
pub fn build_rs_instructions(options: &BundleOption, report: &Report) -> Vec<String> {
    let mut instructions = vec![format!(
        "cargo:rerun-if-changed={}",
        options.input.display()
    )];
    for (failed, error) in &report.failed {
        instructions.push(format!(
            "cargo:warning=Failed to save {}: {error}",
            failed.display()
        ));
    }
    instructions
}
