#![cfg(feature = "full")]
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tw_elm_bundler::{bundle, build_rs_instructions, Error, Report};

const PROJECT_FILES: &[&str] = &["Cargo.toml", "src/lib.rs", "styles/main.css"];

// Copy a fixture project so generated modules land in a temporary directory.
fn copy_fixture(name: &str, files: &[&str], target: &Path) -> PathBuf {
    let source = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_files")
        .join(name);
    for file in files {
        let to = target.join(file);
        std::fs::create_dir_all(to.parent().unwrap()).unwrap();
        std::fs::copy(source.join(file), to).unwrap();
    }
    target.join("Cargo.toml")
}

#[test]
fn bundles_project_from_cargo_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let manifest = copy_fixture("project", PROJECT_FILES, &root);
    std::fs::create_dir(root.join("src").join("TW")).unwrap();

    let (options, report) = bundle(&manifest).unwrap();
    assert_eq!(options.input, root.join("styles/main.css"));
    assert_eq!(options.config.output_file, root.join("src/TW.elm"));
    assert_eq!(options.config.output_module_name, "TW");
    assert!(report.is_success(), "{:?}", report.failed);
    assert_eq!(
        report.saved,
        vec![root.join("src/TW.elm"), root.join("src/TW/String.elm")]
    );

    let main = std::fs::read_to_string(root.join("src/TW.elm")).unwrap();
    assert!(main.starts_with(
        "module TW exposing\n    ( container\n    , sm__mx_auto\n    )\n\n\
         import Html\nimport Html.Attributes as A\n"
    ));
    let strings = std::fs::read_to_string(root.join("src/TW/String.elm")).unwrap();
    assert!(strings.contains("\n\nsm__mx_auto : String\nsm__mx_auto =\n    \"sm:mx-auto\"\n"));

    assert_eq!(
        build_rs_instructions(&options, &report),
        vec![format!(
            "cargo:rerun-if-changed={}",
            root.join("styles/main.css").display()
        )]
    );
}

#[test]
fn failed_writes_become_cargo_warnings() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let manifest = copy_fixture("project", PROJECT_FILES, &root);

    // No `src/TW` directory, so the string module can't be saved.
    let (options, report) = bundle(&manifest).unwrap();
    assert_eq!(report.saved, vec![root.join("src/TW.elm")]);
    assert_eq!(report.failed.len(), 1);

    let instructions = build_rs_instructions(&options, &report);
    assert_eq!(instructions.len(), 2);
    assert!(instructions[1].starts_with(&format!(
        "cargo:warning=Failed to save {}: ",
        root.join("src/TW/String.elm").display()
    )));
}

#[test]
fn instructions_list_every_failure() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let manifest = copy_fixture("project", PROJECT_FILES, &root);
    let (options, _) = bundle(&manifest).unwrap();

    let report = Report {
        saved: Vec::new(),
        failed: vec![
            (
                PathBuf::from("A.elm"),
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ),
            (
                PathBuf::from("B.elm"),
                std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            ),
        ],
    };
    let instructions = build_rs_instructions(&options, &report);
    assert_eq!(
        instructions[1..].to_vec(),
        vec![
            "cargo:warning=Failed to save A.elm: denied".to_string(),
            "cargo:warning=Failed to save B.elm: missing".to_string(),
        ]
    );
}

#[test]
fn package_without_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let manifest = copy_fixture("no_input", &["Cargo.toml", "src/lib.rs"], &root);

    let result = bundle(&manifest);
    assert!(
        matches!(&result, Err(Error::NoInput(name)) if name == "tw_elm_no_input"),
        "{result:?}"
    );
    assert!(!root.join("src/TW.elm").exists());
}
