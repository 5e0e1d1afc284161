//! Generator options.
//!
//! Options usually come from a loosely typed source (a JSON object handed
//! over by the host build, or `[package.metadata.tw-elm]` in a manifest),
//! so [`Config::normalize`] never fails: every recognized top-level key
//! overrides only itself, everything else keeps its default.
use std::{
    collections::BTreeMap,
    path::{Component, Path, PathBuf},
};

use serde_json::{Map, Value};

pub const DEFAULT_OUTPUT_FILE: &str = "src/TW.elm";

const OUTPUT_FILE_KEYS: &[&str] = &["outputFile", "elmFile", "output-file", "elm-file"];
const MODULE_NAME_KEYS: &[&str] = &[
    "outputModuleName",
    "elmModuleName",
    "output-module-name",
    "elm-module-name",
];
const PREFIX_KEYS: &[&str] = &["prefix"];
const NAME_STYLE_KEYS: &[&str] = &["nameStyle", "name-style"];
const FORMATS_KEYS: &[&str] = &["formats"];

const RESULT_TYPE_KEYS: &[&str] = &["resultType", "type", "result-type"];
const FUNCTION_PREFIX_KEYS: &[&str] = &["functionPrefixText", "fn", "function-prefix-text"];
const IMPORTS_KEYS: &[&str] = &["imports"];

/// How words of an identifier are joined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NameStyle {
    /// `sm__mx_auto`
    #[default]
    Snake,
    /// `smMxAuto`
    Camel,
}

impl NameStyle {
    /// Unknown styles fall back to [`NameStyle::Snake`].
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("camel") {
            NameStyle::Camel
        } else {
            if !name.eq_ignore_ascii_case("snake") {
                log::warn!("Unknown nameStyle {name:?}, falling back to snake");
            }
            NameStyle::Snake
        }
    }
}

/// Shape of a single generated declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclarationKind {
    /// `name : Html.Attribute msg` bound to `A.class "name"`.
    Attribute {
        result_type: String,
        function_prefix_text: String,
    },
    /// `name : String` bound to the class literal.
    Constant,
}

/// One output module: what each declaration looks like and what the header imports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatSpec {
    pub kind: DeclarationKind,
    pub imports: Vec<String>,
    /// Overrides for the location of this module.
    /// When absent, they are derived from the main module.
    pub output_file: Option<PathBuf>,
    pub output_module_name: Option<String>,
}

impl FormatSpec {
    pub fn html() -> Self {
        Self::attribute("Html.Attribute msg", "A.class ", &["Html", "Html.Attributes as A"])
    }
    pub fn svg() -> Self {
        Self::attribute("Svg.Attribute msg", "A.class ", &["Svg", "Svg.Attributes as A"])
    }
    pub fn string() -> Self {
        Self {
            kind: DeclarationKind::Constant,
            imports: vec![],
            output_file: None,
            output_module_name: None,
        }
    }
    pub fn attribute(result_type: &str, function_prefix_text: &str, imports: &[&str]) -> Self {
        Self {
            kind: DeclarationKind::Attribute {
                result_type: result_type.to_owned(),
                function_prefix_text: function_prefix_text.to_owned(),
            },
            imports: imports.iter().map(|s| s.to_string()).collect(),
            output_file: None,
            output_module_name: None,
        }
    }

    /// Built-in format for a known tag.
    pub fn builtin(tag: &str) -> Option<Self> {
        match tag {
            "html" => Some(Self::html()),
            "svg" => Some(Self::svg()),
            "string" => Some(Self::string()),
            _ => None,
        }
    }

    /// Read a format entry, filling missing sub-fields from the built-in format of the same tag.
    /// Entries that end up without a result type render plain `String` constants.
    pub fn from_value(tag: &str, value: &Value) -> Self {
        let base = Self::builtin(tag);
        let Some(object) = value.as_object() else {
            log::warn!("Format {tag:?} is not an object, using defaults");
            return base.unwrap_or_else(Self::string);
        };
        let lookup = |keys: &[&str]| keys.iter().find_map(|k| object.get(*k));

        let result_type = lookup(RESULT_TYPE_KEYS).and_then(Value::as_str);
        let function_prefix_text = lookup(FUNCTION_PREFIX_KEYS).and_then(Value::as_str);

        let kind = match (result_type, &base) {
            // A declared `String` type never goes through an attribute function.
            (Some("String"), _) if function_prefix_text.unwrap_or("").is_empty() => {
                DeclarationKind::Constant
            }
            (Some(result_type), base) => {
                let base_prefix = match base.as_ref().map(|b| &b.kind) {
                    Some(DeclarationKind::Attribute {
                        function_prefix_text,
                        ..
                    }) => function_prefix_text.as_str(),
                    _ => "",
                };
                DeclarationKind::Attribute {
                    result_type: result_type.to_owned(),
                    function_prefix_text: function_prefix_text.unwrap_or(base_prefix).to_owned(),
                }
            }
            (None, Some(base)) => match (&base.kind, function_prefix_text) {
                (
                    DeclarationKind::Attribute { result_type, .. },
                    Some(function_prefix_text),
                ) => DeclarationKind::Attribute {
                    result_type: result_type.clone(),
                    function_prefix_text: function_prefix_text.to_owned(),
                },
                (kind, _) => kind.clone(),
            },
            (None, None) => {
                log::warn!("Format {tag:?} has no resultType, generating String constants");
                DeclarationKind::Constant
            }
        };

        let imports = match lookup(IMPORTS_KEYS) {
            Some(Value::Array(imports)) => imports
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
            Some(other) => {
                log::warn!("Format {tag:?} has non-array imports: {other}");
                base.as_ref().map(|b| b.imports.clone()).unwrap_or_default()
            }
            None => base.as_ref().map(|b| b.imports.clone()).unwrap_or_default(),
        };

        Self {
            kind,
            imports,
            output_file: lookup(OUTPUT_FILE_KEYS)
                .and_then(Value::as_str)
                .map(PathBuf::from),
            output_module_name: lookup(MODULE_NAME_KEYS)
                .and_then(Value::as_str)
                .map(str::to_owned),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub output_file: PathBuf,
    pub output_module_name: String,
    pub prefix: String,
    pub name_style: NameStyle,
    pub formats: BTreeMap<String, FormatSpec>,
}

impl Default for Config {
    fn default() -> Self {
        let output_file = PathBuf::from(DEFAULT_OUTPUT_FILE);
        Self {
            output_module_name: module_name_from_path(&output_file),
            output_file,
            prefix: String::new(),
            name_style: NameStyle::Snake,
            formats: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Merge user options over the defaults.
    /// Absent or non-object input yields [`Config::default`].
    pub fn normalize(options: Option<&Value>) -> Self {
        let mut config = Self::default();
        let Some(options) = options else {
            return config;
        };
        let Some(object) = options.as_object() else {
            log::warn!("Options should be an object, got {options}; using defaults");
            return config;
        };

        let get_str = |keys: &[&str]| string_option(object, keys);

        if let Some(output_file) = get_str(OUTPUT_FILE_KEYS) {
            config.output_file = PathBuf::from(output_file);
        }
        config.output_module_name = match get_str(MODULE_NAME_KEYS) {
            Some(name) => name.to_owned(),
            None => module_name_from_path(&config.output_file),
        };
        if let Some(prefix) = get_str(PREFIX_KEYS) {
            config.prefix = prefix.to_owned();
        }
        if let Some(name_style) = get_str(NAME_STYLE_KEYS) {
            config.name_style = NameStyle::from_name(name_style);
        }
        match FORMATS_KEYS.iter().find_map(|k| object.get(*k)) {
            Some(Value::Object(formats)) => {
                config.formats = formats
                    .iter()
                    .map(|(tag, value)| (tag.clone(), FormatSpec::from_value(tag, value)))
                    .collect();
            }
            Some(other) => log::warn!("Option \"formats\" should be an object, got {other}"),
            None => {}
        }
        config
    }

    /// Resolve where the module of a format tag is written, and its module name.
    /// `src/TW.elm` with tag `svg` gives `src/TW/Svg.elm` named `TW.Svg`.
    pub fn format_target(&self, tag: &str, format: &FormatSpec) -> (PathBuf, String) {
        let path = format.output_file.clone().unwrap_or_else(|| {
            let mut path = self.output_file.with_extension("");
            path.push(capitalize(tag));
            path.set_extension("elm");
            path
        });
        let name = format.output_module_name.clone().unwrap_or_else(|| {
            if format.output_file.is_some() {
                module_name_from_path(&path)
            } else {
                format!("{}.{}", self.output_module_name, capitalize(tag))
            }
        });
        (path, name)
    }
}

// Find first present key, warn if it has unexpected type.
fn string_option<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    let (key, value) = keys
        .iter()
        .find_map(|k| object.get(*k).map(|v| (*k, v)))?;
    let result = value.as_str();
    if result.is_none() {
        log::warn!("Option {key:?} should be a string, got {value}; ignoring");
    }
    result
}

/// `src/Tailwind/Classes.elm` -> `Tailwind.Classes`, `TW.elm` -> `TW`.
pub fn module_name_from_path(path: &Path) -> String {
    let path = path.with_extension("");
    let components = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>();
    let after_src = components
        .iter()
        .rposition(|c| c == "src")
        .map(|i| &components[i + 1..])
        .filter(|rest| !rest.is_empty());
    match after_src {
        Some(rest) => rest.join("."),
        None => components.last().cloned().unwrap_or_default(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
