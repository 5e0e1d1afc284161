//! Elm identifiers for normalized class names.
//!
//! Each `:` segment of a class becomes a group of words:
//! - `-` splits words, a leading `-` before the utility body is the word `neg`;
//! - `.` is the word `dot`, `/` is the inline text `over`;
//! - the configured prefix is split off as its own word.
//!
//! Groups and words are then joined by [`NameStyle`].
use crate::config::{Config, NameStyle};

const ELM_RESERVED: &[&str] = &[
    "alias", "as", "case", "else", "exposing", "if", "import", "in", "infix", "let", "module",
    "of", "port", "then", "type", "where",
];

/// Identifier used when the class has no usable characters at all.
/// Also prepended to identifiers that would start with a digit.
const FALLBACK_WORD: &str = "n";

/// Convert normalized class name to Elm identifier.
///
/// ```
/// use tw_elm_core::{ident::to_elm_name, Config};
/// let config = Config::default();
/// assert_eq!(to_elm_name("sm:-m-24", &config), "sm__neg_m_24");
/// assert_eq!(to_elm_name("w-1/2", &config), "w_1over2");
/// ```
pub fn to_elm_name(class: &str, config: &Config) -> String {
    let prefix = config.prefix.trim_matches('-');
    let groups = class
        .split(':')
        .map(|segment| segment_words(segment, prefix))
        .filter(|words| !words.is_empty())
        .collect::<Vec<_>>();

    let mut name = match config.name_style {
        NameStyle::Snake => groups
            .iter()
            .map(|words| words.join("_"))
            .collect::<Vec<_>>()
            .join("__"),
        NameStyle::Camel => camel_case(groups.iter().flatten()),
    };
    make_valid_elm(&mut name, config.name_style);
    name
}

fn segment_words(segment: &str, prefix: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut rest = segment;
    if !prefix.is_empty() {
        if let Some(after) = rest
            .strip_prefix(prefix)
            .and_then(|after| after.strip_prefix('-'))
        {
            words.push(prefix.to_owned());
            rest = after;
        }
    }
    if let Some(body) = rest.strip_prefix('-') {
        if body.starts_with(|c: char| c.is_alphanumeric()) {
            words.push("neg".to_owned());
            rest = body;
        }
    }

    let mut word = String::new();
    for ch in rest.chars() {
        match ch {
            '/' => word.push_str("over"),
            '.' => {
                flush_word(&mut words, &mut word);
                words.push("dot".to_owned());
            }
            c if c.is_alphanumeric() || c == '_' => word.push(c),
            // '-' and anything Elm can't hold in an identifier.
            _ => flush_word(&mut words, &mut word),
        }
    }
    flush_word(&mut words, &mut word);
    words
}

fn flush_word(words: &mut Vec<String>, word: &mut String) {
    if !word.is_empty() {
        words.push(std::mem::take(word));
    }
}

fn camel_case<'a>(words: impl Iterator<Item = &'a String>) -> String {
    let mut result = String::new();
    for (i, word) in words.enumerate() {
        let mut chars = word.chars();
        let Some(first) = chars.next() else {
            continue;
        };
        if i == 0 {
            result.extend(first.to_lowercase());
        } else {
            result.extend(first.to_uppercase());
        }
        result.extend(chars);
    }
    result
}

fn make_valid_elm(name: &mut String, name_style: NameStyle) {
    match name.chars().next() {
        None => name.push_str(FALLBACK_WORD),
        Some(first) if first.is_numeric() => {
            let separator = match name_style {
                NameStyle::Snake => "_",
                NameStyle::Camel => "",
            };
            name.insert_str(0, &format!("{FALLBACK_WORD}{separator}"));
        }
        Some(first) if first.is_uppercase() => {
            let lower = first.to_lowercase().collect::<String>();
            name.replace_range(..first.len_utf8(), &lower);
        }
        Some('_') => name.insert_str(0, FALLBACK_WORD),
        Some(_) => {}
    }
    if ELM_RESERVED.contains(&name.as_str()) {
        name.push('_');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::fix_class;
    use pretty_assertions::assert_eq;

    fn snake(class: &str) -> String {
        to_elm_name(&fix_class(class), &Config::default())
    }

    fn with(prefix: &str, name_style: NameStyle) -> Config {
        Config {
            prefix: prefix.into(),
            name_style,
            ..Config::default()
        }
    }

    #[test]
    fn plain_names() {
        assert_eq!(snake("container"), "container");
        assert_eq!(snake("mx-auto"), "mx_auto");
        assert_eq!(snake(".cursor-pointer"), "cursor_pointer");
        assert_eq!(snake(".font-medium"), "font_medium");
    }

    #[test]
    fn camel_case_names() {
        let camel = with("", NameStyle::Camel);
        assert_eq!(to_elm_name(&fix_class("mx-auto"), &camel), "mxAuto");
        assert_eq!(to_elm_name("sm:hover:bg-blue-500", &camel), "smHoverBgBlue500");
    }

    #[test]
    fn variants_use_double_underscore() {
        assert_eq!(snake("sm:mx-auto"), "sm__mx_auto");
        assert_eq!(snake(".xl:focus:no-underline:focus"), "xl__focus__no_underline");
        assert_eq!(
            snake(".xl:odd:tw-bg-pink-700:nth-child(odd)"),
            "xl__odd__tw_bg_pink_700"
        );
        assert_eq!(
            snake(".lg:even:tw-bg-pink-700:nth-child(even)"),
            "lg__even__tw_bg_pink_700"
        );
        assert_eq!(
            snake(".last:tw-bg-transparent:last-child"),
            "last__tw_bg_transparent"
        );
    }

    #[test]
    fn over_and_dot() {
        assert_eq!(snake(".w-1\\/2"), "w_1over2");
        assert_eq!(snake(".col-gap-1\\.5"), "col_gap_1_dot_5");
        assert_eq!(snake(".bottom-0.5"), "bottom_0_dot_5");
    }

    #[test]
    fn negative_values() {
        assert_eq!(snake(".-m-1"), "neg_m_1");
        assert_eq!(snake(".sm:-m-24"), "sm__neg_m_24");
        assert_eq!(snake(".sm:-translate-x-1"), "sm__neg_translate_x_1");
    }

    #[test]
    fn prefix_handling() {
        let prefixed = with("tw-", NameStyle::Snake);
        assert_eq!(
            to_elm_name(&fix_class(".hover:tw-bg-blue-500:hover"), &prefixed),
            "hover__tw_bg_blue_500"
        );
        assert_eq!(
            to_elm_name(&fix_class(".xl:tw--my-64"), &prefixed),
            "xl__tw_neg_my_64"
        );
        assert_eq!(
            to_elm_name(&fix_class(".xl:tw--my-64"), &with("tw-", NameStyle::Camel)),
            "xlTwNegMy64"
        );
        assert_eq!(
            to_elm_name(&fix_class(".xl:tw-my-64"), &with("-tw", NameStyle::Snake)),
            "xl__tw_my_64"
        );
    }

    #[test]
    fn combinators() {
        assert_eq!(snake("fa > li"), "fa");
        assert_eq!(snake("fa> li"), "fa");
        assert_eq!(snake("fa >li"), "fa");
    }

    #[test]
    fn always_valid_elm_identifier() {
        assert_eq!(snake(".\\32 xl\\:text-lg"), "n_2xl__text_lg");
        assert_eq!(snake(".Button"), "button");
        assert_eq!(snake(".type"), "type_");
        assert_eq!(snake(".w-\\[10px\\]"), "w_10px");
        assert_eq!(to_elm_name("", &Config::default()), "n");
        assert_eq!(
            to_elm_name("2xl:p-4", &with("", NameStyle::Camel)),
            "n2xlP4"
        );
    }

    #[test]
    fn same_input_same_identifier() {
        let config = with("tw-", NameStyle::Camel);
        assert_eq!(
            to_elm_name("md:tw--mt-2", &config),
            to_elm_name("md:tw--mt-2", &config)
        );
    }
}
