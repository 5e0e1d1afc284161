use crate::config::{DeclarationKind, FormatSpec};

/// Render a single top-level declaration for `class` bound to `identifier`.
/// Declarations start with a blank line separator, so they can be concatenated after the header.
pub fn elm_function(format: &FormatSpec, class: &str, identifier: &str) -> String {
    let literal = elm_string_literal(class);
    match &format.kind {
        DeclarationKind::Attribute {
            result_type,
            function_prefix_text,
        } => format!(
            "\n\n{identifier} : {result_type}\n{identifier} =\n    {function_prefix_text}{literal}\n"
        ),
        DeclarationKind::Constant => {
            format!("\n\n{identifier} : String\n{identifier} =\n    {literal}\n")
        }
    }
}

fn elm_string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for ch in value.chars() {
        match ch {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn generates_html_attributes() {
        let output = elm_function(&FormatSpec::html(), "bg-pink-700", "bg_pink_700");
        assert_eq!(
            output,
            "\n\nbg_pink_700 : Html.Attribute msg\nbg_pink_700 =\n    A.class \"bg-pink-700\"\n"
        );
    }

    #[test]
    fn generates_svg_attributes() {
        let output = elm_function(&FormatSpec::svg(), "bg-pink-700", "bg_pink_700");
        assert!(output.contains("bg_pink_700 : Svg.Attribute msg"));
        assert!(output.contains("A.class \"bg-pink-700\""));
    }

    #[test]
    fn generates_strings() {
        let output = elm_function(&FormatSpec::string(), "sm:w-1/2", "sm__w_1over2");
        assert_eq!(
            output,
            "\n\nsm__w_1over2 : String\nsm__w_1over2 =\n    \"sm:w-1/2\"\n"
        );
    }

    #[test]
    fn custom_attribute_format() {
        let format = FormatSpec::attribute("Css.Style", "Css.class ", &["Css"]);
        let output = elm_function(&format, "p-4", "p_4");
        assert!(output.contains("p_4 : Css.Style\n"));
        assert!(output.contains("    Css.class \"p-4\"\n"));
    }

    #[test]
    fn escapes_class_literal() {
        let output = elm_function(&FormatSpec::string(), "a\\b\"c", "a_b_c");
        assert!(output.contains(r#""a\\b\"c""#));
    }
}
