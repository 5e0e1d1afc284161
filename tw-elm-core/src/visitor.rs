use lightningcss::{
    rules::CssRule,
    stylesheet::{ParserOptions, PrinterOptions, StyleSheet},
    traits::ToCss as _,
    visit_types,
    visitor::{Visit, VisitTypes, Visitor},
};

use crate::Error;

/// Collects selector text of every style rule, in source order.
/// Nested rules (inside `@media`, `@supports`, `@layer` or css nesting) are visited too.
#[derive(Default)]
pub(crate) struct RuleVisitor {
    // Output:
    pub selectors: Vec<String>,
}

impl<'i> Visitor<'i> for RuleVisitor {
    type Error = Error;
    fn visit_types(&self) -> VisitTypes {
        visit_types!(RULES)
    }

    fn visit_rule(&mut self, rule: &mut CssRule<'i>) -> Result<(), Self::Error> {
        if let CssRule::Style(style) = rule {
            let selector = style.selectors.to_css_string(PrinterOptions::default())?;
            self.selectors.push(selector);
        }
        rule.visit_children(self)
    }
}

/// Parse stylesheet and return raw selector of each style rule.
pub fn collect_selectors(style: &str) -> Result<Vec<String>, Error> {
    let mut stylesheet = StyleSheet::parse(style, ParserOptions::default())
        .map_err(|e| Error::ParseError(format!("{:?}", e)))?;
    let mut visitor = RuleVisitor::default();
    stylesheet.visit(&mut visitor)?;
    Ok(visitor.selectors)
}
