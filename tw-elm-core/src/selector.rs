//! Selector classification and class name normalization.
//!
//! Utility class names encode state variants with `:` (`hover:bg-blue-500`),
//! while the stylesheet itself appends native pseudo selectors to the same
//! rule (`.hover\:bg-blue-500:hover`). Normalization keeps the first kind and
//! drops the trailing second kind.
//!
//! The selector is scanned once into escape-aware units, split into
//! colon-delimited segments and trimmed from the tail.

/// Native pseudo-classes (and legacy single colon pseudo-elements) that are dropped
/// when they trail the class name.
const NATIVE_PSEUDO: &[&str] = &[
    "active",
    "after",
    "any-link",
    "autofill",
    "backdrop",
    "before",
    "checked",
    "default",
    "disabled",
    "empty",
    "enabled",
    "first-child",
    "first-letter",
    "first-line",
    "first-of-type",
    "focus",
    "focus-visible",
    "focus-within",
    "fullscreen",
    "hover",
    "in-range",
    "indeterminate",
    "invalid",
    "last-child",
    "last-of-type",
    "link",
    "marker",
    "only-child",
    "only-of-type",
    "optional",
    "out-of-range",
    "placeholder",
    "placeholder-shown",
    "read-only",
    "read-write",
    "required",
    "root",
    "selection",
    "target",
    "valid",
    "visited",
];

const VENDOR_PREFIXES: &[&str] = &["-webkit-", "-moz-", "-ms-", "-o-"];

/// Admit selectors whose first simple selector is a class.
pub fn is_class_selector(selector: &str) -> bool {
    selector.trim_start().starts_with('.')
}

/// One scanned character. Escaped characters never have structural meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Unit {
    ch: char,
    escaped: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Segment {
    text: String,
    /// Segment was introduced with `::`.
    pseudo_element: bool,
    /// Segment has an unescaped `(` (like `not(:active)`).
    functional: bool,
}

impl Segment {
    fn is_native_pseudo(&self) -> bool {
        if self.pseudo_element || self.functional {
            return true;
        }
        NATIVE_PSEUDO.contains(&self.text.as_str())
            || VENDOR_PREFIXES.iter().any(|p| self.text.starts_with(p))
    }
}

/// Canonical class name of an admitted selector.
///
/// ```
/// use tw_elm_core::selector::fix_class;
/// assert_eq!(fix_class(".hover\\:bg-blue-500:hover"), "hover:bg-blue-500");
/// assert_eq!(fix_class(".w-1\\/2"), "w-1/2");
/// ```
pub fn fix_class(selector: &str) -> String {
    let selector = selector.trim_start();
    let selector = selector.strip_prefix('.').unwrap_or(selector);

    let units = scan_compound(selector);
    let mut segments = split_segments(&units);

    if let Some(first_element) = segments
        .iter()
        .skip(1)
        .position(|s| s.pseudo_element)
    {
        segments.truncate(first_element + 1);
    }
    while segments.len() > 1 && segments.last().is_some_and(Segment::is_native_pseudo) {
        segments.pop();
    }

    let mut result = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            result.push(':');
        }
        result.push_str(&segment.text);
    }
    result
}

/// Decode escapes and stop at the first combinator or list separator outside of parentheses.
fn scan_compound(selector: &str) -> Vec<Unit> {
    let mut units = Vec::with_capacity(selector.len());
    let mut chars = selector.chars().peekable();
    let mut depth = 0usize;

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match decode_escape(&mut chars) {
                Some(ch) => units.push(Unit { ch, escaped: true }),
                // Trailing backslash is dropped.
                None => break,
            }
            continue;
        }
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if depth == 0 && (c.is_whitespace() || ">+~,".contains(c)) => break,
            _ => {}
        }
        units.push(Unit { ch, escaped: false });
    }
    units
}

/// Expects that caller already took the backslash.
fn decode_escape<I>(chars: &mut std::iter::Peekable<I>) -> Option<char>
where
    I: Iterator<Item = char>,
{
    let first = chars.next()?;
    if !first.is_ascii_hexdigit() {
        return Some(first);
    }
    let mut code = first.to_digit(16)?;
    for _ in 1..6 {
        match chars.peek().and_then(|c| c.to_digit(16)) {
            Some(digit) => {
                code = code * 16 + digit;
                chars.next();
            }
            None => break,
        }
    }
    // Single whitespace terminates a hex escape.
    if chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
    Some(char::from_u32(code).filter(|c| *c != '\0').unwrap_or('\u{FFFD}'))
}

fn split_segments(units: &[Unit]) -> Vec<Segment> {
    let mut segments = vec![Segment::default()];
    let mut depth = 0usize;
    let mut i = 0;

    while i < units.len() {
        let unit = units[i];
        i += 1;
        if unit.escaped {
            push_char(&mut segments, unit.ch);
            continue;
        }
        match unit.ch {
            ':' if depth == 0 => {
                let pseudo_element = units
                    .get(i)
                    .is_some_and(|next| next.ch == ':' && !next.escaped);
                if pseudo_element {
                    i += 1;
                }
                segments.push(Segment {
                    pseudo_element,
                    ..Default::default()
                });
                continue;
            }
            '(' => {
                depth += 1;
                if let Some(last) = segments.last_mut() {
                    last.functional = true;
                }
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        push_char(&mut segments, unit.ch);
    }
    segments
}

fn push_char(segments: &mut [Segment], ch: char) {
    if let Some(last) = segments.last_mut() {
        last.text.push(ch);
    }
}
