//! Attribute escaping and output post-passes.
//!
//! Attribute values are escaped the usual way, with control whitespace
//! written as numeric character references. String-literal values then get
//! a second treatment: a post-pass over the serialized document rewrites
//! the `value="…"` attribute of `<literal>` elements only, turning
//! `&amp;apos;` into `\&apos;` and `&#10;` into `\n`, so the value reads
//! back in SOL25 escape syntax while every other attribute stays normally
//! XML-escaped.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Escape `value` for use inside a double-quoted XML attribute.
pub(crate) fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\r' => escaped.push_str("&#13;"),
            '\n' => escaped.push_str("&#10;"),
            '\t' => escaped.push_str("&#09;"),
            c => escaped.push(c),
        }
    }
    escaped
}

static LITERAL_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(<literal\b[^>]*\svalue=")([^"]*)(")"#).expect("valid pattern"));

/// Rewrite the `value` attribute of every `<literal>` element in the
/// serialized document.
pub(crate) fn rewrite_literal_values(xml: &str) -> String {
    LITERAL_VALUE
        .replace_all(xml, |caps: &Captures<'_>| {
            let value = caps[2]
                .replace("&amp;apos;", "\\&apos;")
                .replace("&#10;", "\\n");
            format!("{}{}{}", &caps[1], value, &caps[3])
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attr_entities() {
        assert_eq!(escape_attr("a&b"), "a&amp;b");
        assert_eq!(escape_attr("a<b>c"), "a&lt;b&gt;c");
        assert_eq!(escape_attr("say \"hi\""), "say &quot;hi&quot;");
        assert_eq!(escape_attr("line\nbreak"), "line&#10;break");
        assert_eq!(escape_attr("tab\there"), "tab&#09;here");
    }

    #[test]
    fn test_escape_attr_plain_passthrough() {
        assert_eq!(escape_attr("plus:"), "plus:");
        assert_eq!(escape_attr("čau"), "čau");
    }

    #[test]
    fn test_rewrite_only_literal_values() {
        let xml = r#"<literal class="String" value="it&amp;apos;s" /><var name="it&amp;apos;s" />"#;
        let rewritten = rewrite_literal_values(xml);
        assert!(rewritten.contains(r#"value="it\&apos;s""#));
        assert!(rewritten.contains(r#"name="it&amp;apos;s""#));
    }

    #[test]
    fn test_rewrite_newline_references() {
        let xml = r#"<literal class="String" value="a&#10;b" />"#;
        assert_eq!(
            rewrite_literal_values(xml),
            r#"<literal class="String" value="a\nb" />"#
        );
    }

    #[test]
    fn test_rewrite_leaves_other_entities() {
        let xml = r#"<literal class="String" value="a&amp;b&lt;c" />"#;
        assert_eq!(rewrite_literal_values(xml), xml);
    }
}
