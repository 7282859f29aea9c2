//! Placeholder substitution over fixed template text
//!
//! A placeholder is `{name}` where `name` is a key of the value map. Braces
//! that are not part of a known placeholder (all the C punctuation in the
//! templates) pass through untouched.

use std::collections::BTreeMap;

pub type Values = BTreeMap<&'static str, String>;

pub fn render(template: &str, values: &Values) -> String {
    let mut out = template.to_string();
    for (name, value) in values {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}
