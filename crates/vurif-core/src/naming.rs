//! Case conversion between the tag spellings a component may be referenced by.

/// Convert a tag name to UpperCamelCase by splitting on hyphens and
/// capitalizing each segment.
///
/// ```
/// use vurif_core::to_upper_camel_case;
///
/// assert_eq!(to_upper_camel_case("add-card-button"), "AddCardButton");
/// assert_eq!(to_upper_camel_case("AddCardButton"), "AddCardButton");
/// assert_eq!(to_upper_camel_case("app"), "App");
/// ```
pub fn to_upper_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for segment in s.split('-') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            result.push(first.to_ascii_uppercase());
            result.extend(chars);
        }
    }
    result
}

/// Convert a tag name to kebab-case. A hyphen is inserted before every
/// uppercase letter that follows a word character, then everything is
/// lowercased.
///
/// ```
/// use vurif_core::to_kebab_case;
///
/// assert_eq!(to_kebab_case("AddCardButton"), "add-card-button");
/// assert_eq!(to_kebab_case("add-card-button"), "add-card-button");
/// ```
pub fn to_kebab_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            if prev.is_some_and(|p| p.is_ascii_alphanumeric() || p == '_') {
                result.push('-');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
        prev = Some(c);
    }
    result
}
