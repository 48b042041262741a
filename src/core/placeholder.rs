use std::sync::LazyLock;

use regex::Regex;

/// Default prefix marking values that still need a real translation.
pub const DEFAULT_PLACEHOLDER_PREFIX: &str = "[AUTO] ";

// Lowercase letter immediately followed by an uppercase one: "sendEmail" -> "send|Email"
static CAMEL_BOUNDARY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\p{Ll})(\p{Lu})").unwrap());

/// Turn the last segment of a dotted key into readable text.
///
/// `crm.contacts.sendEmailTitle` -> `Send email title`,
/// `admin.users.no_name` -> `No name`.
pub fn humanize_key(key: &str) -> String {
    let last = key.rsplit('.').next().unwrap_or(key);
    let spaced = last.replace('_', " ");
    let spaced = CAMEL_BOUNDARY_REGEX.replace_all(&spaced, "$1 $2");
    let lower = spaced.to_lowercase();

    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Placeholder value for a key that is missing in a locale.
pub fn placeholder_for(key: &str, prefix: &str) -> String {
    format!("{}{}", prefix, humanize_key(key))
}
