use crate::error::{MigrationError, MigrationResult};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_ALPHANUMERIC: Regex =
        Regex::new(r"[^0-9a-zA-Z]+").expect("Invalid non-alphanumeric regex");
}

/// Turn a display name into a resource identifier.
///
/// The result is lowercase, made of `[0-9a-z_]` only, has no leading or
/// trailing underscore unless it starts with a digit (then it gets a single
/// `_` prefix), and normalizing it again yields the same string.
///
/// Names without any ASCII alphanumeric character are rejected.
pub fn normalize_identifier(name: &str) -> MigrationResult<String> {
    let lowered = name.trim().to_lowercase();
    let replaced = NON_ALPHANUMERIC.replace_all(&lowered, "_");
    let slug = replaced.trim_matches('_');

    if slug.is_empty() {
        return Err(MigrationError::EmptyIdentifier {
            name: name.to_string(),
        });
    }

    if slug.starts_with(|c: char| c.is_ascii_digit()) {
        Ok(format!("_{}", slug))
    } else {
        Ok(slug.to_string())
    }
}
