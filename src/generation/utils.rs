//! Identifier transformation utilities for code generation
//!
//! Model names and operation names are both derived from raw document strings
//! (schema names, `operationId`s, path templates) through [`mangle`].

/// Characters that split an input into identifier segments.
const SEGMENT_SEPARATORS: &[char] = &['{', '}', '_', '/', '.', '-'];

/// Converts an arbitrary document string into a camel-cased identifier.
///
/// The input is split on `{ } _ / . -`, empty segments are discarded and the
/// first character of every remaining segment is uppercased. When
/// `first_lowercase` is set the first character of the first segment is
/// lowercased instead. All other characters are kept verbatim.
///
/// An input made only of separators yields an empty string.
///
/// # Examples
/// ```
/// use openapi_ts_gen::generation::utils::mangle;
///
/// assert_eq!(mangle("user_profile/get", true), "userProfileGet");
/// assert_eq!(mangle("Pet-Store.id", false), "PetStoreId");
/// assert_eq!(mangle("/pets/{petId}/get", true), "petsPetIdGet");
/// ```
pub fn mangle(input: &str, first_lowercase: bool) -> String {
    let mut result = String::with_capacity(input.len());

    for (index, segment) in input
        .split(SEGMENT_SEPARATORS)
        .filter(|segment| !segment.is_empty())
        .enumerate()
    {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            if index == 0 && first_lowercase {
                result.extend(first.to_lowercase());
            } else {
                result.extend(first.to_uppercase());
            }
            result.push_str(chars.as_str());
        }
    }

    result
}

/// Returns true when `name` can be used as a bare TypeScript identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '$')
}

/// Formats a property name for use as a key in a TypeScript type literal.
///
/// Names that are not valid identifiers (e.g. `X-Request-Id`) are quoted.
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}
