//! Asset name to identifier derivation.

/// Convert a hyphenated asset name into a PascalCase identifier.
///
/// `-` is a word boundary: it is dropped and the next character is
/// upper-cased. Directly after a digit it becomes `_` instead and the next
/// character keeps its case, so `0-1` stays distinguishable from `01`.
/// Digits never get capitalized and cancel a pending capital. Any other
/// character is copied through.
///
/// ```
/// use iconforge_codegen::derive_identifier;
///
/// assert_eq!(derive_identifier("arrow-down-0-1"), "ArrowDown0_1");
/// assert_eq!(derive_identifier("arrow-down-01"), "ArrowDown01");
/// assert_eq!(derive_identifier("test-5-end"), "Test5_end");
/// ```
pub fn derive_identifier(raw_name: &str) -> String {
    let mut result = String::with_capacity(raw_name.len());
    let mut capitalize_next = true;
    let mut last_was_digit = false;

    for ch in raw_name.chars() {
        if ch == '-' {
            if last_was_digit {
                result.push('_');
                capitalize_next = false;
            } else {
                capitalize_next = true;
            }
            last_was_digit = false;
        } else if ch.is_ascii_digit() {
            result.push(ch);
            capitalize_next = false;
            last_was_digit = true;
        } else {
            if capitalize_next {
                result.extend(ch.to_uppercase());
                capitalize_next = false;
            } else {
                result.push(ch);
            }
            last_was_digit = false;
        }
    }

    result
}
