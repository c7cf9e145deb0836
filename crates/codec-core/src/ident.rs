//! Identifier validation and casing, shared by the loader and the emitter.

use heck::{ToPascalCase, ToSnakeCase};

/// True if `s` is non-empty, starts with an ASCII letter or `_`, and
/// contains only ASCII alphanumerics/`_` thereafter — i.e. capitalizes to
/// a valid identifier in the target language.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Target-language type name for a schema identifier (`PascalCase`).
pub fn type_name(name: &str) -> String {
    name.to_pascal_case()
}

/// Target-language field/variable name for a schema identifier (`snake_case`).
pub fn field_name(name: &str) -> String {
    name.to_snake_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_leading_underscore_and_alnum_body() {
        assert!(is_valid_identifier("_foo_1"));
        assert!(is_valid_identifier("Order"));
    }

    #[test]
    fn rejects_empty_and_leading_digit() {
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("1field"));
        assert!(!is_valid_identifier("bad name"));
    }

    #[test]
    fn casing_helpers() {
        assert_eq!(type_name("order_book"), "OrderBook");
        assert_eq!(field_name("OrderBook"), "order_book");
    }
}
