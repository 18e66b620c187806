//! 식별자 문법 규칙
//!
//! MySQL 비인용 식별자 중 안전한 부분집합만 허용합니다:
//! `[A-Za-z_][A-Za-z0-9_$]*`, 최대 64자.

use crate::error::{Error, Result};

/// MySQL 식별자 최대 길이
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// 식별자 문법 검사
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    if name.len() > MAX_IDENTIFIER_LEN {
        return false;
    }

    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// 식별자 검증 (에러 반환)
pub fn ensure_identifier(name: &str) -> Result<&str> {
    if is_valid_identifier(name) {
        Ok(name)
    } else {
        Err(Error::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(is_valid_identifier("widgets"));
        assert!(is_valid_identifier("_private"));
        assert!(is_valid_identifier("order_items2"));
        assert!(is_valid_identifier("price$usd"));
        assert!(is_valid_identifier(&"a".repeat(MAX_IDENTIFIER_LEN)));
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("1widgets"));
        assert!(!is_valid_identifier("widgets; DROP TABLE users"));
        assert!(!is_valid_identifier("wid`gets"));
        assert!(!is_valid_identifier("schema.table"));
        assert!(!is_valid_identifier("naïve"));
        assert!(!is_valid_identifier(&"a".repeat(MAX_IDENTIFIER_LEN + 1)));
    }

    #[test]
    fn test_ensure_identifier() {
        assert_eq!(ensure_identifier("widgets").unwrap(), "widgets");
        assert!(matches!(
            ensure_identifier("a b"),
            Err(Error::InvalidIdentifier { .. })
        ));
    }
}
