//! 엔티티 ID 파싱
//!
//! URL 경로의 `:entityId` 세그먼트를 정수 PK로 변환합니다.
//! 모든 테이블은 정수형 `id` 컬럼을 PK로 가진다고 가정합니다.

use crate::error::{Error, Result};

/// PK 컬럼 이름
pub const ID_COLUMN: &str = "id";

/// 경로 세그먼트를 엔티티 ID로 파싱
///
/// 10진수 정수만 허용합니다. 앞뒤 공백, 부호 없는 숫자 외의 문자는 거부합니다.
pub fn parse_entity_id(raw: &str) -> Result<i64> {
    let valid = !raw.is_empty()
        && raw
            .strip_prefix('-')
            .unwrap_or(raw)
            .chars()
            .all(|c| c.is_ascii_digit());

    if !valid {
        return Err(Error::InvalidEntityId {
            value: raw.to_string(),
        });
    }

    raw.parse::<i64>().map_err(|_| Error::InvalidEntityId {
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entity_id() {
        assert_eq!(parse_entity_id("42").unwrap(), 42);
        assert_eq!(parse_entity_id("-7").unwrap(), -7);
        assert_eq!(parse_entity_id("007").unwrap(), 7);
    }

    #[test]
    fn test_parse_entity_id_rejects_garbage() {
        assert!(parse_entity_id("").is_err());
        assert!(parse_entity_id("-").is_err());
        assert!(parse_entity_id("12abc").is_err());
        assert!(parse_entity_id(" 12").is_err());
        assert!(parse_entity_id("+12").is_err());
        assert!(parse_entity_id("1.5").is_err());
        // i64 범위 초과
        assert!(parse_entity_id("99999999999999999999").is_err());
    }
}
