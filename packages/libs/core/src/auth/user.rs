//! 사용자/그룹 타입

use serde::{Deserialize, Serialize};

/// 인증된 사용자
///
/// 인증기가 요청마다 생성하여 request extension에 저장합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// 사용자 ID
    pub id: i64,

    /// 이메일
    pub email: String,
}

impl User {
    /// 새 사용자 생성
    pub fn new(id: i64, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}

/// 사용자-그룹 연결 (associative table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserGroupMembership {
    pub user_id: i64,
    pub group_id: i64,
}

impl UserGroupMembership {
    pub fn new(user_id: i64, group_id: i64) -> Self {
        Self { user_id, group_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serialization() {
        let user = User::new(1, "user@example.com");
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["email"], "user@example.com");
    }
}
