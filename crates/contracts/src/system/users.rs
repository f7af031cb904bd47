use serde::{Deserialize, Serialize};

use super::auth::UserInfo;

/// Пользователь панели управления (строка `sys_users` без хеша пароля)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
    /// RFC 3339
    pub created_at: String,
    pub last_login_at: Option<String>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        UserInfo {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            is_admin: user.is_admin,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserDto {
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_info_from_user() {
        let user = User {
            id: "u1".to_string(),
            username: "manager".to_string(),
            full_name: None,
            is_active: true,
            is_admin: false,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
            last_login_at: None,
        };
        let info = UserInfo::from(user);
        assert_eq!(info.id, "u1");
        assert_eq!(info.username, "manager");
        assert!(!info.is_admin);
    }
}
