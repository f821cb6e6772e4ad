use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use validator::Validate;

use super::id::ResourceId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.pad(match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        })
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {} (expected USER or ADMIN)", other)),
        }
    }
}

/// Body of register and login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Credentials {
    #[validate(length(min = 1, max = 100, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Successful login: the bearer token plus the user it belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub id: Option<ResourceId>,
    pub username: String,
    #[serde(default)]
    pub role: Role,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_login_response() {
        let session: Session =
            serde_json::from_str(r#"{"token":"jwt","username":"alice","role":"ADMIN"}"#).unwrap();
        assert!(session.is_admin());
        assert_eq!(session.id, None);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_credentials_require_both_fields() {
        let creds = Credentials {
            username: "alice".to_string(),
            password: String::new(),
        };
        assert!(creds.validate().is_err());
    }
}
