use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Identifier of a server-side resource.
///
/// The backend emits ids either as integers or strings. The original JSON kind
/// is kept so the id serializes back exactly as the server sent it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Text(String),
}

impl ResourceId {
    /// Parse user input: digits become a numeric id, anything else stays text.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.parse::<i64>() {
            Ok(n) => ResourceId::Number(n),
            Err(_) => ResourceId::Text(trimmed.to_string()),
        }
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ResourceId::Number(n) => write!(f, "{}", n),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        ResourceId::parse(id)
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        ResourceId::Number(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_string_and_integer_ids() {
        let ids: Vec<ResourceId> = serde_json::from_str(r#"["a1b2", 42]"#).unwrap();
        assert_eq!(ids[0], ResourceId::Text("a1b2".to_string()));
        assert_eq!(ids[1], ResourceId::Number(42));
    }

    #[test]
    fn test_serializes_in_original_kind() {
        assert_eq!(serde_json::to_string(&ResourceId::from(7)).unwrap(), "7");
        assert_eq!(
            serde_json::to_string(&ResourceId::Text("7f3a".to_string())).unwrap(),
            r#""7f3a""#
        );
    }

    #[test]
    fn test_parse_user_input() {
        assert_eq!(ResourceId::parse(" 15 "), ResourceId::Number(15));
        assert_eq!(
            ResourceId::parse("9b1c-uuid"),
            ResourceId::Text("9b1c-uuid".to_string())
        );
        assert_eq!(ResourceId::parse("15").to_string(), "15");
    }
}
