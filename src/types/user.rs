use serde::{Deserialize, Serialize};

pub type UserId = i64;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Not every API carries ages; jsonplaceholder leaves it out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

/// Form input for a user that has no id yet. A `None` field was left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub name: Option<String>,
    pub age: Option<i64>,
}

impl UserDraft {
    pub fn new(name: impl Into<String>, age: i64) -> Self {
        Self {
            name: Some(name.into()),
            age: Some(age),
        }
    }
}

impl From<&User> for UserDraft {
    fn from(user: &User) -> Self {
        Self {
            name: Some(user.name.clone()),
            age: user.age.map(i64::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_without_age() {
        let json = r#"{"id": 1, "name": "Leanne Graham", "username": "Bret", "email": "a@b.c"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.name, "Leanne Graham");
        assert_eq!(user.age, None);

        let draft = UserDraft::from(&user);
        assert_eq!(draft.name.as_deref(), Some("Leanne Graham"));
        assert_eq!(draft.age, None);
    }

    #[test]
    fn test_user_serializes_flat() {
        let user = User {
            id: 9,
            name: "Bob".to_string(),
            age: Some(25),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value, serde_json::json!({ "id": 9, "name": "Bob", "age": 25 }));
    }
}
