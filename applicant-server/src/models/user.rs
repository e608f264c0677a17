//! User profile record and request payload

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// Row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub fun_facts: Option<String>,
    pub who_i_am: Option<String>,
    pub hobbies: Option<String>,
}

/// Every non-id attribute of a record, as sent by clients on create and update.
///
/// Fields are not validated. Missing fields deserialize to `None` and are
/// written as NULL; an `id` in the body is ignored. Non-string values are
/// kept in their JSON text form (`7` becomes `"7"`), leaving any type
/// checks to the column types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPayload {
    #[serde(deserialize_with = "as_text")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "as_text")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "as_text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "as_text")]
    pub phone_number: Option<String>,
    #[serde(deserialize_with = "as_text")]
    pub date_of_birth: Option<String>,
    #[serde(deserialize_with = "as_text")]
    pub address: Option<String>,
    #[serde(deserialize_with = "as_text")]
    pub github: Option<String>,
    #[serde(deserialize_with = "as_text")]
    pub linkedin: Option<String>,
    #[serde(deserialize_with = "as_text")]
    pub fun_facts: Option<String>,
    #[serde(deserialize_with = "as_text")]
    pub who_i_am: Option<String>,
    #[serde(deserialize_with = "as_text")]
    pub hobbies: Option<String>,
}

/// Accept any JSON value for a text column: null stays null, strings pass
/// through, everything else is stored as its JSON text.
fn as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

impl UserPayload {
    /// Writable columns, in bind order.
    ///
    /// [`UserPayload::values`] must return values in exactly this order.
    pub const COLUMNS: [&'static str; 11] = [
        "first_name",
        "last_name",
        "email",
        "phone_number",
        "date_of_birth",
        "address",
        "github",
        "linkedin",
        "fun_facts",
        "who_i_am",
        "hobbies",
    ];

    /// Field values aligned with [`UserPayload::COLUMNS`].
    pub fn values(&self) -> [Option<&str>; 11] {
        [
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            self.email.as_deref(),
            self.phone_number.as_deref(),
            self.date_of_birth.as_deref(),
            self.address.as_deref(),
            self.github.as_deref(),
            self.linkedin.as_deref(),
            self.fun_facts.as_deref(),
            self.who_i_am.as_deref(),
            self.hobbies.as_deref(),
        ]
    }

    /// Attach a storage-assigned id.
    pub fn into_user(self, id: i32) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            date_of_birth: self.date_of_birth,
            address: self.address,
            github: self.github,
            linkedin: self.linkedin,
            fun_facts: self.fun_facts,
            who_i_am: self.who_i_am,
            hobbies: self.hobbies,
        }
    }
}

impl From<User> for UserPayload {
    fn from(user: User) -> Self {
        Self {
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone_number: user.phone_number,
            date_of_birth: user.date_of_birth,
            address: user.address,
            github: user.github,
            linkedin: user.linkedin,
            fun_facts: user.fun_facts,
            who_i_am: user.who_i_am,
            hobbies: user.hobbies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_payload() -> UserPayload {
        UserPayload {
            first_name: Some("first_name".into()),
            last_name: Some("last_name".into()),
            email: Some("email".into()),
            phone_number: Some("phone_number".into()),
            date_of_birth: Some("date_of_birth".into()),
            address: Some("address".into()),
            github: Some("github".into()),
            linkedin: Some("linkedin".into()),
            fun_facts: Some("fun_facts".into()),
            who_i_am: Some("who_i_am".into()),
            hobbies: Some("hobbies".into()),
        }
    }

    #[test]
    fn values_follow_column_order() {
        // Each field holds its own column name, so any misalignment shows up here.
        let payload = full_payload();
        for (column, value) in UserPayload::COLUMNS.iter().zip(payload.values()) {
            assert_eq!(Some(*column), value);
        }
    }

    #[test]
    fn columns_match_serialized_fields() {
        let value = serde_json::to_value(full_payload()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), UserPayload::COLUMNS.len());
        for column in UserPayload::COLUMNS {
            assert!(object.contains_key(column), "missing {column}");
        }
    }

    #[test]
    fn missing_fields_become_none() {
        let payload: UserPayload = serde_json::from_value(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com"
        }))
        .unwrap();

        assert_eq!(payload.first_name.as_deref(), Some("Ada"));
        assert!(payload.phone_number.is_none());
        assert!(payload.hobbies.is_none());
    }

    #[test]
    fn scalars_are_kept_as_text() {
        let payload: UserPayload = serde_json::from_value(json!({
            "first_name": "Ada",
            "phone_number": 1234567890,
            "email": 7,
            "github": true,
            "hobbies": 1.5,
            "address": null
        }))
        .unwrap();

        assert_eq!(payload.phone_number.as_deref(), Some("1234567890"));
        assert_eq!(payload.email.as_deref(), Some("7"));
        assert_eq!(payload.github.as_deref(), Some("true"));
        assert_eq!(payload.hobbies.as_deref(), Some("1.5"));
        assert!(payload.address.is_none());
    }

    #[test]
    fn nested_values_are_kept_as_json_text() {
        let payload: UserPayload =
            serde_json::from_value(json!({ "fun_facts": ["chess", "tea"] })).unwrap();
        assert_eq!(payload.fun_facts.as_deref(), Some(r#"["chess","tea"]"#));
    }

    #[test]
    fn client_id_is_ignored() {
        let payload: UserPayload =
            serde_json::from_value(json!({ "id": 99, "first_name": "Ada" })).unwrap();
        let user = payload.into_user(1);
        assert_eq!(user.id, 1);
        assert_eq!(user.first_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn user_serializes_nulls() {
        let user = UserPayload::default().into_user(3);
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["id"], 3);
        assert!(value["email"].is_null());
    }
}
