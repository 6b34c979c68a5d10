//! User and community records from the `profiles`/`groups` side tables of
//! extended responses.
//!
//! Entities only ever reference these by id. Correlating them is left to the
//! caller; see [`Extended::profile`](crate::Extended::profile) and
//! [`Extended::group`](crate::Extended::group).

use serde::{Deserialize, Serialize};

/// A user profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// `"deleted"` or `"banned"` for inactive accounts.
    pub deactivated: Option<String>,
    pub is_closed: bool,
    pub can_access_closed: bool,
    pub screen_name: Option<String>,
    pub sex: i32,
    #[serde(with = "crate::flag")]
    pub online: bool,
    pub photo_50: Option<String>,
    pub photo_100: Option<String>,
}

impl User {
    /// Returns "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A community (group, public page or event).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub screen_name: String,
    /// 0 open, 1 closed, 2 private.
    pub is_closed: i32,
    /// `"group"`, `"page"` or `"event"`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(with = "crate::flag")]
    pub is_admin: bool,
    #[serde(with = "crate::flag")]
    pub is_member: bool,
    pub photo_50: Option<String>,
    pub photo_100: Option<String>,
    pub photo_200: Option<String>,
}

impl Group {
    /// Returns the owner id that addresses this community's wall.
    ///
    /// Community walls are addressed by the negated group id.
    pub fn owner_id(&self) -> i64 {
        -self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_user() {
        let json = r#"{
            "id": 1,
            "first_name": "Pavel",
            "last_name": "Durov",
            "is_closed": false,
            "can_access_closed": true,
            "online": 1,
            "sex": 2
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.full_name(), "Pavel Durov");
        assert!(user.online);
        assert!(user.deactivated.is_none());
    }

    #[test]
    fn parse_group() {
        let json = r#"{"id": 1, "name": "API Club", "screen_name": "apiclub", "type": "page", "is_closed": 0, "is_member": 1}"#;

        let group: Group = serde_json::from_str(json).unwrap();
        assert_eq!(group.kind, "page");
        assert!(group.is_member);
        assert!(!group.is_admin);
        assert_eq!(group.owner_id(), -1);
    }
}
