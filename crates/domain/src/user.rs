//! User resource and its nested entities.
//!
//! Field names follow the JSONPlaceholder wire format (camelCase).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A user as sent to and returned by the `/users` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Login handle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Personal website
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl User {
    /// Creates a user with the two required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            username: None,
            phone: None,
            website: None,
        }
    }

    /// Sets the username (builder pattern).
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the phone number (builder pattern).
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the website (builder pattern).
    #[must_use]
    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }
}

/// A partial user update. Only the fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    /// New name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New username
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// New phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// New website
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl UserPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Patches the name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Patches the email address.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Patches the username.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Patches the phone number.
    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Patches the website.
    #[must_use]
    pub fn website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    /// Returns true if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.username.is_none()
            && self.phone.is_none()
            && self.website.is_none()
    }
}

/// A post owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Owning user
    pub user_id: u64,
    /// Post identifier
    pub id: u64,
    /// Title
    pub title: String,
    /// Body text
    pub body: String,
}

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Post the comment belongs to
    pub post_id: u64,
    /// Comment identifier
    pub id: u64,
    /// Comment subject
    pub name: String,
    /// Author email
    pub email: String,
    /// Body text
    pub body: String,
}

/// A todo item owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Owning user
    pub user_id: u64,
    /// Todo identifier
    pub id: u64,
    /// Title
    pub title: String,
    /// Completion flag
    pub completed: bool,
}

/// A photo album owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    /// Owning user
    pub user_id: u64,
    /// Album identifier
    pub id: u64,
    /// Title
    pub title: String,
}

/// Collections nested under `/users/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubResource {
    /// `/users/{id}/posts`
    Posts,
    /// `/users/{id}/comments`
    Comments,
    /// `/users/{id}/todos`
    Todos,
    /// `/users/{id}/albums`
    Albums,
}

impl SubResource {
    /// Returns all nested collections.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Posts, Self::Comments, Self::Todos, Self::Albums]
    }

    /// Returns the path segment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Comments => "comments",
            Self::Todos => "todos",
            Self::Albums => "albums",
        }
    }

    /// Parses a path segment.
    #[must_use]
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.as_str() == segment)
    }
}

impl fmt::Display for SubResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_user_omits_absent_fields() {
        let user = User::new("Test User", "test@example.com").with_username("testuser");
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(
            value,
            json!({"name": "Test User", "email": "test@example.com", "username": "testuser"})
        );
    }

    #[test]
    fn test_user_ignores_unknown_fields() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {"city": "Gwenborough"},
            "company": {"name": "Romaguera-Crona"}
        }))
        .unwrap();

        assert_eq!(user.id, Some(1));
        assert_eq!(user.username.as_deref(), Some("Bret"));
        assert_eq!(user.phone, None);
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = UserPatch::new().email("newemail@example.com");
        assert!(!patch.is_empty());
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"email": "newemail@example.com"})
        );
        assert!(UserPatch::new().is_empty());
    }

    #[test]
    fn test_post_uses_camel_case() {
        let post: Post = serde_json::from_value(json!({
            "userId": 1, "id": 3, "title": "t", "body": "b"
        }))
        .unwrap();
        assert_eq!(post.user_id, 1);
    }

    #[test]
    fn test_sub_resource_segments() {
        for sub in SubResource::all() {
            assert_eq!(SubResource::from_segment(sub.as_str()), Some(*sub));
        }
        assert_eq!(SubResource::from_segment("photos"), None);
        assert_eq!(SubResource::Todos.to_string(), "todos");
    }
}
