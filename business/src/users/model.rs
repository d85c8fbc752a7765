//! Wire types of the remote user API (camelCase JSON).

use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "mr";

fn default_title() -> String {
    DEFAULT_TITLE.to_owned()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl User {
    /// "First Last", as shown in the table.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Picture URL, `None` when missing or blank.
    pub fn picture_url(&self) -> Option<&str> {
        self.picture.as_deref().filter(|url| !url.trim().is_empty())
    }
}

/// In-progress record edited in the create/edit dialogs.
///
/// Serialized as-is for `POST /user/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub picture: String,
}

impl Default for UserDraft {
    fn default() -> Self {
        Self {
            title: default_title(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            picture: String::new(),
        }
    }
}

impl UserDraft {
    /// Copy of `user` ready for editing; a blank title falls back to `"mr"`.
    pub fn from_user(user: &User) -> Self {
        let title = if user.title.trim().is_empty() {
            default_title()
        } else {
            user.title.clone()
        };

        Self {
            title,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone().unwrap_or_default(),
            picture: user.picture.clone().unwrap_or_default(),
        }
    }

    /// Names of fields a new user needs that are blank, in form order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = self.missing_names();
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        missing
    }

    /// Blank name fields. Enough for an edit: loaded users may have no email.
    pub fn missing_names(&self) -> Vec<&'static str> {
        [("firstName", &self.first_name), ("lastName", &self.last_name)]
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    /// The user this draft describes once saved under `id`.
    pub fn into_user(self, id: String) -> User {
        let optional = |value: String| (!value.is_empty()).then_some(value);
        User {
            id,
            title: self.title,
            first_name: self.first_name,
            last_name: self.last_name,
            email: optional(self.email),
            picture: optional(self.picture),
        }
    }
}

/// Body of `GET /user`. Anything but `data` is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersResponse {
    #[serde(default)]
    pub data: Vec<User>,
}

/// Error body returned by the API on failed requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: String,
}
