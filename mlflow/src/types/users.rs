use serde::{Deserialize, Serialize};

/// A tracking-server user (basic-auth app).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub is_admin: bool,
}
