use serde::{Deserialize, Serialize};

/// Access level a user holds on an experiment or registered model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    Read,
    Edit,
    Manage,
    NoPermissions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentPermission {
    pub experiment_id: String,
    #[serde(default)]
    pub user_id: i64,
    pub permission: Permission,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredModelPermission {
    pub name: String,
    #[serde(default)]
    pub user_id: i64,
    pub permission: Permission,
}
