//! Session Models

use serde::{Deserialize, Serialize};

/// What a signed-in user may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages inventory and orders.
    Admin,

    /// Shops.
    Customer,
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Email address.
    pub email: String,

    /// Display name.
    pub name: String,

    /// Role.
    pub role: Role,
}
