use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Serialize, Deserialize)]
pub enum Role {
    Employee,
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "Employee",
            Role::Manager => "Manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Employee" => Ok(Role::Employee),
            "Manager" => Ok(Role::Manager),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct User {
    #[sqlx(rename = "user_id")]
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Argon2id PHC string. The column keeps its legacy name.
    #[sqlx(rename = "password")]
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub manager_id: Option<i64>,
}

/// A selectable manager on the sign-up form.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ManagerOption {
    #[sqlx(rename = "user_id")]
    pub id: i64,
    pub name: String,
}
