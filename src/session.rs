use dashmap::DashMap;
use sha2::{Digest, Sha256};

use crate::models::Role;

pub const SESSION_COOKIE: &str = "leave_session";

/// The authenticated identity of one browsing session. Both fields are set
/// together on login, so a half-populated session cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub role: Role,
}

/// In-process session table. Entries live until logout or process exit.
///
/// Keys are SHA-256 digests of the cookie token, so the map never holds a
/// value that could be replayed as a cookie.
pub struct SessionStore {
    entries: DashMap<String, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Store `session` and return the raw token for the cookie.
    pub fn create(&self, session: Session) -> String {
        let token = generate_token();
        self.entries.insert(hash_token(&token), session);
        token
    }

    pub fn get(&self, token: &str) -> Option<Session> {
        self.entries.get(&hash_token(token)).map(|entry| *entry.value())
    }

    /// Drop the session behind `token`. Returns whether one existed.
    pub fn remove(&self, token: &str) -> bool {
        self.entries.remove(&hash_token(token)).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn generate_token() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
