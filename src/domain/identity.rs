// User identity domain models
use serde::Serialize;
use uuid::Uuid;

/// Opaque owner identity. The analyzer core never looks inside it; it only
/// keys upload history by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct Identity {
    pub id: UserId,
    pub username: String,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Bearer token handed back to clients. The format is an auth-provider
/// detail; the rest of the system treats it as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
