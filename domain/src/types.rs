use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable id a client supplies when it connects.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Short code players share to meet at the same table.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameCode(pub String);

impl GameCode {
    pub const LENGTH: usize = 4;

    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Random code built from the leading hex digits of a v4 uuid.
    #[must_use]
    pub fn generate() -> Self {
        let simple = uuid::Uuid::new_v4().simple().to_string();
        Self(simple[..Self::LENGTH].to_uppercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for GameCode {
    fn default() -> Self {
        GameCode::generate()
    }
}

impl fmt::Display for GameCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_short_uppercase_hex() {
        let code = GameCode::generate();
        assert_eq!(code.as_str().len(), GameCode::LENGTH);
        assert!(code.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&PlayerId::new("p-1")).unwrap();
        assert_eq!(json, "\"p-1\"");
    }
}
