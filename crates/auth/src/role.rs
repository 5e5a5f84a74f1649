use super::*;
use vox_core::Error;

/// Which side of the platform an account sits on. Fixed at step 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Civilian,
    Authority,
}

/// Parses a step-2 body into the role-specific profile and identity proof.
pub type Form = fn(serde_json::Value) -> Result<(Profile, Proof), Error>;

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Civilian => "civilian",
            Self::Authority => "authority",
        }
    }
    /// Step-2 schema for accounts of this role. Civilian and authority
    /// field sets are disjoint; each schema rejects the other's fields.
    pub fn schema(self) -> Form {
        match self {
            Self::Civilian => Profile::civilian,
            Self::Authority => Profile::authority,
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "civilian" => Ok(Self::Civilian),
            "authority" => Ok(Self::Authority),
            _ => Err(Error::validation(format!("unknown role: {}", s))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
