use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::domain::types::{HubId, OwnerHandle, OwnerId, OwnerName};

/// Reserved owner token meaning "no owner assigned".
pub const UNASSIGNED_TOKEN: &str = "unassigned";

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Owner {
    pub id: OwnerId,
    pub hub_id: HubId,
    pub handle: OwnerHandle,
    pub name: OwnerName,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewOwner {
    pub hub_id: HubId,
    pub handle: OwnerHandle,
    pub name: OwnerName,
    pub email: String,
}

/// One entry of an owner filter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum OwnerRef {
    /// Leads without an owner.
    Unassigned,
    /// Leads owned by the owner with this handle.
    Handle(String),
}

impl OwnerRef {
    /// Parses a single trimmed token. Empty tokens yield `None`.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim() {
            "" => None,
            UNASSIGNED_TOKEN => Some(OwnerRef::Unassigned),
            handle => Some(OwnerRef::Handle(handle.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OwnerRef::Unassigned => UNASSIGNED_TOKEN,
            OwnerRef::Handle(handle) => handle,
        }
    }
}

impl Display for OwnerRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<OwnerRef> for String {
    fn from(value: OwnerRef) -> Self {
        value.as_str().to_string()
    }
}

impl From<&Owner> for OwnerRef {
    fn from(owner: &Owner) -> Self {
        OwnerRef::Handle(owner.handle.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_token_maps_to_unassigned() {
        assert_eq!(OwnerRef::parse(" unassigned "), Some(OwnerRef::Unassigned));
        assert_eq!(
            OwnerRef::parse("user-1"),
            Some(OwnerRef::Handle("user-1".to_string()))
        );
        assert_eq!(OwnerRef::parse("  "), None);
    }
}
