use diesel::prelude::*;

use crate::domain::owner::{NewOwner as DomainNewOwner, Owner as DomainOwner};
use crate::domain::types::{HubId, OwnerHandle, OwnerId, OwnerName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::owners)]
/// Diesel model for [`crate::domain::owner::Owner`].
pub struct Owner {
    pub id: i32,
    pub hub_id: i32,
    pub handle: String,
    pub name: String,
    pub email: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::owners)]
pub struct NewOwner<'a> {
    pub hub_id: i32,
    pub handle: &'a str,
    pub name: &'a str,
    pub email: &'a str,
}

impl TryFrom<Owner> for DomainOwner {
    type Error = TypeConstraintError;

    fn try_from(owner: Owner) -> Result<Self, Self::Error> {
        Ok(Self {
            id: OwnerId::new(owner.id)?,
            hub_id: HubId::new(owner.hub_id)?,
            handle: OwnerHandle::new(owner.handle)?,
            name: OwnerName::new(owner.name)?,
            email: owner.email,
        })
    }
}

impl<'a> From<&'a DomainNewOwner> for NewOwner<'a> {
    fn from(owner: &'a DomainNewOwner) -> Self {
        Self {
            hub_id: owner.hub_id.get(),
            handle: owner.handle.as_str(),
            name: owner.name.as_str(),
            email: owner.email.as_str(),
        }
    }
}
