use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::owner::{NewOwner, Owner};
use crate::domain::types::HubId;
use crate::models::owner::{NewOwner as DbNewOwner, Owner as DbOwner};
use crate::repository::{DieselRepository, OwnerReader, OwnerWriter};
use crate::schema::owners;

impl OwnerReader for DieselRepository {
    fn list_owners(&self, hub_id: HubId) -> RepositoryResult<Vec<Owner>> {
        let mut conn = self.conn()?;

        let owners = owners::table
            .filter(owners::hub_id.eq(hub_id.get()))
            .order((owners::name.asc(), owners::id.asc()))
            .load::<DbOwner>(&mut conn)?
            .into_iter()
            .map(Owner::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(owners)
    }
}

impl OwnerWriter for DieselRepository {
    fn create_owner(&self, new_owner: &NewOwner) -> RepositoryResult<Owner> {
        let mut conn = self.conn()?;

        let insertable: DbNewOwner = new_owner.into();
        let owner = diesel::insert_into(owners::table)
            .values(&insertable)
            .get_result::<DbOwner>(&mut conn)?;

        Ok(Owner::try_from(owner)?)
    }
}
