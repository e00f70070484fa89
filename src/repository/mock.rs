//! Mock repository implementations for isolating services in tests.

use mockall::mock;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::lead::{Lead, LeadStatus, NewLead};
use crate::domain::owner::{NewOwner, Owner};
use crate::domain::types::{HubId, LeadId};
use crate::repository::{LeadListQuery, LeadReader, LeadWriter, OwnerReader, OwnerWriter};

mock! {
    pub Repository {}

    impl LeadReader for Repository {
        fn get_lead_by_id(&self, id: LeadId, hub_id: HubId) -> RepositoryResult<Option<Lead>>;
        fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)>;
        fn list_lead_facets(
            &self,
            query: LeadListQuery,
        ) -> RepositoryResult<Vec<(LeadStatus, Option<String>)>>;
        fn list_lead_sources(&self, hub_id: HubId) -> RepositoryResult<Vec<String>>;
    }

    impl LeadWriter for Repository {
        fn create_leads(&self, new_leads: &[NewLead]) -> RepositoryResult<usize>;
    }

    impl OwnerReader for Repository {
        fn list_owners(&self, hub_id: HubId) -> RepositoryResult<Vec<Owner>>;
    }

    impl OwnerWriter for Repository {
        fn create_owner(&self, new_owner: &NewOwner) -> RepositoryResult<Owner>;
    }
}
