use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use pushkind_common::db::DbPool;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::filter::FilterSet;
use crate::domain::lead::{Lead, LeadStatus, NewLead};
use crate::domain::owner::{NewOwner, Owner};
use crate::domain::sort::SortState;
use crate::domain::types::{HubId, LeadId};

pub mod lead;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod owner;

/// Diesel-backed repository shared by every reader/writer trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<PooledConnection<ConnectionManager<SqliteConnection>>> {
        Ok(self.pool.get()?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

/// Filtered, sorted and optionally paginated lead request.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadListQuery {
    pub hub_id: HubId,
    pub filters: FilterSet,
    pub sort: SortState,
    pub pagination: Option<Pagination>,
}

impl LeadListQuery {
    pub fn new(hub_id: HubId) -> Self {
        Self {
            hub_id,
            filters: FilterSet::default(),
            sort: SortState::default(),
            pagination: None,
        }
    }

    pub fn filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    pub fn sort(mut self, sort: SortState) -> Self {
        self.sort = sort;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination {
            page: page.max(1),
            per_page: per_page.max(1),
        });
        self
    }

    /// Same filters and sort, every page.
    pub fn unpaginated(mut self) -> Self {
        self.pagination = None;
        self
    }
}

pub trait LeadReader {
    fn get_lead_by_id(&self, id: LeadId, hub_id: HubId) -> RepositoryResult<Option<Lead>>;
    /// Returns the total number of matches and the requested page.
    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)>;
    /// Status and source of every match, ignoring pagination.
    fn list_lead_facets(
        &self,
        query: LeadListQuery,
    ) -> RepositoryResult<Vec<(LeadStatus, Option<String>)>>;
    /// Distinct sources used in the hub, sorted.
    fn list_lead_sources(&self, hub_id: HubId) -> RepositoryResult<Vec<String>>;
}

pub trait LeadWriter {
    fn create_leads(&self, new_leads: &[NewLead]) -> RepositoryResult<usize>;
}

pub trait OwnerReader {
    fn list_owners(&self, hub_id: HubId) -> RepositoryResult<Vec<Owner>>;
}

pub trait OwnerWriter {
    fn create_owner(&self, new_owner: &NewOwner) -> RepositoryResult<Owner>;
}
