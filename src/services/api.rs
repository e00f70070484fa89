use std::collections::BTreeMap;

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::ensure_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::lead::LeadStatus;
use crate::domain::types::{HubId, LeadId};
use crate::dto::api::LeadStats;
use crate::dto::leads::{LeadRow, owners_by_id};
use crate::pagination::Paginated;
use crate::query::{LeadListState, QueryParams, SORT_ORDER_KEY};
use crate::repository::{LeadReader, OwnerReader};
use crate::services::{ServiceError, ServiceResult};

/// Alias accepted by the API for `sortOrder`.
pub const SORT_DIR_KEY: &str = "sortDir";

/// Source bucket for leads without one.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Folds `sortDir` into `sortOrder`. An explicit `sortOrder` wins.
pub fn normalize_params(mut params: QueryParams) -> QueryParams {
    let direction = params.get(SORT_DIR_KEY).map(str::to_string);
    if let Some(direction) = direction.filter(|_| !params.contains(SORT_ORDER_KEY)) {
        params.set(SORT_ORDER_KEY, direction);
    }
    params.remove(SORT_DIR_KEY);
    params
}

/// Returns one page of leads for the query string of an API call.
pub fn list_leads<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: QueryParams,
) -> ServiceResult<Paginated<LeadRow>>
where
    R: LeadReader + OwnerReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let hub_id = HubId::new(user.hub_id)?;
    let state = LeadListState::read(&normalize_params(params));

    let (total, leads) = repo
        .list_leads(state.to_list_query(hub_id))
        .map_err(|err| {
            log::error!("Failed to list leads: {err}");
            err
        })?;

    let owners = repo.list_owners(hub_id).map_err(|err| {
        log::error!("Failed to list owners: {err}");
        err
    })?;
    let owner_index = owners_by_id(&owners);

    let rows = leads
        .into_iter()
        .map(|lead| LeadRow::new(lead, &owner_index))
        .collect();

    Ok(Paginated::new(rows, state.page, state.limit, total))
}

/// A single lead of the user's hub. Ids that cannot exist are not found.
pub fn get_lead<R>(repo: &R, user: &AuthenticatedUser, lead_id: i32) -> ServiceResult<LeadRow>
where
    R: LeadReader + OwnerReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let hub_id = HubId::new(user.hub_id)?;
    let lead_id = LeadId::new(lead_id).map_err(|_| ServiceError::NotFound)?;

    let lead = repo
        .get_lead_by_id(lead_id, hub_id)
        .map_err(|err| {
            log::error!("Failed to load lead {lead_id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)?;

    let owners = repo.list_owners(hub_id).map_err(|err| {
        log::error!("Failed to list owners: {err}");
        err
    })?;

    Ok(LeadRow::new(lead, &owners_by_id(&owners)))
}

/// Aggregates status/source pairs into campaign statistics.
pub fn summarize(facets: &[(LeadStatus, Option<String>)]) -> LeadStats {
    let mut by_status: BTreeMap<String, usize> = LeadStatus::ALL
        .into_iter()
        .map(|status| (status.as_str().to_string(), 0))
        .collect();
    let mut by_source = BTreeMap::new();
    let mut won = 0usize;
    let mut lost = 0usize;

    for (status, source) in facets {
        *by_status.entry(status.as_str().to_string()).or_default() += 1;
        let source = source.as_deref().unwrap_or(UNKNOWN_SOURCE);
        *by_source.entry(source.to_string()).or_default() += 1;
        match status {
            LeadStatus::Won => won += 1,
            LeadStatus::Lost => lost += 1,
            _ => {}
        }
    }

    let closed = won + lost;
    LeadStats {
        total: facets.len(),
        by_status,
        by_source,
        win_rate: (closed > 0).then(|| won as f64 / closed as f64),
    }
}

/// Statistics for every lead matching the filters, ignoring pagination.
pub fn lead_stats<R>(repo: &R, user: &AuthenticatedUser, params: QueryParams) -> ServiceResult<LeadStats>
where
    R: LeadReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let hub_id = HubId::new(user.hub_id)?;
    let state = LeadListState::read(&normalize_params(params));
    let query = state.to_list_query(hub_id).unpaginated();

    let facets = repo.list_lead_facets(query).map_err(|err| {
        log::error!("Failed to load lead facets: {err}");
        err
    })?;

    Ok(summarize(&facets))
}
