use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::lead::{Lead, LeadStatus, NewLead};
use crate::domain::owner::OwnerRef;
use crate::domain::sort::{SortColumn, SortOrder, SortState};
use crate::domain::types::{HubId, LeadId};
use crate::models::lead::{Lead as DbLead, NewLead as DbNewLead};
use crate::repository::{DieselRepository, LeadListQuery, LeadReader, LeadWriter};
use crate::schema::{leads, owners};

type BoxedLeads<'a> = leads::BoxedQuery<'a, Sqlite>;

/// Owner constraint resolved against the database.
struct OwnerScope {
    ids: Vec<i32>,
    unassigned: bool,
}

fn resolve_owner_scope(
    conn: &mut SqliteConnection,
    query: &LeadListQuery,
) -> RepositoryResult<Option<OwnerScope>> {
    let owners_filter = &query.filters.owners;
    if owners_filter.is_empty() {
        return Ok(None);
    }

    let handles: Vec<&str> = owners_filter
        .iter()
        .filter_map(|owner| match owner {
            OwnerRef::Handle(handle) => Some(handle.as_str()),
            OwnerRef::Unassigned => None,
        })
        .collect();

    let ids = if handles.is_empty() {
        Vec::new()
    } else {
        owners::table
            .filter(owners::hub_id.eq(query.hub_id.get()))
            .filter(owners::handle.eq_any(handles))
            .select(owners::id)
            .load::<i32>(conn)?
    };

    Ok(Some(OwnerScope {
        ids,
        unassigned: owners_filter.contains(&OwnerRef::Unassigned),
    }))
}

/// Escapes `LIKE` wildcards so a search term only matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn filtered<'a>(query: &'a LeadListQuery, owner_scope: Option<&'a OwnerScope>) -> BoxedLeads<'a> {
    let filters = &query.filters;
    let mut items = leads::table
        .filter(leads::hub_id.eq(query.hub_id.get()))
        .into_boxed::<Sqlite>();

    if !filters.statuses.is_empty() {
        let statuses: Vec<&'static str> = filters.statuses.iter().map(|s| s.as_str()).collect();
        items = items.filter(leads::status.eq_any(statuses));
    }

    if let Some(scope) = owner_scope {
        items = match (scope.unassigned, scope.ids.is_empty()) {
            (true, true) => items.filter(leads::owner_id.is_null()),
            (true, false) => items.filter(
                leads::owner_id
                    .is_null()
                    .or(leads::owner_id.eq_any(scope.ids.clone())),
            ),
            // Unknown handles match nothing.
            (false, _) => items.filter(leads::owner_id.eq_any(scope.ids.clone())),
        };
    }

    if let Some(range) = filters.date_range {
        items = items.filter(leads::created_at.ge(range.start()));
        if let Some(end) = range.end_exclusive() {
            items = items.filter(leads::created_at.lt(end));
        }
    }

    if let Some(source) = &filters.source {
        items = items.filter(leads::source.eq(source.as_str()));
    }

    if let Some(search) = &filters.search {
        let pattern = format!("%{}%", escape_like(search));
        items = items.filter(
            leads::name
                .like(pattern.clone())
                .escape('\\')
                .or(leads::email.like(pattern.clone()).escape('\\'))
                .or(leads::company.like(pattern).escape('\\')),
        );
    }

    items
}

fn ordered(items: BoxedLeads<'_>, sort: SortState) -> BoxedLeads<'_> {
    macro_rules! order_by {
        ($column:expr) => {
            match sort.sort_order {
                SortOrder::Asc => items.order(($column.asc(), leads::id.asc())),
                SortOrder::Desc => items.order(($column.desc(), leads::id.desc())),
            }
        };
    }

    match sort.sort_by {
        SortColumn::CreatedAt => order_by!(leads::created_at),
        SortColumn::UpdatedAt => order_by!(leads::updated_at),
        SortColumn::Name => order_by!(leads::name),
        SortColumn::Company => order_by!(leads::company),
        SortColumn::Status => order_by!(leads::status),
        SortColumn::Source => order_by!(leads::source),
    }
}

impl LeadReader for DieselRepository {
    fn get_lead_by_id(&self, id: LeadId, hub_id: HubId) -> RepositoryResult<Option<Lead>> {
        let mut conn = self.conn()?;

        let lead = leads::table
            .filter(leads::id.eq(id.get()))
            .filter(leads::hub_id.eq(hub_id.get()))
            .first::<DbLead>(&mut conn)
            .optional()?;

        Ok(lead.map(Lead::try_from).transpose()?)
    }

    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)> {
        let mut conn = self.conn()?;

        let owner_scope = resolve_owner_scope(&mut conn, &query)?;

        let total = filtered(&query, owner_scope.as_ref())
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = ordered(filtered(&query, owner_scope.as_ref()), query.sort);
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset() as i64)
                .limit(pagination.per_page as i64);
        }

        let leads = items
            .load::<DbLead>(&mut conn)?
            .into_iter()
            .map(Lead::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, leads))
    }

    fn list_lead_facets(
        &self,
        query: LeadListQuery,
    ) -> RepositoryResult<Vec<(LeadStatus, Option<String>)>> {
        let mut conn = self.conn()?;

        let owner_scope = resolve_owner_scope(&mut conn, &query)?;

        let rows = filtered(&query, owner_scope.as_ref())
            .select((leads::status, leads::source))
            .load::<(String, Option<String>)>(&mut conn)?;

        rows.into_iter()
            .map(|(status, source)| -> RepositoryResult<_> {
                Ok((status.parse::<LeadStatus>()?, source))
            })
            .collect()
    }

    fn list_lead_sources(&self, hub_id: HubId) -> RepositoryResult<Vec<String>> {
        let mut conn = self.conn()?;

        let sources = leads::table
            .filter(leads::hub_id.eq(hub_id.get()))
            .filter(leads::source.is_not_null())
            .select(leads::source)
            .distinct()
            .order(leads::source.asc())
            .load::<Option<String>>(&mut conn)?;

        Ok(sources.into_iter().flatten().collect())
    }
}

impl LeadWriter for DieselRepository {
    fn create_leads(&self, new_leads: &[NewLead]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let insertables: Vec<DbNewLead> = new_leads.iter().map(Into::into).collect();
        let affected = diesel::insert_into(leads::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
