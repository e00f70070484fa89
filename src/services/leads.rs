//! Lead list page: reading state from the URL and rewriting it for filter actions.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::ensure_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::filter::DatePreset;
use crate::domain::lead::LeadStatus;
use crate::domain::owner::{OwnerRef, UNASSIGNED_TOKEN};
use crate::domain::sort::SortColumn;
use crate::domain::types::HubId;
use crate::dto::leads::{
    FilterOption, LeadRow, LeadsPageData, LimitLink, PageLink, SortLink, owners_by_id,
};
use crate::forms::leads::{ClearFiltersForm, LeadFilterForm};
use crate::pagination::{PageItem, Paginated};
use crate::query::filters::{ALLOWED_LIMITS, PaginationParams};
use crate::query::sort::SortField;
use crate::query::{
    LIMIT_KEY, LeadListState, Location, MemoryLocation, PAGE_KEY, apply_filters, clear_filters,
};
use crate::repository::{LeadReader, OwnerReader};
use crate::services::ServiceResult;

pub const LEADS_PATH: &str = "/";
pub const EXPORT_PATH: &str = "/leads/export";

/// Lead list URL for a raw query string, used to send users back where they were.
pub fn leads_href(query: &str) -> String {
    MemoryLocation::new(LEADS_PATH, query).href()
}

fn sort_links(location: &MemoryLocation, state: &LeadListState) -> BTreeMap<&'static str, SortLink> {
    SortColumn::ALL
        .into_iter()
        .map(|column| {
            let mut target = location.clone();
            SortField::new(&mut target).toggle_sort(column.as_str());
            let active = state.sort.sort_by == column;
            let link = SortLink {
                column: column.as_str(),
                href: target.href(),
                active,
                order: active.then_some(state.sort.sort_order),
            };
            (column.as_str(), link)
        })
        .collect()
}

fn page_links<T>(location: &MemoryLocation, leads: &Paginated<T>) -> Vec<PageLink> {
    leads
        .pages
        .iter()
        .map(|item| match *item {
            PageItem::Page(page) => {
                let mut target = location.clone();
                PaginationParams::set_page(&mut target, page);
                PageLink {
                    page: Some(page),
                    href: Some(target.href()),
                    current: page == leads.page,
                }
            }
            PageItem::Ellipsis => PageLink {
                page: None,
                href: None,
                current: false,
            },
        })
        .collect()
}

fn limit_links(location: &MemoryLocation, state: &LeadListState) -> Vec<LimitLink> {
    ALLOWED_LIMITS
        .into_iter()
        .map(|limit| {
            let mut target = location.clone();
            PaginationParams::set_limit(&mut target, limit);
            LimitLink {
                limit,
                href: target.href(),
                current: limit == state.limit,
            }
        })
        .collect()
}

fn export_href(location: &MemoryLocation) -> String {
    let mut params = location.search();
    params.remove(PAGE_KEY);
    params.remove(LIMIT_KEY);
    MemoryLocation::from_params(EXPORT_PATH, params).href()
}

/// Loads one page of leads for the URL in `location` together with every
/// link the page needs. Links are computed by applying the matching action to
/// a copy of the location, so they always agree with the POST handlers.
pub fn load_leads_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    location: &MemoryLocation,
    today: NaiveDate,
) -> ServiceResult<LeadsPageData>
where
    R: LeadReader + OwnerReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let hub_id = HubId::new(user.hub_id)?;
    let state = LeadListState::from_location(location);

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

    let sources = repo.list_lead_sources(hub_id).map_err(|err| {
        log::error!("Failed to list lead sources: {err}");
        err
    })?;

    let owner_index = owners_by_id(&owners);
    let rows = leads
        .into_iter()
        .map(|lead| LeadRow::new(lead, &owner_index))
        .collect();
    let leads = Paginated::new(rows, state.page, state.limit, total);

    let filters = &state.filters;
    let statuses = LeadStatus::ALL
        .into_iter()
        .map(|status| FilterOption {
            value: status.as_str().to_string(),
            label: status.label().to_string(),
            selected: filters.statuses.contains(&status),
        })
        .collect();

    let owner_options = std::iter::once(FilterOption {
        value: UNASSIGNED_TOKEN.to_string(),
        label: "Unassigned".to_string(),
        selected: filters.owners.contains(&OwnerRef::Unassigned),
    })
    .chain(owners.iter().map(|owner| FilterOption {
        value: owner.handle.as_str().to_string(),
        label: owner.name.as_str().to_string(),
        selected: filters.owners.contains(&OwnerRef::from(owner)),
    }))
    .collect();

    let source_options = sources
        .into_iter()
        .map(|source| FilterOption {
            selected: filters.source.as_deref() == Some(source.as_str()),
            label: source.clone(),
            value: source,
        })
        .collect();

    let presets = DatePreset::ALL
        .into_iter()
        .map(|preset| FilterOption {
            value: preset.as_str().to_string(),
            label: preset.label().to_string(),
            selected: filters.date_range == Some(preset.resolve(today)),
        })
        .collect();

    Ok(LeadsPageData {
        sort_links: sort_links(location, &state),
        page_links: page_links(location, &leads),
        limit_links: limit_links(location, &state),
        query: location.params().to_query_string(),
        has_active_filters: state.has_active_filters(),
        export_href: export_href(location),
        statuses,
        owners: owner_options,
        sources: source_options,
        presets,
        leads,
        state,
    })
}

/// Applies a filter form submission and returns the URL to redirect to.
pub fn filter_leads(
    user: &AuthenticatedUser,
    form: LeadFilterForm,
    today: NaiveDate,
) -> ServiceResult<String> {
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let filters = form.to_filter_set(today).map_err(|err| {
        log::warn!("Rejected lead filter form: {err}");
        err
    })?;

    let mut location = MemoryLocation::new(LEADS_PATH, &form.query);
    apply_filters(&mut location, &filters);

    Ok(location.href())
}

/// Drops every filter while keeping sort and page size.
pub fn clear_lead_filters(user: &AuthenticatedUser, form: ClearFiltersForm) -> ServiceResult<String> {
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let mut location = MemoryLocation::new(LEADS_PATH, &form.query);
    clear_filters(&mut location);

    Ok(location.href())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use pushkind_common::repository::errors::RepositoryError;

    use super::*;
    use crate::domain::lead::Lead;
    use crate::domain::owner::Owner;
    use crate::domain::sort::SortOrder;
    use crate::domain::types::{LeadId, LeadName, OwnerHandle, OwnerId, OwnerName};
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;

    fn user(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "jane@example.com".to_string(),
            hub_id: 5,
            name: "Jane".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: 0,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    fn lead(id: i32, owner_id: Option<i32>) -> Lead {
        let now = today().and_hms_opt(9, 0, 0).unwrap();
        Lead {
            id: LeadId::new(id).unwrap(),
            hub_id: HubId::new(5).unwrap(),
            name: LeadName::new(format!("Lead {id}")).unwrap(),
            email: None,
            phone: None,
            company: None,
            status: LeadStatus::New,
            source: None,
            owner_id: owner_id.map(|id| OwnerId::new(id).unwrap()),
            created_at: now,
            updated_at: now,
        }
    }

    fn owner(id: i32, handle: &str, name: &str) -> Owner {
        Owner {
            id: OwnerId::new(id).unwrap(),
            hub_id: HubId::new(5).unwrap(),
            handle: OwnerHandle::new(handle).unwrap(),
            name: OwnerName::new(name).unwrap(),
            email: format!("{handle}@example.com"),
        }
    }

    fn repo_with(total: usize, leads: Vec<Lead>) -> MockRepository {
        let mut repo = MockRepository::new();
        repo.expect_list_leads()
            .times(1)
            .return_once(move |_| Ok((total, leads)));
        repo.expect_list_owners()
            .returning(|_| Ok(vec![owner(1, "user-1", "Ann"), owner(2, "user-2", "Bob")]));
        repo.expect_list_lead_sources()
            .returning(|_| Ok(vec!["ads".to_string(), "webinar".to_string()]));
        repo
    }

    #[test]
    fn page_requires_access_role() {
        let mut repo = MockRepository::new();
        repo.expect_list_leads().times(0);
        let location = MemoryLocation::new(LEADS_PATH, "");

        let result = load_leads_page(&repo, &user(&["crm"]), &location, today());

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn url_state_reaches_the_repository() {
        let mut repo = MockRepository::new();
        repo.expect_list_leads()
            .withf(|query| {
                let pagination = query.pagination.unwrap();
                query.hub_id.get() == 5
                    && query.filters.statuses == vec![LeadStatus::Won]
                    && query.filters.owners == vec![OwnerRef::Unassigned]
                    && query.sort.sort_by == SortColumn::Name
                    && query.sort.sort_order == SortOrder::Asc
                    && pagination.page == 2
                    && pagination.per_page == 10
            })
            .times(1)
            .returning(|_| Ok((0, vec![])));
        repo.expect_list_owners().returning(|_| Ok(vec![]));
        repo.expect_list_lead_sources().returning(|_| Ok(vec![]));
        let location = MemoryLocation::new(
            LEADS_PATH,
            "status=won&owner=unassigned&sortBy=name&sortOrder=asc&page=2&limit=10",
        );

        let page = load_leads_page(&repo, &user(&["leads"]), &location, today()).unwrap();

        assert!(page.has_active_filters);
        assert_eq!(page.leads.total, 0);
        assert_eq!(page.leads.range.start, 0);
    }

    #[test]
    fn rows_resolve_owner_names() {
        let repo = repo_with(2, vec![lead(1, Some(2)), lead(2, None)]);
        let location = MemoryLocation::new(LEADS_PATH, "");

        let page = load_leads_page(&repo, &user(&["leads"]), &location, today()).unwrap();

        assert_eq!(page.leads.items[0].owner.as_deref(), Some("Bob"));
        assert_eq!(page.leads.items[0].owner_handle.as_deref(), Some("user-2"));
        assert_eq!(page.leads.items[1].owner, None);
        assert_eq!(page.owners[0].value, "unassigned");
        assert_eq!(page.owners.len(), 3);
        assert!(!page.has_active_filters);
    }

    #[test]
    fn sort_links_toggle_from_current_state() {
        let repo = repo_with(0, vec![]);
        let location = MemoryLocation::new(LEADS_PATH, "q=acme&page=3");

        let page = load_leads_page(&repo, &user(&["leads"]), &location, today()).unwrap();

        let created = &page.sort_links["createdAt"];
        assert!(created.active);
        assert_eq!(created.order, Some(SortOrder::Desc));
        assert_eq!(created.href, "/?q=acme&page=1&sortBy=createdAt&sortOrder=asc");

        let name = &page.sort_links["name"];
        assert!(!name.active);
        assert_eq!(name.href, "/?q=acme&page=1&sortBy=name&sortOrder=asc");
    }

    #[test]
    fn page_links_keep_filters() {
        let repo = repo_with(95, (1..=20).map(|id| lead(id, None)).collect());
        let location = MemoryLocation::new(LEADS_PATH, "status=new&page=3");

        let page = load_leads_page(&repo, &user(&["leads"]), &location, today()).unwrap();

        let pages: Vec<_> = page.page_links.iter().map(|link| link.page).collect();
        assert_eq!(pages, vec![Some(1), Some(2), Some(3), Some(4), Some(5)]);
        assert_eq!(page.page_links[3].href.as_deref(), Some("/?status=new&page=4"));
        assert!(page.page_links[2].current);
        assert_eq!(page.leads.range.start, 41);
        assert_eq!(page.leads.range.end, 60);
        assert_eq!(page.export_href, "/leads/export?status=new");
    }

    #[test]
    fn limit_links_reset_page() {
        let repo = repo_with(0, vec![]);
        let location = MemoryLocation::new(LEADS_PATH, "page=4&limit=50");

        let page = load_leads_page(&repo, &user(&["leads"]), &location, today()).unwrap();

        let ten = page.limit_links.iter().find(|link| link.limit == 10).unwrap();
        assert_eq!(ten.href, "/?page=1&limit=10");
        assert!(page.limit_links.iter().any(|link| link.limit == 50 && link.current));
    }

    #[test]
    fn repository_failure_is_surfaced() {
        let mut repo = MockRepository::new();
        repo.expect_list_leads()
            .returning(|_| Err(RepositoryError::ConnectionError("down".to_string())));
        let location = MemoryLocation::new(LEADS_PATH, "");

        let result = load_leads_page(&repo, &user(&["leads"]), &location, today());

        assert!(result.is_err());
        assert!(!matches!(
            result,
            Err(ServiceError::Unauthorized | ServiceError::Form(_))
        ));
    }

    #[test]
    fn filter_form_rewrites_current_url() {
        let form = LeadFilterForm {
            query: "page=4&sortBy=name&sortOrder=asc&utm=x".to_string(),
            status: vec!["new".to_string(), "won".to_string()],
            owner: vec!["unassigned".to_string()],
            ..LeadFilterForm::default()
        };

        let href = filter_leads(&user(&["leads"]), form, today()).unwrap();

        assert_eq!(
            href,
            "/?page=1&sortBy=name&sortOrder=asc&utm=x&status=new%2Cwon&owner=unassigned"
        );
    }

    #[test]
    fn invalid_filter_form_is_rejected() {
        let form = LeadFilterForm {
            from: "yesterday".to_string(),
            ..LeadFilterForm::default()
        };

        let result = filter_leads(&user(&["leads"]), form, today());

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn clear_keeps_sort_and_limit() {
        let form = ClearFiltersForm {
            query: "status=new&q=acme&limit=50&sortBy=name&sortOrder=asc&page=3".to_string(),
        };

        let href = clear_lead_filters(&user(&["leads"]), form).unwrap();

        assert_eq!(href, "/?limit=50&sortBy=name&sortOrder=asc&page=1");
    }
}
