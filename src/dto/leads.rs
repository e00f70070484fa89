//! View models for the lead list page.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::lead::{Lead, LeadStatus};
use crate::domain::owner::Owner;
use crate::domain::sort::SortOrder;
use crate::pagination::Paginated;
use crate::query::LeadListState;

/// Lead flattened for tables, JSON and CSV, with the owner resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRow {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: LeadStatus,
    pub source: Option<String>,
    pub owner: Option<String>,
    pub owner_handle: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl LeadRow {
    /// `owners` is keyed by owner id. Dangling owner ids render as unassigned.
    pub fn new(lead: Lead, owners: &HashMap<i32, &Owner>) -> Self {
        let owner = lead
            .owner_id
            .and_then(|owner_id| owners.get(&owner_id.get()).copied());

        Self {
            id: lead.id.get(),
            name: lead.name.into_inner(),
            email: lead.email.map(|email| email.into_inner()),
            phone: lead.phone,
            company: lead.company,
            status: lead.status,
            source: lead.source.map(|source| source.into_inner()),
            owner: owner.map(|owner| owner.name.as_str().to_string()),
            owner_handle: owner.map(|owner| owner.handle.as_str().to_string()),
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        }
    }
}

/// Indexes owners by id for [`LeadRow::new`].
pub fn owners_by_id(owners: &[Owner]) -> HashMap<i32, &Owner> {
    owners.iter().map(|owner| (owner.id.get(), owner)).collect()
}

/// Column header link that toggles sorting.
#[derive(Debug, Serialize)]
pub struct SortLink {
    pub column: &'static str,
    pub href: String,
    pub active: bool,
    /// Current direction when the column is active.
    pub order: Option<SortOrder>,
}

/// Entry of the page strip. Ellipses carry neither page nor link.
#[derive(Debug, Serialize)]
pub struct PageLink {
    pub page: Option<usize>,
    pub href: Option<String>,
    pub current: bool,
}

/// Checkbox, radio or select option for a filter widget.
#[derive(Debug, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct LimitLink {
    pub limit: usize,
    pub href: String,
    pub current: bool,
}

/// Everything the lead list template renders.
#[derive(Debug, Serialize)]
pub struct LeadsPageData {
    pub leads: Paginated<LeadRow>,
    pub state: LeadListState,
    /// Current query string, echoed into filter forms.
    pub query: String,
    pub has_active_filters: bool,
    /// Keyed by column id.
    pub sort_links: BTreeMap<&'static str, SortLink>,
    pub page_links: Vec<PageLink>,
    pub limit_links: Vec<LimitLink>,
    pub statuses: Vec<FilterOption>,
    pub owners: Vec<FilterOption>,
    pub sources: Vec<FilterOption>,
    pub presets: Vec<FilterOption>,
    pub export_href: String,
}
