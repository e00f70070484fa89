//! CSV export of the current lead selection.

use chrono::NaiveDateTime;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::ensure_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::types::HubId;
use crate::dto::leads::{LeadRow, owners_by_id};
use crate::query::{LeadListState, QueryParams};
use crate::repository::{LeadReader, OwnerReader};
use crate::services::api::normalize_params;
use crate::services::ServiceResult;

/// Query key holding the comma-separated column selection.
pub const COLUMNS_KEY: &str = "columns";

const EXPORT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Exportable columns in manifest order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportColumn {
    Name,
    Email,
    Phone,
    Company,
    Status,
    Source,
    Owner,
    CreatedAt,
}

impl ExportColumn {
    pub const MANIFEST: [ExportColumn; 8] = [
        ExportColumn::Name,
        ExportColumn::Email,
        ExportColumn::Phone,
        ExportColumn::Company,
        ExportColumn::Status,
        ExportColumn::Source,
        ExportColumn::Owner,
        ExportColumn::CreatedAt,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            ExportColumn::Name => "name",
            ExportColumn::Email => "email",
            ExportColumn::Phone => "phone",
            ExportColumn::Company => "company",
            ExportColumn::Status => "status",
            ExportColumn::Source => "source",
            ExportColumn::Owner => "owner",
            ExportColumn::CreatedAt => "created_at",
        }
    }

    fn value(self, row: &LeadRow) -> String {
        fn text(value: &Option<String>) -> String {
            value.clone().unwrap_or_default()
        }
        fn timestamp(value: NaiveDateTime) -> String {
            value.format(EXPORT_TIME_FORMAT).to_string()
        }

        match self {
            ExportColumn::Name => row.name.clone(),
            ExportColumn::Email => text(&row.email),
            ExportColumn::Phone => text(&row.phone),
            ExportColumn::Company => text(&row.company),
            ExportColumn::Status => row.status.as_str().to_string(),
            ExportColumn::Source => text(&row.source),
            ExportColumn::Owner => text(&row.owner),
            ExportColumn::CreatedAt => timestamp(row.created_at),
        }
    }
}

/// Resolves a comma-separated selection. Output always follows manifest
/// order; unknown ids are ignored and an empty selection means every column.
pub fn select_columns(selection: Option<&str>) -> Vec<ExportColumn> {
    let requested: Vec<&str> = selection
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect();

    let columns: Vec<ExportColumn> = ExportColumn::MANIFEST
        .into_iter()
        .filter(|column| requested.contains(&column.id()))
        .collect();

    if columns.is_empty() {
        ExportColumn::MANIFEST.to_vec()
    } else {
        columns
    }
}

/// Renders rows as CSV with a header line of column ids.
pub fn write_csv(rows: &[LeadRow], columns: &[ExportColumn]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns.iter().map(|column| column.id()))?;
    for row in rows {
        writer.write_record(columns.iter().map(|column| column.value(row)))?;
    }
    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}

/// Rows and columns selected for a download.
#[derive(Debug)]
pub struct LeadExport {
    pub columns: Vec<ExportColumn>,
    pub rows: Vec<LeadRow>,
}

impl LeadExport {
    pub fn to_csv(&self) -> Result<Vec<u8>, csv::Error> {
        write_csv(&self.rows, &self.columns)
    }
}

/// Every lead matching the current filters and sort, ready for CSV.
pub fn export_leads<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: QueryParams,
) -> ServiceResult<LeadExport>
where
    R: LeadReader + OwnerReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let hub_id = HubId::new(user.hub_id)?;
    let columns = select_columns(params.get(COLUMNS_KEY));
    let state = LeadListState::read(&normalize_params(params));

    let (_, leads) = repo
        .list_leads(state.to_list_query(hub_id).unpaginated())
        .map_err(|err| {
            log::error!("Failed to list leads for export: {err}");
            err
        })?;

    let owners = repo.list_owners(hub_id).map_err(|err| {
        log::error!("Failed to list owners for export: {err}");
        err
    })?;
    let owner_index = owners_by_id(&owners);

    let rows: Vec<LeadRow> = leads
        .into_iter()
        .map(|lead| LeadRow::new(lead, &owner_index))
        .collect();

    log::info!(
        "Exporting {} leads with {} columns for hub {hub_id}",
        rows.len(),
        columns.len()
    );

    Ok(LeadExport { columns, rows })
}
