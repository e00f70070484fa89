//! Sort columns and directions accepted by lead lists.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

/// Allow-listed sort targets. Anything else coming from a URL is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum SortColumn {
    CreatedAt,
    UpdatedAt,
    Name,
    Company,
    Status,
    Source,
}

impl SortColumn {
    pub const ALL: [SortColumn; 6] = [
        SortColumn::CreatedAt,
        SortColumn::UpdatedAt,
        SortColumn::Name,
        SortColumn::Company,
        SortColumn::Status,
        SortColumn::Source,
    ];

    /// Identifier used in the `sortBy` query parameter.
    pub const fn as_str(self) -> &'static str {
        match self {
            SortColumn::CreatedAt => "createdAt",
            SortColumn::UpdatedAt => "updatedAt",
            SortColumn::Name => "name",
            SortColumn::Company => "company",
            SortColumn::Status => "status",
            SortColumn::Source => "source",
        }
    }

    /// Direction used when switching to this column. Newest first for creation
    /// time, ascending everywhere else.
    pub const fn default_order(self) -> SortOrder {
        match self {
            SortColumn::CreatedAt => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

impl Display for SortColumn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SortColumn> for &'static str {
    fn from(value: SortColumn) -> Self {
        value.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortColumn(pub String);

impl FromStr for SortColumn {
    type Err = UnknownSortColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortColumn::ALL
            .into_iter()
            .find(|column| column.as_str() == s)
            .ok_or_else(|| UnknownSortColumn(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub const fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Accepts exactly `asc` or `desc`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub sort_by: SortColumn,
    pub sort_order: SortOrder,
}

impl SortState {
    pub const DEFAULT_COLUMN: SortColumn = SortColumn::CreatedAt;
    pub const DEFAULT_ORDER: SortOrder = SortOrder::Desc;

    pub const fn new(sort_by: SortColumn, sort_order: SortOrder) -> Self {
        Self {
            sort_by,
            sort_order,
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Flips the direction of the active column or switches to `column` with
    /// its default direction.
    #[must_use]
    pub fn toggled(self, column: SortColumn) -> Self {
        if self.sort_by == column {
            Self::new(column, self.sort_order.flipped())
        } else {
            Self::new(column, column.default_order())
        }
    }
}

impl Default for SortState {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COLUMN, Self::DEFAULT_ORDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_active_column_flips_order() {
        let state = SortState::new(SortColumn::Name, SortOrder::Asc);
        assert_eq!(
            state.toggled(SortColumn::Name),
            SortState::new(SortColumn::Name, SortOrder::Desc)
        );
    }

    #[test]
    fn toggling_new_column_uses_its_default() {
        let state = SortState::new(SortColumn::Name, SortOrder::Desc);
        assert_eq!(
            state.toggled(SortColumn::CreatedAt),
            SortState::new(SortColumn::CreatedAt, SortOrder::Desc)
        );
        assert_eq!(
            SortState::default().toggled(SortColumn::Company),
            SortState::new(SortColumn::Company, SortOrder::Asc)
        );
    }

    #[test]
    fn column_ids_are_case_sensitive() {
        assert_eq!("createdAt".parse::<SortColumn>(), Ok(SortColumn::CreatedAt));
        assert!("created_at".parse::<SortColumn>().is_err());
        assert_eq!(SortOrder::parse("ASC"), None);
    }
}
