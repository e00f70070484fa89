use chrono::NaiveDate;
use serde::Deserialize;
use validator::ValidateLength;

use crate::domain::filter::{DatePreset, DateRange, FilterSet};
use crate::domain::lead::LeadStatus;
use crate::domain::owner::OwnerRef;
use crate::forms::FormError;
use crate::query::filters::{DATE_FORMAT, DateRangeFilter};
use crate::query::{ParamCodec, QueryParams};

pub const MAX_SEARCH_LENGTH: u64 = 200;

/// Filter panel submission. Checkbox groups repeat their key, so the body is
/// parsed with `serde_html_form`.
#[derive(Debug, Default, Deserialize)]
pub struct LeadFilterForm {
    /// Query string of the page the form was submitted from.
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub status: Vec<String>,
    #[serde(default)]
    pub owner: Vec<String>,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    /// Resolved against the current day. Loses to `from`/`to` only when the
    /// dates were edited while the already-applied preset stayed selected.
    #[serde(default)]
    pub preset: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClearFiltersForm {
    #[serde(default)]
    pub query: String,
}

fn parse_date(raw: &str) -> Result<Option<NaiveDate>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| FormError::InvalidDate(raw.to_string()))
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl LeadFilterForm {
    /// Validates the submission. Unlike URL decoding, bad form input is
    /// reported back to the user instead of being dropped.
    pub fn to_filter_set(&self, today: NaiveDate) -> Result<FilterSet, FormError> {
        let mut statuses = Vec::new();
        for raw in self.status.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
            let status = raw
                .parse::<LeadStatus>()
                .map_err(|_| FormError::InvalidStatus(raw.to_string()))?;
            if !statuses.contains(&status) {
                statuses.push(status);
            }
        }

        let mut owners = Vec::new();
        for owner in self.owner.iter().flat_map(|raw| raw.split(',')).filter_map(OwnerRef::parse) {
            if !owners.contains(&owner) {
                owners.push(owner);
            }
        }

        let explicit = match (parse_date(&self.from)?, parse_date(&self.to)?) {
            (Some(from), Some(to)) => {
                Some(DateRange::new(from, to).ok_or(FormError::ReversedDateRange)?)
            }
            (Some(day), None) | (None, Some(day)) => DateRange::new(day, day),
            (None, None) => None,
        };

        let date_range = match non_blank(&self.preset) {
            Some(preset) => {
                let preset = preset
                    .parse::<DatePreset>()
                    .map_err(|_| FormError::InvalidPreset(preset.clone()))?;
                let resolved = preset.resolve(today);
                let applied = DateRangeFilter::decode(&QueryParams::parse(&self.query));
                match explicit {
                    // The page showed this preset and the user typed other dates.
                    Some(edited) if edited != resolved && applied == Some(resolved) => {
                        Some(edited)
                    }
                    _ => Some(resolved),
                }
            }
            None => explicit,
        };

        let search = non_blank(&self.q);
        if search
            .as_ref()
            .is_some_and(|search| !search.validate_length(None, Some(MAX_SEARCH_LENGTH), None))
        {
            return Err(FormError::SearchTooLong);
        }

        Ok(FilterSet {
            statuses,
            owners,
            date_range,
            source: non_blank(&self.source),
            search,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn parse(body: &str) -> LeadFilterForm {
        serde_html_form::from_str(body).unwrap()
    }

    #[test]
    fn repeated_checkboxes_collect() {
        let form = parse("query=page%3D4&status=new&status=won&status=new&owner=unassigned&owner=user-1");
        let filters = form.to_filter_set(day(2024, 5, 15)).unwrap();

        assert_eq!(form.query, "page=4");
        assert_eq!(filters.statuses, vec![LeadStatus::New, LeadStatus::Won]);
        assert_eq!(
            filters.owners,
            vec![OwnerRef::Unassigned, OwnerRef::Handle("user-1".to_string())]
        );
    }

    #[test]
    fn newly_picked_preset_replaces_stale_dates() {
        let form = parse(
            "query=from%3D2020-01-01%26to%3D2020-01-31&from=2020-01-01&to=2020-01-31&preset=this_month",
        );
        let filters = form.to_filter_set(day(2024, 5, 15)).unwrap();
        assert_eq!(
            filters.date_range,
            DateRange::new(day(2024, 5, 1), day(2024, 5, 15))
        );
    }

    #[test]
    fn edited_dates_win_over_applied_preset() {
        // The page was filtered by `this_month`, so the select still shows it.
        let form = parse(
            "query=from%3D2024-05-01%26to%3D2024-05-15&from=2024-05-03&to=2024-05-10&preset=this_month",
        );
        let filters = form.to_filter_set(day(2024, 5, 15)).unwrap();
        assert_eq!(
            filters.date_range,
            DateRange::new(day(2024, 5, 3), day(2024, 5, 10))
        );
    }

    #[test]
    fn unchanged_dates_keep_the_preset() {
        let form = parse(
            "query=from%3D2024-05-01%26to%3D2024-05-15&from=2024-05-01&to=2024-05-15&preset=this_month",
        );
        let filters = form.to_filter_set(day(2024, 5, 15)).unwrap();
        assert_eq!(
            filters.date_range,
            DateRange::new(day(2024, 5, 1), day(2024, 5, 15))
        );
    }

    #[test]
    fn single_date_is_a_one_day_range() {
        let form = parse("from=2024-02-03");
        let filters = form.to_filter_set(day(2024, 5, 15)).unwrap();
        assert_eq!(
            filters.date_range,
            DateRange::new(day(2024, 2, 3), day(2024, 2, 3))
        );
    }

    #[test]
    fn blank_fields_filter_nothing() {
        let form = parse("status=&owner=&from=&to=&preset=&source=%20&q=");
        assert!(form.to_filter_set(day(2024, 5, 15)).unwrap().is_empty());
    }

    #[test]
    fn invalid_input_is_reported() {
        let today = day(2024, 5, 15);
        assert_eq!(
            parse("from=2024-13-01").to_filter_set(today),
            Err(FormError::InvalidDate("2024-13-01".to_string()))
        );
        assert_eq!(
            parse("from=2024-02-10&to=2024-02-01").to_filter_set(today),
            Err(FormError::ReversedDateRange)
        );
        assert_eq!(
            parse("status=archived").to_filter_set(today),
            Err(FormError::InvalidStatus("archived".to_string()))
        );
        assert_eq!(
            parse("preset=forever").to_filter_set(today),
            Err(FormError::InvalidPreset("forever".to_string()))
        );
        let long = format!("q={}", "a".repeat(201));
        assert_eq!(parse(&long).to_filter_set(today), Err(FormError::SearchTooLong));
    }
}
