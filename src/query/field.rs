//! Generic read/write helper for a single URL-backed list dimension.

use crate::query::location::Location;
use crate::query::params::QueryParams;
use crate::query::PAGE_KEY;

/// Maps one list dimension to and from its query keys.
///
/// `Value::default()` is the empty value: `encode` deletes the keys for it and
/// never writes empty strings. `decode` never fails; malformed input decodes
/// to the default.
pub trait ParamCodec {
    type Value: Clone + Default + PartialEq;

    fn decode(params: &QueryParams) -> Self::Value;

    fn encode(value: &Self::Value, params: &mut QueryParams);

    fn is_active(value: &Self::Value) -> bool {
        *value != Self::Value::default()
    }
}

/// Forces the list back to its first page.
pub fn reset_page(params: &mut QueryParams) {
    params.set(PAGE_KEY, "1");
}

/// Rewrites one dimension, resets the page and performs a single replace.
pub fn update<C, L>(location: &mut L, value: &C::Value)
where
    C: ParamCodec,
    L: Location + ?Sized,
{
    let mut params = location.search();
    C::encode(value, &mut params);
    reset_page(&mut params);
    location.replace(params);
}

/// Splits a comma-joined value, trimming entries and dropping blanks.
pub fn decode_list(params: &QueryParams, key: &str) -> Vec<String> {
    params
        .get(key)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Comma-joins `values` under `key`, deleting the key when nothing remains.
pub fn encode_list<I, S>(params: &mut QueryParams, key: &str, values: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = values
        .into_iter()
        .map(|value| value.as_ref().trim().to_string())
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(",");

    if joined.is_empty() {
        params.remove(key);
    } else {
        params.set(key, joined);
    }
}

/// Decodes a trimmed single value, treating blanks as absent.
pub fn decode_text(params: &QueryParams, key: &str) -> Option<String> {
    params
        .get(key)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub fn encode_text(params: &mut QueryParams, key: &str, value: Option<&str>) {
    match value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => params.set(key, value),
        None => params.remove(key),
    }
}

/// One dimension of list state bound to a location for the current request.
///
/// The value is read once on construction, mirroring a render pass; setters
/// write through to the location and refresh the cached value.
pub struct QueryField<'a, C, L>
where
    C: ParamCodec,
    L: Location + ?Sized,
{
    pub(crate) location: &'a mut L,
    value: C::Value,
}

impl<'a, C, L> QueryField<'a, C, L>
where
    C: ParamCodec,
    L: Location + ?Sized,
{
    pub fn new(location: &'a mut L) -> Self {
        let value = C::decode(&location.search());
        Self { location, value }
    }

    pub fn value(&self) -> &C::Value {
        &self.value
    }

    pub fn has_filter(&self) -> bool {
        C::is_active(&self.value)
    }

    pub fn set(&mut self, value: C::Value) {
        update::<C, L>(self.location, &value);
        self.refresh();
    }

    pub fn clear(&mut self) {
        self.set(C::Value::default());
    }

    pub(crate) fn refresh(&mut self) {
        self.value = C::decode(&self.location.search());
    }
}
