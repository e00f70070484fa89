use std::fmt::{Display, Formatter};

/// Ordered query-string pairs with `URLSearchParams`-like editing.
///
/// An absent key and a key with an empty value are different states.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a form-urlencoded query string. A leading `?` is ignored.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        Self { pairs }
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Overwrites the first occurrence of `key` in place and drops the rest,
    /// or appends the pair when the key is new.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(index) => {
                self.pairs[index].1 = value;
                let mut first = true;
                self.pairs.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    std::mem::replace(&mut first, false)
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serializes back to a form-urlencoded string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

impl Display for QueryParams {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_order_and_decodes() {
        let params = QueryParams::parse("?owner=unassigned%2Cuser-1&q=acme+corp&page=2");
        assert_eq!(params.get("owner"), Some("unassigned,user-1"));
        assert_eq!(params.get("q"), Some("acme corp"));
        assert_eq!(
            params.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            vec!["owner", "q", "page"]
        );
    }

    #[test]
    fn empty_value_differs_from_absent_key() {
        let params = QueryParams::parse("status=&page=1");
        assert_eq!(params.get("status"), Some(""));
        assert!(params.contains("status"));
        assert!(!params.contains("owner"));
    }

    #[test]
    fn set_replaces_in_place_and_drops_duplicates() {
        let mut params = QueryParams::parse("a=1&b=2&a=3&c=4");
        params.set("a", "9");
        assert_eq!(params.to_query_string(), "a=9&b=2&c=4");
        params.set("d", "5");
        assert_eq!(params.to_query_string(), "a=9&b=2&c=4&d=5");
    }

    #[test]
    fn remove_deletes_every_occurrence() {
        let mut params = QueryParams::parse("a=1&b=2&a=3");
        params.remove("a");
        assert_eq!(params.to_query_string(), "b=2");
    }

    #[test]
    fn commas_are_percent_encoded() {
        let params: QueryParams = [("owner", "unassigned,user-1")].into_iter().collect();
        assert_eq!(params.to_string(), "owner=unassigned%2Cuser-1");
    }
}
