use crate::query::params::QueryParams;

/// The address bar as seen by list state: read the current query, replace it.
///
/// `replace` swaps the current entry rather than adding a new one, and takes
/// `&mut self` so a read-modify-write cycle cannot interleave with another.
pub trait Location {
    fn search(&self) -> QueryParams;
    fn replace(&mut self, params: QueryParams);
}

/// In-memory location used to compute links and redirect targets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryLocation {
    path: String,
    params: QueryParams,
    replacements: usize,
}

impl MemoryLocation {
    pub fn new(path: impl Into<String>, query: &str) -> Self {
        Self::from_params(path, QueryParams::parse(query))
    }

    pub fn from_params(path: impl Into<String>, params: QueryParams) -> Self {
        Self {
            path: path.into(),
            params,
            replacements: 0,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Number of `replace` calls performed so far.
    pub fn replacements(&self) -> usize {
        self.replacements
    }

    /// `path?query`, or the bare path when there is no query.
    pub fn href(&self) -> String {
        if self.params.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.params)
        }
    }
}

impl Location for MemoryLocation {
    fn search(&self) -> QueryParams {
        self.params.clone()
    }

    fn replace(&mut self, params: QueryParams) {
        self.params = params;
        self.replacements += 1;
    }
}
