use std::collections::HashMap;

/// Placeholder name → substitution value, supplied per invocation.
///
/// ```rust
/// use promptpipe_prompt::Variables;
///
/// let vars = Variables::new().with("name", "Barack Obama");
/// assert_eq!(vars.get("name"), Some("Barack Obama"));
///
/// let same: Variables = [("name", "Barack Obama")].into();
/// assert_eq!(vars, same);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables(HashMap<String, String>);

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set `name`, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Variables
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Variables
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(value: [(K, V); N]) -> Self {
        value.into_iter().collect()
    }
}

impl From<HashMap<String, String>> for Variables {
    fn from(value: HashMap<String, String>) -> Self {
        Self(value)
    }
}
