//! Query parameter snapshot of a storefront request.

/// Value of one query parameter: either `key=v` or a `key[]=v` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Single(String),
    Multiple(Vec<String>),
}

impl ParamValue {
    pub fn values(&self) -> Vec<String> {
        match self {
            ParamValue::Single(value) => vec![value.clone()],
            ParamValue::Multiple(values) => values.clone(),
        }
    }

    pub fn first(&self) -> Option<&str> {
        match self {
            ParamValue::Single(value) => Some(value.as_str()),
            ParamValue::Multiple(values) => values.first().map(|v| v.as_str()),
        }
    }

    /// An empty string or an empty list marks the parameter as inactive.
    pub fn is_empty(&self) -> bool {
        match self {
            ParamValue::Single(value) => value.is_empty(),
            ParamValue::Multiple(values) => values.iter().all(|v| v.is_empty()),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            ParamValue::Single(existing) => {
                let existing = std::mem::take(existing);
                *self = ParamValue::Multiple(vec![existing, value]);
            }
            ParamValue::Multiple(values) => values.push(value),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Single(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::Multiple(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        ParamValue::Multiple(values.into_iter().map(|v| v.to_string()).collect())
    }
}


/// Ordered parameter map. Keys compare case-insensitively but keep the
/// spelling they were first inserted with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParameterSet {
    entries: Vec<(String, ParamValue)>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `a=1&b[]=2&b[]=3`. Both `key[]` pairs and repeated plain keys
    /// collect into a list.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_query_pairs(url::form_urlencoded::parse(query.as_bytes()))
    }

    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut set = ParameterSet::default();
        for (key, value) in pairs {
            let key = key.as_ref();
            let value = value.as_ref().to_string();
            let (name, is_list) = match key.strip_suffix("[]") {
                Some(name) => (name, true),
                None => (key, false),
            };
            if name.is_empty() {
                continue;
            }
            match set.position(name) {
                Some(index) => set.entries[index].1.push(value),
                None if is_list => set.entries.push((name.to_string(), ParamValue::Multiple(vec![value]))),
                None => set.entries.push((name.to_string(), ParamValue::Single(value))),
            }
        }
        set
    }

    fn position(&self, key: &str) -> Option<usize> {
        let key = key.to_lowercase();
        self.entries.iter().position(|(name, _)| name.to_lowercase() == key)
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.position(key).map(|index| &self.entries[index].1)
    }

    /// First value of `key`, skipping the parameter when it is empty.
    pub fn first_value(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(|value| value.first())
            .filter(|value| !value.is_empty())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Replaces the value of `key` in place, or appends it.
    pub fn set(&mut self, key: &str, value: impl Into<ParamValue>) {
        let value = value.into();
        match self.position(key) {
            Some(index) => self.entries[index].1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.position(key).map(|index| self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies `overrides` on top of this set, like a link that keeps the
    /// current query and changes only some parameters.
    pub fn merged_with(&self, overrides: &ParameterSet) -> ParameterSet {
        let mut merged = self.clone();
        for (key, value) in overrides.iter() {
            merged.set(key, value.clone());
        }
        merged
    }

    /// Flattens the set back into query pairs. Inactive values are dropped.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (key, value) in self.iter() {
            match value {
                ParamValue::Single(value) => {
                    if !value.is_empty() {
                        pairs.push((key.to_string(), value.clone()));
                    }
                }
                ParamValue::Multiple(values) => {
                    let list_key = format!("{key}[]");
                    for value in values.iter().filter(|v| !v.is_empty()) {
                        pairs.push((list_key.clone(), value.clone()));
                    }
                }
            }
        }
        pairs
    }

    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_query_pairs())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lists_and_plain_values() {
        let params = ParameterSet::from_query_string("?colour=red&size[]=M&size[]=L&p=2");
        assert_eq!(params.len(), 3);
        assert_eq!(params.get("colour"), Some(&ParamValue::from("red")));
        assert_eq!(params.get("size"), Some(&ParamValue::from(vec!["M", "L"])));
        assert_eq!(params.first_value("p"), Some("2"));
    }

    #[test]
    fn repeated_plain_keys_collect_into_a_list() {
        let params = ParameterSet::from_query_string("brand=acme&brand=globex");
        assert_eq!(params.get("brand"), Some(&ParamValue::from(vec!["acme", "globex"])));
    }

    #[test]
    fn keys_compare_case_insensitively() {
        let mut params = ParameterSet::from_query_string("Colour=red");
        assert!(params.contains_key("COLOUR"));
        params.set("colour", "blue");
        assert_eq!(params.len(), 1);
        assert_eq!(params.iter().next(), Some(("Colour", &ParamValue::from("blue"))));
    }

    #[test]
    fn set_keeps_position_and_remove_drops_key() {
        let mut params = ParameterSet::new().with("a", "1").with("b", "2").with("c", "3");
        params.set("b", "20");
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(params.remove("B"), Some(ParamValue::from("20")));
        assert!(!params.contains_key("b"));
    }

    #[test]
    fn merge_overrides_only_the_given_keys() {
        let current = ParameterSet::from_query_string("colour=red&p=3");
        let merged = current.merged_with(&ParameterSet::new().with("p", "").with("size", vec!["M"]));
        assert_eq!(merged.to_query_pairs(), vec![
            ("colour".to_string(), "red".to_string()),
            ("size[]".to_string(), "M".to_string()),
        ]);
    }

    #[test]
    fn query_string_encodes_list_keys() {
        let params = ParameterSet::new().with("size", vec!["M", "X L"]).with("q", "shoe");
        assert_eq!(params.to_query_string(), "size%5B%5D=M&size%5B%5D=X+L&q=shoe");
        assert_eq!(ParameterSet::from_query_string(&params.to_query_string()), params);
    }

    #[test]
    fn empty_values_are_inactive() {
        assert!(ParamValue::from("").is_empty());
        assert!(ParamValue::Multiple(vec![]).is_empty());
        assert!(!ParamValue::from(vec!["", "x"]).is_empty());
        assert_eq!(ParameterSet::new().with("a", "").first_value("a"), None);
    }
}
