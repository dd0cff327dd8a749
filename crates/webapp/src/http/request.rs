//! Query parameters for collection requests.

use url::Url;

/// A single option value: scalar, or a list sent as repeated keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    One(String),
    Many(Vec<String>),
}

/// Flat key/value options turned into URL query parameters.
///
/// Keys keep insertion order; setting a key again replaces its value. List
/// values are flattened to repeated keys, so
/// `RequestOptions::new().sort(["id,asc", "city,desc"])` becomes
/// `?sort=id%2Casc&sort=city%2Cdesc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    params: Vec<(String, QueryValue)>,
}

impl RequestOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a scalar option.
    #[must_use]
    pub fn param(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key.into(), QueryValue::One(value.into()))
    }

    /// Set a list option, sent as one `key=value` pair per element.
    #[must_use]
    pub fn params<I, V>(self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.set(key.into(), QueryValue::Many(values))
    }

    /// Server-side filter predicate (e.g. `customer-is-null`).
    #[must_use]
    pub fn filter(self, filter: impl Into<String>) -> Self {
        self.param("filter", filter)
    }

    /// Sort criteria such as `id,asc`.
    #[must_use]
    pub fn sort<I, V>(self, criteria: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.params("sort", criteria)
    }

    #[must_use]
    pub fn page(self, page: u32) -> Self {
        self.param("page", page.to_string())
    }

    #[must_use]
    pub fn size(self, size: u32) -> Self {
        self.param("size", size.to_string())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Flatten into `(key, value)` pairs in insertion order.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .flat_map(|(key, value)| match value {
                QueryValue::One(v) => vec![(key.clone(), v.clone())],
                QueryValue::Many(vs) => vs.iter().map(|v| (key.clone(), v.clone())).collect(),
            })
            .collect()
    }

    /// Append the options to `url`'s query string.
    pub fn apply_to(&self, url: &mut Url) {
        let pairs = self.to_query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
    }

    fn set(mut self, key: String, value: QueryValue) -> Self {
        if let Some(slot) = self.params.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.params.push((key, value));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(options: &RequestOptions) -> Vec<(String, String)> {
        options.to_query_pairs()
    }

    fn expected(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_scalar_and_list_options() {
        let options = RequestOptions::new()
            .filter("customer-is-null")
            .sort(["id,asc", "city,desc"])
            .page(0)
            .size(20);
        assert_eq!(
            pairs(&options),
            expected(&[
                ("filter", "customer-is-null"),
                ("sort", "id,asc"),
                ("sort", "city,desc"),
                ("page", "0"),
                ("size", "20"),
            ])
        );
    }

    #[test]
    fn test_setting_key_again_replaces_value() {
        let options = RequestOptions::new().page(1).size(5).page(2);
        assert_eq!(pairs(&options), expected(&[("page", "2"), ("size", "5")]));
    }

    #[test]
    fn test_apply_to_url() {
        let mut url = Url::parse("http://localhost/api/customer-addresses").expect("url");
        RequestOptions::new()
            .filter("customer-is-null")
            .sort(["id,asc"])
            .apply_to(&mut url);
        assert_eq!(
            url.as_str(),
            "http://localhost/api/customer-addresses?filter=customer-is-null&sort=id%2Casc"
        );
    }

    #[test]
    fn test_empty_options_leave_url_untouched() {
        let mut url = Url::parse("http://localhost/api/customers").expect("url");
        RequestOptions::new().apply_to(&mut url);
        assert_eq!(url.as_str(), "http://localhost/api/customers");
        assert!(url.query().is_none());
    }
}
