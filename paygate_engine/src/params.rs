use std::fmt::{self, Debug};

use paygate_common::Secret;
use reqwest::Method;

#[derive(Clone)]
enum ParamValue {
    Plain(String),
    Masked(Secret<String>),
}

impl ParamValue {
    fn reveal(&self) -> &str {
        match self {
            Self::Plain(s) => s.as_str(),
            Self::Masked(s) => s.reveal().as_str(),
        }
    }
}

/// A flattened, ordered set of request parameters, as sent in a form-encoded body.
///
/// Nested structures are flattened with the bracketed key convention (`card[number]`). Keys are unique: setting an
/// existing key replaces its value in place. Values inserted with [`ParamSet::insert_masked`] print as `****` in
/// `Debug` output, so a `ParamSet` can be traced without leaking card data.
#[derive(Clone, Default)]
pub struct ParamSet {
    params: Vec<(String, ParamValue)>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.set(key.into(), ParamValue::Plain(value.into()));
    }

    /// Inserts the value only if it is present. Absent optional values are omitted, never sent as empty strings.
    pub fn insert_opt<K: Into<String>>(&mut self, key: K, value: Option<&str>) {
        if let Some(v) = value {
            self.insert(key, v);
        }
    }

    pub fn insert_masked<K: Into<String>>(&mut self, key: K, value: &Secret<String>) {
        self.set(key.into(), ParamValue::Masked(value.clone()));
    }

    fn set(&mut self, key: String, value: ParamValue) {
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.params.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v.reveal())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.params.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// `application/x-www-form-urlencoded` rendering of the parameters, in insertion order.
    pub fn to_form_body(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v.reveal())))
            .collect::<Vec<String>>()
            .join("&")
    }
}

/// Collects already-decoded pairs. Every value is treated as plain text.
impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParamSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        iter.into_iter().for_each(|(k, v)| params.insert(k, v));
        params
    }
}

/// Builds a bracketed key, e.g. `nested("card", "number")` gives `card[number]`.
pub fn nested(prefix: &str, key: &str) -> String {
    format!("{prefix}[{key}]")
}

impl Debug for ParamSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in &self.params {
            match v {
                ParamValue::Plain(s) => map.entry(k, s),
                ParamValue::Masked(_) => map.entry(k, &"****"),
            };
        }
        map.finish()
    }
}

/// Everything a request builder decides about one backend call: the method, the path relative to the gateway's base
/// URL, the parameters, and the caller's idempotency key if the backend takes it out of band (as a header).
#[derive(Debug, Clone)]
pub struct ApiCall {
    pub method: Method,
    pub path: String,
    pub params: ParamSet,
    pub idempotency_key: Option<String>,
}

impl ApiCall {
    pub fn new<S: Into<String>>(method: Method, path: S, params: ParamSet) -> Self {
        Self { method, path: path.into(), params, idempotency_key: None }
    }

    pub fn with_idempotency_key(mut self, key: Option<&str>) -> Self {
        self.idempotency_key = key.map(String::from);
        self
    }
}
