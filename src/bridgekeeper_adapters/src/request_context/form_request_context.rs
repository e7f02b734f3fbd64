use std::collections::HashMap;

use bridgekeeper_core::RequestContext;

/// Submitted form fields of the request being authenticated.
#[derive(Debug, Default, Clone)]
pub struct FormRequestContext {
    fields: HashMap<String, String>,
}

impl FormRequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }
}

impl<K, V> FromIterator<(K, V)> for FormRequestContext
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl RequestContext for FormRequestContext {
    fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

/// Context for callers without an ambient request. Every lookup is absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRequestContext;

impl RequestContext for NoRequestContext {
    fn get(&self, _field: &str) -> Option<&str> {
        None
    }
}
