//! Access to the ambient request of the calling framework.
//!
//! Frameworks implement [`RequestContext`] on a wrapper around their own
//! request type, so providers can read a submitted field without depending
//! on any particular web stack.

use std::sync::Arc;

/// Single-field lookup into the request that triggered authentication.
pub trait RequestContext: Send + Sync {
    /// Get a submitted field by name. `None` if the field is absent.
    fn get(&self, field: &str) -> Option<&str>;

    /// Whether the field is present with a truthy value.
    fn is_set(&self, field: &str) -> bool {
        self.get(field).is_some_and(is_truthy)
    }
}

impl<T: RequestContext + ?Sized> RequestContext for &T {
    fn get(&self, field: &str) -> Option<&str> {
        (**self).get(field)
    }
}

impl<T: RequestContext + ?Sized> RequestContext for Arc<T> {
    fn get(&self, field: &str) -> Option<&str> {
        (**self).get(field)
    }
}

/// Form-value truthiness: empty, `0`, `false`, `off` and `no` are false.
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty()
        || value == "0"
        || ["false", "off", "no"]
            .iter()
            .any(|falsy| value.eq_ignore_ascii_case(falsy)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MockContext(HashMap<String, String>);

    impl RequestContext for MockContext {
        fn get(&self, field: &str) -> Option<&str> {
            self.0.get(field).map(String::as_str)
        }
    }

    #[test]
    fn truthy_values() {
        for value in ["1", "on", "yes", "true", "remember"] {
            assert!(is_truthy(value), "{value} should be truthy");
        }
        for value in ["", " ", "0", "false", "FALSE", "off", "No"] {
            assert!(!is_truthy(value), "{value:?} should be falsy");
        }
    }

    #[test]
    fn is_set_requires_presence_and_truthiness() {
        let context = MockContext(HashMap::from([
            ("remember me".to_string(), "1".to_string()),
            ("opt out".to_string(), "0".to_string()),
        ]));

        assert!(context.is_set("remember me"));
        assert!(!context.is_set("opt out"));
        assert!(!context.is_set("missing"));
    }
}
