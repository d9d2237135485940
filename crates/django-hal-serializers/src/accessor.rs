//! Attribute access on serialized objects.
//!
//! Link specifications name attributes (`"pk"`, `"user_id"`) that are read off
//! the object being serialized. [`FieldAccessor`] is the capability that makes
//! this possible without reflection: anything that can answer "what is the
//! value of attribute `name`" can be serialized.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde::Serialize;
use serde_json::{Map, Value};

use django_hal_core::{HalError, HalResult};

/// Read-only access to an object's attributes by name.
///
/// Returns `None` when the object has no such attribute. An attribute that
/// exists but is empty is `Some(Value::Null)`.
///
/// # Examples
///
/// ```
/// use django_hal_serializers::FieldAccessor;
/// use serde_json::{json, Value};
///
/// struct User {
///     pk: i64,
///     email: Option<String>,
/// }
///
/// impl FieldAccessor for User {
///     fn attribute(&self, name: &str) -> Option<Value> {
///         match name {
///             "pk" => Some(json!(self.pk)),
///             "email" => Some(json!(self.email)),
///             _ => None,
///         }
///     }
/// }
///
/// let user = User { pk: 42, email: None };
/// assert_eq!(user.attribute("pk"), Some(json!(42)));
/// assert_eq!(user.attribute("email"), Some(Value::Null));
/// assert_eq!(user.attribute("name"), None);
/// ```
pub trait FieldAccessor {
    /// Returns the value of the named attribute, or `None` if it does not exist.
    fn attribute(&self, name: &str) -> Option<Value>;
}

impl FieldAccessor for Map<String, Value> {
    fn attribute(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl FieldAccessor for Value {
    fn attribute(&self, name: &str) -> Option<Value> {
        match self {
            Self::Object(map) => map.attribute(name),
            _ => None,
        }
    }
}

impl<S: BuildHasher> FieldAccessor for HashMap<String, Value, S> {
    fn attribute(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl FieldAccessor for BTreeMap<String, Value> {
    fn attribute(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl<T: FieldAccessor + ?Sized> FieldAccessor for &T {
    fn attribute(&self, name: &str) -> Option<Value> {
        (**self).attribute(name)
    }
}

/// Converts any serde-serializable struct into an accessor.
///
/// # Errors
///
/// Returns [`HalError::SerializationError`] if the value cannot be serialized
/// or does not serialize to a JSON object.
pub fn to_accessor<T: Serialize + ?Sized>(value: &T) -> HalResult<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(HalError::SerializationError(format!(
            "Expected an object with named attributes, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Email {
        pk: u32,
        user_id: u32,
        address: String,
        verified_at: Option<String>,
    }

    #[test]
    fn test_map_accessor() {
        let value = json!({"pk": 1, "name": "alice", "bio": null});
        let map = value.as_object().unwrap();
        assert_eq!(map.attribute("pk"), Some(json!(1)));
        assert_eq!(map.attribute("bio"), Some(Value::Null));
        assert_eq!(map.attribute("missing"), None);
    }

    #[test]
    fn test_value_accessor_non_object() {
        assert_eq!(json!([1, 2]).attribute("pk"), None);
        assert_eq!(json!("pk").attribute("pk"), None);
        assert_eq!(json!({"pk": 3}).attribute("pk"), Some(json!(3)));
    }

    #[test]
    fn test_hash_and_btree_accessors() {
        let mut hash = HashMap::new();
        hash.insert("pk".to_string(), json!(7));
        assert_eq!(hash.attribute("pk"), Some(json!(7)));

        let mut btree = BTreeMap::new();
        btree.insert("slug".to_string(), json!("hello"));
        assert_eq!(btree.attribute("slug"), Some(json!("hello")));
        assert_eq!(btree.attribute("pk"), None);
    }

    #[test]
    fn test_reference_accessor() {
        fn read_pk<A: FieldAccessor>(accessor: A) -> Option<Value> {
            accessor.attribute("pk")
        }

        let value = json!({"pk": 5});
        let by_ref: &dyn FieldAccessor = &value;
        assert_eq!(read_pk(by_ref), Some(json!(5)));
        assert_eq!(read_pk(&value), Some(json!(5)));
    }

    #[test]
    fn test_to_accessor_struct() {
        let email = Email {
            pk: 9,
            user_id: 42,
            address: "a@example.com".to_string(),
            verified_at: None,
        };
        let accessor = to_accessor(&email).unwrap();
        assert_eq!(accessor.attribute("user_id"), Some(json!(42)));
        assert_eq!(accessor.attribute("address"), Some(json!("a@example.com")));
        assert_eq!(accessor.attribute("pk"), Some(json!(9)));
        assert_eq!(accessor.attribute("verified_at"), Some(Value::Null));
    }

    #[test]
    fn test_to_accessor_rejects_scalars() {
        assert!(matches!(
            to_accessor(&42),
            Err(HalError::SerializationError(_))
        ));
    }
}
