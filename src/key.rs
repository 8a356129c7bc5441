//! Primary identifiers of related entities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary key of a related entity
///
/// Serialized untagged so that integer and text keys keep their JSON shape
/// across the widget boundary.
///
/// # Examples
///
/// ```
/// use reinhardt_relation_multiselect::RelatedKey;
///
/// let key: RelatedKey = serde_json::from_str("42").unwrap();
/// assert_eq!(key, RelatedKey::Integer(42));
///
/// let key: RelatedKey = serde_json::from_str("\"rust\"").unwrap();
/// assert_eq!(key.to_string(), "rust");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelatedKey {
	Integer(i64),
	Text(String),
}

impl fmt::Display for RelatedKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Integer(id) => write!(f, "{}", id),
			Self::Text(id) => f.write_str(id),
		}
	}
}

impl From<i64> for RelatedKey {
	fn from(id: i64) -> Self {
		Self::Integer(id)
	}
}

impl From<i32> for RelatedKey {
	fn from(id: i32) -> Self {
		Self::Integer(id.into())
	}
}

impl From<&str> for RelatedKey {
	fn from(id: &str) -> Self {
		Self::Text(id.to_string())
	}
}

impl From<String> for RelatedKey {
	fn from(id: String) -> Self {
		Self::Text(id)
	}
}
