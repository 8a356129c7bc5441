//! Error types for the relation multi-select field

use thiserror::Error;

/// Relation field error type
#[derive(Debug, Error)]
pub enum RelationFieldError {
	/// The parent model does not expose the configured relation accessor
	#[error("{model}::{accessor}() must be a configured relational method")]
	Configuration {
		/// Parent model name
		model: String,
		/// Configured accessor name
		accessor: String,
	},

	/// The accessor yields a relation that is not many-to-many
	#[error("Relation '{accessor}' is {kind}; only BelongsToMany and MorphToMany are supported")]
	UnsupportedRelation {
		/// Configured accessor name
		accessor: String,
		/// Kind reported by the relation
		kind: crate::relation::RelationKind,
	},

	/// Submitted payload could not be parsed into a key list
	#[error("Malformed selection payload: {0}")]
	MalformedPayload(String),

	/// Pending sync applied to a parent without a primary key
	#[error("{model} must be saved before '{accessor}' can be synced")]
	UnsavedParent {
		/// Parent model name
		model: String,
		/// Configured accessor name
		accessor: String,
	},

	/// Failure reported by the host ORM, passed through unmodified
	#[error("Relation '{accessor}' failed in the host ORM: {source}")]
	Sync {
		/// Configured accessor name
		accessor: String,
		/// Underlying persistence failure
		#[source]
		source: anyhow::Error,
	},
}

impl RelationFieldError {
	pub(crate) fn sync(accessor: impl Into<String>, source: anyhow::Error) -> Self {
		Self::Sync {
			accessor: accessor.into(),
			source,
		}
	}
}

impl From<serde_json::Error> for RelationFieldError {
	fn from(err: serde_json::Error) -> Self {
		Self::MalformedPayload(err.to_string())
	}
}

/// Result type for relation field operations
pub type RelationFieldResult<T> = Result<T, RelationFieldError>;
