//! Deferred pivot synchronization
//!
//! A submission is validated as soon as the request is processed, but the
//! pivot rows can only be written once the parent has a primary key. The
//! validated keys travel in a [`PendingSync`] until the host has saved the
//! parent and calls [`PendingSync::apply`].

use crate::error::{RelationFieldError, RelationFieldResult};
use crate::key::RelatedKey;
use crate::relation::{ParentEntity, SyncChanges, many_to_many};

/// Validated submission waiting for its parent to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending sync does nothing until it is applied"]
pub struct PendingSync {
	accessor: String,
	keys: Vec<RelatedKey>,
}

impl PendingSync {
	pub(crate) fn new(accessor: impl Into<String>, keys: Vec<RelatedKey>) -> Self {
		Self {
			accessor: accessor.into(),
			keys,
		}
	}

	/// Relation accessor the keys will be synced onto
	pub fn accessor(&self) -> &str {
		&self.accessor
	}

	/// Target membership, in submission order
	pub fn keys(&self) -> &[RelatedKey] {
		&self.keys
	}

	/// Reconcile the parent's pivot rows to the submitted keys
	///
	/// # Errors
	///
	/// - [`RelationFieldError::UnsavedParent`] if `parent` has no primary key yet
	/// - [`RelationFieldError::Configuration`] if the accessor is missing
	/// - [`RelationFieldError::UnsupportedRelation`] if it is not many-to-many
	/// - [`RelationFieldError::Sync`] carrying the host's failure unchanged
	pub async fn apply(self, parent: &dyn ParentEntity) -> RelationFieldResult<SyncChanges> {
		let Some(parent_key) = parent.primary_key() else {
			return Err(RelationFieldError::UnsavedParent {
				model: parent.model_name().to_string(),
				accessor: self.accessor,
			});
		};

		let relation = many_to_many(parent, &self.accessor)?;

		tracing::debug!(
			model = parent.model_name(),
			parent = %parent_key,
			accessor = %self.accessor,
			keys = self.keys.len(),
			"syncing relation"
		);

		let changes = relation
			.sync(&self.keys)
			.await
			.map_err(|e| RelationFieldError::sync(&self.accessor, e))?;

		tracing::debug!(
			model = parent.model_name(),
			parent = %parent_key,
			accessor = %self.accessor,
			attached = changes.attached.len(),
			detached = changes.detached.len(),
			updated = changes.updated.len(),
			"relation synced"
		);

		Ok(changes)
	}
}
