//! Host ORM capabilities consumed by the relation field
//!
//! The admin host implements these traits for its models. The field only ever
//! reads members through [`Relation::members`] and writes through
//! [`Relation::sync`]; it never creates or deletes related records.

use crate::error::{RelationFieldError, RelationFieldResult};
use crate::key::RelatedKey;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Shape of a relation returned by a parent accessor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
	/// Many-to-many through a pivot table
	BelongsToMany,
	/// Polymorphic many-to-many through a pivot table
	MorphToMany,
	HasOne,
	HasMany,
	BelongsTo,
	MorphMany,
}

impl RelationKind {
	/// Whether the relation stores membership in a pivot table
	pub fn is_many_to_many(self) -> bool {
		matches!(self, Self::BelongsToMany | Self::MorphToMany)
	}
}

impl fmt::Display for RelationKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::BelongsToMany => "BelongsToMany",
			Self::MorphToMany => "MorphToMany",
			Self::HasOne => "HasOne",
			Self::HasMany => "HasMany",
			Self::BelongsTo => "BelongsTo",
			Self::MorphMany => "MorphMany",
		};
		f.write_str(name)
	}
}

/// A record of the related collection
pub trait RelatedEntity: Send + Sync {
	/// Primary identifier
	fn key(&self) -> RelatedKey;

	/// Read an attribute by name
	fn attribute(&self, name: &str) -> Option<Value>;
}

/// Pivot changes reported by the host after a sync
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncChanges {
	pub attached: Vec<RelatedKey>,
	pub detached: Vec<RelatedKey>,
	pub updated: Vec<RelatedKey>,
}

impl SyncChanges {
	/// True when the sync did not touch any pivot row
	pub fn is_empty(&self) -> bool {
		self.attached.is_empty() && self.detached.is_empty() && self.updated.is_empty()
	}
}

/// Relation query object returned by a parent accessor
#[async_trait]
pub trait Relation: Send + Sync {
	/// Relation shape
	fn kind(&self) -> RelationKind;

	/// Current members, in the order the host returns them
	async fn members(&self) -> anyhow::Result<Vec<Box<dyn RelatedEntity>>>;

	/// Reconcile pivot rows to exactly `keys`
	///
	/// Missing keys are attached, extra rows detached, rows present in both
	/// are left untouched.
	async fn sync(&self, keys: &[RelatedKey]) -> anyhow::Result<SyncChanges>;
}

/// A parent model exposing named relation accessors
pub trait ParentEntity: Send + Sync {
	/// Model name used in error messages and logs
	fn model_name(&self) -> &str;

	/// Accessors this model type declares
	///
	/// Checked once when a field is bound to the model.
	fn relation_names() -> Vec<&'static str>
	where
		Self: Sized;

	/// Primary key, `None` until the parent has been persisted
	fn primary_key(&self) -> Option<RelatedKey>;

	/// Look up a relation accessor by name
	fn relation(&self, name: &str) -> Option<Box<dyn Relation + '_>>;
}

/// Look up `accessor` on `parent` and require a many-to-many shape
pub(crate) fn many_to_many<'a>(
	parent: &'a dyn ParentEntity,
	accessor: &str,
) -> RelationFieldResult<Box<dyn Relation + 'a>> {
	let relation = parent
		.relation(accessor)
		.ok_or_else(|| RelationFieldError::Configuration {
			model: parent.model_name().to_string(),
			accessor: accessor.to_string(),
		})?;

	let kind = relation.kind();
	if !kind.is_many_to_many() {
		return Err(RelationFieldError::UnsupportedRelation {
			accessor: accessor.to_string(),
			kind,
		});
	}

	Ok(relation)
}
