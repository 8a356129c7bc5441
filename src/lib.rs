//! # reinhardt-relation-multiselect
//!
//! Admin field that edits a many-to-many relation through a checkbox/token
//! multi-select widget.
//!
//! The field works in two directions:
//!
//! - **Read**: [`RelationField::resolve`] loads the relation's members and
//!   produces a [`Selection`] of `{key, label}` items for the widget plus
//!   index and detail summaries for list and detail views.
//! - **Write**: [`RelationField::fill`] (or
//!   [`RelationField::validate_submission`]) parses the posted keys into a
//!   [`PendingSync`], which the host applies with [`PendingSync::apply`] once
//!   the parent has been saved.
//!
//! The host ORM plugs in through [`ParentEntity`], [`Relation`] and
//! [`RelatedEntity`]. Only `BelongsToMany` and `MorphToMany` relations are
//! accepted.
//!
//! ## Examples
//!
//! ```
//! use reinhardt_relation_multiselect::RelationField;
//!
//! let field = RelationField::new("Tags").using_index_label("name");
//! let pending = field.validate_submission(r#"[{"key":1},{"key":3}]"#).unwrap();
//!
//! assert_eq!(pending.accessor(), "tags");
//! assert_eq!(pending.keys().len(), 2);
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod inflector;
pub mod key;
pub mod label;
pub mod pending;
pub mod relation;
pub mod selection;

pub use config::RelationFieldConfig;
pub use error::{RelationFieldError, RelationFieldResult};
pub use field::{COMPONENT, DEFAULT_FORM_LABEL, RelationField};
pub use key::RelatedKey;
pub use label::{LabelContext, LabelFn, LabelPolicy};
pub use pending::PendingSync;
pub use relation::{ParentEntity, RelatedEntity, Relation, RelationKind, SyncChanges};
pub use selection::{Selection, SelectionItem};
