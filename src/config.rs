//! Declarative field configuration
//!
//! Lets admin settings declare relation fields in JSON or TOML. Custom label
//! functions cannot be written in a settings file; attach them to the built
//! field with [`RelationField::using_index_label`] and friends.
//!
//! [`RelationField::using_index_label`]: crate::RelationField::using_index_label

use serde::{Deserialize, Serialize};

/// Settings-file form of a [`RelationField`](crate::RelationField)
///
/// # Examples
///
/// ```
/// use reinhardt_relation_multiselect::{RelationField, RelationFieldConfig};
///
/// let config: RelationFieldConfig = serde_json::from_str(
///     r#"{"name": "Blog Tags", "detail_label": "name"}"#,
/// ).unwrap();
/// let field = RelationField::from_config(config);
///
/// assert_eq!(field.attribute(), "blog_tags");
/// assert_eq!(field.form_label(), "name");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelationFieldConfig {
	/// Human name shown by the admin
	pub name: String,
	/// Relation accessor; guessed from `name` when absent
	#[serde(default)]
	pub attribute: Option<String>,
	/// Admin resource of the related model; guessed from `name` when absent
	#[serde(default)]
	pub related_resource: Option<String>,
	/// Attribute joined for the index summary
	#[serde(default)]
	pub index_label: Option<String>,
	/// Attribute joined for the detail summary
	#[serde(default)]
	pub detail_label: Option<String>,
	/// Attribute used as each option's label
	#[serde(default)]
	pub form_label: Option<String>,
	#[serde(default)]
	pub help_text: Option<String>,
	#[serde(default)]
	pub required: bool,
	#[serde(default)]
	pub readonly: bool,
	#[serde(default)]
	pub nullable: bool,
	#[serde(default)]
	pub sortable: bool,
}

impl RelationFieldConfig {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Default::default()
		}
	}
}
