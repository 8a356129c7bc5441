//! The relation multi-select field

use crate::config::RelationFieldConfig;
use crate::error::{RelationFieldError, RelationFieldResult};
use crate::inflector::{guess_accessor, guess_resource};
use crate::label::{LabelContext, LabelPolicy};
use crate::pending::PendingSync;
use crate::relation::{ParentEntity, many_to_many};
use crate::selection::{Selection, parse_payload, parse_payload_value};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;

/// Widget component rendering this field
pub const COMPONENT: &str = "relation-multiselect";

/// Attribute used as option label unless configured otherwise
pub const DEFAULT_FORM_LABEL: &str = "name";

/// Admin field editing a many-to-many relation through a multi-select widget
///
/// A field is declared once, then used for a single read (`resolve`) or a
/// single write (`fill`/`validate_submission` followed by
/// [`PendingSync::apply`]).
///
/// # Examples
///
/// ```
/// use reinhardt_relation_multiselect::{LabelPolicy, RelationField};
///
/// let field = RelationField::new("Tags")
///     .using_index_label("name")
///     .using_detail_label(LabelPolicy::custom(|ctx| format!("{} tags", ctx.count())))
///     .using_form_label("title");
///
/// assert_eq!(field.attribute(), "tags");
/// assert_eq!(field.related_resource(), "Tag");
/// assert_eq!(field.form_label(), "title");
/// assert!(!field.is_resolved());
/// ```
#[derive(Debug, Clone)]
pub struct RelationField {
	name: String,
	attribute: String,
	related_resource: String,
	index_label: LabelPolicy,
	detail_label: LabelPolicy,
	form_label: String,
	help_text: Option<String>,
	required: bool,
	readonly: bool,
	nullable: bool,
	sortable: bool,
	value: Option<Selection>,
	value_for_index_display: Option<String>,
	value_for_detail_display: Option<String>,
}

impl RelationField {
	/// Declare a field, guessing the accessor and related resource from `name`
	pub fn new(name: impl Into<String>) -> Self {
		let name = name.into();
		let attribute = guess_accessor(&name);
		Self::with_attribute(name, attribute)
	}

	/// Declare a field with an explicit relation accessor
	pub fn with_attribute(name: impl Into<String>, attribute: impl Into<String>) -> Self {
		let name = name.into();
		Self {
			related_resource: guess_resource(&name),
			name,
			attribute: attribute.into(),
			index_label: LabelPolicy::Default,
			detail_label: LabelPolicy::Default,
			form_label: DEFAULT_FORM_LABEL.to_string(),
			help_text: None,
			required: false,
			readonly: false,
			nullable: false,
			sortable: false,
			value: None,
			value_for_index_display: None,
			value_for_detail_display: None,
		}
	}

	/// Build a field from its settings-file declaration
	pub fn from_config(config: RelationFieldConfig) -> Self {
		let mut field = match config.attribute {
			Some(attribute) => Self::with_attribute(config.name, attribute),
			None => Self::new(config.name),
		};
		if let Some(resource) = config.related_resource {
			field.related_resource = resource;
		}
		if let Some(attribute) = config.index_label {
			field.index_label = LabelPolicy::Attribute(attribute);
		}
		if let Some(attribute) = config.detail_label {
			field.detail_label = LabelPolicy::Attribute(attribute);
		}
		if let Some(attribute) = config.form_label {
			field.form_label = attribute;
		}
		field.help_text = config.help_text;
		field.required = config.required;
		field.readonly = config.readonly;
		field.nullable = config.nullable;
		field.sortable = config.sortable;
		field
	}

	pub fn with_related_resource(mut self, resource: impl Into<String>) -> Self {
		self.related_resource = resource.into();
		self
	}

	/// Summary shown in list views
	pub fn using_index_label(mut self, policy: impl Into<LabelPolicy>) -> Self {
		self.index_label = policy.into();
		self
	}

	/// Summary shown in detail views
	pub fn using_detail_label(mut self, policy: impl Into<LabelPolicy>) -> Self {
		self.detail_label = policy.into();
		self
	}

	/// Attribute shown as each option's label in the edit widget
	pub fn using_form_label(mut self, attribute: impl Into<String>) -> Self {
		self.form_label = attribute.into();
		self
	}

	pub fn with_help_text(mut self, text: impl Into<String>) -> Self {
		self.help_text = Some(text.into());
		self
	}

	pub fn required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}

	pub fn readonly(mut self, readonly: bool) -> Self {
		self.readonly = readonly;
		self
	}

	pub fn nullable(mut self, nullable: bool) -> Self {
		self.nullable = nullable;
		self
	}

	pub fn sortable(mut self, sortable: bool) -> Self {
		self.sortable = sortable;
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Relation accessor on the parent entity
	pub fn attribute(&self) -> &str {
		&self.attribute
	}

	pub fn related_resource(&self) -> &str {
		&self.related_resource
	}

	pub fn index_label(&self) -> &LabelPolicy {
		&self.index_label
	}

	pub fn detail_label(&self) -> &LabelPolicy {
		&self.detail_label
	}

	pub fn form_label(&self) -> &str {
		&self.form_label
	}

	pub fn help_text(&self) -> Option<&str> {
		self.help_text.as_deref()
	}

	pub fn is_required(&self) -> bool {
		self.required
	}

	pub fn is_readonly(&self) -> bool {
		self.readonly
	}

	/// Selection built by the last successful [`resolve`](Self::resolve)
	pub fn value(&self) -> Option<&Selection> {
		self.value.as_ref()
	}

	pub fn value_for_index_display(&self) -> Option<&str> {
		self.value_for_index_display.as_deref()
	}

	pub fn value_for_detail_display(&self) -> Option<&str> {
		self.value_for_detail_display.as_deref()
	}

	pub fn is_resolved(&self) -> bool {
		self.value.is_some()
	}

	/// Check once, when the field is bound to a model type, that the model
	/// declares the configured accessor
	pub fn validate_for<P: ParentEntity>(&self) -> RelationFieldResult<()> {
		if P::relation_names().contains(&self.attribute.as_str()) {
			return Ok(());
		}
		let type_name = std::any::type_name::<P>();
		Err(RelationFieldError::Configuration {
			model: type_name.rsplit("::").next().unwrap_or(type_name).to_string(),
			accessor: self.attribute.clone(),
		})
	}

	/// Load the relation's members and populate the value and summaries
	///
	/// On error the field stays unresolved.
	pub async fn resolve(&mut self, parent: &dyn ParentEntity) -> RelationFieldResult<()> {
		self.value = None;
		self.value_for_index_display = None;
		self.value_for_detail_display = None;

		let relation = many_to_many(parent, &self.attribute)?;
		let members = relation
			.members()
			.await
			.map_err(|e| RelationFieldError::sync(&self.attribute, e))?;

		let ctx = LabelContext {
			field_name: &self.name,
			members: &members,
			parent,
		};
		let index_display = self.index_label.render(&ctx);
		let detail_display = self.detail_label.render(&ctx);
		let selection = Selection::from_entities(&members, &self.form_label);

		tracing::debug!(
			model = parent.model_name(),
			accessor = %self.attribute,
			members = selection.len(),
			"resolved relation field"
		);

		self.value = Some(selection);
		self.value_for_index_display = Some(index_display);
		self.value_for_detail_display = Some(detail_display);
		Ok(())
	}

	/// Validate a posted selection and defer the pivot write
	pub fn validate_submission(&self, payload: &str) -> RelationFieldResult<PendingSync> {
		let keys = parse_payload(payload)?;
		Ok(PendingSync::new(self.attribute.clone(), keys))
	}

	/// Read this field's entry from posted form data
	///
	/// Returns `Ok(None)` when the field is read-only or was not posted, in
	/// which case the relation must not be touched.
	pub fn fill(&self, data: &HashMap<String, Value>) -> RelationFieldResult<Option<PendingSync>> {
		if self.readonly {
			tracing::debug!(accessor = %self.attribute, "skipping read-only relation field");
			return Ok(None);
		}
		let Some(payload) = data.get(&self.attribute) else {
			return Ok(None);
		};
		let keys = parse_payload_value(payload)?;
		Ok(Some(PendingSync::new(self.attribute.clone(), keys)))
	}

	/// Serialized form consumed by the widget
	pub fn to_json(&self) -> Value {
		serde_json::to_value(self).unwrap_or(Value::Null)
	}
}

#[derive(Serialize)]
struct FieldRepr<'a> {
	component: &'static str,
	name: &'a str,
	attribute: &'a str,
	related_resource: &'a str,
	help_text: Option<&'a str>,
	required: bool,
	readonly: bool,
	nullable: bool,
	sortable: bool,
	relationship_name: &'a str,
	value_for_index_display: Option<&'a str>,
	value_for_detail_display: Option<&'a str>,
	value: Option<&'a Selection>,
}

impl Serialize for RelationField {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		FieldRepr {
			component: COMPONENT,
			name: &self.name,
			attribute: &self.attribute,
			related_resource: &self.related_resource,
			help_text: self.help_text.as_deref(),
			required: self.required,
			readonly: self.readonly,
			nullable: self.nullable,
			sortable: self.sortable,
			relationship_name: &self.attribute,
			value_for_index_display: self.value_for_index_display.as_deref(),
			value_for_detail_display: self.value_for_detail_display.as_deref(),
			value: self.value.as_ref(),
		}
		.serialize(serializer)
	}
}
