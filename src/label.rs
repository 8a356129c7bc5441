//! Index and detail label policies
//!
//! A field's summary in list and detail views is produced by a
//! [`LabelPolicy`], fixed when the field is declared.

use crate::inflector::pluralize_for_count;
use crate::relation::{ParentEntity, RelatedEntity};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Everything a label policy may look at while a field resolves
pub struct LabelContext<'a> {
	/// Human name of the field
	pub field_name: &'a str,
	/// Members of the relation, as returned by the host
	pub members: &'a [Box<dyn RelatedEntity>],
	/// Parent entity being resolved
	pub parent: &'a dyn ParentEntity,
}

impl LabelContext<'_> {
	pub fn count(&self) -> usize {
		self.members.len()
	}

	/// Display strings of `attribute` across all members, skipping members
	/// that do not carry it
	pub fn pluck(&self, attribute: &str) -> Vec<String> {
		self.members
			.iter()
			.filter_map(|member| member.attribute(attribute))
			.filter_map(|value| display_value(&value))
			.collect()
	}
}

/// Signature of a custom label function
pub type LabelFn = dyn Fn(&LabelContext<'_>) -> String + Send + Sync;

/// How a field summarizes its members
///
/// # Examples
///
/// ```
/// use reinhardt_relation_multiselect::LabelPolicy;
///
/// assert!(matches!(LabelPolicy::default(), LabelPolicy::Default));
/// assert!(matches!(LabelPolicy::from("name"), LabelPolicy::Attribute(ref a) if a == "name"));
///
/// let custom = LabelPolicy::custom(|ctx| format!("{} selected", ctx.count()));
/// assert!(matches!(custom, LabelPolicy::Custom(_)));
/// ```
#[derive(Clone, Default)]
pub enum LabelPolicy {
	/// `"<count> <noun>"`, with the noun agreeing with the count
	#[default]
	Default,
	/// Join the named attribute of every member with `", "`
	Attribute(String),
	/// Caller supplied function
	Custom(Arc<LabelFn>),
}

impl LabelPolicy {
	pub fn attribute(name: impl Into<String>) -> Self {
		Self::Attribute(name.into())
	}

	pub fn custom<F>(f: F) -> Self
	where
		F: Fn(&LabelContext<'_>) -> String + Send + Sync + 'static,
	{
		Self::Custom(Arc::new(f))
	}

	/// Render the summary for `ctx`
	pub fn render(&self, ctx: &LabelContext<'_>) -> String {
		match self {
			Self::Default => {
				let count = ctx.count();
				format!("{} {}", count, pluralize_for_count(ctx.field_name, count))
			}
			Self::Attribute(attribute) => ctx.pluck(attribute).join(", "),
			Self::Custom(f) => f(ctx),
		}
	}
}

impl fmt::Debug for LabelPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Default => f.write_str("Default"),
			Self::Attribute(attribute) => f.debug_tuple("Attribute").field(attribute).finish(),
			Self::Custom(_) => f.write_str("Custom(<fn>)"),
		}
	}
}

impl From<&str> for LabelPolicy {
	fn from(attribute: &str) -> Self {
		Self::Attribute(attribute.to_string())
	}
}

impl From<String> for LabelPolicy {
	fn from(attribute: String) -> Self {
		Self::Attribute(attribute)
	}
}

/// Text shown for an attribute value; `None` for null
pub(crate) fn display_value(value: &Value) -> Option<String> {
	match value {
		Value::Null => None,
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		other => Some(other.to_string()),
	}
}
