//! Selection values exchanged with the multi-select widget

use crate::error::{RelationFieldError, RelationFieldResult};
use crate::key::RelatedKey;
use crate::label::display_value;
use crate::relation::RelatedEntity;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};

/// One option of the widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionItem {
	pub key: RelatedKey,
	pub label: String,
}

impl SelectionItem {
	pub fn new(key: impl Into<RelatedKey>, label: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			label: label.into(),
		}
	}

	/// Build an item from a related entity, labelled by `form_label`
	///
	/// Entities without the attribute are labelled with their key.
	pub fn from_entity(entity: &dyn RelatedEntity, form_label: &str) -> Self {
		let key = entity.key();
		let label = match entity.attribute(form_label).as_ref().and_then(display_value) {
			Some(label) => label,
			None => {
				tracing::warn!(
					key = %key,
					attribute = form_label,
					"related entity has no label attribute, falling back to its key"
				);
				key.to_string()
			}
		};
		Self { key, label }
	}
}

/// Ordered members of a relation, as shown by the widget
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(Vec<SelectionItem>);

impl Selection {
	pub fn new(items: Vec<SelectionItem>) -> Self {
		Self(items)
	}

	/// Project related entities into selection items
	pub fn from_entities(entities: &[Box<dyn RelatedEntity>], form_label: &str) -> Self {
		Self(
			entities
				.iter()
				.map(|entity| SelectionItem::from_entity(entity.as_ref(), form_label))
				.collect(),
		)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &SelectionItem> {
		self.0.iter()
	}

	/// Keys in widget order
	pub fn keys(&self) -> Vec<RelatedKey> {
		self.0.iter().map(|item| item.key.clone()).collect()
	}

	/// Membership, ignoring order
	pub fn key_set(&self) -> BTreeSet<RelatedKey> {
		self.0.iter().map(|item| item.key.clone()).collect()
	}

	/// Encode as the JSON string the widget posts back
	pub fn to_payload(&self) -> String {
		// A Vec of plain structs always serializes
		serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
	}
}

impl IntoIterator for Selection {
	type Item = SelectionItem;
	type IntoIter = std::vec::IntoIter<SelectionItem>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl FromIterator<SelectionItem> for Selection {
	fn from_iter<I: IntoIterator<Item = SelectionItem>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

#[derive(Deserialize)]
struct SubmittedItem {
	key: RelatedKey,
}

/// Parse a posted selection into its keys
///
/// The payload is a JSON array of `{"key": .., "label": ..}` objects; labels
/// are ignored. `null` is the empty selection. Repeated keys keep their first
/// position.
///
/// # Examples
///
/// ```
/// use reinhardt_relation_multiselect::{RelatedKey, selection::parse_payload};
///
/// let keys = parse_payload(r#"[{"key":1,"label":"rust"},{"key":3}]"#).unwrap();
/// assert_eq!(keys, vec![RelatedKey::Integer(1), RelatedKey::Integer(3)]);
///
/// assert!(parse_payload("not-json").is_err());
/// ```
pub fn parse_payload(payload: &str) -> RelationFieldResult<Vec<RelatedKey>> {
	let items: Option<Vec<SubmittedItem>> = serde_json::from_str(payload)?;
	Ok(dedup_keys(items.unwrap_or_default()))
}

/// Same as [`parse_payload`] for an already decoded JSON value
pub fn parse_payload_value(payload: &Value) -> RelationFieldResult<Vec<RelatedKey>> {
	match payload {
		Value::String(encoded) => parse_payload(encoded),
		Value::Null | Value::Array(_) => {
			let items = Option::<Vec<SubmittedItem>>::deserialize(payload)?;
			Ok(dedup_keys(items.unwrap_or_default()))
		}
		other => Err(RelationFieldError::MalformedPayload(format!(
			"expected an array of selection items, got {}",
			other
		))),
	}
}

fn dedup_keys(items: Vec<SubmittedItem>) -> Vec<RelatedKey> {
	let mut seen = HashSet::new();
	items
		.into_iter()
		.map(|item| item.key)
		.filter(|key| seen.insert(key.clone()))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_selection_serializes_as_plain_array() {
		// Arrange
		let selection = Selection::new(vec![
			SelectionItem::new(1, "rust"),
			SelectionItem::new("web", "Web"),
		]);

		// Act
		let encoded = serde_json::to_value(&selection).unwrap();

		// Assert
		assert_eq!(
			encoded,
			json!([{"key": 1, "label": "rust"}, {"key": "web", "label": "Web"}])
		);
	}

	#[rstest]
	fn test_payload_round_trip_keeps_membership() {
		// Arrange
		let selection = Selection::new(vec![
			SelectionItem::new(2, "web"),
			SelectionItem::new(5, "orm"),
		]);

		// Act
		let keys = parse_payload(&selection.to_payload()).unwrap();

		// Assert
		assert_eq!(keys.into_iter().collect::<BTreeSet<_>>(), selection.key_set());
	}

	#[rstest]
	fn test_parse_ignores_labels() {
		// Act
		let keys = parse_payload(r#"[{"key":1,"label":"ignored"},{"key":"b","label":null}]"#).unwrap();

		// Assert
		assert_eq!(keys, vec![RelatedKey::from(1), RelatedKey::from("b")]);
	}

	#[rstest]
	fn test_parse_collapses_duplicates() {
		// Act
		let keys = parse_payload(r#"[{"key":3},{"key":1},{"key":3}]"#).unwrap();

		// Assert
		assert_eq!(keys, vec![RelatedKey::from(3), RelatedKey::from(1)]);
	}

	#[rstest]
	#[case("null")]
	#[case("[]")]
	fn test_parse_empty_selection(#[case] payload: &str) {
		// Act & Assert
		assert!(parse_payload(payload).unwrap().is_empty());
	}

	#[rstest]
	#[case("not-json")]
	#[case("")]
	#[case(r#"[{"label":"no key"}]"#)]
	#[case(r#"[1, 2]"#)]
	#[case(r#"{"key": 1}"#)]
	#[case(r#"[{"key": 1.5}]"#)]
	fn test_parse_rejects_malformed(#[case] payload: &str) {
		// Act
		let result = parse_payload(payload);

		// Assert
		assert!(matches!(result, Err(RelationFieldError::MalformedPayload(_))));
	}

	#[rstest]
	#[case(json!([{"key": 4}]), vec![RelatedKey::from(4)])]
	#[case(json!("[{\"key\": 4}]"), vec![RelatedKey::from(4)])]
	#[case(json!(null), vec![])]
	fn test_parse_decoded_value(#[case] payload: Value, #[case] expected: Vec<RelatedKey>) {
		// Act & Assert
		assert_eq!(parse_payload_value(&payload).unwrap(), expected);
	}

	#[rstest]
	fn test_parse_decoded_value_rejects_scalars() {
		// Act
		let result = parse_payload_value(&json!(42));

		// Assert
		assert!(matches!(result, Err(RelationFieldError::MalformedPayload(_))));
	}
}
