//! In-memory ORM used by the integration tests
//!
//! Posts and tags share a pivot table guarded by a mutex. `Post::tags` is a
//! `BelongsToMany` relation, `Post::labels` a `MorphToMany` relation over the
//! same pivot rows, `Post::author` a `BelongsTo` relation.

#![allow(dead_code)]

use anyhow::{anyhow, bail};
use async_trait::async_trait;
use parking_lot::Mutex;
use reinhardt_relation_multiselect::{
	ParentEntity, RelatedEntity, RelatedKey, Relation, RelationKind, SyncChanges,
};
use rstest::fixture;
use serde_json::{Value, json};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Tag {
	pub id: i64,
	pub name: String,
	pub slug: String,
}

impl RelatedEntity for Tag {
	fn key(&self) -> RelatedKey {
		RelatedKey::Integer(self.id)
	}

	fn attribute(&self, name: &str) -> Option<Value> {
		match name {
			"id" => Some(json!(self.id)),
			"name" => Some(json!(self.name)),
			"slug" => Some(json!(self.slug)),
			_ => None,
		}
	}
}

#[derive(Debug, Default)]
pub struct Store {
	pub tags: BTreeMap<i64, Tag>,
	/// (post_id, tag_id) rows in insertion order
	pub post_tags: Vec<(i64, i64)>,
	pub sync_calls: usize,
	pub fail_members: bool,
}

impl Store {
	pub fn members_of(&self, post_id: i64) -> BTreeSet<i64> {
		self.post_tags
			.iter()
			.filter(|(post, _)| *post == post_id)
			.map(|(_, tag)| *tag)
			.collect()
	}
}

pub type SharedStore = Arc<Mutex<Store>>;

pub struct Post {
	pub id: Option<i64>,
	pub store: SharedStore,
}

impl Post {
	pub fn saved(id: i64, store: &SharedStore) -> Self {
		Self {
			id: Some(id),
			store: Arc::clone(store),
		}
	}

	pub fn unsaved(store: &SharedStore) -> Self {
		Self {
			id: None,
			store: Arc::clone(store),
		}
	}

	pub fn tag_ids(&self) -> BTreeSet<i64> {
		self.id
			.map(|id| self.store.lock().members_of(id))
			.unwrap_or_default()
	}
}

impl ParentEntity for Post {
	fn model_name(&self) -> &str {
		"Post"
	}

	fn relation_names() -> Vec<&'static str> {
		vec!["tags", "labels", "author"]
	}

	fn primary_key(&self) -> Option<RelatedKey> {
		self.id.map(RelatedKey::Integer)
	}

	fn relation(&self, name: &str) -> Option<Box<dyn Relation + '_>> {
		match name {
			"tags" => Some(Box::new(PostTags {
				post: self,
				kind: RelationKind::BelongsToMany,
			})),
			"labels" => Some(Box::new(PostTags {
				post: self,
				kind: RelationKind::MorphToMany,
			})),
			"author" => Some(Box::new(PostAuthor)),
			_ => None,
		}
	}
}

struct PostTags<'a> {
	post: &'a Post,
	kind: RelationKind,
}

#[async_trait]
impl Relation for PostTags<'_> {
	fn kind(&self) -> RelationKind {
		self.kind
	}

	async fn members(&self) -> anyhow::Result<Vec<Box<dyn RelatedEntity>>> {
		self.load()
	}

	async fn sync(&self, keys: &[RelatedKey]) -> anyhow::Result<SyncChanges> {
		self.reconcile(keys)
	}
}

impl PostTags<'_> {
	fn load(&self) -> anyhow::Result<Vec<Box<dyn RelatedEntity>>> {
		let store = self.post.store.lock();
		if store.fail_members {
			bail!("connection reset by peer");
		}
		let Some(post_id) = self.post.id else {
			return Ok(Vec::new());
		};
		Ok(store
			.post_tags
			.iter()
			.filter(|(post, _)| *post == post_id)
			.filter_map(|(_, tag)| store.tags.get(tag))
			.map(|tag| Box::new(tag.clone()) as Box<dyn RelatedEntity>)
			.collect())
	}

	fn reconcile(&self, keys: &[RelatedKey]) -> anyhow::Result<SyncChanges> {
		let post_id = self
			.post
			.id
			.ok_or_else(|| anyhow!("post has no primary key"))?;
		let mut store = self.post.store.lock();
		store.sync_calls += 1;

		let mut target = Vec::new();
		for key in keys {
			match key {
				RelatedKey::Integer(id) if store.tags.contains_key(id) => target.push(*id),
				other => bail!("FOREIGN KEY constraint failed: post_tags.tag_id = {}", other),
			}
		}

		let current = store.members_of(post_id);
		let wanted: BTreeSet<i64> = target.iter().copied().collect();
		let detached: Vec<i64> = current.difference(&wanted).copied().collect();
		let attached: Vec<i64> = target
			.iter()
			.copied()
			.filter(|id| !current.contains(id))
			.collect();

		store
			.post_tags
			.retain(|(post, tag)| *post != post_id || !detached.contains(tag));
		store
			.post_tags
			.extend(attached.iter().map(|tag| (post_id, *tag)));

		Ok(SyncChanges {
			attached: attached.into_iter().map(RelatedKey::Integer).collect(),
			detached: detached.into_iter().map(RelatedKey::Integer).collect(),
			updated: Vec::new(),
		})
	}
}

struct PostAuthor;

#[async_trait]
impl Relation for PostAuthor {
	fn kind(&self) -> RelationKind {
		RelationKind::BelongsTo
	}

	async fn members(&self) -> anyhow::Result<Vec<Box<dyn RelatedEntity>>> {
		Ok(Vec::new())
	}

	async fn sync(&self, _keys: &[RelatedKey]) -> anyhow::Result<SyncChanges> {
		bail!("BelongsTo relations have no pivot table")
	}
}

/// Store with tags 1..=5 and no pivot rows
#[fixture]
pub fn store() -> SharedStore {
	let names = ["rust", "web", "orm", "async", "admin"];
	let tags = names
		.iter()
		.enumerate()
		.map(|(i, name)| {
			let id = i as i64 + 1;
			(
				id,
				Tag {
					id,
					name: name.to_string(),
					slug: format!("{}-{}", name, id),
				},
			)
		})
		.collect();
	Arc::new(Mutex::new(Store {
		tags,
		..Default::default()
	}))
}

/// Attach `tag_ids` to `post_id` directly in the pivot table
pub fn attach(store: &SharedStore, post_id: i64, tag_ids: &[i64]) {
	let mut store = store.lock();
	store
		.post_tags
		.extend(tag_ids.iter().map(|tag| (post_id, *tag)));
}
