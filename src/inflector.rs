//! English noun inflection and name guessing for field declarations
//!
//! Only the last word of a phrase is inflected, so `"Blog Tags"` becomes
//! `"Blog Tag"`. The rules cover the nouns that commonly name admin
//! resources; anything unknown falls back to adding or removing a trailing `s`.

use convert_case::{Case, Casing};

const UNCOUNTABLE: &[&str] = &[
	"data",
	"equipment",
	"feedback",
	"fish",
	"information",
	"metadata",
	"news",
	"series",
	"sheep",
	"species",
];

/// (singular, plural) pairs that the suffix rules get wrong
const IRREGULAR: &[(&str, &str)] = &[
	("bus", "buses"),
	("campus", "campuses"),
	("child", "children"),
	("cookie", "cookies"),
	("knife", "knives"),
	("life", "lives"),
	("movie", "movies"),
	("status", "statuses"),
	("virus", "viruses"),
	("wife", "wives"),
	("person", "people"),
	("man", "men"),
	("woman", "women"),
	("mouse", "mice"),
	("goose", "geese"),
	("tooth", "teeth"),
	("foot", "feet"),
	("quiz", "quizzes"),
	("hero", "heroes"),
	("potato", "potatoes"),
	("tomato", "tomatoes"),
	("echo", "echoes"),
	("shoe", "shoes"),
	("canoe", "canoes"),
	("criterion", "criteria"),
	("cactus", "cacti"),
];

/// Singular form of the last word of `phrase`
///
/// # Examples
///
/// ```
/// use reinhardt_relation_multiselect::inflector::singularize;
///
/// assert_eq!(singularize("Tags"), "Tag");
/// assert_eq!(singularize("Categories"), "Category");
/// assert_eq!(singularize("Blog People"), "Blog Person");
/// ```
pub fn singularize(phrase: &str) -> String {
	inflect_last_word(phrase, singularize_word)
}

/// Plural form of the last word of `phrase`
///
/// # Examples
///
/// ```
/// use reinhardt_relation_multiselect::inflector::pluralize;
///
/// assert_eq!(pluralize("Tag"), "Tags");
/// assert_eq!(pluralize("Category"), "Categories");
/// assert_eq!(pluralize("Address"), "Addresses");
/// ```
pub fn pluralize(phrase: &str) -> String {
	inflect_last_word(phrase, pluralize_word)
}

/// Noun agreeing with `count`: singular for exactly one, plural otherwise
pub fn pluralize_for_count(phrase: &str, count: usize) -> String {
	let singular = singularize(phrase);
	if count == 1 {
		singular
	} else {
		pluralize(&singular)
	}
}

/// Default relation accessor for a field's human name
///
/// ```
/// use reinhardt_relation_multiselect::inflector::guess_accessor;
///
/// assert_eq!(guess_accessor("Tags"), "tags");
/// assert_eq!(guess_accessor("Blog Tags"), "blog_tags");
/// ```
pub fn guess_accessor(name: &str) -> String {
	name.to_case(Case::Snake)
}

/// Default admin resource name of the related model
///
/// ```
/// use reinhardt_relation_multiselect::inflector::guess_resource;
///
/// assert_eq!(guess_resource("Blog Tags"), "BlogTag");
/// ```
pub fn guess_resource(name: &str) -> String {
	singularize(name).to_case(Case::Pascal)
}

fn inflect_last_word(phrase: &str, inflect: fn(&str) -> String) -> String {
	let trimmed = phrase.trim_end();
	match trimmed.rfind(char::is_whitespace) {
		Some(idx) => {
			let (head, word) = trimmed.split_at(idx + 1);
			format!("{}{}", head, inflect(word))
		}
		None => inflect(trimmed),
	}
}

fn singularize_word(word: &str) -> String {
	let lower = word.to_lowercase();
	if word.is_empty() || UNCOUNTABLE.contains(&lower.as_str()) {
		return word.to_string();
	}
	if let Some((singular, _)) = IRREGULAR.iter().find(|(_, plural)| *plural == lower) {
		return match_case(word, singular);
	}

	if lower.ends_with("ies") && lower.len() > 3 {
		return replace_suffix(word, 3, "y");
	}
	if lower.ends_with("lves") {
		return replace_suffix(word, 3, "f");
	}
	if ["sses", "shes", "ches", "xes"]
		.iter()
		.any(|suffix| lower.ends_with(suffix))
	{
		return replace_suffix(word, 2, "");
	}
	if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
		return word.to_string();
	}
	if lower.ends_with('s') {
		return replace_suffix(word, 1, "");
	}

	word.to_string()
}

fn pluralize_word(word: &str) -> String {
	let lower = word.to_lowercase();
	if word.is_empty() || UNCOUNTABLE.contains(&lower.as_str()) {
		return word.to_string();
	}
	if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
		return match_case(word, plural);
	}
	// Already plural irregulars stay put
	if IRREGULAR.iter().any(|(_, plural)| *plural == lower) {
		return word.to_string();
	}

	if ["s", "sh", "ch", "x", "z"]
		.iter()
		.any(|suffix| lower.ends_with(suffix))
	{
		return append_suffix(word, "es");
	}
	if lower.ends_with('y') && !ends_with_vowel_then(&lower, 'y') {
		return replace_suffix(word, 1, "ies");
	}
	if lower.ends_with("lf") {
		return replace_suffix(word, 1, "ves");
	}

	append_suffix(word, "s")
}

fn ends_with_vowel_then(lower: &str, last: char) -> bool {
	let mut chars = lower.chars().rev();
	chars.next() == Some(last) && chars.next().is_some_and(|c| "aeiou".contains(c))
}

fn is_shouting(word: &str) -> bool {
	word.chars().count() > 1
		&& word.chars().any(char::is_alphabetic)
		&& !word.chars().any(char::is_lowercase)
}

fn replace_suffix(word: &str, strip_chars: usize, suffix: &str) -> String {
	let keep = word.chars().count().saturating_sub(strip_chars);
	let stem: String = word.chars().take(keep).collect();
	if is_shouting(word) {
		format!("{}{}", stem, suffix.to_uppercase())
	} else {
		format!("{}{}", stem, suffix)
	}
}

fn append_suffix(word: &str, suffix: &str) -> String {
	if is_shouting(word) {
		format!("{}{}", word, suffix.to_uppercase())
	} else {
		format!("{}{}", word, suffix)
	}
}

fn match_case(original: &str, replacement: &str) -> String {
	if is_shouting(original) {
		return replacement.to_uppercase();
	}
	let mut chars = original.chars();
	match chars.next() {
		Some(first) if first.is_uppercase() => {
			let mut rest = replacement.chars();
			rest.next()
				.map(|c| c.to_uppercase().chain(rest).collect())
				.unwrap_or_default()
		}
		_ => replacement.to_string(),
	}
}
