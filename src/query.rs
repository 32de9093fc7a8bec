//! Query-string codec for navigation URLs.
//!
//! Serializes nested query mappings with the bracket convention
//! (`filter[status]=done`, `ids[0]=3`) and keeps a small set of separator
//! characters human-readable in the address bar: after standard
//! percent-encoding, `%2A`, `%2F`, `%21` and `%2C` are rewritten back to
//! `*`, `/`, `!` and `,`.
//!
//! RelVal filter expressions lean on exactly those characters — wildcard
//! prepids (`prepid=*2024*`), dataset paths (`dataset=/RelValZMM/...`),
//! negated terms and comma lists — and a URL full of `%2F` escapes is not
//! something an operator can read or share.
//!
//! Both directions are pure and stateless. [`decode`] never fails:
//! malformed input degrades to the best mapping it can produce.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//!
//! let mut query = relval_pages::QueryMap::new();
//! query.insert("prepid".to_string(), json!("*CMSSW_14*"));
//! query.insert("workflows".to_string(), json!(["139.001", "139.002"]));
//!
//! let encoded = relval_pages::query::encode(&query);
//! assert_eq!(encoded, "?prepid=*CMSSW_14*&workflows%5B0%5D=139.001&workflows%5B1%5D=139.002");
//! assert_eq!(relval_pages::query::decode(&encoded), query);
//! ```

use serde_json::{Map, Value};

/// A query mapping: scalars, lists, or nested mappings under string keys.
pub type QueryMap = Map<String, Value>;

/// Percent-escapes rewritten back to their literal character after
/// encoding, applied in this order. Each search token is a three-byte
/// escape and each output a single character no later token contains, so
/// the rules cannot feed each other; the order still mirrors the
/// frontend's historical substitution chain exactly.
const PRESERVED: [(&str, char); 4] = [("%2A", '*'), ("%2F", '/'), ("%21", '!'), ("%2C", ',')];

/// Indices above this decode as string keys of a mapping rather than
/// list positions, so a stray `ids[999999]=x` cannot allocate a huge
/// null-padded list.
const LIST_INDEX_LIMIT: usize = 20;

/// Serializes a query mapping into a URL query string.
///
/// Nested mappings become bracketed keys (`a[b]=c`), lists become indexed
/// keys (`a[0]=x`), and every key and value is percent-encoded before the
/// [`PRESERVED`] substitutions run over the whole body. Returns the empty
/// string for an empty mapping, otherwise a `?`-prefixed body.
///
/// # Example
///
/// ```
/// use serde_json::json;
///
/// let mut query = relval_pages::QueryMap::new();
/// query.insert("dataset".to_string(), json!("/RelValZMM/std"));
/// assert_eq!(relval_pages::query::encode(&query), "?dataset=/RelValZMM/std");
///
/// assert_eq!(relval_pages::query::encode(&relval_pages::QueryMap::new()), "");
/// ```
pub fn encode(query: &QueryMap) -> String {
	let mut pairs: Vec<(String, String)> = Vec::new();
	for (key, value) in query {
		flatten(key.clone(), value, &mut pairs);
	}

	let body = pairs
		.iter()
		.map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
		.collect::<Vec<_>>()
		.join("&");

	let body = PRESERVED
		.iter()
		.fold(body, |acc, (escape, literal)| acc.replace(escape, &literal.to_string()));

	if body.is_empty() {
		String::new()
	} else {
		format!("?{}", body)
	}
}

/// Parses a query string back into a mapping.
///
/// Accepts input with or without the leading `?`. The inverse of the
/// bracket convention: `a[b]=c` nests, `a[0]=x` builds lists, duplicate
/// scalar keys promote to a list. Percent-escapes and literal `*`, `/`,
/// `!`, `,` decode identically, since the escaped forms collapse during
/// percent-decoding before any structure is read.
///
/// Never fails. Unbalanced brackets degrade to a literal flat key,
/// invalid percent-escapes pass their bytes through lossily, and a
/// scalar/container conflict keeps the container; each recovery logs a
/// warning and parsing continues with the next pair.
pub fn decode(input: &str) -> QueryMap {
	let mut root = QueryMap::new();
	let body = input.strip_prefix('?').unwrap_or(input);

	for pair in body.split('&') {
		if pair.is_empty() {
			continue;
		}
		let mut halves = pair.splitn(2, '=');
		let key = percent_decode(halves.next().unwrap_or(""));
		let value = percent_decode(halves.next().unwrap_or(""));

		let path = bracket_path(&key);
		let slot = root.entry(path[0].clone()).or_insert(Value::Null);
		insert_path(slot, &path[1..], value);
	}

	root
}

/// Percent-decodes one key or value, treating `+` as a space.
///
/// Invalid escape sequences are passed through as raw bytes and any
/// non-UTF-8 remainder is replaced, never rejected.
fn percent_decode(raw: &str) -> String {
	let raw = raw.replace('+', " ");
	String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()
}

/// Splits a decoded key into its bracket path: `a[b][0]` becomes
/// `["a", "b", "0"]`. Always returns at least one segment; a key whose
/// brackets do not parse is returned whole, as a literal flat key.
fn bracket_path(key: &str) -> Vec<String> {
	let Some(open) = key.find('[') else {
		return vec![key.to_string()];
	};
	if open == 0 {
		crate::warn_log!("query: key {:?} has no name before its brackets, keeping it literal", key);
		return vec![key.to_string()];
	}

	let mut path = vec![key[..open].to_string()];
	let mut rest = &key[open..];
	while !rest.is_empty() {
		let Some(segment) = rest.strip_prefix('[').and_then(|r| r.split_once(']')) else {
			crate::warn_log!("query: unbalanced brackets in key {:?}, keeping it literal", key);
			return vec![key.to_string()];
		};
		path.push(segment.0.to_string());
		rest = segment.1;
	}
	path
}

/// One step of a bracket path.
enum Segment<'a> {
	/// A mapping key.
	Key(&'a str),
	/// A list position.
	Index(usize),
	/// An empty `[]`, appending to the list.
	Append,
}

fn classify(segment: &str) -> Segment<'_> {
	if segment.is_empty() {
		return Segment::Append;
	}
	if segment.bytes().all(|b| b.is_ascii_digit()) {
		if let Ok(index) = segment.parse::<usize>() {
			if index <= LIST_INDEX_LIMIT {
				return Segment::Index(index);
			}
		}
	}
	Segment::Key(segment)
}

/// Writes `value` at `path` below `slot`, materializing intermediate
/// containers. Fresh slots arrive as `Null`; conflicting slots are
/// overwritten in favor of the container the path requires.
fn insert_path(slot: &mut Value, path: &[String], value: String) {
	let Some((segment, rest)) = path.split_first() else {
		merge_leaf(slot, value);
		return;
	};

	match classify(segment) {
		Segment::Key(key) => {
			if !slot.is_object() {
				if !slot.is_null() {
					crate::warn_log!("query: replacing scalar with mapping at {:?}", key);
				}
				*slot = Value::Object(Map::new());
			}
			if let Some(map) = slot.as_object_mut() {
				let child = map.entry(key.to_string()).or_insert(Value::Null);
				insert_path(child, rest, value);
			}
		}
		Segment::Index(index) => {
			insert_list(slot, Some(index), rest, value);
		}
		Segment::Append => {
			insert_list(slot, None, rest, value);
		}
	}
}

fn insert_list(slot: &mut Value, index: Option<usize>, rest: &[String], value: String) {
	if !slot.is_array() {
		if !slot.is_null() {
			crate::warn_log!("query: replacing scalar with list");
		}
		*slot = Value::Array(Vec::new());
	}
	if let Some(items) = slot.as_array_mut() {
		let index = index.unwrap_or(items.len());
		while items.len() <= index {
			items.push(Value::Null);
		}
		insert_path(&mut items[index], rest, value);
	}
}

/// Writes a scalar leaf. A repeated key promotes the existing scalar to a
/// list (`a=1&a=2` decodes as `a: ["1", "2"]`); a key that already holds
/// a mapping keeps the mapping and drops the scalar.
fn merge_leaf(slot: &mut Value, value: String) {
	match slot {
		Value::Null => *slot = Value::String(value),
		Value::Array(items) => items.push(Value::String(value)),
		Value::Object(_) => {
			crate::warn_log!("query: dropping scalar for key that already holds a mapping");
		}
		_ => {
			let first = slot.take();
			*slot = Value::Array(vec![first, Value::String(value)]);
		}
	}
}

/// Flattens one value into `(composite key, scalar)` pairs, depth first.
fn flatten(key: String, value: &Value, pairs: &mut Vec<(String, String)>) {
	match value {
		Value::Object(map) => {
			for (child, nested) in map {
				flatten(format!("{}[{}]", key, child), nested, pairs);
			}
		}
		Value::Array(items) => {
			for (index, nested) in items.iter().enumerate() {
				flatten(format!("{}[{}]", key, index), nested, pairs);
			}
		}
		scalar => pairs.push((key, scalar_text(scalar))),
	}
}

/// Renders a scalar the way it appears in a query value.
fn scalar_text(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		Value::Number(n) => n.to_string(),
		Value::Bool(b) => b.to_string(),
		Value::Null => String::new(),
		other => other.to_string(),
	}
}
