//! Path patterns for the route table.

use regex::Regex;
use std::collections::HashMap;

/// A compiled URL path pattern.
///
/// Patterns are literal paths with optional `{name}` placeholders, e.g.
/// `/relvals/{prepid}`. Matching is exact: a pattern without placeholders
/// matches only its own literal path, and a prefix never matches a longer
/// path.
///
/// # Example
///
/// ```
/// use relval_pages::PathPattern;
///
/// let pattern = PathPattern::new("/relvals/{prepid}");
/// let params = pattern.matches("/relvals/CMSSW_14_0_0-139.001").unwrap();
/// assert_eq!(params["prepid"], "CMSSW_14_0_0-139.001");
/// assert!(pattern.matches("/relvals").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PathPattern {
	raw: String,
	regex: Option<Regex>,
	param_names: Vec<String>,
}

impl PathPattern {
	/// Compiles a pattern.
	///
	/// Placeholders match one non-empty path segment (`[^/]+`); all other
	/// text is taken literally. An unbalanced `{` is treated as literal
	/// text rather than rejected.
	pub fn new(pattern: &str) -> Self {
		let mut source = String::from("^");
		let mut param_names = Vec::new();
		let mut rest = pattern;

		while let Some(open) = rest.find('{') {
			let after = &rest[open + 1..];
			let Some(close) = after.find('}') else {
				break;
			};
			source.push_str(&regex::escape(&rest[..open]));
			source.push_str("([^/]+)");
			param_names.push(after[..close].to_string());
			rest = &after[close + 1..];
		}
		source.push_str(&regex::escape(rest));
		source.push('$');

		Self {
			raw: pattern.to_string(),
			regex: Regex::new(&source).ok(),
			param_names,
		}
	}

	/// Returns the pattern as declared.
	pub fn as_str(&self) -> &str {
		&self.raw
	}

	/// Returns the placeholder names, in pattern order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Matches a path against this pattern, extracting placeholder values.
	///
	/// Returns `None` when the path does not match; the map is empty for
	/// patterns without placeholders.
	pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
		let Some(regex) = &self.regex else {
			// Pattern failed to compile; fall back to literal comparison.
			return (self.raw == path).then(HashMap::new);
		};

		let captures = regex.captures(path)?;
		let mut params = HashMap::new();
		for (name, capture) in self.param_names.iter().zip(captures.iter().skip(1)) {
			if let Some(capture) = capture {
				params.insert(name.clone(), capture.as_str().to_string());
			}
		}
		Some(params)
	}

	/// Substitutes placeholder values back into the pattern.
	///
	/// Returns `None` when a placeholder has no value in `params`; extra
	/// entries in `params` are ignored.
	pub fn reverse(&self, params: &HashMap<String, String>) -> Option<String> {
		let mut path = String::new();
		let mut rest = self.raw.as_str();

		while let Some(open) = rest.find('{') {
			let after = &rest[open + 1..];
			let Some(close) = after.find('}') else {
				break;
			};
			path.push_str(&rest[..open]);
			path.push_str(params.get(&after[..close])?);
			rest = &after[close + 1..];
		}
		path.push_str(rest);
		Some(path)
	}
}
