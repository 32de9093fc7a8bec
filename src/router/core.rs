//! Route table and URL resolution.
//!
//! The table is an ordered list of named routes. Declaration order is
//! match priority: the first pattern that matches wins, so more specific
//! paths must be declared before any shorter prefix that could shadow
//! them (`/tickets/edit` before `/tickets`).
//!
//! Resolution is pure. The router is immutable once built and holds no
//! state between calls; the host passes it wherever navigation is needed
//! instead of reaching for a process-wide singleton.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use super::history::{self, HistoryState, NavigationType};
use super::pattern::PathPattern;
use crate::query::{self, QueryMap};

/// Error type for router operations.
///
/// Every variant is an ordinary value the caller can react to; navigation
/// must never take the hosting application down.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// No route in the table matches the requested path.
	#[error("no route matches path: {0}")]
	NotFound(String),
	/// A URL was requested for a route name that is not in the table.
	#[error("unknown route name: {0}")]
	UnknownRouteName(String),
	/// A pattern placeholder had no value in the navigation target.
	#[error("missing parameter `{name}` for route `{route}`")]
	MissingParameter {
		/// The placeholder without a value.
		name: String,
		/// The route being reversed.
		route: String,
	},
	/// The history backend rejected the transition.
	#[error("navigation failed: {0}")]
	NavigationFailed(String),
}

/// A single route: a path pattern bound to a named view handle.
///
/// The view is opaque. The router associates it with a name and a path
/// and hands it back on a match; it never inspects or invokes it.
pub struct Route<V> {
	pattern: PathPattern,
	name: String,
	view: V,
}

impl<V> Route<V> {
	/// Creates a named route.
	pub fn new(name: impl Into<String>, pattern: &str, view: V) -> Self {
		Self {
			pattern: PathPattern::new(pattern),
			name: name.into(),
			view,
		}
	}

	/// Returns the route name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the compiled path pattern.
	pub fn pattern(&self) -> &PathPattern {
		&self.pattern
	}

	/// Returns the view handle bound to this route.
	pub fn view(&self) -> &V {
		&self.view
	}
}

impl<V> fmt::Debug for Route<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Route")
			.field("pattern", &self.pattern.as_str())
			.field("name", &self.name)
			.finish()
	}
}

/// A matched route with its extracted path parameters.
#[derive(Debug)]
pub struct RouteMatch<'r, V> {
	/// The matched route.
	pub route: &'r Route<V>,
	/// Extracted path parameters.
	pub params: HashMap<String, String>,
}

/// A fully resolved incoming URL: route, path parameters, decoded query.
#[derive(Debug)]
pub struct Resolution<'r, V> {
	/// The matched route.
	pub route: &'r Route<V>,
	/// Extracted path parameters.
	pub params: HashMap<String, String>,
	/// The decoded query mapping.
	pub query: QueryMap,
}

/// Where the application should be: a route name plus the parameters and
/// query needed to render the URL.
///
/// Built per navigation request and discarded once the URL is produced.
///
/// # Example
///
/// ```
/// use relval_pages::NavigationTarget;
///
/// let target = NavigationTarget::new("relvals")
/// 	.query_value("prepid", "*CMSSW_14*")
/// 	.query_value("status", "new");
/// assert_eq!(target.name(), "relvals");
/// ```
#[derive(Debug, Clone, Default)]
pub struct NavigationTarget {
	name: String,
	params: HashMap<String, String>,
	query: QueryMap,
}

impl NavigationTarget {
	/// Creates a target for the named route.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	/// Sets one path parameter.
	pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.insert(name.into(), value.into());
		self
	}

	/// Sets one query entry. Values may be scalars, lists, or mappings.
	pub fn query_value(
		mut self,
		key: impl Into<String>,
		value: impl Into<serde_json::Value>,
	) -> Self {
		self.query.insert(key.into(), value.into());
		self
	}

	/// Replaces the whole query mapping.
	pub fn with_query(mut self, query: QueryMap) -> Self {
		self.query = query;
		self
	}

	/// Returns the route name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the path parameters.
	pub fn params(&self) -> &HashMap<String, String> {
		&self.params
	}

	/// Returns the query mapping.
	pub fn query(&self) -> &QueryMap {
		&self.query
	}
}

/// The route table.
///
/// Built once at startup with the consuming-builder methods, then read
/// only. Lookup by path scans the table in declaration order; lookup by
/// name goes through an index.
pub struct Router<V> {
	base: String,
	routes: Vec<Route<V>>,
	named: HashMap<String, usize>,
	not_found: Option<V>,
}

impl<V> Default for Router<V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<V> fmt::Debug for Router<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Router")
			.field("base", &self.base)
			.field("routes_count", &self.routes.len())
			.field("named_routes", &self.named.keys().collect::<Vec<_>>())
			.finish()
	}
}

impl<V> Router<V> {
	/// Creates an empty router.
	pub fn new() -> Self {
		Self {
			base: String::new(),
			routes: Vec::new(),
			named: HashMap::new(),
			not_found: None,
		}
	}

	/// Sets the base path prefix prepended to every produced URL and
	/// stripped from every resolved one. A trailing slash is dropped so
	/// that joining never doubles it.
	pub fn with_base(mut self, base: impl Into<String>) -> Self {
		self.base = base.into().trim_end_matches('/').to_string();
		self
	}

	/// Registers a route.
	///
	/// # Panics
	///
	/// Panics when `name` is already registered. Route tables are built
	/// once at startup; a duplicate name is a configuration bug and must
	/// surface immediately, not resolve to the wrong route later.
	pub fn route(mut self, name: &str, pattern: &str, view: V) -> Self {
		assert!(
			!self.named.contains_key(name),
			"duplicate route name: {name}"
		);
		let index = self.routes.len();
		self.routes.push(Route::new(name, pattern, view));
		self.named.insert(name.to_string(), index);
		self
	}

	/// Registers the view shown when no route matches.
	pub fn not_found(mut self, view: V) -> Self {
		self.not_found = Some(view);
		self
	}

	/// Returns the registered not-found view, if any.
	pub fn not_found_view(&self) -> Option<&V> {
		self.not_found.as_ref()
	}

	/// Returns the base path prefix.
	pub fn base(&self) -> &str {
		&self.base
	}

	/// Returns the number of registered routes.
	pub fn route_count(&self) -> usize {
		self.routes.len()
	}

	/// Checks whether a route name exists.
	pub fn has_route(&self, name: &str) -> bool {
		self.named.contains_key(name)
	}

	/// Returns the first route in declaration order whose pattern
	/// matches `path`, with its extracted parameters.
	pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_, V>> {
		for route in &self.routes {
			if let Some(params) = route.pattern.matches(path) {
				return Some(RouteMatch { route, params });
			}
		}
		None
	}

	/// Resolves an incoming URL: strips the base prefix, matches the
	/// path, and decodes the query string.
	///
	/// An unmatched path yields [`RouterError::NotFound`]; rendering a
	/// not-found view from it is the caller's decision (see
	/// [`Router::view`]).
	pub fn resolve(&self, url: &str) -> Result<Resolution<'_, V>, RouterError> {
		let (path, query_str) = match url.split_once('?') {
			Some((path, query_str)) => (path, query_str),
			None => (url, ""),
		};
		let path = self.strip_base(path);

		let matched = self
			.match_path(path)
			.ok_or_else(|| RouterError::NotFound(path.to_string()))?;

		Ok(Resolution {
			route: matched.route,
			params: matched.params,
			query: query::decode(query_str),
		})
	}

	/// Renders the URL for a navigation target: base prefix, the named
	/// route's path with parameters substituted, then the encoded query.
	pub fn url_for(&self, target: &NavigationTarget) -> Result<String, RouterError> {
		let index = self
			.named
			.get(target.name())
			.ok_or_else(|| RouterError::UnknownRouteName(target.name().to_string()))?;
		let route = &self.routes[*index];

		let path = route.pattern.reverse(target.params()).ok_or_else(|| {
			let name = route
				.pattern
				.param_names()
				.iter()
				.find(|name| !target.params().contains_key(name.as_str()))
				.cloned()
				.unwrap_or_default();
			RouterError::MissingParameter {
				name,
				route: route.name.clone(),
			}
		})?;

		Ok(format!("{}{}{}", self.base, path, query::encode(target.query())))
	}

	/// Navigates to `target`, appending a history entry. Returns the URL
	/// that was stored.
	pub fn push(&self, target: &NavigationTarget) -> Result<String, RouterError> {
		self.navigate(target, NavigationType::Push)
	}

	/// Navigates to `target`, replacing the current history entry.
	/// Returns the URL that was stored.
	pub fn replace(&self, target: &NavigationTarget) -> Result<String, RouterError> {
		self.navigate(target, NavigationType::Replace)
	}

	fn navigate(
		&self,
		target: &NavigationTarget,
		nav_type: NavigationType,
	) -> Result<String, RouterError> {
		let url = self.url_for(target)?;

		let state = HistoryState::new(&url)
			.with_params(target.params().clone())
			.with_route_name(target.name());

		let result = match nav_type {
			NavigationType::Push => history::push_state(&state),
			NavigationType::Replace => history::replace_state(&state),
			NavigationType::Pop => Ok(()),
		};
		result.map_err(RouterError::NavigationFailed)?;

		crate::debug_log!("navigated to {}", url);
		Ok(url)
	}

	/// Returns the view for `path`: the matched route's view, or the
	/// registered not-found view when nothing matches.
	pub fn view(&self, path: &str) -> Option<&V> {
		match self.match_path(path) {
			Some(matched) => Some(matched.route.view()),
			None => self.not_found.as_ref(),
		}
	}

	fn strip_base<'a>(&self, path: &'a str) -> &'a str {
		if self.base.is_empty() {
			return path;
		}
		match path.strip_prefix(&self.base) {
			Some("") => "/",
			Some(rest) if rest.starts_with('/') => rest,
			_ => path,
		}
	}
}
