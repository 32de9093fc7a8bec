//! Browser history integration.
//!
//! On `wasm32` targets these functions drive the History API through
//! `web-sys`; everywhere else (SSR, tests) they are no-ops that report
//! success, so navigation stays exercisable off-browser.
//!
//! The router owns no history state itself: it renders a URL, hands it to
//! this module, and the browser (or nothing, natively) stores it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The kind of history transition a navigation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationType {
	/// Append a new history entry.
	Push,
	/// Replace the current entry in place.
	Replace,
	/// A back/forward traversal reported by the browser.
	Pop,
}

/// The state object stored with each history entry.
///
/// Serialized into the entry so that a back/forward traversal can restore
/// the matched route without re-running resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryState {
	/// The full application URL, query string included.
	pub path: String,
	/// Path parameters extracted for the matched route.
	#[serde(default)]
	pub params: HashMap<String, String>,
	/// Name of the matched route, empty when unmatched.
	#[serde(default)]
	pub route_name: String,
}

impl HistoryState {
	/// Creates a state record for `path`.
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			..Self::default()
		}
	}

	/// Attaches extracted path parameters.
	pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
		self.params = params;
		self
	}

	/// Attaches the matched route name.
	pub fn with_route_name(mut self, name: impl Into<String>) -> Self {
		self.route_name = name.into();
		self
	}
}

/// Returns the browser's current path plus query string.
#[cfg(target_arch = "wasm32")]
pub fn current_path() -> Result<String, String> {
	let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
	let location = window.location();
	let path = location
		.pathname()
		.map_err(|_| "pathname unavailable".to_string())?;
	let search = location.search().unwrap_or_default();
	Ok(format!("{}{}", path, search))
}

/// Returns the browser's current path plus query string.
///
/// There is no browser outside `wasm32`; callers fall back to `/`.
#[cfg(not(target_arch = "wasm32"))]
pub fn current_path() -> Result<String, String> {
	Err("no browser history outside wasm32".to_string())
}

/// Appends a history entry for `state`.
#[cfg(target_arch = "wasm32")]
pub fn push_state(state: &HistoryState) -> Result<(), String> {
	apply_state(state, NavigationType::Push)
}

/// Replaces the current history entry with `state`.
#[cfg(target_arch = "wasm32")]
pub fn replace_state(state: &HistoryState) -> Result<(), String> {
	apply_state(state, NavigationType::Replace)
}

#[cfg(target_arch = "wasm32")]
fn apply_state(state: &HistoryState, nav_type: NavigationType) -> Result<(), String> {
	let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
	let history = window
		.history()
		.map_err(|_| "history unavailable".to_string())?;

	let json = serde_json::to_string(state).map_err(|e| e.to_string())?;
	let value =
		js_sys::JSON::parse(&json).map_err(|_| "state not representable as JS".to_string())?;

	let result = match nav_type {
		NavigationType::Push => history.push_state_with_url(&value, "", Some(&state.path)),
		NavigationType::Replace => history.replace_state_with_url(&value, "", Some(&state.path)),
		NavigationType::Pop => Ok(()),
	};
	result.map_err(|_| "history rejected the transition".to_string())
}

/// Appends a history entry for `state` (native no-op).
#[cfg(not(target_arch = "wasm32"))]
pub fn push_state(state: &HistoryState) -> Result<(), String> {
	tracing::debug!(path = %state.path, "push_state outside wasm32, nothing stored");
	Ok(())
}

/// Replaces the current history entry with `state` (native no-op).
#[cfg(not(target_arch = "wasm32"))]
pub fn replace_state(state: &HistoryState) -> Result<(), String> {
	tracing::debug!(path = %state.path, "replace_state outside wasm32, nothing stored");
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_history_state_builder() {
		let mut params = HashMap::new();
		params.insert("prepid".to_string(), "42".to_string());

		let state = HistoryState::new("/relvals/42?a=1")
			.with_params(params.clone())
			.with_route_name("relvals_edit");

		assert_eq!(state.path, "/relvals/42?a=1");
		assert_eq!(state.params, params);
		assert_eq!(state.route_name, "relvals_edit");
	}

	#[test]
	fn test_history_state_serde_round_trip() {
		let state = HistoryState::new("/tickets").with_route_name("tickets");
		let json = serde_json::to_string(&state).unwrap();
		let back: HistoryState = serde_json::from_str(&json).unwrap();
		assert_eq!(back, state);
	}

	#[test]
	#[cfg(not(target_arch = "wasm32"))]
	fn test_native_push_and_replace_succeed() {
		let state = HistoryState::new("/dashboard");
		assert!(push_state(&state).is_ok());
		assert!(replace_state(&state).is_ok());
	}

	#[test]
	#[cfg(not(target_arch = "wasm32"))]
	fn test_native_current_path_is_unavailable() {
		assert!(current_path().is_err());
	}
}
