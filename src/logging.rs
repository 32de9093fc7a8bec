//! Logging for navigation internals.
//!
//! The same macro works on both targets: on `wasm32` it writes to the
//! browser console, elsewhere it forwards to `tracing` so SSR and test
//! runs share the host's subscriber.
//!
//! | Macro | Debug assertions | WASM | Non-WASM |
//! |-------|------------------|------|----------|
//! | `debug_log!` | Required | `console.debug` | `tracing::debug!` |
//! | `warn_log!` | None | `console.warn` | `tracing::warn!` |
//!
//! `warn_log!` is always compiled in: the query codec's fail-soft
//! recovery paths report through it, and those must stay visible in
//! release builds.

/// Logs a debug message (requires `debug_assertions`).
///
/// Takes format arguments like `format!`. Compiles to a no-op in
/// release builds.
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		web_sys::console::debug_1(&format!($($arg)*).into());
	}};
}

/// Logs a debug message (requires `debug_assertions`).
#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		tracing::debug!($($arg)*);
	}};
}

/// No-op `debug_log!` for release builds.
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! debug_log {
	($($arg:tt)*) => {{}};
}

/// Logs a warning.
///
/// Takes format arguments like `format!`. Always compiled in.
#[macro_export]
#[cfg(target_arch = "wasm32")]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		web_sys::console::warn_1(&format!($($arg)*).into());
	}};
}

/// Logs a warning.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		tracing::warn!($($arg)*);
	}};
}
