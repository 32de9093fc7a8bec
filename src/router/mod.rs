//! Client-side routing.
//!
//! A declarative, ordered route table mapping URL paths to named views,
//! with reverse URL rendering and History API integration:
//!
//! - [`core`]: [`Router`], [`Route`], resolution and URL rendering
//! - [`pattern`]: [`PathPattern`] compilation and matching
//! - [`history`]: the History API seam (real on `wasm32`, no-op native)
//!
//! Query strings ride along through [`crate::query`]: resolution decodes
//! them, URL rendering encodes them.

pub mod core;
pub mod history;
pub mod pattern;

pub use self::core::{NavigationTarget, Resolution, Route, RouteMatch, Router, RouterError};
pub use self::history::{HistoryState, NavigationType};
pub use self::pattern::PathPattern;
