//! Client-side navigation for the RelVal submission frontend.
//!
//! The RelVal submission UI is a single-page application over tickets
//! that batch-create release-validation campaigns, the RelVals
//! themselves, and a dashboard. This crate is the navigation core of
//! that UI — the part that turns "where the app should be" into a URL
//! and back:
//!
//! - [`router`]: the route table — ordered, named routes holding opaque
//!   view handles, first-match resolution and reverse URL rendering
//! - [`query`]: the query-string codec — bracket-notation nesting with
//!   `*`, `/`, `!` and `,` kept literal so filter expressions stay
//!   readable in the address bar
//! - [`routes`]: the application route table itself
//! - [`logging`](mod@logging): console/`tracing` macros shared by the
//!   modules above
//!
//! Rendering, data fetching and configuration stay with the host: views
//! are opaque handles the router associates with names but never
//! invokes, and the base path prefix is passed in rather than read from
//! the environment.
//!
//! # Example
//!
//! ```
//! use relval_pages::{AppViews, NavigationTarget, app_router};
//!
//! let router = app_router(
//! 	AppViews {
//! 		home: "home",
//! 		dashboard: "dashboard",
//! 		tickets: "tickets",
//! 		tickets_edit: "tickets-edit",
//! 		relvals: "relvals",
//! 		relvals_edit: "relvals-edit",
//! 		relvals_edit_many: "relvals-edit-many",
//! 	},
//! 	"",
//! );
//!
//! // Navigation intent -> URL, with the wildcard kept readable.
//! let url = router
//! 	.url_for(&NavigationTarget::new("relvals").query_value("prepid", "*2024*"))
//! 	.unwrap();
//! assert_eq!(url, "/relvals?prepid=*2024*");
//!
//! // Incoming URL -> resolved navigational state.
//! let resolved = router.resolve(&url).unwrap();
//! assert_eq!(resolved.route.name(), "relvals");
//! ```

#![warn(missing_docs)]

// Logging macros (exported at the crate root via #[macro_export])
pub mod logging;

// Query-string codec
pub mod query;

// Client-side routing
pub mod router;

// Application route table
pub mod routes;

// Re-export commonly used types
pub use query::QueryMap;
pub use router::{
	HistoryState, NavigationTarget, NavigationType, PathPattern, Resolution, Route, RouteMatch,
	Router, RouterError,
};
pub use routes::{AppViews, app_router};
