//! The application route table.
//!
//! Declaration order is match priority, so the edit screens are declared
//! before the list screens whose paths they extend: `/tickets/edit` must
//! never be swallowed by `/tickets`.

use crate::router::Router;

/// One opaque view handle per navigable screen.
///
/// The host supplies the handles; the router only associates them with
/// names and paths and never looks inside them.
#[derive(Debug, Clone)]
pub struct AppViews<V> {
	/// Landing page.
	pub home: V,
	/// Campaign overview dashboard.
	pub dashboard: V,
	/// Ticket list.
	pub tickets: V,
	/// Single-ticket editor.
	pub tickets_edit: V,
	/// RelVal list.
	pub relvals: V,
	/// Single-RelVal editor.
	pub relvals_edit: V,
	/// Bulk RelVal editor.
	pub relvals_edit_many: V,
}

/// Builds the application router, with `base` prepended to every URL.
///
/// # Example
///
/// ```
/// use relval_pages::{AppViews, app_router};
///
/// let router = app_router(
/// 	AppViews {
/// 		home: "home",
/// 		dashboard: "dashboard",
/// 		tickets: "tickets",
/// 		tickets_edit: "tickets-edit",
/// 		relvals: "relvals",
/// 		relvals_edit: "relvals-edit",
/// 		relvals_edit_many: "relvals-edit-many",
/// 	},
/// 	"/relval",
/// );
/// assert_eq!(router.resolve("/relval/tickets/edit").unwrap().route.name(), "tickets_edit");
/// ```
pub fn app_router<V>(views: AppViews<V>, base: impl Into<String>) -> Router<V> {
	Router::new()
		.with_base(base)
		.route("home", "/", views.home)
		.route("dashboard", "/dashboard", views.dashboard)
		.route("tickets_edit", "/tickets/edit", views.tickets_edit)
		.route("tickets", "/tickets", views.tickets)
		.route("relvals_edit", "/relvals/edit", views.relvals_edit)
		.route("relvals_edit_many", "/relvals/edit_many", views.relvals_edit_many)
		.route("relvals", "/relvals", views.relvals)
}
