//! Explicit route table for the dashboard shell.
//!
//! The original navigation is a URL router with lazily-loaded page modules;
//! here it is a plain enum: each variant names a view, parsing replaces
//! path matching, and unknown paths collapse into [`Route::NotFound`].

use crate::auth::{AuthState, LayoutGate, dashboard_gate};
use crate::domain::types::OrderId;

/// Role required to open a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Admin,
    Manager,
}

/// One addressable view of the dashboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Managers,
    Profile,
    Setting,
    Orders,
    OrderDetail(OrderId),
    Drivers,
    NotFound,
}

impl Route {
    /// Maps a URL path to its view. Anything unmatched, including a detail
    /// path with a blank id, resolves to [`Route::NotFound`].
    pub fn parse(path: &str) -> Route {
        match path.trim_end_matches('/') {
            "/login" => Route::Login,
            "/dashboard" => Route::Dashboard,
            "/dashboard/managers" => Route::Managers,
            "/dashboard/profile" => Route::Profile,
            "/dashboard/setting" => Route::Setting,
            "/dashboard/orders" => Route::Orders,
            "/dashboard/drivers" => Route::Drivers,
            other => match other.strip_prefix("/dashboard/orders/") {
                Some(id) if !id.contains('/') => OrderId::new(id)
                    .map(Route::OrderDetail)
                    .unwrap_or(Route::NotFound),
                _ => Route::NotFound,
            },
        }
    }

    /// Canonical path of the view.
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Managers => "/dashboard/managers".to_string(),
            Route::Profile => "/dashboard/profile".to_string(),
            Route::Setting => "/dashboard/setting".to_string(),
            Route::Orders => "/dashboard/orders".to_string(),
            Route::OrderDetail(id) => format!("/dashboard/orders/{id}"),
            Route::Drivers => "/dashboard/drivers".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }

    /// Whether the view sits behind the dashboard layout guard.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login | Route::NotFound)
    }

    /// Role needed to open the view, if it is role-restricted.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Route::Managers | Route::Profile => Some(Role::Admin),
            Route::Orders | Route::OrderDetail(_) | Route::Drivers => Some(Role::Manager),
            _ => None,
        }
    }
}

/// Outcome of resolving a path against the route table and auth state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Navigate elsewhere instead of rendering.
    Redirect(Route),
    /// Auth state still settling; show a progress indicator.
    Progress,
    /// Render the view.
    View(Route),
}

/// Resolves a path, applying the dashboard layout gate to guarded views.
pub fn resolve(path: &str, auth: &AuthState) -> Resolution {
    let route = Route::parse(path);

    if !route.requires_auth() {
        return Resolution::View(route);
    }

    match dashboard_gate(auth) {
        LayoutGate::RedirectToLogin => Resolution::Redirect(Route::Login),
        LayoutGate::Progress => Resolution::Progress,
        LayoutGate::Render => Resolution::View(route),
    }
}

/// Navigation capability of the hosting shell.
pub trait Navigator {
    fn navigate(&mut self, route: Route);
}

/// Row-click handler: opens the detail view for `id`. A missing id is a
/// no-op, not an error.
pub fn view_detail(nav: &mut impl Navigator, id: Option<&OrderId>) {
    if let Some(id) = id {
        nav.navigate(Route::OrderDetail(id.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingNavigator {
        visited: Vec<Route>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&mut self, route: Route) {
            self.visited.push(route);
        }
    }

    #[test]
    fn known_paths_round_trip() {
        for path in [
            "/login",
            "/dashboard",
            "/dashboard/managers",
            "/dashboard/profile",
            "/dashboard/setting",
            "/dashboard/orders",
            "/dashboard/orders/abc123",
            "/dashboard/drivers",
        ] {
            let route = Route::parse(path);
            assert_ne!(route, Route::NotFound, "{path} should be routable");
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn unknown_paths_fall_through_to_not_found() {
        assert_eq!(Route::parse("/nope"), Route::NotFound);
        assert_eq!(Route::parse("/dashboard/orders/ /x"), Route::NotFound);
        assert_eq!(Route::parse("/404"), Route::NotFound);
    }

    #[test]
    fn detail_path_with_blank_id_is_not_found() {
        assert_eq!(Route::parse("/dashboard/orders/"), Route::Orders);
        assert_eq!(Route::parse("/dashboard/orders/   "), Route::NotFound);
    }

    #[test]
    fn role_groups_match_the_navigation_menu() {
        assert_eq!(Route::Managers.required_role(), Some(Role::Admin));
        assert_eq!(Route::Profile.required_role(), Some(Role::Admin));
        assert_eq!(Route::Orders.required_role(), Some(Role::Manager));
        assert_eq!(Route::Drivers.required_role(), Some(Role::Manager));
        assert_eq!(Route::Setting.required_role(), None);
    }

    #[test]
    fn guarded_route_redirects_when_unauthenticated() {
        let auth = AuthState::default();
        assert_eq!(
            resolve("/dashboard/orders", &auth),
            Resolution::Redirect(Route::Login)
        );
        assert_eq!(resolve("/login", &auth), Resolution::View(Route::Login));
    }

    #[test]
    fn guarded_route_renders_when_authenticated() {
        let auth = AuthState {
            is_authenticated: true,
            loading: false,
        };
        assert_eq!(
            resolve("/dashboard/orders", &auth),
            Resolution::View(Route::Orders)
        );
    }

    #[test]
    fn missing_id_is_a_navigation_no_op() {
        let mut nav = RecordingNavigator::default();
        view_detail(&mut nav, None);
        assert!(nav.visited.is_empty());

        let id = OrderId::new("abc").unwrap();
        view_detail(&mut nav, Some(&id));
        assert_eq!(nav.visited, vec![Route::OrderDetail(id)]);
    }
}
