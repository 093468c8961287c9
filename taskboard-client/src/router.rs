/// Route table and authentication guard
///
/// Pure navigation logic for a UI shell: a static route table mapping URL
/// paths to view names, segment matching with `:name` parameters, and the
/// guard that gates authenticated and guest-only routes.
///
/// The module performs no I/O. [`navigate`] resolves one step: a configured
/// redirect or a guard redirect yields [`Navigation::Redirect`] and the
/// caller re-enters, the way a UI router re-runs its guard on every hop.
/// [`settle`] iterates to the final destination for callers that only care
/// where navigation ends up.
///
/// # Example
///
/// ```
/// use taskboard_client::router::{settle, Navigation};
///
/// // Opening the app root without a session lands on the login view.
/// match settle("/", false) {
///     Navigation::Proceed(m) => assert_eq!(m.route.path, "/login"),
///     other => panic!("unexpected {:?}", other),
/// }
/// ```

use std::collections::HashMap;

/// Path of the login view, the guard's target for unauthenticated access
pub const LOGIN_PATH: &str = "/login";

/// Path of the dashboard, the guard's target for authenticated guests
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Authentication requirements of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteMeta {
    /// Route is only reachable with a session
    pub requires_auth: bool,

    /// Route is only reachable without a session (login, register)
    pub requires_guest: bool,
}

impl RouteMeta {
    const AUTH: RouteMeta = RouteMeta {
        requires_auth: true,
        requires_guest: false,
    };

    const GUEST: RouteMeta = RouteMeta {
        requires_auth: false,
        requires_guest: true,
    };

    const NONE: RouteMeta = RouteMeta {
        requires_auth: false,
        requires_guest: false,
    };
}

/// One entry of the route table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDef {
    /// Path pattern; `:name` segments capture parameters
    pub path: &'static str,

    /// Route name
    pub name: &'static str,

    /// View the UI shell renders for this route, if it renders one
    pub view: Option<&'static str>,

    /// Unconditional redirect target, for alias entries like `/`
    pub redirect: Option<&'static str>,

    /// Authentication requirements
    pub meta: RouteMeta,
}

/// The application route table
pub const ROUTES: &[RouteDef] = &[
    RouteDef {
        path: "/",
        name: "Root",
        view: None,
        redirect: Some(DASHBOARD_PATH),
        meta: RouteMeta::NONE,
    },
    RouteDef {
        path: "/login",
        name: "Login",
        view: Some("LoginView"),
        redirect: None,
        meta: RouteMeta::GUEST,
    },
    RouteDef {
        path: "/register",
        name: "Register",
        view: Some("RegisterView"),
        redirect: None,
        meta: RouteMeta::GUEST,
    },
    RouteDef {
        path: "/dashboard",
        name: "Dashboard",
        view: Some("DashboardView"),
        redirect: None,
        meta: RouteMeta::AUTH,
    },
    RouteDef {
        path: "/workspaces",
        name: "Workspaces",
        view: Some("WorkspacesView"),
        redirect: None,
        meta: RouteMeta::AUTH,
    },
    RouteDef {
        path: "/workspaces/:id",
        name: "WorkspaceDetail",
        view: Some("WorkspaceDetailView"),
        redirect: None,
        meta: RouteMeta::AUTH,
    },
    RouteDef {
        path: "/projects/:id",
        name: "ProjectDetail",
        view: Some("ProjectDetailView"),
        redirect: None,
        meta: RouteMeta::AUTH,
    },
    RouteDef {
        path: "/projects/:id/board",
        name: "KanbanBoard",
        view: Some("KanbanBoardView"),
        redirect: None,
        meta: RouteMeta::AUTH,
    },
    RouteDef {
        path: "/projects/:id/documents",
        name: "Documents",
        view: Some("DocumentsView"),
        redirect: None,
        meta: RouteMeta::AUTH,
    },
];

/// A resolved route with its captured parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// The matched table entry
    pub route: &'static RouteDef,

    /// Parameters captured from `:name` segments
    pub params: HashMap<&'static str, String>,
}

impl RouteMatch {
    /// Captured parameter by name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Outcome of one navigation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Navigation may proceed to the matched route
    Proceed(RouteMatch),

    /// Caller must navigate to this path instead
    Redirect(&'static str),

    /// No table entry matches the path
    NotFound,
}

/// Matches a path against one pattern, capturing `:name` parameters
fn match_pattern(pattern: &'static str, path: &str) -> Option<HashMap<&'static str, String>> {
    let mut params = HashMap::new();
    let mut pattern_segments = pattern.split('/').filter(|s| !s.is_empty());
    let mut path_segments = path.split('/').filter(|s| !s.is_empty());

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return Some(params),
            (Some(expected), Some(actual)) => {
                if let Some(name) = expected.strip_prefix(':') {
                    params.insert(name, actual.to_string());
                } else if expected != actual {
                    return None;
                }
            }
            _ => return None,
        }
    }
}

/// Resolves a path against the route table
///
/// Trailing slashes are ignored; the first matching entry wins.
pub fn resolve(path: &str) -> Option<RouteMatch> {
    ROUTES.iter().find_map(|route| {
        match_pattern(route.path, path).map(|params| RouteMatch { route, params })
    })
}

/// Resolves one navigation step, applying redirects and the guard
///
/// Order mirrors a UI router: configured redirects fire before the guard
/// (the guard then runs against the redirect target on re-entry).
pub fn navigate(path: &str, authenticated: bool) -> Navigation {
    let matched = match resolve(path) {
        Some(matched) => matched,
        None => return Navigation::NotFound,
    };

    if let Some(target) = matched.route.redirect {
        return Navigation::Redirect(target);
    }
    if matched.route.meta.requires_auth && !authenticated {
        return Navigation::Redirect(LOGIN_PATH);
    }
    if matched.route.meta.requires_guest && authenticated {
        return Navigation::Redirect(DASHBOARD_PATH);
    }

    Navigation::Proceed(matched)
}

/// Follows [`navigate`] redirects to the final destination
///
/// Bounded by the table size; the table cannot loop (redirect targets pass
/// the guard for at least one authentication state), so hitting the bound
/// means a misconfigured table and yields [`Navigation::NotFound`].
pub fn settle(path: &str, authenticated: bool) -> Navigation {
    let mut current = path.to_string();
    for _ in 0..=ROUTES.len() {
        match navigate(&current, authenticated) {
            Navigation::Redirect(target) => current = target.to_string(),
            outcome => return outcome,
        }
    }
    Navigation::NotFound
}
