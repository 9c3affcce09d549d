//! Auth state contract consumed by the dashboard layout.
//!
//! Session mechanics live in an external auth provider; the dashboard only
//! observes its current state and gates the layout on it.

use serde::{Deserialize, Serialize};

/// Snapshot of the external auth provider.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub loading: bool,
}

/// What the dashboard layout shell should do for the current auth state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutGate {
    /// Unauthenticated: send the user to the login page.
    RedirectToLogin,
    /// Auth state still resolving: show a progress indicator.
    Progress,
    /// Authenticated and settled: render the guarded content.
    Render,
}

/// Gate applied by the dashboard layout before rendering guarded pages.
pub fn dashboard_gate(state: &AuthState) -> LayoutGate {
    if !state.is_authenticated {
        return LayoutGate::RedirectToLogin;
    }
    if state.loading {
        return LayoutGate::Progress;
    }
    LayoutGate::Render
}
