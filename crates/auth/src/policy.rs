use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use routeguard_core::RoutePath;

use crate::config::GuardConfig;
use crate::navigator::Navigator;
use crate::roles::{Role, RoleList};
use crate::route::Route;

/// Why a navigation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    /// The session holds no roles at all; the user should sign in.
    Unauthenticated,
    /// The session holds roles, but none the route accepts.
    Forbidden,
}

/// Outcome of an authorization check, before any side effect is performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied {
        kind: DenialKind,
        /// Where the guard will send the user; `None` when the matching
        /// path is not configured.
        redirect: Option<String>,
    },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Check whether `allowed` grants access to `route`.
///
/// - Unprotected routes (no `auth.allows`) are always allowed.
/// - Protected routes need at least one role in common; an empty session is
///   denied.
pub fn is_allowed(route: &Route, allowed: &RoleList) -> bool {
    match route.required_roles() {
        None => true,
        Some(required) => allowed.first_match(required).is_some(),
    }
}

/// Whether the session holds no roles at all (and should be asked to sign in).
///
/// `route` is accepted for symmetry with [`is_allowed`] and not inspected.
pub fn can_sign_in(_route: &Route, allowed: &RoleList) -> bool {
    allowed.is_empty()
}

/// Decide what should happen for `route`, without side effects.
pub fn decide(route: &Route, allowed: &RoleList, config: &GuardConfig) -> Decision {
    if is_allowed(route, allowed) {
        return Decision::Allowed;
    }

    if can_sign_in(route, allowed) {
        Decision::Denied {
            kind: DenialKind::Unauthenticated,
            redirect: config.sign_in_path().map(str::to_string),
        }
    } else {
        Decision::Denied {
            kind: DenialKind::Forbidden,
            redirect: config.forbidden_path().map(str::to_string),
        }
    }
}

/// Authorize navigation to `route` for a session holding `allowed`.
///
/// On denial exactly one of the following happens: the navigator is sent to
/// the sign-in/forbidden path, or a warning is logged because that path is
/// not configured. Either way the result is `false`.
pub fn authorize<N: Navigator + ?Sized>(
    route: &Route,
    allowed: &RoleList,
    config: &GuardConfig,
    navigator: &N,
) -> bool {
    match decide(route, allowed, config) {
        Decision::Allowed => {
            debug!(target: "routeguard", roles = ?allowed.to_strings(), "navigation allowed");
            true
        }
        Decision::Denied {
            kind,
            redirect: Some(path),
        } => {
            debug!(target: "routeguard", ?kind, redirect = %path, "navigation denied");
            navigator.set_path(&path);
            false
        }
        Decision::Denied {
            kind: DenialKind::Unauthenticated,
            redirect: None,
        } => {
            warn!(target: "routeguard", "No sign in path defined!");
            false
        }
        Decision::Denied {
            kind: DenialKind::Forbidden,
            redirect: None,
        } => {
            warn!(target: "routeguard", "No forbidden path defined!");
            false
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of a navigation decision.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationExplanation {
    /// The path that was being entered, when known.
    pub path: Option<RoutePath>,

    /// Whether navigation was granted.
    pub granted: bool,

    /// Human-readable reason for the decision.
    pub reason: String,

    /// Roles the route accepts; `None` for unprotected routes.
    pub required_roles: Option<Vec<String>>,

    /// Roles the session held at decision time.
    pub held_roles: Vec<String>,

    /// The first held role the route accepts.
    pub matched_role: Option<String>,

    /// Where the guard redirects (or would redirect) on denial.
    pub redirect_to: Option<String>,

    /// If denied, this explains what was missing.
    pub denial_reason: Option<DenialReason>,

    pub decided_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DenialReason {
    pub kind: DenialKind,
    pub message: String,
    pub suggestions: Vec<String>,
}

/// Explain why a navigation would be allowed or denied.
///
/// Pure: no redirect and no warning is emitted, only the record is built.
pub fn explain(
    path: Option<&RoutePath>,
    route: &Route,
    allowed: &RoleList,
    config: &GuardConfig,
) -> AuthorizationExplanation {
    let required = route.required_roles();
    let matched: Option<&Role> = required.and_then(|req| allowed.first_match(req));
    let decision = decide(route, allowed, config);

    let mut explanation = AuthorizationExplanation {
        path: path.cloned(),
        granted: decision.is_allowed(),
        reason: String::new(),
        required_roles: required.map(RoleList::to_strings),
        held_roles: allowed.to_strings(),
        matched_role: matched.map(|r| r.as_str().to_string()),
        redirect_to: None,
        denial_reason: None,
        decided_at: Utc::now(),
    };

    match decision {
        Decision::Allowed => {
            explanation.reason = match matched {
                Some(role) => format!("Session holds accepted role '{role}'"),
                None => "Route is not role-protected".to_string(),
            };
        }
        Decision::Denied { kind, redirect } => {
            let required = required.map(RoleList::to_strings).unwrap_or_default();
            let (message, mut suggestions) = match kind {
                DenialKind::Unauthenticated => (
                    "Session holds no roles".to_string(),
                    vec!["Sign in to obtain session roles".to_string()],
                ),
                DenialKind::Forbidden => (
                    format!("None of the session roles {:?} is accepted", allowed.to_strings()),
                    vec![format!("Grant one of the roles {required:?} to the session")],
                ),
            };
            if redirect.is_none() {
                suggestions.push(match kind {
                    DenialKind::Unauthenticated => "Configure a sign-in path".to_string(),
                    DenialKind::Forbidden => "Configure a forbidden path".to_string(),
                });
            }

            explanation.reason = format!("Route requires one of {required:?}. {message}");
            explanation.redirect_to = redirect;
            explanation.denial_reason = Some(DenialReason {
                kind,
                message,
                suggestions,
            });
        }
    }

    explanation
}
