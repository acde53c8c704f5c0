// ── Authentication state ──
//
// `reduce` is a pure (state, event) -> state function. `Authenticator`
// wraps it around an `AuthService` and publishes the state through a
// `watch` channel.

use secrecy::SecretString;
use serde::Deserialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::{Session, User};
use crate::source::AuthService;

/// Authentication status. Mutated only through [`reduce`].
#[derive(Debug, Clone)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<SecretString>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for AuthState {
    /// Unauthenticated, with a check pending.
    fn default() -> Self {
        Self {
            user: None,
            token: None,
            loading: true,
            error: None,
        }
    }
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Events accepted by [`reduce`].
#[derive(Debug, Clone)]
pub enum AuthEvent {
    /// A sign-in attempt began.
    AttemptStarted,
    SetUser { user: User, token: SecretString },
    SetAuthError { message: String },
    ClearError,
    /// Anything else; leaves the state unchanged.
    Unknown,
}

impl AuthEvent {
    /// Decode a `{ "type": ..., "payload": ... }` action. Unrecognised
    /// or malformed actions decode to [`AuthEvent::Unknown`].
    pub fn decode(action: serde_json::Value) -> Self {
        match serde_json::from_value::<WireAction>(action) {
            Ok(action) => action.into(),
            Err(e) => {
                debug!(error = %e, "undecodable auth action");
                Self::Unknown
            }
        }
    }
}

impl From<Session> for AuthEvent {
    fn from(session: Session) -> Self {
        Self::SetUser {
            user: session.user,
            token: session.token,
        }
    }
}

#[derive(Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
enum WireAction {
    AttemptStarted,
    SetUser { user: User, token: String },
    SetAuthError(String),
    ClearError,
    #[serde(other)]
    Unknown,
}

impl From<WireAction> for AuthEvent {
    fn from(action: WireAction) -> Self {
        match action {
            WireAction::AttemptStarted => Self::AttemptStarted,
            WireAction::SetUser { user, token } => Self::SetUser {
                user,
                token: token.into(),
            },
            WireAction::SetAuthError(message) => Self::SetAuthError { message },
            WireAction::ClearError => Self::ClearError,
            WireAction::Unknown => Self::Unknown,
        }
    }
}

/// Pure state transition.
pub fn reduce(state: AuthState, event: AuthEvent) -> AuthState {
    match event {
        AuthEvent::AttemptStarted => AuthState {
            loading: true,
            error: None,
            ..state
        },
        AuthEvent::SetUser { user, token } => AuthState {
            user: Some(user),
            token: Some(token),
            loading: false,
            ..state
        },
        AuthEvent::SetAuthError { message } => AuthState {
            error: Some(message),
            loading: false,
            ..state
        },
        AuthEvent::ClearError => AuthState {
            error: None,
            ..state
        },
        AuthEvent::Unknown => state,
    }
}

// ── Authenticator ────────────────────────────────────────────────

/// Drives sign-in against an [`AuthService`], publishing [`AuthState`].
pub struct Authenticator<A> {
    service: A,
    state: watch::Sender<AuthState>,
}

impl<A: AuthService> Authenticator<A> {
    pub fn new(service: A) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self { service, state }
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn dispatch(&self, event: AuthEvent) {
        self.state
            .send_modify(|state| *state = reduce(std::mem::take(state), event));
    }

    /// Attempt a sign-in. The outcome is dispatched before it is returned.
    pub async fn sign_in(&self, email: &str, password: &SecretString) -> Result<User, CoreError> {
        self.dispatch(AuthEvent::AttemptStarted);
        match self.service.login(email, password).await {
            Ok(session) => {
                let user = session.user.clone();
                info!(email = %user.email, "signed in");
                self.dispatch(session.into());
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, "sign-in failed");
                self.dispatch(AuthEvent::SetAuthError {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }
}
