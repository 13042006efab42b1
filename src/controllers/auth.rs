use super::{ControllerError, Navigator};
use crate::api::ApiClient;
use crate::api::schemas::auth::{AuthResponse, Login, Signup};
use crate::domain::{Role, Session};
use crate::error::{ClientError, StorageError};
use crate::routes::Route;
use crate::storage::SessionContext;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;

pub const LOGIN_FALLBACK_MESSAGE: &str = "Falha no login";
pub const SIGNUP_FALLBACK_MESSAGE: &str = "Falha ao criar conta";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
    Success(Route),
    /// The error stays on screen until it is dismissed, the form is edited
    /// or the form is submitted again.
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState<F> {
    pub form: F,
    pub phase: FormPhase,
}

/// A form whose submission yields a session.
#[async_trait]
pub trait AuthForm: Clone + Default + Send + Sync + std::fmt::Debug + 'static {
    const FALLBACK_MESSAGE: &'static str;

    async fn send(&self, api: &ApiClient) -> Result<AuthResponse, ClientError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[async_trait]
impl AuthForm for LoginForm {
    const FALLBACK_MESSAGE: &'static str = LOGIN_FALLBACK_MESSAGE;

    async fn send(&self, api: &ApiClient) -> Result<AuthResponse, ClientError> {
        api.login(&Login { email: self.email.clone(), senha: self.password.clone() }).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Only sent when `role` is `Ngo`.
    pub tax_id: String,
    pub role: Role,
}

impl Default for SignupForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            tax_id: String::new(),
            role: Role::Volunteer,
        }
    }
}

#[async_trait]
impl AuthForm for SignupForm {
    const FALLBACK_MESSAGE: &'static str = SIGNUP_FALLBACK_MESSAGE;

    async fn send(&self, api: &ApiClient) -> Result<AuthResponse, ClientError> {
        let payload = Signup::new(
            self.name.clone(),
            self.email.clone(),
            self.password.clone(),
            self.role.clone(),
            Some(self.tax_id.clone()),
        );
        api.signup(&payload).await
    }
}

/// Login/signup flow: submit once, persist the session, then navigate by role.
#[derive(Debug)]
pub struct AuthController<F> {
    api: ApiClient,
    navigator: Arc<dyn Navigator>,
    state: watch::Sender<FormState<F>>,
}

pub type LoginController = AuthController<LoginForm>;
pub type SignupController = AuthController<SignupForm>;

impl<F: AuthForm> AuthController<F> {
    pub fn new(api: ApiClient, navigator: Arc<dyn Navigator>) -> Self {
        let (state, _) = watch::channel(FormState { form: F::default(), phase: FormPhase::Editing });
        Self { api, navigator, state }
    }

    pub fn state(&self) -> FormState<F> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState<F>> {
        self.state.subscribe()
    }

    /// Applies `edit` to the form. Editing clears a displayed error.
    /// Returns `false` while a submission is in flight.
    pub fn edit(&self, edit: impl FnOnce(&mut F)) -> bool {
        self.state.send_if_modified(|s| {
            if s.phase == FormPhase::Submitting {
                return false;
            }
            edit(&mut s.form);
            s.phase = FormPhase::Editing;
            true
        })
    }

    pub fn dismiss_error(&self) {
        self.state.send_if_modified(|s| {
            if matches!(s.phase, FormPhase::Failed { .. }) {
                s.phase = FormPhase::Editing;
                return true;
            }
            false
        });
    }

    /// Submits the current form.
    ///
    /// # Errors
    /// `ControllerError::Busy` if a submission is already running, otherwise
    /// the request or storage failure. In the failure case the state holds
    /// the message to show.
    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn submit(&self) -> Result<Route, ControllerError> {
        let mut pending = None;
        self.state.send_if_modified(|s| {
            if s.phase == FormPhase::Submitting {
                return false;
            }
            s.phase = FormPhase::Submitting;
            pending = Some(s.form.clone());
            true
        });
        let Some(form) = pending else {
            return Err(ControllerError::Busy);
        };

        match self.authenticate(&form).await {
            Ok(session) => {
                let route = Route::landing_for(&session.role);
                tracing::info!(role = %session.role, route = %route, "authenticated");
                self.state.send_modify(|s| s.phase = FormPhase::Success(route));
                self.navigator.navigate(route);
                Ok(route)
            }
            Err(err) => {
                tracing::error!(error = %err, "authentication failed");
                let message = err.server_message().unwrap_or(F::FALLBACK_MESSAGE).to_string();
                self.state.send_modify(|s| s.phase = FormPhase::Failed { message });
                Err(err.into())
            }
        }
    }

    async fn authenticate(&self, form: &F) -> Result<Session, ClientError> {
        let session = Session::from(form.send(&self.api).await?);
        self.api.session().persist(&session).await?;
        Ok(session)
    }
}

/// Drops the stored session and returns to the login page.
///
/// # Errors
/// Returns the storage error if the session could not be removed.
pub async fn logout(session: &SessionContext, navigator: &dyn Navigator) -> Result<(), StorageError> {
    session.clear().await?;
    tracing::info!("logged out");
    navigator.navigate(Route::Login);
    Ok(())
}
