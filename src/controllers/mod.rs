//! Headless view controllers. Each one owns its form state, calls the API
//! client and reports the outcome as plain data for whatever front end draws it.

use crate::error::ClientError;
use crate::routes::Route;
use serde::Serialize;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;

pub mod auth;
pub mod dashboard;

pub use auth::{AuthController, FormPhase, FormState, LoginController, LoginForm, SignupController, SignupForm};
pub use dashboard::{DashboardConfig, DashboardState, DashboardView, DialogPhase, ListFailurePolicy, NgoDashboard};

pub const NOTIFICATION_AUTO_HIDE: Duration = Duration::from_secs(4);

#[derive(Error, Debug)]
pub enum ControllerError {
    #[error("A submission is already in progress")]
    Busy,
    #[error("The dialog is not open")]
    DialogClosed,
    #[error(transparent)]
    Request(#[from] ClientError),
}

pub trait Navigator: Send + Sync + std::fmt::Debug {
    fn navigate(&self, route: Route);
}

/// Navigator that only remembers where it was sent.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    history: Mutex<Vec<Route>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Route> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn current(&self) -> Option<Route> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner).last().copied()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(route = %route, "navigating");
        self.history.lock().unwrap_or_else(PoisonError::into_inner).push(route);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

/// Transient, dismissible message shown after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    #[serde(skip)]
    pub auto_hide: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { severity: Severity::Success, message: message.into(), auto_hide: NOTIFICATION_AUTO_HIDE }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { severity: Severity::Error, message: message.into(), auto_hide: NOTIFICATION_AUTO_HIDE }
    }
}
