use super::{ControllerError, Notification};
use crate::api::ApiClient;
use crate::domain::{NewOpportunity, Opportunity, Volunteer};
use crate::error::ClientError;
use crate::routes::Route;
use serde::Serialize;
use tokio::sync::watch;

pub const CREATE_SUCCESS_MESSAGE: &str = "Oportunidade criada com sucesso!";
pub const CREATE_FALLBACK_MESSAGE: &str = "Erro ao criar oportunidade";

/// What to do when a list fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFailurePolicy {
    /// Replace the whole view with an error message.
    Fail,
    /// Log the failure and show the list as empty.
    DefaultEmpty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardConfig {
    pub volunteers: ListFailurePolicy,
    pub opportunities: ListFailurePolicy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { volunteers: ListFailurePolicy::Fail, opportunities: ListFailurePolicy::DefaultEmpty }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> ListState<T> {
    const fn new(loading: bool) -> Self {
        Self { items: Vec::new(), loading, error: None }
    }

    fn settle(&mut self, result: Result<Vec<T>, ClientError>, policy: ListFailurePolicy, list: &'static str) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(err) => match policy {
                ListFailurePolicy::Fail => {
                    tracing::error!(list, error = %err, "failed to load list");
                    self.error = Some(err.to_string());
                }
                ListFailurePolicy::DefaultEmpty => {
                    tracing::warn!(list, error = %err, "failed to load list, showing it empty");
                    self.items.clear();
                    self.error = None;
                }
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPhase {
    Closed,
    Open,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    pub volunteers: ListState<Volunteer>,
    pub opportunities: ListState<Opportunity>,
    pub dialog: DialogPhase,
    pub form: NewOpportunity,
    pub notification: Option<Notification>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            volunteers: ListState::new(true),
            opportunities: ListState::new(false),
            dialog: DialogPhase::Closed,
            form: NewOpportunity::default(),
            notification: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolunteerCard {
    pub id: i64,
    pub initial: char,
    pub name: String,
    pub message: String,
    pub birth_date: String,
    pub tax_id: String,
    pub details: Route,
}

impl From<&Volunteer> for VolunteerCard {
    fn from(v: &Volunteer) -> Self {
        let or_missing = |field: &Option<String>| {
            field.as_deref().filter(|s| !s.is_empty()).unwrap_or("Não informado").to_string()
        };
        Self {
            id: v.id,
            initial: v.initial(),
            name: v.display_name().to_string(),
            message: v.message.as_deref().filter(|s| !s.is_empty()).unwrap_or("Sem mensagem").to_string(),
            birth_date: or_missing(&v.birth_date),
            tax_id: or_missing(&v.tax_id),
            details: Route::VolunteerDetail(v.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardView {
    Loading,
    Error { message: String },
    Ready { volunteers: Vec<VolunteerCard>, opportunities: Vec<Opportunity>, opportunities_loading: bool },
}

impl DashboardState {
    pub fn view(&self) -> DashboardView {
        if self.volunteers.loading {
            return DashboardView::Loading;
        }
        if let Some(err) = &self.volunteers.error {
            return DashboardView::Error { message: format!("Erro ao carregar voluntários: {err}") };
        }
        if let Some(err) = &self.opportunities.error {
            return DashboardView::Error { message: format!("Erro ao carregar oportunidades: {err}") };
        }
        DashboardView::Ready {
            volunteers: self.volunteers.items.iter().map(VolunteerCard::from).collect(),
            opportunities: if self.opportunities.loading { Vec::new() } else { self.opportunities.items.clone() },
            opportunities_loading: self.opportunities.loading,
        }
    }
}

/// NGO landing page: volunteer and opportunity lists plus the
/// "new opportunity" dialog.
#[derive(Debug)]
pub struct NgoDashboard {
    api: ApiClient,
    config: DashboardConfig,
    state: watch::Sender<DashboardState>,
}

impl NgoDashboard {
    pub fn new(api: ApiClient, config: DashboardConfig) -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        Self { api, config, state }
    }

    pub fn state(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    pub fn view(&self) -> DashboardView {
        self.state.borrow().view()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    /// Loads both lists concurrently. Each list is updated as soon as its
    /// own request completes.
    #[tracing::instrument(skip(self))]
    pub async fn mount(&self) {
        self.state.send_modify(|s| {
            s.volunteers.loading = true;
            s.opportunities.loading = true;
        });
        tokio::join!(self.load_volunteers(), self.load_opportunities());
    }

    async fn load_volunteers(&self) {
        let result = self.api.list_volunteers().await;
        self.state.send_modify(|s| s.volunteers.settle(result, self.config.volunteers, "volunteers"));
    }

    async fn load_opportunities(&self) {
        let result = self.api.list_opportunities().await;
        self.state.send_modify(|s| s.opportunities.settle(result, self.config.opportunities, "opportunities"));
    }

    /// Opens the dialog, keeping whatever was typed before.
    pub fn open_dialog(&self) {
        self.state.send_if_modified(|s| {
            if s.dialog == DialogPhase::Closed {
                s.dialog = DialogPhase::Open;
                return true;
            }
            false
        });
    }

    /// Returns `false` if a submission is in flight; the request itself keeps running.
    pub fn close_dialog(&self) -> bool {
        let mut closed = false;
        self.state.send_if_modified(|s| match s.dialog {
            DialogPhase::Submitting => false,
            DialogPhase::Closed => {
                closed = true;
                false
            }
            DialogPhase::Open => {
                s.dialog = DialogPhase::Closed;
                closed = true;
                true
            }
        });
        closed
    }

    /// Returns `false` while a submission is in flight.
    pub fn edit_form(&self, edit: impl FnOnce(&mut NewOpportunity)) -> bool {
        self.state.send_if_modified(|s| {
            if s.dialog == DialogPhase::Submitting {
                return false;
            }
            edit(&mut s.form);
            true
        })
    }

    pub fn dismiss_notification(&self) {
        self.state.send_if_modified(|s| s.notification.take().is_some());
    }

    /// Creates an opportunity from the dialog form.
    ///
    /// On success the form resets, the dialog closes and the opportunity list
    /// is fetched again. A failed refetch does not undo the creation; it only
    /// swaps the notification for an error.
    ///
    /// # Errors
    /// `Busy` or `DialogClosed` if the dialog is not ready for submission,
    /// otherwise the creation failure. The dialog then stays open with the
    /// form intact.
    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn submit(&self) -> Result<(), ControllerError> {
        let mut pending = Err(ControllerError::DialogClosed);
        self.state.send_if_modified(|s| match s.dialog {
            DialogPhase::Closed => false,
            DialogPhase::Submitting => {
                pending = Err(ControllerError::Busy);
                false
            }
            DialogPhase::Open => {
                s.dialog = DialogPhase::Submitting;
                pending = Ok(s.form.clone());
                true
            }
        });
        let form = pending?;

        if let Err(err) = self.api.create_opportunity(form).await {
            tracing::error!(error = %err, "failed to create opportunity");
            let message = creation_error_message(&err);
            self.state.send_modify(|s| {
                s.dialog = DialogPhase::Open;
                s.notification = Some(Notification::error(message));
            });
            return Err(err.into());
        }

        tracing::info!("opportunity created");
        self.state.send_modify(|s| {
            s.notification = Some(Notification::success(CREATE_SUCCESS_MESSAGE));
            s.form = NewOpportunity::default();
            s.dialog = DialogPhase::Closed;
            s.opportunities.loading = true;
        });

        let refreshed = self.api.list_opportunities().await;
        self.state.send_modify(|s| {
            s.opportunities.loading = false;
            match refreshed {
                Ok(items) => s.opportunities.items = items,
                Err(err) => {
                    tracing::error!(error = %err, "failed to refresh opportunities after creation");
                    s.notification = Some(Notification::error(creation_error_message(&err)));
                }
            }
        });
        Ok(())
    }
}

fn creation_error_message(err: &ClientError) -> String {
    let message = err
        .payload_field("error")
        .or_else(|| err.payload_field("detail"))
        .map_or_else(|| err.to_string(), str::to_string);
    if message.is_empty() { CREATE_FALLBACK_MESSAGE.to_string() } else { message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    #[test]
    fn test_initial_view_is_loading() {
        assert_eq!(DashboardState::default().view(), DashboardView::Loading);
    }

    #[test]
    fn test_settle_with_default_empty_swallows_errors() {
        let mut list = ListState { items: vec![1, 2], loading: true, error: None };
        let err = ClientError::ServerText { status: StatusCode::BAD_GATEWAY, body: "upstream".into() };
        list.settle(Err(err), ListFailurePolicy::DefaultEmpty, "numbers");
        assert_eq!(list, ListState { items: vec![], loading: false, error: None });
    }

    #[test]
    fn test_settle_with_fail_keeps_message() {
        let mut list: ListState<i32> = ListState::new(true);
        let err = ClientError::Server { status: StatusCode::INTERNAL_SERVER_ERROR, payload: json!({ "error": "db down" }) };
        list.settle(Err(err), ListFailurePolicy::Fail, "numbers");
        assert!(!list.loading);
        assert!(list.error.as_deref().unwrap().contains("db down"));
    }

    #[test]
    fn test_opportunity_error_blocks_view_when_configured() {
        let mut state = DashboardState::default();
        state.volunteers.loading = false;
        state.opportunities.error = Some("timeout".into());
        assert_eq!(
            state.view(),
            DashboardView::Error { message: "Erro ao carregar oportunidades: timeout".into() }
        );
    }

    #[test]
    fn test_volunteer_card_fallbacks() {
        let card = VolunteerCard::from(&Volunteer {
            id: 5,
            name: Some("Carla".into()),
            message: None,
            birth_date: Some(String::new()),
            tax_id: Some("123.456.789-00".into()),
        });
        assert_eq!(card.initial, 'C');
        assert_eq!(card.message, "Sem mensagem");
        assert_eq!(card.birth_date, "Não informado");
        assert_eq!(card.tax_id, "123.456.789-00");
        assert_eq!(card.details, Route::VolunteerDetail(5));
    }

    #[test]
    fn test_creation_error_message_precedence() {
        let err = ClientError::Server {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            payload: json!({ "error": "X", "detail": "Y" }),
        };
        assert_eq!(creation_error_message(&err), "X");

        let err = ClientError::Server { status: StatusCode::FORBIDDEN, payload: json!({ "detail": "Permissão negada" }) };
        assert_eq!(creation_error_message(&err), "Permissão negada");

        let err = ClientError::ServerText { status: StatusCode::BAD_GATEWAY, body: "bad gateway".into() };
        assert_eq!(creation_error_message(&err), "Server error 502 Bad Gateway: bad gateway");
    }
}
