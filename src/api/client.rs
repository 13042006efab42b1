use crate::api::schemas::applications::{ApplicationRecord, StatusUpdate, SubmitApplication};
use crate::api::schemas::auth::{AuthResponse, Login, Signup};
use crate::api::schemas::ngos::NgoRecord;
use crate::api::schemas::opportunities::{CreateOpportunity, OpportunityRecord};
use crate::api::schemas::volunteers::VolunteerRecord;
use crate::config::ApiConfig;
use crate::domain::{Application, ApplicationStatus, NewApplication, NewOpportunity, Ngo, Opportunity, Volunteer};
use crate::error::{ClientError, Result};
use crate::storage::SessionContext;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Typed access to the backend REST API.
///
/// Every request consults the session store and carries
/// `Authorization: Bearer <token>` when a token is present. There are no
/// retries, no timeouts and no response caching.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionContext,
}

impl ApiClient {
    /// # Errors
    /// Returns `ClientError::InvalidBaseUrl` if the configured address is not an http(s) URL.
    pub fn new(config: &ApiConfig, session: SessionContext) -> Result<Self> {
        let invalid = |reason: String| ClientError::InvalidBaseUrl { url: config.base_url.clone(), reason };
        let parsed = Url::parse(&config.base_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", parsed.scheme())));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    fn url(&self, path: &str) -> Result<Url> {
        Url::parse(&format!("{}{path}", self.base_url))
            .map_err(|e| ClientError::InvalidBaseUrl { url: self.base_url.clone(), reason: e.to_string() })
    }

    async fn request(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        let builder = self.http.request(method, url);
        match self.session.token().await? {
            Some(token) => Ok(builder.bearer_auth(token)),
            None => Ok(builder),
        }
    }

    /// Sends the request and returns the body of a 2xx response.
    async fn execute(builder: RequestBuilder) -> Result<String> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(error = %e, "request failed before a response was received");
            ClientError::Network(e)
        })?;

        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            return Ok(body);
        }

        let err = match serde_json::from_str::<Value>(&body) {
            Ok(payload) => ClientError::Server { status, payload },
            Err(_) => ClientError::ServerText { status, body },
        };
        tracing::warn!(status = %status.as_u16(), error = %err, "request rejected by server");
        Err(err)
    }

    async fn fetch<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T> {
        let body = Self::execute(builder).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Mutations return whatever the backend sends back; an empty body maps to `null`.
    async fn fetch_raw(builder: RequestBuilder) -> Result<Value> {
        let body = Self::execute(builder).await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_list<R, T>(&self, path: &str) -> Result<Vec<T>>
    where
        R: DeserializeOwned,
        T: From<R>,
    {
        let builder = self.request(Method::GET, self.url(path)?).await?;
        let records: Vec<R> = Self::fetch(builder).await?;
        Ok(records.into_iter().map(T::from).collect())
    }

    // Auth

    #[tracing::instrument(skip(self, payload), fields(email = %payload.email, role = %payload.role), err(level = "warn"))]
    pub async fn signup(&self, payload: &Signup) -> Result<AuthResponse> {
        let builder = self.request(Method::POST, self.url("/auth/signup")?).await?;
        Self::fetch(builder.json(payload)).await
    }

    #[tracing::instrument(skip(self, payload), fields(email = %payload.email), err(level = "warn"))]
    pub async fn login(&self, payload: &Login) -> Result<AuthResponse> {
        let builder = self.request(Method::POST, self.url("/auth/login")?).await?;
        Self::fetch(builder.json(payload)).await
    }

    // Opportunities

    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn list_opportunities(&self) -> Result<Vec<Opportunity>> {
        self.get_list::<OpportunityRecord, _>("/oportunidades").await
    }

    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn get_opportunity(&self, id: i64) -> Result<Opportunity> {
        let builder = self.request(Method::GET, self.url(&format!("/oportunidades/{id}"))?).await?;
        let record: OpportunityRecord = Self::fetch(builder).await?;
        Ok(record.into())
    }

    #[tracing::instrument(skip(self, opportunity), fields(title = %opportunity.title), err(level = "warn"))]
    pub async fn create_opportunity(&self, opportunity: NewOpportunity) -> Result<Value> {
        let builder = self.request(Method::POST, self.url("/ongs/oportunidades")?).await?;
        Self::fetch_raw(builder.json(&CreateOpportunity::from(opportunity))).await
    }

    // Volunteers

    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn list_volunteers(&self) -> Result<Vec<Volunteer>> {
        self.get_list::<VolunteerRecord, _>("/voluntarios").await
    }

    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn get_volunteer(&self, id: i64) -> Result<Volunteer> {
        let builder = self.request(Method::GET, self.url(&format!("/voluntarios/{id}"))?).await?;
        let record: VolunteerRecord = Self::fetch(builder).await?;
        Ok(record.into())
    }

    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn list_volunteer_applications(&self, volunteer_id: i64) -> Result<Vec<Application>> {
        self.get_list::<ApplicationRecord, _>(&format!("/voluntarios/{volunteer_id}/inscricoes")).await
    }

    // Applications

    #[tracing::instrument(skip(self, application), fields(opportunity_id = application.opportunity_id), err(level = "warn"))]
    pub async fn submit_application(&self, application: NewApplication) -> Result<Value> {
        let builder = self.request(Method::POST, self.url("/inscricoes")?).await?;
        Self::fetch_raw(builder.json(&SubmitApplication::from(application))).await
    }

    /// Sends the new status in the JSON body and mirrors it in the query string,
    /// which is where the backend's handler reads it from.
    #[tracing::instrument(skip(self, status), fields(status = %status), err(level = "warn"))]
    pub async fn update_application_status(&self, id: i64, status: ApplicationStatus) -> Result<Value> {
        let mut url = self.url(&format!("/inscricoes/{id}"))?;
        url.query_pairs_mut().append_pair("status", status.as_str());
        let builder = self.request(Method::PATCH, url).await?;
        Self::fetch_raw(builder.json(&StatusUpdate { status })).await
    }

    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn list_applications(&self) -> Result<Vec<Application>> {
        self.get_list::<ApplicationRecord, _>("/inscricoes").await
    }

    // NGOs

    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn list_ngos(&self) -> Result<Vec<Ngo>> {
        self.get_list::<NgoRecord, _>("/ongs").await
    }

    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn list_ngo_applications(&self, ngo_id: i64) -> Result<Vec<Application>> {
        self.get_list::<ApplicationRecord, _>(&format!("/ongs/{ngo_id}/inscricoes")).await
    }
}
