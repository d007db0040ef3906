//! Document store REST client - authenticated upserts

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value as Json};
use tracing::{error, info};

use super::RemoteError;
use super::value::{Fields, to_fields};

pub const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

#[derive(Serialize)]
struct WriteRequest<'a> {
    fields: &'a Fields,
}

#[derive(Debug, Clone)]
pub struct FirestoreClient {
    http: reqwest::Client,
    base_url: String,
    project_id: Option<String>,
}

impl FirestoreClient {
    pub fn new(project_id: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: FIRESTORE_BASE_URL.to_string(),
            project_id,
        }
    }

    /// Point the client at another endpoint (emulator, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn document_url(&self, collection: &str, document_id: Option<&str>) -> Result<String, RemoteError> {
        let project = self.project_id
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or(RemoteError::MissingProjectId)?;

        let mut url = format!(
            "{}/projects/{}/databases/(default)/documents/{}",
            self.base_url, project, collection
        );
        if let Some(id) = document_id {
            url.push('/');
            url.push_str(id);
        }
        Ok(url)
    }

    /// Create or overwrite a document; returns the stored document JSON.
    /// Without a document id the collection path itself is patched.
    pub async fn upsert(
        &self,
        token: &str,
        collection: &str,
        record: &Map<String, Json>,
        document_id: Option<&str>,
    ) -> Result<Json, RemoteError> {
        let url = self.document_url(collection, document_id)?;
        let fields = to_fields(record);

        let response = self.http
            .patch(&url)
            .bearer_auth(token)
            .json(&WriteRequest { fields: &fields })
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let body: Json = serde_json::from_str(&text).unwrap_or(Json::String(text));

        if !status.is_success() {
            error!("Document store error ({}): {}", status, body);
            return Err(RemoteError::Http { status, body });
        }

        info!("Document written to {}", collection);
        Ok(body)
    }
}

/// Status of a rejected write, if that is what the error was
pub fn rejected_status(err: &RemoteError) -> Option<StatusCode> {
    match err {
        RemoteError::Http { status, .. } => Some(*status),
        _ => None,
    }
}
