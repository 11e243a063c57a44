//! REST client for the hosted backend.

use super::{filter_params, query_params};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, multipart};
use serde::Deserialize;
use serde_json::Value;
use storie_core::{BackendConfig, Session};
use storie_error::{
    HttpError, PersistenceError, PersistenceErrorKind, StorageError, StorageErrorKind,
    StorieResult,
};
use storie_interface::{BlobStore, Filter, Query, RowStore, SessionStore, StoredBlob};
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// Which records operation a request performs, for error reporting.
#[derive(Debug, Clone, Copy)]
enum Op {
    Insert,
    Select,
    Update,
    Delete,
}

impl Op {
    fn error(self, table: &str, message: String) -> PersistenceErrorKind {
        let table = table.to_string();
        match self {
            Op::Insert => PersistenceErrorKind::Insert { table, message },
            Op::Select => PersistenceErrorKind::Select { table, message },
            Op::Update => PersistenceErrorKind::Update { table, message },
            Op::Delete => PersistenceErrorKind::Delete { table, message },
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserDto {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    access_token: String,
    user: UserDto,
}

#[derive(Debug, Deserialize)]
struct CurrentSessionResponse {
    #[serde(default)]
    user: Option<UserDto>,
}

/// Client for the hosted backend's auth, records and storage APIs.
///
/// Requests authenticate with the signed-in user's access token when one is
/// set, otherwise with the anonymous key. Row-level security on the backend
/// scopes every table operation to the authenticated user.
#[derive(Debug)]
pub struct HostedBackend {
    client: Client,
    base_url: String,
    anon_key: String,
    access_token: RwLock<Option<String>>,
}

impl HostedBackend {
    /// Creates a client for `base_url` authenticating with `anon_key`.
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(url = %base_url, "Created hosted backend client");
        Self {
            client: Client::new(),
            base_url,
            anon_key: anon_key.into(),
            access_token: RwLock::new(None),
        }
    }

    /// Creates a client from configuration, failing when the URL or key is unset.
    pub fn from_config(config: &BackendConfig) -> StorieResult<Self> {
        let base_url = config.require_base_url()?;
        let anon_key = config.require_anon_key()?;
        Ok(Self::new(base_url, anon_key))
    }

    /// Use an existing access token (e.g. from a previous sign-in).
    pub fn with_access_token(self, token: impl Into<String>) -> Self {
        Self {
            access_token: RwLock::new(Some(token.into())),
            ..self
        }
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sign in with email and password; later requests use the returned token.
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> StorieResult<Session> {
        let response = self
            .request(Method::POST, "/api/auth/sessions")
            .await
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| HttpError::new(format!("Sign-in request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, "Sign-in rejected");
            return Err(PersistenceError::new(PersistenceErrorKind::Unauthorized(format!(
                "sign-in failed ({}): {}",
                status, body
            )))
            .into());
        }

        let signed_in: SignInResponse = response.json().await.map_err(|e| {
            HttpError::new(format!("Failed to read sign-in response: {}", e))
        })?;

        *self.access_token.write().await = Some(signed_in.access_token.clone());
        info!(user_id = %signed_in.user.id, "Signed in");

        Ok(Session {
            user_id: signed_in.user.id,
            email: signed_in.user.email,
            access_token: Some(signed_in.access_token),
        })
    }

    async fn bearer(&self) -> String {
        self.access_token
            .read()
            .await
            .clone()
            .unwrap_or_else(|| self.anon_key.clone())
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(self.bearer().await)
    }

    fn records_path(table: &str) -> String {
        format!("/api/database/records/{}", table)
    }

    async fn send_records(
        &self,
        op: Op,
        table: &str,
        builder: RequestBuilder,
    ) -> StorieResult<Vec<Value>> {
        let response = builder
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(|e| HttpError::new(format!("Records request failed: {}", e)))?;

        let response = Self::check(op, table, response).await?;
        let text = response
            .text()
            .await
            .map_err(|e| HttpError::new(format!("Failed to read records response: {}", e)))?;

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(rows)) => Ok(rows),
            Ok(row @ Value::Object(_)) => Ok(vec![row]),
            Ok(other) => Err(PersistenceError::new(PersistenceErrorKind::RowConversion {
                table: table.to_string(),
                message: format!("expected rows, got {}", other),
            })
            .into()),
            Err(e) => Err(PersistenceError::new(PersistenceErrorKind::RowConversion {
                table: table.to_string(),
                message: e.to_string(),
            })
            .into()),
        }
    }

    async fn check(op: Op, table: &str, response: Response) -> StorieResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        error!(status = %status, table, body = %body, "Records request failed");
        let kind = if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            PersistenceErrorKind::Unauthorized(format!("{} on '{}': {}", status, table, body))
        } else {
            op.error(table, format!("{}: {}", status, body))
        };
        Err(PersistenceError::new(kind).into())
    }
}

#[async_trait]
impl SessionStore for HostedBackend {
    #[instrument(skip(self))]
    async fn current_session(&self) -> StorieResult<Option<Session>> {
        let token = self.access_token.read().await.clone();
        let Some(token) = token else {
            return Ok(None);
        };

        let response = self
            .request(Method::GET, "/api/auth/sessions/current")
            .await
            .send()
            .await
            .map_err(|e| HttpError::new(format!("Session request failed: {}", e)))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            debug!("Access token rejected, no session");
            return Ok(None);
        }
        let response = Self::check(Op::Select, "sessions", response).await?;

        let current: CurrentSessionResponse = response
            .json()
            .await
            .map_err(|e| HttpError::new(format!("Failed to read session response: {}", e)))?;

        Ok(current.user.map(|user| Session {
            user_id: user.id,
            email: user.email,
            access_token: Some(token),
        }))
    }
}

#[async_trait]
impl RowStore for HostedBackend {
    #[instrument(skip(self, rows), fields(count = rows.len()))]
    async fn insert(&self, table: &str, rows: Vec<Value>) -> StorieResult<Vec<Value>> {
        let builder = self
            .request(Method::POST, &Self::records_path(table))
            .await
            .json(&rows);
        self.send_records(Op::Insert, table, builder).await
    }

    #[instrument(skip(self))]
    async fn select(&self, table: &str, query: &Query) -> StorieResult<Vec<Value>> {
        let builder = self
            .request(Method::GET, &Self::records_path(table))
            .await
            .query(&query_params(query));
        self.send_records(Op::Select, table, builder).await
    }

    #[instrument(skip(self, patch))]
    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: Value,
    ) -> StorieResult<Vec<Value>> {
        let builder = self
            .request(Method::PATCH, &Self::records_path(table))
            .await
            .query(&filter_params(filters))
            .json(&patch);
        self.send_records(Op::Update, table, builder).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, table: &str, filters: &[Filter]) -> StorieResult<usize> {
        let builder = self
            .request(Method::DELETE, &Self::records_path(table))
            .await
            .query(&filter_params(filters));
        let removed = self.send_records(Op::Delete, table, builder).await?;
        Ok(removed.len())
    }
}

#[async_trait]
impl BlobStore for HostedBackend {
    #[instrument(skip(self, data), fields(size = data.len()))]
    async fn upload(
        &self,
        bucket: &str,
        data: &[u8],
        content_type: &str,
    ) -> StorieResult<StoredBlob> {
        let extension = content_type.rsplit('/').next().unwrap_or("bin");
        let part = multipart::Part::bytes(data.to_vec())
            .file_name(format!("{}.{}", Uuid::new_v4(), extension))
            .mime_str(content_type)
            .map_err(|e| {
                StorageError::new(StorageErrorKind::UploadRejected(format!(
                    "invalid content type {}: {}",
                    content_type, e
                )))
            })?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .request(
                Method::POST,
                &format!("/api/storage/buckets/{}/objects", bucket),
            )
            .await
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::Unavailable(format!(
                    "upload request failed: {}",
                    e
                )))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, bucket, "Upload rejected");
            return Err(StorageError::new(StorageErrorKind::UploadRejected(format!(
                "{}: {}",
                status, body
            )))
            .into());
        }

        let blob: StoredBlob = response.json().await.map_err(|e| {
            StorageError::new(StorageErrorKind::UploadRejected(format!(
                "unexpected upload response: {}",
                e
            )))
        })?;

        info!(bucket, key = %blob.key, "Uploaded blob");
        Ok(blob)
    }
}
