//! Wiring configuration into clients, backends and the storybook service.

use std::sync::Arc;
use storie_backend::{HostedBackend, StorybookRepository};
use storie_core::StorieConfig;
use storie_error::StorieResult;
use storie_generation::{ImageGenerator, StorybookPipeline, StorybookService, TextGenerator};
use storie_interface::{Backend, BlobStore, HttpTransport, ImageDriver, TextDriver};
use storie_models::{OpenAIChatClient, ReqwestTransport, WavespeedClient};
use tracing::{debug, info, instrument};

/// How to authenticate against the hosted backend.
#[derive(Clone, Default)]
pub enum Credentials {
    /// Anonymous key only; row operations will be rejected by row-level security
    #[default]
    Anonymous,
    /// A previously issued access token
    AccessToken(String),
    /// Email and password sign-in
    Password {
        /// Account email
        email: String,
        /// Account password
        password: String,
    },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Anonymous => f.write_str("Anonymous"),
            Credentials::AccessToken(_) => f.write_str("AccessToken(..)"),
            Credentials::Password { email, .. } => f
                .debug_struct("Password")
                .field("email", email)
                .finish_non_exhaustive(),
        }
    }
}

impl Credentials {
    /// Read `STORIE_ACCESS_TOKEN`, else `STORIE_EMAIL` and `STORIE_PASSWORD`.
    pub fn from_env() -> Self {
        if let Ok(token) = std::env::var("STORIE_ACCESS_TOKEN") {
            if !token.trim().is_empty() {
                return Credentials::AccessToken(token);
            }
        }
        match (std::env::var("STORIE_EMAIL"), std::env::var("STORIE_PASSWORD")) {
            (Ok(email), Ok(password)) => Credentials::Password { email, password },
            _ => Credentials::Anonymous,
        }
    }
}

/// Connect to the hosted backend and authenticate.
///
/// # Errors
///
/// `ConfigError` when the base URL or anonymous key is unset, or a
/// `PersistenceError` when sign-in is rejected.
#[instrument(skip(config))]
pub async fn connect(
    config: &StorieConfig,
    credentials: Credentials,
) -> StorieResult<Arc<HostedBackend>> {
    let backend = HostedBackend::from_config(&config.backend)?;
    let backend = match credentials {
        Credentials::Anonymous => backend,
        Credentials::AccessToken(token) => backend.with_access_token(token),
        Credentials::Password { email, password } => {
            let session = backend.sign_in(&email, &password).await?;
            info!(user_id = %session.user_id, "Signed in");
            backend
        }
    };
    Ok(Arc::new(backend))
}

/// Text and image providers built from configuration, sharing one HTTP client.
///
/// Fails fast when either API key is unset.
pub fn providers(
    config: &StorieConfig,
) -> StorieResult<(Arc<dyn TextDriver>, Arc<dyn ImageDriver>)> {
    let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new());
    let text = OpenAIChatClient::from_config(&config.text, transport.clone())?;
    let image = WavespeedClient::from_config(&config.image, transport)?;
    debug!(model = %config.text.model, "Providers configured");
    Ok((Arc::new(text), Arc::new(image)))
}

/// A pipeline uploading illustrations to `blobs`.
pub fn build_pipeline(
    config: &StorieConfig,
    blobs: Arc<dyn BlobStore>,
) -> StorieResult<StorybookPipeline> {
    let (text, image) = providers(config)?;
    let image = ImageGenerator::new(image, blobs, config.backend.bucket.clone()).with_format(
        config.image.resolution.clone(),
        config.image.output_format.clone(),
    );
    Ok(StorybookPipeline::new(TextGenerator::new(text), image))
}

/// The full service over `backend`, which stores both rows and illustrations.
pub fn build_service<B: Backend + 'static>(
    config: &StorieConfig,
    backend: Arc<B>,
) -> StorieResult<StorybookService> {
    let pipeline = build_pipeline(config, backend.clone())?;
    Ok(StorybookService::new(
        pipeline,
        StorybookRepository::new(backend),
        &config.storybook,
    ))
}
