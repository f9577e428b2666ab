//! API key gating and access error classification.

use crate::config::ApiKeySource;
use crate::error::{Result, StudioError};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// Markers the Gemini API uses, inconsistently, for permission and
/// not-found failures. Matched as substrings of the error text.
pub const ACCESS_MARKERS: &[&str] = &[
    "403",
    "PERMISSION_DENIED",
    "404",
    "NOT_FOUND",
    "Requested entity was not found",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Permission or not-found; the key or model is unusable.
    Access,
    Other,
}

impl ErrorClass {
    pub fn is_access(&self) -> bool {
        matches!(self, ErrorClass::Access)
    }
}

/// The one classifier behind both the model fallback and the key reset.
pub fn classify(err: &StudioError) -> ErrorClass {
    match err {
        StudioError::ApiError {
            status: 403 | 404, ..
        } => ErrorClass::Access,
        StudioError::ApiError { message, .. } => {
            if ACCESS_MARKERS.iter().any(|marker| message.contains(marker)) {
                ErrorClass::Access
            } else {
                ErrorClass::Other
            }
        }
        // connect, timeout and other transport failures never reached the API
        _ => ErrorClass::Other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    NoCredential,
    HasCredential,
}

impl AuthState {
    pub fn from_present(present: bool) -> Self {
        if present {
            AuthState::HasCredential
        } else {
            AuthState::NoCredential
        }
    }

    pub fn has_credential(&self) -> bool {
        matches!(self, AuthState::HasCredential)
    }

    pub fn after_selection(self) -> Self {
        AuthState::HasCredential
    }

    /// Access class failures drop the key; anything else leaves it alone.
    pub fn after_failure(self, err: &StudioError) -> Self {
        if classify(err).is_access() {
            AuthState::NoCredential
        } else {
            self
        }
    }
}

/// Key selection capability offered by whatever hosts the studio.
#[async_trait]
pub trait CredentialHost: Send + Sync {
    async fn has_selected_key(&self) -> Result<bool>;
    async fn open_select_key(&self) -> Result<()>;
}

#[derive(Clone, Default)]
pub struct AuthGate {
    host: Option<Arc<dyn CredentialHost>>,
}

impl AuthGate {
    pub fn new(host: Arc<dyn CredentialHost>) -> Self {
        Self { host: Some(host) }
    }

    /// A gate with no host capability: never has a key, cannot select one.
    pub fn unsupported() -> Self {
        Self { host: None }
    }

    pub fn is_supported(&self) -> bool {
        self.host.is_some()
    }

    pub async fn check_credential(&self) -> bool {
        let Some(host) = &self.host else {
            log::debug!("No credential host available");
            return false;
        };

        match host.has_selected_key().await {
            Ok(present) => present,
            Err(e) => {
                log::warn!("Credential check failed, treating as no key: {}", e);
                false
            }
        }
    }

    pub async fn request_credential_selection(&self) -> Result<()> {
        let host = self.host.as_ref().ok_or_else(|| {
            StudioError::SelectionFailed("key selection is not supported by this host".into())
        })?;

        host.open_select_key().await.map_err(|e| match e {
            StudioError::SelectionFailed(_) => e,
            other => StudioError::SelectionFailed(other.to_string()),
        })
    }
}

/// Treats the configured key source as the selected key. Selection reloads a
/// dotenv file and then checks that a key actually showed up.
pub struct EnvCredentialHost {
    source: ApiKeySource,
    dotenv_path: Option<PathBuf>,
}

impl EnvCredentialHost {
    pub fn new(source: ApiKeySource) -> Self {
        Self {
            source,
            dotenv_path: None,
        }
    }

    pub fn with_dotenv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dotenv_path = Some(path.into());
        self
    }
}

#[async_trait]
impl CredentialHost for EnvCredentialHost {
    async fn has_selected_key(&self) -> Result<bool> {
        Ok(self.source.resolve().is_some())
    }

    async fn open_select_key(&self) -> Result<()> {
        let loaded = match &self.dotenv_path {
            Some(path) => dotenv::from_path(path).map(|_| path.clone()),
            None => dotenv::dotenv(),
        };
        match loaded {
            Ok(path) => log::info!("Loaded environment from {}", path.display()),
            Err(e) => log::warn!("Could not load .env file: {}", e),
        }

        if self.source.resolve().is_some() {
            Ok(())
        } else {
            Err(StudioError::SelectionFailed(
                "no API key found; set GEMINI_API_KEY in the environment or a .env file".into(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn api(status: u16, message: &str) -> StudioError {
        StudioError::ApiError {
            status,
            message: message.into(),
        }
    }

    #[test]
    fn test_classify_access_by_status() {
        assert_eq!(classify(&api(403, "denied")), ErrorClass::Access);
        assert_eq!(classify(&api(404, "missing")), ErrorClass::Access);
    }

    #[test]
    fn test_classify_access_by_marker() {
        assert!(classify(&api(400, "PERMISSION_DENIED: no billing")).is_access());
        assert!(classify(&api(500, "Requested entity was not found.")).is_access());
    }

    #[test]
    fn test_transport_errors_are_never_access() {
        let err = StudioError::RequestError(
            "error sending request for url (http://127.0.0.1:14049/403/NOT_FOUND): refused".into(),
        );
        assert_eq!(classify(&err), ErrorClass::Other);
        assert_eq!(
            AuthState::HasCredential.after_failure(&err),
            AuthState::HasCredential
        );
    }

    #[test]
    fn test_classify_other() {
        assert_eq!(
            classify(&api(503, "UNAVAILABLE: The model is overloaded")),
            ErrorClass::Other
        );
        assert_eq!(
            classify(&api(429, "RESOURCE_EXHAUSTED: quota")),
            ErrorClass::Other
        );
        assert_eq!(classify(&StudioError::CredentialMissing), ErrorClass::Other);
        assert_eq!(
            classify(&StudioError::NoImageInResponse(Some("NOT_FOUND".into()))),
            ErrorClass::Other
        );
        assert_eq!(
            classify(&StudioError::MalformedResponse(String::new())),
            ErrorClass::Other
        );
    }

    #[test]
    fn test_state_transitions() {
        let state = AuthState::NoCredential.after_selection();
        assert_eq!(state, AuthState::HasCredential);

        let state = state.after_failure(&api(503, "overloaded"));
        assert_eq!(state, AuthState::HasCredential);

        let state = state.after_failure(&api(400, "PERMISSION_DENIED"));
        assert_eq!(state, AuthState::NoCredential);
    }

    struct FakeHost {
        present: bool,
        fail_query: bool,
        fail_select: bool,
        opened: AtomicBool,
    }

    impl FakeHost {
        fn new(present: bool) -> Self {
            Self {
                present,
                fail_query: false,
                fail_select: false,
                opened: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl CredentialHost for FakeHost {
        async fn has_selected_key(&self) -> Result<bool> {
            if self.fail_query {
                return Err(StudioError::RequestError("host unreachable".into()));
            }
            Ok(self.present)
        }

        async fn open_select_key(&self) -> Result<()> {
            self.opened.store(true, Ordering::SeqCst);
            if self.fail_select {
                return Err(StudioError::RequestError("dialog closed".into()));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_unsupported_gate() {
        let gate = AuthGate::unsupported();
        assert!(!gate.is_supported());
        assert!(!gate.check_credential().await);
        assert!(matches!(
            gate.request_credential_selection().await,
            Err(StudioError::SelectionFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_check_credential_uses_host() {
        assert!(AuthGate::new(Arc::new(FakeHost::new(true))).check_credential().await);
        assert!(!AuthGate::new(Arc::new(FakeHost::new(false))).check_credential().await);

        let failing = FakeHost {
            fail_query: true,
            ..FakeHost::new(true)
        };
        assert!(!AuthGate::new(Arc::new(failing)).check_credential().await);
    }

    #[tokio::test]
    async fn test_selection_errors_become_selection_failed() {
        let host = Arc::new(FakeHost {
            fail_select: true,
            ..FakeHost::new(false)
        });
        let gate = AuthGate::new(host.clone());
        let err = gate.request_credential_selection().await.unwrap_err();
        assert!(host.opened.load(Ordering::SeqCst));
        assert_eq!(
            err.to_string(),
            "API key selection failed: Request error: dialog closed"
        );
    }

    #[tokio::test]
    async fn test_env_host() {
        let var = "MODERA_AUTH_TEST_ENV_HOST_KEY";
        std::env::remove_var(var);
        let dir = tempfile::tempdir().unwrap();
        let dotenv_path = dir.path().join(".env");
        std::fs::write(&dotenv_path, format!("{}=from-dotenv\n", var)).unwrap();

        let host = EnvCredentialHost::new(ApiKeySource::env(var)).with_dotenv_path(&dotenv_path);
        assert!(!host.has_selected_key().await.unwrap());

        host.open_select_key().await.unwrap();
        assert!(host.has_selected_key().await.unwrap());
        std::env::remove_var(var);
    }

    #[tokio::test]
    async fn test_env_host_selection_without_key_fails() {
        let var = "MODERA_AUTH_TEST_ENV_HOST_MISSING";
        std::env::remove_var(var);
        let dir = tempfile::tempdir().unwrap();
        let host = EnvCredentialHost::new(ApiKeySource::env(var))
            .with_dotenv_path(dir.path().join("absent.env"));
        assert!(matches!(
            host.open_select_key().await,
            Err(StudioError::SelectionFailed(_))
        ));
    }
}
