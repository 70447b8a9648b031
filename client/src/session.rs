//! Session persistence for the authenticated user
//!
//! The browser client kept `token` and `usuario` in local storage and read
//! them ad hoc from every page. Here the same pair lives behind a single
//! `SessionStore` capability injected wherever identity is needed.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use shared::models::user::SessionUser;
use shared::types::Role;

use crate::error::{AppError, AppResult};

/// Access to the persisted session: bearer token plus user identity.
pub trait SessionStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn current_user(&self) -> Option<SessionUser>;
    fn store(&self, token: &str, user: &SessionUser) -> AppResult<()>;
    fn logout(&self) -> AppResult<()>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PersistedSession {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    usuario: Option<SessionUser>,
}

/// JSON-file-backed session store, the native analogue of local storage.
pub struct FileSessionStore {
    path: PathBuf,
    cached: RwLock<PersistedSession>,
}

impl FileSessionStore {
    /// Open (or lazily create) the session file at `path`.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let cached = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| AppError::Session(format!("corrupt session file: {e}")))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => PersistedSession::default(),
            Err(err) => return Err(AppError::Session(err.to_string())),
        };
        Ok(Self {
            path,
            cached: RwLock::new(cached),
        })
    }

    fn persist(&self, session: &PersistedSession) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| AppError::Session(e.to_string()))?;
            }
        }
        let raw = serde_json::to_string_pretty(session)
            .map_err(|e| AppError::Session(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| AppError::Session(e.to_string()))
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<String> {
        self.cached.read().ok()?.token.clone()
    }

    fn current_user(&self) -> Option<SessionUser> {
        self.cached.read().ok()?.usuario.clone()
    }

    fn store(&self, token: &str, user: &SessionUser) -> AppResult<()> {
        let session = PersistedSession {
            token: Some(token.to_string()),
            usuario: Some(user.clone()),
        };
        self.persist(&session)?;
        let mut cached = self
            .cached
            .write()
            .map_err(|_| AppError::Session("session lock poisoned".into()))?;
        *cached = session;
        Ok(())
    }

    fn logout(&self) -> AppResult<()> {
        let session = PersistedSession::default();
        self.persist(&session)?;
        let mut cached = self
            .cached
            .write()
            .map_err(|_| AppError::Session("session lock poisoned".into()))?;
        *cached = session;
        Ok(())
    }
}

/// In-memory session store for tests and short-lived embeddings.
#[derive(Default)]
pub struct MemorySessionStore {
    state: RwLock<PersistedSession>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with an authenticated session.
    pub fn authenticated(token: &str, user: SessionUser) -> Self {
        Self {
            state: RwLock::new(PersistedSession {
                token: Some(token.to_string()),
                usuario: Some(user),
            }),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.state.read().ok()?.token.clone()
    }

    fn current_user(&self) -> Option<SessionUser> {
        self.state.read().ok()?.usuario.clone()
    }

    fn store(&self, token: &str, user: &SessionUser) -> AppResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| AppError::Session("session lock poisoned".into()))?;
        state.token = Some(token.to_string());
        state.usuario = Some(user.clone());
        Ok(())
    }

    fn logout(&self) -> AppResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| AppError::Session("session lock poisoned".into()))?;
        *state = PersistedSession::default();
        Ok(())
    }
}

/// Claims carried in the JWT payload.
///
/// Read without signature verification; the client only needs the role to
/// decide where to navigate after login.
#[derive(Debug, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
}

/// Decode the payload segment of a JWT.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Normalized role from a token, falling back to buyer when the claim is
/// missing or the token is unreadable.
pub fn role_from_token(token: &str) -> Role {
    decode_claims(token)
        .and_then(|claims| claims.role)
        .map(|role| Role::from_wire(&role))
        .unwrap_or_default()
}
