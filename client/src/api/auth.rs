//! Authentication endpoints: login, registration, password recovery

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use shared::models::store::RegisterStoreInput;
use shared::models::user::{RegisterUserInput, SessionUser};
use shared::types::Role;

use crate::error::AppResult;
use crate::session::role_from_token;

use super::{ApiClient, ApiEnvelope};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    correo: &'a str,
    contrasena: &'a str,
}

/// Payload of a successful login (`{ data: { token, usuario } }`)
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub usuario: SessionUser,
}

impl LoginData {
    /// Role used for post-login navigation: the JWT claim wins, the
    /// persisted user record is the fallback.
    pub fn role(&self) -> Role {
        match crate::session::decode_claims(&self.token).and_then(|c| c.role) {
            Some(role) => Role::from_wire(&role),
            None => self.usuario.role(),
        }
    }
}

impl ApiClient {
    /// `POST /users/login` — authenticate and persist the session.
    pub async fn login(&self, correo: &str, contrasena: &str) -> AppResult<LoginData> {
        let response = self
            .http()
            .post(self.url("/users/login"))
            .json(&LoginRequest { correo, contrasena })
            .send()
            .await?;

        let envelope: ApiEnvelope<LoginData> = Self::read_json(response).await?;
        let data = envelope.data;

        self.session().store(&data.token, &data.usuario)?;
        info!(
            user = data.usuario.id_usuario,
            role = ?role_from_token(&data.token),
            "login succeeded"
        );
        Ok(data)
    }

    /// `POST /users/` — buyer registration.
    pub async fn register_user(&self, input: &RegisterUserInput) -> AppResult<()> {
        input.validate()?;
        let response = self
            .http()
            .post(self.url("/users/"))
            .json(input)
            .send()
            .await?;
        Self::expect_success(response).await
    }

    /// `POST /stores/` — store + owner registration in one request.
    pub async fn register_store(&self, input: &RegisterStoreInput) -> AppResult<()> {
        input.validate()?;
        let response = self
            .http()
            .post(self.url("/stores/"))
            .json(input)
            .send()
            .await?;
        Self::expect_success(response).await
    }

    /// `POST /auth/forgot-password` — request a password reset email.
    pub async fn forgot_password(&self, correo: &str) -> AppResult<()> {
        let response = self
            .http()
            .post(self.url("/auth/forgot-password"))
            .json(&serde_json::json!({ "correo": correo }))
            .send()
            .await?;
        Self::expect_success(response).await
    }

    /// `POST /auth/reset-password` — set a new password from a reset token.
    pub async fn reset_password(&self, reset_token: &str, contrasena: &str) -> AppResult<()> {
        let response = self
            .http()
            .post(self.url("/auth/reset-password"))
            .json(&serde_json::json!({
                "token": reset_token,
                "contrasena": contrasena,
            }))
            .send()
            .await?;
        Self::expect_success(response).await
    }
}
