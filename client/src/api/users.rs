//! User profile endpoints

use validator::Validate;

use shared::models::user::{UpdateUserInput, UserProfile};
use shared::types::UserId;

use crate::error::AppResult;

use super::{ApiClient, MaybeEnveloped};

impl ApiClient {
    /// `GET /users/:id` — read a profile.
    pub async fn user_profile(&self, id: UserId) -> AppResult<UserProfile> {
        let builder = self.http().get(self.url(&format!("/users/{id}")));
        let response = self.authorized(builder)?.send().await?;
        let profile: MaybeEnveloped<UserProfile> = Self::read_json(response).await?;
        Ok(profile.into_inner())
    }

    /// `PUT /users/:id` — update a profile.
    ///
    /// When the updated account is the one in the session, the persisted
    /// identity is refreshed so later reads see the new name and email.
    pub async fn update_user_profile(
        &self,
        id: UserId,
        input: &UpdateUserInput,
    ) -> AppResult<()> {
        input.validate()?;
        let builder = self.http().put(self.url(&format!("/users/{id}"))).json(input);
        let response = self.authorized(builder)?.send().await?;
        Self::expect_success(response).await?;

        if let (Some(token), Some(mut user)) =
            (self.session().token(), self.session().current_user())
        {
            if user.id_usuario == id.0 {
                if let Some(nombre) = &input.nombre {
                    user.nombre = nombre.clone();
                }
                if let Some(correo) = &input.correo {
                    user.correo = correo.clone();
                }
                self.session().store(&token, &user)?;
            }
        }
        Ok(())
    }
}
