//! User account and session models
//!
//! Wire field names are the backend's Spanish names; they are kept verbatim
//! so serialized payloads match the REST API exactly.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::Role;

/// The identity persisted after login, alongside the bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id_usuario: i64,
    pub nombre: String,
    pub correo: String,
    #[serde(default)]
    pub rol: Option<String>,
    /// Present for seller accounts only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_tienda: Option<i64>,
}

impl SessionUser {
    /// Normalized role, falling back to buyer when the field is missing.
    pub fn role(&self) -> Role {
        self.rol.as_deref().map(Role::from_wire).unwrap_or_default()
    }
}

/// Profile as returned by `GET /users/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id_usuario: i64,
    pub nombre: String,
    pub correo: String,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub rol: Option<String>,
}

/// Buyer registration payload for `POST /users/`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterUserInput {
    #[validate(length(min = 1, message = "El nombre es obligatorio"))]
    pub nombre: String,
    #[validate(email(message = "Correo inválido"))]
    pub correo: String,
    #[validate(length(min = 8, message = "La contraseña debe tener al menos 8 caracteres"))]
    pub contrasena: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    pub rol: String,
}

impl RegisterUserInput {
    pub fn buyer(nombre: String, correo: String, contrasena: String, direccion: String) -> Self {
        Self {
            nombre,
            correo,
            contrasena,
            direccion: Some(direccion),
            rol: Role::Buyer.as_wire().to_string(),
        }
    }

    /// Owner account created together with a store registration.
    pub fn store_owner(nombre: String, correo: String, contrasena: String) -> Self {
        Self {
            nombre,
            correo,
            contrasena,
            direccion: None,
            rol: "tienda".to_string(),
        }
    }
}

/// Profile update payload for `PUT /users/:id`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[validate(email(message = "Correo inválido"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[validate(length(min = 8, message = "La contraseña debe tener al menos 8 caracteres"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrasena: Option<String>,
}
