//! Store profile and registration models

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::RegisterUserInput;

/// Store profile as returned by `GET /stores/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreProfile {
    pub id_tienda: i64,
    #[serde(default)]
    pub id_usuario: Option<i64>,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub area_responsable: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub correo: Option<String>,
}

/// Store + owner registration payload for `POST /stores/`
///
/// The backend creates the store and its owner account in one request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterStoreInput {
    #[validate(length(min = 1, message = "El área responsable es obligatoria"))]
    pub area_responsable: String,
    #[validate(length(min = 1, message = "La dirección es obligatoria"))]
    pub direccion: String,
    pub telefono: String,
    #[validate]
    pub usuario: RegisterUserInput,
}

/// Store profile update payload for `PUT /stores/:id`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateStoreInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_responsable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
}
