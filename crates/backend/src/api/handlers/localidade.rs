use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::localidade::aggregate::{Localidade, LocalidadeDto};
use contracts::shared::categories::RawCategoryMap;

use crate::domain::localidade::service;
use crate::domain::ServiceError;

/// GET /api/localidades
pub async fn list_all() -> Result<Json<Vec<Localidade>>, ServiceError> {
    Ok(Json(service::list_all().await?))
}

/// POST /api/localidades
pub async fn create(
    Json(dto): Json<LocalidadeDto>,
) -> Result<(StatusCode, Json<Localidade>), ServiceError> {
    let localidade = service::create(dto).await?;
    Ok((StatusCode::CREATED, Json(localidade)))
}

/// GET /api/localidades/:id/categorias
///
/// Returns the raw map; clients normalize it.
pub async fn get_categorias(Path(id): Path<String>) -> Result<Json<RawCategoryMap>, ServiceError> {
    Ok(Json(service::get_categorias(&id).await?))
}

/// PUT /api/localidades/:id/categorias
pub async fn replace_categorias(
    Path(id): Path<String>,
    Json(categorias): Json<RawCategoryMap>,
) -> Result<StatusCode, ServiceError> {
    service::replace_categorias(&id, categorias).await?;
    Ok(StatusCode::NO_CONTENT)
}
