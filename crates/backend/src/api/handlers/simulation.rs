use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::simulation::aggregate::{
    NewSimulationDto, SimulationDetail, SimulationSummary,
};

use crate::domain::simulation::service;
use crate::domain::ServiceError;
use crate::system::auth::extractor::AuthenticatedUser;

/// GET /api/simulations
pub async fn list(user: AuthenticatedUser) -> Result<Json<Vec<SimulationSummary>>, ServiceError> {
    Ok(Json(service::list(&user.caller()).await?))
}

/// GET /api/simulations/:id
pub async fn get_by_id(
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<SimulationDetail>, ServiceError> {
    Ok(Json(service::get(&user.caller(), &id).await?))
}

/// POST /api/simulations
pub async fn create(
    user: AuthenticatedUser,
    Json(dto): Json<NewSimulationDto>,
) -> Result<(StatusCode, Json<SimulationDetail>), ServiceError> {
    let detail = service::create(&user.caller(), dto).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// DELETE /api/simulations/:id
pub async fn delete(
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    service::delete(&user.caller(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
