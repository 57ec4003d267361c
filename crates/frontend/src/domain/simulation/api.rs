use contracts::domain::simulation::aggregate::{
    NewSimulationDto, SimulationDetail, SimulationSummary,
};

use crate::shared::api_utils::{delete, get_json, post_json};

pub async fn fetch_simulations(token: &str) -> Result<Vec<SimulationSummary>, String> {
    get_json("/api/simulations", token).await
}

pub async fn fetch_simulation(token: &str, id: &str) -> Result<SimulationDetail, String> {
    get_json(&format!("/api/simulations/{}", id), token).await
}

pub async fn create_simulation(
    token: &str,
    dto: &NewSimulationDto,
) -> Result<SimulationDetail, String> {
    post_json("/api/simulations", token, dto).await
}

pub async fn delete_simulation(token: &str, id: &str) -> Result<(), String> {
    delete(&format!("/api/simulations/{}", id), token).await
}
