use contracts::domain::simulation::aggregate::{SimulationDetail, SimulationSummary};
use leptos::prelude::*;

use super::api;
use crate::shared::fetch::{use_fetch, Fetched};

pub const SIMULATIONS_ERROR: &str = "Erro ao carregar simulações";
pub const SIMULATION_ERROR: &str = "Erro ao carregar simulação";

pub fn use_simulations() -> Fetched<Vec<SimulationSummary>> {
    use_fetch(
        || Some(()),
        |token, _| async move { api::fetch_simulations(&token).await },
        SIMULATIONS_ERROR,
    )
}

pub fn use_simulation(id: Signal<Option<String>>) -> Fetched<Option<SimulationDetail>> {
    use_fetch(
        move || id.get(),
        |token, id: String| async move { api::fetch_simulation(&token, &id).await.map(Some) },
        SIMULATION_ERROR,
    )
}
