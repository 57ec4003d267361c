pub mod api_utils;
pub mod components;
pub mod fetch;
pub mod hide_values;
pub mod icons;
pub mod simulation_context;
pub mod storage;
