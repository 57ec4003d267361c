pub mod localidade;
pub mod simulation;
