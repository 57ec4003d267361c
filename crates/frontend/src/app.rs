use crate::routes::routes::AppRoutes;
use crate::shared::hide_values::HideValuesProvider;
use crate::shared::simulation_context::SimulationProvider;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <AuthProvider>
            <HideValuesProvider>
                <SimulationProvider>
                    <AppRoutes />
                </SimulationProvider>
            </HideValuesProvider>
        </AuthProvider>
    }
}
