use contracts::domain::simulation::aggregate::SimulationSummary;
use leptos::prelude::*;

/// The simulation currently in focus (picked in the list or just created).
#[derive(Clone, Copy)]
pub struct SimulationContext {
    selected: RwSignal<Option<SimulationSummary>>,
}

impl SimulationContext {
    pub fn selected(&self) -> Option<SimulationSummary> {
        self.selected.get()
    }

    pub fn selected_id(&self) -> Option<String> {
        self.selected.with(|s| s.as_ref().map(|s| s.id.clone()))
    }

    pub fn select(&self, summary: SimulationSummary) {
        self.selected.set(Some(summary));
    }

    pub fn clear(&self) {
        self.selected.set(None);
    }
}

#[component]
pub fn SimulationProvider(children: Children) -> impl IntoView {
    provide_context(SimulationContext {
        selected: RwSignal::new(None),
    });
    children()
}

/// Panics outside [`SimulationProvider`].
pub fn use_simulation_context() -> SimulationContext {
    use_context::<SimulationContext>().expect("SimulationProvider not found in component tree")
}
