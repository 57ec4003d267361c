use crate::dashboards::dashboard_por::DashboardPor;
use crate::domain::localidade::ui::admin::LocalidadesAdmin;
use crate::domain::simulation::ui::details::SimulationDetail;
use crate::domain::simulation::ui::list::MinhasSimulacoes;
use crate::domain::simulation::ui::new::NovaSimulacao;
use crate::layout::Layout;
use crate::shared::components::empty_state::EmptyState;
use crate::system::auth::guard::{AdminRoute, PrivateRoute, DEFAULT_APP_PATH};
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;
use leptos_router::components::{ParentRoute, Redirect, Route, Router, Routes, A};
use leptos_router::path;

#[component]
fn PrivateLayout() -> impl IntoView {
    view! {
        <PrivateRoute>
            <Layout />
        </PrivateRoute>
    }
}

#[component]
fn AdminLocalidades() -> impl IntoView {
    view! {
        <AdminRoute>
            <LocalidadesAdmin />
        </AdminRoute>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <EmptyState title="Página não encontrada">
            <A href=DEFAULT_APP_PATH>"Ir para o início"</A>
        </EmptyState>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=NotFound>
                <Route path=path!("/") view=|| view! { <Redirect path=DEFAULT_APP_PATH /> } />
                <Route path=path!("/login") view=LoginPage />
                <ParentRoute path=path!("/app") view=PrivateLayout>
                    <Route path=path!("") view=DashboardPor />
                    <Route path=path!("simulacoes") view=MinhasSimulacoes />
                    <Route path=path!("simulacoes/nova") view=NovaSimulacao />
                    <Route path=path!("simulacoes/:id") view=SimulationDetail />
                    <Route path=path!("admin/localidades") view=AdminLocalidades />
                </ParentRoute>
            </Routes>
        </Router>
    }
}
