use contracts::domain::simulation::aggregate::SimulationSummary;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use thaw::*;

use crate::domain::simulation::api;
use crate::domain::simulation::hooks::use_simulations;
use crate::shared::components::empty_state::{EmptyState, ErrorBox};
use crate::shared::components::table::TableCellMoney;
use crate::shared::icons::icon;
use crate::shared::simulation_context::use_simulation_context;
use crate::system::auth::context::use_auth;

fn format_created_at(dt: chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%d/%m/%Y %H:%M").to_string()
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[component]
#[allow(non_snake_case)]
pub fn MinhasSimulacoes() -> impl IntoView {
    let auth = use_auth();
    let simulations = use_simulations();
    let selection = use_simulation_context();
    let navigate = use_navigate();
    let (action_error, set_action_error) = signal(None::<String>);

    let open = move |summary: SimulationSummary| {
        let path = format!("/app/simulacoes/{}", summary.id);
        selection.select(summary);
        navigate(&path, Default::default());
    };

    let remove = move |summary: SimulationSummary| {
        if !confirm(&format!("Excluir a simulação \"{}\"?", summary.name)) {
            return;
        }
        let Some(token) = auth.token() else { return };
        wasm_bindgen_futures::spawn_local(async move {
            match api::delete_simulation(&token, &summary.id).await {
                Ok(()) => {
                    if selection.selected_id().as_deref() == Some(summary.id.as_str()) {
                        selection.clear();
                    }
                    set_action_error.set(None);
                    simulations.refetch();
                }
                Err(e) => set_action_error.set(Some(e)),
            }
        });
    };

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Minhas simulações"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| simulations.refetch()
                        disabled=simulations.loading
                    >
                        {icon("refresh")}
                        {move || if simulations.loading.get() { " Carregando..." } else { " Atualizar" }}
                    </Button>
                    <A href="/app/simulacoes/nova" attr:class="button button--primary">
                        {icon("plus")}
                        " Nova simulação"
                    </A>
                </div>
            </div>

            {move || simulations.error.get().map(|e| view! { <ErrorBox message=e /> })}
            {move || action_error.get().map(|e| view! { <ErrorBox message=e /> })}

            {move || {
                let items = simulations.data.get();
                if items.is_empty() {
                    if simulations.loading.get() || simulations.error.get().is_some() {
                        return ().into_any();
                    }
                    return view! {
                        <EmptyState
                            title="Nenhuma simulação ainda"
                            description="Crie uma simulação para ver a receita estimada do FUNDEB."
                        >
                            <A href="/app/simulacoes/nova" attr:class="button button--primary">
                                "Criar simulação"
                            </A>
                        </EmptyState>
                    }
                    .into_any();
                }

                let open = open.clone();
                view! {
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Nome"</TableHeaderCell>
                                <TableHeaderCell>"Localidade"</TableHeaderCell>
                                <TableHeaderCell>"Ano"</TableHeaderCell>
                                <TableHeaderCell>"Receita total"</TableHeaderCell>
                                <TableHeaderCell>"Resultado líquido"</TableHeaderCell>
                                <TableHeaderCell>"Criada em"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {items.into_iter().map(|row| {
                                let for_open = row.clone();
                                let for_delete = row.clone();
                                let open = open.clone();
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout>
                                                <a
                                                    href="#"
                                                    on:click=move |e| {
                                                        e.prevent_default();
                                                        open(for_open.clone());
                                                    }
                                                >
                                                    {row.name.clone()}
                                                </a>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                {row.localidade_nome.clone().unwrap_or_else(|| "-".to_string())}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>{row.reference_year.to_string()}</TableCell>
                                        <TableCellMoney value=Some(row.total) />
                                        <TableCellMoney value=Some(row.resultado_liquido) color_by_sign=true />
                                        <TableCell>{format_created_at(row.created_at)}</TableCell>
                                        <TableCell>
                                            <Button
                                                appearance=ButtonAppearance::Subtle
                                                size=ButtonSize::Small
                                                on_click=move |_| remove(for_delete.clone())
                                            >
                                                {icon("delete")}
                                            </Button>
                                        </TableCell>
                                    </TableRow>
                                }
                            }).collect_view()}
                        </TableBody>
                    </Table>
                }
                .into_any()
            }}
        </div>
    }
}
