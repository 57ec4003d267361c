pub mod cards;
pub mod composition_modal;

use contracts::domain::simulation::aggregate::{
    MatriculaRow, ProjectionRow, SimulationDetail as Detail,
};
use contracts::shared::number_format::{format_decimal_br, format_int_br};
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;
use thaw::*;

use crate::domain::simulation::hooks::use_simulation;
use crate::shared::components::empty_state::{EmptyState, ErrorBox};
use crate::shared::components::table::TableCellMoney;
use crate::shared::simulation_context::use_simulation_context;
use cards::{IndicatorsCards, SimulationCards};
use composition_modal::ModalComposition;

#[component]
fn MatriculasTable(rows: Vec<MatriculaRow>) -> impl IntoView {
    let total: f64 = rows.iter().map(|r| r.matriculas).sum();
    let total_ponderadas: f64 = rows.iter().map(|r| r.matriculas_ponderadas).sum();
    let any_fallback = rows.iter().any(|r| r.fator_padrao);

    view! {
        <Table attr:style="width: 100%;">
            <TableHeader>
                <TableRow>
                    <TableHeaderCell>"Categoria"</TableHeaderCell>
                    <TableHeaderCell>"Matrículas"</TableHeaderCell>
                    <TableHeaderCell>"Fator"</TableHeaderCell>
                    <TableHeaderCell>"Ponderadas"</TableHeaderCell>
                </TableRow>
            </TableHeader>
            <TableBody>
                {rows.into_iter().map(|row| view! {
                    <TableRow>
                        <TableCell>
                            <TableCellLayout>
                                <code>{row.categoria}</code>
                                {row.fator_padrao.then(|| view! { <span class="table__cell--muted">" *"</span> })}
                            </TableCellLayout>
                        </TableCell>
                        <TableCell class="text-right">{format_int_br(row.matriculas)}</TableCell>
                        <TableCell class="text-right">{format_decimal_br(row.fator_ponderacao, 2)}</TableCell>
                        <TableCell class="text-right">{format_decimal_br(row.matriculas_ponderadas, 2)}</TableCell>
                    </TableRow>
                }).collect_view()}
                <TableRow>
                    <TableCell><strong>"Total"</strong></TableCell>
                    <TableCell class="text-right"><strong>{format_int_br(total)}</strong></TableCell>
                    <TableCell></TableCell>
                    <TableCell class="text-right"><strong>{format_decimal_br(total_ponderadas, 2)}</strong></TableCell>
                </TableRow>
            </TableBody>
        </Table>
        {any_fallback.then(|| view! {
            <p class="table__footnote">"* Categoria sem fator conhecido; usado fator 1,00."</p>
        })}
    }
}

#[component]
fn ProjectionsTable(rows: Vec<ProjectionRow>) -> impl IntoView {
    if rows.is_empty() {
        return view! { <p class="table__cell--muted">"Sem projeção para este cenário."</p> }.into_any();
    }
    view! {
        <Table attr:style="width: 100%;">
            <TableHeader>
                <TableRow>
                    <TableHeaderCell>"Ano"</TableHeaderCell>
                    <TableHeaderCell>"Receita projetada"</TableHeaderCell>
                </TableRow>
            </TableHeader>
            <TableBody>
                {rows.into_iter().map(|row| view! {
                    <TableRow>
                        <TableCell>{row.ano.to_string()}</TableCell>
                        <TableCellMoney value=Some(row.receita_projetada) />
                    </TableRow>
                }).collect_view()}
            </TableBody>
        </Table>
    }
    .into_any()
}

#[component]
fn DetailBody(detail: Detail) -> impl IntoView {
    let show_composition = RwSignal::new(false);
    let Detail { summary, result, .. } = detail;
    let subtitle = format!(
        "{} · referência {}",
        summary.localidade_nome.unwrap_or_else(|| "-".to_string()),
        summary.reference_year
    );

    view! {
        <div class="page__header">
            <div class="page__header-left">
                <h1 class="page__title">{summary.name}</h1>
                <span class="page__subtitle">{subtitle}</span>
            </div>
            <div class="page__header-right">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| show_composition.set(true)>
                    "Composição da receita"
                </Button>
            </div>
        </div>

        <SimulationCards result=result.clone() />

        <section class="card">
            <h2 class="card__title">"Indicadores"</h2>
            <IndicatorsCards indicadores=result.indicadores.clone() />
        </section>

        <section class="card">
            <h2 class="card__title">"Matrículas ponderadas"</h2>
            <MatriculasTable rows=result.matriculas.clone() />
        </section>

        <section class="card">
            <h2 class="card__title">"Projeção da receita"</h2>
            <ProjectionsTable rows=result.projecoes.clone() />
        </section>

        <ModalComposition open=show_composition composition=result.composicao />
    }
}

#[component]
#[allow(non_snake_case)]
pub fn SimulationDetail() -> impl IntoView {
    let params = use_params_map();
    let id = Signal::derive(move || params.read().get("id"));
    let simulation = use_simulation(id);
    let selection = use_simulation_context();

    // Keep the selection in step with what is on screen
    Effect::new(move |_| {
        if let Some(detail) = simulation.data.get() {
            if selection.selected_id().as_deref() != Some(detail.summary.id.as_str()) {
                selection.select(detail.summary);
            }
        }
    });

    view! {
        <div class="page">
            {move || simulation.error.get().map(|e| view! {
                <ErrorBox message=e />
                <A href="/app/simulacoes">"Voltar para minhas simulações"</A>
            })}
            {move || {
                if simulation.loading.get() {
                    return view! { <div class="page__loading"><Spinner /></div> }.into_any();
                }
                match simulation.data.get() {
                    Some(detail) => view! { <DetailBody detail=detail /> }.into_any(),
                    None if simulation.error.get().is_none() => view! {
                        <EmptyState title="Simulação não encontrada" />
                    }
                    .into_any(),
                    None => ().into_any(),
                }
            }}
        </div>
    }
}
