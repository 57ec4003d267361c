use contracts::domain::simulation::aggregate::{IndicatorRow, SimulationResult};
use leptos::prelude::*;

use crate::shared::components::stat_card::{CardStatus, StatCard, ValueFormat};

/// Headline numbers of a simulation.
#[component]
pub fn SimulationCards(result: SimulationResult) -> impl IntoView {
    let composicao = result.composicao.clone();
    let total_matriculas = result.total_matriculas();
    let ponderadas = result.total_matriculas_ponderadas();

    view! {
        <div class="stat-cards">
            <StatCard
                label="Receita total do FUNDEB"
                icon_name="simulations"
                value=Some(composicao.total)
                format=ValueFormat::Money
            />
            <StatCard
                label="Complementações da União"
                value=Some(composicao.complementacoes())
                format=ValueFormat::Money
            />
            <StatCard
                label="Resultado líquido"
                value=Some(composicao.resultado_liquido)
                format=ValueFormat::Money
                status=Some(CardStatus::by_sign(composicao.resultado_liquido))
                subtitle=Some("Receita recebida menos a contribuição".to_string())
            />
            <StatCard
                label="Matrículas"
                value=Some(total_matriculas)
                format=ValueFormat::Integer
                subtitle=Some(format!(
                    "{} ponderadas",
                    ValueFormat::Decimal { decimals: 2 }.format(ponderadas)
                ))
            />
        </div>
    }
}

#[component]
pub fn IndicatorsCards(indicadores: Vec<IndicatorRow>) -> impl IntoView {
    view! {
        <div class="stat-cards">
            {indicadores
                .into_iter()
                .map(|row| {
                    view! {
                        <StatCard
                            label=row.nome
                            value=Some(row.valor)
                            format=ValueFormat::from(row.unidade)
                        />
                    }
                })
                .collect_view()}
        </div>
    }
}
