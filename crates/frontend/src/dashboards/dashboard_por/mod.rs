//! "Painel por localidade": enrollments of one localidade by category.

use contracts::domain::simulation::weighting::WeightTable;
use contracts::shared::categories::CategoryMap;
use contracts::shared::number_format::{format_decimal_br, format_int_br};
use leptos::prelude::*;
use thaw::*;

use crate::domain::localidade::hooks::{use_categorias, use_localidades};
use crate::domain::localidade::ui::picker::{selected_id, LocalidadePicker};
use crate::shared::components::empty_state::{EmptyState, ErrorBox};
use crate::shared::components::stat_card::{StatCard, ValueFormat};

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryLine {
    pub key: String,
    pub matriculas: f64,
    pub fator: f64,
    pub ponderadas: f64,
    pub fator_padrao: bool,
}

/// Table rows with the built-in weighting applied.
pub fn category_lines(categorias: &CategoryMap) -> Vec<CategoryLine> {
    let weights = WeightTable::default();
    categorias
        .iter()
        .map(|(key, &matriculas)| {
            let (fator, fator_padrao) = weights.factor(key);
            CategoryLine {
                key: key.clone(),
                matriculas,
                fator,
                ponderadas: matriculas * fator,
                fator_padrao,
            }
        })
        .collect()
}

#[component]
#[allow(non_snake_case)]
pub fn DashboardPor() -> impl IntoView {
    let localidades = use_localidades();
    let selected = RwSignal::new(String::new());
    let localidade_id = Signal::derive(move || selected.with(|s| selected_id(s)));
    let categorias = use_categorias(localidade_id);

    let lines = Memo::new(move |_| categorias.data.with(category_lines));
    let total = Signal::derive(move || {
        localidade_id
            .get()
            .map(|_| lines.with(|l| l.iter().map(|c| c.matriculas).sum::<f64>()))
    });
    let total_ponderadas = Signal::derive(move || {
        localidade_id
            .get()
            .map(|_| lines.with(|l| l.iter().map(|c| c.ponderadas).sum::<f64>()))
    });

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Painel por localidade"</h1>
                </div>
                <div class="page__header-right">
                    <LocalidadePicker localidades=localidades.data value=selected />
                </div>
            </div>

            {move || localidades.error.get().map(|e| view! { <ErrorBox message=e /> })}
            {move || categorias.error.get().map(|e| view! { <ErrorBox message=e /> })}

            <div class="stat-cards">
                <StatCard label="Matrículas" value=total format=ValueFormat::Integer />
                <StatCard
                    label="Matrículas ponderadas"
                    value=total_ponderadas
                    format=ValueFormat::Decimal { decimals: 2 }
                />
            </div>

            {move || {
                if localidade_id.get().is_none() {
                    return view! {
                        <EmptyState
                            title="Selecione uma localidade"
                            description="As matrículas por categoria aparecem aqui."
                        />
                    }
                    .into_any();
                }
                if categorias.loading.get() {
                    return view! { <div class="page__loading"><Spinner /></div> }.into_any();
                }
                let rows = lines.get();
                if rows.is_empty() {
                    return view! {
                        <EmptyState title="Nenhuma categoria cadastrada para esta localidade" />
                    }
                    .into_any();
                }
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
                                            <code>{row.key}</code>
                                            {row.fator_padrao.then(|| view! { <span class="table__cell--muted">" *"</span> })}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell class="text-right">{format_int_br(row.matriculas)}</TableCell>
                                    <TableCell class="text-right">{format_decimal_br(row.fator, 2)}</TableCell>
                                    <TableCell class="text-right">{format_decimal_br(row.ponderadas, 2)}</TableCell>
                                </TableRow>
                            }).collect_view()}
                        </TableBody>
                    </Table>
                }
                .into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_lines_apply_weights() {
        let mut map = CategoryMap::new();
        map.insert("creche_integral".into(), 100.0);
        map.insert("categoria_nova".into(), 10.0);

        let lines = category_lines(&map);
        assert_eq!(lines.len(), 2);

        let nova = &lines[0];
        assert_eq!(nova.key, "categoria_nova");
        assert!(nova.fator_padrao);
        assert_eq!(nova.ponderadas, 10.0);

        let creche = &lines[1];
        assert!(!creche.fator_padrao);
        assert!((creche.ponderadas - 130.0).abs() < 1e-9);
    }
}
