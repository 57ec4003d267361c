use contracts::domain::simulation::aggregate::{Composition, RevenueSource};
use contracts::shared::number_format::format_percent_br;
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::table::TableCellMoney;

#[derive(Clone, Debug, PartialEq)]
pub struct CompositionLine {
    pub label: &'static str,
    pub valor: f64,
    /// Share of the total; 0 when the total is 0.
    pub participacao: f64,
}

pub fn composition_lines(c: &Composition) -> Vec<CompositionLine> {
    let share = |v: f64| if c.total > 0.0 { v / c.total } else { 0.0 };
    [
        (RevenueSource::Redistribuicao, c.receita_redistribuida),
        (RevenueSource::ComplementacaoVaaf, c.complementacao_vaaf),
        (RevenueSource::ComplementacaoVaat, c.complementacao_vaat),
        (RevenueSource::ComplementacaoVaar, c.complementacao_vaar),
    ]
    .into_iter()
    .map(|(source, valor)| CompositionLine {
        label: source.label(),
        valor,
        participacao: share(valor),
    })
    .collect()
}

/// Where the FUNDEB revenue comes from, and the net against the contribution.
#[component]
pub fn ModalComposition(open: RwSignal<bool>, composition: Composition) -> impl IntoView {
    let lines = composition_lines(&composition);

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Composição da receita"</DialogTitle>
                    <DialogContent>
                        <Table>
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"Origem"</TableHeaderCell>
                                    <TableHeaderCell>"Valor"</TableHeaderCell>
                                    <TableHeaderCell>"Participação"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                {lines.into_iter().map(|line| view! {
                                    <TableRow>
                                        <TableCell>{line.label}</TableCell>
                                        <TableCellMoney value=Some(line.valor) />
                                        <TableCell class="text-right">{format_percent_br(line.participacao)}</TableCell>
                                    </TableRow>
                                }).collect_view()}
                                <TableRow>
                                    <TableCell><strong>"Total recebido"</strong></TableCell>
                                    <TableCellMoney value=Some(composition.total) bold=true />
                                    <TableCell class="text-right">{format_percent_br(1.0)}</TableCell>
                                </TableRow>
                                <TableRow>
                                    <TableCell>"(-) Contribuição ao fundo"</TableCell>
                                    <TableCellMoney value=Some(-composition.contribuicao) />
                                    <TableCell></TableCell>
                                </TableRow>
                                <TableRow>
                                    <TableCell><strong>"Resultado líquido"</strong></TableCell>
                                    <TableCellMoney value=Some(composition.resultado_liquido) color_by_sign=true bold=true />
                                    <TableCell></TableCell>
                                </TableRow>
                            </TableBody>
                        </Table>
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Subtle on_click=move |_| open.set(false)>
                            "Fechar"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composition_lines_shares() {
        let c = Composition {
            receita_redistribuida: 6_000_000.0,
            complementacao_vaaf: 1_500_000.0,
            complementacao_vaat: 2_500_000.0,
            complementacao_vaar: 0.0,
            total: 10_000_000.0,
            contribuicao: 5_000_000.0,
            resultado_liquido: 5_000_000.0,
        };
        let lines = composition_lines(&c);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].label, RevenueSource::Redistribuicao.label());
        assert!((lines[0].participacao - 0.6).abs() < 1e-12);
        assert!((lines[2].participacao - 0.25).abs() < 1e-12);
        let sum: f64 = lines.iter().map(|l| l.participacao).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_composition_lines_zero_total() {
        let lines = composition_lines(&Composition::default());
        assert!(lines.iter().all(|l| l.participacao == 0.0));
    }
}
