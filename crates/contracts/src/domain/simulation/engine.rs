//! FUNDEB redistribution engine.
//!
//! Given the normalized enrollments of a localidade and the fund parameters
//! of the reference year, computes what the localidade receives from the
//! state fund, the three federal complementations (VAAF, VAAT, VAAR) and the
//! derived indicators and projections.

use thiserror::Error;

use super::aggregate::{
    Composition, IndicatorRow, IndicatorUnit, MatriculaRow, ProjectionRow, RevenueRow,
    RevenueSource, SimulationParameters, SimulationResult,
};
use super::weighting::WeightTable;
use crate::shared::categories::CategoryMap;

/// Share of the fund reserved for paying education professionals.
pub const MINIMO_REMUNERACAO_PROFISSIONAIS: f64 = 0.70;
/// Share of the VAAT complementation reserved for early childhood education.
pub const MINIMO_VAAT_EDUCACAO_INFANTIL: f64 = 0.50;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("parâmetro inválido: {0}")]
    InvalidParameter(String),
    #[error("a localidade não possui matrículas para simular")]
    NoEnrollments,
}

pub fn simulate(
    matriculas: &CategoryMap,
    params: &SimulationParameters,
) -> Result<SimulationResult, SimulationError> {
    params.validate()?;

    let weights = WeightTable::with_overrides(&params.ponderadores);
    let rows: Vec<MatriculaRow> = matriculas
        .iter()
        .map(|(categoria, &quantidade)| {
            let (fator, padrao) = weights.factor(categoria);
            MatriculaRow {
                categoria: categoria.clone(),
                matriculas: quantidade,
                fator_ponderacao: fator,
                matriculas_ponderadas: quantidade * fator,
                fator_padrao: padrao,
            }
        })
        .collect();

    let ponderadas: f64 = rows.iter().map(|r| r.matriculas_ponderadas).sum();
    if ponderadas <= 0.0 {
        return Err(SimulationError::NoEnrollments);
    }

    let vaaf_estado = params.fundo_estadual_total / params.matriculas_ponderadas_estado;
    let redistribuicao = vaaf_estado * ponderadas;
    let compl_vaaf = (params.vaaf_minimo - vaaf_estado).max(0.0) * ponderadas;

    let vaat_antes =
        (redistribuicao + compl_vaaf + params.outras_receitas_vinculadas) / ponderadas;
    let compl_vaat = (params.vaat_minimo - vaat_antes).max(0.0) * ponderadas;
    let vaat_final = vaat_antes + compl_vaat / ponderadas;

    let compl_vaar = if params.vaar_elegivel {
        params.vaar_valor_por_aluno * ponderadas
    } else {
        0.0
    };

    let total = redistribuicao + compl_vaaf + compl_vaat + compl_vaar;
    let composicao = Composition {
        receita_redistribuida: redistribuicao,
        complementacao_vaaf: compl_vaaf,
        complementacao_vaat: compl_vaat,
        complementacao_vaar: compl_vaar,
        total,
        contribuicao: params.receita_contribuicao,
        resultado_liquido: total - params.receita_contribuicao,
    };

    let receitas = vec![
        RevenueRow {
            origem: RevenueSource::Redistribuicao,
            valor: redistribuicao,
        },
        RevenueRow {
            origem: RevenueSource::ComplementacaoVaaf,
            valor: compl_vaaf,
        },
        RevenueRow {
            origem: RevenueSource::ComplementacaoVaat,
            valor: compl_vaat,
        },
        RevenueRow {
            origem: RevenueSource::ComplementacaoVaar,
            valor: compl_vaar,
        },
    ];

    let participacao_complementacoes = if total > 0.0 {
        composicao.complementacoes() / total
    } else {
        0.0
    };

    let indicadores = vec![
        IndicatorRow {
            nome: "Valor anual por aluno ponderado".into(),
            valor: total / ponderadas,
            unidade: IndicatorUnit::ReaisPorAluno,
        },
        IndicatorRow {
            nome: "VAAF estadual".into(),
            valor: vaaf_estado,
            unidade: IndicatorUnit::ReaisPorAluno,
        },
        IndicatorRow {
            nome: "VAAT do município".into(),
            valor: vaat_final,
            unidade: IndicatorUnit::ReaisPorAluno,
        },
        IndicatorRow {
            nome: "Mínimo para remuneração dos profissionais (70%)".into(),
            valor: total * MINIMO_REMUNERACAO_PROFISSIONAIS,
            unidade: IndicatorUnit::Reais,
        },
        IndicatorRow {
            nome: "Mínimo da complementação VAAT para educação infantil (50%)".into(),
            valor: compl_vaat * MINIMO_VAAT_EDUCACAO_INFANTIL,
            unidade: IndicatorUnit::Reais,
        },
        IndicatorRow {
            nome: "Participação das complementações".into(),
            valor: participacao_complementacoes,
            unidade: IndicatorUnit::Percentual,
        },
    ];

    let projecoes = project_revenue(
        total,
        params.taxa_crescimento_receita,
        params.reference_year,
        params.anos_projecao,
    );

    Ok(SimulationResult {
        matriculas: rows,
        receitas,
        indicadores,
        projecoes,
        composicao,
    })
}

/// Compounds `base` yearly for `anos` years after `reference_year`.
/// Stops early instead of wrapping when a year does not fit in `i32`.
pub fn project_revenue(base: f64, taxa: f64, reference_year: i32, anos: u32) -> Vec<ProjectionRow> {
    (1..=anos)
        .map_while(|n| {
            let n = i32::try_from(n).ok()?;
            Some(ProjectionRow {
                ano: reference_year.checked_add(n)?,
                receita_projetada: base * (1.0 + taxa).powi(n),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::simulation::aggregate::{ANO_REFERENCIA_MAX, ANO_REFERENCIA_MIN};
    use std::collections::BTreeMap;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6 * b.abs().max(1.0)
    }

    fn params() -> SimulationParameters {
        SimulationParameters {
            reference_year: 2025,
            receita_contribuicao: 4_000_000.0,
            fundo_estadual_total: 5_000_000.0,
            matriculas_ponderadas_estado: 1_000.0,
            vaaf_minimo: 5_500.0,
            vaat_minimo: 6_500.0,
            outras_receitas_vinculadas: 500_000.0,
            vaar_elegivel: true,
            vaar_valor_por_aluno: 100.0,
            taxa_crescimento_receita: 0.05,
            anos_projecao: 2,
            ponderadores: BTreeMap::new(),
        }
    }

    fn matriculas() -> CategoryMap {
        let mut m = CategoryMap::new();
        m.insert("creche".into(), 100.0);
        m.insert("anos_iniciais_urbano".into(), 880.0);
        m
    }

    #[test]
    fn test_full_simulation() {
        let result = simulate(&matriculas(), &params()).unwrap();
        let c = &result.composicao;

        assert!(approx(result.total_matriculas_ponderadas(), 1_000.0));
        assert!(approx(c.receita_redistribuida, 5_000_000.0));
        assert!(approx(c.complementacao_vaaf, 500_000.0));
        assert!(approx(c.complementacao_vaat, 500_000.0));
        assert!(approx(c.complementacao_vaar, 100_000.0));
        assert!(approx(c.total, 6_100_000.0));
        assert!(approx(c.resultado_liquido, 2_100_000.0));

        let by_name = |nome: &str| {
            result
                .indicadores
                .iter()
                .find(|i| i.nome.starts_with(nome))
                .map(|i| i.valor)
                .unwrap()
        };
        assert!(approx(by_name("Valor anual por aluno"), 6_100.0));
        assert!(approx(by_name("VAAT do município"), 6_500.0));
        assert!(approx(by_name("Mínimo para remuneração"), 4_270_000.0));
        assert!(approx(by_name("Mínimo da complementação VAAT"), 250_000.0));
        assert!(approx(by_name("Participação"), 1_100_000.0 / 6_100_000.0));

        assert_eq!(result.projecoes.len(), 2);
        assert_eq!(result.projecoes[0].ano, 2026);
        assert!(approx(result.projecoes[0].receita_projetada, 6_405_000.0));
        assert!(approx(result.projecoes[1].receita_projetada, 6_725_250.0));
    }

    #[test]
    fn test_no_complementation_above_minimums() {
        let mut p = params();
        p.vaaf_minimo = 1_000.0;
        p.vaat_minimo = 1_000.0;
        p.vaar_elegivel = false;
        let result = simulate(&matriculas(), &p).unwrap();

        assert_eq!(result.composicao.complementacao_vaaf, 0.0);
        assert_eq!(result.composicao.complementacao_vaat, 0.0);
        assert_eq!(result.composicao.complementacao_vaar, 0.0);
        assert!(approx(result.composicao.total, 5_000_000.0));
        assert!(result
            .receitas
            .iter()
            .filter(|r| r.origem.is_complementation())
            .all(|r| r.valor == 0.0));
    }

    #[test]
    fn test_unknown_category_uses_neutral_factor() {
        let mut m = matriculas();
        m.insert("categoria_nova".into(), 20.0);
        let result = simulate(&m, &params()).unwrap();

        let row = result
            .matriculas
            .iter()
            .find(|r| r.categoria == "categoria_nova")
            .unwrap();
        assert!(row.fator_padrao);
        assert_eq!(row.matriculas_ponderadas, 20.0);
    }

    #[test]
    fn test_overrides_change_weighting() {
        let mut p = params();
        p.ponderadores.insert("Creche".into(), 2.0);
        let result = simulate(&matriculas(), &p).unwrap();
        assert!(approx(result.total_matriculas_ponderadas(), 1_080.0));
    }

    #[test]
    fn test_no_enrollments() {
        let mut m = CategoryMap::new();
        m.insert("creche".into(), 0.0);
        assert_eq!(simulate(&m, &params()), Err(SimulationError::NoEnrollments));
        assert_eq!(
            simulate(&CategoryMap::new(), &params()),
            Err(SimulationError::NoEnrollments)
        );
    }

    #[test]
    fn test_invalid_parameters() {
        let mut p = params();
        p.matriculas_ponderadas_estado = 0.0;
        assert!(matches!(
            simulate(&matriculas(), &p),
            Err(SimulationError::InvalidParameter(_))
        ));

        let mut p = params();
        p.anos_projecao = 11;
        assert!(p.validate().is_err());

        let mut p = params();
        p.vaaf_minimo = -1.0;
        assert!(p.validate().is_err());

        let mut p = params();
        p.ponderadores.insert("creche".into(), 0.0);
        assert!(p.validate().is_err());

        let mut p = params();
        p.reference_year = i32::MAX;
        p.anos_projecao = 1;
        assert!(p.validate().is_err());
        assert!(matches!(
            simulate(&matriculas(), &p),
            Err(SimulationError::InvalidParameter(_))
        ));

        let mut p = params();
        p.reference_year = ANO_REFERENCIA_MIN - 1;
        assert!(p.validate().is_err());
        p.reference_year = ANO_REFERENCIA_MAX;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_project_revenue_stops_at_last_representable_year() {
        let rows = project_revenue(100.0, 0.0, i32::MAX - 1, 3);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ano, i32::MAX);
    }
}
