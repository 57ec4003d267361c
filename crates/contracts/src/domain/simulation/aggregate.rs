use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::engine::SimulationError;

pub const MAX_ANOS_PROJECAO: u32 = 10;
/// Accepted range of `reference_year`.
pub const ANO_REFERENCIA_MIN: i32 = 2000;
pub const ANO_REFERENCIA_MAX: i32 = 2100;

/// Inputs of a FUNDEB simulation for one localidade and reference year.
///
/// Amounts are yearly values in reais.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub reference_year: i32,
    /// What the municipality pays into the state fund (20% of the tax basket).
    pub receita_contribuicao: f64,
    /// Total of the state fund before federal complementation.
    pub fundo_estadual_total: f64,
    /// Weighted enrollments of every network in the state.
    pub matriculas_ponderadas_estado: f64,
    pub vaaf_minimo: f64,
    pub vaat_minimo: f64,
    /// Other education-bound revenue counted by the VAAT.
    #[serde(default)]
    pub outras_receitas_vinculadas: f64,
    #[serde(default)]
    pub vaar_elegivel: bool,
    #[serde(default)]
    pub vaar_valor_por_aluno: f64,
    #[serde(default)]
    pub taxa_crescimento_receita: f64,
    #[serde(default)]
    pub anos_projecao: u32,
    /// Weighting overrides keyed by category label (normalized on use).
    #[serde(default)]
    pub ponderadores: BTreeMap<String, f64>,
}

impl SimulationParameters {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(ANO_REFERENCIA_MIN..=ANO_REFERENCIA_MAX).contains(&self.reference_year) {
            return Err(SimulationError::InvalidParameter(format!(
                "reference_year deve estar entre {ANO_REFERENCIA_MIN} e {ANO_REFERENCIA_MAX}"
            )));
        }
        let amounts = [
            ("receita_contribuicao", self.receita_contribuicao),
            ("fundo_estadual_total", self.fundo_estadual_total),
            ("vaaf_minimo", self.vaaf_minimo),
            ("vaat_minimo", self.vaat_minimo),
            ("outras_receitas_vinculadas", self.outras_receitas_vinculadas),
            ("vaar_valor_por_aluno", self.vaar_valor_por_aluno),
        ];
        for (name, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::InvalidParameter(format!(
                    "{name} deve ser um valor não negativo"
                )));
            }
        }
        if !self.matriculas_ponderadas_estado.is_finite() || self.matriculas_ponderadas_estado <= 0.0
        {
            return Err(SimulationError::InvalidParameter(
                "matriculas_ponderadas_estado deve ser maior que zero".into(),
            ));
        }
        if !self.taxa_crescimento_receita.is_finite() || self.taxa_crescimento_receita <= -1.0 {
            return Err(SimulationError::InvalidParameter(
                "taxa_crescimento_receita deve ser maior que -100%".into(),
            ));
        }
        if self.anos_projecao > MAX_ANOS_PROJECAO {
            return Err(SimulationError::InvalidParameter(format!(
                "anos_projecao deve ser no máximo {MAX_ANOS_PROJECAO}"
            )));
        }
        if let Some((label, _)) = self
            .ponderadores
            .iter()
            .find(|(_, f)| !f.is_finite() || **f <= 0.0)
        {
            return Err(SimulationError::InvalidParameter(format!(
                "ponderador de '{label}' deve ser maior que zero"
            )));
        }
        Ok(())
    }
}

/// Enrollments of one category and their weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatriculaRow {
    pub categoria: String,
    pub matriculas: f64,
    pub fator_ponderacao: f64,
    pub matriculas_ponderadas: f64,
    /// True when no known factor exists for the category and 1.0 was used.
    pub fator_padrao: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueSource {
    Redistribuicao,
    ComplementacaoVaaf,
    ComplementacaoVaat,
    ComplementacaoVaar,
}

impl RevenueSource {
    pub fn label(&self) -> &'static str {
        match self {
            RevenueSource::Redistribuicao => "Redistribuição do fundo estadual",
            RevenueSource::ComplementacaoVaaf => "Complementação VAAF",
            RevenueSource::ComplementacaoVaat => "Complementação VAAT",
            RevenueSource::ComplementacaoVaar => "Complementação VAAR",
        }
    }

    pub fn is_complementation(&self) -> bool {
        !matches!(self, RevenueSource::Redistribuicao)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueRow {
    pub origem: RevenueSource,
    pub valor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorUnit {
    Reais,
    ReaisPorAluno,
    Percentual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub nome: String,
    pub valor: f64,
    pub unidade: IndicatorUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    pub ano: i32,
    pub receita_projetada: f64,
}

/// Revenue composition shown by the composition modal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub receita_redistribuida: f64,
    pub complementacao_vaaf: f64,
    pub complementacao_vaat: f64,
    pub complementacao_vaar: f64,
    pub total: f64,
    pub contribuicao: f64,
    /// Total received minus the contribution; negative means net loss.
    pub resultado_liquido: f64,
}

impl Composition {
    pub fn complementacoes(&self) -> f64 {
        self.complementacao_vaaf + self.complementacao_vaat + self.complementacao_vaar
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub matriculas: Vec<MatriculaRow>,
    pub receitas: Vec<RevenueRow>,
    pub indicadores: Vec<IndicatorRow>,
    pub projecoes: Vec<ProjectionRow>,
    pub composicao: Composition,
}

impl SimulationResult {
    pub fn total_matriculas(&self) -> f64 {
        self.matriculas.iter().map(|r| r.matriculas).sum()
    }

    pub fn total_matriculas_ponderadas(&self) -> f64 {
        self.matriculas.iter().map(|r| r.matriculas_ponderadas).sum()
    }
}

/// Row of the "Minhas simulações" list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub localidade_id: String,
    pub localidade_nome: Option<String>,
    pub reference_year: i32,
    pub total: f64,
    pub resultado_liquido: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationDetail {
    pub summary: SimulationSummary,
    pub parameters: SimulationParameters,
    pub result: SimulationResult,
}

/// Create payload; enrollments are read server-side from the localidade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSimulationDto {
    pub name: String,
    pub localidade_id: String,
    pub parameters: SimulationParameters,
}

impl NewSimulationDto {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.name.trim().is_empty() {
            return Err(SimulationError::InvalidParameter(
                "Nome da simulação é obrigatório".into(),
            ));
        }
        if self.localidade_id.trim().is_empty() {
            return Err(SimulationError::InvalidParameter(
                "Selecione uma localidade".into(),
            ));
        }
        self.parameters.validate()
    }
}
