//! "Nova simulação": parameter form posted to the backend.

use std::collections::BTreeMap;

use contracts::domain::simulation::aggregate::{
    NewSimulationDto, SimulationParameters, MAX_ANOS_PROJECAO,
};
use contracts::shared::categories::parse_br_number;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use thaw::*;

use crate::domain::localidade::hooks::use_localidades;
use crate::domain::localidade::ui::picker::{selected_id, LocalidadePicker};
use crate::domain::simulation::api;
use crate::shared::components::empty_state::ErrorBox;
use crate::shared::simulation_context::use_simulation_context;
use crate::system::auth::context::use_auth;

/// Raw text of the form, as typed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimulationForm {
    pub name: String,
    pub localidade_id: String,
    pub reference_year: String,
    pub receita_contribuicao: String,
    pub fundo_estadual_total: String,
    pub matriculas_ponderadas_estado: String,
    pub vaaf_minimo: String,
    pub vaat_minimo: String,
    pub outras_receitas_vinculadas: String,
    pub vaar_elegivel: bool,
    pub vaar_valor_por_aluno: String,
    /// Percent per year, e.g. "3,5"
    pub taxa_crescimento: String,
    pub anos_projecao: String,
    /// One `categoria = fator` per line
    pub ponderadores: String,
}

fn required_amount(label: &str, text: &str) -> Result<f64, String> {
    parse_br_number(text).ok_or_else(|| format!("{}: informe um número", label))
}

fn optional_amount(label: &str, text: &str) -> Result<f64, String> {
    if text.trim().is_empty() {
        return Ok(0.0);
    }
    required_amount(label, text)
}

/// Parses weighting overrides, one `categoria = fator` per line.
pub fn parse_ponderadores(text: &str) -> Result<BTreeMap<String, f64>, String> {
    let mut out = BTreeMap::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (label, factor) = line
            .rsplit_once('=')
            .ok_or_else(|| format!("Ponderadores, linha {}: use \"categoria = fator\"", n + 1))?;
        let factor = parse_br_number(factor)
            .ok_or_else(|| format!("Ponderadores, linha {}: fator inválido", n + 1))?;
        out.insert(label.trim().to_string(), factor);
    }
    Ok(out)
}

impl SimulationForm {
    pub fn to_dto(&self) -> Result<NewSimulationDto, String> {
        let localidade_id =
            selected_id(&self.localidade_id).ok_or_else(|| "Selecione uma localidade".to_string())?;
        let reference_year = self
            .reference_year
            .trim()
            .parse::<i32>()
            .map_err(|_| "Ano de referência inválido".to_string())?;
        let anos_projecao = if self.anos_projecao.trim().is_empty() {
            0
        } else {
            self.anos_projecao
                .trim()
                .parse::<u32>()
                .map_err(|_| format!("Anos de projeção: informe de 0 a {}", MAX_ANOS_PROJECAO))?
        };

        let parameters = SimulationParameters {
            reference_year,
            receita_contribuicao: required_amount("Contribuição ao fundo", &self.receita_contribuicao)?,
            fundo_estadual_total: required_amount("Fundo estadual", &self.fundo_estadual_total)?,
            matriculas_ponderadas_estado: required_amount(
                "Matrículas ponderadas do estado",
                &self.matriculas_ponderadas_estado,
            )?,
            vaaf_minimo: required_amount("VAAF mínimo", &self.vaaf_minimo)?,
            vaat_minimo: required_amount("VAAT mínimo", &self.vaat_minimo)?,
            outras_receitas_vinculadas: optional_amount(
                "Outras receitas vinculadas",
                &self.outras_receitas_vinculadas,
            )?,
            vaar_elegivel: self.vaar_elegivel,
            vaar_valor_por_aluno: if self.vaar_elegivel {
                required_amount("VAAR por aluno", &self.vaar_valor_por_aluno)?
            } else {
                0.0
            },
            taxa_crescimento_receita: optional_amount("Crescimento anual", &self.taxa_crescimento)?
                / 100.0,
            anos_projecao,
            ponderadores: parse_ponderadores(&self.ponderadores)?,
        };

        let dto = NewSimulationDto {
            name: self.name.trim().to_string(),
            localidade_id,
            parameters,
        };
        dto.validate().map_err(|e| e.to_string())?;
        Ok(dto)
    }
}

#[component]
fn Field(#[prop(into)] label: String, value: RwSignal<String>, #[prop(optional, into)] placeholder: String) -> impl IntoView {
    view! {
        <Flex vertical=true gap=FlexGap::Small>
            <Label>{label}</Label>
            <Input value=value placeholder=placeholder />
        </Flex>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn NovaSimulacao() -> impl IntoView {
    let auth = use_auth();
    let selection = use_simulation_context();
    let navigate = use_navigate();
    let localidades = use_localidades();

    let name = RwSignal::new(String::new());
    let localidade_id = RwSignal::new(String::new());
    let reference_year = RwSignal::new(String::new());
    let receita_contribuicao = RwSignal::new(String::new());
    let fundo_estadual_total = RwSignal::new(String::new());
    let matriculas_ponderadas_estado = RwSignal::new(String::new());
    let vaaf_minimo = RwSignal::new(String::new());
    let vaat_minimo = RwSignal::new(String::new());
    let outras_receitas_vinculadas = RwSignal::new(String::new());
    let vaar_elegivel = RwSignal::new(false);
    let vaar_valor_por_aluno = RwSignal::new(String::new());
    let taxa_crescimento = RwSignal::new(String::new());
    let anos_projecao = RwSignal::new("5".to_string());
    let ponderadores = RwSignal::new(String::new());

    let (error, set_error) = signal(None::<String>);
    let (saving, set_saving) = signal(false);

    let on_submit = move |_| {
        let form = SimulationForm {
            name: name.get_untracked(),
            localidade_id: localidade_id.get_untracked(),
            reference_year: reference_year.get_untracked(),
            receita_contribuicao: receita_contribuicao.get_untracked(),
            fundo_estadual_total: fundo_estadual_total.get_untracked(),
            matriculas_ponderadas_estado: matriculas_ponderadas_estado.get_untracked(),
            vaaf_minimo: vaaf_minimo.get_untracked(),
            vaat_minimo: vaat_minimo.get_untracked(),
            outras_receitas_vinculadas: outras_receitas_vinculadas.get_untracked(),
            vaar_elegivel: vaar_elegivel.get_untracked(),
            vaar_valor_por_aluno: vaar_valor_por_aluno.get_untracked(),
            taxa_crescimento: taxa_crescimento.get_untracked(),
            anos_projecao: anos_projecao.get_untracked(),
            ponderadores: ponderadores.get_untracked(),
        };
        let dto = match form.to_dto() {
            Ok(dto) => dto,
            Err(e) => {
                set_error.set(Some(e));
                return;
            }
        };
        let Some(token) = auth.token() else { return };

        set_saving.set(true);
        set_error.set(None);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::create_simulation(&token, &dto).await {
                Ok(detail) => {
                    let path = format!("/app/simulacoes/{}", detail.summary.id);
                    selection.select(detail.summary);
                    set_saving.set(false);
                    navigate(&path, Default::default());
                }
                Err(e) => {
                    set_error.set(Some(e));
                    set_saving.set(false);
                }
            }
        });
    };

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Nova simulação"</h1>
                </div>
            </div>

            {move || localidades.error.get().map(|e| view! { <ErrorBox message=e /> })}

            <section class="card">
                <h2 class="card__title">"Identificação"</h2>
                <Flex gap=FlexGap::Medium attr:style="flex-wrap: wrap;">
                    <Field label="Nome" value=name placeholder="Cenário base" />
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Localidade"</Label>
                        <LocalidadePicker localidades=localidades.data value=localidade_id />
                    </Flex>
                    <Field label="Ano de referência" value=reference_year placeholder="2025" />
                </Flex>
            </section>

            <section class="card">
                <h2 class="card__title">"Fundo estadual"</h2>
                <Flex gap=FlexGap::Medium attr:style="flex-wrap: wrap;">
                    <Field label="Contribuição ao fundo (R$)" value=receita_contribuicao placeholder="5.000.000,00" />
                    <Field label="Total do fundo estadual (R$)" value=fundo_estadual_total placeholder="1.000.000.000,00" />
                    <Field label="Matrículas ponderadas do estado" value=matriculas_ponderadas_estado placeholder="250.000" />
                    <Field label="Outras receitas vinculadas (R$)" value=outras_receitas_vinculadas placeholder="0,00" />
                </Flex>
            </section>

            <section class="card">
                <h2 class="card__title">"Complementação da União"</h2>
                <Flex gap=FlexGap::Medium align=FlexAlign::End attr:style="flex-wrap: wrap;">
                    <Field label="VAAF mínimo (R$/aluno)" value=vaaf_minimo placeholder="5.000,00" />
                    <Field label="VAAT mínimo (R$/aluno)" value=vaat_minimo placeholder="8.000,00" />
                    <Checkbox checked=vaar_elegivel label="Elegível ao VAAR" />
                    <Show when=move || vaar_elegivel.get()>
                        <Field label="VAAR por aluno (R$)" value=vaar_valor_por_aluno placeholder="100,00" />
                    </Show>
                </Flex>
            </section>

            <section class="card">
                <h2 class="card__title">"Projeção e ponderadores"</h2>
                <Flex gap=FlexGap::Medium attr:style="flex-wrap: wrap;">
                    <Field label="Crescimento anual da receita (%)" value=taxa_crescimento placeholder="3,5" />
                    <Field label=format!("Anos de projeção (0 a {})", MAX_ANOS_PROJECAO) value=anos_projecao />
                </Flex>
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Ponderadores personalizados (opcional)"</Label>
                    <Textarea
                        value=ponderadores
                        placeholder="Creche Integral = 1,30"
                        class="monospace-textarea"
                        attr:rows=4
                    />
                </Flex>
            </section>

            {move || error.get().map(|e| view! { <ErrorBox message=e /> })}

            <div class="page__actions">
                <Button appearance=ButtonAppearance::Primary on_click=on_submit disabled=saving>
                    {move || if saving.get() { "Calculando..." } else { "Simular" }}
                </Button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> SimulationForm {
        SimulationForm {
            name: " Cenário base ".into(),
            localidade_id: "loc-1".into(),
            reference_year: "2025".into(),
            receita_contribuicao: "5.000.000,00".into(),
            fundo_estadual_total: "1.000.000.000".into(),
            matriculas_ponderadas_estado: "250.000".into(),
            vaaf_minimo: "5.000,00".into(),
            vaat_minimo: "8.000,00".into(),
            taxa_crescimento: "3,5".into(),
            anos_projecao: "5".into(),
            ..SimulationForm::default()
        }
    }

    #[test]
    fn test_form_to_dto() {
        let dto = filled().to_dto().unwrap();
        assert_eq!(dto.name, "Cenário base");
        assert_eq!(dto.parameters.receita_contribuicao, 5_000_000.0);
        assert_eq!(dto.parameters.matriculas_ponderadas_estado, 250_000.0);
        assert!((dto.parameters.taxa_crescimento_receita - 0.035).abs() < 1e-12);
        assert_eq!(dto.parameters.anos_projecao, 5);
        assert_eq!(dto.parameters.vaar_valor_por_aluno, 0.0);
    }

    #[test]
    fn test_form_requires_localidade_and_numbers() {
        let mut form = filled();
        form.localidade_id = String::new();
        assert_eq!(form.to_dto().unwrap_err(), "Selecione uma localidade");

        let mut form = filled();
        form.vaaf_minimo = "muito".into();
        assert!(form.to_dto().unwrap_err().starts_with("VAAF mínimo"));

        let mut form = filled();
        form.anos_projecao = "11".into();
        assert!(form.to_dto().is_err());
    }

    #[test]
    fn test_parse_ponderadores() {
        let map = parse_ponderadores("Creche Integral = 1,30\n\n EJA=0,8 ").unwrap();
        assert_eq!(map["Creche Integral"], 1.3);
        assert_eq!(map["EJA"], 0.8);

        assert!(parse_ponderadores("sem fator").is_err());
        assert!(parse_ponderadores("EJA = x").is_err());
    }
}
