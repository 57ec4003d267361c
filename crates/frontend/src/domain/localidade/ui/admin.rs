//! Admin page: register localidades and upload their enrollment categories.

use contracts::domain::localidade::aggregate::LocalidadeDto;
use contracts::shared::categories::{
    normalize_categorias_report, CategoryNormalization, RawCategoryMap, UnparsedValue,
};
use contracts::shared::number_format::format_decimal_br;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::picker::{selected_id, LocalidadePicker};
use crate::domain::localidade::api;
use crate::domain::localidade::hooks::use_localidades;
use crate::shared::components::empty_state::ErrorBox;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;

/// Parses the pasted JSON object (`{"Creche Integral": 120, ...}`).
pub fn parse_raw_categorias(text: &str) -> Result<RawCategoryMap, String> {
    let text = text.trim();
    if text.is_empty() {
        return Err("Cole o JSON com as categorias".to_string());
    }
    serde_json::from_str::<RawCategoryMap>(text)
        .map_err(|e| format!("JSON inválido: {}", e))
}

fn unparsed_message(u: &UnparsedValue) -> String {
    format!(
        "Valor \"{}\" de \"{}\" {} e será contado como zero",
        u.raw,
        u.label,
        u.reason.description()
    )
}

#[component]
fn NormalizationPreview(report: CategoryNormalization) -> impl IntoView {
    let warnings = (!report.is_clean()).then(|| {
        let dropped = report.dropped_labels.clone();
        let unparsed = report.unparsed.clone();
        let collisions = report.collisions.clone();
        view! {
            <div class="warning-box">
                <span class="warning-box__icon">"⚠"</span>
                <ul class="warning-box__text">
                    {dropped.into_iter().map(|label| view! {
                        <li>{format!("Rótulo ignorado (sem chave válida): \"{}\"", label)}</li>
                    }).collect_view()}
                    {unparsed.into_iter().map(|u| view! {
                        <li>{unparsed_message(&u)}</li>
                    }).collect_view()}
                    {collisions.into_iter().map(|c| view! {
                        <li>{format!("Rótulos {} resultam na chave \"{}\"; vale o último", c.labels.join(", "), c.key)}</li>
                    }).collect_view()}
                </ul>
            </div>
        }
    });

    let total: f64 = report.values.values().sum();
    let rows = report.values.clone();

    view! {
        <div class="normalization-preview">
            {warnings}
            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Categoria"</TableHeaderCell>
                        <TableHeaderCell>"Matrículas"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {rows.into_iter().map(|(key, value)| view! {
                        <TableRow>
                            <TableCell><TableCellLayout><code>{key}</code></TableCellLayout></TableCell>
                            <TableCell class="text-right">{format_decimal_br(value, 0)}</TableCell>
                        </TableRow>
                    }).collect_view()}
                    <TableRow>
                        <TableCell><TableCellLayout><strong>"Total"</strong></TableCellLayout></TableCell>
                        <TableCell class="text-right"><strong>{format_decimal_br(total, 0)}</strong></TableCell>
                    </TableRow>
                </TableBody>
            </Table>
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn LocalidadesAdmin() -> impl IntoView {
    let auth = use_auth();
    let localidades = use_localidades();

    // New localidade form
    let codigo_ibge = RwSignal::new(String::new());
    let nome = RwSignal::new(String::new());
    let uf = RwSignal::new(String::new());
    let (create_error, set_create_error) = signal(None::<String>);
    let (creating, set_creating) = signal(false);

    // Category upload
    let selected = RwSignal::new(String::new());
    let raw_json = RwSignal::new(String::new());
    let (upload_error, set_upload_error) = signal(None::<String>);
    let (upload_message, set_upload_message) = signal(None::<String>);
    let (uploading, set_uploading) = signal(false);

    let parsed = Memo::new(move |_| raw_json.with(|t| parse_raw_categorias(t)));
    let preview = Memo::new(move |_| parsed.get().ok().map(normalize_categorias_report));

    let on_create = move |_| {
        let dto = LocalidadeDto {
            codigo_ibge: codigo_ibge.get_untracked().trim().to_string(),
            nome: nome.get_untracked().trim().to_string(),
            uf: uf.get_untracked().trim().to_uppercase(),
        };
        if let Err(e) = dto.validate() {
            set_create_error.set(Some(e));
            return;
        }
        let Some(token) = auth.token() else { return };
        set_creating.set(true);
        set_create_error.set(None);
        spawn_local(async move {
            match api::create_localidade(&token, &dto).await {
                Ok(created) => {
                    log::info!("Localidade {} criada", created.display_name());
                    codigo_ibge.set(String::new());
                    nome.set(String::new());
                    uf.set(String::new());
                    selected.set(created.id);
                    localidades.refetch();
                }
                Err(e) => set_create_error.set(Some(e)),
            }
            set_creating.set(false);
        });
    };

    let on_upload = move |_| {
        let Some(id) = selected_id(&selected.get_untracked()) else {
            set_upload_error.set(Some("Selecione uma localidade".to_string()));
            return;
        };
        let categorias = match parsed.get_untracked() {
            Ok(c) => c,
            Err(e) => {
                set_upload_error.set(Some(e));
                return;
            }
        };
        let Some(token) = auth.token() else { return };
        set_uploading.set(true);
        set_upload_error.set(None);
        set_upload_message.set(None);
        spawn_local(async move {
            match api::replace_categorias(&token, &id, &categorias).await {
                Ok(()) => set_upload_message.set(Some(format!(
                    "{} categorias enviadas",
                    categorias.len()
                ))),
                Err(e) => set_upload_error.set(Some(e)),
            }
            set_uploading.set(false);
        });
    };

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Localidades"</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        {move || localidades.data.with(|l| l.len()).to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| localidades.refetch()>
                        {icon("refresh")}
                        " Atualizar"
                    </Button>
                </div>
            </div>

            {move || localidades.error.get().map(|e| view! { <ErrorBox message=e /> })}

            <section class="card">
                <h2 class="card__title">"Nova localidade"</h2>
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Código IBGE"</Label>
                        <Input value=codigo_ibge placeholder="3550308" />
                    </Flex>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Nome"</Label>
                        <Input value=nome placeholder="São Paulo" />
                    </Flex>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"UF"</Label>
                        <Input value=uf placeholder="SP" />
                    </Flex>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=on_create
                        disabled=creating
                    >
                        {icon("plus")}
                        " Cadastrar"
                    </Button>
                </Flex>
                {move || create_error.get().map(|e| view! { <ErrorBox message=e /> })}
            </section>

            <section class="card">
                <h2 class="card__title">"Categorias de matrícula"</h2>
                <Flex vertical=true gap=FlexGap::Small>
                    <LocalidadePicker localidades=localidades.data value=selected />
                    <Textarea
                        value=raw_json
                        placeholder="{ \"Creche Integral\": 120, \"Pré-Escola Parcial\": \"1.234\" }"
                        class="monospace-textarea"
                        attr:rows=10
                    />
                    {move || match parsed.get() {
                        Err(e) if !raw_json.with(|t| t.trim().is_empty()) => {
                            Some(view! { <ErrorBox message=e /> }.into_any())
                        }
                        _ => None,
                    }}
                    {move || preview.get().map(|report| view! { <NormalizationPreview report=report /> })}
                    <div>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=on_upload
                            disabled=Signal::derive(move || uploading.get() || parsed.with(|p| p.is_err()))
                        >
                            {move || if uploading.get() { "Enviando..." } else { "Enviar categorias" }}
                        </Button>
                    </div>
                    {move || upload_error.get().map(|e| view! { <ErrorBox message=e /> })}
                    {move || upload_message.get().map(|m| view! { <div class="info-box">{m}</div> })}
                </Flex>
            </section>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::categories::RawCategoryValue;

    #[test]
    fn test_parse_raw_categorias_mixed_values() {
        let map = parse_raw_categorias(
            r#"{"Creche Integral": 120, "Pré-Escola": "1.234,5", "EJA": null}"#,
        )
        .unwrap();
        assert_eq!(map["Creche Integral"], RawCategoryValue::Number(120.0));
        assert_eq!(map["Pré-Escola"], RawCategoryValue::Text("1.234,5".into()));
        assert_eq!(map["EJA"], RawCategoryValue::Null);
    }

    #[test]
    fn test_parse_raw_categorias_rejects_bad_input() {
        assert!(parse_raw_categorias("").is_err());
        assert!(parse_raw_categorias("[1, 2]").unwrap_err().starts_with("JSON inválido"));
    }

    #[test]
    fn test_negative_value_is_not_reported_as_non_numeric() {
        let map = parse_raw_categorias(r#"{"Especial": -4, "Creche": "n/d"}"#).unwrap();
        let report = normalize_categorias_report(map);
        let messages: Vec<String> = report.unparsed.iter().map(unparsed_message).collect();
        assert_eq!(
            messages,
            vec![
                "Valor \"n/d\" de \"Creche\" não é numérico e será contado como zero".to_string(),
                "Valor \"-4\" de \"Especial\" é negativo e será contado como zero".to_string(),
            ]
        );
    }
}
