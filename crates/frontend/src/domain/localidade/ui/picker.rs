use contracts::domain::localidade::aggregate::Localidade;
use leptos::prelude::*;
use thaw::*;

/// Select bound to a localidade id; the empty option means "none selected".
#[component]
pub fn LocalidadePicker(
    #[prop(into)] localidades: Signal<Vec<Localidade>>,
    /// Selected id, `""` when none
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <Select value=value>
            <option value="">"Selecione uma localidade"</option>
            {move || {
                localidades
                    .get()
                    .into_iter()
                    .map(|l| {
                        let label = l.display_name();
                        view! { <option value=l.id>{label}</option> }
                    })
                    .collect_view()
            }}
        </Select>
    }
}

/// `""` from the select becomes `None`.
pub fn selected_id(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_id() {
        assert_eq!(selected_id(""), None);
        assert_eq!(selected_id("abc"), Some("abc".to_string()));
    }
}
