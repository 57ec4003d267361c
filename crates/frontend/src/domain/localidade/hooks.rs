use contracts::domain::localidade::aggregate::Localidade;
use contracts::shared::categories::{normalize_categorias, CategoryMap};
use leptos::prelude::*;

use super::api;
use crate::shared::fetch::{use_fetch, Fetched};

pub const CATEGORIAS_ERROR: &str = "Erro ao carregar categorias";
pub const LOCALIDADES_ERROR: &str = "Erro ao carregar localidades";

/// Normalized enrollments of the selected localidade.
pub type CategoriasResource = Fetched<CategoryMap>;

pub fn use_categorias(localidade_id: Signal<Option<String>>) -> CategoriasResource {
    use_fetch(
        move || localidade_id.get(),
        |token, id: String| async move {
            api::fetch_categorias(&token, &id)
                .await
                .map(normalize_categorias)
        },
        CATEGORIAS_ERROR,
    )
}

pub fn use_localidades() -> Fetched<Vec<Localidade>> {
    use_fetch(
        || Some(()),
        |token, _| async move { api::fetch_localidades(&token).await },
        LOCALIDADES_ERROR,
    )
}
