use contracts::domain::localidade::aggregate::{Localidade, LocalidadeDto};
use contracts::shared::categories::RawCategoryMap;

use crate::shared::api_utils::{get_json, post_json, put_json};

pub async fn fetch_localidades(token: &str) -> Result<Vec<Localidade>, String> {
    get_json("/api/localidades", token).await
}

pub async fn create_localidade(token: &str, dto: &LocalidadeDto) -> Result<Localidade, String> {
    post_json("/api/localidades", token, dto).await
}

/// The category map as uploaded, before normalization.
pub async fn fetch_categorias(token: &str, localidade_id: &str) -> Result<RawCategoryMap, String> {
    get_json(&format!("/api/localidades/{}/categorias", localidade_id), token).await
}

pub async fn replace_categorias(
    token: &str,
    localidade_id: &str,
    categorias: &RawCategoryMap,
) -> Result<(), String> {
    put_json(
        &format!("/api/localidades/{}/categorias", localidade_id),
        token,
        categorias,
    )
    .await
}
