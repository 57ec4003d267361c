use chrono::Utc;
use contracts::domain::localidade::aggregate::{Localidade, LocalidadeDto};
use contracts::shared::categories::{normalize_categorias_report, RawCategoryMap};
use uuid::Uuid;

use super::repository;
use crate::domain::ServiceError;

pub async fn list_all() -> Result<Vec<Localidade>, ServiceError> {
    Ok(repository::list_all().await?)
}

pub async fn get_by_id(id: &str) -> Result<Localidade, ServiceError> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("localidade {id}")))
}

pub async fn create(dto: LocalidadeDto) -> Result<Localidade, ServiceError> {
    dto.validate().map_err(ServiceError::Validation)?;

    if repository::get_by_codigo_ibge(&dto.codigo_ibge)
        .await?
        .is_some()
    {
        return Err(ServiceError::Validation(format!(
            "Código IBGE {} já cadastrado",
            dto.codigo_ibge
        )));
    }

    let now = Utc::now();
    let localidade = Localidade {
        id: Uuid::new_v4().to_string(),
        codigo_ibge: dto.codigo_ibge,
        nome: dto.nome.trim().to_string(),
        uf: dto.uf,
        created_at: now,
        updated_at: now,
    };
    repository::insert(&localidade).await?;
    tracing::info!(
        "Created localidade {} ({})",
        localidade.display_name(),
        localidade.id
    );
    Ok(localidade)
}

pub async fn get_categorias(localidade_id: &str) -> Result<RawCategoryMap, ServiceError> {
    get_by_id(localidade_id).await?;
    Ok(repository::get_categorias(localidade_id).await?)
}

/// Stores the raw map as uploaded. Normalization problems are logged, not
/// rejected: consumers normalize on read.
pub async fn replace_categorias(
    localidade_id: &str,
    categorias: RawCategoryMap,
) -> Result<(), ServiceError> {
    get_by_id(localidade_id).await?;

    let report = normalize_categorias_report(categorias.clone());
    if !report.dropped_labels.is_empty() {
        tracing::warn!(
            "Localidade {}: labels without a usable key: {:?}",
            localidade_id,
            report.dropped_labels
        );
    }
    for unparsed in &report.unparsed {
        tracing::warn!(
            "Localidade {}: value '{}' of '{}' counted as zero ({:?})",
            localidade_id,
            unparsed.raw,
            unparsed.label,
            unparsed.reason
        );
    }
    for collision in &report.collisions {
        tracing::warn!(
            "Localidade {}: labels {:?} share key '{}', last one wins",
            localidade_id,
            collision.labels,
            collision.key
        );
    }

    repository::replace_categorias(localidade_id, &categorias).await?;
    tracing::info!(
        "Localidade {}: stored {} categories",
        localidade_id,
        categorias.len()
    );
    Ok(())
}
