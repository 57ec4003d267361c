use std::collections::HashMap;

use contracts::domain::simulation::aggregate::{
    NewSimulationDto, SimulationDetail, SimulationSummary,
};
use contracts::domain::simulation::engine::simulate;
use contracts::shared::categories::normalize_categorias_report;
use contracts::system::auth::TokenClaims;

use super::repository;
use crate::domain::localidade;
use crate::domain::ServiceError;

/// Who is asking. Admins see and manage every simulation.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: String,
    pub is_admin: bool,
}

impl From<&TokenClaims> for Caller {
    fn from(claims: &TokenClaims) -> Self {
        Self {
            user_id: claims.sub.clone(),
            is_admin: claims.is_admin,
        }
    }
}

impl Caller {
    pub fn can_access(&self, owner_id: &str) -> bool {
        self.is_admin || self.user_id == owner_id
    }
}

async fn localidade_names() -> Result<HashMap<String, String>, ServiceError> {
    Ok(localidade::repository::list_all()
        .await?
        .into_iter()
        .map(|l| {
            let name = l.display_name();
            (l.id, name)
        })
        .collect())
}

pub async fn list(caller: &Caller) -> Result<Vec<SimulationSummary>, ServiceError> {
    let owner = if caller.is_admin {
        None
    } else {
        Some(caller.user_id.as_str())
    };
    let rows = repository::list(owner).await?;
    let names = localidade_names().await?;
    Ok(rows
        .iter()
        .map(|m| m.to_summary(names.get(&m.localidade_id).cloned()))
        .collect())
}

pub async fn get(caller: &Caller, id: &str) -> Result<SimulationDetail, ServiceError> {
    let model = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("simulation {id}")))?;
    if !caller.can_access(&model.owner_id) {
        return Err(ServiceError::Forbidden);
    }
    let nome = localidade::repository::get_by_id(&model.localidade_id)
        .await?
        .map(|l| l.display_name());
    Ok(model.to_detail(nome)?)
}

/// Normalizes the localidade's current categories, runs the engine and
/// stores parameters and result together.
pub async fn create(caller: &Caller, dto: NewSimulationDto) -> Result<SimulationDetail, ServiceError> {
    dto.validate()?;

    let localidade = localidade::service::get_by_id(&dto.localidade_id).await?;
    let raw = localidade::repository::get_categorias(&localidade.id).await?;
    let normalized = normalize_categorias_report(raw);
    if !normalized.unparsed.is_empty() {
        tracing::warn!(
            "Simulation for {}: {} categories defaulted to zero",
            localidade.display_name(),
            normalized.unparsed.len()
        );
    }

    let result = simulate(&normalized.values, &dto.parameters)?;
    let model = repository::insert(
        &caller.user_id,
        &localidade.id,
        dto.name.trim(),
        &dto.parameters,
        &result,
    )
    .await?;

    tracing::info!(
        "User {} created simulation {} for {} (total {:.2})",
        caller.user_id,
        model.id,
        localidade.display_name(),
        result.composicao.total
    );

    Ok(model.to_detail(Some(localidade.display_name()))?)
}

pub async fn delete(caller: &Caller, id: &str) -> Result<(), ServiceError> {
    let model = repository::get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("simulation {id}")))?;
    if !caller.can_access(&model.owner_id) {
        return Err(ServiceError::Forbidden);
    }
    if !repository::soft_delete(id).await? {
        return Err(ServiceError::NotFound(format!("simulation {id}")));
    }
    tracing::info!("User {} deleted simulation {}", caller.user_id, id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str, is_admin: bool) -> TokenClaims {
        TokenClaims {
            sub: sub.into(),
            username: sub.into(),
            full_name: None,
            email: None,
            is_admin,
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn test_owner_and_admin_access() {
        let owner = Caller::from(&claims("u1", false));
        let other = Caller::from(&claims("u2", false));
        let admin = Caller::from(&claims("root", true));

        assert!(owner.can_access("u1"));
        assert!(!other.can_access("u1"));
        assert!(admin.can_access("u1"));
    }
}
