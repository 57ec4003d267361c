use chrono::Utc;
use contracts::domain::simulation::aggregate::{
    SimulationDetail, SimulationParameters, SimulationResult, SimulationSummary,
};
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "simulation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner_id: String,
    pub localidade_id: String,
    pub name: String,
    pub reference_year: i32,
    pub parameters_json: String,
    pub result_json: String,
    pub total: f64,
    pub resultado_liquido: f64,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn to_summary(&self, localidade_nome: Option<String>) -> SimulationSummary {
        SimulationSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            owner_id: self.owner_id.clone(),
            localidade_id: self.localidade_id.clone(),
            localidade_nome,
            reference_year: self.reference_year,
            total: self.total,
            resultado_liquido: self.resultado_liquido,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }

    pub fn to_detail(&self, localidade_nome: Option<String>) -> anyhow::Result<SimulationDetail> {
        let parameters: SimulationParameters = serde_json::from_str(&self.parameters_json)?;
        let result: SimulationResult = serde_json::from_str(&self.result_json)?;
        Ok(SimulationDetail {
            summary: self.to_summary(localidade_nome),
            parameters,
            result,
        })
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Live simulations, newest first. `owner_id = None` lists every owner.
pub async fn list(owner_id: Option<&str>) -> anyhow::Result<Vec<Model>> {
    let mut query = Entity::find().filter(Column::IsDeleted.eq(false));
    if let Some(owner) = owner_id {
        query = query.filter(Column::OwnerId.eq(owner));
    }
    Ok(query.order_by_desc(Column::CreatedAt).all(conn()).await?)
}

pub async fn get_by_id(id: &str) -> anyhow::Result<Option<Model>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result)
}

pub async fn insert(
    owner_id: &str,
    localidade_id: &str,
    name: &str,
    parameters: &SimulationParameters,
    result: &SimulationResult,
) -> anyhow::Result<Model> {
    let now = Utc::now();
    let active = ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        owner_id: Set(owner_id.to_string()),
        localidade_id: Set(localidade_id.to_string()),
        name: Set(name.to_string()),
        reference_year: Set(parameters.reference_year),
        parameters_json: Set(serde_json::to_string(parameters)?),
        result_json: Set(serde_json::to_string(result)?),
        total: Set(result.composicao.total),
        resultado_liquido: Set(result.composicao.resultado_liquido),
        is_deleted: Set(false),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
    };
    Ok(active.insert(conn()).await?)
}

pub async fn soft_delete(id: &str) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
