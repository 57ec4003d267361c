use chrono::Utc;
use contracts::domain::localidade::aggregate::Localidade;
use contracts::shared::categories::{RawCategoryMap, RawCategoryValue};
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseBackend, EntityTrait, QueryFilter, QueryOrder, Set,
    Statement, TransactionTrait,
};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "localidade")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub codigo_ibge: String,
    pub nome: String,
    pub uf: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Localidade {
    fn from(m: Model) -> Self {
        Localidade {
            id: m.id,
            codigo_ibge: m.codigo_ibge,
            nome: m.nome,
            uf: m.uf,
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<Localidade>> {
    let items = Entity::find()
        .order_by_asc(Column::Uf)
        .order_by_asc(Column::Nome)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: &str) -> anyhow::Result<Option<Localidade>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_codigo_ibge(codigo: &str) -> anyhow::Result<Option<Localidade>> {
    let result = Entity::find()
        .filter(Column::CodigoIbge.eq(codigo))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(localidade: &Localidade) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(localidade.id.clone()),
        codigo_ibge: Set(localidade.codigo_ibge.clone()),
        nome: Set(localidade.nome.clone()),
        uf: Set(localidade.uf.clone()),
        created_at: Set(Some(localidade.created_at)),
        updated_at: Set(Some(localidade.updated_at)),
    };
    active.insert(conn()).await?;
    Ok(())
}

/// Reads the raw category map exactly as it was uploaded.
pub async fn get_categorias(localidade_id: &str) -> anyhow::Result<RawCategoryMap> {
    let rows = conn()
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT label, raw_value FROM localidade_categoria WHERE localidade_id = ? ORDER BY label",
            [localidade_id.into()],
        ))
        .await?;

    let mut map = RawCategoryMap::new();
    for row in rows {
        let label: String = row.try_get("", "label")?;
        let raw: String = row.try_get("", "raw_value")?;
        map.insert(label, decode_raw_value(&raw));
    }
    Ok(map)
}

/// Replaces every category of a localidade in one transaction.
pub async fn replace_categorias(localidade_id: &str, categorias: &RawCategoryMap) -> anyhow::Result<()> {
    let txn = conn().begin().await?;

    txn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "DELETE FROM localidade_categoria WHERE localidade_id = ?",
        [localidade_id.into()],
    ))
    .await?;

    for (label, value) in categorias {
        txn.execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO localidade_categoria (localidade_id, label, raw_value) VALUES (?, ?, ?)",
            [
                localidade_id.into(),
                label.clone().into(),
                encode_raw_value(value)?.into(),
            ],
        ))
        .await?;
    }

    txn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE localidade SET updated_at = ? WHERE id = ?",
        [Utc::now().to_rfc3339().into(), localidade_id.into()],
    ))
    .await?;

    txn.commit().await?;
    Ok(())
}

fn encode_raw_value(value: &RawCategoryValue) -> anyhow::Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Rows written before values were JSON-encoded hold plain text.
fn decode_raw_value(raw: &str) -> RawCategoryValue {
    serde_json::from_str(raw).unwrap_or_else(|_| RawCategoryValue::Text(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_value_storage_format() {
        let number = RawCategoryValue::Number(10.0);
        let text = RawCategoryValue::Text("1.234,5".into());

        assert_eq!(decode_raw_value(&encode_raw_value(&number).unwrap()), number);
        assert_eq!(decode_raw_value(&encode_raw_value(&text).unwrap()), text);
        assert_eq!(decode_raw_value("null"), RawCategoryValue::Null);
        assert_eq!(
            decode_raw_value("1.234,5"),
            RawCategoryValue::Text("1.234,5".into())
        );
    }
}
