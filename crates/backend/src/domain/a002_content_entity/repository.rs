use std::collections::HashSet;

use chrono::Utc;
use contracts::domain::a002_content_entity::aggregate::ContentEntity;
use contracts::enums::content_type::ContentType;
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_content_entity")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub content_type: String,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub parent_slug: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ContentEntity {
    fn from(m: Model) -> Self {
        ContentEntity {
            id: m.id,
            content_type: ContentType::from_code(&m.content_type).unwrap_or_default(),
            name: m.name,
            slug: m.slug,
            image: m.image,
            parent_slug: m.parent_slug,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Страница элементов каталога одного типа, поиск по названию и slug
pub async fn list_paginated(
    content_type: ContentType,
    search: Option<&str>,
    limit: u64,
    offset: u64,
) -> anyhow::Result<(Vec<ContentEntity>, u64)> {
    let mut query = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::ContentType.eq(content_type.code()));

    if let Some(search) = search {
        query = query.filter(
            Condition::any()
                .add(Column::Name.contains(search))
                .add(Column::Slug.contains(search)),
        );
    }

    let total = query.clone().count(conn()).await?;
    let items = query
        .order_by_asc(Column::Name)
        .order_by_asc(Column::Id)
        .limit(limit)
        .offset(offset)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((items, total))
}

pub async fn count() -> anyhow::Result<u64> {
    Ok(Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .count(conn())
        .await?)
}

/// Пары (тип, slug) уже имеющихся записей
pub async fn existing_keys() -> anyhow::Result<HashSet<(String, String)>> {
    Ok(Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(|m| (m.content_type, m.slug))
        .collect())
}

pub async fn insert(entity: &ContentEntity) -> anyhow::Result<()> {
    let now = Utc::now();
    let active = ActiveModel {
        id: Set(entity.id.clone()),
        content_type: Set(entity.content_type.code().to_string()),
        name: Set(entity.name.clone()),
        slug: Set(entity.slug.clone()),
        image: Set(entity.image.clone()),
        parent_slug: Set(entity.parent_slug.clone()),
        is_deleted: Set(false),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
        version: Set(1),
    };
    active.insert(conn()).await?;
    Ok(())
}
