use chrono::Utc;
use contracts::domain::a001_grid_configuration::aggregate::{
    ContentItem, GridConfiguration, GridConfigurationId, GridDimensions, PositionUpdate,
};
use contracts::domain::common::EntityMetadata;
use contracts::enums::content_type::ContentType;
use contracts::enums::keyword::Keyword;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Set, TransactionTrait,
};

use crate::shared::api_error::AppError;
use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_grid_configuration")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub content_type: String,
    pub is_title_show: bool,
    pub grid_rows: i32,
    pub grid_columns: i32,
    pub mobile_rows: i32,
    pub mobile_columns: i32,
    /// JSON-массив `ContentItem`
    pub content_items: String,
    pub banner_image: Option<String>,
    pub banner_image_mobile: Option<String>,
    pub background_image: Option<String>,
    pub is_active: bool,
    pub position: i32,
    pub keyword: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for GridConfiguration {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let content_items: Vec<ContentItem> = serde_json::from_str(&m.content_items)
            .unwrap_or_else(|e| {
                tracing::warn!("Broken content_items in grid configuration {}: {}", m.id, e);
                Vec::new()
            });

        GridConfiguration {
            id: GridConfigurationId(uuid),
            title: m.title,
            content_type: ContentType::from_code(&m.content_type).unwrap_or_default(),
            is_title_show: m.is_title_show,
            grid: GridDimensions::new(
                m.grid_rows.max(0) as u32,
                m.grid_columns.max(0) as u32,
                m.mobile_rows.max(0) as u32,
                m.mobile_columns.max(0) as u32,
            ),
            content_items,
            banner_image: m.banner_image,
            banner_image_mobile: m.banner_image_mobile,
            background_image: m.background_image,
            is_active: m.is_active,
            position: m.position,
            keyword: Keyword::from_code(&m.keyword).unwrap_or_default(),
            metadata,
        }
    }
}

fn to_active_model(aggregate: &GridConfiguration) -> anyhow::Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(aggregate.to_string_id()),
        title: Set(aggregate.title.clone()),
        content_type: Set(aggregate.content_type.code().to_string()),
        is_title_show: Set(aggregate.is_title_show),
        grid_rows: Set(aggregate.grid.rows as i32),
        grid_columns: Set(aggregate.grid.columns as i32),
        mobile_rows: Set(aggregate.grid.mobile_rows as i32),
        mobile_columns: Set(aggregate.grid.mobile_columns as i32),
        content_items: Set(serde_json::to_string(&aggregate.content_items)?),
        banner_image: Set(aggregate.banner_image.clone()),
        banner_image_mobile: Set(aggregate.banner_image_mobile.clone()),
        background_image: Set(aggregate.background_image.clone()),
        is_active: Set(aggregate.is_active),
        position: Set(aggregate.position),
        keyword: Set(aggregate.keyword.code().to_string()),
        is_deleted: Set(aggregate.metadata.is_deleted),
        created_at: Set(Some(aggregate.metadata.created_at)),
        updated_at: Set(Some(aggregate.metadata.updated_at)),
        version: Set(aggregate.metadata.version),
    })
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Фильтр списка конфигураций
#[derive(Debug, Clone, Default)]
pub struct GridConfigurationFilter {
    pub keyword: Option<Keyword>,
    pub search: Option<String>,
    pub limit: u64,
    pub offset: u64,
}

/// Список конфигураций по порядку `position` и общее количество
pub async fn list_paginated(
    filter: &GridConfigurationFilter,
) -> anyhow::Result<(Vec<GridConfiguration>, u64)> {
    let mut query = Entity::find().filter(Column::IsDeleted.eq(false));

    if let Some(keyword) = filter.keyword {
        query = query.filter(Column::Keyword.eq(keyword.code()));
    }
    if let Some(search) = filter.search.as_deref() {
        query = query.filter(Column::Title.contains(search));
    }

    let total = query.clone().count(conn()).await?;

    let items = query
        .order_by_asc(Column::Position)
        .order_by_asc(Column::CreatedAt)
        .limit(filter.limit)
        .offset(filter.offset)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((items, total))
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<GridConfiguration>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

/// Наибольшая позиция среди неудалённых конфигураций
pub async fn max_position() -> anyhow::Result<Option<i32>> {
    let last = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::Position)
        .one(conn())
        .await?;
    Ok(last.map(|m| m.position))
}

pub async fn insert(aggregate: &GridConfiguration) -> anyhow::Result<Uuid> {
    to_active_model(aggregate)?.insert(conn()).await?;
    Ok(aggregate.id.value())
}

pub async fn update(aggregate: &GridConfiguration) -> anyhow::Result<()> {
    let mut active = to_active_model(aggregate)?;
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn set_active(id: Uuid, is_active: bool) -> anyhow::Result<bool> {
    let result = Entity::update_many()
        .col_expr(Column::IsActive, Expr::value(is_active))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

/// Записать новые позиции одной транзакцией: неизвестный id отменяет всё
pub async fn update_positions(updates: &[PositionUpdate]) -> anyhow::Result<()> {
    let txn = conn().begin().await?;
    let now = Utc::now();

    for update in updates {
        let result = Entity::update_many()
            .col_expr(Column::Position, Expr::value(update.position))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(update.id.as_str()))
            .filter(Column::IsDeleted.eq(false))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(AppError::not_found("Конфигурация", &update.id).into());
        }
    }

    txn.commit().await?;
    Ok(())
}
