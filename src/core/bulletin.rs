//! Bulletin business logic - rubrics and the bulletins filed under them.
//!
//! Provides the listings behind the board pages and the rubric counts that
//! the web layer shows in its navigation.

use crate::{
    core::{clean_name, clean_price},
    entities::{Bb, Rubric, bb, rubric},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{FromQueryResult, JoinType, QueryOrder, QuerySelect, Set, prelude::*};
use tracing::{debug, info};

const RUBRIC_NAME_MAX_CHARS: usize = 20;
const TITLE_MAX_CHARS: usize = 50;

/// A rubric together with the number of bulletins filed under it.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct RubricCount {
    /// Rubric id
    pub id: i64,
    /// Rubric name
    pub name: String,
    /// Number of bulletins in the rubric, always at least 1
    pub count: i64,
}

/// Creates a rubric.
///
/// # Errors
/// Returns a validation error if the name is empty, longer than 20 characters
/// or already taken.
pub async fn create_rubric(db: &DatabaseConnection, name: &str) -> Result<rubric::Model> {
    let name = clean_name(name, "Rubric name", RUBRIC_NAME_MAX_CHARS)?;

    if get_rubric_by_name(db, &name).await?.is_some() {
        return Err(Error::validation(format!("Rubric '{name}' already exists")));
    }

    rubric::ActiveModel {
        name: Set(name),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves all rubrics ordered alphabetically by name.
pub async fn get_all_rubrics(db: &DatabaseConnection) -> Result<Vec<rubric::Model>> {
    Rubric::find()
        .order_by_asc(rubric::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a rubric by id, returning None if it does not exist.
pub async fn get_rubric_by_id(
    db: &DatabaseConnection,
    rubric_id: i64,
) -> Result<Option<rubric::Model>> {
    Rubric::find_by_id(rubric_id).one(db).await.map_err(Into::into)
}

/// Finds a rubric by its exact name.
pub async fn get_rubric_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<rubric::Model>> {
    Rubric::find()
        .filter(rubric::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the rubrics that hold at least one bulletin, with their bulletin
/// counts, ordered by name. Empty rubrics are left out.
pub async fn rubrics_with_bulletins(db: &DatabaseConnection) -> Result<Vec<RubricCount>> {
    Rubric::find()
        .select_only()
        .column(rubric::Column::Id)
        .column(rubric::Column::Name)
        .column_as(bb::Column::Id.count(), "count")
        .join(JoinType::InnerJoin, rubric::Relation::Bbs.def())
        .group_by(rubric::Column::Id)
        .group_by(rubric::Column::Name)
        .order_by_asc(rubric::Column::Name)
        .into_model::<RubricCount>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates any of `names` that do not exist yet and returns how many were added.
pub async fn seed_rubrics(db: &DatabaseConnection, names: &[String]) -> Result<usize> {
    let mut created = 0;
    for name in names {
        let name = clean_name(name, "Rubric name", RUBRIC_NAME_MAX_CHARS)?;
        if get_rubric_by_name(db, &name).await?.is_none() {
            create_rubric(db, &name).await?;
            created += 1;
        }
    }

    if created > 0 {
        info!("Seeded {} rubrics", created);
    }
    Ok(created)
}

/// Posts a new bulletin.
///
/// Empty content is stored as no content. The publication time is now.
///
/// # Errors
/// Returns an error if:
/// - The title is empty or longer than 50 characters
/// - The price is negative
/// - The rubric does not exist
/// - The database insert fails
pub async fn create_bulletin(
    db: &DatabaseConnection,
    title: &str,
    content: Option<String>,
    price: Option<Decimal>,
    rubric_id: Option<i64>,
) -> Result<bb::Model> {
    let title = clean_name(title, "Title", TITLE_MAX_CHARS)?;
    let price = price.map(clean_price).transpose()?;
    let content = content
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty());

    if let Some(rubric_id) = rubric_id {
        get_rubric_by_id(db, rubric_id)
            .await?
            .ok_or(Error::RubricNotFound { id: rubric_id })?;
    }

    let bulletin = bb::ActiveModel {
        title: Set(title),
        content: Set(content),
        price: Set(price),
        published: Set(chrono::Utc::now()),
        rubric_id: Set(rubric_id),
        ..Default::default()
    }
    .insert(db)
    .await?;

    debug!("Posted bulletin {} in rubric {:?}", bulletin.id, rubric_id);
    Ok(bulletin)
}

/// Retrieves every bulletin with its rubric, newest first.
pub async fn get_all_bulletins(
    db: &DatabaseConnection,
) -> Result<Vec<(bb::Model, Option<rubric::Model>)>> {
    Bb::find()
        .order_by_desc(bb::Column::Published)
        .order_by_desc(bb::Column::Id)
        .find_also_related(Rubric)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the bulletins of one rubric, newest first.
pub async fn get_bulletins_by_rubric(
    db: &DatabaseConnection,
    rubric_id: i64,
) -> Result<Vec<bb::Model>> {
    Bb::find()
        .filter(bb::Column::RubricId.eq(rubric_id))
        .order_by_desc(bb::Column::Published)
        .order_by_desc(bb::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a bulletin by id, returning None if it does not exist.
pub async fn get_bulletin_by_id(db: &DatabaseConnection, bb_id: i64) -> Result<Option<bb::Model>> {
    Bb::find_by_id(bb_id).one(db).await.map_err(Into::into)
}
