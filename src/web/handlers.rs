//! Route handlers.
//!
//! Handlers load what a page needs through `core` and hand it back as a
//! [`TemplateResponse`]; rendering happens in the rubric middleware.

use crate::{
    core::{bulletin, inventory, maintenance, note},
    entities::EntityKind,
    errors::{Error, Result},
    web::{
        AppState, Page, TemplateResponse,
        template::{BbForm, MachineView},
    },
};
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use tracing::info;

/// Parses the numeric id segment of `path`; anything else names no page.
fn parse_id(raw: &str, path: impl FnOnce() -> String) -> Result<i64> {
    raw.parse().map_err(|_| Error::PageNotFound { path: path() })
}

/// `GET /` - every bulletin, newest first.
pub async fn index(State(state): State<AppState>) -> Result<TemplateResponse> {
    let bbs = bulletin::get_all_bulletins(&state.db).await?;
    Ok(TemplateResponse::new(Page::Index { bbs }))
}

/// `GET /{rubric_id}/` - bulletins of one rubric.
pub async fn by_rubric(
    State(state): State<AppState>,
    Path(rubric_id): Path<String>,
) -> Result<TemplateResponse> {
    let rubric_id = parse_id(&rubric_id, || format!("/{rubric_id}/"))?;
    let rubric = bulletin::get_rubric_by_id(&state.db, rubric_id)
        .await?
        .ok_or(Error::RubricNotFound { id: rubric_id })?;
    let bbs = bulletin::get_bulletins_by_rubric(&state.db, rubric_id).await?;

    Ok(TemplateResponse::new(Page::ByRubric { rubric, bbs }))
}

/// `GET /add/` - empty bulletin form.
pub async fn add_form(State(state): State<AppState>) -> Result<TemplateResponse> {
    let rubrics = bulletin::get_all_rubrics(&state.db).await?;
    Ok(TemplateResponse::new(Page::Create {
        rubrics,
        form: BbForm::default(),
        error: None,
    }))
}

fn parse_price(raw: &str) -> Result<Option<Decimal>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(raw)
        .map(Some)
        .map_err(|_| Error::validation("Price must be a number"))
}

fn parse_rubric(raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|_| Error::validation("Choose a rubric"))
}

/// `POST /add/` - creates a bulletin and redirects to its rubric.
///
/// Invalid input re-renders the form with the submitted values and the error.
pub async fn add_submit(
    State(state): State<AppState>,
    Form(form): Form<BbForm>,
) -> Result<Response> {
    let created = async {
        let price = parse_price(&form.price)?;
        let rubric_id = parse_rubric(&form.rubric)?;
        bulletin::create_bulletin(
            &state.db,
            &form.title,
            Some(form.content.clone()),
            price,
            Some(rubric_id),
        )
        .await
    }
    .await;

    match created {
        Ok(bb) => {
            info!("Bulletin {} posted", bb.id);
            let rubric_id = bb.rubric_id.unwrap_or_default();
            Ok(Redirect::to(&format!("/{rubric_id}/")).into_response())
        }
        Err(
            e @ (Error::Validation { .. } | Error::InvalidPrice { .. } | Error::RubricNotFound { .. }),
        ) => {
            let rubrics = bulletin::get_all_rubrics(&state.db).await?;
            Ok(TemplateResponse::with_status(
                StatusCode::BAD_REQUEST,
                Page::Create {
                    rubrics,
                    form,
                    error: Some(e.to_string()),
                },
            )
            .into_response())
        }
        Err(e) => Err(e),
    }
}

/// `GET /machines/{machine_id}/` - machine details.
pub async fn machine_detail(
    State(state): State<AppState>,
    Path(machine_id): Path<String>,
) -> Result<TemplateResponse> {
    let machine_id = parse_id(&machine_id, || format!("/machines/{machine_id}/"))?;
    let db = &*state.db;
    let machine = inventory::require_machine(db, machine_id).await?;

    let (price, total_price) = match inventory::get_machine_price(db, machine_id).await {
        Ok(pricing) => (
            Some(pricing.price),
            Some(inventory::get_total_price(db, machine_id).await?),
        ),
        Err(Error::PriceNotFound { .. }) => (None, None),
        Err(e) => return Err(e),
    };

    let view = MachineView {
        id: machine.id,
        name: machine.name,
        price,
        total_price,
        spares: inventory::get_spares_for_machine(db, machine_id).await?,
        schedule: maintenance::get_maintenance_schedule(db, machine_id).await?,
        notes: note::get_notes_for(db, note::NoteTarget::new(EntityKind::Machine, machine_id))
            .await?,
    };

    Ok(TemplateResponse::new(Page::Machine(view)))
}

/// Body of the schedule form; an empty date means today.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScheduleForm {
    pub start_date: String,
}

/// `POST /machines/{machine_id}/schedule/` - regenerates the maintenance schedule.
pub async fn regenerate_schedule(
    State(state): State<AppState>,
    Path(machine_id): Path<String>,
    Form(form): Form<ScheduleForm>,
) -> Result<Redirect> {
    let machine_id = parse_id(&machine_id, || format!("/machines/{machine_id}/schedule/"))?;
    let start_date = if form.start_date.trim().is_empty() {
        None
    } else {
        Some(maintenance::parse_start_date(&form.start_date)?)
    };

    maintenance::create_maintenance_schedule(&state.db, machine_id, start_date).await?;
    Ok(Redirect::to(&format!("/machines/{machine_id}/")))
}
