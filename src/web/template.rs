//! Page templates.
//!
//! A handler returns a [`TemplateResponse`]: the page to show plus the data it
//! needs. Turning it into a response only stores it in the response
//! extensions; `middleware::rubric_middleware` fills in the rubric navigation
//! and calls [`render`] to produce the final HTML with `maud`.

use crate::{
    core::{bulletin::RubricCount, maintenance::SCHEDULE_SEPARATOR},
    entities::{bb, kit, note, rubric, spare},
    errors::Result,
    templatetags::TagLibrary,
};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{DOCTYPE, Markup, html};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Format of the timestamp shown in the page footer
const FOOTER_DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Values submitted through the bulletin form, kept as text so they can be
/// shown again when validation fails.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BbForm {
    pub title: String,
    pub content: String,
    pub price: String,
    pub rubric: String,
}

/// Everything the machine page shows
#[derive(Debug, Clone)]
pub struct MachineView {
    pub id: i64,
    pub name: String,
    pub price: Option<Decimal>,
    pub total_price: Option<Decimal>,
    pub spares: Vec<(kit::Model, spare::Model)>,
    pub schedule: Option<String>,
    pub notes: Vec<note::Model>,
}

/// The pages of the site with their data
#[derive(Debug, Clone)]
pub enum Page {
    /// All bulletins
    Index {
        bbs: Vec<(bb::Model, Option<rubric::Model>)>,
    },
    /// Bulletins of one rubric
    ByRubric {
        rubric: rubric::Model,
        bbs: Vec<bb::Model>,
    },
    /// Bulletin creation form
    Create {
        rubrics: Vec<rubric::Model>,
        form: BbForm,
        error: Option<String>,
    },
    /// Machine details and maintenance schedule
    Machine(MachineView),
}

/// A page waiting to be rendered
#[derive(Debug, Clone)]
pub struct TemplateResponse {
    /// HTTP status of the rendered page
    pub status: StatusCode,
    pub page: Page,
    /// Rubric navigation; filled in by the rubric middleware
    pub rubrics: Vec<RubricCount>,
}

impl TemplateResponse {
    /// A `200 OK` page.
    #[must_use]
    pub const fn new(page: Page) -> Self {
        Self::with_status(StatusCode::OK, page)
    }

    #[must_use]
    pub const fn with_status(status: StatusCode, page: Page) -> Self {
        Self {
            status,
            page,
            rubrics: Vec::new(),
        }
    }

    /// Page title shown in the browser tab.
    #[must_use]
    pub fn title(&self) -> String {
        match &self.page {
            Page::Index { .. } => "Main".to_string(),
            Page::ByRubric { rubric, .. } => rubric.name.clone(),
            Page::Create { .. } => "Add bulletin".to_string(),
            Page::Machine(machine) => machine.name.clone(),
        }
    }
}

impl IntoResponse for TemplateResponse {
    fn into_response(self) -> Response {
        let mut response = self.status.into_response();
        response.extensions_mut().insert(self);
        response
    }
}

fn render_bulletin(
    tags: &TagLibrary,
    bb: &bb::Model,
    rubric: Option<&rubric::Model>,
) -> Result<Markup> {
    let content = bb
        .content
        .as_deref()
        .map(|content| tags.call("truncate_half", &[content]))
        .transpose()?;
    let price = bb
        .price
        .map(|price| tags.call("currency", &[price.to_string().as_str()]))
        .transpose()?;

    Ok(html! {
        div class="bb" {
            h3 { (bb.title) }
            @if let Some(content) = content {
                p { (content) }
            }
            @if let Some(price) = price {
                p { (price) }
            }
            @if let Some(rubric) = rubric {
                p { a href=(format!("/{}/", rubric.id)) { (rubric.name) } }
            }
            p { (bb.published.format("%d.%m.%Y %H:%M").to_string()) }
        }
    })
}

fn render_form(rubrics: &[rubric::Model], form: &BbForm, error: Option<&str>) -> Markup {
    let chosen = form.rubric.trim();
    html! {
        h2 { "Add bulletin" }
        @if let Some(error) = error {
            p class="error" { (error) }
        }
        form method="post" action="/add/" {
            p { label { "Title " input name="title" maxlength="50" value=(form.title); } }
            p { label { "Content " textarea name="content" { (form.content) } } }
            p { label { "Price " input name="price" value=(form.price); } }
            p {
                label {
                    "Rubric "
                    select name="rubric" {
                        @for rubric in rubrics {
                            option value=(rubric.id) selected[chosen == rubric.id.to_string()] {
                                (rubric.name)
                            }
                        }
                    }
                }
            }
            p { button type="submit" { "Add" } }
        }
    }
}

fn render_machine(tags: &TagLibrary, machine: &MachineView) -> Result<Markup> {
    let pricing = match (machine.price, machine.total_price) {
        (Some(price), Some(total)) => Some((
            tags.call("currency", &[price.to_string().as_str()])?,
            tags.call("currency", &[total.to_string().as_str()])?,
        )),
        _ => None,
    };

    let spares = if machine.spares.is_empty() {
        None
    } else {
        let names: Vec<String> = machine
            .spares
            .iter()
            .map(|(kit, spare)| format!("{} x{}", spare.name, kit.count))
            .collect();
        let args: Vec<&str> = std::iter::once(", ")
            .chain(names.iter().map(String::as_str))
            .collect();
        Some(tags.call("lst", &args)?)
    };

    let schedule = machine
        .schedule
        .as_deref()
        .map(|schedule| {
            let dates: Vec<&str> = schedule.split(SCHEDULE_SEPARATOR).collect();
            tags.call("ulist", &dates)
        })
        .transpose()?;

    let notes = if machine.notes.is_empty() {
        None
    } else {
        let notes: Vec<&str> = machine.notes.iter().map(|n| n.content.as_str()).collect();
        Some(tags.call("ulist", &notes)?)
    };

    Ok(html! {
        h2 { (machine.name) }
        @match pricing {
            Some((price, total)) => {
                p { "Price: " (price) }
                p { "Total with spares: " (total) }
            }
            None => p { "Not priced" }
        }
        @if let Some(spares) = spares {
            p { "Spares: " (spares) }
        }
        h3 { "Maintenance schedule" }
        @match schedule {
            Some(schedule) => (schedule),
            None => p { "No schedule yet" }
        }
        form method="post" action=(format!("/machines/{}/schedule/", machine.id)) {
            label { "Start date " input name="start_date" placeholder="YYYY-MM-DD"; }
            button type="submit" { "Generate" }
        }
        @if let Some(notes) = notes {
            h3 { "Notes" }
            (notes)
        }
    })
}

/// Renders a page inside the shared layout.
///
/// # Errors
/// Returns an error if a template tag fails.
pub fn render(response: &TemplateResponse, tags: &TagLibrary) -> Result<Markup> {
    let body = match &response.page {
        Page::Index { bbs } => {
            let items = bbs
                .iter()
                .map(|(bb, rubric)| render_bulletin(tags, bb, rubric.as_ref()))
                .collect::<Result<Vec<_>>>()?;
            html! { @for item in items { (item) } }
        }
        Page::ByRubric { rubric, bbs } => {
            let heading = tags.call("to_upper", &[rubric.name.as_str()])?;
            let items = bbs
                .iter()
                .map(|bb| render_bulletin(tags, bb, None))
                .collect::<Result<Vec<_>>>()?;
            html! {
                h2 { "Rubric: " (heading) }
                @for item in items { (item) }
            }
        }
        Page::Create {
            rubrics,
            form,
            error,
        } => render_form(rubrics, form, error.as_deref()),
        Page::Machine(machine) => render_machine(tags, machine)?,
    };
    let footer = tags.call("current_datetime", &[FOOTER_DATETIME_FORMAT])?;

    Ok(html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (response.title()) " :: Bulletin board" }
            }
            body {
                header { h1 { "Bulletin board" } }
                nav {
                    a href="/" { "Main" } " "
                    a href="/add/" { "Add" }
                    @for rubric in &response.rubrics {
                        " "
                        a href=(format!("/{}/", rubric.id)) {
                            (rubric.name) " (" (rubric.count) ")"
                        }
                    }
                }
                section { (body) }
                footer { (footer) }
            }
        }
    })
}
