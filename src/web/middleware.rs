//! Response hook wrapped around every page route.

use crate::{
    core::bulletin,
    web::{AppState, TemplateResponse, template},
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Renders template responses with the rubric navigation.
///
/// Responses that carry a [`TemplateResponse`] get the rubrics holding at least
/// one bulletin injected into their context and are rendered to HTML. Every
/// other response passes through untouched.
pub async fn rubric_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(mut page) = response.extensions_mut().remove::<TemplateResponse>() else {
        return response;
    };

    match bulletin::rubrics_with_bulletins(&state.db).await {
        Ok(rubrics) => page.rubrics = rubrics,
        Err(e) => return e.into_response(),
    }

    match template::render(&page, &state.tags) {
        Ok(markup) => (page.status, markup).into_response(),
        Err(e) => e.into_response(),
    }
}
