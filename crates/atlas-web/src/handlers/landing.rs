//! Landing page and search submission.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::error::WebError;
use crate::session::Session;
use crate::state::SharedState;
use crate::submit::SubmitOutcome;

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub query: String,
}

/// GET /
pub async fn landing_page(
    State(state): State<SharedState>,
    session: Session,
) -> Result<Response, WebError> {
    let html = state.templates.landing(&state.config.ui.prompt_chips)?;
    let mut response = Html(html).into_response();
    session.attach(&mut response);
    Ok(response)
}

/// POST /search: search box and prompt chips.
pub async fn search_submit(
    State(state): State<SharedState>,
    session: Session,
    Form(form): Form<SearchForm>,
) -> Response {
    let mut response = match state.submitter.submit(session.id, &form.query).await {
        SubmitOutcome::Navigate(nav) => Redirect::to(&nav.href()).into_response(),
        // The browser stays where it is.
        SubmitOutcome::Ignored(_) => StatusCode::NO_CONTENT.into_response(),
    };
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, header::HeaderValue::from_static("no-store"));
    session.attach(&mut response);
    response
}
