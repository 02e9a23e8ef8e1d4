//! Newsletter endpoint

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use newsletter_assembler::{NewsletterRequest, RenderedOutput};

use crate::error::ApiError;
use crate::state::AppState;

/// `POST /api/newsletter`
///
/// Returns 200 with the rendered newsletter, including the empty newsletter
/// produced when company research fails.
pub async fn create_newsletter(
    State(state): State<AppState>,
    payload: Result<Json<NewsletterRequest>, JsonRejection>,
) -> Result<Json<RenderedOutput>, ApiError> {
    let Json(request) = payload?;
    let output = state.assembler.assemble(request).await?;
    Ok(Json(output))
}
