//! Handlers for the `/projects` resource.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::response::Redirect;
use axum::Json;
use showcase_core::project::{ImageBlob, Project, Submission};

use crate::error::AppResult;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Multipart field carrying the project description.
const DESCRIPTION_FIELD: &str = "description";

/// Multipart field carrying image files; may repeat.
const IMAGES_FIELD: &str = "images";

pub const PROJECT_CREATED: &str = "Project created successfully";

/// POST /projects
///
/// Accepts `multipart/form-data` with one `description` text field and one
/// or more `images` file parts. Images are uploaded in the order they appear
/// in the body.
pub async fn create(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<MessageResponse<Project>>> {
    let submission = read_submission(multipart?).await?;
    tracing::debug!(images = submission.images.len(), "Received project submission");

    let project = state.workflow.submit(submission).await?;

    Ok(Json(MessageResponse {
        message: PROJECT_CREATED,
        data: project,
    }))
}

/// POST /projects/
///
/// Sends trailing-slash submissions to the canonical path. `307` keeps the
/// method and body.
pub async fn redirect_to_canonical() -> Redirect {
    Redirect::temporary("/projects")
}

/// Collect the form fields into a [`Submission`]. Field presence is checked
/// later by the workflow; unknown fields are ignored.
async fn read_submission(mut multipart: Multipart) -> AppResult<Submission> {
    let mut description: Option<String> = None;
    let mut images = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            DESCRIPTION_FIELD => {
                description = Some(field.text().await?);
            }
            IMAGES_FIELD => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;

                // Browsers send an empty, unnamed part when no file was picked.
                if bytes.is_empty() && file_name.as_deref().unwrap_or("").is_empty() {
                    continue;
                }

                images.push(ImageBlob {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            _ => {}
        }
    }

    Ok(Submission::new(description.unwrap_or_default(), images))
}
