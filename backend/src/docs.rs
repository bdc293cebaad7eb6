//! OpenAPI schema document assembled from the model and payload types.

use axum::Json;
use utoipa::OpenApi;

use crate::{
    models::{
        application::{
            AdminApplicationView, Application, ApplicationStatus, ApplicationView,
            CreateApplicationRequest, UpdateStatusRequest,
        },
        internship::{CreateInternship, Internship, InternshipSummary},
        user::{GoogleLoginRequest, SignupRequest, User, UserResponse, UserRole},
    },
    repositories::stats::StatsPayload,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Talent Bridge API",
        description = "Internship marketplace backend: auth, listings, applications, admin review."
    ),
    components(schemas(
        User,
        UserRole,
        UserResponse,
        SignupRequest,
        GoogleLoginRequest,
        Internship,
        CreateInternship,
        InternshipSummary,
        Application,
        ApplicationStatus,
        ApplicationView,
        AdminApplicationView,
        CreateApplicationRequest,
        UpdateStatusRequest,
        StatsPayload,
    ))
)]
pub struct ApiDoc;

/// `GET /api/docs/openapi.json`
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
