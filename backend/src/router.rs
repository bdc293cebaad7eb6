use axum::{
    http::Method,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware as app_middleware;
use crate::{docs, handlers, state::AppState};

/// Composes the full application router over the shared state.
///
/// The edge gatekeeper wraps everything (it excludes `/api` itself); API
/// routes are grouped by gate: open, rate-limited auth, cookie-required,
/// and admin-only.
pub fn build_router(state: AppState) -> Router {
    // Session establishment endpoints sit behind admission control.
    let auth_routes = Router::new()
        .route("/api/auth/google", post(handlers::auth::google_login))
        .route("/api/auth/signup", post(handlers::auth::signup))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            app_middleware::auth_rate_limit,
        ));

    // Public listings. Internship create/delete share these paths and carry
    // their admin gate inside the handler.
    let open_routes = Router::new()
        .route(
            "/api/internships",
            get(handlers::internships::list).post(handlers::internships::create),
        )
        .route(
            "/api/internships/featured",
            get(handlers::internships::featured),
        )
        .route(
            "/api/internships/{id}",
            axum::routing::delete(handlers::internships::delete),
        )
        .route("/api/docs/openapi.json", get(docs::openapi_json));

    // Routes that require a resolved user.
    let user_routes = Router::new()
        .route("/api/auth/me", get(handlers::auth::me))
        .route(
            "/api/applications",
            post(handlers::applications::create).get(handlers::applications::list_mine),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            app_middleware::auth,
        ));

    // Back-office routes: resolved user with the admin role.
    let admin_routes = Router::new()
        .route(
            "/api/applications/{id}",
            get(handlers::applications::get_one).patch(handlers::applications::update_status),
        )
        .route(
            "/api/admin/applications",
            get(handlers::admin::list_applications),
        )
        .route("/api/admin/stats", get(handlers::admin::stats))
        .route("/api/users", get(handlers::admin::list_users))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            app_middleware::auth_admin,
        ));

    Router::new()
        .merge(auth_routes)
        .merge(open_routes)
        .merge(user_routes)
        .merge(admin_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            app_middleware::gatekeeper,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::PATCH,
                            Method::DELETE,
                            Method::OPTIONS,
                        ])
                        .allow_headers(Any)
                        .max_age(std::time::Duration::from_secs(24 * 60 * 60)),
                ),
        )
        .with_state(state)
}
