use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Method},
    middleware,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{app, images, AppState};

use super::util::rate_limit;

pub const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST]);

    // generation has its own limit in place of the defaults
    let generate = Router::new()
        .route(
            "/api/generate",
            get(images::controller::generate_image_from_query)
                .post(images::controller::generate_image),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::limit_generate,
        ));

    let default = Router::new()
        .route("/", get(app::controller::get_root))
        .route("/api/health", get(app::controller::get_health))
        .route("/api/styles", get(images::controller::get_styles))
        .route("/api/sizes", get(images::controller::get_sizes))
        .route("/api/ratios", get(images::controller::get_ratios))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::limit_default,
        ));

    Router::new()
        .merge(generate)
        .merge(default)
        .fallback(app::controller::fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(app::controller::handle_panic))
                .layer(cors)
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}
