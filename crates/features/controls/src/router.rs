use crate::handlers;
use hugo_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Routes for the controls slice, documented for the OpenAPI aggregator.
pub fn controls_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::list_controls, handlers::create_control))
        .routes(routes!(handlers::filter_controls))
        .routes(routes!(handlers::get_control))
        .routes(routes!(handlers::update_control))
        .routes(routes!(handlers::delete_control))
}
