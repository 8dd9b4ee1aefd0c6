use axum::routing::get;
use axum::{Json, Router};
use hugo_domain::constants::{API_DESCRIPTION, API_TITLE, API_VERSION, CONTROLS_TAG, SYSTEM_TAG};
use hugo_kernel::prelude::ApiState;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa::openapi::info::InfoBuilder;
use utoipa::openapi::tag::TagBuilder;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
struct ApiDoc;

fn api_doc() -> utoipa::openapi::OpenApi {
    let mut api = ApiDoc::openapi();
    api.info = InfoBuilder::new()
        .title(API_TITLE)
        .description(Some(API_DESCRIPTION))
        .version(API_VERSION)
        .build();
    api.tags = Some(vec![
        TagBuilder::new()
            .name(CONTROLS_TAG)
            .description(Some("Compliance control records"))
            .build(),
        TagBuilder::new().name(SYSTEM_TAG).description(Some("Service diagnostics")).build(),
    ]);
    api
}

pub(crate) fn init(state: ApiState) -> Router {
    let (routes, api) = OpenApiRouter::with_openapi(api_doc())
        .merge(hugo_kernel::server::router::system_router())
        .merge(hugo_controls::router::controls_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .split_for_parts();

    let document = api.clone();
    let document_route =
        Router::new().route("/openapi.json", get(move || async move { Json(document) }));

    Router::new().merge(routes).merge(document_route).merge(Scalar::with_url("/docs", api))
}
