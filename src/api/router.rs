//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::{ApiResponse, CreateProductRequest, ProductDto};
use crate::api::handlers::{health, products};
use crate::api::handlers::products::ProductAppState;
use crate::infrastructure::Storage;
use crate::shared::types::pagination::{PageRequest, Search};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::get_product,
        products::create_product,
    ),
    components(schemas(
        health::HealthResponse,
        ProductDto,
        CreateProductRequest,
        Search,
        PageRequest<ProductDto>,
        ApiResponse<ProductDto>,
    )),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Products", description = "Paged product catalog")
    )
)]
struct ApiDoc;

/// Build the REST API router: catalog routes, health check, Swagger UI,
/// permissive CORS and request tracing.
pub fn create_api_router(storage: Arc<dyn Storage>) -> Router {
    let state = ProductAppState { storage };

    Router::new()
        .route(
            "/api/v1/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/api/v1/products/{id}", get(products::get_product))
        .route("/health", get(health::health_check))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
