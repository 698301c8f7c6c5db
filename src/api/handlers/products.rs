//! Product API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use log::info;

use crate::api::dto::{ApiResponse, CreateProductRequest, ProductDto};
use crate::api::extract::{PageQuery, ValidatedJson};
use crate::domain::Product;
use crate::infrastructure::Storage;
use crate::shared::types::pagination::PageRequest;

/// Product storage state
#[derive(Clone)]
pub struct ProductAppState {
    pub storage: Arc<dyn Storage>,
}

type HandlerError = (StatusCode, Json<ApiResponse<()>>);

fn internal_error(e: impl std::fmt::Display) -> HandlerError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error(e.to_string())),
    )
}

/// Список товаров с пагинацией
///
/// Возвращает одну страницу каталога. Поддерживает сортировку (`sort`) и
/// фильтры вида `column.action=value`, например `name.contains=bolt`.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    tag = "Products",
    params(
        ("limit" = Option<i64>, Query, description = "Размер страницы (по умолчанию 10)"),
        ("page" = Option<i64>, Query, description = "Номер страницы, начиная с 1"),
        ("sort" = Option<String>, Query, description = "Выражение сортировки, напр. `id desc`")
    ),
    responses(
        (status = 200, description = "Страница каталога с метаданными", body = PageRequest<ProductDto>)
    )
)]
pub async fn list_products(
    State(state): State<ProductAppState>,
    PageQuery(mut page): PageQuery<ProductDto>,
) -> Result<Json<PageRequest<ProductDto>>, HandlerError> {
    let (products, total) = state
        .storage
        .list_products(&page.searchs, &page.sort, page.limit, page.offset())
        .await
        .map_err(internal_error)?;

    page.set_total_rows(total);
    page.paginate();
    page.rows = products.into_iter().map(ProductDto::from).collect();

    Ok(Json(page))
}

/// Товар по идентификатору
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "ID товара")
    ),
    responses(
        (status = 200, description = "Товар найден", body = ApiResponse<ProductDto>),
        (status = 404, description = "Товар не найден")
    )
)]
pub async fn get_product(
    State(state): State<ProductAppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ProductDto>>, HandlerError> {
    match state.storage.get_product(id).await.map_err(internal_error)? {
        Some(product) => Ok(Json(ApiResponse::success(product.into()))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Product {} not found", id))),
        )),
    }
}

/// Создание товара
#[utoipa::path(
    post,
    path = "/api/v1/products",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Товар создан", body = ApiResponse<ProductDto>),
        (status = 422, description = "Ошибка валидации")
    )
)]
pub async fn create_product(
    State(state): State<ProductAppState>,
    ValidatedJson(body): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProductDto>>), HandlerError> {
    let id = state.storage.next_product_id().await;
    let product = Product {
        id,
        name: body.name,
        category: body.category,
        price_cents: body.price_cents,
        is_active: body.is_active,
        created_at: Utc::now(),
    };

    let saved = state
        .storage
        .save_product(product)
        .await
        .map_err(internal_error)?;

    info!("Created product {} ({})", saved.id, saved.name);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(saved.into())),
    ))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;

    use crate::infrastructure::InMemoryStorage;

    fn app() -> Router {
        let state = ProductAppState {
            storage: Arc::new(InMemoryStorage::with_demo_data()),
        };
        Router::new()
            .route(
                "/api/v1/products",
                get(list_products).post(create_product),
            )
            .route("/api/v1/products/{id}", get(get_product))
            .with_state(state)
    }

    async fn send(req: Request<Body>) -> axum::http::Response<Body> {
        use tower::Service;
        let mut svc = app().into_service();
        svc.call(req).await.unwrap()
    }

    async fn json_body(resp: axum::http::Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn list_returns_wire_contract_fields() {
        let req = Request::builder()
            .uri("/api/v1/products?limit=5&page=2&name.contains=a")
            .body(Body::empty())
            .unwrap();

        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json = json_body(resp).await;
        for field in [
            "limit",
            "page",
            "totalRows",
            "totalPages",
            "sort",
            "firstPage",
            "lastPage",
            "previousPage",
            "nextPage",
            "fromRow",
            "toRows",
            "searchs",
            "rows",
        ] {
            assert!(json.get(field).is_some(), "missing wire field {field}");
        }
        assert_eq!(json["limit"], 5);
        assert_eq!(json["page"], 2);
        assert_eq!(json["searchs"][0]["column"], "name");
        assert_eq!(json["searchs"][0]["action"], "contains");
    }

    #[tokio::test]
    async fn list_pages_through_demo_catalog() {
        let req = Request::builder()
            .uri("/api/v1/products?limit=10&page=2&sort=id%20asc")
            .body(Body::empty())
            .unwrap();

        let json = json_body(send(req).await).await;
        assert_eq!(json["totalRows"], 12);
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["fromRow"], 11);
        // toRows deliberately unclamped (20 > 12)
        assert_eq!(json["toRows"], 20);
        assert_eq!(json["rows"].as_array().unwrap().len(), 2);
        assert_eq!(json["rows"][0]["id"], 11);
        assert_eq!(json["nextPage"], "");
        assert_eq!(
            json["previousPage"],
            "?limit=10&page=1&sort=id%20asc"
        );
    }

    #[tokio::test]
    async fn list_with_filter_narrows_rows() {
        let req = Request::builder()
            .uri("/api/v1/products?category.eq=tools&limit=50")
            .body(Body::empty())
            .unwrap();

        let json = json_body(send(req).await).await;
        assert_eq!(json["totalRows"], 4);
        assert!(json["rows"]
            .as_array()
            .unwrap()
            .iter()
            .all(|row| row["category"] == "tools"));
    }

    #[tokio::test]
    async fn get_known_product_succeeds() {
        let req = Request::builder()
            .uri("/api/v1/products/1")
            .body(Body::empty())
            .unwrap();

        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["id"], 1);
    }

    #[tokio::test]
    async fn get_unknown_product_is_404() {
        let req = Request::builder()
            .uri("/api/v1/products/999")
            .body(Body::empty())
            .unwrap();

        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_product_returns_201() {
        let body = serde_json::json!({
            "name": "Socket set",
            "category": "tools",
            "price_cents": 4500
        });
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/products")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();

        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let json = json_body(resp).await;
        assert_eq!(json["data"]["id"], 13);
        assert_eq!(json["data"]["is_active"], true);
    }

    #[tokio::test]
    async fn create_with_empty_name_is_422() {
        let body = serde_json::json!({
            "name": "",
            "category": "tools",
            "price_cents": 100
        });
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/products")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();

        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
