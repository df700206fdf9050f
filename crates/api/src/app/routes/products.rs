use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};

use shopfront_products::ProductData;

use crate::app::errors;
use crate::app::routes::common::{parse_product_id, validated_body};
use crate::app::services::AppServices;
use crate::context::PrincipalContext;
use crate::middleware::{AuthState, auth_middleware};

/// Reads are public; writes go through the bearer-token middleware.
pub fn router(auth: AuthState) -> Router {
    let authenticated = axum::middleware::from_fn_with_state(auth, auth_middleware);

    Router::new()
        .route(
            "/",
            get(list_products).merge(post(create_product).route_layer(authenticated.clone())),
        )
        .route(
            "/:id",
            get(get_product).merge(
                patch(update_product)
                    .delete(destroy_product)
                    .route_layer(authenticated),
            ),
        )
}

pub async fn list_products(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match services.products.get_products().await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::product_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.products.get_product(id).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::product_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<ProductData>, JsonRejection>,
) -> Response {
    let attributes = match validated_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.products.create_product(attributes).await {
        Ok(product) => {
            tracing::info!(
                principal = %principal.principal_id(),
                product_id = %product.id_typed(),
                "product created"
            );
            (StatusCode::CREATED, Json(product)).into_response()
        }
        Err(e) => errors::product_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<ProductData>, JsonRejection>,
) -> Response {
    let id = match parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let attributes = match validated_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.products.update_product(id, attributes).await {
        Ok(product) => {
            tracing::info!(principal = %principal.principal_id(), product_id = %id, "product updated");
            (StatusCode::OK, Json(product)).into_response()
        }
        Err(e) => errors::product_error_to_response(e),
    }
}

pub async fn destroy_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.products.delete_product(id).await {
        Ok(_) => {
            tracing::info!(principal = %principal.principal_id(), product_id = %id, "product deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => errors::product_error_to_response(e),
    }
}
