use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{Html, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{render, AppState};
use crate::api::public::{get_category, get_product, list_categories, list_products};
use crate::api::ListQuery;
use crate::middleware::{to_response, StorefrontError};
use crate::pages::Pager;

const HOME_CATEGORY_LIMIT: u32 = 50;

pub fn page_router() -> Router {
    Router::new()
        .route("/", get(home))
        .route("/products", get(products))
        .route("/products/:id", get(product))
        .route("/categories/:id", get(category))
        .route("/health", get(health))
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    page: Option<u32>,
    category_id: Option<i64>,
    brand_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    page: Option<u32>,
}

fn failure(err: StorefrontError) -> Response {
    let status = err.status();
    let body = render::error_page(status.as_u16(), &err.to_string());
    to_response((status, Html(body)), Err(err))
}

fn page(html: String) -> Response {
    to_response((StatusCode::OK, Html(html)), Ok(()))
}

async fn home(Extension(state): Extension<Arc<AppState>>) -> Response {
    let category_query = ListQuery::page(1, HOME_CATEGORY_LIMIT);
    let product_query = ListQuery::page(1, state.page_size);
    let categories = list_categories(&state.client, &category_query);
    let products = list_products(&state.client, &product_query);

    match tokio::try_join!(categories, products) {
        Ok((categories, products)) => page(render::home(
            &state.client,
            &categories.items,
            &products.items,
        )),
        Err(err) => failure(err.into()),
    }
}

async fn products(
    Query(params): Query<ProductsQuery>,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    let query = ListQuery {
        category_id: params.category_id,
        brand_id: params.brand_id,
        ..ListQuery::page(params.page.unwrap_or(1).max(1), state.page_size)
    };

    match list_products(&state.client, &query).await {
        Ok(result) => {
            let mut pager = Pager::new(state.page_size);
            pager.update(result.page, result.total);

            let mut filters = Vec::new();
            if let Some(id) = params.category_id {
                filters.push(("category_id", id.to_string()));
            }
            if let Some(id) = params.brand_id {
                filters.push(("brand_id", id.to_string()));
            }
            page(render::products(&state.client, &result.items, &pager, &filters))
        }
        Err(err) => failure(err.into()),
    }
}

async fn product(
    Path(id): Path<i64>,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    match get_product(&state.client, id).await {
        Ok(product) => page(render::product_detail(&state.client, &product)),
        Err(err) => failure(err.into()),
    }
}

async fn category(
    Path(id): Path<i64>,
    Query(params): Query<PageQuery>,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    let category = match get_category(&state.client, id).await {
        Ok(category) => category,
        Err(err) => return failure(err.into()),
    };

    let query = ListQuery {
        category_id: Some(id),
        ..ListQuery::page(params.page.unwrap_or(1).max(1), state.page_size)
    };
    match list_products(&state.client, &query).await {
        Ok(result) => {
            let mut pager = Pager::new(state.page_size);
            pager.update(result.page, result.total);
            page(render::category(&state.client, &category, &result.items, &pager))
        }
        Err(err) => failure(err.into()),
    }
}

async fn health() -> Response {
    to_response((StatusCode::OK, "OK"), Ok(()))
}
