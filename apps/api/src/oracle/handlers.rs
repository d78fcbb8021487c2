//! Axum route handlers for the Oracle API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::catalog::{self, Category};
use crate::errors::AppError;
use crate::oracle::daily::{daily_header, DailyHeader};
use crate::oracle::reading::{generate_reading, prepare_reading, ReadingRequest, ReadingResponse};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Reading parameters. Built from raw pairs so a repeated key never rejects
/// the request: the first occurrence wins, and `product` is read as `category`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct OracleQuery {
    pub category: Option<String>,
    pub tier: Option<String>,
    pub q: Option<String>,
}

impl OracleQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = OracleQuery::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "category" | "product" => &mut query.category,
                "tier" => &mut query.tier,
                "q" => &mut query.q,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CategorySearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub categories: Vec<&'static Category>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/oracle?category=&tier=&q=
///
/// Runs one reading. Unknown categories resolve to the default oracle and
/// unknown tiers to free, so only generation failures produce an error.
pub async fn handle_oracle(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ReadingResponse>, AppError> {
    let params = OracleQuery::from_pairs(pairs);
    let input = ReadingRequest {
        category: params
            .category
            .unwrap_or_else(|| catalog::DEFAULT_SLUG.to_string()),
        tier: params.tier.unwrap_or_default(),
        query: params.q.unwrap_or_default(),
    };
    let today = Utc::now().date_naive();

    let prepared = {
        let mut rng = rand::thread_rng();
        prepare_reading(&input, today, &mut rng)?
    };

    let response = generate_reading(state.generator.as_ref(), prepared).await?;
    Ok(Json(response))
}

/// GET /api/v1/categories?q=
pub async fn handle_list_categories(
    Query(params): Query<CategorySearchQuery>,
) -> Json<CategoryListResponse> {
    let filter = params.q.unwrap_or_default();
    Json(CategoryListResponse {
        categories: catalog::search(&filter),
    })
}

/// GET /api/v1/categories/:slug
///
/// Strict lookup for category pages: unknown slugs are a 404 here.
pub async fn handle_get_category(
    Path(slug): Path<String>,
) -> Result<Json<&'static Category>, AppError> {
    catalog::find(&slug)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Category '{slug}' not found")))
}

/// GET /api/v1/today
pub async fn handle_today() -> Json<DailyHeader> {
    Json(daily_header(Utc::now().date_naive()))
}
