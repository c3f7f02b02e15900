//! Book HTTP Routes
//!
//! CRUD, listing and counting for books. Every route here sits behind the
//! shared API key guard; the guard runs before any database connection is opened.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, Request, State,
    },
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::auth::{ApiKeyGuard, API_KEY_HEADER};
use crate::books::{
    Book, BookId, BookRepository, CreateBookRequest, ListBooksParams, SqliteBookRepository,
    UpdateBookRequest,
};
use crate::db::Database;

use super::errors::{ApiError, ApiResult};

// ==================
// Shared State
// ==================

/// Book state shared across handlers
pub struct BookState {
    pub db: Database,
    pub guard: ApiKeyGuard,
}

impl BookState {
    pub fn new(db: Database, guard: ApiKeyGuard) -> Self {
        Self { db, guard }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub total_books: u64,
}

// ==================
// Book Routes
// ==================

/// Create book routes
pub fn book_routes(state: Arc<BookState>) -> Router {
    Router::new()
        .route("/books", get(list_books_handler).post(create_book_handler))
        .route("/books/", get(list_books_handler).post(create_book_handler))
        .route("/books/stats/count", get(count_books_handler))
        .route(
            "/books/:id",
            get(get_book_handler)
                .put(update_book_handler)
                .delete(delete_book_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ))
        .with_state(state)
}

/// Reject requests whose `X-API-Key` header does not match the configured secret
async fn require_api_key(
    State(state): State<Arc<BookState>>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    state.guard.verify(presented)?;

    Ok(next.run(request).await)
}

fn book_id(path: Result<Path<BookId>, PathRejection>) -> ApiResult<BookId> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ApiError::InvalidPathParam(rejection.body_text()))
}

// ==================
// Handlers
// ==================

async fn create_book_handler(
    State(state): State<Arc<BookState>>,
    payload: Result<Json<CreateBookRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Book>)> {
    let Json(request) = payload.map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;
    let new_book = request.validate()?;

    let book = state
        .db
        .with_session(move |conn| SqliteBookRepository::new(conn).create_book(&new_book))
        .await?;

    Ok((StatusCode::CREATED, Json(book)))
}

async fn list_books_handler(
    State(state): State<Arc<BookState>>,
    params: Result<Query<ListBooksParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Book>>> {
    let Query(params) =
        params.map_err(|rejection| ApiError::InvalidQueryParam(rejection.body_text()))?;
    let query = params.validate()?;

    let books = state
        .db
        .with_session(move |conn| SqliteBookRepository::new(conn).list_books(&query))
        .await?;

    Ok(Json(books))
}

async fn get_book_handler(
    State(state): State<Arc<BookState>>,
    path: Result<Path<BookId>, PathRejection>,
) -> ApiResult<Json<Book>> {
    let id = book_id(path)?;

    let book = state
        .db
        .with_session(move |conn| SqliteBookRepository::new(conn).get_book(id))
        .await?
        .ok_or(ApiError::NotFound(id))?;

    Ok(Json(book))
}

async fn update_book_handler(
    State(state): State<Arc<BookState>>,
    path: Result<Path<BookId>, PathRejection>,
    payload: Result<Json<UpdateBookRequest>, JsonRejection>,
) -> ApiResult<Json<Book>> {
    let id = book_id(path)?;
    let Json(request) = payload.map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;
    let changes = request.validate()?;

    let book = state
        .db
        .with_session(move |conn| SqliteBookRepository::new(conn).update_book(id, &changes))
        .await?;

    Ok(Json(book))
}

async fn delete_book_handler(
    State(state): State<Arc<BookState>>,
    path: Result<Path<BookId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = book_id(path)?;

    state
        .db
        .with_session(move |conn| SqliteBookRepository::new(conn).delete_book(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn count_books_handler(
    State(state): State<Arc<BookState>>,
) -> ApiResult<Json<CountResponse>> {
    let total_books = state
        .db
        .with_session(|conn| SqliteBookRepository::new(conn).count_books())
        .await?;

    Ok(Json(CountResponse { total_books }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_response_shape() {
        let json = serde_json::to_value(CountResponse { total_books: 2 }).unwrap();
        assert_eq!(json, serde_json::json!({"total_books": 2}));
    }

    #[test]
    fn test_router_builds() {
        let state = Arc::new(BookState::new(
            Database::at_path("unused.db"),
            ApiKeyGuard::default(),
        ));
        let _router = book_routes(state);
    }
}
