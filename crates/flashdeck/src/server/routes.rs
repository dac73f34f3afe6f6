//! HTTP routes.
//!
//! | Method | Path              | Success                  |
//! |--------|-------------------|--------------------------|
//! | GET    | `/decks`          | 200 `{data: [Deck]}`     |
//! | POST   | `/decks`          | 201 `{data: Deck}`       |
//! | GET    | `/decks/:deck_id` | 200 `{data: Deck}`       |
//! | DELETE | `/decks/:deck_id` | 204                      |
//! | GET    | `/cards`          | 200 `{data: [Card]}`     |
//! | POST   | `/cards`          | 201 `{data: Card}`       |
//! | GET    | `/cards/:card_id` | 200 `{data: Card}`       |
//! | DELETE | `/cards/:card_id` | 204                      |
//! | GET    | `/health`         | 200 `{status, decks, cards}` |
//!
//! Failures are rendered by [`Error`]'s `IntoResponse` implementation as
//! `{error: message}`. A known path requested with an unlisted method is
//! answered the same way as an unknown path.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{OriginalUri, Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::model::{Card, CardPayload, Deck, DeckPayload, Envelope};
use crate::service::{CardService, DeckService};
use crate::store::{Store, StoreStats};

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    store: Arc<Store>,
    decks: DeckService,
    cards: CardService,
}

impl AppState {
    /// Build both services over one shared store.
    #[must_use]
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            decks: DeckService::new(Arc::clone(&store)),
            cards: CardService::new(Arc::clone(&store)),
            store,
        }
    }
}

/// The `{data: ...}` response wrapper.
#[derive(Debug, Serialize)]
pub struct Data<T> {
    /// The wrapped payload.
    pub data: T,
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    #[serde(flatten)]
    stats: StoreStats,
}

/// Build the application router.
///
/// Each path's method fallback is [`route_not_found`], so `PUT /decks`
/// gets the same 404 as `GET /nowhere`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/decks",
            get(list_decks).post(create_deck).fallback(route_not_found),
        )
        .route(
            "/decks/:deck_id",
            get(read_deck).delete(destroy_deck).fallback(route_not_found),
        )
        .route(
            "/cards",
            get(list_cards).post(create_card).fallback(route_not_found),
        )
        .route(
            "/cards/:card_id",
            get(read_card).delete(destroy_card).fallback(route_not_found),
        )
        .route("/health", get(health).fallback(route_not_found))
        .fallback(route_not_found)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn list_decks(State(state): State<AppState>) -> Result<Json<Data<Vec<Deck>>>> {
    let data = state.decks.list()?;
    Ok(Json(Data { data }))
}

async fn create_deck(
    State(state): State<AppState>,
    body: Envelope<DeckPayload>,
) -> Result<(StatusCode, Json<Data<Deck>>)> {
    let data = state.decks.create(body)?;
    Ok((StatusCode::CREATED, Json(Data { data })))
}

async fn read_deck(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
) -> Result<Json<Data<Deck>>> {
    let data = state.decks.read(&deck_id)?;
    Ok(Json(Data { data }))
}

async fn destroy_deck(
    State(state): State<AppState>,
    Path(deck_id): Path<String>,
) -> Result<StatusCode> {
    state.decks.destroy(&deck_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_cards(State(state): State<AppState>) -> Result<Json<Data<Vec<Card>>>> {
    let data = state.cards.list()?;
    Ok(Json(Data { data }))
}

async fn create_card(
    State(state): State<AppState>,
    body: Envelope<CardPayload>,
) -> Result<(StatusCode, Json<Data<Card>>)> {
    let data = state.cards.create(body)?;
    Ok((StatusCode::CREATED, Json(Data { data })))
}

async fn read_card(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
) -> Result<Json<Data<Card>>> {
    let data = state.cards.read(&card_id)?;
    Ok(Json(Data { data }))
}

async fn destroy_card(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
) -> Result<StatusCode> {
    state.cards.destroy(&card_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn health(State(state): State<AppState>) -> Result<Json<Health>> {
    Ok(Json(Health {
        status: "ok",
        stats: state.store.stats()?,
    }))
}

async fn route_not_found(OriginalUri(uri): OriginalUri) -> Error {
    let path = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string);
    Error::RouteNotFound { path }
}

/// Log one line per request, in the spirit of a common-log access log.
async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let started = Instant::now();

    let response = next.run(req).await;

    info!(
        target: "flashdeck::access",
        method = %method,
        uri = %uri,
        status = response.status().as_u16(),
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "request"
    );
    response
}
