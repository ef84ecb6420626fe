//! Reel browser route handlers.
//!
//! The browser is a single-item-visible carousel over the listing for one
//! (category, size) pair. Position wraps modulo the listing length in both
//! directions; playback commands come from the visibility endpoint, which
//! feeds viewport intersection ratios through the tracker.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use fashion_reels_core::{Category, Size, format_amount};

use crate::cart::{CartStore, SessionCartStore, mutate};
use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::reels::playback::{PlaybackSink, VisibilityTracker};
use crate::reels::{carousel, derive_cart_line};
use crate::state::AppState;

/// Default browse entry point: the MEN / M listing.
#[instrument]
pub async fn default_browse() -> axum::response::Redirect {
    axum::response::Redirect::to("/reels/MEN/M")
}

/// Parse and normalize the category/size path segments.
fn parse_pair(category: &str, size: &str) -> Result<(Category, Size)> {
    let category = category
        .parse::<Category>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let size = Size::parse(size).map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok((category, size))
}

/// One reel as displayed in the browser.
#[derive(Debug, Clone, Serialize)]
pub struct ReelView {
    pub id: fashion_reels_core::ProductRef,
    pub video_url: String,
    pub price: String,
    /// Units in stock; 0 renders as "Out of Stock".
    pub stock: u32,
    pub out_of_stock: bool,
}

/// The carousel over one listing.
#[derive(Debug, Serialize)]
pub struct ReelBrowserView {
    pub category: Category,
    pub size: Size,
    /// Listing generation; echo this into the visibility endpoint.
    pub generation: u64,
    pub count: usize,
    pub index: usize,
    pub next_index: usize,
    pub previous_index: usize,
    pub current: ReelView,
    pub cart_count: usize,
}

/// Browse query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct BrowseParams {
    /// Requested position; wraps modulo the listing length.
    #[serde(default)]
    pub index: usize,
}

/// Browse a category+size listing at a wrapped position.
#[instrument(skip(state, session))]
pub async fn browse(
    State(state): State<AppState>,
    session: Session,
    Path((category, size)): Path<(String, String)>,
    Query(params): Query<BrowseParams>,
) -> Result<Json<serde_json::Value>> {
    let (category, size) = parse_pair(&category, &size)?;
    let listing = state.reels().listing(category, &size).await?;

    let store = SessionCartStore::new(session);
    let cart_count = store.load().await?.len();

    if listing.items.is_empty() {
        return Ok(Json(serde_json::json!({
            "category": category,
            "size": size,
            "count": 0,
            "cart_count": cart_count,
            "message": format!("No videos available for {category} - Size {size}"),
        })));
    }

    let len = listing.items.len();
    let index = carousel::wrap(params.index, len);
    let Some(item) = listing.items.get(index) else {
        return Err(AppError::Internal("carousel index out of range".to_owned()));
    };

    let view = ReelBrowserView {
        category,
        size,
        generation: listing.generation,
        count: len,
        index,
        next_index: carousel::next(index, len),
        previous_index: carousel::previous(index, len),
        current: ReelView {
            id: item.id.clone(),
            video_url: item.video_url.clone(),
            price: format_amount(item.price),
            stock: item.quantity,
            out_of_stock: item.quantity == 0,
        },
        cart_count,
    };

    Ok(Json(serde_json::to_value(view).map_err(|e| {
        AppError::Internal(format!("serialize browser view: {e}"))
    })?))
}

/// Add-to-cart body: the carousel position being viewed.
#[derive(Debug, Deserialize)]
pub struct AddToCart {
    #[serde(default)]
    pub index: usize,
}

/// Outcome of an add-to-cart attempt.
#[derive(Debug, Serialize)]
pub struct AddToCartResult {
    /// False when the reel is out of stock (the add is a no-op).
    pub added: bool,
    /// Badge count after the attempt.
    pub cart_count: usize,
}

/// Add the currently viewed reel to the cart.
///
/// A no-op when the reel's stock quantity is 0.
#[instrument(skip(state, session))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    session: Session,
    Path((category, size)): Path<(String, String)>,
    Json(body): Json<AddToCart>,
) -> Result<Json<AddToCartResult>> {
    let (category, size) = parse_pair(&category, &size)?;
    let listing = state.reels().listing(category, &size).await?;

    let store = SessionCartStore::new(session);

    if listing.items.is_empty() {
        return Err(AppError::BadRequest(format!(
            "No videos available for {category} - Size {size}"
        )));
    }

    let len = listing.items.len();
    let Some(item) = listing.items.get(carousel::wrap(body.index, len)) else {
        return Err(AppError::Internal("carousel index out of range".to_owned()));
    };

    if item.quantity == 0 {
        let cart = store.load().await?;
        return Ok(Json(AddToCartResult {
            added: false,
            cart_count: cart.len(),
        }));
    }

    let line = derive_cart_line(item, category, size);
    let cart = mutate(&store, |cart| cart.add(line)).await?;

    Ok(Json(AddToCartResult {
        added: true,
        cart_count: cart.len(),
    }))
}

/// Visibility snapshot from the client's observation mechanism.
#[derive(Debug, Deserialize)]
pub struct VisibilitySnapshot {
    /// Listing generation the ratios were measured against.
    pub generation: u64,
    /// Per-reel viewport intersection ratios.
    pub ratios: Vec<f32>,
}

/// One playback command for one reel.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PlaybackCommand {
    pub index: usize,
    /// "play" (with sound) or "pause" (muted).
    pub action: &'static str,
}

#[derive(Default)]
struct CommandCollector {
    commands: Vec<PlaybackCommand>,
}

impl PlaybackSink for CommandCollector {
    fn on_visible(&mut self, index: usize) {
        self.commands.push(PlaybackCommand {
            index,
            action: "play",
        });
    }

    fn on_hidden(&mut self, index: usize) {
        self.commands.push(PlaybackCommand {
            index,
            action: "pause",
        });
    }
}

/// Turn a visibility snapshot into playback commands.
///
/// The tracker is persisted in the session and re-subscribes whenever the
/// listing generation changes.
#[instrument(skip(session, snapshot))]
pub async fn visibility(
    session: Session,
    Path((category, size)): Path<(String, String)>,
    Json(snapshot): Json<VisibilitySnapshot>,
) -> Result<Json<serde_json::Value>> {
    parse_pair(&category, &size)?;

    let mut tracker = session
        .get::<VisibilityTracker>(session_keys::REEL_PLAYBACK)
        .await?
        .unwrap_or_else(|| VisibilityTracker::new(snapshot.generation));

    let mut sink = CommandCollector::default();
    tracker.observe(snapshot.generation, &snapshot.ratios, &mut sink);

    session
        .insert(session_keys::REEL_PLAYBACK, &tracker)
        .await?;

    Ok(Json(serde_json::json!({
        "active": tracker.active(),
        "commands": sink.commands,
    })))
}
