//! # Rental Page Routes
//!
//! Every request re-enters the rental page: the tool segment is resolved,
//! the posted or queried selection is restored, then one operation runs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  /api/rent/{tool}/...                                                   │
//! │        │                                                                │
//! │        ▼  RawToolSegment (still percent-encoded)                        │
//! │  RentalPage::enter ──► Empty ──────────────► 404 not-found view         │
//! │        │                                                                │
//! │        ▼  Ready(controller).with_selection(restored)                    │
//! │  GET      view                                                          │
//! │  actions  dispatch(action) ──► view                                     │
//! │  cart     add_to_cart(&CartState) ──► notice + cart                     │
//! │  checkout checkout(&SandboxGateway) ──► notice                          │
//! │  outcome  settle_checkout(client outcome) ──► notice                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! axum's `Path` extractor decodes segments itself and rejects bad escapes,
//! so the tool segment is read raw from the URI and decoded by the core.

use std::convert::Infallible;
use std::future::ready;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequestParts, Query, State};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use toolrent_core::payment::PaymentOutcome;
use toolrent_core::route::RouteParams;
use toolrent_core::{
    CartNotice, CheckoutNotice, RentalAction, RentalController, RentalPage, RentalSelection,
    RentalView,
};
use tracing::{debug, info, warn};

use super::pages::NotFoundView;
use crate::error::ApiError;
use crate::state::{AppState, CartSummary};

/// Path prefix of the rental API.
pub const RENT_API_PREFIX: &str = "/api/rent/";

// =============================================================================
// Extractors & Inputs
// =============================================================================

/// The tool segment exactly as it appeared in the request URI.
#[derive(Debug, Clone)]
pub struct RawToolSegment(pub RouteParams);

impl<S> FromRequestParts<S> for RawToolSegment
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let tool_name = parts
            .uri
            .path()
            .strip_prefix(RENT_API_PREFIX)
            .and_then(|rest| rest.split('/').next())
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned);

        Ok(RawToolSegment(RouteParams { tool_name }))
    }
}

/// `?duration=24&quantity=2`. Unparseable values fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionQuery {
    pub duration: Option<String>,
    pub quantity: Option<String>,
}

impl SelectionQuery {
    fn restore(&self) -> RentalSelection {
        RentalSelection::restore(
            self.duration.as_deref(),
            self.quantity.as_deref().and_then(|q| q.trim().parse().ok()),
        )
    }
}

/// A selection posted by the page. Unknown durations and quantities below 1
/// are corrected rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionInput {
    pub duration_id: Option<String>,
    pub quantity: Option<i64>,
}

impl SelectionInput {
    fn restore(&self) -> RentalSelection {
        RentalSelection::restore(self.duration_id.as_deref(), self.quantity)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    #[serde(default)]
    pub selection: SelectionInput,
    pub action: RentalAction,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeRequest {
    #[serde(default)]
    pub selection: SelectionInput,
    pub outcome: PaymentOutcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartResponse {
    pub notice: CartNotice,
    pub cart: CartSummary,
}

// =============================================================================
// Rejection
// =============================================================================

/// Why a rental request produced no view.
#[derive(Debug)]
pub enum RentRejection {
    /// Tool could not be resolved: render the not-found page.
    NotFound,
    Api(ApiError),
}

impl From<ApiError> for RentRejection {
    fn from(err: ApiError) -> Self {
        RentRejection::Api(err)
    }
}

impl From<toolrent_core::CoreError> for RentRejection {
    fn from(err: toolrent_core::CoreError) -> Self {
        RentRejection::Api(err.into())
    }
}

impl From<JsonRejection> for RentRejection {
    fn from(rejection: JsonRejection) -> Self {
        RentRejection::Api(ApiError::validation(rejection.body_text()))
    }
}

impl IntoResponse for RentRejection {
    fn into_response(self) -> Response {
        match self {
            RentRejection::NotFound => NotFoundView.into_response(),
            RentRejection::Api(err) => err.into_response(),
        }
    }
}

type RentResult<T> = Result<Json<T>, RentRejection>;

/// The body is optional, but a body that is present must parse.
fn posted_selection(
    payload: Result<Option<Json<SelectionInput>>, JsonRejection>,
) -> Result<SelectionInput, RentRejection> {
    Ok(payload?.map(|Json(input)| input).unwrap_or_default())
}

/// Enters the rental page for the raw segment and applies `selection`.
async fn open(params: RouteParams, selection: RentalSelection) -> Result<RentalController, RentRejection> {
    let raw = params.tool_name.clone();
    match RentalPage::enter(ready(Ok::<_, Infallible>(params))).await.into_ready() {
        Ok(controller) => Ok(controller.with_selection(selection)),
        Err(reason) => {
            warn!(raw = ?raw, %reason, "Tool identifier did not resolve");
            Err(RentRejection::NotFound)
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /api/rent/{tool}`
pub async fn view(
    RawToolSegment(params): RawToolSegment,
    Query(query): Query<SelectionQuery>,
) -> RentResult<RentalView> {
    let controller = open(params, query.restore()).await?;
    debug!(
        tool = %controller.tool().name,
        duration = %controller.selection().duration_id(),
        quantity = %controller.selection().quantity(),
        "Rendering rental view"
    );
    Ok(Json(controller.view()))
}

/// `POST /api/rent/{tool}/actions`
pub async fn apply_action(
    RawToolSegment(params): RawToolSegment,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> RentResult<RentalView> {
    let Json(request) = payload?;
    let mut controller = open(params, request.selection.restore()).await?;

    debug!(tool = %controller.tool().name, action = ?request.action, "Applying rental action");
    controller.dispatch(request.action);

    Ok(Json(controller.view()))
}

/// `POST /api/rent/{tool}/cart`
pub async fn add_to_cart(
    State(state): State<AppState>,
    RawToolSegment(params): RawToolSegment,
    payload: Result<Option<Json<SelectionInput>>, JsonRejection>,
) -> RentResult<AddToCartResponse> {
    let selection = posted_selection(payload)?;
    let controller = open(params, selection.restore()).await?;

    let notice = controller.add_to_cart(&state.cart);
    info!(line_id = %notice.item.id, "{}", notice.message);

    Ok(Json(AddToCartResponse {
        notice,
        cart: state.cart.summary(),
    }))
}

/// `POST /api/rent/{tool}/checkout`
pub async fn checkout(
    State(state): State<AppState>,
    RawToolSegment(params): RawToolSegment,
    payload: Result<Option<Json<SelectionInput>>, JsonRejection>,
) -> RentResult<CheckoutNotice> {
    let selection = posted_selection(payload)?;
    let controller = open(params, selection.restore()).await?;

    let notice = controller.checkout(&state.payments).await?;
    log_checkout(&controller, &notice);

    Ok(Json(notice))
}

/// `POST /api/rent/{tool}/checkout/outcome`
pub async fn checkout_outcome(
    RawToolSegment(params): RawToolSegment,
    payload: Result<Json<OutcomeRequest>, JsonRejection>,
) -> RentResult<CheckoutNotice> {
    let Json(request) = payload?;
    let controller = open(params, request.selection.restore()).await?;

    let notice = controller.settle_checkout(request.outcome.into())?;
    log_checkout(&controller, &notice);

    Ok(Json(notice))
}

fn log_checkout(controller: &RentalController, notice: &CheckoutNotice) {
    match notice {
        CheckoutNotice::Success { payment_id, .. } => info!(
            tool = %controller.tool().name,
            %payment_id,
            total = %controller.breakdown().total,
            "Checkout succeeded"
        ),
        CheckoutNotice::Failure { failure, message } => warn!(
            tool = %controller.tool().name,
            kind = ?failure.as_ref().map(|f| f.kind),
            %message,
            "Checkout failed"
        ),
    }
}
