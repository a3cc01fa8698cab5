use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::checkout::{Checkout, CheckoutDraft, PaymentOutcome};
use crate::domain::customer::CustomerInfo;
use crate::domain::order::{
    parse_total, OrderLineInput, OrderListEntry, OrderType, OrderView, PaymentMode, SubmitOrder,
};
use crate::domain::payment::CardDetails;
use crate::domain::submission::PartialSubmission;
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CustomerRequest {
    pub name: String,
    /// May be empty for dine-in guests.
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
}

impl From<CustomerRequest> for CustomerInfo {
    fn from(c: CustomerRequest) -> Self {
        CustomerInfo {
            name: c.name,
            phone: c.phone,
            address: c.address.filter(|a| !a.is_empty()),
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct CardRequest {
    #[serde(default)]
    pub card_id: Option<String>,
    #[serde(default)]
    pub card_holder_name: String,
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub card_expiry: String,
}

impl From<CardRequest> for CardDetails {
    fn from(c: CardRequest) -> Self {
        CardDetails {
            card_id: c.card_id,
            card_holder_name: c.card_holder_name,
            card_number: c.card_number,
            card_expiry: c.card_expiry,
        }
    }
}

/// Cart line as sent by the till. Any `name` / `price` fields are ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CartLineRequest {
    pub item_id: i32,
    pub quantity: i32,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderRequest {
    pub customer: CustomerRequest,
    pub order_type: OrderType,
    pub payment_mode: PaymentMode,
    /// Tax-inclusive total as a decimal string, e.g. "28.82"
    pub total: String,
    #[serde(default)]
    pub created_by: String,
    pub cart: Vec<CartLineRequest>,
    /// When present with `paymentMode = card`, the number must be 16 digits
    /// or no order is created.
    #[serde(default)]
    pub card: Option<CardRequest>,
}

impl SubmitOrderRequest {
    fn into_domain(self) -> Result<SubmitOrder, AppError> {
        Ok(SubmitOrder {
            total: parse_total(&self.total)?,
            customer: self.customer.into(),
            order_type: self.order_type,
            payment_mode: self.payment_mode,
            created_by: self.created_by,
            cart: self
                .cart
                .iter()
                .map(|l| OrderLineInput {
                    item_id: l.item_id,
                    quantity: l.quantity,
                })
                .collect(),
            card: self.card.map(CardDetails::from),
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderResponse {
    pub message: String,
    pub order_id: i32,
    pub submission_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub order_id: i32,
    pub customer_id: i32,
    pub customer_name: Option<String>,
    pub order_type: OrderType,
    pub payment_mode: PaymentMode,
    pub total_price: String,
    pub order_date_time: String,
    pub created_by_user: String,
}

impl OrderResponse {
    pub fn new(order: OrderView, customer_name: Option<String>) -> Self {
        OrderResponse {
            order_id: order.id,
            customer_id: order.customer_id,
            customer_name,
            order_type: order.order_type,
            payment_mode: order.payment_mode,
            total_price: order.total_price.to_string(),
            order_date_time: order.created_at.to_rfc3339(),
            created_by_user: order.created_by,
        }
    }
}

impl From<OrderListEntry> for OrderResponse {
    fn from(entry: OrderListEntry) -> Self {
        OrderResponse::new(entry.order, entry.customer_name)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub item_id: i32,
    pub name: Option<String>,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub items: Vec<OrderItemResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartialSubmissionResponse {
    pub submission_id: Uuid,
    pub started_at: String,
    pub last_step: String,
    pub customer_id: Option<i32>,
    pub order_id: Option<i32>,
    pub expected_items: Option<i32>,
    pub inserted_items: i32,
}

impl From<PartialSubmission> for PartialSubmissionResponse {
    fn from(p: PartialSubmission) -> Self {
        PartialSubmissionResponse {
            submission_id: p.submission_id,
            started_at: p.started_at.to_rfc3339(),
            last_step: p.last_step.to_string(),
            customer_id: p.customer_id,
            order_id: p.order_id,
            expected_items: p.expected_items,
            inserted_items: p.inserted_items,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutLineRequest {
    pub item_id: i32,
    pub quantity: u32,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub customer: CustomerRequest,
    #[serde(default)]
    pub order_type: Option<OrderType>,
    #[serde(default)]
    pub payment_mode: Option<PaymentMode>,
    #[serde(default)]
    pub created_by: String,
    pub cart: Vec<CheckoutLineRequest>,
    #[serde(default)]
    pub card: Option<CardRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOutcomeResponse {
    /// `not_applicable`, `recorded` or `failed`
    pub status: String,
    pub payment_id: Option<i32>,
    pub message: Option<String>,
}

impl From<PaymentOutcome> for PaymentOutcomeResponse {
    fn from(outcome: PaymentOutcome) -> Self {
        match outcome {
            PaymentOutcome::NotApplicable => PaymentOutcomeResponse {
                status: "not_applicable".to_string(),
                payment_id: None,
                message: None,
            },
            PaymentOutcome::Recorded { payment_id } => PaymentOutcomeResponse {
                status: "recorded".to_string(),
                payment_id: Some(payment_id),
                message: None,
            },
            PaymentOutcome::Failed { message } => PaymentOutcomeResponse {
                status: "failed".to_string(),
                payment_id: None,
                message: Some(message),
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order_id: i32,
    pub submission_id: Uuid,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    pub payment: PaymentOutcomeResponse,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/orders
///
/// Resolves the customer, inserts the order header with the caller's total
/// and one row per cart line. Each insert is its own commit; progress is
/// written to the submission log.
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = SubmitOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = SubmitOrderResponse),
        (status = 400, description = "Validation failed"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn submit_order(
    state: web::Data<AppState>,
    body: web::Json<SubmitOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner().into_domain()?;

    let submitted = web::block(move || state.orders.submit(&request)).await??;

    Ok(HttpResponse::Created().json(SubmitOrderResponse {
        message: "Order placed successfully".to_string(),
        order_id: submitted.order_id,
        submission_id: submitted.submission_id,
    }))
}

/// GET /api/orders
///
/// Every order with the customer's name, newest first.
#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "All orders", body = [OrderResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let orders = web::block(move || state.history.list_orders()).await??;

    let body: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/orders/{id}
///
/// Returns the order together with its line items.
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = i32, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderDetailResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let detail = web::block(move || state.history.order_detail(order_id)).await??;

    Ok(HttpResponse::Ok().json(OrderDetailResponse {
        order: OrderResponse::new(detail.order, detail.customer_name),
        items: detail
            .items
            .into_iter()
            .map(|i| OrderItemResponse {
                item_id: i.item_id,
                name: i.name,
                quantity: i.quantity,
            })
            .collect(),
    }))
}

/// GET /api/submissions/incomplete
///
/// Order submissions that stopped before every step was committed.
#[utoipa::path(
    get,
    path = "/api/submissions/incomplete",
    responses(
        (status = 200, description = "Partially written submissions", body = [PartialSubmissionResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn incomplete_submissions(
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let pending = web::block(move || state.orders.incomplete_submissions()).await??;

    let body: Vec<PartialSubmissionResponse> = pending
        .into_iter()
        .map(PartialSubmissionResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/checkout
///
/// Prices the cart from the menu, places the order and, for card payments,
/// records the payment. A failed payment record is reported in the body; the
/// order is kept.
#[utoipa::path(
    post,
    path = "/api/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Order placed", body = CheckoutResponse),
        (status = 400, description = "Validation failed"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn checkout(
    state: web::Data<AppState>,
    body: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let receipt = web::block(move || {
        let lines: Vec<(i32, u32)> = body.cart.iter().map(|l| (l.item_id, l.quantity)).collect();
        let cart = Checkout::cart_from_menu(&state.menu, &lines)?;
        state.checkout.submit(&CheckoutDraft {
            customer: body.customer.into(),
            order_type: body.order_type,
            payment_mode: body.payment_mode,
            created_by: body.created_by,
            cart,
            card: body.card.map(CardDetails::from),
        })
    })
    .await??;

    Ok(HttpResponse::Created().json(CheckoutResponse {
        order_id: receipt.order_id,
        submission_id: receipt.submission_id,
        subtotal: receipt.totals.subtotal.to_string(),
        tax: receipt.totals.tax.to_string(),
        total: receipt.totals.total.to_string(),
        payment: receipt.payment.into(),
    }))
}
