use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::payment::{CardDetails, PaymentRecord};
use crate::errors::AppError;
use crate::handlers::orders::CardRequest;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentCustomerRequest {
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Deserialize, ToSchema)]
pub struct RecordPaymentRequest {
    pub customer: PaymentCustomerRequest,
    pub card: CardRequest,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub message: String,
    pub payment_id: i32,
}

/// Stored card record. Only the last four digits are ever kept.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentRecordResponse {
    pub payment_id: i32,
    pub customer_id: i32,
    pub card_id: String,
    pub card_holder_name: String,
    pub card_last4: String,
    pub card_expiry: String,
    pub recorded_at: String,
}

impl From<PaymentRecord> for PaymentRecordResponse {
    fn from(p: PaymentRecord) -> Self {
        PaymentRecordResponse {
            payment_id: p.id,
            customer_id: p.customer_id,
            card_id: p.card_id,
            card_holder_name: p.card_holder_name,
            card_last4: p.card_last4,
            card_expiry: p.card_expiry,
            recorded_at: p.recorded_at.to_rfc3339(),
        }
    }
}

/// POST /api/payment
///
/// Records a masked card payment for an existing customer. The customer is
/// looked up by exact name and phone and is never created here.
#[utoipa::path(
    post,
    path = "/api/payment",
    request_body = RecordPaymentRequest,
    responses(
        (status = 201, description = "Payment recorded", body = PaymentResponse),
        (status = 400, description = "Card number must be exactly 16 digits"),
        (status = 404, description = "Customer not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "payments"
)]
pub async fn record_payment(
    state: web::Data<AppState>,
    body: web::Json<RecordPaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let card = CardDetails::from(body.card);

    let payment_id = web::block(move || {
        state
            .payments
            .record(&body.customer.name, &body.customer.phone, &card)
    })
    .await??;

    Ok(HttpResponse::Created().json(PaymentResponse {
        message: "Payment recorded".to_string(),
        payment_id,
    }))
}

/// GET /api/customers/{id}/payments
#[utoipa::path(
    get,
    path = "/api/customers/{id}/payments",
    params(
        ("id" = i32, Path, description = "Customer id"),
    ),
    responses(
        (status = 200, description = "Stored card records", body = [PaymentRecordResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "payments"
)]
pub async fn list_customer_payments(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();

    let payments = web::block(move || state.payments.payments_for(customer_id)).await??;

    let body: Vec<PaymentRecordResponse> = payments
        .into_iter()
        .map(PaymentRecordResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(body))
}
