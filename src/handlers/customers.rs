use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::customer::{Customer, CustomerSummary};
use crate::errors::AppError;
use crate::handlers::orders::OrderResponse;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerResponse {
    pub customer_id: i32,
    pub name: String,
    pub phone: String,
    pub address: Option<String>,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        CustomerResponse {
            customer_id: c.id,
            name: c.name,
            phone: c.phone,
            address: c.address,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummaryResponse {
    #[serde(flatten)]
    pub customer: CustomerResponse,
    pub order_count: usize,
    pub total_spent: String,
}

impl From<CustomerSummary> for CustomerSummaryResponse {
    fn from(s: CustomerSummary) -> Self {
        CustomerSummaryResponse {
            customer: s.customer.into(),
            order_count: s.order_count,
            total_spent: s.total_spent.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetailResponse {
    #[serde(flatten)]
    pub customer: CustomerResponse,
    pub orders: Vec<OrderResponse>,
    pub total_spent: String,
    pub last_order: Option<String>,
}

/// GET /api/customers
#[utoipa::path(
    get,
    path = "/api/customers",
    responses(
        (status = 200, description = "Customers with order counts", body = [CustomerSummaryResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "customers"
)]
pub async fn list_customers(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let customers = web::block(move || state.history.list_customers()).await??;

    let body: Vec<CustomerSummaryResponse> = customers
        .into_iter()
        .map(CustomerSummaryResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/customers/{id}
///
/// Returns the customer, their orders newest first, the sum of all order
/// totals and the time of the latest order.
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    params(
        ("id" = i32, Path, description = "Customer id"),
    ),
    responses(
        (status = 200, description = "Customer found", body = CustomerDetailResponse),
        (status = 404, description = "Customer not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "customers"
)]
pub async fn get_customer(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();

    let detail = web::block(move || state.history.customer_detail(customer_id)).await??;

    let name = detail.customer.name.clone();
    Ok(HttpResponse::Ok().json(CustomerDetailResponse {
        customer: detail.customer.into(),
        orders: detail
            .orders
            .into_iter()
            .map(|o| OrderResponse::new(o, Some(name.clone())))
            .collect(),
        total_spent: detail.total_spent.to_string(),
        last_order: detail.last_order.map(|t| t.to_rfc3339()),
    }))
}
