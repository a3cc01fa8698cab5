use std::str::FromStr;

use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::menu::{Category, MenuItem, MenuItemInput};
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct MenuItemRequest {
    pub name: String,
    pub category: Category,
    /// Decimal price as a string, e.g. "12.50"
    pub price: String,
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

fn default_available() -> bool {
    true
}

impl MenuItemRequest {
    fn into_domain(self) -> Result<MenuItemInput, AppError> {
        let price = BigDecimal::from_str(self.price.trim())
            .map_err(|_| AppError::BadRequest(format!("Invalid price '{}'", self.price)))?;
        Ok(MenuItemInput {
            name: self.name,
            category: self.category,
            price,
            is_available: self.is_available,
            image_url: self.image_url.filter(|u| !u.is_empty()),
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuItemResponse {
    pub item_id: i32,
    pub name: String,
    pub category: Category,
    pub price: String,
    pub is_available: bool,
    pub image_url: Option<String>,
}

impl From<MenuItem> for MenuItemResponse {
    fn from(item: MenuItem) -> Self {
        MenuItemResponse {
            item_id: item.id,
            name: item.name,
            category: item.category,
            price: item.price.to_string(),
            is_available: item.is_available,
            image_url: item.image_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateMenuItemResponse {
    pub item_id: i32,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/menu
#[utoipa::path(
    get,
    path = "/api/menu",
    responses(
        (status = 200, description = "Every menu item", body = [MenuItemResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "menu"
)]
pub async fn list_menu(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let items = web::block(move || state.menu.list()).await??;

    let body: Vec<MenuItemResponse> = items.into_iter().map(MenuItemResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/menu/{id}
#[utoipa::path(
    get,
    path = "/api/menu/{id}",
    params(
        ("id" = i32, Path, description = "Menu item id"),
    ),
    responses(
        (status = 200, description = "Menu item found", body = MenuItemResponse),
        (status = 404, description = "Menu item not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "menu"
)]
pub async fn get_menu_item(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let item = web::block(move || state.menu.get(id)).await??;

    Ok(HttpResponse::Ok().json(MenuItemResponse::from(item)))
}

/// POST /api/menu
#[utoipa::path(
    post,
    path = "/api/menu",
    request_body = MenuItemRequest,
    responses(
        (status = 201, description = "Menu item created", body = CreateMenuItemResponse),
        (status = 400, description = "Validation failed"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "menu"
)]
pub async fn create_menu_item(
    state: web::Data<AppState>,
    body: web::Json<MenuItemRequest>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner().into_domain()?;

    let item_id = web::block(move || state.menu.create(&input)).await??;

    Ok(HttpResponse::Created().json(CreateMenuItemResponse { item_id }))
}

/// PUT or PATCH /api/menu/{id}
///
/// Both verbs replace every field of the item.
#[utoipa::path(
    put,
    path = "/api/menu/{id}",
    params(
        ("id" = i32, Path, description = "Menu item id"),
    ),
    request_body = MenuItemRequest,
    responses(
        (status = 200, description = "Menu item updated", body = MenuItemResponse),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Menu item not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "menu"
)]
pub async fn update_menu_item(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<MenuItemRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let input = body.into_inner().into_domain()?;

    let item = web::block(move || {
        state.menu.update(id, &input)?;
        state.menu.get(id)
    })
    .await??;

    Ok(HttpResponse::Ok().json(MenuItemResponse::from(item)))
}

/// DELETE /api/menu/{id}
#[utoipa::path(
    delete,
    path = "/api/menu/{id}",
    params(
        ("id" = i32, Path, description = "Menu item id"),
    ),
    responses(
        (status = 204, description = "Menu item deleted"),
        (status = 404, description = "Menu item not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "menu"
)]
pub async fn delete_menu_item(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    web::block(move || state.menu.delete(id)).await??;

    Ok(HttpResponse::NoContent().finish())
}

/// PATCH /api/menu/{id}/toggle
///
/// Flips `is_available` and returns the stored item.
#[utoipa::path(
    patch,
    path = "/api/menu/{id}/toggle",
    params(
        ("id" = i32, Path, description = "Menu item id"),
    ),
    responses(
        (status = 200, description = "Availability flipped", body = MenuItemResponse),
        (status = 404, description = "Menu item not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "menu"
)]
pub async fn toggle_availability(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let item = web::block(move || state.menu.toggle_availability(id)).await??;

    Ok(HttpResponse::Ok().json(MenuItemResponse::from(item)))
}
