use actix_web::{http::header, web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::order_service::{
    CreateOrderCommand, CreateOrderItemCommand, OrderReadDto, OrderService,
};
use crate::domain::ports::OrderRepository;
use crate::errors::AppError;

/// The service as shared with handlers, independent of the storage backend.
pub type DynOrderService = OrderService<Box<dyn OrderRepository>>;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderItemRequest {
    pub item_id: String,
    pub quantity: u32,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub unit_price: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub order_items: Vec<CreateOrderItemRequest>,
}

impl TryFrom<CreateOrderRequest> for CreateOrderCommand {
    type Error = AppError;

    fn try_from(body: CreateOrderRequest) -> Result<Self, Self::Error> {
        let order_items = body
            .order_items
            .into_iter()
            .map(|i| {
                let unit_price = BigDecimal::from_str(&i.unit_price).map_err(|e| {
                    AppError::BadRequest(format!("Invalid unit_price '{}': {}", i.unit_price, e))
                })?;
                Ok(CreateOrderItemCommand {
                    item_id: i.item_id,
                    quantity: i.quantity,
                    unit_price,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(CreateOrderCommand {
            customer_id: body.customer_id,
            order_items,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub item_id: String,
    pub quantity: u32,
    pub unit_price: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer_id: String,
    /// Calendar date of the order, e.g. "2024-05-06"
    pub order_date: String,
    pub order_items: Vec<OrderItemResponse>,
}

impl From<OrderReadDto> for OrderResponse {
    fn from(dto: OrderReadDto) -> Self {
        Self {
            id: dto.id,
            customer_id: dto.customer_id,
            order_date: dto.order_date,
            order_items: dto
                .order_items
                .into_iter()
                .map(|i| OrderItemResponse {
                    id: i.id,
                    item_id: i.item_id,
                    quantity: i.quantity,
                    unit_price: i.unit_price.to_string(),
                })
                .collect(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Creates an order with its items. The header and all item rows are written
/// in one transaction. The new order's URL is returned in `Location`.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", headers(("Location" = String, description = "URL of the new order"))),
        (status = 400, description = "Malformed request"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<DynOrderService>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let command = CreateOrderCommand::try_from(body.into_inner())?;

    let order_id = web::block(move || service.create_order(command))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/orders/{}", order_id)))
        .finish())
}

/// GET /orders/{id}
///
/// Returns the order together with its items.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<DynOrderService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let order = web::block(move || service.get_order(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}
