use std::borrow::Cow;

use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::application::order_service::OrderService;
use crate::domain::order::{LineItem, Order, OrderId, OrderStatus};
use crate::domain::pagination::Pagination;
use crate::domain::ports::OrderRepository;
use crate::errors::AppError;
use crate::validation::PageRules;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LineItemRequest {
    pub item_id: Uuid,
    #[validate(range(max = 1000, message = "quantity must be between 0 and 1000"))]
    pub quantity: u64,
    #[validate(range(max = 1_000_000, message = "price must be between 0 and 1000000"))]
    pub price: u64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(custom(function = "validate_not_nil"))]
    pub customer_id: Uuid,
    #[validate(length(min = 1, message = "at least one line item is required"), nested)]
    pub line_items: Vec<LineItemRequest>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderRequest {
    #[validate(length(min = 1, message = "at least one line item is required"), nested)]
    pub line_items: Vec<LineItemRequest>,
}

fn validate_not_nil(id: &Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(ValidationError::new("required")
            .with_message(Cow::Borrowed("customer_id must not be the nil UUID")));
    }
    Ok(())
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeStatusRequest {
    /// One of `shipped`, `completed`, `cancelled`.
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LineItemResponse {
    pub item_id: Uuid,
    pub quantity: u64,
    pub price: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub order_id: u64,
    pub customer_id: Uuid,
    pub line_items: Vec<LineItemResponse>,
    pub created_at: Option<DateTime<Utc>>,
    pub shipped_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            order_id: o.order_id,
            customer_id: o.customer_id,
            line_items: o
                .line_items
                .into_iter()
                .map(|l| LineItemResponse {
                    item_id: l.item_id,
                    quantity: l.quantity,
                    price: l.price,
                })
                .collect(),
            created_at: o.created_at,
            shipped_at: o.shipped_at,
            completed_at: o.completed_at,
            cancelled_at: o.cancelled_at,
        }
    }
}

fn into_line_items(items: Vec<LineItemRequest>) -> Vec<LineItem> {
    items
        .into_iter()
        .map(|l| LineItem {
            item_id: l.item_id,
            quantity: l.quantity,
            price: l.price,
        })
        .collect()
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListOrdersParams {
    /// Number of items per page. Defaults to 10.
    pub limit: Option<u64>,
    /// Number of orders to skip, in ascending id order. Defaults to 0.
    pub offset: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginationResponse {
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
    pub page: u64,
    pub total_pages: u64,
}

impl From<Pagination> for PaginationResponse {
    fn from(p: Pagination) -> Self {
        Self {
            total: p.total,
            limit: p.limit,
            offset: p.offset,
            page: p.page,
            total_pages: p.total_pages,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListOrdersResponse {
    pub items: Vec<OrderResponse>,
    pub meta: PaginationResponse,
}

fn parse_id(raw: &str) -> Result<OrderId, AppError> {
    raw.parse()
        .map_err(|e| AppError::BadRequest(format!("invalid id parameter: {e}")))
}

fn blocking_failed(e: actix_web::error::BlockingError) -> AppError {
    AppError::Internal(e.to_string())
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Creates an order with a server-generated id and creation timestamp.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created successfully", body = OrderResponse),
        (status = 400, description = "Invalid request body"),
        (status = 409, description = "Generated id collided with an existing order"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order<R: OrderRepository>(
    service: web::Data<OrderService<R>>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    body.validate()?;

    let customer_id = body.customer_id;
    let line_items = into_line_items(body.line_items);
    let order = web::block(move || service.create_order(customer_id, line_items))
        .await
        .map_err(blocking_failed)??;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = u64, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order<R: OrderRepository>(
    service: web::Data<OrderService<R>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path)?;

    let order = web::block(move || service.get_order(id))
        .await
        .map_err(blocking_failed)??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// GET /orders
///
/// Returns a page of orders in ascending id order.
#[utoipa::path(
    get,
    path = "/orders",
    params(ListOrdersParams),
    responses(
        (status = 200, description = "Paginated list of orders", body = ListOrdersResponse),
        (status = 400, description = "Limit out of range"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders<R: OrderRepository>(
    service: web::Data<OrderService<R>>,
    rules: web::Data<PageRules>,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let page = rules.resolve(params.limit, params.offset)?;

    let result = web::block(move || service.list_orders(page))
        .await
        .map_err(blocking_failed)??;

    Ok(HttpResponse::Ok().json(ListOrdersResponse {
        items: result.orders.into_iter().map(OrderResponse::from).collect(),
        meta: result.pagination.into(),
    }))
}

/// PUT /orders/{id}
///
/// Replaces the line items of an existing order.
#[utoipa::path(
    put,
    path = "/orders/{id}",
    params(
        ("id" = u64, Path, description = "Order id"),
    ),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn update_order<R: OrderRepository>(
    service: web::Data<OrderService<R>>,
    path: web::Path<String>,
    body: web::Json<UpdateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path)?;
    let body = body.into_inner();
    body.validate()?;

    let line_items = into_line_items(body.line_items);
    let order = web::block(move || service.update_line_items(id, line_items))
        .await
        .map_err(blocking_failed)??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// PATCH /orders/{id}/status
#[utoipa::path(
    patch,
    path = "/orders/{id}/status",
    params(
        ("id" = u64, Path, description = "Order id"),
    ),
    request_body = ChangeStatusRequest,
    responses(
        (status = 200, description = "Status applied", body = OrderResponse),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Order not found"),
        (status = 422, description = "Transition not allowed from the current state"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn change_status<R: OrderRepository>(
    service: web::Data<OrderService<R>>,
    path: web::Path<String>,
    body: web::Json<ChangeStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path)?;
    let status: OrderStatus = body.status.parse()?;

    let order = web::block(move || service.change_status(id, status))
        .await
        .map_err(blocking_failed)??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// DELETE /orders/{id}
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(
        ("id" = u64, Path, description = "Order id"),
    ),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn delete_order<R: OrderRepository>(
    service: web::Data<OrderService<R>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path)?;

    web::block(move || service.delete_order(id))
        .await
        .map_err(blocking_failed)??;

    Ok(HttpResponse::NoContent().finish())
}
