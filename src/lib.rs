pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod validation;

use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::order_service::OrderService;
use domain::ports::OrderRepository;
use validation::PageRules;

pub use config::Config;
pub use db::{create_pool, RedisPool};
pub use infrastructure::order_repo::RedisOrderRepository;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::update_order,
        handlers::orders::change_status,
        handlers::orders::delete_order,
    ),
    components(schemas(
        handlers::orders::CreateOrderRequest,
        handlers::orders::UpdateOrderRequest,
        handlers::orders::ChangeStatusRequest,
        handlers::orders::LineItemRequest,
        handlers::orders::OrderResponse,
        handlers::orders::LineItemResponse,
        handlers::orders::ListOrdersResponse,
        handlers::orders::PaginationResponse,
    )),
    tags((name = "orders", description = "Order storage API"))
)]
pub struct ApiDoc;

/// Mount the `/orders` routes for a service backed by `R`.
pub fn configure_routes<R: OrderRepository>(cfg: &mut web::ServiceConfig) {
    use handlers::orders;

    cfg.service(
        web::scope("/orders")
            .route("", web::post().to(orders::create_order::<R>))
            .route("", web::get().to(orders::list_orders::<R>))
            .route("/{id}", web::get().to(orders::get_order::<R>))
            .route("/{id}", web::put().to(orders::update_order::<R>))
            .route("/{id}", web::delete().to(orders::delete_order::<R>))
            .route("/{id}/status", web::patch().to(orders::change_status::<R>)),
    );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server<R: OrderRepository>(
    repo: R,
    page_rules: PageRules,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let service = web::Data::new(OrderService::new(repo));
    let page_rules = web::Data::new(page_rules);

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .app_data(page_rules.clone())
            .wrap(Logger::default())
            .configure(configure_routes::<R>)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
