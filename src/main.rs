use dotenvy::dotenv;
use orders_api::validation::PageRules;
use orders_api::{build_server, create_pool, Config, RedisOrderRepository};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(std::io::Error::other)?;
    let pool = create_pool(
        &config.redis_url,
        config.redis_pool_size,
        config.redis_timeout,
    )
    .map_err(std::io::Error::other)?;

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(
        RedisOrderRepository::new(pool),
        PageRules::from_config(&config),
        &config.host,
        config.port,
    )?
    .await
}
