use actix_web::{App, HttpServer, web};

use agora_market::db::establish_connection_pool;
use agora_market::models::config::{OfferPolicy, Settings};
use agora_market::routes::api::{
    api_v1_catalog_suggest, api_v1_record_feedback, api_v1_submit_product,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let settings = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::default())
        .build()
        .and_then(|c| c.try_deserialize::<Settings>())
        .map_err(|e| std::io::Error::other(format!("Failed to load configuration: {e}")))?;

    let pool = establish_connection_pool(&settings.database_url)
        .map_err(|e| std::io::Error::other(format!("Failed to create database pool: {e}")))?;

    let policy = OfferPolicy {
        auto_approve: settings.auto_approve_offers,
    };

    log::info!(
        "Starting server at {}:{}",
        settings.server_address,
        settings.server_port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(policy))
            .service(api_v1_catalog_suggest)
            .service(api_v1_submit_product)
            .service(api_v1_record_feedback)
    })
    .bind((settings.server_address.as_str(), settings.server_port))?
    .run()
    .await
}
