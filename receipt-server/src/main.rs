#[macro_use]
extern crate tracing;
extern crate serde_json;

use std::error::Error;
use std::path::PathBuf;

use actix_web::error::JsonPayloadError;
use actix_web::web::Data;
use actix_web::{web, App};
use actix_web::{HttpResponse, HttpServer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;

use receipt_lib::config::Config;
use receipt_lib::identity::IdentityRequired;
use receipt_lib::{catalog, receipt, report, user};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let subscriber = registry::Registry::default()
        .with(LevelFilter::INFO)
        .with(tracing_subscriber::fmt::Layer::default());
    tracing::subscriber::set_global_default(subscriber).expect("set up subscriber");
    info!("tracing initialized");

    let config = match get_config_file() {
        Some(config_path) => Config::from_file(config_path)?,
        None => Config::from_env()?,
    };

    let (user_repo, catalog_repo, receipt_repo, report_repo) =
        receipt_repo::sqlx_repo::create_repos(config.database_url, config.max_pool_size).await?;
    info!("database pool initialized");

    let server = HttpServer::new(move || {
        App::new()
            .app_data(Data::new(user_repo.clone()))
            .app_data(Data::new(catalog_repo.clone()))
            .app_data(Data::new(receipt_repo.clone()))
            .app_data(Data::new(report_repo.clone()))
            .wrap(receipt_lib::tracing::create_middleware())
            .service(receipt::receipt_service().wrap(IdentityRequired))
            .service(catalog::category_service().wrap(IdentityRequired))
            .service(catalog::vendor_service().wrap(IdentityRequired))
            .service(catalog::payment_method_service().wrap(IdentityRequired))
            .service(catalog::tag_service().wrap(IdentityRequired))
            .service(report::report_service().wrap(IdentityRequired))
            .service(user::user_service().wrap(IdentityRequired))
            .service(user::auth_service(config.signups_enabled))
            .app_data(web::JsonConfig::default().error_handler(|err, req| {
                error!(req_path = req.path(), %err);
                match err {
                    JsonPayloadError::Deserialize(deserialize_err) => {
                        let error_body = serde_json::json!({
                            "error": "Unable to parse JSON payload",
                            "detail": format!("{}", deserialize_err),
                        });
                        actix_web::error::InternalError::from_response(
                            deserialize_err,
                            HttpResponse::BadRequest()
                                .content_type("application/json")
                                .body(error_body.to_string()),
                        )
                        .into()
                    }
                    _ => err.into(),
                }
            }))
    });
    server.bind("0.0.0.0:8000")?.run().await?;

    Ok(())
}

fn get_config_file() -> Option<PathBuf> {
    let config_current_dir = PathBuf::from("config.toml");
    if config_current_dir.exists() {
        return Some(config_current_dir);
    }
    if let Ok(config_env) = std::env::var("CONFIGURATION_DIRECTORY") {
        let config_path = PathBuf::from(config_env).join("config.toml");
        if config_path.exists() {
            return Some(config_path);
        }
    }

    None
}
