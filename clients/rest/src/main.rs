use actix_web::{
    middleware::{self, Condition},
    web, App, HttpServer,
};
use clap::Parser;
use database::{
    database::{database::Database, options::DatabaseOptions},
    persistence::{storage::StorageEngine, PersistenceError},
};
use std::io;

use crate::cors::{build_cors, DEFAULT_ALLOWED_ORIGINS};

mod cors;
mod error;
mod routes;

/// 📇 People REST Server, list / create / update / delete person records over JSON
///
/// Try it with `curl -X POST -H 'Content-Type: application/json' -d '{"name":"Ann","age":30}' localhost:4000/`
#[derive(Parser, Debug)]
struct Cli {
    /// Where records are stored, `memory://` or `file://<directory>`. Note: Does not support shell paths, e.g. ~
    #[clap(long, env = "DATABASE_URL", default_value = "file://data")]
    database_url: String,

    /// Port the server will run on
    #[clap(short, long, env = "PORT", default_value = "4000")]
    port: u16,

    /// Address the server will run on
    #[clap(short, long, default_value = "0.0.0.0")]
    address: String,

    /// Origin allowed to call the API, repeat for each origin
    #[clap(long = "allowed-origin", default_values = DEFAULT_ALLOWED_ORIGINS)]
    allowed_origins: Vec<String>,

    /// Logs every HTTP request
    #[clap(long)]
    log_http: bool,

    #[clap(long, default_value_t = 2)]
    http_workers: usize,
}

impl Cli {
    fn database_options(&self) -> Result<DatabaseOptions, PersistenceError> {
        let storage_engine: StorageEngine = self.database_url.parse()?;

        Ok(DatabaseOptions::default().set_storage_engine(storage_engine))
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Cli::parse();

    let database_options = args
        .database_options()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let request_manager = Database::new(database_options)
        .and_then(Database::run)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    log::info!(
        "starting HTTP server on {}:{}, allowed origins: [{}]",
        args.address,
        args.port,
        args.allowed_origins.join(", ")
    );

    let server_request_manager = request_manager.clone();
    let allowed_origins = args.allowed_origins.clone();
    let log_http = args.log_http;

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(server_request_manager.clone()))
            .configure(routes::configure)
            .wrap(build_cors(&allowed_origins))
            .wrap(Condition::new(log_http, middleware::Logger::default()))
    })
    .workers(args.http_workers)
    .bind((args.address, args.port))?
    .run()
    .await?;

    // Actix has handled the shutdown signal, let the database finish its last request
    match request_manager.send_shutdown_request() {
        Ok(shutdown_response) => log::info!("Shutting down server: {}", shutdown_response),
        Err(err) => log::error!("Database did not shut down cleanly: {}", err),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{env, path::PathBuf};

    use super::*;

    // Values set in the environment win over the defaults, only check defaults when they are unset
    fn env_is_unset(key: &str) -> bool {
        env::var_os(key).is_none()
    }

    #[test]
    fn defaults_match_the_documented_configuration() {
        let args = Cli::try_parse_from(["people-server"]).expect("should parse");

        if env_is_unset("DATABASE_URL") {
            assert_eq!(args.database_url, "file://data");
            assert_eq!(
                args.database_options()
                    .expect("default url should parse")
                    .storage_engine,
                StorageEngine::File(PathBuf::from("data"))
            );
        }

        if env_is_unset("PORT") {
            assert_eq!(args.port, 4000);
        }

        assert_eq!(args.address, "0.0.0.0");
        assert_eq!(args.http_workers, 2);
        assert!(!args.log_http);
        assert_eq!(
            args.allowed_origins,
            vec![
                "http://localhost:3000".to_string(),
                "https://merncrud123.netlify.app".to_string(),
            ]
        );
    }

    #[test]
    fn repeated_allowed_origin_replaces_the_defaults() {
        let args = Cli::try_parse_from([
            "people-server",
            "--allowed-origin",
            "https://one.example",
            "--allowed-origin",
            "https://two.example",
        ])
        .expect("should parse");

        assert_eq!(
            args.allowed_origins,
            vec![
                "https://one.example".to_string(),
                "https://two.example".to_string(),
            ]
        );
    }

    #[test]
    fn memory_database_url_is_accepted() {
        let args = Cli::try_parse_from(["people-server", "--database-url", "memory://", "-p", "8080"])
            .expect("should parse");

        assert_eq!(args.port, 8080);
        assert_eq!(
            args.database_options()
                .expect("should parse url")
                .storage_engine,
            StorageEngine::Memory
        );
    }

    #[test]
    fn unsupported_database_url_is_rejected() {
        let args = Cli::try_parse_from([
            "people-server",
            "--database-url",
            "mongodb://localhost:27017/people",
        ])
        .expect("should parse");

        assert!(matches!(
            args.database_options(),
            Err(PersistenceError::InvalidConnectionString(_))
        ));
    }
}
