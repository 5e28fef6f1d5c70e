use std::net::TcpListener;

use actix_web::{
    dev::Server,
    middleware::Logger,
    web::{self, Data},
    App, HttpServer,
};
use anyhow::Context;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use crate::{
    configuration::{DatabaseSettings, Settings},
    routes::{create_user, delete_user, get_user_by_id, get_users, openapi_json, update_user},
    store::UserStore,
};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let connection_pool = get_connection_pool(&configuration.database);
        let store = UserStore::new(connection_pool);
        store
            .migrate()
            .await
            .context("Failed to create the users table.")?;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener =
            TcpListener::bind(&address).with_context(|| format!("Failed to bind {address}."))?;
        let port = listener.local_addr()?.port();
        tracing::info!(%address, port, "Listening");

        let server = run(listener, store, configuration.application.base_url)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn get_connection_pool(configuration: &DatabaseSettings) -> SqlitePool {
    SqlitePoolOptions::new().connect_lazy_with(configuration.connect_options())
}

pub struct ApplicationBaseUrl(pub String);

pub fn run(
    listener: TcpListener,
    store: UserStore,
    base_url: String,
) -> Result<Server, anyhow::Error> {
    let store = Data::new(store);
    let base_url = Data::new(ApplicationBaseUrl(base_url));
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(
                web::scope("/users")
                    .route("", web::post().to(create_user))
                    .route("", web::get().to(get_users))
                    .route("/{id}", web::get().to(get_user_by_id))
                    .route("/{id}", web::put().to(update_user))
                    .route("/{id}", web::delete().to(delete_user)),
            )
            .route("/api-docs/openapi.json", web::get().to(openapi_json))
            .app_data(store.clone())
            .app_data(base_url.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
