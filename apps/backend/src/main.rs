use actix_web::{web, App, HttpServer};
use backend::config::AppConfig;
use backend::cors_middleware;
use backend::routes;
use backend::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    backend::telemetry::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("❌ Invalid configuration: {err}");
            std::process::exit(1);
        }
    };
    let (host, port) = (config.host.clone(), config.port);

    println!("🚀 Starting Bridge Backend on http://{}:{}", host, port);

    let data = web::Data::new(AppState::new(config));

    // Periodically drop rooms nobody has touched in a while.
    let sweeper = data.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(600));
        loop {
            interval.tick().await;
            let removed = sweeper.rooms.sweep_inactive();
            if removed > 0 {
                tracing::info!(removed, "swept inactive rooms");
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
