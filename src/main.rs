use actix_web::{App, HttpServer, web};
use anyhow::Context;
use clap::Parser;
use multiproto::{
    config::Config,
    http::{ProcessRegistry, routes},
    logging::init_logging,
};
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_logging(config.log_format, config.log_level);

    // 启动前一次性构建，之后只读
    let registry = web::Data::new(ProcessRegistry::builtin()?);
    let limit = config.body_limit();

    let mut formats: Vec<_> = registry.formats().collect();
    formats.sort_unstable();
    info!(listen = %config.listen, ?formats, max_body_bytes = ?limit.max_bytes, "starting");

    let mut server = HttpServer::new(move || App::new().configure(routes(registry.clone(), limit)));
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    server
        .bind(config.listen)
        .with_context(|| format!("bind {}", config.listen))?
        .run()
        .await
        .context("http server")
}
