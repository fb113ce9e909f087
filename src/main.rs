use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use prize_wheel::{
    config::Config,
    external::WooCommerceClient,
    handlers,
    middlewares::{OriginGuard, create_cors},
    services::PrizeWheelService,
    swagger::swagger_config,
};

fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 本地开发时从 .env 读取 SITE_URL / CONSUMER_KEY 等
    dotenvy::dotenv().ok();
    init_logging();

    // 加载配置（缺少必需项时直接退出）
    let config = Config::from_toml().context("Failed to load configuration")?;

    let prizes = config.coupon.prize_table()?;
    let expires_on = config.coupon.expiry_date()?;
    log::info!(
        "Loaded {} prizes (total weight {}), coupons expire on {}",
        prizes.prizes().len(),
        prizes.total_weight(),
        expires_on
    );

    let client = WooCommerceClient::new(config.woocommerce.clone())
        .context("Failed to build WooCommerce HTTP client")?;
    let prize_wheel_service = PrizeWheelService::new(prizes, client, expires_on);
    let origin_guard = OriginGuard::new(config.origins.allowed.clone());

    let server = HttpServer::new(move || {
        App::new()
            // 最后 wrap 的最先执行: Logger -> CORS -> Origin 校验
            .wrap(origin_guard.clone())
            .wrap(create_cors())
            .wrap(Logger::default())
            .app_data(web::Data::new(prize_wheel_service.clone()))
            .configure(swagger_config)
            .configure(handlers::coupon_config)
    })
    .bind((config.server.host.as_str(), config.server.port))
    .with_context(|| {
        format!(
            "Failed to bind {}:{}",
            config.server.host, config.server.port
        )
    })?;

    for addr in server.addrs() {
        log::info!(
            "Prize wheel server listening on port {} in {} mode (http://{})",
            addr.port(),
            config.server.environment,
            addr
        );
    }

    server.run().await?;
    Ok(())
}
