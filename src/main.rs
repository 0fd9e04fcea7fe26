use genedit::{logger, Config};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => println!("✅ .env file loaded"),
        Err(_) => println!("⚠️  No .env file found, using system environment variables"),
    }

    logger::init_with_config(logger::LoggerConfig::from_env())?;

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ {}", e);
            log::error!("💡 Set GOOGLE_API_KEY in the environment or in .env");
            return Err(e.into());
        }
    };

    logger::log_startup_info("genedit", env!("CARGO_PKG_VERSION"), &config);

    genedit::server::run(config).await?;
    Ok(())
}
