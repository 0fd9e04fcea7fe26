use argh::FromArgs;
use genedit::{codec, logger, ClientConfig, ImageInput, RequestOrchestrator, Session};
use std::path::PathBuf;

#[derive(FromArgs)]
/// Submit a prompt, optionally with a JPG or PNG image, to a genedit server.
struct SubmitArgs {
    /// the text prompt
    #[argh(option, short = 'p')]
    prompt: String,

    /// path to the input image
    #[argh(option, short = 'i')]
    image: Option<PathBuf>,

    /// where to write the generated image, if one comes back
    #[argh(option, short = 'o')]
    out: Option<PathBuf>,

    /// server base URL, defaults to GENEDIT_ENDPOINT or http://127.0.0.1:3000
    #[argh(option, short = 'e')]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_file_loaded = dotenv::dotenv().is_ok();
    logger::init_with_config(logger::LoggerConfig::from_env().with_level(logger::LogLevel::Info))?;
    if !env_file_loaded {
        log::debug!("No .env file found, using system environment variables");
    }

    let args: SubmitArgs = argh::from_env();

    let mut config = ClientConfig::from_env();
    if let Some(endpoint) = args.endpoint {
        config = config.with_endpoint(endpoint);
    }

    let mut session = Session::new(RequestOrchestrator::new(config));

    if let Some(path) = &args.image {
        let image = ImageInput::from_path(path).await?;
        session.select_image(image)?;
    }

    let result = session.submit(&args.prompt).await?;
    println!("{}", serde_json::to_string_pretty(result)?);

    match (result.generated_image(), &args.out) {
        (Some(image), Some(out)) => {
            let bytes = codec::decode(image)?;
            tokio::fs::write(out, &bytes).await?;
            log::info!("🖼️  Wrote {} bytes to {}", bytes.len(), out.display());
        }
        (Some(_), None) => log::info!("💡 Pass --out to save the generated image"),
        (None, _) => {}
    }

    if !result.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
