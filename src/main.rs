use log::{info, error};
use gemini_relay::{server, RelayConfig};

#[tokio::main]
async fn main()
{   // a missing .env is fine; the process environment still applies
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(
      env_logger::Env::default().default_filter_or("info")
    ).init();

    let config = match RelayConfig::from_env()
    {   Ok(config) => config
      , Err(e) => {
          error!("{}", e);
          std::process::exit(2);
        }
    };
    info!(
      "Starting gemini-relay (model {}, api {})",
      config.model,
      config.api_version
    );

    if let Err(e) = server::serve(config).await
    {   error!("Relay stopped: {}", e);
        std::process::exit(1);
    }
}
