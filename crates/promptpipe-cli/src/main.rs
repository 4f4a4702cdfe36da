use std::{process::ExitCode, time::Duration};

use anyhow::Result;
use clap::Parser;
use promptpipe::{
    AnyBackend, ModelClient, Provider,
    config::ModelConfig,
    error::PipeError,
    model::Model,
    pipeline::StageExt,
    prompt::{PromptTemplate, Variables},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const ACHIEVEMENTS_TEMPLATE: &str = "Tell me a few achievements of {name}";

#[derive(Debug, Parser)]
#[command(name = "promptpipe")]
#[command(version, about = "Render a prompt template and send it to a hosted chat model", long_about = None)]
struct Cli {
    /// `openai` or `gemini`.
    #[arg(long, env = "PROMPTPIPE_PROVIDER", default_value_t = Provider::OpenAi)]
    provider: Provider,

    /// Model identifier; defaults per provider.
    #[arg(long, env = "PROMPTPIPE_MODEL")]
    model: Option<String>,

    #[arg(long, env = "PROMPTPIPE_TEMPERATURE", default_value_t = 0.5)]
    temperature: f64,

    /// Falls back to the provider's usual key variable.
    #[arg(long, env = "PROMPTPIPE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Override the provider endpoint (proxies, local test servers).
    #[arg(long, env = "PROMPTPIPE_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "PROMPTPIPE_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[arg(long, default_value = "Barack Obama")]
    name: String,

    #[arg(long, default_value = ACHIEVEMENTS_TEMPLATE)]
    template: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String> {
    let model: Model = match &cli.model {
        Some(model) => model.parse()?,
        None => cli.provider.default_model(),
    };

    let api_key = cli
        .api_key
        .or_else(|| {
            cli.provider
                .api_key_envs()
                .iter()
                .find_map(|name| std::env::var(name).ok())
        })
        .unwrap_or_default();

    let mut config = ModelConfig::new(model, api_key).with_temperature(cli.temperature);
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    debug!(provider = %cli.provider, ?config, "model configuration");

    let backend =
        AnyBackend::connect(cli.provider, config, cli.base_url).map_err(|err| match err {
            PipeError::Authentication { .. } => anyhow::Error::new(err).context(format!(
                "could not set up `{}` (pass --api-key or set PROMPTPIPE_API_KEY / {})",
                cli.provider,
                cli.provider.api_key_envs().join(" / ")
            )),
            err => anyhow::Error::new(err).context(format!("could not set up `{}`", cli.provider)),
        })?;

    let pipeline = PromptTemplate::from_template(cli.template)?.pipe(ModelClient::new(backend));

    info!(provider = %cli.provider, name = %cli.name, "invoking pipeline");
    let response = pipeline
        .invoke(Variables::new().with("name", cli.name))
        .await?;

    if let Some(usage) = response.usage {
        debug!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            total_tokens = usage.total_tokens,
            "token usage"
        );
    }

    Ok(response.text)
}
