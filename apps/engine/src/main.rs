use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rendezvous_engine::cache::{MemoryCache, PromptCache, RedisCache};
use rendezvous_engine::config::Config;
use rendezvous_engine::request_file::load_prompt_request;
use rendezvous_engine::store::MemoryTemplateStore;
use rendezvous_engine::PromptEngine;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("rendezvous_engine={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Rendezvous prompt engine v{}", env!("CARGO_PKG_VERSION"));

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        bail!("usage: rendezvous <request.json>");
    };

    let cache: Arc<dyn PromptCache> = match &config.redis_url {
        Some(url) => Arc::new(RedisCache::open(url)?),
        None => {
            info!("REDIS_URL not set, using in-memory content cache");
            Arc::new(MemoryCache::new(config.cache_capacity))
        }
    };

    let request = load_prompt_request(&path)?;
    let store = Arc::new(MemoryTemplateStore::with_templates(vec![request.template.clone()]));
    let engine = PromptEngine::new(store, cache, config.engine_config());

    let validation = engine.validate_template_content(&request.template.content);
    for warning in &validation.warnings {
        warn!("Template '{}': {warning}", request.template.name);
    }
    for error in &validation.errors {
        warn!("Template '{}' would be rejected: {error}", request.template.name);
    }

    let prompt = engine
        .generate_prompt(
            &request.template,
            &request.user_data,
            request.occasion.as_deref(),
        )
        .await;
    println!("{prompt}");

    Ok(())
}
