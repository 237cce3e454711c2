use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use redmine_glightbox::application::services::PageScanner;
use redmine_glightbox::application::services::query_param::with_attachment_param;
use redmine_glightbox::application::{BuildGalleryUseCase, ResolveAttachmentsUseCase};
use redmine_glightbox::domain::AttachmentId;
use redmine_glightbox::domain::ports::{HistoryPort, SessionCachePort};
use redmine_glightbox::infrastructure::{
    AppConfig, CacheMode, CliArgs, FileSessionCache, HeadlessOverlayProvider, MemoryHistory,
    MemorySessionCache, RedmineClient, StripSurface,
};
use redmine_glightbox::presentation::{LightboxSettings, initialize};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn page_url(page: &str, base: Option<&Url>) -> Result<Url> {
    if let Ok(url) = Url::parse(page) {
        return Ok(url);
    }
    let base = base.ok_or_else(|| eyre!("relative page {page} needs --base-url"))?;
    base.join(page.trim_start_matches('/'))
        .wrap_err_with(|| format!("invalid page path {page}"))
}

async fn session_cache(config: &AppConfig) -> Arc<dyn SessionCachePort> {
    match config.cache.mode {
        CacheMode::Memory => Arc::new(MemorySessionCache::new(config.cache.memory_capacity)),
        CacheMode::File => Arc::new(FileSessionCache::for_session(&config.cache.session_id).await),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let config = AppConfig::load(&args)?;
    init_logging(&config)?;

    info!(version = redmine_glightbox::VERSION, "Starting {}", redmine_glightbox::NAME);

    let base = config.base_url()?;
    let page_url = page_url(&args.page, base.as_ref())?;
    let site_url = match base {
        Some(base) => base,
        None => page_url.join("/")?,
    };

    let client = RedmineClient::with_options(
        site_url.clone(),
        &config.http.user_agent,
        config.http.timeout_secs,
    )?;
    let html = client
        .fetch_page(&page_url)
        .await
        .wrap_err_with(|| format!("failed to fetch {page_url}"))?;
    let page = PageScanner::new(Some(page_url.clone())).scan(&html);

    let resolver = ResolveAttachmentsUseCase::new(Arc::new(client), session_cache(&config).await)
        .with_detail_scanner(PageScanner::new(Some(site_url)))
        .with_key_prefix(config.cache.key_prefix.clone());
    let use_case = BuildGalleryUseCase::new(resolver);

    let settings = LightboxSettings::from(&config.lightbox);
    let location = with_attachment_param(
        page_url.as_str(),
        &settings.query_param,
        args.open.map(AttachmentId::new),
    );

    let mut lightbox = match initialize(
        &HeadlessOverlayProvider::new(),
        &use_case,
        &page,
        MemoryHistory::new(location),
        StripSurface::default(),
        &settings,
    )
    .await
    {
        Ok(lightbox) => lightbox,
        Err(e) if e.is_quiet() => {
            info!(page = %page_url, "No attachments to show");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let overlay = serde_json::json!({
        "options": settings.overlay,
        "elements": lightbox.gallery().overlay_elements(),
    });
    println!("{}", serde_json::to_string_pretty(&overlay)?);

    if let Some(id) = args.open {
        match lightbox.open_from_initial_url(settings.initial_open_delay).await {
            Some(index) => println!(
                "Opened slide {index}: {} ({} history entries)",
                lightbox.history().location(),
                lightbox.history().len()
            ),
            None => eprintln!("Attachment {id} is not part of the gallery"),
        }
    }

    Ok(())
}
