pub mod api;
pub mod automation;
pub mod clients;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;
use tokio::signal;

use automation::Automation;
pub use config::Config;
use db::Store;
use services::{GeneratorService, SeedService, StatsService};
use state::SharedState;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    match args[1].as_str() {
        "daemon" | "-d" | "--daemon" => run_daemon(config).await,

        "check" | "-c" | "--check" => cmd_check(config).await,

        "scan" | "s" => cmd_scan(config).await,

        "videos" | "ls" | "v" => cmd_videos(&config).await,

        "scripts" => cmd_scripts(&config).await,

        "stats" => cmd_stats(&config).await,

        "products" | "p" => cmd_products(&config),

        "seed" => cmd_seed(&config).await,

        "generate" | "g" => {
            if args.len() < 7 {
                println!("Usage: trendarr generate <content_type> <length> <audience> <template> <key message...>");
                println!("Example: trendarr generate \"AI Tools\" 60s \"Entrepreneurs\" tips-tricks \"automation pays for itself\"");
                return Ok(());
            }
            let key_message = args[6..].join(" ");
            cmd_generate(config, &args[2], &args[3], &args[4], &args[5], &key_message).await
        }

        "init" | "--init" => {
            Config::create_default_if_missing()?;
            println!("✓ Config file created. Edit config.toml and run again.");
            Ok(())
        }

        "help" | "-h" | "--help" => {
            print_help();
            Ok(())
        }

        _ => {
            println!("Unknown command: {}", args[1]);
            println!();
            print_help();
            Ok(())
        }
    }
}

fn print_help() {
    println!("Trendarr - Viral Content Automation");
    println!("Scans trending posts, rewrites them with affiliate links, and posts them");
    println!();
    println!("USAGE:");
    println!("  trendarr <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("  scan              Scan trending posts once and record them");
    println!("  check             Run a single scan-generate-post cycle");
    println!("  videos, ls        List recorded viral videos");
    println!("  scripts           List generated scripts");
    println!("  stats             Show dashboard statistics");
    println!("  products          Show the configured affiliate products");
    println!("  generate <args>   Generate a content script");
    println!("  seed              Reset the store and load sample data (destructive)");
    println!("  daemon            Run as background daemon with web API");
    println!("  init              Create default config file");
    println!("  help              Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("  trendarr scan                     # One-shot trending scan");
    println!("  trendarr videos                   # Show recorded videos by relevance");
    println!("  trendarr generate \"AI Tools\" 60s \"Entrepreneurs\" tips-tricks \"automation pays\"");
    println!("  trendarr daemon                   # Start the web API + automation");
    println!();
    println!("CONFIG:");
    println!("  Edit config.toml for intervals, credentials and products.");
    println!("  Credentials can also come from the environment:");
    println!("  OPENAI_API_KEY, TIKTOK_USERNAME, TIKTOK_PASSWORD,");
    println!("  INSTAGRAM_USERNAME, INSTAGRAM_PASSWORD");
}

async fn cmd_check(config: Config) -> anyhow::Result<()> {
    info!("Running single automation cycle...");

    let shared = Arc::new(SharedState::new(config).await?);
    let automation = Automation::new(shared);

    automation.run_once().await?;

    let status = automation.status().await;
    info!(
        "Cycle complete: {} posts published, ${:.2} simulated earnings",
        status.posts_published, status.earnings
    );

    Ok(())
}

async fn cmd_scan(config: Config) -> anyhow::Result<()> {
    println!("Scanning TikTok for trending posts...");

    let shared = Arc::new(SharedState::new(config).await?);

    match shared.tiktok.scan_trending().await {
        Ok(posts) if posts.is_empty() => {
            println!("No trending posts found.");
        }
        Ok(posts) => {
            for post in &posts {
                let video = models::video::NewVideo {
                    title: post.text.chars().take(120).collect(),
                    platform: "TikTok".to_string(),
                    url: post.url.clone(),
                    views: 0,
                    engagement_rate: 0.0,
                    relevance_score: 0,
                    captions: Some(post.text.clone()),
                    hashtags: vec![],
                    status: models::video::VideoStatus::Discovered,
                    transcript: None,
                };
                shared.store.add_video(&video).await?;
            }

            println!("✓ Recorded {} trending posts:", posts.len());
            for (i, post) in posts.iter().enumerate() {
                let preview: String = post.text.chars().take(60).collect();
                println!("  {}. {}", i + 1, preview);
            }
        }
        Err(e) => {
            println!("Scan failed: {}", e);
        }
    }

    Ok(())
}

async fn cmd_videos(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let videos = store.list_videos().await?;

    if videos.is_empty() {
        println!("No viral videos recorded.");
        println!();
        println!("Run 'trendarr scan' to find some, or 'trendarr seed' for sample data.");
        return Ok(());
    }

    println!("Viral Videos ({} total)", videos.len());
    println!("{:-<70}", "");

    for video in videos {
        println!("• {} [{}]", video.title, video.status);
        println!(
            "  Platform: {} | Views: {} | Score: {} | Engagement: {}%",
            video.platform, video.views, video.relevance_score, video.engagement_rate
        );
        if !video.hashtags.is_empty() {
            println!("  Tags: {}", video.hashtags.join(" "));
        }
        println!();
    }

    Ok(())
}

async fn cmd_scripts(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let scripts = store.list_scripts().await?;

    if scripts.is_empty() {
        println!("No scripts found. Generate some scripts first!");
        return Ok(());
    }

    println!("Generated Scripts ({} total)", scripts.len());
    println!("{:-<70}", "");

    for (i, script) in scripts.iter().enumerate() {
        println!("{}. {}", i + 1, script.title);
        println!(
            "   Type: {} | Length: {} | Audience: {} | Status: {}",
            script.content_type, script.video_length, script.target_audience, script.status
        );
        println!();
    }

    Ok(())
}

async fn cmd_stats(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let stats = StatsService::new(store, config.products.clone());

    let dashboard = stats.dashboard_stats().await?;

    println!("Dashboard Statistics");
    println!("{:-<70}", "");
    println!("Monthly Revenue:    ${}", dashboard.monthly_revenue);
    println!("Videos Created:     {}", dashboard.videos_created);
    println!("Average Engagement: {}%", dashboard.avg_engagement);
    println!("Conversion Rate:    {}%", dashboard.conversion_rate);
    println!("Total Views:        {}", dashboard.total_views);
    println!("Viral Videos Found: {}", dashboard.viral_videos_found);

    Ok(())
}

fn cmd_products(config: &Config) -> anyhow::Result<()> {
    println!("Affiliate Products");
    println!("{:-<70}", "");

    for product in &config.products {
        let recurring = if product.is_recurring { "Yes" } else { "No" };
        println!("• {}", product.name);
        println!("  Category: {}", product.category);
        println!(
            "  Commission: {}% (${} avg) | Recurring: {}",
            product.commission_rate, product.commission_amount, recurring
        );
        println!("  URL: {}", product.url);
        println!();
    }

    Ok(())
}

async fn cmd_seed(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let seeder = SeedService::new(store.clone());

    seeder.reseed(&config.products).await?;

    println!("✓ Store reseeded with sample data.");
    println!(
        "  Videos: {} | Products: {} | Scripts: {} | Analytics: {}",
        store.video_count().await?,
        store.product_count().await?,
        store.script_count().await?,
        store.analytics_count().await?,
    );

    Ok(())
}

async fn cmd_generate(
    config: Config,
    content_type: &str,
    video_length: &str,
    target_audience: &str,
    template_type: &str,
    key_message: &str,
) -> anyhow::Result<()> {
    println!("Generating {} script for {}...", content_type, target_audience);

    let shared = Arc::new(SharedState::new(config).await?);
    let generator = GeneratorService::new(shared.store.clone(), shared.openai.clone());

    let script = generator
        .generate_script(clients::openai::ScriptPrompt {
            content_type: content_type.to_string(),
            video_length: video_length.to_string(),
            target_audience: target_audience.to_string(),
            key_message: key_message.to_string(),
            template_type: template_type.to_string(),
        })
        .await?;

    println!();
    println!("📝 Generated Script: {}", script.title);
    println!("{:-<70}", "");
    println!("{}", script.content);
    println!("{:-<70}", "");

    Ok(())
}

async fn run_daemon(config: Config) -> anyhow::Result<()> {
    info!(
        "Trendarr v{} starting in daemon mode...",
        env!("CARGO_PKG_VERSION")
    );

    let missing = config.missing_credentials();
    if !missing.is_empty() {
        info!(
            "Missing credentials (collaborators disabled): {}",
            missing.join(", ")
        );
    }

    let autostart = config.automation.autostart;
    let server_enabled = config.server.enabled;
    let port = config.server.port;

    let shared = Arc::new(SharedState::new(config).await?);
    let api_state = api::create_app_state(Arc::clone(&shared)).await;

    let automation = Automation::new(shared);
    if autostart {
        automation.start().await;
        info!("Automation loop autostarted");
    }

    let server_handle: Option<tokio::task::JoinHandle<()>> = if server_enabled {
        info!("Starting Web API on port {}", port);

        let app = api::router(api_state).await;
        let addr = format!("0.0.0.0:{}", port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        Some(tokio::spawn(async move {
            info!("🌐 Web Server running at http://0.0.0.0:{}", port);
            if let Err(e) = axum::serve(listener, app).await {
                error!("Web server error: {}", e);
            }
        }))
    } else {
        None
    };

    info!("Daemon running. Press Ctrl+C to stop.");

    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(e) => {
            error!("Error listening for shutdown: {}", e);
        }
    }

    automation.stop().await;
    if let Some(handle) = server_handle {
        handle.abort();
    }
    info!("Daemon stopped");

    Ok(())
}
