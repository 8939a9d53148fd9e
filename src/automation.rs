use anyhow::Result;
use rand::Rng;
use serde::Serialize;
use std::ops::Range;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{Duration, Instant, interval_at};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, error, info, warn};

use crate::clients::CollaboratorError;
use crate::config::AutomationConfig;
use crate::models::analytics::NewAnalyticsEntry;
use crate::models::video::{NewVideo, VideoStatus};
use crate::services::GeneratorService;
use crate::state::SharedState;

/// Loop-owned counters, guarded by the single lock in [`SharedState`].
/// The earnings figure is a pseudo-random placeholder, never a
/// measurement of real revenue.
#[derive(Debug, Default)]
pub struct AutomationState {
    pub running: bool,
    pub earnings: f64,
    pub videos_discovered: u64,
    pub posts_published: u64,
    stop_tx: Option<watch::Sender<bool>>,
    /// Bumped on every start so a finishing loop task can tell whether
    /// the state still belongs to it.
    generation: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AutomationStatus {
    pub running: bool,
    /// Simulated figure only.
    pub earnings: f64,
    pub videos_discovered: u64,
    pub posts_published: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopOutcome {
    Stopped,
    NotRunning,
}

/// Two-state machine (RUNNING/STOPPED) around the posting loop. Start
/// spawns a single background task; stop cancels its pending wait via a
/// watch channel instead of waiting out the remainder of the interval.
#[derive(Clone)]
pub struct Automation {
    shared: Arc<SharedState>,
}

impl Automation {
    #[must_use]
    pub const fn new(shared: Arc<SharedState>) -> Self {
        Self { shared }
    }

    pub async fn start(&self) -> StartOutcome {
        let mut state = self.shared.automation.write().await;

        if state.running {
            return StartOutcome::AlreadyRunning;
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        state.running = true;
        state.stop_tx = Some(stop_tx);
        state.generation += 1;
        let generation = state.generation;
        drop(state);

        let shared = Arc::clone(&self.shared);
        let config = self.shared.config.read().await.automation.clone();

        tokio::spawn(async move {
            info!("Automation loop starting");
            if let Err(e) = run_loop(&shared, &config, stop_rx).await {
                error!("Automation loop error: {e:#}");
            }

            let mut state = shared.automation.write().await;
            if state.generation == generation {
                state.running = false;
                state.stop_tx = None;
            }
            info!("Automation loop stopped");
        });

        StartOutcome::Started
    }

    pub async fn stop(&self) -> StopOutcome {
        let mut state = self.shared.automation.write().await;

        if !state.running {
            return StopOutcome::NotRunning;
        }

        if let Some(tx) = state.stop_tx.take() {
            let _ = tx.send(true);
        }
        state.running = false;

        StopOutcome::Stopped
    }

    pub async fn status(&self) -> AutomationStatus {
        let state = self.shared.automation.read().await;
        AutomationStatus {
            running: state.running,
            earnings: state.earnings,
            videos_discovered: state.videos_discovered,
            posts_published: state.posts_published,
        }
    }

    /// One iteration of the loop body, outside the schedule.
    pub async fn run_once(&self) -> Result<()> {
        let config = self.shared.config.read().await.automation.clone();
        run_cycle(&self.shared, &config).await
    }
}

async fn run_loop(
    shared: &Arc<SharedState>,
    config: &AutomationConfig,
    stop_rx: watch::Receiver<bool>,
) -> Result<()> {
    if let Some(cron_expr) = &config.cron_expression {
        run_with_cron(shared, config, stop_rx, cron_expr).await
    } else {
        run_with_interval(shared, config, stop_rx).await
    }
}

async fn run_with_interval(
    shared: &Arc<SharedState>,
    config: &AutomationConfig,
    mut stop_rx: watch::Receiver<bool>,
) -> Result<()> {
    let period = Duration::from_secs(u64::from(config.scan_interval_minutes) * 60);
    info!(
        "Automation running every {} minutes",
        config.scan_interval_minutes
    );

    let mut ticker = interval_at(Instant::now() + period, period);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = run_cycle(shared, config).await {
                    // Unhandled cycle fault: log and continue after a
                    // short, still-cancellable delay.
                    error!("Automation cycle failed: {e:#}");
                    let backoff = Duration::from_secs(config.error_backoff_seconds.into());
                    tokio::select! {
                        () = tokio::time::sleep(backoff) => {}
                        _ = stop_rx.changed() => {}
                    }
                }
            }
            res = stop_rx.changed() => {
                if res.is_err() {
                    break;
                }
            }
        }

        if *stop_rx.borrow() {
            break;
        }
    }

    Ok(())
}

async fn run_with_cron(
    shared: &Arc<SharedState>,
    config: &AutomationConfig,
    mut stop_rx: watch::Receiver<bool>,
    cron_expr: &str,
) -> Result<()> {
    let mut sched = JobScheduler::new().await?;

    let job_shared = Arc::clone(shared);
    let job_config = config.clone();

    let job = Job::new_async(cron_expr, move |_uuid, _lock| {
        let shared = Arc::clone(&job_shared);
        let config = job_config.clone();
        Box::pin(async move {
            if !shared.automation.read().await.running {
                return;
            }
            if let Err(e) = run_cycle(&shared, &config).await {
                error!("Scheduled automation cycle failed: {e:#}");
            }
        })
    })?;

    sched.add(job).await?;
    sched.start().await?;

    info!("Automation running with cron: {}", cron_expr);

    loop {
        let res = stop_rx.changed().await;
        if res.is_err() || *stop_rx.borrow() {
            break;
        }
    }

    sched.shutdown().await?;
    Ok(())
}

/// One pass: scan → record → generate → post → record. Collaborator
/// failures are handled per kind; storage faults bubble up to the loop's
/// backoff handling.
async fn run_cycle(shared: &Arc<SharedState>, config: &AutomationConfig) -> Result<()> {
    match shared.tiktok.scan_trending().await {
        Ok(posts) => {
            if posts.is_empty() {
                debug!("No trending posts found this cycle");
            }

            for post in &posts {
                let video = NewVideo {
                    title: truncate_chars(&post.text, 120),
                    platform: "TikTok".to_string(),
                    url: post.url.clone(),
                    views: 0,
                    engagement_rate: 0.0,
                    relevance_score: 0,
                    captions: Some(post.text.clone()),
                    hashtags: vec![],
                    status: VideoStatus::Discovered,
                    transcript: None,
                };
                shared.store.add_video(&video).await?;
            }

            if !posts.is_empty() {
                let mut state = shared.automation.write().await;
                state.videos_discovered += posts.len() as u64;
                info!("Scanned TikTok: {} trending posts recorded", posts.len());
            }
        }
        Err(CollaboratorError::ConfigMissing(what)) => {
            debug!("Skipping scan: {what}");
        }
        Err(e) => {
            warn!("TikTok scan failed: {}", e);
        }
    }

    let Some(latest) = shared.store.latest_video().await? else {
        debug!("No viral content available yet, nothing to post");
        return Ok(());
    };

    let source_text = latest.captions.clone().unwrap_or_else(|| latest.title.clone());

    let generator = GeneratorService::new(shared.store.clone(), shared.openai.clone());
    let caption = generator.caption_for(&source_text).await;

    let full_content = format!("{caption}\n\n💰 Make money: {}", config.affiliate_link);

    match shared.tiktok.post(&full_content).await {
        Ok(()) => record_publication(shared, "TikTok", 5.0..25.0).await?,
        Err(CollaboratorError::ConfigMissing(what)) => {
            debug!("Skipping TikTok post: {what}");
        }
        Err(e) => {
            warn!("TikTok post failed: {}", e);
        }
    }

    match shared.instagram.post(&full_content).await {
        Ok(()) => record_publication(shared, "Instagram", 3.0..15.0).await?,
        Err(CollaboratorError::ConfigMissing(what)) => {
            debug!("Skipping Instagram post: {what}");
        }
        Err(e) => {
            warn!("Instagram post failed: {}", e);
        }
    }

    Ok(())
}

async fn record_publication(
    shared: &Arc<SharedState>,
    platform: &str,
    earnings_range: Range<f64>,
) -> Result<()> {
    let earned = rand::rng().random_range(earnings_range);

    shared
        .store
        .add_analytics(&NewAnalyticsEntry {
            platform: platform.to_string(),
            views: 0,
            engagement_rate: 0.0,
            revenue: earned,
            conversion_rate: 0.0,
        })
        .await?;

    let mut state = shared.automation.write().await;
    state.posts_published += 1;
    state.earnings += earned;
    info!("Posted to {platform} (+${earned:.2} simulated)");

    Ok(())
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    async fn shared_state() -> Arc<SharedState> {
        let mut config = Config::default();
        config.general.database_path = "sqlite::memory:".to_string();
        // In-memory SQLite is per-connection; keep the pool at one.
        config.general.max_db_connections = 1;
        config.general.min_db_connections = 1;
        Arc::new(SharedState::new(config).await.unwrap())
    }

    #[tokio::test]
    async fn test_start_twice_reports_already_running() {
        let automation = Automation::new(shared_state().await);

        assert_eq!(automation.start().await, StartOutcome::Started);
        assert_eq!(automation.start().await, StartOutcome::AlreadyRunning);
        assert!(automation.status().await.running);

        assert_eq!(automation.stop().await, StopOutcome::Stopped);
    }

    #[tokio::test]
    async fn test_stop_when_not_running_is_a_noop() {
        let automation = Automation::new(shared_state().await);

        assert_eq!(automation.stop().await, StopOutcome::NotRunning);
        assert!(!automation.status().await.running);
    }

    #[tokio::test]
    async fn test_stop_then_restart() {
        let automation = Automation::new(shared_state().await);

        assert_eq!(automation.start().await, StartOutcome::Started);
        assert_eq!(automation.stop().await, StopOutcome::Stopped);
        assert!(!automation.status().await.running);

        assert_eq!(automation.start().await, StartOutcome::Started);
        assert_eq!(automation.stop().await, StopOutcome::Stopped);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("💰💰💰💰", 2), "💰💰");
    }
}
