use anyhow::Result;
use tracing::info;

use crate::config::AffiliateProductConfig;
use crate::db::Store;
use crate::models::analytics::NewAnalyticsEntry;
use crate::models::script::{NewScript, ScriptStatus};
use crate::models::video::{NewVideo, VideoStatus};

pub const SAMPLE_VIDEO_COUNT: usize = 5;
pub const SAMPLE_SCRIPT_COUNT: usize = 3;
pub const SAMPLE_ANALYTICS_COUNT: usize = 3;

/// Destructive reseed of all four record tables. Clears everything, then
/// repopulates from the fixed sample set and the configured product list.
/// No confirmation, no backup; an interruption leaves a partially cleared
/// store.
#[derive(Clone)]
pub struct SeedService {
    store: Store,
}

impl SeedService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn reseed(&self, products: &[AffiliateProductConfig]) -> Result<()> {
        self.store.clear_all_records().await?;

        for video in sample_videos() {
            self.store.add_video(&video).await?;
        }

        for product in products {
            self.store.add_product(&product.into()).await?;
        }

        for script in sample_scripts() {
            self.store.add_script(&script).await?;
        }

        for entry in sample_analytics() {
            self.store.add_analytics(&entry).await?;
        }

        info!(
            "Store reseeded: {} videos, {} products, {} scripts, {} analytics entries",
            SAMPLE_VIDEO_COUNT,
            products.len(),
            SAMPLE_SCRIPT_COUNT,
            SAMPLE_ANALYTICS_COUNT
        );

        Ok(())
    }
}

fn sample_video(
    title: &str,
    platform: &str,
    url: &str,
    views: i64,
    engagement_rate: f64,
    relevance_score: i32,
    captions: &str,
    hashtags: &str,
    transcript: &str,
) -> NewVideo {
    NewVideo {
        title: title.to_string(),
        platform: platform.to_string(),
        url: url.to_string(),
        views,
        engagement_rate,
        relevance_score,
        captions: Some(captions.to_string()),
        hashtags: hashtags.split_whitespace().map(str::to_string).collect(),
        status: VideoStatus::Processed,
        transcript: Some(transcript.to_string()),
    }
}

fn sample_videos() -> Vec<NewVideo> {
    vec![
        sample_video(
            "How I Make $8,600/Month in Passive Income (Work 2 Hours Daily)",
            "TikTok",
            "https://tiktok.com/sample1",
            1_200_000,
            12.5,
            94,
            "Lost my waitressing job during pandemic. Now I make $8,600/month with affiliate marketing...",
            "#passiveincome #affiliatemarketing #sidehustle",
            "Hey everyone, so I know this sounds crazy...",
        ),
        sample_video(
            "5 AI Tools That Actually Make Money (I Made $3,200 This Week)",
            "Instagram",
            "https://instagram.com/sample2",
            890_000,
            9.8,
            87,
            "After testing 50+ AI tools, these 5 actually generate income...",
            "#aitools #generativeai #makemoneywithai",
            "I've tested over 50 different AI tools...",
        ),
        sample_video(
            "Wealth Building Secrets They Don't Want You to Know",
            "YouTube",
            "https://youtube.com/sample3",
            650_000,
            11.2,
            89,
            "The wealth building strategies that made me $25K last month...",
            "#wealthbuilding #passiveincome #investing",
            "What I'm about to share with you...",
        ),
        sample_video(
            "ChatGPT + This Tool = $500/Day (AI Money Method)",
            "TikTok",
            "https://tiktok.com/sample4",
            750_000,
            10.3,
            91,
            "Everyone uses ChatGPT wrong. I combine it with this one tool...",
            "#chatgpt #aitools #makemoneywithai",
            "Most people are using ChatGPT completely wrong...",
        ),
        sample_video(
            "How AI Automation Replaced My 9-5 Income",
            "YouTube",
            "https://youtube.com/sample6",
            580_000,
            11.8,
            92,
            "AI didn't take my job - it gave me a better one...",
            "#aiautomation #artificialintelligence #makemoneywithai",
            "A year ago I was making $60,000...",
        ),
    ]
}

fn sample_script(
    title: &str,
    content: &str,
    content_type: &str,
    video_length: &str,
    target_audience: &str,
    template_type: &str,
) -> NewScript {
    NewScript {
        title: title.to_string(),
        content: content.to_string(),
        content_type: content_type.to_string(),
        video_length: video_length.to_string(),
        target_audience: target_audience.to_string(),
        template_type: template_type.to_string(),
        ai_generated: true,
        status: ScriptStatus::Approved,
    }
}

fn sample_scripts() -> Vec<NewScript> {
    vec![
        sample_script(
            "Morning Motivation: Start Your Side Hustle Today",
            "🎯 Hook: 'I used to hate Monday mornings. Now I wake up excited because my side hustle made me $500 while I slept.'\n\n\
             ❗ Problem: 'Most people are stuck in jobs they hate, living paycheck to paycheck, with no way out.'\n\n\
             💡 Solution: 'I discovered affiliate marketing - promoting products I believe in and earning commissions.'\n\n\
             📊 Proof: 'In 6 months, I went from $0 to $8,600/month working just 2 hours daily.'\n\n\
             📞 Call to Action: 'Comment START if you want the exact blueprint I used. It's completely free.'",
            "Motivational",
            "60 seconds",
            "Aspiring Entrepreneurs",
            "success-story",
        ),
        sample_script(
            "5 AI Tools That Actually Make Money (Not ChatGPT)",
            "🎯 Hook: 'Everyone talks about ChatGPT, but these 5 AI tools actually generate income.'\n\n\
             ❗ Problem: 'Most people use AI tools for fun, not profit. They're missing the real money-making opportunities.'\n\n\
             💡 Solution: 'I use Jasper AI for content, Systeme.io for automation, and 3 other tools to create multiple income streams.'\n\n\
             📊 Proof: 'Last month: $3,200 from AI-generated content, $2,100 from automation, $1,800 from AI affiliate commissions.'\n\n\
             📞 Call to Action: 'Drop a 🤖 if you want my complete AI money-making toolkit.'",
            "AI Tools Review",
            "45 seconds",
            "Tech-Savvy Entrepreneurs",
            "tips-tricks",
        ),
        sample_script(
            "Wealth Building Secrets Rich People Don't Share",
            "🎯 Hook: 'Rich people have 7 income streams. Poor people have 1. Here's how to build yours.'\n\n\
             ❗ Problem: 'You're trading time for money. Rich people make money work for them while they sleep.'\n\n\
             💡 Solution: 'I built multiple passive income streams: affiliate marketing, course sales, and recurring commissions.'\n\n\
             📊 Proof: 'Stream 1: $2,400/month. Stream 2: $1,800/month. Stream 3: $4,400/month. Total: $8,600/month.'\n\n\
             📞 Call to Action: 'Comment WEALTH if you want my 7-stream income blueprint.'",
            "Wealth Building",
            "75 seconds",
            "Wealth Seekers",
            "success-story",
        ),
    ]
}

fn sample_analytics() -> Vec<NewAnalyticsEntry> {
    vec![
        NewAnalyticsEntry {
            platform: "TikTok".to_string(),
            views: 1_200_000,
            engagement_rate: 12.5,
            revenue: 2400.0,
            conversion_rate: 4.2,
        },
        NewAnalyticsEntry {
            platform: "Instagram".to_string(),
            views: 890_000,
            engagement_rate: 9.8,
            revenue: 1800.0,
            conversion_rate: 3.8,
        },
        NewAnalyticsEntry {
            platform: "YouTube".to_string(),
            views: 650_000,
            engagement_rate: 11.2,
            revenue: 1400.0,
            conversion_rate: 5.1,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_sets_match_declared_counts() {
        assert_eq!(sample_videos().len(), SAMPLE_VIDEO_COUNT);
        assert_eq!(sample_scripts().len(), SAMPLE_SCRIPT_COUNT);
        assert_eq!(sample_analytics().len(), SAMPLE_ANALYTICS_COUNT);
    }

    #[test]
    fn test_sample_scores_are_within_range() {
        for video in sample_videos() {
            assert!((0..=100).contains(&video.relevance_score));
            assert!((0.0..=100.0).contains(&video.engagement_rate));
        }
    }
}
