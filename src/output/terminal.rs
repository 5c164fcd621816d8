// Colored terminal output for the dashboard widgets.
//
// Each chart is drawn as labelled horizontal bars. This module owns all
// terminal-specific formatting; the dashboard only hands it data through
// the RenderPort trait.

use chrono::{DateTime, Utc};
use colored::Colorize;

use super::traits::RenderPort;
use super::{format_thousands, time_ago, truncate_chars};
use crate::dashboard::MonitorStatus;
use crate::metrics::distribution::{Highlights, CONFIDENCE_LABELS};
use crate::metrics::score::gauge_percent;
use crate::metrics::Snapshot;
use crate::posts::models::{PostRecord, Sentiment};

/// Renders dashboard widgets to stdout.
pub struct TerminalRenderer {
    /// Width in characters of the longest bar.
    pub bar_width: usize,
    /// Max characters of post text shown in the feed.
    pub text_width: usize,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self {
            bar_width: 30,
            text_width: 100,
        }
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderPort for TerminalRenderer {
    fn render_status(&mut self, status: MonitorStatus) {
        let indicator = match status {
            MonitorStatus::Monitoring => "●".green().bold(),
            MonitorStatus::Stopped => "●".dimmed(),
        };
        println!("{indicator} {}", status.as_str().bold());
    }

    fn render_metrics(&mut self, snapshot: &Snapshot) {
        let b = &snapshot.breakdown;
        println!(
            "\n{}",
            format!(
                "=== Sentiment @ {} UTC ===",
                snapshot.computed_at.format("%H:%M:%S")
            )
            .bold()
        );
        println!(
            "  Total posts: {}   {} {}%   {} {}%   {} {}%",
            format_thousands(b.total as u64).bold(),
            "Positive".green(),
            b.percent(Sentiment::Positive),
            "Negative".red(),
            b.percent(Sentiment::Negative),
            "Neutral".yellow(),
            b.percent(Sentiment::Neutral),
        );

        let gauge = gauge_percent(snapshot.score);
        let filled = ((gauge / 100.0) * self.bar_width as f64).round() as usize;
        println!(
            "  Overall score: {}  [{}{}]",
            colorize_score(snapshot.score),
            "█".repeat(filled).cyan(),
            "░".repeat(self.bar_width.saturating_sub(filled)).dimmed(),
        );
    }

    fn render_charts(&mut self, snapshot: &Snapshot) {
        let b = &snapshot.breakdown;
        let sentiment_rows: Vec<(String, usize)> = Sentiment::ALL
            .iter()
            .map(|s| (capitalize(s.as_str()), b.count(*s)))
            .collect();
        self.count_chart("Sentiment distribution", &sentiment_rows);

        println!("\n  {}", "Sentiment over time".bold());
        let half = self.bar_width / 2;
        for point in &snapshot.score_series {
            let len = ((point.value.abs() * half as f64).round() as usize).min(half);
            let pad = " ".repeat(half - len);
            let bar = "▇".repeat(len);
            let (left, right) = if point.value < 0.0 {
                (format!("{pad}{}", bar.red()), " ".repeat(half))
            } else {
                (" ".repeat(half), format!("{}{pad}", bar.green()))
            };
            println!("    {:>5} {left}|{right} {:+.2}", point.label, point.value);
        }

        let volume_rows: Vec<(String, usize)> = snapshot
            .volume_series
            .iter()
            .map(|p| (p.label.clone(), p.value))
            .collect();
        self.count_chart("Posts per hour", &volume_rows);

        let source_rows: Vec<(String, usize)> = snapshot
            .sources
            .entries()
            .map(|(source, count)| (source.label().to_string(), count))
            .collect();
        self.count_chart("Sources", &source_rows);

        let confidence_rows: Vec<(String, usize)> = CONFIDENCE_LABELS
            .iter()
            .zip(snapshot.confidence.buckets.iter())
            .map(|(label, count)| (label.to_string(), *count))
            .collect();
        self.count_chart("Confidence", &confidence_rows);
    }

    fn render_highlights(&mut self, highlights: &Highlights) {
        println!("\n  {}", "Highlights".bold());
        match &highlights.top_positive {
            Some(post) => println!(
                "    {} \"{}\" ({} • {}% confidence)",
                "Top positive:".green(),
                truncate_chars(&post.text, self.text_width),
                post.source,
                confidence_percent(post),
            ),
            None => println!("    {}", "No positive posts found".dimmed()),
        }
        match &highlights.top_negative {
            Some(post) => println!(
                "    {} \"{}\" ({} • {}% confidence)",
                "Top negative:".red(),
                truncate_chars(&post.text, self.text_width),
                post.source,
                confidence_percent(post),
            ),
            None => println!("    {}", "No negative posts found".dimmed()),
        }
    }

    fn render_feed(&mut self, posts: &[PostRecord], now: DateTime<Utc>) {
        println!(
            "\n{}",
            format!("=== Live feed ({} posts) ===", posts.len()).bold()
        );
        if posts.is_empty() {
            println!("  {}", "No posts match the current filters.".dimmed());
            return;
        }
        for post in posts {
            println!(
                "  {:<10} {:<10} {:<9} {:>3}% confidence",
                colorize_sentiment(post.sentiment),
                post.source.as_str(),
                time_ago(post.timestamp, now).dimmed(),
                confidence_percent(post),
            );
            println!("    {}", truncate_chars(&post.text, self.text_width));
            println!(
                "    {}",
                format!(
                    "{} followers · {} shares · {} likes",
                    format_thousands(post.user_followers),
                    post.retweets,
                    post.likes
                )
                .dimmed()
            );
        }
    }
}

impl TerminalRenderer {
    /// Draw a titled bar chart of non-negative counts, scaled to the
    /// largest value.
    fn count_chart(&self, title: &str, rows: &[(String, usize)]) {
        println!("\n  {}", title.bold());
        let max = rows.iter().map(|(_, v)| *v).max().unwrap_or(0);
        for (label, value) in rows {
            let len = if max == 0 {
                0
            } else {
                ((*value as f64 / max as f64) * self.bar_width as f64).round() as usize
            };
            println!("    {:>9} {} {}", label, "▇".repeat(len).cyan(), value);
        }
    }
}

fn confidence_percent(post: &PostRecord) -> u32 {
    (post.confidence * 100.0).round() as u32
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn colorize_score(score: f64) -> colored::ColoredString {
    let text = format!("{score:+.2}");
    if score > 0.1 {
        text.green().bold()
    } else if score < -0.1 {
        text.red().bold()
    } else {
        text.yellow()
    }
}

/// Colorize a sentiment badge.
fn colorize_sentiment(sentiment: Sentiment) -> colored::ColoredString {
    match sentiment {
        Sentiment::Positive => sentiment.as_str().green(),
        Sentiment::Negative => sentiment.as_str().red(),
        Sentiment::Neutral => sentiment.as_str().yellow(),
    }
}
