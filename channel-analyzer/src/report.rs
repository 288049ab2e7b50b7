//! Views over a [`ChannelReport`] for presenting it: the leaderboard, the views/likes series,
//! the thumbnail gallery, and a plain-text dashboard combining them.

use crate::metrics::VideoRecord;
use crate::pipeline::ChannelReport;
use jiff::civil::Date;
use std::io::{self, Write};

const TITLE_WIDTH: usize = 48;

/// The `n` most viewed videos, most viewed first. Ties keep their result order.
pub fn top_by_views(records: &[VideoRecord], n: usize) -> Vec<&VideoRecord> {
    let mut sorted: Vec<&VideoRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.views.cmp(&a.views));
    sorted.truncate(n);
    sorted
}

/// One point of the views/likes chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesPoint {
    pub published: Option<Date>,
    pub views: u64,
    pub likes: u64,
}

/// Views and likes per video, in result order.
pub fn views_likes_series(records: &[VideoRecord]) -> Vec<SeriesPoint> {
    records
        .iter()
        .map(|record| SeriesPoint {
            published: record.published,
            views: record.views,
            likes: record.likes,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryEntry<'a> {
    pub title: &'a str,
    pub thumbnail_url: &'a str,
    pub url: &'a str,
}

/// Videos that have a thumbnail, in result order.
pub fn gallery(records: &[VideoRecord]) -> Vec<GalleryEntry<'_>> {
    records
        .iter()
        .filter(|record| !record.thumbnail_url.is_empty())
        .map(|record| GalleryEntry {
            title: &record.title,
            thumbnail_url: &record.thumbnail_url,
            url: &record.url,
        })
        .collect()
}

/// What [`render_dashboard`] includes besides the header and the video table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    /// Size of the most-viewed leaderboard. 0 leaves it out.
    pub top: usize,
    pub series: bool,
    pub gallery: bool,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            top: 5,
            series: true,
            gallery: false,
        }
    }
}

/// Writes a plain-text dashboard for `report`.
pub fn render_dashboard<W: Write>(
    mut w: W,
    report: &ChannelReport,
    options: &DashboardOptions,
) -> io::Result<()> {
    let channel = &report.channel;
    writeln!(w, "{} ({})", channel.title, channel.id)?;
    if let Some(logo) = &channel.logo_url {
        writeln!(w, "{logo}")?;
    }
    writeln!(w)?;
    writeln!(w, "Total Videos  {}", group_digits(channel.video_count))?;
    writeln!(w, "Total Views   {}", group_digits(channel.view_count))?;
    match channel.subscriber_count {
        Some(subscribers) => writeln!(w, "Subscribers   {}", group_digits(subscribers))?,
        None => writeln!(w, "Subscribers   Hidden")?,
    }

    writeln!(w)?;
    writeln!(w, "Videos ({})", report.videos.len())?;
    write_table(&mut w, report.videos.iter())?;

    if options.series && !report.videos.is_empty() {
        writeln!(w)?;
        writeln!(w, "Views / Likes")?;
        for point in views_likes_series(&report.videos) {
            let published = point
                .published
                .map(|date| date.to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                w,
                "{published:<10}  {:>15}  {:>13}",
                group_digits(point.views),
                group_digits(point.likes)
            )?;
        }
    }

    if options.top > 0 && !report.videos.is_empty() {
        writeln!(w)?;
        writeln!(w, "Top {} by views", options.top)?;
        write_table(&mut w, top_by_views(&report.videos, options.top).into_iter())?;
    }

    if options.gallery {
        writeln!(w)?;
        writeln!(w, "Gallery")?;
        for entry in gallery(&report.videos) {
            writeln!(w, "{}", truncate(entry.title, TITLE_WIDTH))?;
            writeln!(w, "  {}", entry.thumbnail_url)?;
            writeln!(w, "  {}", entry.url)?;
        }
    }

    if report.is_partial() {
        let missing: usize = report
            .failed_batches
            .iter()
            .map(|failure| failure.video_ids.len())
            .sum();
        writeln!(w)?;
        writeln!(
            w,
            "Note: details for {missing} video(s) in {} batch(es) could not be fetched; \
             the results above are incomplete.",
            report.failed_batches.len()
        )?;
    }

    Ok(())
}

fn write_table<'a, W: Write>(
    w: &mut W,
    records: impl Iterator<Item = &'a VideoRecord>,
) -> io::Result<()> {
    writeln!(
        w,
        "{:<11}  {:<width$}  {:<10}  {:>15}  {:>13}  {:>11}  {:>7}  {:>8}",
        "Video ID",
        "Title",
        "Published",
        "Views",
        "Likes",
        "Comments",
        "Eng. %",
        "Minutes",
        width = TITLE_WIDTH,
    )?;
    for record in records {
        let published = record
            .published
            .map(|date| date.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            w,
            "{:<11}  {:<width$}  {:<10}  {:>15}  {:>13}  {:>11}  {:>7.3}  {:>8.2}",
            record.id,
            truncate(&record.title, TITLE_WIDTH),
            published,
            group_digits(record.views),
            group_digits(record.likes),
            group_digits(record.comments),
            record.engagement_pct,
            record.duration_min,
            width = TITLE_WIDTH,
        )?;
    }
    Ok(())
}

/// `1234567` -> `1,234,567`
fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut truncated: String = s.chars().take(width - 1).collect();
    truncated.push('…');
    truncated
}
