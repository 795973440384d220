// src/report.rs
//! Plain-text rendering of a dashboard for the terminal

use crate::core::dashboard::{Dashboard, DateCount, ValueCount};
use std::fmt::Write;

const BAR_WIDTH: usize = 30;

pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();

    if let Some(notice) = &dashboard.notice {
        let _ = writeln!(out, "⚠ {}", notice);
    }
    if dashboard.jobs.is_empty() {
        if dashboard.total_jobs > 0 {
            let _ = writeln!(out, "No jobs match the selected filters.");
        } else if dashboard.notice.is_none() {
            let _ = writeln!(out, "No job data available.");
        }
        return out;
    }

    let _ = writeln!(out, "{}\n", dashboard.summary());
    render_jobs(&mut out, dashboard);
    render_ranking(&mut out, "📍 Top Cities by Job Count", &dashboard.top_cities);
    render_ranking(&mut out, "💼 Top In-Demand Skills", &dashboard.top_skills);
    render_ranking(&mut out, "🏷  Top Job Titles", &dashboard.top_titles);
    render_ranking(&mut out, "🏢 Top Hiring Companies", &dashboard.top_companies);
    render_timeline(&mut out, &dashboard.postings_over_time);
    out
}

fn render_jobs(out: &mut String, dashboard: &Dashboard) {
    let _ = writeln!(
        out,
        "{:<24} {:<32} {:<16} {:<8} {:<10} {:<30} {}",
        "Employer", "Title", "City", "Country", "Posted", "Skills", "Apply"
    );
    let _ = writeln!(out, "{}", "-".repeat(130));
    for job in &dashboard.jobs {
        let _ = writeln!(
            out,
            "{:<24} {:<32} {:<16} {:<8} {:<10} {:<30} {}",
            truncate(&job.employer_name, 24),
            truncate(&job.job_title, 32),
            truncate(&job.job_city, 16),
            job.job_country.as_deref().unwrap_or("-"),
            job.posted_on
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
            truncate(&job.skills.to_string(), 30),
            job.apply_link
        );
    }
}

fn render_ranking(out: &mut String, heading: &str, rows: &[ValueCount]) {
    if rows.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}", heading);
    let max = rows.iter().map(|r| r.count).max().unwrap_or(1);
    for row in rows {
        let _ = writeln!(
            out,
            "  {:<28} {:>4} {}",
            truncate(&row.value, 28),
            row.count,
            bar(row.count, max)
        );
    }
}

fn render_timeline(out: &mut String, rows: &[DateCount]) {
    if rows.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n📆 Job Postings Over Time");
    let max = rows.iter().map(|r| r.count).max().unwrap_or(1);
    for row in rows {
        let _ = writeln!(
            out,
            "  {} {:>4} {}",
            row.date.format("%Y-%m-%d"),
            row.count,
            bar(row.count, max)
        );
    }
}

fn bar(count: usize, max: usize) -> String {
    let width = (count * BAR_WIDTH).div_ceil(max.max(1));
    "█".repeat(width)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
