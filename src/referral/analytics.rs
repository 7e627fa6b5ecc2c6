//! Referral analytics rollups for the partner dashboard charts.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::{ReferralEvent, ReferralEventKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReferralCounts {
    pub clicks: u64,
    pub enrollments: u64,
}

impl ReferralCounts {
    fn record(&mut self, kind: ReferralEventKind) {
        match kind {
            ReferralEventKind::Click => self.clicks += 1,
            ReferralEventKind::Enrollment => self.enrollments += 1,
        }
    }

    /// Enrollments per click, `0.0` when there were no clicks.
    pub fn conversion_rate(&self) -> f64 {
        if self.clicks == 0 {
            0.0
        } else {
            self.enrollments as f64 / self.clicks as f64
        }
    }
}

/// Totals broken down by source, partner and post.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReferralSummary {
    pub totals: ReferralCounts,
    pub by_source: BTreeMap<String, ReferralCounts>,
    pub by_partner: BTreeMap<String, ReferralCounts>,
    pub by_post: BTreeMap<String, ReferralCounts>,
}

impl ReferralSummary {
    /// Partners ranked by enrollments, then clicks, then code.
    pub fn top_partners(&self, limit: usize) -> Vec<(&str, ReferralCounts)> {
        let mut ranked: Vec<(&str, ReferralCounts)> = self
            .by_partner
            .iter()
            .map(|(code, counts)| (code.as_str(), *counts))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.enrollments
                .cmp(&a.1.enrollments)
                .then(b.1.clicks.cmp(&a.1.clicks))
                .then(a.0.cmp(b.0))
        });
        ranked.truncate(limit);
        ranked
    }
}

/// One point of the daily chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub counts: ReferralCounts,
}

pub fn rollup(events: &[ReferralEvent]) -> ReferralSummary {
    let mut summary = ReferralSummary::default();
    for event in events {
        summary.totals.record(event.kind);
        summary
            .by_source
            .entry(event.source.trim().to_ascii_lowercase())
            .or_default()
            .record(event.kind);
        summary
            .by_partner
            .entry(event.partner_code.trim().to_string())
            .or_default()
            .record(event.kind);
        if let Some(post) = event.post_id.as_deref().map(str::trim) {
            if !post.is_empty() {
                summary
                    .by_post
                    .entry(post.to_string())
                    .or_default()
                    .record(event.kind);
            }
        }
    }
    summary
}

/// Per-day counts (UTC) from the first to the last event day, gaps zero-filled.
pub fn daily_series(events: &[ReferralEvent]) -> Vec<DailyCount> {
    let mut per_day: BTreeMap<NaiveDate, ReferralCounts> = BTreeMap::new();
    for event in events {
        per_day
            .entry(event.occurred_at.date_naive())
            .or_default()
            .record(event.kind);
    }

    let (Some(first), Some(last)) = (
        per_day.keys().next().copied(),
        per_day.keys().next_back().copied(),
    ) else {
        return Vec::new();
    };

    let mut series = Vec::new();
    let mut day = first;
    while day <= last {
        series.push(DailyCount {
            date: day,
            counts: per_day.get(&day).copied().unwrap_or_default(),
        });
        day += Duration::days(1);
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event(
        code: &str,
        source: &str,
        post: Option<&str>,
        kind: ReferralEventKind,
        day: u32,
    ) -> ReferralEvent {
        ReferralEvent {
            partner_code: code.to_string(),
            source: source.to_string(),
            post_id: post.map(str::to_string),
            kind,
            occurred_at: Utc.with_ymd_and_hms(2026, 3, day, 10, 30, 0).unwrap(),
        }
    }

    fn sample() -> Vec<ReferralEvent> {
        use ReferralEventKind::{Click, Enrollment};
        vec![
            event("SWM44", "facebook", Some("77"), Click, 1),
            event("SWM44", "Facebook", Some("77"), Click, 1),
            event("SWM44", "facebook", Some("77"), Enrollment, 3),
            event("DIG12", "whatsapp", None, Click, 3),
            event("DIG12", "whatsapp", Some(""), Click, 4),
        ]
    }

    #[test]
    fn test_rollup_totals_and_breakdowns() {
        let summary = rollup(&sample());
        assert_eq!(summary.totals, ReferralCounts { clicks: 4, enrollments: 1 });
        assert_eq!(summary.by_source["facebook"].clicks, 2);
        assert_eq!(summary.by_source["whatsapp"].clicks, 2);
        assert_eq!(summary.by_partner["SWM44"].enrollments, 1);
        assert_eq!(summary.by_post.len(), 1);
        assert_eq!(summary.by_post["77"].clicks, 2);
        assert!((summary.totals.conversion_rate() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_conversion_rate_without_clicks_is_zero() {
        assert_eq!(ReferralCounts::default().conversion_rate(), 0.0);
    }

    #[test]
    fn test_top_partners_ranking() {
        let summary = rollup(&sample());
        let top = summary.top_partners(5);
        assert_eq!(top[0].0, "SWM44");
        assert_eq!(top[1].0, "DIG12");
        assert_eq!(summary.top_partners(1).len(), 1);
    }

    #[test]
    fn test_daily_series_fills_gaps() {
        let series = daily_series(&sample());
        let days: Vec<u32> = series.iter().map(|d| chrono::Datelike::day(&d.date)).collect();
        assert_eq!(days, [1, 2, 3, 4]);
        assert_eq!(series[0].counts.clicks, 2);
        assert_eq!(series[1].counts, ReferralCounts::default());
        assert_eq!(series[2].counts, ReferralCounts { clicks: 1, enrollments: 1 });
    }

    #[test]
    fn test_daily_series_empty() {
        assert!(daily_series(&[]).is_empty());
    }
}
