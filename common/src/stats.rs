//! 進捗統計
//!
//! 保存状態から目標達成率・連続日数・今週の件数・マイルストーンを算出する。
//! 副作用のない純粋関数のみ。

use crate::date::{is_consecutive_day, start_of_week};
use crate::types::{AppState, DEFAULT_GOAL, MILESTONES};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 統計情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// 目標件数
    pub goal: u32,
    /// 応募総数
    pub total: usize,
    /// 達成率（0〜100）
    pub percent: u32,
    /// 最新の応募日から遡った連続日数
    pub streak: usize,
    /// 今週（月曜始まり）の応募数
    pub applied_this_week: usize,
    /// 今週の開始日
    pub week_start: NaiveDate,
    /// 次のマイルストーン
    pub next_milestone: Option<u32>,
    /// ちょうど到達したマイルストーン
    pub hit_milestone: Option<u32>,
}

impl Stats {
    /// マイルストーン表示用のメッセージ
    pub fn milestone_message(&self) -> Option<String> {
        match (self.hit_milestone, self.next_milestone) {
            (Some(hit), _) => Some(format!("🎉 マイルストーン達成: {}件！", hit)),
            (None, Some(next)) => Some(format!("次の目標: {}件", next)),
            (None, None) => None,
        }
    }
}

/// 既定のマイルストーンで統計を算出
pub fn compute_stats(state: &AppState, today: NaiveDate) -> Stats {
    compute_stats_with(state, today, MILESTONES)
}

/// マイルストーン一覧（昇順）を指定して統計を算出
pub fn compute_stats_with(state: &AppState, today: NaiveDate, milestones: &[u32]) -> Stats {
    let goal = match state.settings.goal_number {
        0 => DEFAULT_GOAL,
        n => n,
    };
    let total = state.applications.len();

    let dates: BTreeSet<NaiveDate> = state.applications.iter().map(|a| a.applied_date).collect();
    let streak = count_streak(&dates);

    let week_start = start_of_week(today);
    let applied_this_week = state
        .applications
        .iter()
        .filter(|a| a.applied_date >= week_start)
        .count();

    let total_u64 = total as u64;
    let next_milestone = milestones.iter().copied().find(|&m| total_u64 < u64::from(m));
    let hit_milestone = milestones
        .iter()
        .copied()
        .find(|&m| total_u64 == u64::from(m));

    Stats {
        goal,
        total,
        percent: percent_of(total, goal),
        streak,
        applied_this_week,
        week_start,
        next_milestone,
        hit_milestone,
    }
}

/// 達成率（四捨五入、100で頭打ち）
fn percent_of(total: usize, goal: u32) -> u32 {
    if goal == 0 {
        return 0;
    }
    let ratio = (total as f64 / f64::from(goal)).min(1.0);
    (ratio * 100.0).round() as u32
}

/// 最新日から遡り、最初の空白日までの連続日数
fn count_streak(dates: &BTreeSet<NaiveDate>) -> usize {
    let mut streak = 0;
    let mut prev: Option<NaiveDate> = None;

    for &date in dates.iter().rev() {
        match prev {
            None => streak = 1,
            Some(later) if is_consecutive_day(later, date) => streak += 1,
            Some(_) => break,
        }
        prev = Some(date);
    }

    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::{normalize_application, ApplicationInput};
    use chrono::Utc;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state_with_dates(dates: &[&str]) -> AppState {
        let mut state = AppState::with_defaults(ymd(2024, 1, 1));
        for (i, date) in dates.iter().enumerate() {
            state.applications.push(normalize_application(
                &ApplicationInput {
                    company: Some(format!("Company {}", i)),
                    role: Some("Engineer".to_string()),
                    applied_date: Some(date.to_string()),
                    ..Default::default()
                },
                Utc::now(),
            ));
        }
        state
    }

    fn state_with_total(total: usize) -> AppState {
        let dates: Vec<&str> = std::iter::repeat("2024-01-01").take(total).collect();
        state_with_dates(&dates)
    }

    #[test]
    fn test_empty_state() {
        let stats = compute_stats(&state_with_dates(&[]), ymd(2024, 1, 10));
        assert_eq!(stats.goal, 1000);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.percent, 0);
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.applied_this_week, 0);
        assert_eq!(stats.next_milestone, Some(10));
        assert_eq!(stats.hit_milestone, None);
    }

    #[test]
    fn test_streak_consecutive_days() {
        let state = state_with_dates(&["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(compute_stats(&state, ymd(2024, 1, 3)).streak, 3);
    }

    #[test]
    fn test_streak_stops_at_first_gap() {
        // 最新日 01-05 の前日 01-04 がないので 1
        let state = state_with_dates(&["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-05"]);
        assert_eq!(compute_stats(&state, ymd(2024, 1, 5)).streak, 1);
    }

    #[test]
    fn test_streak_ignores_same_day_repeats_and_order() {
        let state = state_with_dates(&["2024-01-03", "2024-01-01", "2024-01-03", "2024-01-02"]);
        assert_eq!(compute_stats(&state, ymd(2024, 1, 3)).streak, 3);
    }

    #[test]
    fn test_streak_across_month_boundary() {
        let state = state_with_dates(&["2024-02-28", "2024-02-29", "2024-03-01"]);
        assert_eq!(compute_stats(&state, ymd(2024, 3, 1)).streak, 3);
    }

    #[test]
    fn test_percent_clamped() {
        let mut state = state_with_total(30);
        state.settings.goal_number = 10;
        assert_eq!(compute_stats(&state, ymd(2024, 1, 1)).percent, 100);

        state.settings.goal_number = 1000;
        assert_eq!(compute_stats(&state, ymd(2024, 1, 1)).percent, 3);
    }

    #[test]
    fn test_percent_rounding() {
        let mut state = state_with_total(1);
        state.settings.goal_number = 3;
        // 33.3% → 33
        assert_eq!(compute_stats(&state, ymd(2024, 1, 1)).percent, 33);

        let mut state = state_with_total(2);
        state.settings.goal_number = 3;
        // 66.7% → 67
        assert_eq!(compute_stats(&state, ymd(2024, 1, 1)).percent, 67);
    }

    #[test]
    fn test_zero_goal_falls_back_to_default() {
        let mut state = state_with_total(20);
        state.settings.goal_number = 0;
        let stats = compute_stats(&state, ymd(2024, 1, 1));
        assert_eq!(stats.goal, DEFAULT_GOAL);
        assert_eq!(stats.percent, 2);
    }

    #[test]
    fn test_applied_this_week() {
        // 2024-01-10 は水曜日。週の開始は 2024-01-08（月）
        let state = state_with_dates(&["2024-01-07", "2024-01-08", "2024-01-09", "2024-01-10"]);
        let stats = compute_stats(&state, ymd(2024, 1, 10));
        assert_eq!(stats.week_start, ymd(2024, 1, 8));
        assert_eq!(stats.applied_this_week, 3);
    }

    #[test]
    fn test_milestones_custom_list() {
        let milestones = [10, 25, 50];
        let today = ymd(2024, 1, 1);

        let stats = compute_stats_with(&state_with_total(10), today, &milestones);
        assert_eq!(stats.hit_milestone, Some(10));
        assert_eq!(stats.next_milestone, Some(25));

        let stats = compute_stats_with(&state_with_total(9), today, &milestones);
        assert_eq!(stats.hit_milestone, None);
        assert_eq!(stats.next_milestone, Some(10));

        let stats = compute_stats_with(&state_with_total(50), today, &milestones);
        assert_eq!(stats.hit_milestone, Some(50));
        assert_eq!(stats.next_milestone, None);
    }

    #[test]
    fn test_milestone_message() {
        let today = ymd(2024, 1, 1);
        let hit = compute_stats(&state_with_total(25), today);
        assert_eq!(
            hit.milestone_message().as_deref(),
            Some("🎉 マイルストーン達成: 25件！")
        );

        let next = compute_stats(&state_with_total(26), today);
        assert_eq!(next.milestone_message().as_deref(), Some("次の目標: 50件"));
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let stats = compute_stats(&state_with_total(1), ymd(2024, 1, 1));
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"appliedThisWeek\":1"));
        assert!(json.contains("\"nextMilestone\":10"));
        assert!(json.contains("\"hitMilestone\":null"));
    }
}
