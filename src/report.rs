//! 端末表示用の整形

use job_tracker_common::{ApplicationRecord, Settings, Stats};

const BAR_WIDTH: usize = 20;

/// "12 / 1000 (1%)"
pub fn format_progress(stats: &Stats) -> String {
    format!("{} / {} ({}%)", stats.total, stats.goal, stats.percent)
}

/// 達成率のバー表示
pub fn progress_bar(percent: u32) -> String {
    let filled = (percent.min(100) as usize * BAR_WIDTH + 50) / 100;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// 一覧の1行
pub fn format_row(app: &ApplicationRecord) -> String {
    let mut row = format!(
        "{}  {:<12}  {} — {}",
        app.applied_date, app.status, app.company, app.role
    );
    if !app.platform.is_empty() {
        row.push_str(&format!("  [{}]", app.platform));
    }
    row
}

/// 1件の詳細表示
pub fn format_detail(app: &ApplicationRecord) -> Vec<String> {
    let mut lines = vec![
        format!("  ID: {}", app.id),
        format!("  会社名: {}", app.company),
        format!("  職種: {}", app.role),
        format!("  応募日: {}", app.applied_date),
        format!("  状況: {}", app.status),
    ];
    let optional = [
        ("応募経路", &app.platform),
        ("勤務地", &app.location),
        ("URL", &app.url),
        ("メモ", &app.notes),
    ];
    for (label, value) in optional {
        if !value.is_empty() {
            lines.push(format!("  {}: {}", label, value));
        }
    }
    lines
}

pub fn print_stats(stats: &Stats) {
    println!("進捗: {}", format_progress(stats));
    println!("  {}", progress_bar(stats.percent));
    println!("連続日数: {}日", stats.streak);
    println!("今週の応募: {}件 ({}〜)", stats.applied_this_week, stats.week_start);
    if let Some(message) = stats.milestone_message() {
        println!("{}", message);
    }
}

pub fn print_settings(settings: &Settings) {
    println!("設定:");
    println!("  目標件数: {}", settings.goal_number);
    println!("  開始日: {}", settings.start_date);
    println!("  テーマ: {}", settings.theme);
}
