//! 入力正規化モジュール
//!
//! 任意のJSON入力を境界で一度だけ型付きの値に変換する。
//!
//! ## 処理フロー
//! 1. `ApplicationInput::from_value` でスカラー値を文字列に揃える
//! 2. `normalize_application` で既定値を補い、前後の空白を除去する
//! 3. `validate_required` で会社名・職種の必須チェック

use crate::date;
use crate::error::{Error, Result};
use crate::id::{new_id, APPLICATION_ID_PREFIX};
use crate::types::{ApplicationRecord, Settings, DEFAULT_STATUS};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use std::collections::HashSet;

/// 応募の入力（全項目任意）
///
/// 新規登録・部分更新・インポートの共通入力形式。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationInput {
    pub id: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub applied_date: Option<String>,
    pub url: Option<String>,
    pub location: Option<String>,
    pub platform: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl ApplicationInput {
    /// JSON値から入力を組み立てる
    ///
    /// オブジェクト以外は空の入力として扱う。
    /// `null` / `false` / `0` / `""` は未指定とみなす。
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        let field = |name: &str| coerce_string(obj.get(name));

        Self {
            id: field("id"),
            company: field("company"),
            role: field("role"),
            applied_date: field("appliedDate"),
            url: field("url"),
            location: field("location"),
            platform: field("platform"),
            status: field("status"),
            notes: field("notes"),
            created_at: field("createdAt").and_then(|s| parse_timestamp(&s)),
        }
    }

    /// 既存レコードを入力形式に戻す
    pub fn from_record(record: &ApplicationRecord) -> Self {
        Self {
            id: Some(record.id.clone()),
            company: Some(record.company.clone()),
            role: Some(record.role.clone()),
            applied_date: Some(record.applied_date.format(date::ISO_DATE_FORMAT).to_string()),
            url: Some(record.url.clone()),
            location: Some(record.location.clone()),
            platform: Some(record.platform.clone()),
            status: Some(record.status.clone()),
            notes: Some(record.notes.clone()),
            created_at: Some(record.created_at),
        }
    }

    /// `patch` で指定された項目を上書きした入力を返す
    pub fn merged_with(self, patch: ApplicationInput) -> Self {
        Self {
            id: patch.id.or(self.id),
            company: patch.company.or(self.company),
            role: patch.role.or(self.role),
            applied_date: patch.applied_date.or(self.applied_date),
            url: patch.url.or(self.url),
            location: patch.location.or(self.location),
            platform: patch.platform.or(self.platform),
            status: patch.status.or(self.status),
            notes: patch.notes.or(self.notes),
            created_at: patch.created_at.or(self.created_at),
        }
    }
}

/// JSONスカラーを文字列に変換
fn coerce_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

/// 入力を完全な応募レコードに正規化する
///
/// - `id`: 入力にあれば再利用、なければ生成
/// - `applied_date`: 解析できなければ `now` の日付
/// - `status`: 空なら "Applied"
/// - `created_at`: 入力にあれば保持、なければ `now`
/// - `updated_at`: 常に `now`
pub fn normalize_application(input: &ApplicationInput, now: DateTime<Utc>) -> ApplicationRecord {
    let id = input
        .id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| new_id(APPLICATION_ID_PREFIX));

    let applied_date = date::normalize_or(
        input.applied_date.as_deref().unwrap_or_default(),
        now.date_naive(),
    );

    let status = match trimmed(&input.status) {
        s if s.is_empty() => DEFAULT_STATUS.to_string(),
        s => s,
    };

    ApplicationRecord {
        id,
        company: trimmed(&input.company),
        role: trimmed(&input.role),
        applied_date,
        url: trimmed(&input.url),
        location: trimmed(&input.location),
        platform: trimmed(&input.platform),
        status,
        notes: trimmed(&input.notes),
        created_at: input.created_at.unwrap_or(now),
        updated_at: now,
    }
}

/// 会社名・職種の必須チェック
pub fn validate_required(record: &ApplicationRecord) -> Result<()> {
    if record.company.is_empty() {
        return Err(Error::Validation("会社名は必須です".to_string()));
    }
    if record.role.is_empty() {
        return Err(Error::Validation("職種は必須です".to_string()));
    }
    Ok(())
}

/// 重複したIDに新しいIDを振り直す
///
/// 先に出現したレコードがIDを保持する。振り直しがあれば `true`。
pub fn ensure_unique_ids(applications: &mut [ApplicationRecord]) -> bool {
    let mut seen = HashSet::new();
    let mut changed = false;

    for app in applications.iter_mut() {
        while !seen.insert(app.id.clone()) {
            app.id = new_id(APPLICATION_ID_PREFIX);
            changed = true;
        }
    }

    changed
}

/// 保存済みの設定を既定値の上にマージする
///
/// 型が合わない項目は既定値のまま。
pub fn normalize_settings(raw: Option<&Value>, today: NaiveDate) -> Settings {
    let mut settings = Settings::defaults(today);
    let Some(obj) = raw.and_then(Value::as_object) else {
        return settings;
    };

    if let Some(goal) = obj.get("goalNumber").and_then(parse_goal) {
        settings.goal_number = goal;
    }
    if let Some(start) = obj
        .get("startDate")
        .and_then(Value::as_str)
        .and_then(date::parse_date)
    {
        settings.start_date = start;
    }
    if let Some(theme) = obj
        .get("theme")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        settings.theme = theme.to_string();
    }

    settings
}

/// 目標件数を解析（正の有限数のみ）
fn parse_goal(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !n.is_finite() || n < 1.0 {
        return None;
    }
    Some(n.min(f64::from(u32::MAX)) as u32)
}
