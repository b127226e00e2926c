//! 一覧の絞り込み・並べ替え

use crate::types::ApplicationRecord;
use chrono::NaiveDate;

/// 一覧の絞り込み条件
///
/// 未指定（`None` または空文字）の条件は無視する。
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    /// 会社名・職種の部分一致（大文字小文字を区別しない）
    pub query: Option<String>,
    /// ステータス完全一致
    pub status: Option<String>,
    /// 応募経路完全一致
    pub platform: Option<String>,
    /// 会社名完全一致（大文字小文字を区別しない）
    pub company: Option<String>,
    /// 応募日の下限（含む）
    pub from: Option<NaiveDate>,
    /// 応募日の上限（含む）
    pub to: Option<NaiveDate>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl ListFilter {
    pub fn matches(&self, app: &ApplicationRecord) -> bool {
        if let Some(status) = non_empty(&self.status) {
            if app.status != status {
                return false;
            }
        }
        if let Some(platform) = non_empty(&self.platform) {
            if app.platform != platform {
                return false;
            }
        }
        if let Some(company) = non_empty(&self.company) {
            if app.company.trim().to_lowercase() != company.to_lowercase() {
                return false;
            }
        }
        if self.from.is_some_and(|from| app.applied_date < from) {
            return false;
        }
        if self.to.is_some_and(|to| app.applied_date > to) {
            return false;
        }
        if let Some(query) = non_empty(&self.query) {
            let haystack = format!("{} {}", app.company, app.role).to_lowercase();
            if !haystack.contains(&query.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// 応募日の新しい順に並べる（同日は登録順を保持）
pub fn sort_by_applied_desc(applications: &[ApplicationRecord]) -> Vec<&ApplicationRecord> {
    let mut sorted: Vec<&ApplicationRecord> = applications.iter().collect();
    sorted.sort_by(|a, b| b.applied_date.cmp(&a.applied_date));
    sorted
}

/// 条件に一致する応募を応募日の新しい順で返す
pub fn filter_applications<'a>(
    applications: &'a [ApplicationRecord],
    filter: &ListFilter,
) -> Vec<&'a ApplicationRecord> {
    sort_by_applied_desc(applications)
        .into_iter()
        .filter(|a| filter.matches(a))
        .collect()
}

/// 直近の応募を最大 `limit` 件
pub fn recent_applications(applications: &[ApplicationRecord], limit: usize) -> Vec<&ApplicationRecord> {
    let mut sorted = sort_by_applied_desc(applications);
    sorted.truncate(limit);
    sorted
}
