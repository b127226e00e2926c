//! 重複応募の検出
//!
//! 件数は数百〜数千件程度を想定しているため、インデックスは持たず線形走査する。
//! 同条件で複数一致した場合は一覧の先頭側を返す。

use crate::types::ApplicationRecord;
use chrono::NaiveDate;

/// 既存の応募から `candidate` と重複するものを探す
///
/// 1. URLが空でなければ、URLが一致する最初の応募
/// 2. 見つからなければ、(会社名, 職種, 応募日) が一致する最初の応募
///    （会社名・職種は前後空白を除き大文字小文字を区別しない）
pub fn find_duplicate<'a>(
    applications: &'a [ApplicationRecord],
    candidate: &ApplicationRecord,
) -> Option<&'a ApplicationRecord> {
    let url = candidate.url.trim();
    if !url.is_empty() {
        if let Some(existing) = applications.iter().find(|a| a.url.trim() == url) {
            return Some(existing);
        }
    }

    let key = duplicate_key(candidate);
    applications.iter().find(|a| duplicate_key(a) == key)
}

fn duplicate_key(record: &ApplicationRecord) -> (String, String, NaiveDate) {
    (
        record.company.trim().to_lowercase(),
        record.role.trim().to_lowercase(),
        record.applied_date,
    )
}
