//! 閲覧中ページからの入力補完
//!
//! ホスト環境が返すページ情報（タイトル・URL）から新規応募の初期値を作る。

use crate::normalizer::ApplicationInput;
use serde::{Deserialize, Serialize};

/// ホストから取得したページ情報
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageContext {
    pub title: String,
    pub url: String,
}

/// ページタイトルを (職種, 会社名) に分割する
///
/// 求人ページのタイトルは "職種 - 会社名" の形が多いため、
/// " - " で区切って先頭を職種、末尾を会社名とする。
/// 区切りがなければタイトル全体を職種とする。
pub fn split_page_title(title: &str) -> (Option<String>, Option<String>) {
    let parts: Vec<&str> = title
        .split(" - ")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    match parts.as_slice() {
        [] => (None, None),
        [only] => (Some(only.to_string()), None),
        [first, .., last] => (Some(first.to_string()), Some(last.to_string())),
    }
}

impl PageContext {
    /// 新規応募の入力に変換
    pub fn to_input(&self) -> ApplicationInput {
        let (role, company) = split_page_title(&self.title);
        let url = Some(self.url.trim().to_string()).filter(|u| !u.is_empty());

        ApplicationInput {
            role,
            company,
            url,
            ..Default::default()
        }
    }
}
