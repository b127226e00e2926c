//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 必須項目（会社名・職種など）が空
    #[error("入力エラー: {0}")]
    Validation(String),

    /// 指定IDの応募が存在しない
    #[error("応募が見つかりません: {0}")]
    NotFound(String),

    /// インポートデータが解析できない
    #[error("インポートデータの解析に失敗: {0}")]
    Parse(String),

    /// ストレージ読み書きエラー
    #[error("ストレージエラー: {0}")]
    Storage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
