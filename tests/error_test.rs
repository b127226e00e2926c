//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use job_tracker::error::TrackerError;
use job_tracker_common::Error;

/// TrackerErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        TrackerError::Config("テスト設定エラー".to_string()),
        TrackerError::FileNotFound("backup.json".to_string()),
        TrackerError::InvalidInput("項目なし".to_string()),
        TrackerError::Cancelled,
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: TrackerError = io_err.into();

    assert!(matches!(err, TrackerError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: TrackerError = json_err.into();

    assert!(matches!(err, TrackerError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_transparent() {
    let err: TrackerError = Error::Validation("会社名は必須です".to_string()).into();

    assert!(matches!(err, TrackerError::Common(Error::Validation(_))));
    assert_eq!(format!("{}", err), "入力エラー: 会社名は必須です");
}

/// 見つからないIDのメッセージ
#[test]
fn test_not_found_message() {
    let err: TrackerError = Error::NotFound("app_42".to_string()).into();
    let display = format!("{}", err);

    assert!(display.contains("app_42"));
}
