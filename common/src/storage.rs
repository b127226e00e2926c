//! キー・バリュー型ストレージの抽象
//!
//! 保存ドキュメントはキー単位で丸ごと読み書きする。部分更新はない。

use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// ホスト環境が提供するストレージ
#[allow(async_fn_in_trait)]
pub trait Storage {
    /// キーに対応する値を読み込む（未保存なら `None`）
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// キーに値を書き込む（既存の値は置き換える）
    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// メモリ上のストレージ
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値を入れた状態で作成
    pub fn with_entry(key: &str, value: Value) -> Self {
        let storage = Self::default();
        if let Ok(mut entries) = storage.entries.lock() {
            entries.insert(key.to_string(), value);
        }
        storage
    }

    /// 保存されている値のコピー
    pub fn snapshot(&self, key: &str) -> Option<Value> {
        self.entries.lock().ok()?.get(key).cloned()
    }
}

impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| Error::Storage(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| Error::Storage(e.to_string()))?;
        entries.insert(key.to_string(), value);
        Ok(())
    }
}
