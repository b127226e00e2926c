//! 状態ストア
//!
//! 永続化ドキュメント（設定 + 応募一覧）を所有し、CRUDとインポート/エクスポートを提供する。
//! 各操作は「ドキュメント全体を読む → 計算 → 全体を書き戻す」の1サイクルで完結する。
//! プロセス間の排他はないため、同時に書き込んだ場合は後勝ちになる。

use crate::duplicate::find_duplicate;
use crate::error::{Error, Result};
use crate::id::{new_id, APPLICATION_ID_PREFIX};
use crate::normalizer::{
    ensure_unique_ids, normalize_application, normalize_settings, validate_required,
    ApplicationInput,
};
use crate::storage::Storage;
use crate::types::{AppState, ApplicationRecord, SettingsPatch};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// 保存キー（ドキュメントのバージョンを含む）
pub const STORAGE_KEY: &str = "thousand_applications_v1";

/// 応募追加のオプション
#[derive(Debug, Clone, Copy, Default)]
pub struct AddOptions {
    /// 重複していても追加する
    pub allow_duplicate: bool,
}

/// 応募追加の結果
///
/// 重複で追加しなかった場合は `duplicate` に既存の応募が入り、`added` は `None`。
#[derive(Debug, Clone)]
pub struct AddOutcome {
    pub state: AppState,
    pub duplicate: Option<ApplicationRecord>,
    pub added: Option<ApplicationRecord>,
}

/// 状態ストア
pub struct StateStore<S: Storage> {
    storage: S,
    clock: fn() -> DateTime<Utc>,
}

impl<S: Storage> StateStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, Utc::now)
    }

    /// 現在時刻の取得元を指定して作成
    pub fn with_clock(storage: S, clock: fn() -> DateTime<Utc>) -> Self {
        Self { storage, clock }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    async fn write(&self, state: &AppState) -> Result<()> {
        let value = serde_json::to_value(state)?;
        self.storage.set(STORAGE_KEY, value).await?;
        debug!(applications = state.applications.len(), "状態を保存");
        Ok(())
    }

    /// 現在の状態を読み込む
    ///
    /// 未保存・不正な形式なら既定の状態を作って保存する。
    /// 形式の崩れた応募は正規化して書き戻す。
    pub async fn get_state(&self) -> Result<AppState> {
        let now = self.now();
        let today = now.date_naive();

        let doc = match self.storage.get(STORAGE_KEY).await? {
            Some(Value::Object(doc)) => doc,
            other => {
                if other.is_some() {
                    warn!("保存データがオブジェクトではないため初期化します");
                }
                let state = AppState::with_defaults(today);
                self.write(&state).await?;
                return Ok(state);
            }
        };

        let settings = normalize_settings(doc.get("settings"), today);
        let (applications, healed) = match doc.get("applications") {
            Some(Value::Array(items)) => read_applications(items, now),
            _ => (Vec::new(), false),
        };

        let state = AppState {
            settings,
            applications,
        };
        if healed {
            warn!("形式の崩れた応募データを修復しました");
            self.write(&state).await?;
        }
        Ok(state)
    }

    /// 設定を部分更新
    pub async fn update_settings(&self, patch: SettingsPatch) -> Result<AppState> {
        if patch.goal_number == Some(0) {
            return Err(Error::Validation(
                "目標件数は1以上を指定してください".to_string(),
            ));
        }

        let mut state = self.get_state().await?;
        state.settings.apply(patch);
        self.write(&state).await?;
        Ok(state)
    }

    /// 応募を追加（一覧の先頭に挿入）
    pub async fn add_application(
        &self,
        input: ApplicationInput,
        options: AddOptions,
    ) -> Result<AddOutcome> {
        let mut state = self.get_state().await?;
        let mut candidate = normalize_application(&input, self.now());
        validate_required(&candidate)?;

        if let Some(existing) = find_duplicate(&state.applications, &candidate) {
            if !options.allow_duplicate {
                debug!(duplicate = %existing.id, "重複のため追加しません");
                let duplicate = existing.clone();
                return Ok(AddOutcome {
                    state,
                    duplicate: Some(duplicate),
                    added: None,
                });
            }
        }

        if state.find(&candidate.id).is_some() {
            candidate.id = new_id(APPLICATION_ID_PREFIX);
        }

        state.applications.insert(0, candidate.clone());
        self.write(&state).await?;
        Ok(AddOutcome {
            state,
            duplicate: None,
            added: Some(candidate),
        })
    }

    /// 応募を更新（一覧内の位置と作成日時は保持）
    pub async fn update_application(&self, id: &str, patch: ApplicationInput) -> Result<AppState> {
        let mut state = self.get_state().await?;
        let idx = state
            .applications
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        let existing = &state.applications[idx];
        let merged = ApplicationInput::from_record(existing).merged_with(ApplicationInput {
            id: Some(id.to_string()),
            ..patch
        });

        let mut updated = normalize_application(&merged, self.now());
        updated.created_at = existing.created_at;
        validate_required(&updated)?;

        state.applications[idx] = updated;
        self.write(&state).await?;
        Ok(state)
    }

    /// 応募を削除（存在しないIDは何もしない）
    pub async fn delete_application(&self, id: &str) -> Result<AppState> {
        let mut state = self.get_state().await?;
        state.applications.retain(|a| a.id != id);
        self.write(&state).await?;
        Ok(state)
    }

    /// 状態全体を整形済みJSONで出力
    pub async fn export_document(&self) -> Result<String> {
        let state = self.get_state().await?;
        Ok(serde_json::to_string_pretty(&state)?)
    }

    /// JSONから状態全体を置き換える
    ///
    /// 既存の応募とはマージしない。各応募は正規化し直す。
    pub async fn import_document(&self, text: &str) -> Result<AppState> {
        let parsed: Value = serde_json::from_str(text).map_err(|e| Error::Parse(e.to_string()))?;
        let doc: Map<String, Value> = match parsed {
            Value::Object(doc) => doc,
            _ => return Err(Error::Parse("JSONオブジェクトではありません".to_string())),
        };

        let now = self.now();
        let settings = normalize_settings(doc.get("settings"), now.date_naive());
        let mut applications: Vec<ApplicationRecord> = match doc.get("applications") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| normalize_application(&ApplicationInput::from_value(item), now))
                .collect(),
            _ => Vec::new(),
        };
        ensure_unique_ids(&mut applications);

        let state = AppState {
            settings,
            applications,
        };
        self.write(&state).await?;
        Ok(state)
    }
}

/// 保存済みの応募一覧を読み込む
///
/// 正規化済みのレコードはそのまま使い、崩れたものだけ正規化する。修復があれば `true`。
///
/// 型として読めても、空の選考状況や前後の空白が残っていれば修復対象。
fn read_applications(items: &[Value], now: DateTime<Utc>) -> (Vec<ApplicationRecord>, bool) {
    let mut healed = false;
    let mut applications: Vec<ApplicationRecord> = items
        .iter()
        .map(|item| match serde_json::from_value::<ApplicationRecord>(item.clone()) {
            Ok(record) if !record.id.trim().is_empty() => {
                let mut normalized =
                    normalize_application(&ApplicationInput::from_record(&record), now);
                // 内容が変わらなければ更新日時も据え置く
                normalized.updated_at = record.updated_at;
                if normalized != record {
                    healed = true;
                }
                normalized
            }
            _ => {
                healed = true;
                normalize_application(&ApplicationInput::from_value(item), now)
            }
        })
        .collect();

    if ensure_unique_ids(&mut applications) {
        healed = true;
    }
    (applications, healed)
}
