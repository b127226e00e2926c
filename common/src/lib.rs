//! Job Tracker Common Library
//!
//! 応募記録の正規化・状態ストア・統計をまとめたコア部分。
//! I/O は注入された `Storage` 経由でのみ行う。

pub mod capture;
pub mod date;
pub mod duplicate;
pub mod error;
pub mod filter;
pub mod id;
pub mod normalizer;
pub mod stats;
pub mod storage;
pub mod store;
pub mod types;

pub use capture::{split_page_title, PageContext};
pub use duplicate::find_duplicate;
pub use error::{Error, Result};
pub use filter::{filter_applications, recent_applications, ListFilter};
pub use normalizer::{normalize_application, ApplicationInput};
pub use stats::{compute_stats, compute_stats_with, Stats};
pub use storage::{MemoryStorage, Storage};
pub use store::{AddOptions, AddOutcome, StateStore, STORAGE_KEY};
pub use types::{
    AppState, ApplicationRecord, Settings, SettingsPatch, MILESTONES, PLATFORMS, STATUSES,
};
