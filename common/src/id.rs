//! ID生成

use uuid::Uuid;

/// 応募レコードのIDプレフィックス
pub const APPLICATION_ID_PREFIX: &str = "app";

/// `{prefix}_{uuid}` 形式の一意なIDを生成
pub fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}
