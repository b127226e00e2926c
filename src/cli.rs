use chrono::NaiveDate;
use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use job_tracker_common::{date, ApplicationInput, ListFilter, STATUSES};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "job-tracker")]
#[command(about = "求職応募トラッカー（記録・統計・インポート/エクスポート）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 保存ファイル（省略時は設定ファイル/既定の場所）
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 応募を記録
    Add {
        #[command(flatten)]
        record: RecordArgs,

        /// ページタイトル（"職種 - 会社名" を分解して補完）
        #[arg(long)]
        title: Option<String>,

        /// 重複していても記録する
        #[arg(long)]
        allow_duplicate: bool,
    },

    /// 応募を編集
    Edit {
        /// 応募ID
        #[arg(required = true)]
        id: String,

        #[command(flatten)]
        record: RecordArgs,
    },

    /// 応募を削除
    Delete {
        /// 応募ID
        #[arg(required = true)]
        id: String,

        /// 確認せずに削除
        #[arg(short, long)]
        yes: bool,
    },

    /// 応募一覧（応募日の新しい順）
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// 表示件数の上限
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 直近の応募
    Recent {
        /// 表示件数（省略時は設定値）
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// 進捗統計を表示
    Stats {
        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 目標・表示設定を表示/編集
    Settings {
        /// 目標応募件数
        #[arg(long)]
        goal: Option<u32>,

        /// 開始日
        #[arg(long, value_parser = parse_date_arg)]
        start_date: Option<NaiveDate>,

        /// 表示テーマ
        #[arg(long)]
        theme: Option<Theme>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// 全データをJSONでエクスポート
    Export {
        /// 出力ファイル
        #[arg(short, long, default_value = "job-applications-backup.json")]
        output: PathBuf,

        /// 標準出力に書き出す
        #[arg(long)]
        stdout: bool,
    },

    /// JSONからインポート（既存データは置き換え）
    Import {
        /// 入力JSONファイル
        #[arg(required = true)]
        input: PathBuf,
    },

    /// ツール設定を表示/編集
    Config {
        /// 保存ファイルを設定
        #[arg(long)]
        set_data_file: Option<PathBuf>,

        /// 応募経路の既定値を設定（空文字で解除）
        #[arg(long)]
        set_default_platform: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 応募の各項目
#[derive(Args, Debug, Clone, Default)]
pub struct RecordArgs {
    /// 会社名
    #[arg(short, long)]
    pub company: Option<String>,

    /// 職種
    #[arg(short, long)]
    pub role: Option<String>,

    /// 応募日（YYYY-MM-DD、省略時は今日）
    #[arg(short, long)]
    pub date: Option<String>,

    /// 求人URL
    #[arg(short, long)]
    pub url: Option<String>,

    /// 勤務地
    #[arg(short, long)]
    pub location: Option<String>,

    /// 応募経路 (LinkedIn/Indeed/Company Site/Referral/Other)
    #[arg(short, long)]
    pub platform: Option<String>,

    /// 選考状況
    #[arg(short, long, value_parser = PossibleValuesParser::new(STATUSES.iter().copied()))]
    pub status: Option<String>,

    /// メモ
    #[arg(short = 'm', long)]
    pub notes: Option<String>,
}

impl RecordArgs {
    pub fn is_empty(&self) -> bool {
        self.to_input() == ApplicationInput::default()
    }

    pub fn to_input(&self) -> ApplicationInput {
        ApplicationInput {
            company: self.company.clone(),
            role: self.role.clone(),
            applied_date: self.date.clone(),
            url: self.url.clone(),
            location: self.location.clone(),
            platform: self.platform.clone(),
            status: self.status.clone(),
            notes: self.notes.clone(),
            ..Default::default()
        }
    }
}

/// 一覧の絞り込み条件
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// 会社名・職種で検索
    #[arg(short, long)]
    pub query: Option<String>,

    /// ステータス
    #[arg(long)]
    pub status: Option<String>,

    /// 応募経路
    #[arg(long)]
    pub platform: Option<String>,

    /// 会社名（完全一致）
    #[arg(long)]
    pub company: Option<String>,

    /// 応募日の下限
    #[arg(long, value_parser = parse_date_arg)]
    pub from: Option<NaiveDate>,

    /// 応募日の上限
    #[arg(long, value_parser = parse_date_arg)]
    pub to: Option<NaiveDate>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> ListFilter {
        ListFilter {
            query: self.query.clone(),
            status: self.status.clone(),
            platform: self.platform.clone(),
            company: self.company.clone(),
            from: self.from,
            to: self.to,
        }
    }
}

/// 表示テーマ
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

/// 日付引数（解析できなければエラー）
fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    date::parse_date(s).ok_or_else(|| format!("日付として解釈できません: {}. YYYY-MM-DD で指定してください", s))
}
