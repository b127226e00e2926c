use clap::Parser;
use dialoguer::Confirm;
use job_tracker::{cli, config, error, logging, report, storage};
use job_tracker_common::{
    compute_stats, date, filter_applications, recent_applications, AddOptions, PageContext,
    SettingsPatch, StateStore,
};
use cli::{Cli, Commands};
use config::Config;
use error::{Result, TrackerError};
use storage::JsonFileStorage;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let mut config = Config::load()?;
    let data_file = config.resolve_data_file(cli.data_file.as_deref())?;
    tracing::debug!(path = %data_file.display(), "保存ファイル");
    let store = StateStore::new(JsonFileStorage::new(&data_file));

    match cli.command {
        Commands::Add { record, title, allow_duplicate } => {
            let mut input = match title {
                Some(title) => PageContext {
                    title,
                    url: record.url.clone().unwrap_or_default(),
                }
                .to_input()
                .merged_with(record.to_input()),
                None => record.to_input(),
            };
            if input.platform.is_none() {
                input.platform = config.default_platform.clone();
            }

            let outcome = store
                .add_application(input, AddOptions { allow_duplicate })
                .await?;

            if let Some(duplicate) = outcome.duplicate {
                println!("⚠ 重複を検出しました（同じURL、または同じ会社名・職種・応募日）");
                println!("  {}", report::format_row(&duplicate));
                println!("  記録する場合は --allow-duplicate を指定してください");
                return Ok(());
            }

            if let Some(added) = outcome.added {
                println!("✔ 記録しました: {}", added.id);
                println!("  {}", report::format_row(&added));
            }
            println!();
            report::print_stats(&compute_stats(&outcome.state, date::today()));
        }

        Commands::Edit { id, record } => {
            if record.is_empty() {
                return Err(TrackerError::InvalidInput(
                    "更新する項目を指定してください".into(),
                ));
            }

            let state = store.update_application(&id, record.to_input()).await?;
            println!("✔ 更新しました: {}", id);
            if let Some(app) = state.find(&id) {
                for line in report::format_detail(app) {
                    println!("{}", line);
                }
            }
        }

        Commands::Delete { id, yes } => {
            let state = store.get_state().await?;
            let Some(app) = state.find(&id) else {
                println!("該当する応募がありません: {}", id);
                return Ok(());
            };

            if !yes {
                println!("  {}", report::format_row(app));
                let confirmed = Confirm::new()
                    .with_prompt("この応募を削除しますか？")
                    .default(false)
                    .interact()?;
                if !confirmed {
                    return Err(TrackerError::Cancelled);
                }
            }

            let state = store.delete_application(&id).await?;
            println!("✔ 削除しました（残り {}件）", state.applications.len());
        }

        Commands::List { filter, limit, json } => {
            let state = store.get_state().await?;
            let mut shown = filter_applications(&state.applications, &filter.to_filter());
            let matched = shown.len();
            if let Some(limit) = limit {
                shown.truncate(limit);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else {
                for app in &shown {
                    println!("{}  {}", report::format_row(app), app.id);
                }
                println!("---");
                println!("{}件表示 • 該当{}件 • 全{}件", shown.len(), matched, state.applications.len());
            }
        }

        Commands::Recent { limit } => {
            let state = store.get_state().await?;
            let recent = recent_applications(&state.applications, limit.unwrap_or(config.recent_limit));

            if recent.is_empty() {
                println!("まだ応募がありません。今日の1件を記録しましょう。");
            }
            for app in recent {
                println!("{}", report::format_row(app));
            }
        }

        Commands::Stats { json } => {
            let state = store.get_state().await?;
            let stats = compute_stats(&state, date::today());

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                report::print_stats(&stats);
            }
        }

        Commands::Settings { goal, start_date, theme, show } => {
            let patch = SettingsPatch {
                goal_number: goal,
                start_date,
                theme: theme.map(|t| t.as_str().to_string()),
            };

            let changed = !patch.is_empty();
            let state = if !changed {
                store.get_state().await?
            } else {
                let state = store.update_settings(patch).await?;
                println!("✔ 設定を保存しました");
                state
            };

            if show || !changed {
                report::print_settings(&state.settings);
            }
        }

        Commands::Export { output, stdout } => {
            let json = store.export_document().await?;

            if stdout {
                println!("{}", json);
            } else {
                if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&output, json)?;
                println!("✔ エクスポートしました: {}", output.display());
            }
        }

        Commands::Import { input } => {
            if !input.exists() {
                return Err(TrackerError::FileNotFound(input.display().to_string()));
            }

            let text = std::fs::read_to_string(&input)?;
            let state = store.import_document(&text).await?;
            println!("✔ インポートしました: {}件", state.applications.len());
        }

        Commands::Config { set_data_file, set_default_platform, show } => {
            if let Some(path) = set_data_file {
                config.set_data_file(path)?;
                println!("✔ 保存ファイルを設定しました");
            }

            if let Some(platform) = set_default_platform {
                config.set_default_platform(platform)?;
                println!("✔ 応募経路の既定値を設定しました");
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!("  保存ファイル: {}", store.storage().path().display());
                println!(
                    "  応募経路の既定値: {}",
                    config.default_platform.as_deref().unwrap_or("未設定")
                );
                println!("  直近の表示件数: {}", config.recent_limit);
            }
        }
    }

    Ok(())
}
