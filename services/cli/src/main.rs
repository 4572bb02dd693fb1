mod cli;
mod render;

use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use serde_json::json;

use atelier_client::{ResourceClient, ResourceSource};
use atelier_common::error::{AtelierError, AtelierResult};
use atelier_config::{init_tracing, AppConfig};
use atelier_metrics::{
    aggregate_by_week, count_by_status, current_work_week, page_count, parse_week_count,
    tasks_in_window,
};
use atelier_state::loaders;
use atelier_state::{load_all, Action, AppState, Effect, PreferenceFile, Store};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing("info");
    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load config");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(base_url = %config.api.base_url, "config loaded");

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

/// Fetch failures are reported inside the rendered view; only configuration,
/// preference storage and output errors surface here.
async fn run(cli: Cli, config: AppConfig) -> AtelierResult<()> {
    let prefs_file = PreferenceFile::new(&config.preferences_path);
    let preferences = prefs_file.load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable preferences");
        Default::default()
    });
    let store = Store::with_preferences(preferences);

    if let Commands::Prefs {
        theme,
        toggle_theme,
        locale,
    } = cli.command
    {
        let mut actions = Vec::new();
        if let Some(theme) = theme {
            actions.push(Action::SetTheme(theme));
        }
        if toggle_theme {
            actions.push(Action::ToggleTheme);
        }
        if let Some(locale) = locale {
            actions.push(Action::SetLocale(locale));
        }
        for action in actions {
            if store.dispatch(action) == Effect::PersistPreferences {
                prefs_file.save(&store.snapshot().preferences)?;
            }
        }
        let prefs = store.snapshot().preferences;
        if cli.json {
            print_json(&prefs)?;
        } else {
            println!("{}", render::preferences(&prefs));
        }
        return Ok(());
    }

    let client = ResourceClient::new(config.api.clone())
        .map_err(|e| AtelierError::Config(format!("cannot build HTTP client: {e}")))?;
    let source: &dyn ResourceSource = &client;

    match cli.command {
        Commands::Designers { page, sort, filter } => {
            store.dispatch(Action::SetPage(page));
            store.dispatch(Action::SetSortBy(sort));
            store.dispatch(Action::SetStatusFilter(filter));
            let _ = loaders::load_designers(&store, source).await;
            show_designers(&store.snapshot(), &config, cli.json)
        }
        Commands::Top { sort, limit } => {
            store.dispatch(Action::SortTopDesigners(sort));
            let _ = loaders::load_top_designers(&store, source, limit).await;
            show_top_designers(&store.snapshot(), cli.json)
        }
        Commands::Comments { limit } => {
            let _ = loaders::load_comments(&store, source, limit).await;
            show_comments(&store.snapshot(), cli.json)
        }
        Commands::Tasks { weeks } => {
            store.dispatch(Action::SetWeekCount(parse_week_count(&weeks)));
            let _ = loaders::load_tasks(&store, source).await;
            show_tasks(&store.snapshot(), cli.json)
        }
        Commands::Overview { weeks } => {
            store.dispatch(Action::SetWeekCount(parse_week_count(&weeks)));
            load_all(&store, source).await;
            let state = store.snapshot();
            if cli.json {
                return print_json(&state);
            }
            println!("Work week {}\n", current_work_week(Utc::now()));
            show_top_designers(&state, false)?;
            show_tasks(&state, false)?;
            show_comments(&state, false)?;
            show_designers(&state, &config, false)
        }
        Commands::Prefs { .. } => Ok(()),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> AtelierResult<()> {
    let body = serde_json::to_string_pretty(value)
        .map_err(|e| AtelierError::Internal(format!("serialize output: {e}")))?;
    println!("{body}");
    Ok(())
}

fn show_designers(state: &AppState, config: &AppConfig, as_json: bool) -> AtelierResult<()> {
    let view = &state.designers;
    let pages = page_count(view.total, config.designer_page_size);
    let visible = view.visible();

    if as_json {
        return print_json(&json!({
            "page": view.list.page,
            "page_count": pages,
            "ordering": view.list.sort_by.to_string(),
            "status": view.page.status.as_str(),
            "error": view.page.error,
            "designers": visible,
        }));
    }
    if let Some(msg) = render::failure("designers", &view.page) {
        println!("{msg}");
        return Ok(());
    }
    println!("{}", render::designers(&visible));
    println!(
        "Page {} of {}{}{}",
        view.list.page,
        pages,
        if view.list.can_go_back() { "  [prev]" } else { "" },
        if view.list.can_go_forward(pages) { "  [next]" } else { "" },
    );
    Ok(())
}

fn show_top_designers(state: &AppState, as_json: bool) -> AtelierResult<()> {
    let view = &state.top_designers;
    if as_json {
        return print_json(view);
    }
    if let Some(msg) = render::failure("top designers", &view.designers) {
        println!("{msg}");
        return Ok(());
    }
    println!("Top designers by {}", view.sort.as_str());
    println!("{}", render::top_designers(&view.designers.data));
    Ok(())
}

fn show_comments(state: &AppState, as_json: bool) -> AtelierResult<()> {
    let view = &state.comments;
    if as_json {
        return print_json(&view.comments);
    }
    if let Some(msg) = render::failure("comments", &view.comments) {
        println!("{msg}");
        return Ok(());
    }
    println!("Latest comments");
    println!("{}", render::comments(&view.comments.data));
    Ok(())
}

fn show_tasks(state: &AppState, as_json: bool) -> AtelierResult<()> {
    let view = &state.tasks;
    let now = Utc::now();
    let buckets = aggregate_by_week(&view.tasks.data, view.week_count, now);
    let statuses = count_by_status(tasks_in_window(&view.tasks.data, view.week_count, now));

    if as_json {
        return print_json(&json!({
            "week_count": view.week_count,
            "status": view.tasks.status.as_str(),
            "error": view.tasks.error,
            "weeks": buckets,
            "status_distribution": statuses,
        }));
    }
    if let Some(msg) = render::failure("tasks", &view.tasks) {
        println!("{msg}");
        return Ok(());
    }
    println!("{}", render::weekly(&buckets));
    println!("{}", render::status_distribution(&statuses));
    Ok(())
}
