use std::{fs, path::PathBuf};

use finboard_config::{Config, ConfigManager};
use finboard_core::parse_category_filter;
use finboard_domain::{CategoryFilter, ReportFilter, TransactionQuery};
use tracing::debug;

use super::{
    output::Palette, render::Renderer, suggest::suggest_category, Cli, Commands, ConfigCommands,
    ReportArgs, TransactionArgs,
};
use crate::{
    errors::FinboardError,
    services::{ReportService, ServiceResult},
    storage::{DatasetFile, InMemoryStore},
};

/// Executes one parsed command against the configuration found via `FINBOARD_HOME`.
pub fn run(cli: Cli) -> ServiceResult<()> {
    let manager = ConfigManager::from_env()?;
    run_with(cli, &manager)
}

pub fn run_with(cli: Cli, manager: &ConfigManager) -> ServiceResult<()> {
    let config = manager.load()?;
    match cli.command {
        Commands::Report(args) => report(args, manager, config),
        Commands::Transactions(args) => transactions(args, manager, config),
        Commands::Config(command) => configure(command, manager, config),
    }
}

fn report(args: ReportArgs, manager: &ConfigManager, config: Config) -> ServiceResult<()> {
    let category = parse_category_filter(&args.category)?;
    let filter = ReportFilter::new(args.from, args.to)
        .with_category(category)
        .with_flow(args.flow);
    let mut options = config.engine_options();
    if let Some(bucket) = args.bucket {
        options = options.with_bucketing(bucket);
    }

    let store = open_dataset(args.data, manager, &config)?;
    let outcome = ReportService::build(&store, &store, &filter, &options)?;
    let palette = Palette::from_preference(config.ui_color_enabled && !args.json);
    let hint = category_hint(&filter.category, &store);

    if args.json {
        if let Some(hint) = hint {
            eprintln!("{hint}");
        }
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    if let Some(hint) = hint {
        println!("{}", palette.hint(hint));
    }
    let renderer = Renderer::new(&config, palette).with_fill_gaps(args.fill_gaps);
    println!("{}", renderer.outcome(&outcome));
    Ok(())
}

fn transactions(args: TransactionArgs, manager: &ConfigManager, config: Config) -> ServiceResult<()> {
    let mut query = TransactionQuery::new(
        args.page,
        args.page_size.unwrap_or(config.default_page_size),
    );
    query.start = args.from;
    query.end = args.to;
    query.flow = args.flow;
    query.category = args
        .category
        .as_deref()
        .map(parse_category_filter)
        .transpose()?;

    let store = open_dataset(args.data, manager, &config)?;
    let listing = ReportService::page(&store, &query)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    let palette = Palette::from_preference(config.ui_color_enabled);
    if let Some(category) = &query.category {
        if let Some(hint) = category_hint(category, &store) {
            println!("{}", palette.hint(hint));
        }
    }
    println!("{}", Renderer::new(&config, palette).listing(&listing));
    Ok(())
}

fn configure(command: ConfigCommands, manager: &ConfigManager, config: Config) -> ServiceResult<()> {
    let updated = match command {
        ConfigCommands::Show => {
            let palette = Palette::from_preference(config.ui_color_enabled);
            println!("Config file: {}", manager.config_path().display());
            println!("{}", Renderer::new(&config, palette).config(&config));
            return Ok(());
        }
        ConfigCommands::SetPageSize { size } => {
            manager.update(|config| config.set_default_page_size(size))?
        }
        ConfigCommands::SetBucket { bucket } => manager.update(|config| {
            config.default_bucketing = bucket;
            Ok(())
        })?,
        ConfigCommands::SetColor { enabled } => manager.update(|config| {
            config.ui_color_enabled = enabled;
            Ok(())
        })?,
        ConfigCommands::SetTolerance { tolerance } => {
            manager.update(|config| config.set_amount_tolerance(tolerance))?
        }
        ConfigCommands::SetCurrency { code, precision } => {
            let code = code.trim().to_ascii_uppercase();
            if code.is_empty() {
                return Err(FinboardError::InvalidInput(
                    "currency code must not be blank".into(),
                ));
            }
            manager.update(|config| {
                config.currency = code;
                if let Some(precision) = precision {
                    config.currency_precision = precision;
                }
                Ok(())
            })?
        }
    };
    debug!(path = %manager.config_path().display(), "configuration saved");
    println!("Configuration updated.");
    let palette = Palette::from_preference(updated.ui_color_enabled);
    println!("{}", Renderer::new(&updated, palette).config(&updated));
    Ok(())
}

/// Loads the dataset named on the command line, falling back to the last one used.
/// A dataset given explicitly becomes the new default once it loads.
fn open_dataset(
    requested: Option<PathBuf>,
    manager: &ConfigManager,
    config: &Config,
) -> ServiceResult<InMemoryStore> {
    let explicit = requested.is_some();
    let path = requested
        .or_else(|| config.last_dataset.clone())
        .ok_or_else(|| {
            FinboardError::InvalidInput(
                "no dataset given; pass --data <file> (it is remembered afterwards)".into(),
            )
        })?;
    let store = DatasetFile::new(&path).load()?;

    if explicit {
        let remembered = fs::canonicalize(&path).unwrap_or(path);
        if config.last_dataset.as_ref() != Some(&remembered) {
            manager.update(|config| {
                config.last_dataset = Some(remembered);
                Ok(())
            })?;
        }
    }
    Ok(store)
}

fn category_hint(filter: &CategoryFilter, store: &InMemoryStore) -> Option<String> {
    let CategoryFilter::Named(key) = filter else {
        return None;
    };
    let known = store.known_categories();
    if known.iter().any(|label| key.matches(label)) {
        return None;
    }
    Some(match suggest_category(key, &known) {
        Some(best) => format!("No category named `{}`. Did you mean `{best}`?", key.label()),
        None => format!("No category named `{}`.", key.label()),
    })
}
