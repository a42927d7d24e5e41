use std::{path::PathBuf, sync::Arc};

use clap::{Args, Parser, Subcommand};
use profile_directory::{
    cli::{
        db::{db_generate, db_list, db_migrate, db_revert},
        profile::{self, ListArgs},
        seed::{read_seed_file, seed_profiles},
    },
    core::{
        db::init_pool,
        invalidation::{InvalidationSink, LogSink},
        view_cache::{init_redis_pool, RedisViewCache},
    },
    settings::{get_config, Config},
    AppState,
};
use tracing::Level;

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database related command
    Db(DbArgs),
    /// Profile directory command
    Profile(ProfileArgs),
}

#[derive(Debug, Args)]
struct DbArgs {
    #[command(subcommand)]
    command: DbCommands,
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Generate new migration file
    Generate { migration_name: String },
    /// List all migration
    List,
    /// Run all pending migration
    Migrate,
    /// Revert latest migration
    Revert,
    /// Load profiles from a JSON array of profile inputs
    Seed {
        #[arg(short, long)]
        file: PathBuf,
        /// Delete every profile before loading
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Debug, Args)]
struct ProfileArgs {
    #[command(subcommand)]
    command: ProfileCommands,
}

#[derive(Debug, Subcommand)]
enum ProfileCommands {
    /// List profiles matching the filters
    List {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(short, long)]
        location: Option<String>,
        /// Required interest, repeat for more
        #[arg(short, long = "interest")]
        interests: Vec<String>,
        #[arg(long)]
        sort_by: Option<String>,
        #[arg(long)]
        sort_order: Option<String>,
    },
    /// Show one profile
    Get { id: String },
    /// Create a profile from a JSON file
    Create {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Replace a profile with the content of a JSON file
    Update {
        id: String,
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Delete a profile
    Delete { id: String },
    /// Show the known locations and interests
    FilterOptions,
}

async fn init_state(config: &Config) -> anyhow::Result<(AppState, Option<RedisViewCache>)> {
    tracing::info!("Init Postgres connection");
    let pool = init_pool(config).await?;
    let view_cache = match &config.redis_url {
        Some(redis_url) => {
            tracing::info!("Init Redis view cache on {}", redis_url);
            let redis_pool = init_redis_pool(redis_url)?;
            Some(RedisViewCache::new(redis_pool, config.view_cache_ttl))
        }
        None => None,
    };
    let invalidation: Arc<dyn InvalidationSink> = match &view_cache {
        Some(cache) => Arc::new(cache.clone()),
        None => Arc::new(LogSink),
    };
    Ok((AppState::new(pool, invalidation), view_cache))
}

async fn run_profile(config: &Config, command: ProfileCommands) -> anyhow::Result<String> {
    let (state, view_cache) = init_state(config).await?;
    let view_cache = view_cache.as_ref();
    match command {
        ProfileCommands::List {
            search,
            location,
            interests,
            sort_by,
            sort_order,
        } => {
            let args = ListArgs {
                search,
                location,
                interests,
                sort_by,
                sort_order,
            };
            profile::list_profiles(&state, view_cache, &args).await
        }
        ProfileCommands::Get { id } => profile::get_profile(&state, view_cache, &id).await,
        ProfileCommands::Create { file } => profile::create_profile(&state, &file).await,
        ProfileCommands::Update { id, file } => profile::update_profile(&state, &id, &file).await,
        ProfileCommands::Delete { id } => profile::delete_profile(&state, &id).await,
        ProfileCommands::FilterOptions => profile::filter_options(&state).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _ = dotenvy::dotenv();

    // Logging to File, before get_config so its lines are captured
    let log_dir = std::env::var("log_dir").unwrap_or("./logs".to_string());
    let file_appender = tracing_appender::rolling::daily(log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(Level::DEBUG)
        .init();
    let config = get_config()?;

    match cli.command {
        Commands::Db(db_args) => match db_args.command {
            DbCommands::Generate { migration_name } => {
                println!("generate migration: {migration_name:?}");
                db_generate(&migration_name).await?;
            }
            DbCommands::List => {
                println!("list migration");
                db_list(&config).await?;
            }
            DbCommands::Migrate => {
                println!("run all pending migration");
                db_migrate(&config).await?;
            }
            DbCommands::Revert => {
                println!("revert latest migration");
                db_revert(&config).await?;
            }
            DbCommands::Seed { file, clear } => {
                let inputs = read_seed_file(&file).await?;
                let (state, _) = init_state(&config).await?;
                let summary = seed_profiles(&state, &inputs, clear).await?;
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
        },
        Commands::Profile(profile_args) => {
            let output = run_profile(&config, profile_args.command).await?;
            println!("{output}");
        }
    }
    Ok(())
}
