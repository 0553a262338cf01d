use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use command::{
    BarOutput, CommandAction, CommandHandler, CommandRequest, CommandResponse, CoverageOutput,
    GetOutput, GetPayload, IngredientsOutput, IngredientsPayload, ListOutput, MatchOutput,
    MatchPayload, SearchOutput, SearchPayload, ToggleOutput, TogglePayload,
};
use mixbook_protocol::{serialize_json, serialize_json_pretty};
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

mod command;
mod report;
mod settings;

use settings::Settings;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "mixbook")]
#[command(about = "Cocktail recipe catalog and home bar tracker", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (includes ingredient match tracing)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Directory holding persisted pantry state
    #[arg(long, global = true, env = "MIXBOOK_STORAGE_DIR")]
    storage_dir: Option<PathBuf>,

    /// Storage backend: file|memory
    #[arg(long, global = true, default_value = "file")]
    storage: mixbook_pantry::StorageBackend,

    /// Alternate recipe catalog (JSON array of recipes)
    #[arg(long, global = true, env = "MIXBOOK_CATALOG")]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every cocktail in the catalog
    List(OutputArgs),

    /// Show one cocktail with your ingredient coverage
    Show(ShowArgs),

    /// Search cocktails by name or ingredient
    Search(SearchArgs),

    /// List all ingredients, marking the ones you own
    Ingredients(IngredientsArgs),

    /// Find cocktails that can be made from the given ingredients
    Match(MatchArgs),

    /// Show your bar: stock and the cocktails you can make
    Bar(OutputArgs),

    /// Add an ingredient to your bar, or remove it if already there
    Toggle(ToggleArgs),

    /// Execute a JSON Command API request
    Command(CommandArgs),
}

#[derive(Args)]
struct OutputArgs {
    /// Print the Command API response as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ShowArgs {
    /// Recipe id
    id: String,

    /// Print only the ingredient coverage line instead of the full recipe
    #[arg(long)]
    coverage: bool,

    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SearchArgs {
    /// Text matched against cocktail and ingredient names (empty lists everything)
    #[arg(default_value = "")]
    query: String,

    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct IngredientsArgs {
    /// Only ingredients containing this text
    #[arg(long)]
    filter: Option<String>,

    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct MatchArgs {
    /// Ingredient names you have on hand
    ingredients: Vec<String>,

    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ToggleArgs {
    /// Ingredient name
    ingredient: String,

    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CommandArgs {
    /// Inline JSON payload (mutually exclusive with --file)
    #[arg(long, conflicts_with = "file")]
    json: Option<String>,

    /// Path to file containing JSON payload
    #[arg(long)]
    file: Option<PathBuf>,

    /// Pretty-print JSON response
    #[arg(long)]
    pretty: bool,
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    let json_output = match &cli.command {
        Commands::Command(_) => true,
        Commands::List(args) | Commands::Bar(args) => args.json,
        Commands::Show(args) => args.json,
        Commands::Search(args) => args.json,
        Commands::Ingredients(args) => args.json,
        Commands::Match(args) => args.json,
        Commands::Toggle(args) => args.json,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Trace);
    }
    builder.target(env_logger::Target::Stderr).init();

    let settings = Settings::resolve(cli.storage_dir.clone(), cli.storage, cli.catalog.clone());
    let mut handler = match settings
        .build_handler(cli.verbose)
        .context("Failed to initialize mixbook")
    {
        Ok(handler) => handler,
        // JSON callers get an error envelope on stdout instead of a bare stderr report.
        Err(err) if json_output => {
            let pretty = match &cli.command {
                Commands::Command(args) => args.pretty,
                _ => true,
            };
            return emit_response(&command::request_error(err), pretty);
        }
        Err(err) => return Err(err),
    };

    match cli.command {
        Commands::Command(args) => run_command(args, &mut handler).await?,
        Commands::List(args) => run_list(args, &mut handler).await?,
        Commands::Show(args) => run_show(args, &mut handler).await?,
        Commands::Search(args) => run_search(args, &mut handler).await?,
        Commands::Ingredients(args) => run_ingredients(args, &mut handler).await?,
        Commands::Match(args) => run_match(args, &mut handler).await?,
        Commands::Bar(args) => run_bar(args, &mut handler).await?,
        Commands::Toggle(args) => run_toggle(args, &mut handler).await?,
    }

    Ok(())
}

async fn run_command(args: CommandArgs, handler: &mut CommandHandler) -> Result<()> {
    let raw = read_payload(&args)?;
    let response = match serde_json::from_str::<CommandRequest>(&raw) {
        Ok(request) => handler.execute(request).await,
        Err(err) => command::request_error(anyhow::Error::new(err).context("Invalid request")),
    };

    emit_response(&response, args.pretty)
}

/// Prints a response as JSON; error responses exit with status 1.
fn emit_response(response: &CommandResponse, pretty: bool) -> Result<()> {
    let output = if pretty {
        serialize_json_pretty(response)?
    } else {
        serialize_json(response)?
    };
    print_stdout(&format!("{output}\n"))?;

    if response.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn read_payload(args: &CommandArgs) -> Result<String> {
    if let Some(raw) = &args.json {
        return Ok(raw.clone());
    }
    if let Some(path) = &args.file {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read JSON from {}", path.display()));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read JSON from stdin")?;

    if buffer.trim().is_empty() {
        anyhow::bail!("Command request is empty. Provide --json, --file, or pipe JSON via stdin.");
    }

    Ok(buffer)
}

/// Runs one request and either prints the raw response or hands the typed
/// output to `render`.
async fn run_and_render<T: DeserializeOwned>(
    handler: &mut CommandHandler,
    request: CommandRequest,
    json: bool,
    render: impl FnOnce(&T) -> String,
) -> Result<Option<T>> {
    let response = handler.execute(request).await;

    if json {
        emit_response(&response, true)?;
        return Ok(None);
    }

    if response.is_error() {
        eprintln!(
            "Error: {}",
            response.message.as_deref().unwrap_or("Unknown error")
        );
        std::process::exit(1);
    }

    print_warnings(&response);
    let out: T = serde_json::from_value(response.data).context("Unexpected response shape")?;
    print_stdout(&render(&out))?;
    Ok(Some(out))
}

fn print_warnings(response: &CommandResponse) {
    for hint in &response.hints {
        if hint.kind == command::HintKind::Warn {
            log::warn!("{}", hint.text);
        }
    }
}

async fn run_list(args: OutputArgs, handler: &mut CommandHandler) -> Result<()> {
    let request = CommandRequest::new(CommandAction::List, serde_json::json!({}))?;
    run_and_render::<ListOutput>(handler, request, args.json, report::render_list).await?;
    Ok(())
}

async fn run_show(args: ShowArgs, handler: &mut CommandHandler) -> Result<()> {
    let payload = GetPayload { id: args.id };

    if args.coverage {
        let request = CommandRequest::new(CommandAction::Coverage, payload)?;
        let out = run_and_render::<CoverageOutput>(
            handler,
            request,
            args.json,
            report::render_coverage_output,
        )
        .await?;
        if matches!(out, Some(CoverageOutput { found: false, .. })) {
            run_list(OutputArgs { json: false }, handler).await?;
        }
        return Ok(());
    }

    let request = CommandRequest::new(CommandAction::Get, payload)?;
    let out =
        run_and_render::<GetOutput>(handler, request, args.json, report::render_recipe).await?;

    // Unknown ids fall back to the listing.
    if matches!(out, Some(GetOutput { found: false, .. })) {
        run_list(OutputArgs { json: false }, handler).await?;
    }
    Ok(())
}

async fn run_search(args: SearchArgs, handler: &mut CommandHandler) -> Result<()> {
    let request = CommandRequest::new(CommandAction::Search, SearchPayload { query: args.query })?;
    run_and_render::<SearchOutput>(handler, request, args.json, report::render_search).await?;
    Ok(())
}

async fn run_ingredients(args: IngredientsArgs, handler: &mut CommandHandler) -> Result<()> {
    let request = CommandRequest::new(
        CommandAction::Ingredients,
        IngredientsPayload {
            filter: args.filter,
        },
    )?;
    run_and_render::<IngredientsOutput>(handler, request, args.json, report::render_ingredients)
        .await?;
    Ok(())
}

async fn run_match(args: MatchArgs, handler: &mut CommandHandler) -> Result<()> {
    let request = CommandRequest::new(
        CommandAction::Match,
        MatchPayload {
            ingredients: args.ingredients,
        },
    )?;
    run_and_render::<MatchOutput>(handler, request, args.json, report::render_match).await?;
    Ok(())
}

async fn run_bar(args: OutputArgs, handler: &mut CommandHandler) -> Result<()> {
    let request = CommandRequest::new(CommandAction::Bar, serde_json::json!({}))?;
    run_and_render::<BarOutput>(handler, request, args.json, report::render_bar).await?;
    Ok(())
}

async fn run_toggle(args: ToggleArgs, handler: &mut CommandHandler) -> Result<()> {
    let request = CommandRequest::new(
        CommandAction::Toggle,
        TogglePayload {
            ingredient: args.ingredient,
        },
    )?;
    run_and_render::<ToggleOutput>(handler, request, args.json, report::render_toggle).await?;
    Ok(())
}
