use anyhow::{Context as _, Result};
use brief_cleaner::{
    command::{read_input, run_clean, CleanOptions, OutputFormat},
    config::{BASE_URL_VAR, MODEL_VAR, TEMPERATURE_VAR},
    export::ExportTarget,
    schema, BriefCleaner, BriefContext, Settings,
};
use clap::{Args, Parser, Subcommand};
use std::{io, path::PathBuf, process::ExitCode};

#[derive(Parser)]
#[command(
    name = "briefcleaner",
    version,
    about = "Turn a messy project description into a structured brief"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Gemini model id
    #[arg(long, global = true, env = MODEL_VAR)]
    model: Option<String>,
    /// Gemini API base URL
    #[arg(long, global = true, env = BASE_URL_VAR)]
    base_url: Option<String>,
    /// Sampling temperature
    #[arg(long, global = true, env = TEMPERATURE_VAR)]
    temperature: Option<f64>,
}

#[derive(Subcommand)]
enum Command {
    /// Clean a raw brief read from an argument, a file, or stdin
    Clean(CleanArgs),
    /// Print the system instruction and output schema sent to the model
    Schema,
    /// List the selectable project contexts
    Contexts,
}

#[derive(Args)]
struct CleanArgs {
    /// Raw brief text. Read from --file or stdin when omitted.
    text: Option<String>,
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,
    #[arg(short, long, default_value_t = BriefContext::Freelance)]
    context: BriefContext,
    #[arg(long, value_enum, default_value_t = OutputFormat::View)]
    format: OutputFormat,
    /// Also write the brief as Markdown to PATH ("-" for stdout)
    #[arg(long, value_name = "PATH")]
    copy: Option<String>,
    /// Also write a print-ready document to PATH ("-" for stdout)
    #[arg(long, value_name = "PATH")]
    print: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut settings = Settings::from_env();
    if let Some(model) = cli.model {
        settings = settings.with_model_id(model);
    }
    if let Some(base_url) = cli.base_url {
        settings = settings.with_base_url(base_url);
    }
    if let Some(temperature) = cli.temperature {
        settings = settings.with_temperature(temperature);
    }

    match cli.command {
        Command::Clean(args) => clean(settings, args).await,
        Command::Schema => {
            println!("{}", schema::system_instruction());
            println!("{}", serde_json::to_string_pretty(&schema::response_schema())?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Contexts => {
            for context in BriefContext::ALL {
                println!("{} {:<10} {}", context.icon(), context.key(), context.label());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn clean(settings: Settings, args: CleanArgs) -> Result<ExitCode> {
    let raw_text = read_input(args.text, args.file.as_deref(), io::stdin())
        .context("failed to read brief")?;

    let options = CleanOptions {
        context: args.context,
        format: args.format,
        copy: args.copy.as_deref().map(ExportTarget::parse),
        print: args.print.as_deref().map(ExportTarget::parse),
    };

    let cleaner = BriefCleaner::new(settings);
    let outcome = run_clean(
        &cleaner,
        raw_text,
        &options,
        &mut io::stdout(),
        &mut io::stderr(),
    )
    .await?;

    Ok(outcome.exit_code())
}
