use clap::{Parser, Subcommand, ValueEnum};
use option_profile::{check, comparison, enforce, presets, resolve, Context, Profile, Schema};
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Validate, compare and render engine build option profiles.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Log at info level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate one or more profiles (paths or preset:<name>)
    Check {
        #[arg(required = true)]
        profiles: Vec<String>,
        /// Allow an option to be assigned more than once; the last one wins
        #[arg(long)]
        allow_redefinition: bool,
        /// Fail when options contradict each other
        #[arg(long)]
        deny_advisories: bool,
    },
    /// Print a validated profile
    Show {
        profile: String,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// List the options on which two profiles differ
    Diff { left: String, right: String },
    /// List embedded presets, or print one
    Presets { name: Option<String> },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Scons,
    Json,
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "info" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    match run(args.command, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, out: &mut impl Write) -> CliResult<()> {
    let schema = Schema::with_builtins();
    match command {
        Command::Check {
            profiles,
            allow_redefinition,
            deny_advisories,
        } => {
            let ctx = Context {
                allow_redefinition,
                deny_advisories,
            };
            let mut reports = Vec::with_capacity(profiles.len());
            for location in &profiles {
                let report =
                    check(location, &schema, &ctx).map_err(|e| format!("{location}: {e}"))?;
                for a in &report.advisories {
                    writeln!(out, "{location}: advisory: {a}")?;
                }
                writeln!(out, "{location}: ok ({} options)", report.options)?;
                reports.push(report);
            }
            enforce(&reports, &ctx)?;
        }
        Command::Show { profile, format } => {
            let p = resolve(&profile, &schema, &Context::strict())?;
            writeln!(out, "{}", render(&p, format)?)?;
        }
        Command::Diff { left, right } => {
            let ctx = Context::strict();
            let l = resolve(&left, &schema, &ctx)?;
            let r = resolve(&right, &schema, &ctx)?;
            for d in comparison::diff(&l, &r) {
                writeln!(out, "{d}")?;
            }
        }
        Command::Presets { name: None } => {
            for name in presets::names() {
                writeln!(out, "{name}")?;
            }
        }
        Command::Presets { name: Some(name) } => {
            write!(out, "{}", presets::source(&name)?)?;
        }
    }
    Ok(())
}

fn render(p: &Profile, format: Format) -> serde_json::Result<String> {
    Ok(match format {
        Format::Text => p.to_text().trim_end().to_string(),
        Format::Scons => p.to_scons_args(),
        Format::Json => serde_json::to_string_pretty(p)?,
    })
}
