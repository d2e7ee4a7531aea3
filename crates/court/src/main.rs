#![forbid(unsafe_code)]

use std::io::{self, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use courtside_core::config::{self, WorkspaceDefaults};
use courtside_core::spec::CategorySet;
use courtside_core::traits::EligibilityClassifier;
use courtside_engine::eligibility::{check_inputs, eligibility_status, DefaultClassifier};
use courtside_engine::report::EligibilityReport;

#[derive(Parser)]
#[command(
    name = "court",
    version,
    about = "Tournament category eligibility by ELO rating."
)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Classify every category in a set for a rating.
    Classify {
        /// Path to category set .json (or "-" for stdin).
        #[arg(default_value = "-")]
        file: String,

        /// Player ELO rating. Omit for a signed-out player.
        #[arg(long, allow_hyphen_values = true)]
        rating: Option<f64>,

        /// Borderline tolerance on each side of a range.
        #[arg(long, allow_hyphen_values = true)]
        buffer: Option<f64>,

        /// Output JSON report.
        #[arg(long)]
        json: bool,

        /// Classify malformed category sets instead of rejecting them.
        #[arg(long)]
        lenient: bool,
    },

    /// Status of a single category: eligible, borderline, ineligible, or null.
    Status {
        /// Path to category set .json (or "-" for stdin).
        file: String,

        /// Category name.
        #[arg(long)]
        category: String,

        /// Player ELO rating. Omit for a signed-out player.
        #[arg(long, allow_hyphen_values = true)]
        rating: Option<f64>,

        /// Borderline tolerance on each side of a range.
        #[arg(long, allow_hyphen_values = true)]
        buffer: Option<f64>,

        /// Output JSON.
        #[arg(long)]
        json: bool,

        /// Answer for malformed category sets instead of rejecting them.
        #[arg(long)]
        lenient: bool,
    },

    /// Schema and consistency checks on a category set.
    Check {
        /// Path to category set .json file.
        file: String,

        /// Output structured JSON report.
        #[arg(long)]
        json: bool,

        /// Fail on warnings (not just errors).
        #[arg(long)]
        strict: bool,
    },

    /// Validate category set files against the schema only.
    Validate {
        /// One or more .json file paths.
        #[arg(required = true)]
        files: Vec<String>,
    },

    /// Summarize category sets in a directory as a table.
    List {
        /// Directory containing .json category sets.
        #[arg(default_value = ".")]
        dir: String,
    },

    /// Create a category set from a built-in template.
    New {
        /// Template name: club, social, open.
        template: String,

        /// Tournament name.
        #[arg(long)]
        tournament: Option<String>,

        /// Write to file instead of stdout.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List available built-in templates.
    Templates,

    /// Bootstrap a category set or workspace defaults.
    Init {
        /// Initialize workspace defaults (.courtside/defaults.json).
        #[arg(long)]
        workspace: bool,
    },
}

/// Settings resolved once per invocation and passed to each command.
struct RunContext {
    defaults: Option<WorkspaceDefaults>,
    env_buffer: Option<String>,
}

impl RunContext {
    fn load() -> Result<Self> {
        let defaults = config::load_workspace_defaults(Path::new("."))?;
        Ok(Self {
            defaults,
            env_buffer: std::env::var(config::BUFFER_ENV).ok(),
        })
    }

    fn buffer_range(&self, flag: Option<f64>) -> Result<f64> {
        Ok(config::resolve_buffer_range(
            flag,
            self.defaults.as_ref(),
            self.env_buffer.as_deref(),
        )?)
    }

    fn strict(&self, lenient: bool) -> bool {
        config::resolve_strict(lenient, self.defaults.as_ref())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.cmd {
        Cmd::Classify {
            file,
            rating,
            buffer,
            json,
            lenient,
        } => cmd_classify(&RunContext::load()?, &file, rating, buffer, json, lenient),

        Cmd::Status {
            file,
            category,
            rating,
            buffer,
            json,
            lenient,
        } => cmd_status(
            &RunContext::load()?,
            &file,
            &category,
            rating,
            buffer,
            json,
            lenient,
        ),

        Cmd::Check { file, json, strict } => cmd_check(&RunContext::load()?, &file, json, strict),

        Cmd::Validate { files } => cmd_validate(&files),

        Cmd::List { dir } => cmd_list(&dir),

        Cmd::New {
            template,
            tournament,
            output,
        } => cmd_new(&template, tournament.as_deref(), output.as_deref()),

        Cmd::Templates => cmd_templates(),

        Cmd::Init { workspace } => cmd_init(workspace),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_value(file: &str) -> Result<serde_json::Value> {
    if file == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(serde_json::from_str(&buf).context("stdin: invalid JSON")?)
    } else {
        courtside_core::spec::load_value(file)
    }
}

fn read_set(file: &str) -> Result<CategorySet> {
    let set = courtside_core::spec::from_value(read_value(file)?)
        .with_context(|| format!("{file}: not a category set"))?;
    tracing::info!(
        file,
        tournament = %set.tournament,
        categories = set.categories.len(),
        "loaded category set"
    );
    Ok(set)
}

fn rejected(file: &str, e: courtside_core::errors::EligibilityError) -> anyhow::Error {
    tracing::warn!(file, "rejected: {e}");
    anyhow::anyhow!("{file}: {e} (use --lenient to classify anyway)")
}

fn cmd_classify(
    ctx: &RunContext,
    file: &str,
    rating: Option<f64>,
    buffer: Option<f64>,
    json_out: bool,
    lenient: bool,
) -> Result<()> {
    let set = read_set(file)?;
    let buffer_range = ctx.buffer_range(buffer)?;
    let classifier = DefaultClassifier;

    let report = if ctx.strict(lenient) {
        let result = classifier
            .classify_strict(&set.categories, rating, buffer_range)
            .map_err(|e| rejected(file, e))?;
        EligibilityReport::from_result(&set, rating, buffer_range, result)
    } else {
        EligibilityReport::build(&set, rating, buffer_range, &classifier)
    };

    if json_out {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

fn cmd_status(
    ctx: &RunContext,
    file: &str,
    category: &str,
    rating: Option<f64>,
    buffer: Option<f64>,
    json_out: bool,
    lenient: bool,
) -> Result<()> {
    let set = read_set(file)?;
    let buffer_range = ctx.buffer_range(buffer)?;
    if ctx.strict(lenient) {
        check_inputs(&set.categories, rating, buffer_range).map_err(|e| rejected(file, e))?;
    }
    let data = set.find(category).ok_or_else(|| {
        let available: Vec<_> = set.categories.iter().map(|c| c.category.as_str()).collect();
        anyhow::anyhow!(
            "unknown category \"{category}\". available: {}",
            available.join(", ")
        )
    })?;

    let status = eligibility_status(data, rating, buffer_range);
    if json_out {
        let out = serde_json::json!({
            "category": data.category,
            "status": status,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", status.map(|s| s.as_str()).unwrap_or("null"));
    }
    Ok(())
}

fn cmd_check(ctx: &RunContext, file: &str, json_out: bool, strict: bool) -> Result<()> {
    let data = read_value(file)?;
    let buffer_range = ctx.buffer_range(None)?;
    let report = courtside_core::schema::check(&data, file, strict, buffer_range);

    if json_out {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if report.pass {
            eprintln!("  ok  {file} (v{})", report.version);
        } else {
            eprintln!("  FAIL {file} (v{})", report.version);
        }
        for e in &report.errors {
            eprintln!(
                "  error {}: {} {}",
                e.code,
                e.message,
                e.path.as_deref().unwrap_or("")
            );
        }
        for w in &report.warnings {
            eprintln!(
                "  warn  {}: {} {}",
                w.code,
                w.message,
                w.path.as_deref().unwrap_or("")
            );
        }
    }

    if !report.pass {
        bail!("check failed for {file}");
    }
    Ok(())
}

fn cmd_validate(files: &[String]) -> Result<()> {
    let (passed, failed) = courtside_core::schema::validate_files(files)?;
    eprintln!("{passed} passed, {failed} failed");
    if failed > 0 {
        bail!("{failed} file(s) failed validation");
    }
    Ok(())
}

fn cmd_list(dir: &str) -> Result<()> {
    let rows = courtside_core::list::scan_dir(dir)?;
    print!("{}", courtside_core::list::render_table(&rows));
    Ok(())
}

fn cmd_new(template: &str, tournament: Option<&str>, output: Option<&str>) -> Result<()> {
    let set = courtside_core::templates::generate(template, tournament).ok_or_else(|| {
        let available: Vec<_> = courtside_core::templates::list_templates()
            .iter()
            .map(|(n, _)| *n)
            .collect();
        anyhow::anyhow!(
            "unknown template \"{template}\". available: {}",
            available.join(", ")
        )
    })?;

    let json = serde_json::to_string_pretty(&set)?;
    if let Some(path) = output {
        std::fs::write(path, &json).with_context(|| format!("cannot write {path}"))?;
        eprintln!("wrote {path}");
    } else {
        println!("{json}");
    }
    Ok(())
}

fn cmd_templates() -> Result<()> {
    for (name, desc) in courtside_core::templates::list_templates() {
        println!("  {name:<8} {desc}");
    }
    Ok(())
}

fn cmd_init(workspace: bool) -> Result<()> {
    if workspace {
        std::fs::create_dir_all(config::DEFAULTS_DIR)?;
        let json = serde_json::to_string_pretty(&WorkspaceDefaults::starter())?;
        std::fs::write(config::DEFAULTS_FILE, &json)?;
        eprintln!("created {}", config::DEFAULTS_FILE);
    } else {
        let set = courtside_core::templates::generate("club", None)
            .context("built-in club template missing")?;
        let json = serde_json::to_string_pretty(&set)?;
        std::fs::write("categories.json", &json)?;
        eprintln!("created categories.json (edit to customize)");
    }
    Ok(())
}
