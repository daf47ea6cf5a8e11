//! fuzzstress CLI
//!
//! Command-line interface for one-shot stress/instability scoring.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use fuzzstress::{
    quiz_score_from_likert, ActivityLevel, Catalog, DeadlineLevel, FuzzConfig, LogLevel,
    ProcrastinationLevel, StressEngine, StressInputs,
};

#[derive(Parser)]
#[command(name = "fuzzstress")]
#[command(version = env!("FUZZSTRESS_VERSION"))]
#[command(about = "Fuzzy stress and lifestyle-instability scoring", long_about = None)]
struct Cli {
    /// Hours slept last night (0-12)
    #[arg(long)]
    sleep: Option<f64>,

    /// Hours of study today (0-16)
    #[arg(long)]
    study: Option<f64>,

    /// Hours of screen time today (0-24)
    #[arg(long = "screen-time")]
    screen_time: Option<f64>,

    /// Mood, 1 (sad) to 10 (happy)
    #[arg(long)]
    mood: Option<f64>,

    /// Deadline pressure: none, upcoming, urgent, or a 0-10 number
    #[arg(long)]
    deadline: Option<String>,

    /// Physical activity: none, light, moderate, intense, or a 0-10 number
    #[arg(long)]
    activity: Option<String>,

    /// Social interaction, 0 (isolated) to 10 (very social)
    #[arg(long)]
    social: Option<f64>,

    /// Procrastination: low, medium, high, or a 0-10 number
    #[arg(long)]
    procrastination: Option<String>,

    /// Financial pressure, 0-10
    #[arg(long)]
    financial: Option<f64>,

    /// Age in years (10-80)
    #[arg(long)]
    age: Option<f64>,

    /// Self-assessment quiz score, 0-100
    #[arg(long)]
    quiz: Option<f64>,

    /// Raw 1-5 Likert quiz answers, comma separated (overrides --quiz)
    #[arg(long, value_name = "ANSWERS")]
    likert: Option<String>,

    /// Read the full input record as JSON from a file, or from stdin with "-"
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Catalog file to use instead of the built-in catalog
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Include per-rule firing strengths in the output
    #[arg(long)]
    explain: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress info messages)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Parse a flag that accepts either a word form or a bare number
fn word_or_number<T>(value: &str, into_level: impl Fn(T) -> f64) -> Result<f64>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if let Ok(number) = value.parse::<f64>() {
        return Ok(number);
    }
    Ok(into_level(value.parse::<T>()?))
}

fn gather_inputs(cli: &Cli) -> Result<StressInputs> {
    let mut inputs = if let Some(ref path) = cli.json {
        let text = if path.as_os_str() == "-" {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        } else {
            fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?
        };
        serde_json::from_str(&text).context("failed to parse input record")?
    } else {
        match (cli.sleep, cli.study, cli.screen_time) {
            (Some(sleep), Some(study), Some(screen)) => StressInputs::new(sleep, study, screen),
            _ => bail!("--sleep, --study and --screen-time are required (or use --json)"),
        }
    };

    if let Some(mood) = cli.mood {
        inputs.mood = mood;
    }
    if let Some(ref deadline) = cli.deadline {
        inputs.deadline_level = word_or_number(deadline, |d: DeadlineLevel| d.level())?;
    }
    if let Some(ref activity) = cli.activity {
        inputs.activity_level = word_or_number(activity, |a: ActivityLevel| a.level())?;
    }
    if let Some(social) = cli.social {
        inputs.social_interaction = social;
    }
    if let Some(ref procrastination) = cli.procrastination {
        inputs.procrastination_level =
            word_or_number(procrastination, |p: ProcrastinationLevel| p.level())?;
    }
    if let Some(financial) = cli.financial {
        inputs.financial_stress = financial;
    }
    if let Some(age) = cli.age {
        inputs.age = age;
    }
    if let Some(quiz) = cli.quiz {
        inputs.quiz_score = quiz;
    }
    if let Some(ref likert) = cli.likert {
        let answers: Vec<u8> = likert
            .split(',')
            .map(|item| item.trim().parse::<u8>())
            .collect::<Result<_, _>>()
            .context("--likert expects comma-separated integers")?;
        inputs.quiz_score = quiz_score_from_likert(&answers)?;
    }

    Ok(inputs)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = FuzzConfig::load()?;

    let verbose = cli.verbose || config.general.log_level == LogLevel::Verbose;
    let quiet = cli.quiet || config.general.log_level == LogLevel::Quiet;

    let catalog = match cli.catalog.as_ref().or(config.engine.catalog.as_ref()) {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("failed to load catalog {}", path.display()))?,
        None => Catalog::builtin(),
    };

    let engine = StressEngine::from_catalog(&catalog).context("invalid catalog")?;

    if verbose && !quiet {
        eprintln!(
            "Loaded catalog {} ({} variables, {} stress rules, {} instability rules)",
            engine.catalog_version(),
            catalog.variables.len(),
            catalog.stress.rules.len(),
            catalog.instability.rules.len(),
        );
    }

    let inputs = gather_inputs(&cli)?;

    let format = cli.format.unwrap_or(match config.general.format {
        fuzzstress::OutputFormat::Text => Format::Text,
        fuzzstress::OutputFormat::Json => Format::Json,
    });

    if cli.explain {
        let report = engine.explain(&inputs)?;
        match format {
            Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            Format::Text => {
                println!("stress:      {:.2}", report.stress);
                println!("instability: {:.2}", report.instability);
                println!("\nstress rules:");
                for firing in &report.stress_rules {
                    println!(
                        "  {:<32} {:>6.3} -> {}",
                        firing.rule, firing.strength, firing.label
                    );
                }
                println!("\ninstability rules:");
                for firing in &report.instability_rules {
                    println!(
                        "  {:<32} {:>6.3} -> {}",
                        firing.rule, firing.strength, firing.label
                    );
                }
            }
        }
        return Ok(());
    }

    let assessment = engine.assess(&inputs)?;
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&assessment)?),
        Format::Text => {
            println!("stress:      {:.2} ({})", assessment.stress, assessment.band);
            println!("instability: {:.2}", assessment.instability);
            if !quiet {
                println!("{}", assessment.band.recommendation());
            }
        }
    }

    Ok(())
}
