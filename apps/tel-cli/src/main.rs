use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tel_steering::{
    SteeringError, SteeringSet, SteeringSource, UpdateSet, parse_file, parse_value, preview,
    render, write_file,
};

type CliResult<T> = Result<T, CliError>;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("{0}")]
    Steering(#[from] SteeringError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),
}

#[derive(Parser)]
#[command(name = "tel-cli")]
#[command(about = "TELEMAC steering file tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check steering file syntax
    Validate {
        /// Path to the steering file
        file: PathBuf,
    },
    /// Preview the parameters of a steering file
    Show {
        /// Path to the steering file
        file: PathBuf,
        /// Number of parameters to show (0 for the summary only)
        #[arg(short = 'n', long, default_value_t = 10)]
        lines: isize,
        /// Dump the whole set as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Write the built-in template to a new steering file
    Init {
        /// Path of the steering file to create
        file: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Update parameters and rewrite the file
    Set {
        /// Path to the steering file
        file: PathBuf,
        /// KEY=VALUE assignments, typed like file values
        assign: Vec<String>,
        /// Keys to remove
        #[arg(long = "remove", value_name = "KEY")]
        remove: Vec<String>,
        /// Write here instead of back to the input file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Extract a subset of parameters into a new steering file
    Select {
        /// Path to the steering file
        file: PathBuf,
        /// Keys to keep
        #[arg(required = true)]
        keys: Vec<String>,
        /// Write here instead of printing to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { file } => cmd_validate(&file),
        Commands::Show { file, lines, json } => cmd_show(&file, lines, json),
        Commands::Init { file, force } => cmd_init(&file, force),
        Commands::Set {
            file,
            assign,
            remove,
            output,
        } => cmd_set(&file, &assign, &remove, output),
        Commands::Select { file, keys, output } => cmd_select(&file, &keys, output),
    }
}

fn cmd_validate(file: &Path) -> CliResult<()> {
    let set = parse_file(file)?;
    println!("✓ {} is valid ({} parameters)", file.display(), set.len());
    Ok(())
}

fn cmd_show(file: &Path, lines: isize, json: bool) -> CliResult<()> {
    let set = parse_file(file)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&set)?);
    } else {
        print!("{}", preview(&set, lines));
        if lines <= 0 {
            println!();
        }
    }
    Ok(())
}

fn cmd_init(file: &Path, force: bool) -> CliResult<()> {
    if file.exists() && !force {
        return Err(CliError::Usage(format!(
            "{} already exists, pass --force to overwrite",
            file.display()
        )));
    }
    let set = SteeringSet::from_source(SteeringSource::Template, Some(file.to_path_buf()))?;
    write_file(&set, file)?;
    println!("✓ Wrote template to {}", file.display());
    Ok(())
}

fn cmd_set(
    file: &Path,
    assign: &[String],
    remove: &[String],
    output: Option<PathBuf>,
) -> CliResult<()> {
    if assign.is_empty() && remove.is_empty() {
        return Err(CliError::Usage(
            "nothing to do: give KEY=VALUE assignments and/or --remove KEY".to_string(),
        ));
    }

    let mut updates = UpdateSet::new();
    for pair in assign {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(CliError::Usage(format!("not a KEY=VALUE assignment: {pair}")));
        };
        updates = updates.set(key.trim(), parse_value(value));
    }
    for key in remove {
        updates = updates.remove(key.trim());
    }

    let base = parse_file(file)?;
    let target = output.unwrap_or_else(|| file.to_path_buf());
    let set = SteeringSet::from_source_with_updates(
        SteeringSource::Existing(base),
        Some(target.clone()),
        Some(&updates),
    )?;
    write_file(&set, &target)?;
    println!("✓ Wrote {} parameters to {}", set.len(), target.display());
    Ok(())
}

fn cmd_select(file: &Path, keys: &[String], output: Option<PathBuf>) -> CliResult<()> {
    let set = parse_file(file)?;
    let subset = set.select(keys)?;
    match output {
        Some(target) => {
            write_file(&subset, &target)?;
            println!("✓ Wrote {} parameters to {}", subset.len(), target.display());
        }
        None => print!("{}", render(&subset)),
    }
    Ok(())
}
