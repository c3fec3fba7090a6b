use std::{io, path::PathBuf, time::Duration};

use clap::{CommandFactory, Parser, Subcommand};
use itertools::{Itertools, Position};
use serde::Serialize;

use crate::{
    constants::SPIN_SETTINGS,
    domain::WeightConfig,
    error::{AppError, SpinRejection},
    storage,
    wheel::{AngleResolver, Distribution, SpinAnimator, WeightedSelector},
};

#[derive(Parser, Debug)]
#[command(name = "rankwheel")]
#[command(about = "Weighted prize wheel for the terminal", long_about = None)]
pub struct Cli {
    #[arg(long, global = true, help = "Category table (CSV: key,name,weight,color)")]
    pub categories: Option<PathBuf>,

    #[arg(long, global = true, help = "Spin duration in milliseconds")]
    pub duration_ms: Option<u64>,

    #[arg(long, global = true, help = "Minimum extra full rotations per spin")]
    pub rotations: Option<u32>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(about = "Draw one category without the wheel")]
    Spin {
        #[arg(long, help = "Name shown in the congratulation line")]
        name: Option<String>,

        #[arg(long, help = "Print the result as JSON")]
        json: bool,
    },

    #[command(about = "Show the weight distribution")]
    Table,

    #[command(about = "Write the default category table")]
    Init {
        #[arg(long, help = "Overwrite an existing table")]
        force: bool,
    },

    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(help = "Shell type (bash, zsh, fish)")]
        shell: String,
    },
}

/// Settings resolved from flags and defaults, shared by the CLI and the UI.
#[derive(Debug, Clone)]
pub struct WheelOptions {
    pub categories_path: PathBuf,
    pub duration: Duration,
    pub rotations: u32,
}

impl WheelOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            categories_path: cli
                .categories
                .clone()
                .unwrap_or_else(storage::get_categories_path),
            duration: Duration::from_millis(cli.duration_ms.unwrap_or(SPIN_SETTINGS.duration_ms)),
            rotations: cli.rotations.unwrap_or(SPIN_SETTINGS.extra_rotations),
        }
    }

    pub fn animator(&self) -> SpinAnimator {
        SpinAnimator::new(self.rotations, self.duration)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SpinReport {
    pub key: String,
    pub rank: String,
    pub percent: f64,
    pub target_offset: f64,
}

pub fn draw_report(distribution: &Distribution) -> Result<SpinReport, SpinRejection> {
    let mut rng = rand::thread_rng();
    let entry =
        WeightedSelector::select(distribution, &mut rng).ok_or(SpinRejection::NoCategories)?;
    let target_offset = AngleResolver::default()
        .target_offset(distribution, &entry.category.key)
        .ok_or(SpinRejection::NoCategories)?;

    Ok(SpinReport {
        key: entry.category.key.to_string(),
        rank: entry.category.name.clone(),
        percent: entry.percentage,
        target_offset,
    })
}

pub fn format_congratulation(name: &str, rank: &str, percent: f64) -> String {
    format!(
        "Congratulations, {}! You got: {} ({:.2}%)",
        name, rank, percent
    )
}

pub fn spin(options: &WheelOptions, name: Option<String>, json: bool) -> Result<(), AppError> {
    let config = storage::load_weight_config(&options.categories_path)?;
    let distribution = Distribution::from_config(&config);
    let report = draw_report(&distribution)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Hunter".to_string());
        println!("{}", format_congratulation(&name, &report.rank, report.percent));
    }
    Ok(())
}

pub fn render_table(distribution: &Distribution) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<10} {:<20} {:>9} {:>8} {:>11}\n",
        "KEY", "NAME", "WEIGHT", "PERCENT", "BREAKPOINT"
    ));
    out.push_str(&"-".repeat(62));
    out.push('\n');

    for (position, entry) in distribution.entries().iter().with_position() {
        out.push_str(&format!(
            "{:<10} {:<20} {:>9.3} {:>7.2}% {:>11.3}\n",
            entry.category.key.as_str(),
            entry.category.name,
            entry.effective_weight,
            entry.percentage,
            entry.breakpoint
        ));
        if matches!(position, Position::Last | Position::Only) {
            out.push_str(&"-".repeat(62));
            out.push('\n');
        }
    }

    let total_percent: f64 = distribution.entries().iter().map(|e| e.percentage).sum();
    out.push_str(&format!(
        "{:<10} {:<20} {:>9.3} {:>7.2}%\n",
        "TOTAL",
        "",
        distribution.total_weight(),
        total_percent
    ));
    out
}

pub fn table(options: &WheelOptions) -> Result<(), AppError> {
    let config = storage::load_weight_config(&options.categories_path)?;
    let distribution = Distribution::from_config(&config);
    if distribution.is_empty() {
        println!("No categories configured in {}", options.categories_path.display());
        return Ok(());
    }
    print!("{}", render_table(&distribution));
    Ok(())
}

pub fn init(options: &WheelOptions, force: bool) -> Result<(), AppError> {
    let path = &options.categories_path;
    if path.exists() && !force {
        return Err(AppError::AlreadyExists(path.clone()));
    }

    storage::save_weight_config(path, &WeightConfig::default_ranks())?;
    println!("Wrote default ranks to {}", path.display());
    Ok(())
}

pub fn print_completions(shell: &str) -> Result<(), AppError> {
    use clap_complete::Shell;
    let shell = match shell {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        _ => return Err(AppError::UnsupportedShell(shell.to_string())),
    };
    clap_complete::generate(shell, &mut Cli::command(), "rankwheel", &mut io::stdout());
    Ok(())
}

pub fn run_cli(cli: Cli, command: Command) {
    let options = WheelOptions::from_cli(&cli);
    let result = match command {
        Command::Spin { name, json } => spin(&options, name, json),
        Command::Table => table(&options),
        Command::Init { force } => init(&options, force),
        Command::Completions { shell } => print_completions(&shell),
    };

    if let Err(e) = result {
        log::debug!("command failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_spin_with_global_flags() {
        let cli = Cli::try_parse_from([
            "rankwheel",
            "spin",
            "--name",
            "Jin",
            "--rotations",
            "3",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.rotations, Some(3));
        assert!(matches!(
            cli.command,
            Some(Command::Spin { ref name, json: true }) if name.as_deref() == Some("Jin")
        ));
    }

    #[test]
    fn test_cli_without_subcommand_starts_ui() {
        let cli = Cli::try_parse_from(["rankwheel", "--duration-ms", "1200"]).unwrap();
        assert!(cli.command.is_none());

        let options = WheelOptions::from_cli(&cli);
        assert_eq!(options.duration, Duration::from_millis(1200));
        assert_eq!(options.rotations, SPIN_SETTINGS.extra_rotations);
    }

    #[test]
    fn test_draw_report_comes_from_table() {
        let distribution = Distribution::from_config(&WeightConfig::default_ranks());
        let report = draw_report(&distribution).unwrap();

        let key = crate::domain::CategoryKey::new(report.key.as_str());
        assert_eq!(distribution.percentage(&key), Some(report.percent));
        assert!((0.0..360.0).contains(&report.target_offset));
    }

    #[test]
    fn test_draw_report_rejects_empty_table() {
        assert_eq!(
            draw_report(&Distribution::default()),
            Err(SpinRejection::NoCategories)
        );
    }

    #[test]
    fn test_render_table_lists_every_rank() {
        let distribution = Distribution::from_config(&WeightConfig::default_ranks());
        let table = render_table(&distribution);

        assert!(table.contains("National Level"));
        assert!(table.contains(" 35.00%"));
        assert!(table.contains("100.00%"));
        assert_eq!(table.lines().count(), 2 + 7 + 2);
    }

    #[test]
    fn test_format_congratulation() {
        assert_eq!(
            format_congratulation("Jin", "S-Rank", 1.5),
            "Congratulations, Jin! You got: S-Rank (1.50%)"
        );
    }

    #[test]
    fn test_unsupported_shell() {
        assert!(matches!(
            print_completions("powershell"),
            Err(AppError::UnsupportedShell(_))
        ));
    }
}
