//! ---
//! pointy_section: "11-simulation"
//! pointy_subsection: "01-bootstrap"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Dataset export utility for fixtures and chart prototyping."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser, ValueEnum};
use pointy_common::{init_cli_tracing, VersionInfo};
use pointy_sim::{payroll_roster, seed_alerts, RecordGenerator};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Dataset {
    Employees,
    Zones,
    Alerts,
    Attendance,
    Daily,
    Hourly,
    Departments,
    Security,
    Payroll,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    author,
    disable_version_flag = true,
    about = "Export synthetic workforce datasets",
    long_about = None
)]
struct Cli {
    /// Dataset to generate
    #[arg(long, value_enum, default_value_t = Dataset::Employees)]
    dataset: Dataset,

    /// Output file path. Use '-' for stdout.
    #[arg(long, default_value = "-")]
    output: PathBuf,

    /// Explicit output format when extension is ambiguous
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Employee roster size backing employee-derived datasets
    #[arg(long, default_value_t = 100)]
    employees: usize,

    /// Day range for attendance and daily datasets
    #[arg(long, default_value_t = 7)]
    days: u32,

    /// Number of access events for the security dataset
    #[arg(long, default_value_t = 100)]
    events: usize,

    /// Share of employees generated on site
    #[arg(long, default_value_t = 0.8)]
    on_site_probability: f64,

    /// Random seed for the generator; fresh entropy when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Reference instant (RFC 3339) used as "now"; defaults to the wall clock
    #[arg(long)]
    at: Option<DateTime<Utc>>,

    /// Print extended version information and exit
    #[arg(short = 'V', long = "version", action = ArgAction::SetTrue)]
    version: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.version {
        println!("{}", VersionInfo::current().extended());
        return Ok(());
    }
    init_cli_tracing();
    if cli.days == 0 {
        return Err(anyhow!("days must be greater than zero"));
    }

    let format = determine_format(&cli.output, cli.format)?;
    let rows = export(&cli, format)?;

    if cli.output.as_os_str() != "-" {
        info!(
            dataset = ?cli.dataset,
            rows,
            output = %cli.output.display(),
            "dataset exported"
        );
    }
    Ok(())
}

fn determine_format(path: &Path, override_format: Option<OutputFormat>) -> Result<OutputFormat> {
    if let Some(format) = override_format {
        return Ok(format);
    }
    if path.as_os_str() == "-" {
        return Ok(OutputFormat::Json);
    }
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(OutputFormat::Json),
        _ => Ok(OutputFormat::Csv),
    }
}

fn build_generator(cli: &Cli) -> Result<RecordGenerator> {
    let generator = match cli.seed {
        Some(seed) => RecordGenerator::seeded(seed),
        None => RecordGenerator::from_entropy(),
    };
    generator
        .with_on_site_probability(cli.on_site_probability)
        .context("invalid --on-site-probability")
}

/// Generate the selected dataset and write it out. Returns the row count.
fn export(cli: &Cli, format: OutputFormat) -> Result<usize> {
    let mut generator = build_generator(cli)?;
    let now = cli.at.unwrap_or_else(Utc::now);
    match cli.dataset {
        Dataset::Employees => write_rows(cli, format, &generator.employees(cli.employees, now)),
        Dataset::Zones => write_rows(cli, format, &generator.zones()),
        Dataset::Alerts => write_rows(cli, format, &seed_alerts(now)),
        Dataset::Attendance => {
            let employees = generator.employees(cli.employees, now);
            write_rows(cli, format, &generator.attendance(&employees, cli.days, now))
        }
        Dataset::Daily => write_rows(cli, format, &generator.daily_stats(cli.days, now)),
        Dataset::Hourly => write_rows(cli, format, &generator.hourly_presence()),
        Dataset::Departments => {
            let employees = generator.employees(cli.employees, now);
            write_rows(cli, format, &pointy_views::department_stats(&employees))
        }
        Dataset::Security => {
            let employees = generator.employees(cli.employees, now);
            write_rows(
                cli,
                format,
                &generator.security_logs(&employees, cli.events, now),
            )
        }
        Dataset::Payroll => write_rows(cli, format, &payroll_roster()),
    }
}

fn open_output(path: &Path) -> Result<Box<dyn Write>> {
    if path.as_os_str() == "-" {
        Ok(Box::new(io::stdout().lock()))
    } else {
        let file = File::create(path)
            .with_context(|| format!("failed to create output file {}", path.display()))?;
        Ok(Box::new(file))
    }
}

fn write_rows<T: Serialize>(cli: &Cli, format: OutputFormat, rows: &[T]) -> Result<usize> {
    let mut output = open_output(&cli.output)?;
    match format {
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(output);
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut output, rows)?;
            output.write_all(b"\n")?;
            output.flush()?;
        }
    }
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::Path;
    use tempfile::tempdir;

    fn base_cli(output: PathBuf) -> Cli {
        Cli {
            dataset: Dataset::Employees,
            output,
            format: None,
            employees: 12,
            days: 3,
            events: 20,
            on_site_probability: 0.8,
            seed: Some(42),
            at: Some(Utc.with_ymd_and_hms(2024, 5, 14, 12, 0, 0).unwrap()),
            version: false,
        }
    }

    #[test]
    fn determine_format_defaults_csv() {
        let format = determine_format(Path::new("employees.data"), None).unwrap();
        assert!(matches!(format, OutputFormat::Csv));
    }

    #[test]
    fn determine_format_for_stdout_defaults_json() {
        let format = determine_format(Path::new("-"), None).unwrap();
        assert!(matches!(format, OutputFormat::Json));
    }

    #[test]
    fn unseeded_exports_differ() {
        let mut cli = base_cli(PathBuf::from("-"));
        cli.seed = None;
        let now = cli.at.unwrap();
        let ids = |cli: &Cli| -> Vec<String> {
            build_generator(cli)
                .unwrap()
                .employees(5, now)
                .into_iter()
                .map(|employee| employee.id)
                .collect()
        };
        assert_ne!(ids(&cli), ids(&cli));
    }

    #[test]
    fn seeded_exports_repeat() {
        let cli = base_cli(PathBuf::from("-"));
        let now = cli.at.unwrap();
        let first = build_generator(&cli).unwrap().employees(5, now);
        let second = build_generator(&cli).unwrap().employees(5, now);
        assert_eq!(first, second);
    }

    #[test]
    fn invalid_probability_is_rejected() {
        let mut cli = base_cli(PathBuf::from("-"));
        cli.on_site_probability = 1.5;
        assert!(build_generator(&cli).is_err());
    }

    #[test]
    fn employees_csv_has_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("employees.csv");
        let cli = base_cli(path.clone());
        let rows = export(&cli, determine_format(&path, None).unwrap()).unwrap();
        assert_eq!(rows, 12);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 13);
        assert!(text.starts_with("id,name,department,status"));
    }

    #[test]
    fn attendance_json_covers_every_day() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("attendance.json");
        let mut cli = base_cli(path.clone());
        cli.dataset = Dataset::Attendance;
        export(&cli, OutputFormat::Json).unwrap();
        let parsed: Vec<serde_json::Value> =
            serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 12 * 3);
    }

    #[test]
    fn fixed_datasets_ignore_roster_size() {
        let dir = tempdir().unwrap();
        for (dataset, expected) in [
            (Dataset::Zones, 20),
            (Dataset::Alerts, 5),
            (Dataset::Hourly, 15),
            (Dataset::Payroll, 5),
        ] {
            let path = dir.path().join(format!("{dataset:?}.csv"));
            let mut cli = base_cli(path.clone());
            cli.dataset = dataset;
            assert_eq!(export(&cli, OutputFormat::Csv).unwrap(), expected);
        }
    }
}
