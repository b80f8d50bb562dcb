use crate::application::{PickerApp, PickerOptions};
use crate::domain::{
    DayInteraction, SelectedDays, StartOfWeek, earliest_supported_month, is_supported_month,
    latest_supported_month,
};
use crate::infrastructure::{init_file_logger, init_stderr_logger};
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "range-picker")]
#[command(about = "Pick a range of calendar days from a month grid")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GridArgs {
    /// Month to show (YYYY-MM or YYYY-MM-DD format, defaults to this month)
    #[arg(short, long, value_parser = parse_month)]
    pub month: Option<NaiveDate>,
    /// First day of each row: mon or sun
    #[arg(short = 'w', long)]
    pub start_week: Option<StartOfWeek>,
    /// Always show six weeks
    #[arg(long)]
    pub six_weeks: bool,
}

impl GridArgs {
    pub fn options(&self) -> PickerOptions {
        PickerOptions {
            month: self.month,
            start_of_week: self.start_week,
            six_weeks: self.six_weeks,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive month view (default)
    Pick {
        #[command(flatten)]
        grid: GridArgs,
        /// Print the accepted range as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a month grid
    Grid {
        #[command(flatten)]
        grid: GridArgs,
        /// Show a committed range (YYYY-MM-DD..YYYY-MM-DD)
        #[arg(short, long)]
        range: Option<SelectedDays>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Colour the text output
        #[arg(long)]
        color: bool,
    },
    /// Feed click/hover events (c5 h10 c10) through a picker
    Replay {
        #[command(flatten)]
        grid: GridArgs,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Events such as c5, h10, click:5 or hover:10
        #[arg(required = true)]
        events: Vec<DayInteraction>,
    },
}

/// Accepts `YYYY-MM` or a full `YYYY-MM-DD`.
pub fn parse_month(s: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d"))
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;

    if !is_supported_month(date) {
        bail!(
            "Month '{}' is outside the calendar ({} to {})",
            s,
            earliest_supported_month().format("%Y-%m"),
            latest_supported_month().format("%Y-%m")
        );
    }
    Ok(date)
}

impl Cli {
    pub fn run() -> Result<()> {
        let cli = Self::parse();
        let app = PickerApp::new()?;

        let command = cli.command.unwrap_or(Commands::Pick {
            grid: GridArgs::default(),
            json: false,
        });

        match command {
            Commands::Pick { grid, json } => {
                if let Err(e) = init_file_logger(&app.config().log_dir) {
                    eprintln!("Warning: {:#}", e);
                }

                if let Some(days) = app.run_pick(&grid.options())? {
                    if json {
                        println!("{}", serde_json::to_string(&days)?);
                    } else {
                        println!("{}", days);
                    }
                }
            }
            Commands::Grid {
                grid,
                range,
                json,
                color,
            } => {
                init_stderr_logger()?;
                println!("{}", app.grid_report(&grid.options(), range, json, color)?);
            }
            Commands::Replay { grid, json, events } => {
                init_stderr_logger()?;
                println!("{}", app.replay(&grid.options(), &events, json)?);
            }
        }

        Ok(())
    }
}
