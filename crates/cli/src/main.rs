// Tallyview CLI - two-panel CSV reconciliation, headless

mod exit_codes;
mod render;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use chrono::NaiveDate;

use tallyview_config::Settings;
use tallyview_engine::diff::{highlight, visible_positions};
use tallyview_engine::normalize::DateOrder;
use tallyview_engine::panel::{PanelSide, PanelState};
use tallyview_engine::project::{distinct_filter_values, project};
use tallyview_engine::totals;
use tallyview_engine::view::{GroupingMode, SortMode, ViewOptions};
use tallyview_engine::align;

use exit_codes::{EXIT_ERROR, EXIT_MISMATCH, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Two-panel CSV reconciliation viewer (headless)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile a ledger export against a payment-processor export
    #[command(after_help = "\
Examples:
  tally view ledger.csv processor.csv
  tally view ledger.csv processor.csv --filter-left Card --filter-right Terminal
  tally view ledger.csv processor.csv --sort amount --mismatches-only
  tally view ledger.csv processor.csv --date 2025-04-21 --json
  tally view ledger.csv processor.csv --check")]
    View {
        /// Left panel: ledger CSV
        left: PathBuf,

        /// Right panel: payment-processor CSV
        right: PathBuf,

        /// Left-panel method filter (repeatable; default: all methods)
        #[arg(long = "filter-left", value_name = "METHOD")]
        filter_left: Vec<String>,

        /// Right-panel channel filter (repeatable; default: all channels)
        #[arg(long = "filter-right", value_name = "CHANNEL")]
        filter_right: Vec<String>,

        /// Sort mode for both panels
        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        /// Restrict both panels to a single date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Skip placeholder alignment; compare raw positional pairs
        #[arg(long)]
        no_align: bool,

        /// Show only row pairs with flagged cells
        #[arg(long)]
        mismatches_only: bool,

        /// Left panel: aggregate rows sharing a payment reference (legacy)
        #[arg(long)]
        group_left: bool,

        /// Date-format assumption for the left panel
        #[arg(long, value_enum)]
        left_dates: Option<DateOrderArg>,

        /// Date-format assumption for the right panel
        #[arg(long, value_enum)]
        right_dates: Option<DateOrderArg>,

        /// Output JSON report to stdout instead of tables
        #[arg(long)]
        json: bool,

        /// Write JSON report to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Exit non-zero when any cell is flagged
        #[arg(long)]
        check: bool,
    },

    /// List a file's distinct filterable values (the checkbox set)
    #[command(after_help = "\
Examples:
  tally columns ledger.csv --side left
  tally columns processor.csv --side right")]
    Columns {
        file: PathBuf,

        /// Which panel shape to read the file as
        #[arg(long, value_enum, default_value = "left")]
        side: SideArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Date,
    Amount,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Date => SortMode::ByDate,
            SortArg::Amount => SortMode::ByAmount,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DateOrderArg {
    DayFirst,
    MonthFirst,
}

impl From<DateOrderArg> for DateOrder {
    fn from(arg: DateOrderArg) -> Self {
        match arg {
            DateOrderArg::DayFirst => DateOrder::DayFirst,
            DateOrderArg::MonthFirst => DateOrder::MonthFirst,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SideArg {
    Left,
    Right,
}

struct CliError {
    code: u8,
    message: String,
}

fn cli_err(code: u8, message: impl Into<String>) -> CliError {
    CliError { code, message: message.into() }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e.message);
            ExitCode::from(e.code)
        }
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::View {
            left,
            right,
            filter_left,
            filter_right,
            sort,
            date,
            no_align,
            mismatches_only,
            group_left,
            left_dates,
            right_dates,
            json,
            output,
            check,
        } => cmd_view(ViewArgs {
            left,
            right,
            filter_left,
            filter_right,
            sort,
            date,
            no_align,
            mismatches_only,
            group_left,
            left_dates,
            right_dates,
            json,
            output,
            check,
        }),
        Commands::Columns { file, side } => cmd_columns(file, side),
    }
}

struct ViewArgs {
    left: PathBuf,
    right: PathBuf,
    filter_left: Vec<String>,
    filter_right: Vec<String>,
    sort: Option<SortArg>,
    date: Option<String>,
    no_align: bool,
    mismatches_only: bool,
    group_left: bool,
    left_dates: Option<DateOrderArg>,
    right_dates: Option<DateOrderArg>,
    json: bool,
    output: Option<PathBuf>,
    check: bool,
}

fn load_panel(side: PanelSide, path: &std::path::Path) -> Result<PanelState, CliError> {
    let table = tallyview_io::load(path)
        .map_err(|e| cli_err(EXIT_ERROR, format!("cannot read {}: {e}", path.display())))?;
    let mut panel = PanelState::new(side);
    panel.load(table);
    Ok(panel)
}

fn cmd_view(args: ViewArgs) -> Result<(), CliError> {
    let settings = Settings::load();

    let left_panel = load_panel(PanelSide::Left, &args.left)?;
    let right_panel = load_panel(PanelSide::Right, &args.right)?;

    let date_restriction = match &args.date {
        Some(raw) => Some(
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| cli_err(EXIT_USAGE, format!("--date expects YYYY-MM-DD, got '{raw}'")))?,
        ),
        None => None,
    };

    // No filter flags = every checkbox checked; the engine's opt-in model
    // would otherwise show nothing
    let left_filters = if args.filter_left.is_empty() {
        distinct_filter_values(&left_panel)
    } else {
        args.filter_left.clone()
    };
    let right_filters = if args.filter_right.is_empty() {
        distinct_filter_values(&right_panel)
    } else {
        args.filter_right.clone()
    };

    let align_enabled =
        !args.no_align && settings.view.align_enabled.unwrap_or(true);

    let options = ViewOptions {
        sort: args.sort.map(Into::into).unwrap_or(settings.view.sort),
        align_enabled,
        mismatches_only: args.mismatches_only,
        date_restriction,
        left_filters: left_filters.into_iter().collect(),
        right_filters: right_filters.into_iter().collect(),
        left_date_order: args
            .left_dates
            .map(Into::into)
            .unwrap_or(settings.view.left_date_order),
        right_date_order: args
            .right_dates
            .map(Into::into)
            .unwrap_or(settings.view.right_date_order),
        left_grouping: if args.group_left {
            GroupingMode::Grouped
        } else {
            settings.view.left_grouping
        },
    };

    let left = project(&left_panel, &options);
    let right = project(&right_panel, &options);

    let (left, right) = if options.align_enabled {
        align(left, right)
    } else {
        (left, right)
    };

    let diffs = highlight(&left, &right);
    let visible = visible_positions(&diffs, options.mismatches_only);

    let visible_ref = options.mismatches_only.then_some(visible.as_slice());
    let left_totals = totals::compute(&left, visible_ref);
    let right_totals = totals::compute(&right, visible_ref);

    let flagged = diffs.iter().filter(|d| d.any()).count();

    if args.json || args.output.is_some() {
        let report = report::build(
            &args.left.display().to_string(),
            &args.right.display().to_string(),
            &left,
            &right,
            &diffs,
            left_totals.clone(),
            right_totals.clone(),
        );
        let json_str = serde_json::to_string_pretty(&report)
            .map_err(|e| cli_err(EXIT_ERROR, format!("JSON serialization error: {e}")))?;

        if let Some(ref path) = args.output {
            std::fs::write(path, &json_str)
                .map_err(|e| cli_err(EXIT_ERROR, format!("cannot write output: {e}")))?;
            eprintln!("wrote {}", path.display());
        }
        if args.json {
            println!("{json_str}");
        }
    } else {
        print!(
            "{}",
            render::render(&left, &right, &diffs, &visible, &left_totals, &right_totals)
        );
    }

    // Human summary to stderr
    eprintln!(
        "{} position(s) — {} flagged, {} shown",
        diffs.len(),
        flagged,
        visible.len(),
    );

    if args.check && flagged > 0 {
        return Err(cli_err(EXIT_MISMATCH, "mismatches found"));
    }
    Ok(())
}

fn cmd_columns(file: PathBuf, side: SideArg) -> Result<(), CliError> {
    let side = match side {
        SideArg::Left => PanelSide::Left,
        SideArg::Right => PanelSide::Right,
    };
    let panel = load_panel(side, &file)?;
    for value in distinct_filter_values(&panel) {
        println!("{value}");
    }
    Ok(())
}
