mod app;
mod schedule;
mod theme;
mod widget;
use crate::app::App;
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use datepick::{DatePicker, Labels, PickerOptions, SundayFirst, DEFAULT_CONFIRM_DELAY};
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "info"
};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Long("from") => opts.from_date = Some(parser.value()?.parse_with(parse_ymd)?),
                Arg::Long("to") => opts.to_date = Some(parser.value()?.parse_with(parse_ymd)?),
                Arg::Long("delay") => {
                    opts.delay = Duration::from_millis(parser.value()?.parse::<u64>()?);
                }
                Arg::Long("months") => {
                    let labels = opts.labels.clone();
                    opts.labels = parser
                        .value()?
                        .parse_with(|s| labels.with_months(s.split(',')))?;
                }
                Arg::Long("weekdays") => {
                    let labels = opts.labels.clone();
                    opts.labels = parser
                        .value()?
                        .parse_with(|s| labels.with_weekdays(s.split(',')))?;
                }
                Arg::Long("log-file") => opts.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if opts.date.is_none() => {
                    opts.date = Some(value.parse_with(parse_ymd)?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => opts.run(),
            Command::Help => {
                println!("Usage: datepick [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Pick a date with the mouse & print it");
                println!();
                println!("Options:");
                println!("  --from YYYY-MM-DD     Earliest date that may be picked");
                println!("  --to YYYY-MM-DD       Latest date that may be picked");
                println!("  --delay MS            Milliseconds to wait before confirming a pick");
                println!("                        [default: 200]");
                println!("  --months A,B,...      Comma-separated labels for the twelve months");
                println!("  --weekdays A,B,...    Comma-separated labels for the days of the");
                println!("                        week, starting with Sunday");
                println!("  --log-file PATH       Write log messages to PATH");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct RunOptions {
    date: Option<Date>,
    from_date: Option<Date>,
    to_date: Option<Date>,
    delay: Duration,
    labels: Labels,
    log_file: Option<PathBuf>,
}

impl RunOptions {
    fn run(self) -> anyhow::Result<()> {
        let _logger = init_logging(self.log_file.as_deref())?;
        let today = OffsetDateTime::now_local()
            .context("failed to determine local date")?
            .date();
        let mut options = PickerOptions::new().confirm_delay(self.delay);
        if let Some(date) = self.date {
            options = options.date(date);
        }
        if let Some(from_date) = self.from_date {
            options = options.from_date(from_date);
        }
        if let Some(to_date) = self.to_date {
            options = options.to_date(to_date);
        }
        let picker = DatePicker::new(today, options, SundayFirst)?;
        log::info!(
            "Opening picker on {} {} (today is {today})",
            picker.month(),
            picker.year()
        );
        let app = App::new(picker, self.labels);
        let selection = with_terminal(|terminal| Ok(app.run(terminal)?))?;
        if let Some(date) = selection {
            println!(
                "{}",
                date.format(&YMD_FMT).context("failed to format date")?
            );
        }
        Ok(())
    }
}

impl Default for RunOptions {
    fn default() -> RunOptions {
        RunOptions {
            date: None,
            from_date: None,
            to_date: None,
            delay: DEFAULT_CONFIRM_DELAY,
            labels: Labels::default(),
            log_file: None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn parse_ymd(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, &YMD_FMT)
}

// The terminal belongs to the UI, so nothing is logged unless a log file is
// given.
fn init_logging(log_file: Option<&Path>) -> anyhow::Result<Option<LoggerHandle>> {
    let Some(path) = log_file else {
        return Ok(None);
    };
    let handle = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?
        .log_to_file(FileSpec::try_from(path)?)
        .start()
        .context("failed to start logging")?;
    Ok(Some(handle))
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
        log::warn!("Failed to disable mouse capture: {e}");
    }
    ratatui::restore();
    r
}
