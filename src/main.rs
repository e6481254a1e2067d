use anyhow::Context;
use datepick::{
    format_iso, CalendarConfig, CalendarDate, CalendarState, DateFormat, DateRange, LocaleTable,
    SelectionMode, ViewGranularity,
};
use lexopt::{Arg, Parser, ValueExt};
use time::{OffsetDateTime, Weekday};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Options {
    week_start: Option<Weekday>,
    lang: Option<String>,
    min: Option<CalendarDate>,
    max: Option<CalendarDate>,
    disabled: Vec<DateRange>,
    multiple: bool,
    format: Option<String>,
    dates: Vec<CalendarDate>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('w') | Arg::Long("week-start") => {
                    opts.week_start = Some(parser.value()?.parse_with(parse_weekday)?);
                }
                Arg::Short('l') | Arg::Long("lang") => {
                    opts.lang = Some(parser.value()?.string()?);
                }
                Arg::Long("min") => opts.min = Some(parser.value()?.parse()?),
                Arg::Long("max") => opts.max = Some(parser.value()?.parse()?),
                Arg::Short('x') | Arg::Long("disable") => {
                    opts.disabled.push(parser.value()?.parse()?);
                }
                Arg::Short('m') | Arg::Long("multiple") => opts.multiple = true,
                Arg::Short('f') | Arg::Long("format") => {
                    opts.format = Some(parser.value()?.string()?);
                }
                Arg::Value(value) => opts.dates.push(value.parse()?),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                for line in opts.execute(CalendarDate::from(today))? {
                    println!("{line}");
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: datepick [OPTIONS] [YYYY-MM-DD ...]");
                println!();
                println!("Select dates against bounds and disabled periods, then print the selection");
                println!();
                println!("Options:");
                println!("  -w, --week-start N      First day of the week (0 = Sunday ... 6 = Saturday)");
                println!("  -l, --lang TAG          Locale to use [default: en]");
                println!("      --min YYYY-MM-DD    Earliest selectable date");
                println!("      --max YYYY-MM-DD    Latest selectable date");
                println!("  -x, --disable FROM:TO   Disable a period of dates (repeatable)");
                println!("  -m, --multiple          Toggle dates in and out of a multiple selection");
                println!("  -f, --format PATTERN    Print dates with a pattern such as dd.mm.yyyy");
                println!("  -h, --help              Display this help message and exit");
                println!("  -V, --version           Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

impl Options {
    // Returns the selected dates, one formatted date per line
    fn execute(self, today: CalendarDate) -> anyhow::Result<Vec<String>> {
        let locales = LocaleTable::builtin();
        let tag = self.lang.as_deref().unwrap_or("en");
        let locale = locales
            .get(tag)
            .with_context(|| format!("unknown language {tag:?}"))?;
        let mut config = CalendarConfig::new()
            .locale(locale)
            .bounds(self.min, self.max)
            .disabled_ranges(self.disabled)
            .initial_granularity(ViewGranularity::Day)
            .min_granularity(ViewGranularity::Day);
        if let Some(week_start) = self.week_start {
            config = config.week_start(week_start);
        }
        if self.multiple {
            config = config.selection_mode(SelectionMode::Multiple);
        }
        let mut state =
            CalendarState::new(today, config).context("invalid calendar configuration")?;
        for date in self.dates {
            state
                .select(date)
                .with_context(|| format!("failed to select {date}"))?;
        }
        let format = self.format.as_deref().map(DateFormat::new);
        Ok(state
            .selected_dates()
            .map(|date| match &format {
                Some(f) => f.format(date, locale),
                None => format_iso(date),
            })
            .collect())
    }
}

fn parse_weekday(s: &str) -> Result<Weekday, String> {
    match s.parse::<u8>() {
        Ok(n @ 0..=6) => Ok(Weekday::Sunday.nth_next(n)),
        _ => Err(format!("expected a number from 0 to 6, got {s:?}")),
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args.iter().copied()))
    }

    fn run(args: &[&str]) -> anyhow::Result<Vec<String>> {
        let Ok(Command::Run(opts)) = parse(args) else {
            panic!("arguments should parse to a run command");
        };
        opts.execute(CalendarDate::from(date!(2015 - 02 - 17)))
    }

    #[test]
    fn test_parse_help_and_version() {
        assert_eq!(parse(&["--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["2015-02-01", "-V"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_parse_options() {
        let cmd = parse(&[
            "-w",
            "1",
            "--lang=uk",
            "--min",
            "2015-02-01",
            "--max",
            "2015-02-28",
            "-x",
            "2015-02-10:2015-02-12",
            "-m",
            "2015-02-13",
        ])
        .unwrap();
        let d = |date: time::Date| CalendarDate::from(date);
        assert_eq!(
            cmd,
            Command::Run(Options {
                week_start: Some(Weekday::Monday),
                lang: Some(String::from("uk")),
                min: Some(d(date!(2015 - 02 - 01))),
                max: Some(d(date!(2015 - 02 - 28))),
                disabled: vec![DateRange::new(d(date!(2015 - 02 - 10)), d(date!(2015 - 02 - 12)))],
                multiple: true,
                format: None,
                dates: vec![d(date!(2015 - 02 - 13))],
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&["-w", "7"]).is_err());
        assert!(parse(&["--min", "yesterday"]).is_err());
        assert!(parse(&["-x", "2015-02-10"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
        assert!(parse(&["13.02.2015"]).is_err());
    }

    #[test]
    fn test_run_single() {
        assert_eq!(
            run(&["2015-02-03", "2015-02-13"]).unwrap(),
            ["2015-02-13"]
        );
    }

    #[test]
    fn test_run_multiple_toggles() {
        assert_eq!(
            run(&["-m", "2015-02-13", "2015-02-03", "2015-02-05", "2015-02-13"]).unwrap(),
            ["2015-02-03", "2015-02-05"]
        );
    }

    #[test]
    fn test_run_formatted() {
        assert_eq!(
            run(&["-l", "uk-UA", "-f", "dd.mm.yyyy", "2015-02-13"]).unwrap(),
            ["13.02.2015"]
        );
        assert_eq!(run(&["-f", "MM-yyyy", "2015-02-13"]).unwrap(), ["February-2015"]);
    }

    #[test]
    fn test_run_disabled_date() {
        let err = run(&["-x", "2015-02-10:2015-02-12", "2015-02-11"]).unwrap_err();
        assert_eq!(err.to_string(), "failed to select 2015-02-11");
    }

    #[test]
    fn test_run_out_of_bounds() {
        assert!(run(&["--min", "2015-02-01", "--max", "2015-02-28", "2015-03-01"]).is_err());
        assert_eq!(
            run(&["--min", "2015-02-01", "--max", "2015-02-28", "2015-02-15"]).unwrap(),
            ["2015-02-15"]
        );
    }

    #[test]
    fn test_run_bad_configuration() {
        assert!(run(&["--min", "2015-03-01", "--max", "2015-01-01"]).is_err());
        assert!(run(&["-x", "2015-02-12:2015-02-10"]).is_err());
        assert!(run(&["-l", "xx"]).is_err());
    }

    #[test]
    fn test_run_nothing_selected() {
        assert_eq!(run(&[]).unwrap(), Vec::<String>::new());
    }
}
