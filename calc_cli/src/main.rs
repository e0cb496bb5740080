//! # Pocketcalc CLI
//!
//! Every calculator as a subcommand, plus an interactive keypad.
//!
//! ```text
//! calc subnet 192.168.1.77/24
//! calc fraction 3/4 + 1/3
//! calc --json gpa A:3 B+:4
//! calc eval request.json
//! calc keypad
//! ```

mod logger;
mod output;
mod tui;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use calc_core::cache_policy;
use calc_core::calculations::age::AgeInput;
use calc_core::calculations::concrete::{ConcreteInput, DimensionUnit};
use calc_core::calculations::conversion::{ConversionInput, Unit};
use calc_core::calculations::date::DateInput;
use calc_core::calculations::fraction::{Fraction, FractionInput, FractionOperation};
use calc_core::calculations::gpa::{Course, GpaInput};
use calc_core::calculations::grade::{Assignment, GradeInput};
use calc_core::calculations::hours::HoursInput;
use calc_core::calculations::percentage::{PercentageInput, PercentageMode};
use calc_core::calculations::scientific::{AngleMode, Operator, ScientificFunction, ScientificInput};
use calc_core::calculations::statistics::StatisticsInput;
use calc_core::calculations::subnet::SubnetInput;
use calc_core::calculations::time::{HoursMinutes, TimeInput, TimeOperation};
use calc_core::calculations::triangle::TriangleInput;
use calc_core::{evaluate, CalcError, CalculationInput, Settings};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "calc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Everyday calculators for the terminal")]
struct Cli {
    /// Settings file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results and errors as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every calculator
    List,
    /// Scientific function (`sqrt 144`, `pi`) or binary operation (`2 ^ 10`)
    Scientific {
        #[arg(required = true, num_args = 1..=3, allow_negative_numbers = true)]
        expression: Vec<String>,
        /// Angle unit for trigonometric functions
        #[arg(long)]
        angle: Option<AngleMode>,
    },
    /// Percent of, ratio, or change
    Percentage {
        #[arg(value_enum)]
        mode: PercentArg,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Fraction arithmetic, e.g. `3/4 + 1/3`
    Fraction {
        #[arg(allow_hyphen_values = true)]
        lhs: Fraction,
        operation: FractionOperation,
        #[arg(allow_hyphen_values = true)]
        rhs: Fraction,
    },
    /// Age in years, months and days
    Age {
        birth_date: NaiveDate,
        /// Date to measure on (defaults to today)
        #[arg(long = "on")]
        target_date: Option<NaiveDate>,
    },
    /// Days between two dates
    DateDiff { start: NaiveDate, end: NaiveDate },
    /// Add (or subtract) days to a date
    DateAdd {
        start: NaiveDate,
        #[arg(allow_negative_numbers = true)]
        days: i64,
    },
    /// Add or subtract durations, e.g. `2:45 + 1:30`
    Time {
        first: HoursMinutes,
        operation: String,
        second: HoursMinutes,
    },
    /// Hours worked between two clock times
    Hours {
        start: String,
        end: String,
        /// Unpaid break
        #[arg(short, long, default_value_t = 0)]
        break_minutes: u32,
    },
    /// Grade point average from GRADE:CREDITS pairs
    Gpa {
        #[arg(required = true)]
        courses: Vec<String>,
    },
    /// Course grade from SCORE/MAX pairs
    Grade {
        #[arg(required = true)]
        scores: Vec<String>,
    },
    /// Triangle from three side lengths
    Triangle { a: f64, b: f64, c: f64 },
    /// IPv4 subnet details for an address/prefix
    Subnet { cidr: String },
    /// Generate a password
    Password {
        #[arg(short, long)]
        length: Option<usize>,
        #[arg(long)]
        no_uppercase: bool,
        #[arg(long)]
        no_lowercase: bool,
        #[arg(long)]
        no_digits: bool,
        #[arg(long)]
        no_symbols: bool,
    },
    /// Random integers in an inclusive range
    Random {
        #[arg(long, allow_negative_numbers = true)]
        min: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        max: Option<i64>,
        #[arg(short = 'n', long)]
        count: Option<u32>,
    },
    /// Descriptive statistics for a list of numbers
    #[command(alias = "statistics")]
    Stats {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<String>,
    },
    /// Concrete volume and bag count for a slab
    Concrete {
        length: f64,
        width: f64,
        depth: f64,
        /// Dimensions are in meters
        #[arg(long)]
        metric: bool,
    },
    /// Convert length, weight or temperature
    Convert {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        from: Unit,
        to: Unit,
    },
    /// Evaluate a JSON request from a file or stdin
    Eval { file: Option<PathBuf> },
    /// Cache headers a response would get
    CachePolicy {
        #[arg(long)]
        user_agent: Option<String>,
        #[arg(long, default_value = cache_policy::SITEMAP_PATH)]
        path: String,
    },
    /// Interactive keypad
    Keypad,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PercentArg {
    /// What is X% of Y?
    Of,
    /// X is what % of Y?
    Ratio,
    /// % change from X to Y
    Change,
}

impl From<PercentArg> for PercentageMode {
    fn from(arg: PercentArg) -> Self {
        match arg {
            PercentArg::Of => PercentageMode::Of,
            PercentArg::Ratio => PercentageMode::Ratio,
            PercentArg::Change => PercentageMode::Change,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // The keypad owns the terminal; log lines would corrupt the screen
    if !matches!(cli.command, Command::Keypad) {
        logger::init_cli_logger(cli.verbose);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, cli.json);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    tracing::debug!(?settings, "settings");

    let input = match &cli.command {
        Command::List => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&calc_core::CalculatorKind::ALL)?);
            } else {
                println!("{}", output::render_catalog());
            }
            return Ok(());
        }
        Command::CachePolicy { user_agent, path } => {
            return show_cache_policy(user_agent.as_deref(), path, cli.json);
        }
        Command::Keypad => return tui::run(&settings),
        Command::Eval { file } => read_request(file.as_ref())?,
        command => build_input(command, &settings)?,
    };

    let result = evaluate(&input, &mut rand::thread_rng())?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", output::render(&result, settings.display.decimal_places));
    }
    Ok(())
}

/// Translate a calculator subcommand into a dispatch request
fn build_input(command: &Command, settings: &Settings) -> anyhow::Result<CalculationInput> {
    let input = match command {
        Command::Scientific { expression, angle } => {
            CalculationInput::Scientific(parse_scientific(expression, angle.unwrap_or(settings.angle_mode))?)
        }
        Command::Percentage { mode, x, y } => CalculationInput::Percentage(PercentageInput {
            mode: (*mode).into(),
            x: *x,
            y: *y,
        }),
        Command::Fraction { lhs, operation, rhs } => CalculationInput::Fraction(FractionInput {
            lhs: *lhs,
            operation: *operation,
            rhs: *rhs,
        }),
        Command::Age { birth_date, target_date } => CalculationInput::Age(AgeInput {
            birth_date: *birth_date,
            target_date: target_date.unwrap_or_else(|| Local::now().date_naive()),
        }),
        Command::DateDiff { start, end } => CalculationInput::Date(DateInput::Difference {
            start: *start,
            end: *end,
        }),
        Command::DateAdd { start, days } => CalculationInput::Date(DateInput::AddDays {
            start: *start,
            days: *days,
        }),
        Command::Time { first, operation, second } => CalculationInput::Time(TimeInput {
            first: *first,
            operation: parse_time_operation(operation)?,
            second: *second,
        }),
        Command::Hours { start, end, break_minutes } => {
            CalculationInput::Hours(HoursInput::parse(start, end, *break_minutes)?)
        }
        Command::Gpa { courses } => CalculationInput::Gpa(GpaInput {
            courses: courses.iter().map(|c| parse_course(c)).collect::<anyhow::Result<_>>()?,
        }),
        Command::Grade { scores } => CalculationInput::Grade(GradeInput {
            assignments: scores
                .iter()
                .enumerate()
                .map(|(i, s)| parse_assignment(i, s))
                .collect::<anyhow::Result<_>>()?,
        }),
        Command::Triangle { a, b, c } => CalculationInput::Triangle(TriangleInput::new(*a, *b, *c)),
        Command::Subnet { cidr } => CalculationInput::Subnet(SubnetInput::parse_cidr(cidr)?),
        Command::Password {
            length,
            no_uppercase,
            no_lowercase,
            no_digits,
            no_symbols,
        } => {
            let mut input = settings.password_input();
            if let Some(length) = length {
                input.length = *length;
            }
            input.uppercase &= !no_uppercase;
            input.lowercase &= !no_lowercase;
            input.digits &= !no_digits;
            input.symbols &= !no_symbols;
            CalculationInput::Password(input)
        }
        Command::Random { min, max, count } => {
            let mut input = settings.random_input();
            input.min = min.unwrap_or(input.min);
            input.max = max.unwrap_or(input.max);
            input.count = count.unwrap_or(input.count);
            CalculationInput::Random(input)
        }
        Command::Stats { values } => CalculationInput::Statistics(StatisticsInput::parse(&values.join(" "))),
        Command::Concrete {
            length,
            width,
            depth,
            metric,
        } => CalculationInput::Concrete(ConcreteInput {
            length: *length,
            width: *width,
            depth: *depth,
            unit: if *metric { DimensionUnit::Meters } else { DimensionUnit::Feet },
        }),
        Command::Convert { value, from, to } => CalculationInput::Conversion(ConversionInput {
            value: *value,
            from: *from,
            to: *to,
        }),
        Command::List | Command::Eval { .. } | Command::CachePolicy { .. } | Command::Keypad => {
            bail!("not a calculator command")
        }
    };
    Ok(input)
}

/// `fn [value]` or `lhs op rhs`
fn parse_scientific(tokens: &[String], angle_mode: AngleMode) -> anyhow::Result<ScientificInput> {
    match tokens {
        [function] => Ok(ScientificInput::Function {
            function: function.parse::<ScientificFunction>()?,
            value: 0.0,
            angle_mode,
        }),
        [function, value] => Ok(ScientificInput::Function {
            function: function.parse::<ScientificFunction>()?,
            value: parse_number("value", value)?,
            angle_mode,
        }),
        [lhs, operator, rhs] => Ok(ScientificInput::Binary {
            lhs: parse_number("lhs", lhs)?,
            operator: operator.parse::<Operator>()?,
            rhs: parse_number("rhs", rhs)?,
        }),
        _ => bail!("expected `FUNCTION [VALUE]` or `LHS OP RHS`"),
    }
}

fn parse_number(field: &str, text: &str) -> Result<f64, CalcError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| CalcError::invalid_input(field, text, "Please enter a valid number"))
}

fn parse_time_operation(text: &str) -> Result<TimeOperation, CalcError> {
    match text.trim() {
        "+" | "add" => Ok(TimeOperation::Add),
        "-" | "subtract" => Ok(TimeOperation::Subtract),
        other => Err(CalcError::invalid_input("operation", other, "Expected + or -")),
    }
}

/// `A-:3` style course rows
fn parse_course(text: &str) -> anyhow::Result<Course> {
    let (grade, credits) = text
        .rsplit_once(':')
        .with_context(|| format!("course `{}` should look like GRADE:CREDITS", text))?;
    Ok(Course::new(grade, credits))
}

/// `18/20` or `Quiz 1=18/20`
fn parse_assignment(index: usize, text: &str) -> anyhow::Result<Assignment> {
    let (name, score) = match text.split_once('=') {
        Some((name, score)) => (name.to_string(), score),
        None => (format!("Assignment {}", index + 1), text),
    };
    let (score, max) = score
        .split_once('/')
        .with_context(|| format!("score `{}` should look like SCORE/MAX", text))?;
    Ok(Assignment::new(name, score, max))
}

fn read_request(file: Option<&PathBuf>) -> anyhow::Result<CalculationInput> {
    let text = match file {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("reading stdin")?;
            text
        }
    };
    let input = serde_json::from_str(&text).map_err(CalcError::from)?;
    Ok(input)
}

fn show_cache_policy(user_agent: Option<&str>, path: &str, json: bool) -> anyhow::Result<()> {
    if !cache_policy::applies_to(path) {
        if json {
            println!("{}", serde_json::json!({ "path": path, "applies": false }));
        } else {
            println!("No cache policy for {}", path);
        }
        return Ok(());
    }

    let policy = cache_policy::policy_for(user_agent);
    if json {
        println!(
            "{}",
            serde_json::json!({
                "path": path,
                "applies": true,
                "policy": policy,
                "cache_control": policy.cache_control(),
                "strips_conditional_headers": policy.strips_conditional_headers(),
            })
        );
    } else {
        println!("{}", output::render_cache_policy(policy));
    }
    Ok(())
}

fn report(err: &anyhow::Error, json: bool) {
    tracing::debug!(error = ?err, "command failed");
    match err.downcast_ref::<CalcError>() {
        Some(calc) if json => {
            eprintln!(
                "{}",
                serde_json::json!({
                    "code": calc.error_code(),
                    "field": calc.field(),
                    "message": calc.to_string(),
                    "error": calc,
                })
            );
        }
        Some(calc) => eprintln!("error: {}", calc),
        None if json => eprintln!("{}", serde_json::json!({ "code": "ERROR", "message": format!("{:#}", err) })),
        None => eprintln!("error: {:#}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_parse_scientific_forms() {
        let input = parse_scientific(&words("sqrt 144"), AngleMode::Degrees).unwrap();
        assert!(matches!(input, ScientificInput::Function { value, .. } if value == 144.0));

        let input = parse_scientific(&words("2 ^ 10"), AngleMode::Degrees).unwrap();
        assert!(matches!(input, ScientificInput::Binary { operator: Operator::Power, .. }));

        assert!(parse_scientific(&words("2 ^ x"), AngleMode::Degrees).is_err());
    }

    #[test]
    fn test_parse_rows() {
        let course = parse_course("B+:4").unwrap();
        assert_eq!(course.grade, "B+");
        assert_eq!(course.credits, "4");
        assert!(parse_course("B+").is_err());

        let assignment = parse_assignment(0, "18/20").unwrap();
        assert_eq!(assignment.name, "Assignment 1");
        assert_eq!(assignment.score, "18");
        let assignment = parse_assignment(3, "Final=45/50").unwrap();
        assert_eq!(assignment.name, "Final");
        assert_eq!(assignment.max_score, "50");
    }

    #[test]
    fn test_cli_builds_requests() {
        let cli = Cli::try_parse_from(["calc", "fraction", "3/4", "+", "1/3"]).unwrap();
        let input = build_input(&cli.command, &Settings::default()).unwrap();
        assert_eq!(input.kind(), calc_core::CalculatorKind::Fraction);

        let cli = Cli::try_parse_from(["calc", "password", "--length", "24", "--no-symbols"]).unwrap();
        match build_input(&cli.command, &Settings::default()).unwrap() {
            CalculationInput::Password(p) => {
                assert_eq!(p.length, 24);
                assert!(!p.symbols);
                assert!(p.digits);
            }
            other => panic!("unexpected {:?}", other),
        }

        let cli = Cli::try_parse_from(["calc", "date-add", "2025-01-20", "-30"]).unwrap();
        assert!(matches!(
            build_input(&cli.command, &Settings::default()).unwrap(),
            CalculationInput::Date(DateInput::AddDays { days: -30, .. })
        ));
    }

    #[test]
    fn test_random_uses_settings_defaults() {
        let mut settings = Settings::default();
        settings.random.max = 6;
        let cli = Cli::try_parse_from(["calc", "random", "-n", "3"]).unwrap();
        match build_input(&cli.command, &settings).unwrap() {
            CalculationInput::Random(r) => {
                assert_eq!((r.min, r.max, r.count), (1, 6, 3));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_time_operation() {
        assert_eq!(parse_time_operation("-").unwrap(), TimeOperation::Subtract);
        assert!(parse_time_operation("*").is_err());
    }
}
