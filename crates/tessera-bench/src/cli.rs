use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: bench-runner [OPTIONS]
  --baseline <path>              Compare against a saved JSON baseline
  --output <path>                Write this run as a JSON baseline
  --regression-threshold <pct>   Allowed mean-time increase (default: 10)
  --iterations <n>               Meshing passes per scene (default: 100)
";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CliError {
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
    #[error("missing value for {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {flag}: {value}")]
    InvalidValue { flag: &'static str, value: String },
}

/// Settings for one benchmark run.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchArgs {
    pub baseline: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub regression_threshold: f64,
    pub iterations: u32,
}

impl Default for BenchArgs {
    fn default() -> Self {
        Self {
            baseline: None,
            output: None,
            regression_threshold: 10.0,
            iterations: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(BenchArgs),
    Help,
}

/// Parse arguments (program name already stripped). `--help` wins over
/// anything that follows it.
pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut parsed = BenchArgs::default();
    let mut args = args.into_iter().map(Into::into);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--baseline" => parsed.baseline = Some(value_of(&mut args, "--baseline")?.into()),
            "--output" => parsed.output = Some(value_of(&mut args, "--output")?.into()),
            "--regression-threshold" => {
                let pct: f64 = parse_value(&mut args, "--regression-threshold")?;
                if !pct.is_finite() || pct < 0.0 {
                    return Err(CliError::InvalidValue {
                        flag: "--regression-threshold",
                        value: pct.to_string(),
                    });
                }
                parsed.regression_threshold = pct;
            }
            "--iterations" => {
                parsed.iterations = parse_value(&mut args, "--iterations")?;
            }
            _ => return Err(CliError::UnknownArgument(arg)),
        }
    }

    Ok(Command::Run(parsed))
}

fn value_of(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, CliError> {
    args.next().ok_or(CliError::MissingValue(flag))
}

fn parse_value<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<T, CliError> {
    let value = value_of(args, flag)?;
    value
        .parse()
        .map_err(|_| CliError::InvalidValue { flag, value })
}
