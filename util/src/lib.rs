use std::{
    fs,
    io::{self, Read},
    num::ParseIntError,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result};
use miette::{GraphicalReportHandler, GraphicalTheme};
use nom::{
    character::complete::{char, digit1},
    combinator::{map_res, opt, recognize},
    error::{FromExternalError, ParseError},
    sequence::tuple,
    IResult,
};
use nom_locate::LocatedSpan;
use nom_supreme::{
    error::{ErrorTree, GenericErrorTree},
    final_parser::final_parser,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

// Thanks to FasterThanLime! https://fasterthanli.me/series/advent-of-code-2022/part-11

pub type Span<'a> = LocatedSpan<&'a str>;

/// Input file used when no path is given on the command line.
pub const DEFAULT_INPUT: &str = "input1.txt";

#[derive(thiserror::Error, Debug, miette::Diagnostic)]
#[error("bad input")]
struct BadInput<'a> {
    #[source_code]
    src: &'a str,

    #[label("{kind}")]
    bad_bit: miette::SourceSpan,

    kind: String,
}

/// A line that a parser could not consume completely.
///
/// `report` holds the rendered diagnostic with the offending column marked.
#[derive(thiserror::Error, Debug)]
#[error("couldn't parse {input:?}\n{report}")]
pub struct BadLine {
    pub input: String,
    pub offset: usize,
    pub report: String,
}

impl BadLine {
    fn render(input: &str, e: &ErrorTree<Span>) -> Self {
        let (offset, kind) = locate(e);
        let err = BadInput {
            src: input,
            bad_bit: miette::SourceSpan::new(offset.into(), 0.into()),
            kind,
        };

        let mut report = String::new();
        if GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
            .render_report(&mut report, &err)
            .is_err()
        {
            report = err.to_string();
        }

        Self {
            input: input.to_string(),
            offset,
            report,
        }
    }
}

// Furthest point any branch of the tree got to.
fn locate(e: &ErrorTree<Span>) -> (usize, String) {
    match e {
        GenericErrorTree::Base { location, kind } => (location.location_offset(), kind.to_string()),
        GenericErrorTree::Stack { base, .. } => locate(base),
        GenericErrorTree::Alt(alts) => alts
            .iter()
            .map(locate)
            .max_by_key(|(offset, _)| *offset)
            .unwrap_or_else(|| (0, "no alternative matched".to_string())),
    }
}

pub fn parse_number<'a, E>(i: Span<'a>) -> IResult<Span<'a>, i64, E>
where
    E: ParseError<Span<'a>> + FromExternalError<Span<'a>, ParseIntError>,
{
    map_res(recognize(tuple((opt(char('-')), digit1))), |i: Span<'a>| {
        FromStr::from_str(i.fragment())
    })(i)
}

/// Runs `parse_fun` over the whole of `l`, rendering a diagnostic if it fails.
pub fn parse_nice<'a, T, F>(l: &'a str, parse_fun: F) -> Result<T, BadLine>
where
    F: FnMut(Span<'a>) -> IResult<Span<'a>, T, ErrorTree<Span<'a>>>,
{
    let line_span = Span::new(l);
    let line: Result<_, ErrorTree<Span>> = final_parser(parse_fun)(line_span);
    line.map_err(|e| BadLine::render(l, &e))
}

pub fn read_input_as_string() -> Result<String> {
    let mut input = String::new();

    io::stdin()
        .lock()
        .read_to_string(&mut input)
        .context("couldn't read standard input")?;

    Ok(input)
}

/// Reads `path` into lines. `-` means standard input.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let input = if path == Path::new("-") {
        read_input_as_string()?
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("couldn't read input file {}", path.display()))?
    };

    let lines: Vec<_> = input.lines().map(str::to_string).collect();
    debug!(path = %path.display(), lines = lines.len(), "read input");

    Ok(lines)
}

/// Command line arguments shared by every puzzle binary.
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Puzzle input, one entry per line (`-` for stdin)
    #[arg(default_value = DEFAULT_INPUT)]
    pub path: PathBuf,

    /// More log output on stderr (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Installs a stderr logger. `RUST_LOG` wins over `verbosity` when set.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Only the first call takes effect.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[rstest]
    #[case("0", 0)]
    #[case("199", 199)]
    #[case("-42", -42)]
    #[case("9223372036854775807", i64::MAX)]
    fn parse_number_ok(#[case] input: &str, #[case] expected: i64) {
        let res = parse_nice(input, parse_number);
        assert!(res.is_ok());
        assert_eq!(res.unwrap(), expected);
    }

    #[rstest]
    #[case("abc", 0)]
    #[case("12x", 2)]
    #[case("-", 1)]
    fn parse_number_bad_offset(#[case] input: &str, #[case] offset: usize) {
        let err = parse_nice(input, parse_number).unwrap_err();
        assert_eq!(err.input, input);
        assert_eq!(err.offset, offset);
        assert!(err.report.contains(input));
    }

    #[test]
    fn parse_number_overflow() {
        let err = parse_nice("99999999999999999999", parse_number).unwrap_err();
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn read_lines_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "1\n2\r\n3\n").unwrap();

        let lines = read_lines(&path).unwrap();

        assert_eq!(lines, vec!["1", "2", "3"]);
    }

    #[test]
    fn read_lines_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");

        let err = read_lines(&path).unwrap_err();

        assert!(format!("{err:#}").contains("nope.txt"));
    }
}
