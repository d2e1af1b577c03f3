use std::cmp::Ordering;
use std::fmt;
use std::num::ParseIntError;

use itertools::Itertools;
use nom::{
    character::complete::multispace0,
    error::{FromExternalError, ParseError},
    sequence::delimited,
    IResult,
};
use thiserror::Error;
use tracing::{debug, trace};
use util::{parse_nice, parse_number, BadLine, Span};

pub type Depth = i64;

/// Width of the noise-reducing window used by part 2.
pub const SLIDING_WINDOW: usize = 3;

#[derive(Error, Debug)]
pub enum SonarError {
    #[error("bad depth on line {line}")]
    BadLine {
        line: usize,
        #[source]
        source: BadLine,
    },

    #[error("window width must be at least 1")]
    ZeroWindow,

    #[error("sum of the window starting at measurement {start} overflows")]
    SumOverflow { start: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    NotApplicable,
    Increased,
    Decreased,
    NoChange,
}

impl Change {
    fn between(previous: Depth, current: Depth) -> Self {
        match current.cmp(&previous) {
            Ordering::Greater => Self::Increased,
            Ordering::Less => Self::Decreased,
            Ordering::Equal => Self::NoChange,
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotApplicable => write!(f, "(N/A - no previous sum)"),
            Self::Increased => write!(f, "(increased)"),
            Self::Decreased => write!(f, "(decreased)"),
            Self::NoChange => write!(f, "(no change)"),
        }
    }
}

/// One window of the sweep, labelled `A`, `B`, ... and wrapping after `Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowReport {
    pub label: char,
    pub sum: Depth,
    pub change: Change,
}

impl fmt::Display for WindowReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.label, self.sum, self.change)
    }
}

fn label(index: usize) -> char {
    char::from(b'A' + (index % 26) as u8)
}

fn parse_depth<'a, E>(i: Span<'a>) -> IResult<Span<'a>, Depth, E>
where
    E: ParseError<Span<'a>> + FromExternalError<Span<'a>, ParseIntError>,
{
    delimited(multispace0, parse_number, multispace0)(i)
}

/// Parses one measurement per line. Blank lines are skipped, line numbers in
/// errors are 1-based.
pub fn parse_depths(
    input: impl Iterator<Item = impl AsRef<str>>,
) -> Result<Vec<Depth>, SonarError> {
    let depths = input
        .enumerate()
        .filter(|(_, l)| !l.as_ref().trim().is_empty())
        .map(|(i, l)| {
            parse_nice(l.as_ref(), parse_depth)
                .map_err(|source| SonarError::BadLine { line: i + 1, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = depths.len(), "parsed depths");

    Ok(depths)
}

pub fn window_sums(depths: &[Depth], width: usize) -> Result<Vec<Depth>, SonarError> {
    if width == 0 {
        return Err(SonarError::ZeroWindow);
    }

    depths
        .windows(width)
        .enumerate()
        .map(|(start, window)| {
            window
                .iter()
                .try_fold(0, |acc: Depth, &d| acc.checked_add(d))
                .ok_or(SonarError::SumOverflow { start })
        })
        .collect()
}

pub fn count_increases(depths: &[Depth]) -> usize {
    depths
        .iter()
        .tuple_windows()
        .filter(|(previous, current)| {
            let increased = current > previous;
            trace!(previous, current, increased);
            increased
        })
        .count()
}

pub fn count_window_increases(depths: &[Depth], width: usize) -> Result<usize, SonarError> {
    Ok(count_increases(&window_sums(depths, width)?))
}

pub fn window_reports(depths: &[Depth], width: usize) -> Result<Vec<WindowReport>, SonarError> {
    let sums = window_sums(depths, width)?;

    Ok(sums
        .iter()
        .enumerate()
        .map(|(i, &sum)| {
            let change = match i.checked_sub(1).and_then(|p| sums.get(p)) {
                Some(&previous) => Change::between(previous, sum),
                None => Change::NotApplicable,
            };

            WindowReport {
                label: label(i),
                sum,
                change,
            }
        })
        .collect())
}

pub fn count_increases_in(
    input: impl Iterator<Item = impl AsRef<str>>,
) -> Result<usize, SonarError> {
    Ok(count_increases(&parse_depths(input)?))
}

pub fn count_window_increases_in(
    input: impl Iterator<Item = impl AsRef<str>>,
    width: usize,
) -> Result<usize, SonarError> {
    count_window_increases(&parse_depths(input)?, width)
}
