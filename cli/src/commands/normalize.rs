use crate::error::{self, Result};
use chronobox_datatypes::codec::{IsoTimestampFormat, TextCodec};
use chronobox_datatypes::primitives::{Period, normalize_periods, period_extent};
use clap::Parser;
use snafu::ResultExt;
use std::io::BufRead;

/// Merges overlapping and adjacent periods into a sorted, disjoint set
#[derive(Debug, Parser)]
pub struct Normalize {
    /// Periods to normalize, read line by line from `STDIN` if omitted
    periods: Vec<String>,

    /// Print the single period spanning all inputs instead
    #[arg(long)]
    extent: bool,
}

pub fn normalize(params: Normalize, format: &IsoTimestampFormat) -> Result<String> {
    let texts = if params.periods.is_empty() {
        read_lines(std::io::stdin().lock())?
    } else {
        params.periods
    };

    let periods = texts
        .iter()
        .map(|text| Period::parse_with(text, format))
        .collect::<Result<Vec<_>, _>>()?;

    let periods = if params.extent {
        period_extent(&periods).into_iter().collect()
    } else {
        normalize_periods(&periods)
    };

    tracing::debug!(inputs = texts.len(), outputs = periods.len(), "normalized periods");

    Ok(periods
        .iter()
        .map(|period| period.to_text_with(format))
        .collect::<Vec<_>>()
        .join("\n"))
}

fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line.context(error::Stdin)?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(periods: &[&str], extent: bool) -> Normalize {
        Normalize {
            periods: periods.iter().map(ToString::to_string).collect(),
            extent,
        }
    }

    #[test]
    fn it_merges_overlapping_and_adjacent_periods() {
        let params = args(
            &[
                "[2021-01-05, 2021-01-06]",
                "[2021-01-01, 2021-01-02)",
                "[2021-01-02, 2021-01-03)",
            ],
            false,
        );

        assert_eq!(
            normalize(params, &IsoTimestampFormat::default()).unwrap(),
            "[2021-01-01 00:00:00+00, 2021-01-03 00:00:00+00)\n\
             [2021-01-05 00:00:00+00, 2021-01-06 00:00:00+00]"
        );
    }

    #[test]
    fn it_prints_the_extent() {
        let params = args(&["(2021-01-05, 2021-01-06]", "[2021-01-01, 2021-01-02)"], true);

        assert_eq!(
            normalize(params, &IsoTimestampFormat::default()).unwrap(),
            "[2021-01-01 00:00:00+00, 2021-01-06 00:00:00+00]"
        );
    }

    #[test]
    fn it_skips_blank_lines() {
        let input = "[2021-01-01, 2021-01-02)\n\n  \n[2021-01-03, 2021-01-04)\n";

        assert_eq!(read_lines(input.as_bytes()).unwrap().len(), 2);
    }
}
