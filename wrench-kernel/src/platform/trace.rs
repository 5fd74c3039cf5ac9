//! Hand-written parser for the host state trace grammar (§6.1):
//!
//! ```text
//! PERIODICITY <p>
//! <t> <0|1>
//! <t> <0|1>
//! ...
//! ```
//!
//! `1`/`0` mean ON/OFF. The whole sequence of timestamped transitions
//! repeats every `p` seconds. Small and fully specified, so this is a
//! plain line-oriented parser rather than a parser-combinator dependency.

use super::error::TraceParseError;

/// A single scheduled transition within one period of the trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceEntry {
    /// Offset from the start of the period, in virtual seconds.
    pub at: f64,
    /// `true` means the host turns ON at this offset, `false` means OFF.
    pub on: bool,
}

/// A parsed host state trace: how long one period lasts, and the ordered
/// transitions within it.
#[derive(Debug, Clone, PartialEq)]
pub struct HostStateTrace {
    periodicity: f64,
    entries: Vec<TraceEntry>,
}

impl HostStateTrace {
    /// Parses a trace from its textual form.
    ///
    /// Blank lines are ignored; the first non-blank line must be
    /// `PERIODICITY <seconds>`. Every following non-blank line must be
    /// `<timestamp> <0|1>`, with timestamps non-decreasing.
    pub fn parse(text: &str) -> Result<Self, TraceParseError> {
        let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

        let header = lines.next();
        let periodicity = match header {
            Some(line) => {
                let mut parts = line.split_whitespace();
                match (parts.next(), parts.next()) {
                    (Some("PERIODICITY"), Some(value)) => {
                        value
                            .parse::<f64>()
                            .map_err(|_| TraceParseError::InvalidPeriodicity {
                                value: value.to_string(),
                            })?
                    }
                    _ => {
                        return Err(TraceParseError::MissingPeriodicity {
                            line: Some(line.to_string()),
                        })
                    }
                }
            }
            None => return Err(TraceParseError::MissingPeriodicity { line: None }),
        };

        if !(periodicity.is_finite() && periodicity > 0.0) {
            return Err(TraceParseError::InvalidPeriodicity {
                value: periodicity.to_string(),
            });
        }

        let mut entries = Vec::new();
        let mut last_timestamp = f64::NEG_INFINITY;
        for (idx, line) in lines.enumerate() {
            let line_number = idx + 1;
            let mut parts = line.split_whitespace();
            let entry = match (parts.next(), parts.next(), parts.next()) {
                (Some(ts), Some(flag), None) => {
                    let at = ts
                        .parse::<f64>()
                        .map_err(|_| TraceParseError::MalformedEntry {
                            line_number,
                            text: line.to_string(),
                        })?;
                    let on = match flag {
                        "1" => true,
                        "0" => false,
                        _ => {
                            return Err(TraceParseError::MalformedEntry {
                                line_number,
                                text: line.to_string(),
                            })
                        }
                    };
                    TraceEntry { at, on }
                }
                _ => {
                    return Err(TraceParseError::MalformedEntry {
                        line_number,
                        text: line.to_string(),
                    })
                }
            };

            if entry.at < last_timestamp {
                return Err(TraceParseError::OutOfOrder {
                    line_number,
                    timestamp: entry.at,
                });
            }
            last_timestamp = entry.at;
            entries.push(entry);
        }

        Ok(Self {
            periodicity,
            entries,
        })
    }

    /// Length of one period, in virtual seconds.
    pub fn periodicity(&self) -> f64 {
        self.periodicity
    }

    /// The transitions within one period, in timestamp order.
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_trace() {
        let trace = HostStateTrace::parse("PERIODICITY 1000\n100 0\n1000 1\n").unwrap();
        assert_eq!(trace.periodicity(), 1000.0);
        assert_eq!(
            trace.entries(),
            &[
                TraceEntry { at: 100.0, on: false },
                TraceEntry { at: 1000.0, on: true },
            ]
        );
    }

    #[test]
    fn ignores_blank_lines() {
        let trace = HostStateTrace::parse("\nPERIODICITY 10\n\n5 1\n\n").unwrap();
        assert_eq!(trace.entries().len(), 1);
    }

    #[test]
    fn missing_periodicity_header_is_rejected() {
        let err = HostStateTrace::parse("100 0\n").unwrap_err();
        assert!(matches!(err, TraceParseError::MissingPeriodicity { .. }));
    }

    #[test]
    fn non_positive_periodicity_is_rejected() {
        let err = HostStateTrace::parse("PERIODICITY 0\n").unwrap_err();
        assert!(matches!(err, TraceParseError::InvalidPeriodicity { .. }));
    }

    #[test]
    fn malformed_flag_is_rejected() {
        let err = HostStateTrace::parse("PERIODICITY 10\n5 2\n").unwrap_err();
        assert!(matches!(err, TraceParseError::MalformedEntry { .. }));
    }

    #[test]
    fn out_of_order_timestamps_are_rejected() {
        let err = HostStateTrace::parse("PERIODICITY 10\n5 1\n2 0\n").unwrap_err();
        assert!(matches!(err, TraceParseError::OutOfOrder { .. }));
    }

    #[test]
    fn empty_trace_body_is_allowed() {
        let trace = HostStateTrace::parse("PERIODICITY 10\n").unwrap();
        assert!(trace.entries().is_empty());
    }
}
