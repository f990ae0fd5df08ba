//! DIMACS CNF reader.
//!
//! Accepts the SATLIB flavour of the format:
//!
//! ```text
//! c comment
//! p cnf 3 2
//! 1 -2 0
//! 2 3 -1 0
//! %
//! 0
//! ```
//!
//! Lines starting with `c` are comments. A line starting with `%` ends the
//! clause data; SATLIB benchmark files carry a `%` / `0` trailer that would
//! otherwise read as an empty clause. Clauses are `0`-terminated and may
//! span lines.

use crate::error::{Result, SatError};
use crate::problem::Problem;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// A parsed, not yet validated, CNF instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    /// Variable count declared by the `p cnf` header.
    pub num_variables: usize,

    /// Clause count declared by the header.
    pub declared_clauses: usize,

    /// Clauses with the `0` terminator stripped.
    pub clauses: Vec<Vec<i32>>,
}

impl Cnf {
    /// Validates the clauses into a [`Problem`].
    pub fn into_problem(self) -> Result<Problem> {
        Problem::build(self.num_variables, self.clauses)
    }
}

/// Parses DIMACS CNF from a buffered reader.
pub fn parse_cnf<R: BufRead>(reader: R) -> Result<Cnf> {
    let mut header: Option<(usize, usize)> = None;
    let mut clauses = Vec::new();
    let mut pending: Vec<i32> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }
        if trimmed.starts_with('%') {
            break;
        }
        if trimmed.starts_with('p') {
            if header.is_some() {
                return Err(parse_error(line_no, "duplicate problem line"));
            }
            header = Some(parse_header(trimmed, line_no)?);
            continue;
        }
        if header.is_none() {
            return Err(parse_error(line_no, "clause before `p cnf` header"));
        }

        for token in trimmed.split_whitespace() {
            let value: i32 = token
                .parse()
                .map_err(|_| parse_error(line_no, format!("invalid literal `{token}`")))?;
            if value == 0 {
                clauses.push(std::mem::take(&mut pending));
            } else {
                pending.push(value);
            }
        }
    }

    let (num_variables, declared_clauses) =
        header.ok_or_else(|| parse_error(0, "missing `p cnf` header"))?;

    if !pending.is_empty() {
        warn!(
            literals = pending.len(),
            "last clause missing its 0 terminator, keeping it"
        );
        clauses.push(pending);
    }
    if clauses.len() != declared_clauses {
        warn!(
            declared = declared_clauses,
            found = clauses.len(),
            "clause count differs from header"
        );
    }
    debug!(
        variables = num_variables,
        clauses = clauses.len(),
        "parsed cnf"
    );

    Ok(Cnf {
        num_variables,
        declared_clauses,
        clauses,
    })
}

pub fn parse_cnf_str(input: &str) -> Result<Cnf> {
    parse_cnf(input.as_bytes())
}

pub fn read_cnf_file<P: AsRef<Path>>(path: P) -> Result<Cnf> {
    let file = File::open(path.as_ref())?;
    parse_cnf(BufReader::new(file))
}

fn parse_header(line: &str, line_no: usize) -> Result<(usize, usize)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        ["p", "cnf", vars, clauses] => {
            let vars = vars
                .parse()
                .map_err(|_| parse_error(line_no, format!("invalid variable count `{vars}`")))?;
            let clauses = clauses
                .parse()
                .map_err(|_| parse_error(line_no, format!("invalid clause count `{clauses}`")))?;
            Ok((vars, clauses))
        }
        _ => Err(parse_error(
            line_no,
            format!("expected `p cnf <variables> <clauses>`, got `{line}`"),
        )),
    }
}

fn parse_error(line: usize, message: impl Into<String>) -> SatError {
    SatError::Parse {
        line,
        message: message.into(),
    }
}
