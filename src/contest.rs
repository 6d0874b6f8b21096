//! Contest I/O: the line-oriented input format and answer formatting.
//!
//! The wire format is numeric text: a test-case count, then per case the
//! grid size `n`, n rows of cell values, n rows of initial owner ids, a
//! query count, and one `x y newOwner a b c` line per query. Coordinates
//! are 1-indexed on the wire and converted here; the engine is 0-indexed
//! throughout.

use std::fmt;
use std::io::{self, BufRead, Write};

use crate::engine::{CivId, Coord, World};
use crate::error::EngineError;

/// Largest allowed grid side length.
pub const MAX_SIZE: u16 = 500;
/// Largest allowed number of queries in one case.
pub const MAX_QUERIES: usize = 100_000;
/// Largest allowed cell value magnitude.
pub const MAX_ABS_VALUE: i32 = 100;
/// Largest allowed owner id.
pub const MAX_OWNER_ID: CivId = 1_000_000_000;
/// Largest allowed magnitude of the `a` coefficient.
pub const MAX_ABS_A: i64 = 10_000_000_000;
/// Largest allowed magnitude of the `b` coefficient.
pub const MAX_ABS_B: i64 = 1_000_000_000_000;
/// Largest allowed magnitude of the `c` coefficient.
pub const MAX_ABS_C: i64 = 10_000;

/// One ownership change plus the query evaluated right after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    /// Cell to re-own (0-indexed).
    pub at: Coord,
    /// Civilisation taking the cell.
    pub new_owner: CivId,
    /// Coefficient on total value.
    pub a: i64,
    /// Coefficient on border count.
    pub b: i64,
    /// Coefficient on the value-border product.
    pub c: i64,
}

/// One parsed test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Side length of the grid.
    pub size: u16,
    /// Cell values, row-major.
    pub values: Vec<Vec<i32>>,
    /// Initial owner ids, row-major.
    pub owners: Vec<Vec<CivId>>,
    /// Ownership changes with their queries, in order.
    pub queries: Vec<Query>,
}

/// Input parsing error.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// 1-based input line the error was detected on.
    pub line: usize,
    /// Description of the error.
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "input line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Whitespace tokenizer that tracks line numbers for error reporting.
struct Tokens<R: BufRead> {
    reader: R,
    line: usize,
    pending: std::vec::IntoIter<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            pending: Vec::new().into_iter(),
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            line: self.line.max(1),
            message: message.into(),
        }
    }

    fn next_token(&mut self) -> Result<String, ParseError> {
        loop {
            if let Some(token) = self.pending.next() {
                return Ok(token);
            }

            let mut buf = String::new();
            let read = self
                .reader
                .read_line(&mut buf)
                .map_err(|e| self.error(format!("read failed: {e}")))?;
            if read == 0 {
                return Err(self.error("unexpected end of input"));
            }

            self.line += 1;
            self.pending = buf
                .split_whitespace()
                .map(str::to_owned)
                .collect::<Vec<_>>()
                .into_iter();
        }
    }

    fn next<T: std::str::FromStr>(&mut self, what: &str) -> Result<T, ParseError> {
        let token = self.next_token()?;
        token
            .parse()
            .map_err(|_| self.error(format!("expected {what}, got `{token}`")))
    }
}

/// Parse a complete contest input.
///
/// Validates shape only (counts, integer syntax, coordinates within the
/// grid); contest limits are checked separately by [`check_limits`].
///
/// # Errors
///
/// Returns a [`ParseError`] naming the offending input line.
pub fn parse_input<R: BufRead>(reader: R) -> Result<Vec<TestCase>, ParseError> {
    let mut tokens = Tokens::new(reader);

    let case_count: usize = tokens.next("test-case count")?;
    let mut cases = Vec::with_capacity(case_count.min(1024));

    for _ in 0..case_count {
        cases.push(parse_case(&mut tokens)?);
    }

    Ok(cases)
}

fn parse_case<R: BufRead>(tokens: &mut Tokens<R>) -> Result<TestCase, ParseError> {
    let size: u16 = tokens.next("grid size")?;
    if size == 0 {
        return Err(tokens.error("grid size must be positive"));
    }

    let n = usize::from(size);
    let mut values = Vec::with_capacity(n);
    for _ in 0..n {
        let mut row = Vec::with_capacity(n);
        for _ in 0..n {
            row.push(tokens.next("cell value")?);
        }
        values.push(row);
    }

    let mut owners = Vec::with_capacity(n);
    for _ in 0..n {
        let mut row = Vec::with_capacity(n);
        for _ in 0..n {
            row.push(tokens.next("owner id")?);
        }
        owners.push(row);
    }

    let query_count: usize = tokens.next("query count")?;
    let mut queries = Vec::with_capacity(query_count.min(MAX_QUERIES));
    for _ in 0..query_count {
        let x: u16 = tokens.next("x coordinate")?;
        let y: u16 = tokens.next("y coordinate")?;
        if x == 0 || x > size || y == 0 || y > size {
            return Err(tokens.error(format!("coordinate ({x}, {y}) out of range for n={size}")));
        }

        queries.push(Query {
            at: Coord::new(x - 1, y - 1),
            new_owner: tokens.next("owner id")?,
            a: tokens.next("coefficient a")?,
            b: tokens.next("coefficient b")?,
            c: tokens.next("coefficient c")?,
        });
    }

    Ok(TestCase { size, values, owners, queries })
}

/// Check a parsed case against the contest limits.
///
/// Returns one message per violated limit, empty if the case conforms.
#[must_use]
pub fn check_limits(case: &TestCase) -> Vec<String> {
    let mut problems = Vec::new();

    if case.size > MAX_SIZE {
        problems.push(format!("grid size {} exceeds {MAX_SIZE}", case.size));
    }
    if case.queries.len() > MAX_QUERIES {
        problems.push(format!("{} queries exceed {MAX_QUERIES}", case.queries.len()));
    }

    if let Some(value) = case
        .values
        .iter()
        .flatten()
        .find(|value| value.abs() > MAX_ABS_VALUE)
    {
        problems.push(format!("cell value {value} outside ±{MAX_ABS_VALUE}"));
    }

    if let Some(owner) = case
        .owners
        .iter()
        .flatten()
        .chain(case.queries.iter().map(|query| &query.new_owner))
        .find(|&&owner| owner > MAX_OWNER_ID)
    {
        problems.push(format!("owner id {owner} exceeds {MAX_OWNER_ID}"));
    }

    for (limit, name, worst) in [
        (MAX_ABS_A, "a", case.queries.iter().map(|q| q.a.abs()).max()),
        (MAX_ABS_B, "b", case.queries.iter().map(|q| q.b.abs()).max()),
        (MAX_ABS_C, "c", case.queries.iter().map(|q| q.c.abs()).max()),
    ] {
        if let Some(worst) = worst {
            if worst > limit {
                problems.push(format!("coefficient {name} magnitude {worst} exceeds {limit}"));
            }
        }
    }

    problems
}

/// Solve one case: apply each ownership change and evaluate its query.
///
/// A fresh [`World`] is built per case; nothing carries across cases.
///
/// # Errors
///
/// Returns an [`EngineError`] if the grids are malformed. (A query can
/// never see an empty world here: every query follows an assignment.)
pub fn solve_case(case: &TestCase) -> Result<Vec<i64>, EngineError> {
    let mut world = World::new(&case.values, &case.owners)?;

    let mut answers = Vec::with_capacity(case.queries.len());
    for query in &case.queries {
        world.apply_owner_change(query.at, query.new_owner);
        answers.push(world.best_score(query.a, query.b, query.c)?);
    }

    Ok(answers)
}

/// Write one case's answers: space-separated, newline-terminated.
///
/// Writes nothing for an empty answer list.
///
/// # Errors
///
/// Returns any I/O error from the writer.
pub fn write_answers<W: Write>(w: &mut W, answers: &[i64]) -> io::Result<()> {
    for (i, answer) in answers.iter().enumerate() {
        if i > 0 {
            write!(w, " ")?;
        }
        write!(w, "{answer}")?;
    }
    if !answers.is_empty() {
        writeln!(w)?;
    }
    Ok(())
}

/// Write test cases back out in the contest input format.
///
/// # Errors
///
/// Returns any I/O error from the writer.
pub fn render_input<W: Write>(w: &mut W, cases: &[TestCase]) -> io::Result<()> {
    writeln!(w, "{}", cases.len())?;

    for case in cases {
        writeln!(w, "{}", case.size)?;
        for row in &case.values {
            write_row(w, row)?;
        }
        for row in &case.owners {
            write_row(w, row)?;
        }
        writeln!(w, "{}", case.queries.len())?;
        for query in &case.queries {
            writeln!(
                w,
                "{} {} {} {} {} {}",
                query.at.x + 1,
                query.at.y + 1,
                query.new_owner,
                query.a,
                query.b,
                query.c
            )?;
        }
    }

    Ok(())
}

fn write_row<W: Write, T: fmt::Display>(w: &mut W, row: &[T]) -> io::Result<()> {
    for (i, item) in row.iter().enumerate() {
        if i > 0 {
            write!(w, " ")?;
        }
        write!(w, "{item}")?;
    }
    writeln!(w)
}
