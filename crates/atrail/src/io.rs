//! Text formats: edge code, edge trail (`.trail`), vertex trail (`.ntrail`).
//!
//! Edge code: a header `p N`, then one line per vertex `0..N` with the
//! whitespace-separated edge indices of its rotation. Missing trailing lines
//! are empty rotations. Trails are a single line of whitespace-separated
//! indices.

use std::fmt;
use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::graph::Embedding;

/// Largest vertex count an edge-code header may declare.
pub const MAX_VERTICES: usize = 1 << 22;

#[derive(Debug)]
pub enum FormatError {
    Io(io::Error),
    MissingHeader,
    BadHeader { line: String },
    /// The header declares more than `MAX_VERTICES` vertices.
    TooManyVertices { vertices: usize },
    /// `line` is 1-based.
    BadIndex { line: usize, token: String },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Io(err) => write!(f, "read failed: {err}"),
            FormatError::MissingHeader => write!(f, "missing `p N` header"),
            FormatError::BadHeader { line } => {
                write!(f, "invalid header {line:?}, expected `p N`")
            }
            FormatError::TooManyVertices { vertices } => write!(
                f,
                "header declares {vertices} vertices, at most {MAX_VERTICES} are supported"
            ),
            FormatError::BadIndex { line, token } => {
                write!(f, "line {line}: {token:?} is not a non-negative index")
            }
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for FormatError {
    fn from(err: io::Error) -> Self {
        FormatError::Io(err)
    }
}

pub fn read_edge_code<R: BufRead>(reader: R) -> Result<Embedding, FormatError> {
    let mut lines = reader.lines();
    let header = lines.next().ok_or(FormatError::MissingHeader)??;
    let n = parse_header(&header)?;
    if n > MAX_VERTICES {
        return Err(FormatError::TooManyVertices { vertices: n });
    }
    let mut rotations = Vec::new();
    let mut extra = 0usize;
    for (i, line) in lines.enumerate() {
        let line = line?;
        if i >= n {
            if !line.trim().is_empty() {
                extra += 1;
            }
            continue;
        }
        rotations.push(parse_indices(&line, i + 2)?);
    }
    rotations.resize_with(n, Vec::new);
    if extra > 0 {
        warn!(lines = extra, vertices = n, "ignoring lines after the last vertex");
    }
    Ok(Embedding::new(rotations))
}

pub fn parse_edge_code(text: &str) -> Result<Embedding, FormatError> {
    read_edge_code(text.as_bytes())
}

pub fn write_edge_code<W: Write>(mut out: W, embedding: &Embedding) -> io::Result<()> {
    writeln!(out, "p {}", embedding.number_of_vertices())?;
    for rot in embedding.rotations() {
        writeln!(out, "{}", join(rot))?;
    }
    Ok(())
}

/// First line of `reader`; an empty input is an empty trail.
pub fn read_trail<R: BufRead>(reader: R) -> Result<Vec<usize>, FormatError> {
    match reader.lines().next() {
        Some(line) => parse_indices(&line?, 1),
        None => Ok(Vec::new()),
    }
}

pub fn parse_trail(text: &str) -> Result<Vec<usize>, FormatError> {
    read_trail(text.as_bytes())
}

pub fn write_trail<W: Write>(mut out: W, trail: &[usize]) -> io::Result<()> {
    writeln!(out, "{}", join(trail))
}

fn parse_header(line: &str) -> Result<usize, FormatError> {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some("p"), Some(n), None) => n.parse().map_err(|_| FormatError::BadHeader {
            line: line.to_string(),
        }),
        (None, _, _) => Err(FormatError::MissingHeader),
        _ => Err(FormatError::BadHeader {
            line: line.to_string(),
        }),
    }
}

fn parse_indices(line: &str, line_no: usize) -> Result<Vec<usize>, FormatError> {
    line.split_whitespace()
        .map(|tok| {
            tok.parse().map_err(|_| FormatError::BadIndex {
                line: line_no,
                token: tok.to_string(),
            })
        })
        .collect()
}

fn join(xs: &[usize]) -> String {
    xs.iter().map(usize::to_string).collect::<Vec<_>>().join(" ")
}
