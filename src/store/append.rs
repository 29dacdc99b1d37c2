//! Positional insert into text files
//!
//! A POST to an existing file inserts its body at a (line, column)
//! coordinate given by the `Append-Position` header:
//!
//! ```text
//! Append-Position: line=<n>, pos=<m>
//! ```
//!
//! Lines are 1-based and columns 0-based byte offsets. An omitted `line`
//! means "a new line after the last one"; an omitted `pos` means "after the
//! last byte of the target line". Content is treated as raw bytes, so files
//! in any encoding can be appended to. Line `count + 1` is valid and creates
//! that line; anything past it is out of range.

use std::path::Path;

/// Which line to insert into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSpec {
    /// One past the current last line
    EndOfFile,
    /// 1-based line number
    Line(i64),
}

/// Where on the line to insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSpec {
    /// After the last byte
    EndOfLine,
    /// 0-based byte offset
    Column(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendPosition {
    pub line: LineSpec,
    pub column: ColumnSpec,
}

#[derive(Debug, thiserror::Error)]
pub enum AppendError {
    #[error("malformed Append-Position header: {0}")]
    MalformedPosition(String),

    #[error("line {line} is out of range for a file of {lines} lines")]
    LineOutOfRange { line: i64, lines: usize },

    #[error("position {column} is out of range in a line of {length} bytes")]
    ColumnOutOfRange { column: i64, length: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppendPosition {
    /// End of file, end of line: what an absent header means.
    pub const END: AppendPosition = AppendPosition {
        line: LineSpec::EndOfFile,
        column: ColumnSpec::EndOfLine,
    };

    pub fn new(line: LineSpec, column: ColumnSpec) -> Self {
        Self { line, column }
    }

    /// Parses a header value such as `line=3, pos=0` or `line=3 pos=0`.
    ///
    /// Either field may be missing. Negative numbers parse here and fail
    /// later as out of range.
    pub fn parse(value: &str) -> Result<Self, AppendError> {
        let line = match parse_field(value, "line=")? {
            Some(n) => LineSpec::Line(n),
            None => LineSpec::EndOfFile,
        };
        let column = match parse_field(value, "pos=")? {
            Some(n) => ColumnSpec::Column(n),
            None => ColumnSpec::EndOfLine,
        };

        Ok(Self { line, column })
    }
}

/// Reads the integer right after `key`, ignoring whatever follows it.
fn parse_field(value: &str, key: &str) -> Result<Option<i64>, AppendError> {
    let Some(idx) = value.find(key) else {
        return Ok(None);
    };

    let rest = &value[idx + key.len()..];
    let sign_len = usize::from(rest.starts_with('-'));
    let digits_len = rest[sign_len..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();

    if digits_len == 0 {
        return Err(AppendError::MalformedPosition(value.to_string()));
    }

    rest[..sign_len + digits_len]
        .parse::<i64>()
        .map(Some)
        .map_err(|_| AppendError::MalformedPosition(value.to_string()))
}

/// A file's content as an ordered list of lines, without terminators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileLines {
    lines: Vec<Vec<u8>>,
}

impl FileLines {
    /// Splits on `\n`. A trailing newline does not produce an extra empty
    /// line, and `\r` is kept as content.
    pub fn parse(content: &[u8]) -> Self {
        let mut lines: Vec<Vec<u8>> = content
            .split(|b| *b == b'\n')
            .map(<[u8]>::to_vec)
            .collect();

        // `split` yields one empty piece after a final newline, or for empty input
        if lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[Vec<u8>] {
        &self.lines
    }

    /// Joins the lines back, with a newline after every line including
    /// the last.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            out.extend_from_slice(line);
            out.push(b'\n');
        }
        out
    }
}

/// Inserts `data` at `position`, shifting existing bytes right.
///
/// Consumes the lines so a failed insert leaves nothing half-applied for the
/// caller to write back.
pub fn apply(
    mut file: FileLines,
    data: &[u8],
    position: AppendPosition,
) -> Result<FileLines, AppendError> {
    let count = file.lines.len() as i64;

    let line = match position.line {
        LineSpec::EndOfFile => count + 1,
        LineSpec::Line(n) if (1..=count + 1).contains(&n) => n,
        LineSpec::Line(n) => {
            return Err(AppendError::LineOutOfRange {
                line: n,
                lines: file.lines.len(),
            });
        }
    };

    if line == count + 1 {
        file.lines.push(Vec::new());
    }

    let target = &mut file.lines[(line - 1) as usize];
    let length = target.len();

    let column = match position.column {
        ColumnSpec::EndOfLine => length,
        ColumnSpec::Column(c) if (0..=length as i64).contains(&c) => c as usize,
        ColumnSpec::Column(c) => {
            return Err(AppendError::ColumnOutOfRange { column: c, length });
        }
    };

    target.splice(column..column, data.iter().copied());

    Ok(file)
}

/// Reads `path`, inserts `data` at `position` and rewrites the whole file.
///
/// The file is only written when the insert succeeds. The rewrite itself is
/// not atomic.
pub async fn append_to_file(
    path: &Path,
    data: &[u8],
    position: AppendPosition,
) -> Result<(), AppendError> {
    let content = tokio::fs::read(path).await?;

    let updated = apply(FileLines::parse(&content), data, position)?;
    tokio::fs::write(path, updated.to_bytes()).await?;

    Ok(())
}
