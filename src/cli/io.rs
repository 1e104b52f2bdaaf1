//! Line-delimited JSON I/O for the CLI
//!
//! - Input: one request object per line
//! - Output: one response object per line, flushed immediately
//! - UTF-8 only

use std::io::{BufRead, Write};

use super::errors::CliResult;

/// Iterates non-blank request lines; read failures are yielded as errors
pub fn read_requests<R: BufRead>(input: R) -> impl Iterator<Item = CliResult<String>> {
    input
        .lines()
        .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
        .map(|line| line.map_err(Into::into))
}

/// Write one response line and flush
pub fn write_line<W: Write>(output: &mut W, line: &str) -> CliResult<()> {
    writeln!(output, "{}", line)?;
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_blank_lines_skipped() {
        let input = Cursor::new("{\"a\":1}\n\n   \n{\"b\":2}\n");
        let lines: Vec<String> = read_requests(input).map(|l| l.unwrap()).collect();
        assert_eq!(lines, ["{\"a\":1}", "{\"b\":2}"]);
    }

    #[test]
    fn test_write_line_terminates() {
        let mut out = Vec::new();
        write_line(&mut out, "{}").unwrap();
        write_line(&mut out, "[]").unwrap();
        assert_eq!(out, b"{}\n[]\n");
    }
}
