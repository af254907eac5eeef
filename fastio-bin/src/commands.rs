use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use fastio::{FastReader, FastWriter};

/// Runs [`sum_into`] over the given files, falling back to stdin and stdout.
pub fn sum(input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let source: Box<dyn Read> = match &input {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("open {}", path.display()))?,
        ),
        None => Box::new(std::io::stdin().lock()),
    };
    let sink: Box<dyn Write> = match &output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };

    sum_into(source, sink)
}

pub fn sum_into<R: Read, W: Write>(source: R, sink: W) -> Result<()> {
    let mut reader = FastReader::new(source);
    let mut writer = FastWriter::new(sink);

    let n = reader.next_int64().context("read N")?;
    let mut sum = 0i64;
    for i in 0..n {
        let x = reader
            .next_int64()
            .with_context(|| format!("read int #{}", i))?;
        sum = sum.wrapping_add(x);
    }
    tracing::debug!(count = n, sum, "summed input");

    writer.write_int64(sum).context("write sum")?;
    writer.write_byte(b'\n').context("write newline")?;
    writer.flush().context("flush output")?;
    writer.get_mut().flush().context("flush output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> Result<String> {
        let mut out = Vec::new();
        sum_into(input.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn sums_counted_integers() {
        assert_eq!(run("3\n1 2 3\n").unwrap(), "6\n");
        assert_eq!(run("2 -10 4").unwrap(), "-6\n");
        assert_eq!(run("0").unwrap(), "0\n");
    }

    #[test]
    fn ignores_trailing_tokens() {
        assert_eq!(run("1 5 6 7").unwrap(), "5\n");
    }

    #[test]
    fn reports_missing_integers() {
        let err = run("3\n1 2\n").unwrap_err();
        assert_eq!(err.to_string(), "read int #2");
        let source = err.downcast_ref::<fastio::Error>().unwrap();
        assert!(source.is_end_of_input());
    }

    #[test]
    fn reports_malformed_count() {
        let err = run("three 1 2 3").unwrap_err();
        assert_eq!(err.to_string(), "read N");
        assert!(matches!(
            err.downcast_ref::<fastio::Error>(),
            Some(fastio::Error::MalformedNumber { .. })
        ));
    }
}
