use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Serialize;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};

/// Use the secret given on the command line, or read the first line of stdin.
pub(super) async fn secret_or_stdin(secret: Option<SecretString>) -> Result<SecretString> {
    if let Some(secret) = secret {
        return Ok(secret);
    }

    let mut line = String::new();
    BufReader::new(stdin())
        .read_line(&mut line)
        .await
        .context("failed to read secret from stdin")?;

    let len = strip_line_ending(&line).len();
    line.truncate(len);

    Ok(SecretString::from(line))
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Print one JSON line to stdout.
pub(super) fn emit<T: Serialize>(value: &T) -> Result<()> {
    let line = serde_json::to_string(value).context("failed to serialize output")?;
    println!("{line}");
    Ok(())
}
