//! URL list input.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Reads URLs from `path`, or from stdin when `path` is `-`.
///
/// One URL per line; surrounding whitespace is trimmed, and blank lines and
/// lines starting with `#` are skipped. URLs are not validated.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a line cannot be read.
pub async fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let urls = if path.as_os_str() == "-" {
        info!("Reading URLs from stdin");
        collect_urls(BufReader::new(tokio::io::stdin())).await?
    } else {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open input file {}", path.display()))?;
        collect_urls(BufReader::new(file))
            .await
            .with_context(|| format!("Failed to read input file {}", path.display()))?
    };
    info!("Read {} URL(s) from {}", urls.len(), path.display());
    Ok(urls)
}

async fn collect_urls<R: AsyncBufRead + Unpin>(reader: R) -> Result<Vec<String>> {
    let mut urls = Vec::new();
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        urls.push(trimmed.to_string());
    }
    Ok(urls)
}
