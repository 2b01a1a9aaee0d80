use anyhow::Result;
use std::time::Duration;

/// Splits a comma-separated address list. Blank entries are skipped and repeats collapse to the
/// first occurrence so the round-robin rotation stays even.
pub(super) fn parse_node_addrs(label: &str, s: &str) -> Result<Vec<String>> {
    let mut addrs: Vec<String> = Vec::new();
    for entry in s.split(',').map(str::trim).filter(|v| !v.is_empty()) {
        if entry.contains(char::is_whitespace) {
            anyhow::bail!("{label} entry {entry:?} contains whitespace");
        }
        if addrs.iter().any(|a| a == entry) {
            tracing::warn!(var = label, addr = entry, "duplicate node address ignored");
            continue;
        }
        addrs.push(entry.to_string());
    }
    if addrs.is_empty() {
        anyhow::bail!("{label} must be non-empty");
    }
    Ok(addrs)
}

pub(super) fn parse_secs(label: &str, secs: u64) -> Result<Duration> {
    if secs == 0 {
        anyhow::bail!("{label} must be > 0");
    }
    Ok(Duration::from_secs(secs))
}

pub(super) fn opt_trimmed(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
