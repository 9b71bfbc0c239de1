//! Hosts-style block list parsing.
//!
//! Supported lines:
//! - `# comment` or blank         → skipped
//! - `<blackhole target> name`    → name (targets: `0.0.0.0`, `::1`, `:::1`,
//!   `255.255.255.255` and any `127.*` address)
//! - `name`                       → name
//!
//! Trailing `# comments` are stripped. Any other shape is ignored. Names keep
//! their case and get a trailing dot so they match query names directly.

/// Parse one line of a block list into a fully qualified name.
pub fn parse_list_line(line: &str) -> Option<String> {
    let line = line.trim();

    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let entry = match line.split_once('#') {
        Some((entry, _comment)) => entry.trim(),
        None => line,
    };

    let parts: Vec<&str> = entry.split_whitespace().collect();
    match parts.as_slice() {
        [name] => Some(fqdn(name)),
        [target, name] if is_blackhole_target(target) => Some(fqdn(name)),
        _ => None,
    }
}

/// Parse an entire list text.
pub fn parse_list_text(text: &str) -> Vec<String> {
    text.lines().filter_map(parse_list_line).collect()
}

fn is_blackhole_target(target: &str) -> bool {
    matches!(target, "0.0.0.0" | "::1" | ":::1" | "255.255.255.255") || target.starts_with("127.")
}

fn fqdn(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}
