/// Right-aligned `key: value` line used by `config show`.
pub fn kv(key: &str, value: &str) -> String {
    format!("{key:>12}: {value}")
}

pub fn header(title: &str) -> String {
    format!("=== {title} ===")
}

/// "1 upload", "3 uploads".
pub fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}
