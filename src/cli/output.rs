//! Output formatting for CLI

use crate::tictactoe::CELL_NAMES;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a count together with its share of `total`
pub fn format_share(count: usize, total: usize) -> String {
    let pct = if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    };
    format!("{} ({pct:.1}%)", format_number(count))
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print the value of each move, `None` meaning the pair was never visited
pub fn print_move_values(values: &[(usize, Option<f64>)]) {
    for &(action, value) in values {
        let name = CELL_NAMES.get(action).copied().unwrap_or("?");
        let shown = value.map_or_else(|| "unvisited".to_string(), |v| format!("{v:+.4}"));
        print_kv(&format!("{action} {name}"), &shown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(50_000), "50,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_share() {
        assert_eq!(format_share(1, 4), "1 (25.0%)");
        assert_eq!(format_share(0, 0), "0 (0.0%)");
    }
}
