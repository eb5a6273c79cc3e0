use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::OutputFormat;
use crate::state::ListState;
use crate::types::User;

/// Global output settings, set once from the command line
static OUTPUT_FORMAT: AtomicU8 = AtomicU8::new(0);
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_format(format: OutputFormat) {
    let raw = match format {
        OutputFormat::Table => 0,
        OutputFormat::Json => 1,
        OutputFormat::Compact => 2,
    };
    OUTPUT_FORMAT.store(raw, Ordering::Relaxed);
}

pub fn format() -> OutputFormat {
    match OUTPUT_FORMAT.load(Ordering::Relaxed) {
        1 => OutputFormat::Json,
        2 => OutputFormat::Compact,
        _ => OutputFormat::Table,
    }
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Age")]
    age: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: truncate(&user.name, 30),
            age: age_label(user.age),
        }
    }
}

/// Print a table, JSON or compact lines depending on output mode
pub fn print_table<T, R, F>(items: &[T], to_row: F, to_line: impl Fn(&T) -> String)
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    match format() {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items).unwrap_or_default());
        }
        OutputFormat::Compact => {
            for item in items {
                println!("{}", to_line(item));
            }
        }
        OutputFormat::Table => {
            let rows: Vec<R> = items.iter().map(to_row).collect();
            let table = Table::new(rows).with(Style::rounded()).to_string();
            println!("{table}");
        }
    }
}

/// Print a message (skipped when quiet, simple object in JSON mode)
pub fn print_message(message: &str) {
    if is_quiet() {
        return;
    }
    if format() == OutputFormat::Json {
        eprintln!("{}", json_message(message));
    } else {
        println!("{}", message.green());
    }
}

fn json_message(message: &str) -> String {
    serde_json::json!({ "message": message }).to_string()
}

/// Progress note on stderr, e.g. while the list is loading (table mode only)
pub fn print_status(status: &str) {
    if is_quiet() || format() != OutputFormat::Table {
        return;
    }
    eprintln!("{}", status.bright_black());
}

/// Render the user list
pub fn print_users(state: &ListState) {
    if state.users.is_empty() && format() != OutputFormat::Json {
        print_message("No users");
        return;
    }

    print_table(&state.users, |u| UserRow::from(u), compact_line);
}

fn compact_line(user: &User) -> String {
    format!("{}\t{}\t{}", user.id, user.name, age_label(user.age))
}

fn age_label(age: Option<u32>) -> String {
    age.map_or_else(|| "-".to_string(), |age| age.to_string())
}

/// Truncate a string with ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Alice", 10), "Alice");
        assert_eq!(truncate("Clementina DuBuque", 10), "Clement...");
        assert_eq!(truncate("ääääää", 5), "ää...");
    }

    #[test]
    fn test_compact_line() {
        let user = User {
            id: 3,
            name: "Clementine Bauch".to_string(),
            age: Some(41),
        };
        assert_eq!(compact_line(&user), "3\tClementine Bauch\t41");
    }

    #[test]
    fn test_unknown_age_renders_dash() {
        let row = UserRow::from(&User {
            id: 1,
            name: "Leanne Graham".to_string(),
            age: None,
        });
        assert_eq!(row.age, "-");
        assert_eq!(row.id, 1);
    }

    #[test]
    fn test_json_message_escapes_user_input() {
        let line = json_message("Created user Bo\\zo \"the\"\n (11)");
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["message"], "Created user Bo\\zo \"the\"\n (11)");
    }
}
