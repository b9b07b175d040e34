//! Text rendering for entries.
//!
//! Renderers build a `String` instead of printing so output can be tested.

use std::fmt::Write as _;

use pwkeep_core::Entry;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// ANSI styles, or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub reset: &'static str,
    pub bold: &'static str,
    pub dim: &'static str,
    pub red: &'static str,
    pub green: &'static str,
    pub yellow: &'static str,
    pub cyan: &'static str,
}

impl Palette {
    pub fn new(color: bool) -> Self {
        if color {
            Self {
                reset: RESET,
                bold: BOLD,
                dim: DIM,
                red: RED,
                green: GREEN,
                yellow: YELLOW,
                cyan: CYAN,
            }
        } else {
            Self {
                reset: "",
                bold: "",
                dim: "",
                red: "",
                green: "",
                yellow: "",
                cyan: "",
            }
        }
    }
}

/// Password as shown to the user: the stored encoded form, or decoded when
/// `reveal` is set.
fn password_text(entry: &Entry, reveal: bool, p: Palette) -> String {
    if !reveal {
        return entry.encrypted_password.clone();
    }
    match entry.decoded_password() {
        Ok(plain) => format!("{}{plain}{}", p.yellow, p.reset),
        Err(e) => format!("{}<{e}>{}", p.red, p.reset),
    }
}

/// Render the whole list. Passwords stay encoded unless `reveal` is set.
pub fn entry_list(entries: &[Entry], reveal: bool, p: Palette) -> String {
    let mut out = String::new();
    if entries.is_empty() {
        let _ = writeln!(out, "  {}(no entries){}", p.dim, p.reset);
        return out;
    }
    for entry in entries {
        let _ = writeln!(
            out,
            "{}{}[{}]{} {}{} - {}{}",
            p.cyan, p.bold, entry.id, p.reset, p.bold, entry.category, entry.app, p.reset
        );
        let _ = writeln!(out, "    {}Username:{} {}", p.dim, p.reset, entry.user_name);
        let _ = writeln!(
            out,
            "    {}Password:{} {}",
            p.dim,
            p.reset,
            password_text(entry, reveal, p)
        );
    }
    out
}

/// Render a single selected entry, always with the decoded password.
pub fn entry_detail(entry: &Entry, p: Palette) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}{}Entry {}{}", p.bold, p.cyan, entry.id, p.reset);
    let _ = writeln!(out, "{}─────────────────────────────────────────{}", p.dim, p.reset);
    for (key, value) in [
        ("Category", entry.category.as_str()),
        ("App", entry.app.as_str()),
        ("User", entry.user_name.as_str()),
    ] {
        let _ = writeln!(out, "  {}{key:<20}{} {value}", p.dim, p.reset);
    }
    let _ = writeln!(
        out,
        "  {}{:<20}{} {}",
        p.dim,
        "Password (decoded)",
        p.reset,
        password_text(entry, true, p)
    );
    out
}

pub fn success(msg: &str, p: Palette) -> String {
    format!("{}{}✓{} {msg}", p.green, p.bold, p.reset)
}

#[cfg(test)]
mod tests {
    use pwkeep_core::EntryDraft;

    use super::*;

    fn plain() -> Palette {
        Palette::new(false)
    }

    fn entries() -> Vec<Entry> {
        vec![
            EntryDraft::new("Work", "GitHub", "alice", "secret123").encode_with_id(1),
            EntryDraft::new("Home", "Bank", "bob", "1234").encode_with_id(2),
        ]
    }

    #[test]
    fn list_hides_passwords_by_default() {
        let out = entry_list(&entries(), false, plain());
        assert!(out.contains("[1] Work - GitHub"));
        assert!(out.contains("Username: alice"));
        assert!(out.contains("Password: c2VjcmV0MTIz"));
        assert!(!out.contains("secret123"));
    }

    #[test]
    fn list_reveal_shows_decoded_passwords() {
        let out = entry_list(&entries(), true, plain());
        assert!(out.contains("Password: secret123"));
        assert!(out.contains("Password: 1234"));
        assert!(!out.contains("c2VjcmV0MTIz"));
    }

    #[test]
    fn reveal_reports_undecodable_values() {
        let mut bad = entries();
        bad[0].encrypted_password = "%%%".to_owned();
        let out = entry_list(&bad, true, plain());
        assert!(out.contains("<malformed encoded password"));
        assert!(out.contains("Password: 1234"));
    }

    #[test]
    fn empty_list_says_so() {
        assert!(entry_list(&[], false, plain()).contains("(no entries)"));
    }

    #[test]
    fn detail_shows_decoded_password() {
        let out = entry_detail(&entries()[0], plain());
        assert!(out.contains("Entry 1"));
        assert!(out.contains("GitHub"));
        assert!(out.contains("secret123"));
    }

    #[test]
    fn no_color_emits_no_escapes() {
        let out = entry_list(&entries(), true, plain());
        assert!(!out.contains('\x1b'));
        let colored = entry_list(&entries(), true, Palette::new(true));
        assert!(colored.contains('\x1b'));
    }
}
