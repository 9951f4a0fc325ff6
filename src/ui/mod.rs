//! Terminal presentation: tables and synthesized help

pub mod help;
pub mod table;

pub use help::{HelpAction, HelpPage};
pub use table::Table;

/// Capitalize the first letter, used for table titles like "Git Commands"
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Remove ANSI colour sequences so rendered text can be compared
#[cfg(test)]
pub(crate) fn strip_ansi(text: &str) -> String {
    let re = regex::Regex::new(r"\x1b\[[0-9;]*m").unwrap();
    re.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("git"), "Git");
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("ip"), "Ip");
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[1mHelp\x1b[0m: x"), "Help: x");
        assert_eq!(strip_ansi("plain"), "plain");
    }
}
