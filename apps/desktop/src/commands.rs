//! Terminal lines mapped to widget events.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    Input(String),
    Prepend(bool),
    Append(bool),
    Submit,
    Show,
    Quit,
    Unknown(String),
}

impl FormCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Self::Submit;
        }

        let Some(directive) = line.strip_prefix(':') else {
            return Self::Input(line.to_string());
        };

        let mut parts = directive.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();
        match (name, arg) {
            ("submit" | "s", None) => Self::Submit,
            ("state" | "show", None) => Self::Show,
            ("quit" | "q", None) => Self::Quit,
            ("clear", None) => Self::Input(String::new()),
            ("prepend", Some(value)) => match parse_switch(value) {
                Some(on) => Self::Prepend(on),
                None => Self::Unknown(line.to_string()),
            },
            ("append", Some(value)) => match parse_switch(value) {
                Some(on) => Self::Append(on),
                None => Self::Unknown(line.to_string()),
            },
            // a doubled colon escapes literal text starting with ':'
            _ if directive.starts_with(':') => Self::Input(directive.to_string()),
            _ => Self::Unknown(line.to_string()),
        }
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}
