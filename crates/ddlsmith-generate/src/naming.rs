//! Identifier rewriting for a dialect without quoted identifiers.

use ddlsmith_core::{DdlConfig, NamingConvention};

/// Characters the dialect rejects in unquoted identifiers.
const FORBIDDEN: [char; 12] = [' ', ',', ';', '{', '}', '(', ')', '\n', '\r', '\t', '=', '-'];

/// Emitted instead of an empty identifier.
const PLACEHOLDER: &str = "_";

/// Rewrite a raw name according to `convention`.
///
/// Never returns an empty string or a hyphen.
pub fn transform(raw: &str, convention: NamingConvention) -> String {
    let name = match convention {
        NamingConvention::Original => raw
            .chars()
            .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
            .collect(),
        NamingConvention::Snake | NamingConvention::Lower => {
            join_mapped(&tokenize(raw), "_", str::to_ascii_lowercase)
        }
        NamingConvention::Upper => join_mapped(&tokenize(raw), "_", str::to_ascii_uppercase),
        NamingConvention::Kebab => {
            join_mapped(&tokenize(raw), "-", str::to_ascii_lowercase).replace('-', "_")
        }
        NamingConvention::Camel => {
            // Leading digit-only tokens stay part of the lower-case head.
            let mut out = String::new();
            let mut head_done = false;
            for token in tokenize(raw) {
                if head_done {
                    out.push_str(&capitalize(&token));
                } else {
                    out.push_str(&token.to_ascii_lowercase());
                    head_done = token.chars().any(|c| c.is_ascii_alphabetic());
                }
            }
            out
        }
        NamingConvention::Pascal => tokenize(raw).iter().map(|t| capitalize(t)).collect(),
    };

    if name.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        name
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '-' || c == '_'
}

/// Split a raw name into word tokens.
///
/// Separators are whitespace, `-` and `_`; other non-alphanumeric characters
/// are dropped. Camel-case transitions also start a new token, including the
/// end of an acronym run (`HTTPServer` -> `HTTP`, `Server`).
fn tokenize(raw: &str) -> Vec<String> {
    let chars: Vec<char> = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || is_separator(*c))
        .collect();

    let mut tokens = Vec::new();
    let mut current = String::new();

    for (index, &c) in chars.iter().enumerate() {
        if is_separator(c) {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_ascii_uppercase() && !current.is_empty() {
            let prev = chars[index - 1];
            let next_is_lower = chars
                .get(index + 1)
                .is_some_and(|next| next.is_ascii_lowercase());
            let has_lower = current.chars().any(|ch| ch.is_ascii_lowercase());
            let boundary = prev.is_ascii_lowercase()
                || (prev.is_ascii_digit() && has_lower)
                || ((prev.is_ascii_uppercase() || prev.is_ascii_digit()) && next_is_lower);
            if boundary {
                tokens.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

fn join_mapped(tokens: &[String], separator: &str, map: fn(&str) -> String) -> String {
    tokens
        .iter()
        .map(|token| map(token))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Upper-case the first character, keeping the rest as written.
fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => {
            let mut out = first.to_ascii_uppercase().to_string();
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Applies the configured convention and qualification to model names.
#[derive(Debug, Clone, Copy)]
pub struct Identifiers<'a> {
    config: &'a DdlConfig,
}

impl<'a> Identifiers<'a> {
    pub fn new(config: &'a DdlConfig) -> Self {
        Self { config }
    }

    pub fn name(&self, raw: &str) -> String {
        transform(raw, self.config.naming_convention)
    }

    /// Table name without catalog/schema, as used inside constraint names.
    pub fn table(&self, raw: &str) -> String {
        self.name(raw)
    }

    /// Table name with the configured `catalog.schema.` prefix.
    pub fn qualified_table(&self, raw: &str) -> String {
        let mut parts = self.prefix();
        parts.push(self.table(raw));
        parts.join(".")
    }

    pub fn column(&self, raw: &str) -> String {
        self.name(raw)
    }

    /// Database name derived from the model name, qualified by catalog only.
    pub fn database(&self, raw: &str) -> String {
        let mut parts: Vec<String> = non_empty(self.config.catalog.as_deref())
            .map(|catalog| self.name(catalog))
            .into_iter()
            .collect();
        parts.push(self.name(raw));
        parts.join(".")
    }

    fn prefix(&self) -> Vec<String> {
        [
            non_empty(self.config.catalog.as_deref()),
            non_empty(self.config.schema.as_deref()),
        ]
        .into_iter()
        .flatten()
        .map(|part| self.name(part))
        .collect()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
