//! Small text fragments shared by the emitter and the query templates.

use ddlsmith_core::CommaStyle;

const INDENT: &str = "  ";

/// Lay out `items` one per line, separated according to `style`.
///
/// ```
/// use ddlsmith_core::CommaStyle;
/// use ddlsmith_generate::format_comma_separated_list;
///
/// let items = ["id INT", "name STRING"];
/// assert_eq!(
///     format_comma_separated_list(&items, CommaStyle::Trailing),
///     "  id INT,\n  name STRING"
/// );
/// assert_eq!(
///     format_comma_separated_list(&items, CommaStyle::LeadingSpace),
///     "  id INT\n  , name STRING"
/// );
/// ```
pub fn format_comma_separated_list<S: AsRef<str>>(items: &[S], style: CommaStyle) -> String {
    let mut out = String::new();
    for (index, item) in items.iter().enumerate() {
        let item = item.as_ref();
        if index == 0 {
            out.push_str(INDENT);
            out.push_str(item);
            continue;
        }
        match style {
            CommaStyle::Trailing => {
                out.push_str(",\n");
                out.push_str(INDENT);
            }
            CommaStyle::LeadingSpace => {
                out.push('\n');
                out.push_str(INDENT);
                out.push_str(", ");
            }
            CommaStyle::LeadingNoSpace => {
                out.push('\n');
                out.push_str(INDENT);
                out.push(',');
            }
        }
        out.push_str(item);
    }
    out
}

/// Single-line list in `style`, as used inside key column parentheses.
///
/// `a, b` for trailing commas, `a , b` and `a ,b` for the leading styles.
pub fn join_inline<S: AsRef<str>>(items: &[S], style: CommaStyle) -> String {
    let separator = match style {
        CommaStyle::Trailing => ", ",
        CommaStyle::LeadingSpace => " , ",
        CommaStyle::LeadingNoSpace => " ,",
    };
    items
        .iter()
        .map(|item| item.as_ref())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Escape a value for use inside a single-quoted SQL literal.
pub fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

/// Render free text as `-- ` comment lines.
///
/// Every line break, including a lone `\r`, starts a new comment line.
pub fn comment_lines(text: &str) -> String {
    text.trim_end_matches(['\r', '\n'])
        .replace("\r\n", "\n")
        .split(['\r', '\n'])
        .map(|line| {
            let line = line.trim_end();
            if line.is_empty() {
                "--".to_string()
            } else {
                format!("-- {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
