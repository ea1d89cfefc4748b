//! Text layout shared by every rendering path.
//!
//! All indentation, banner and list formatting goes through this module so
//! the table, audit and trigger output cannot drift apart.

/// One level of indentation.
pub const INDENT: &str = "    ";

/// Dashed line framing every section banner.
pub const BANNER_RULE: &str = "-- -----------------------------------------------------";

/// Accumulates rendered SQL line by line.
#[derive(Debug, Default)]
pub struct SqlWriter {
    buf: String,
}

impl SqlWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self {
            buf: String::with_capacity(1024),
        }
    }

    /// Section banner followed by a blank line.
    pub fn banner(&mut self, title: &str) -> &mut Self {
        self.line(BANNER_RULE);
        self.line(format!("-- {title}"));
        self.line(BANNER_RULE);
        self.blank()
    }

    /// Append text and terminate it with a newline.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.buf.push_str(text.as_ref());
        self.buf.push('\n');
        self
    }

    /// Append an empty line.
    pub fn blank(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    /// Append already rendered output verbatim.
    pub fn append(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(text);
        self
    }

    /// Append each statement on its own line(s), then a blank line.
    ///
    /// Nothing is written for an empty group.
    pub fn group<I>(&mut self, statements: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut any = false;
        for statement in statements {
            self.line(statement);
            any = true;
        }
        if any {
            self.blank();
        }
        self
    }

    /// Consume the writer.
    pub fn finish(self) -> String {
        self.buf
    }
}

/// Prefix every line of `text` with `depth` indentation levels.
///
/// Line breaks inside a single-quoted literal belong to the literal and are
/// left untouched. Quotes inside backtick identifiers do not open a literal.
pub fn indent(text: &str, depth: usize) -> String {
    let prefix = INDENT.repeat(depth);
    let mut out = String::with_capacity(text.len() + prefix.len());
    out.push_str(&prefix);

    let mut in_literal = false;
    let mut in_identifier = false;
    let mut escaped = false;
    for ch in text.chars() {
        out.push(ch);
        match ch {
            _ if escaped => escaped = false,
            '\\' if in_literal => escaped = true,
            '\'' if !in_identifier => in_literal = !in_literal,
            '`' if !in_literal => in_identifier = !in_identifier,
            '\n' if !in_literal => out.push_str(&prefix),
            _ => {}
        }
    }
    out
}

/// Indent each item and join them with `,` line breaks.
pub fn comma_separated<I>(items: I, depth: usize) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| indent(item.as_ref(), depth))
        .collect::<Vec<_>>()
        .join(",\n")
}

/// Render `head (` + indented items + `tail`.
pub fn parenthesized<I>(head: &str, items: I, tail: &str) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    format!("{head} (\n{}\n){tail}", comma_separated(items, 1))
}
