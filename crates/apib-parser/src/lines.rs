//! Line scanner: splits source text into lines that know their character
//! offset and indentation.

/// One source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line<'a> {
    /// Character offset of the first character of the line.
    pub offset: usize,
    /// Leading spaces.
    pub indent: usize,
    /// Line text after the indentation, without a trailing `\r`.
    pub text: &'a str,
}

impl<'a> Line<'a> {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Offset of the first non-space character.
    pub fn content_offset(&self) -> usize {
        self.offset + self.indent
    }

    /// Length of the line content in characters.
    pub fn content_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Heading level and text, for `#`-style headings indented less than four spaces.
    pub fn heading(&self) -> Option<(usize, &'a str)> {
        if self.indent > 3 || !self.text.starts_with('#') {
            return None;
        }
        let level = self.text.chars().take_while(|c| *c == '#').count();
        let rest = &self.text[level..];
        if level > 6 || !(rest.is_empty() || rest.starts_with(' ')) {
            return None;
        }
        let title = rest.trim().trim_end_matches('#').trim_end();
        Some((level, title))
    }

    /// Text of a `+`, `-` or `*` list item.
    pub fn list_item(&self) -> Option<&'a str> {
        let mut chars = self.text.chars();
        match (chars.next(), chars.next()) {
            (Some('+' | '-' | '*'), Some(' ')) => Some(self.text[2..].trim()),
            (Some('+' | '-' | '*'), None) => Some(""),
            _ => None,
        }
    }
}

/// Splits `source` into lines.
pub(crate) fn scan(source: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut offset = 0;
    for raw in source.split('\n') {
        let text = raw.strip_suffix('\r').unwrap_or(raw);
        let indent = text.chars().take_while(|c| *c == ' ').count();
        lines.push(Line {
            offset,
            indent,
            text: &text[indent..],
        });
        offset += raw.chars().count() + 1;
    }
    lines
}
