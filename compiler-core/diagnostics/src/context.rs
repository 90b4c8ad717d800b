use line_index::{LineCol, LineIndex};

/// A position resolved against a file's line-start table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    /// 0-based.
    pub line: u32,
    /// 0-based, in characters.
    pub character: u32,
}

pub struct SourceContext<'a> {
    text: &'a str,
    line_index: LineIndex,
}

impl<'a> SourceContext<'a> {
    pub fn new(text: &'a str) -> SourceContext<'a> {
        let line_index = LineIndex::new(text);
        SourceContext { text, line_index }
    }

    /// Resolves a byte offset, or `None` if it does not fall on a character
    /// boundary inside the text.
    pub fn position(&self, offset: u32) -> Option<Position> {
        if offset as usize > self.text.len() {
            return None;
        }
        let LineCol { line, col } = self.line_index.line_col(offset.into());
        let line_start = offset.checked_sub(col)? as usize;
        let until_col = self.text.get(line_start..offset as usize)?;
        let character = until_col.chars().count() as u32;
        Some(Position { line, character })
    }

    /// The full text of the line containing `offset`, from its line start up
    /// to and including the line terminator.
    pub fn line_text(&self, offset: u32) -> Option<&'a str> {
        if offset as usize > self.text.len() {
            return None;
        }
        let LineCol { col, .. } = self.line_index.line_col(offset.into());
        let line_start = offset.checked_sub(col)? as usize;
        let rest = self.text.get(line_start..)?;
        let line_end = rest.find('\n').map_or(rest.len(), |newline| newline + 1);
        rest.get(..line_end)
    }
}
