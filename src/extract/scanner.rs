//! Character-level cursor over DDL text.

/// A forward-only cursor over an input string. Keyword search is
/// ASCII-case-insensitive; everything else is consumed verbatim.
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Current byte offset into the input.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Move the cursor to an absolute byte offset.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos.min(self.input.len());
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Advance past the next case-insensitive occurrence of `keyword`.
    /// Returns false (cursor unchanged) when no occurrence remains.
    /// `keyword` must be ASCII.
    pub fn seek_keyword(&mut self, keyword: &str) -> bool {
        let needle = keyword.as_bytes();
        let haystack = self.rest().as_bytes();
        if needle.is_empty() || needle.len() > haystack.len() {
            return false;
        }
        for start in 0..=haystack.len() - needle.len() {
            if haystack[start..start + needle.len()].eq_ignore_ascii_case(needle) {
                self.pos += start + needle.len();
                return true;
            }
        }
        false
    }

    /// Consume a run of whitespace. Returns true if at least one
    /// character was consumed.
    pub fn skip_whitespace(&mut self) -> bool {
        let trimmed = self.rest().trim_start();
        let skipped = self.rest().len() - trimmed.len();
        self.pos += skipped;
        skipped > 0
    }

    /// Consume a run of non-whitespace characters, verbatim. Quotes and
    /// other punctuation are part of the word.
    pub fn read_word(&mut self) -> &'a str {
        let rest = self.rest();
        let end = rest
            .find(char::is_whitespace)
            .unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }

    /// Consume a run of ASCII word characters (letters, digits, `_`).
    pub fn read_ident(&mut self) -> &'a str {
        let rest = self.rest();
        let end = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }

    /// Consume `c` if it is the next character.
    pub fn eat(&mut self, c: char) -> bool {
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Absolute byte offset of the next occurrence of `c`, or None.
    pub fn find(&self, c: char) -> Option<usize> {
        self.rest().find(c).map(|i| self.pos + i)
    }

    /// Slice of the input between two absolute byte offsets.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.input[start..end]
    }

    /// Byte of the input at an absolute offset.
    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        self.input.as_bytes().get(pos).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seek_keyword_case_insensitive() {
        let mut s = Scanner::new("xx create TABLE yy");
        assert!(s.seek_keyword("CREATE TABLE"));
        assert_eq!(&"xx create TABLE yy"[s.pos()..], " yy");
    }

    #[test]
    fn test_seek_keyword_missing() {
        let mut s = Scanner::new("nothing here");
        assert!(!s.seek_keyword("CREATE TABLE"));
        assert_eq!(s.pos(), 0);
    }

    #[test]
    fn test_read_word_verbatim() {
        let mut s = Scanner::new(r#""users" (id INT)"#);
        assert_eq!(s.read_word(), r#""users""#);
    }

    #[test]
    fn test_read_ident_stops_at_paren() {
        let mut s = Scanner::new("users(id)");
        assert_eq!(s.read_ident(), "users");
        assert!(s.eat('('));
        assert_eq!(s.read_ident(), "id");
        assert!(s.eat(')'));
    }

    #[test]
    fn test_skip_whitespace() {
        let mut s = Scanner::new("  \n\tx");
        assert!(s.skip_whitespace());
        assert!(!s.skip_whitespace());
        assert!(s.eat('x'));
    }
}
