use vurif_core::{Attribute, VurifError};

/// Byte cursor shared by the block extractor and the template compiler.
pub(crate) struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pub(crate) pos: usize,
}

pub(crate) struct OpenTag<'a> {
    pub name: &'a str,
    pub attrs: Vec<Attribute>,
    pub self_closing: bool,
    pub start: usize,
}

#[inline]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    pub fn src(&self) -> &'a str {
        self.src
    }

    pub fn eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    pub fn starts_with(&self, s: &str) -> bool {
        self.bytes[self.pos..].starts_with(s.as_bytes())
    }

    /// Line number (1-based) of a byte offset.
    pub fn line_at(&self, pos: usize) -> usize {
        self.bytes[..pos.min(self.bytes.len())]
            .iter()
            .filter(|b| **b == b'\n')
            .count()
            + 1
    }

    pub fn error(&self, pos: usize, message: impl Into<String>) -> VurifError {
        VurifError::parse(self.line_at(pos), message)
    }

    /// Move to the next `<`, returning false at end of input.
    pub fn seek_lt(&mut self) -> bool {
        match self.bytes[self.pos..].iter().position(|b| *b == b'<') {
            Some(offset) => {
                self.pos += offset;
                true
            }
            None => {
                self.pos = self.bytes.len();
                false
            }
        }
    }

    /// Whether the cursor sits on `<` followed by a tag name.
    pub fn at_open_tag(&self) -> bool {
        self.peek() == Some(b'<') && self.peek_at(1).is_some_and(|b| b.is_ascii_alphabetic())
    }

    /// Whether the cursor sits on `</` followed by a tag name.
    pub fn at_close_tag(&self) -> bool {
        self.starts_with("</") && self.peek_at(2).is_some_and(|b| b.is_ascii_alphabetic())
    }

    /// Skip an HTML comment starting at the cursor.
    pub fn skip_comment(&mut self) -> Result<(), VurifError> {
        let start = self.pos;
        match self.src[self.pos + 4..].find("-->") {
            Some(offset) => {
                self.pos += 4 + offset + 3;
                Ok(())
            }
            None => Err(self.error(start, "unterminated comment")),
        }
    }

    /// Skip a `{{ ... }}` interpolation starting at the cursor. An
    /// unterminated one swallows the rest of the input as text.
    pub fn skip_interpolation(&mut self) {
        match self.src[self.pos + 2..].find("}}") {
            Some(offset) => self.pos += 2 + offset + 2,
            None => self.pos = self.bytes.len(),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if !is_whitespace(b) {
                break;
            }
            self.pos += 1;
        }
    }

    fn read_name(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if is_whitespace(b) || b == b'/' || b == b'>' {
                break;
            }
            self.pos += 1;
        }
        &self.src[start..self.pos]
    }

    /// Read an opening tag with its attributes. The cursor must be on `<`.
    pub fn read_open_tag(&mut self) -> Result<OpenTag<'a>, VurifError> {
        let start = self.pos;
        self.pos += 1;
        let name = self.read_name();
        let mut attrs = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(self.error(start, format!("unterminated tag <{}>", name))),
                Some(b'>') => {
                    self.pos += 1;
                    return Ok(OpenTag {
                        name,
                        attrs,
                        self_closing: false,
                        start,
                    });
                }
                Some(b'/') if self.peek_at(1) == Some(b'>') => {
                    self.pos += 2;
                    return Ok(OpenTag {
                        name,
                        attrs,
                        self_closing: true,
                        start,
                    });
                }
                Some(b'/') => self.pos += 1,
                Some(_) => attrs.push(self.read_attribute(start, name)?),
            }
        }
    }

    fn read_attribute(&mut self, tag_start: usize, tag: &str) -> Result<Attribute, VurifError> {
        let name_start = self.pos;
        while let Some(b) = self.peek() {
            if is_whitespace(b) || b == b'=' || b == b'>' || b == b'/' {
                break;
            }
            self.pos += 1;
        }
        // A stray quote or `=` would otherwise never advance the cursor.
        if self.pos == name_start {
            self.pos += 1;
        }
        let name = self.src[name_start..self.pos].to_string();
        self.skip_whitespace();
        if self.peek() != Some(b'=') {
            return Ok(Attribute { name, value: None });
        }
        self.pos += 1;
        self.skip_whitespace();
        let value = match self.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                let value_start = self.pos + 1;
                match self.bytes[value_start..].iter().position(|b| *b == quote) {
                    Some(offset) => {
                        self.pos = value_start + offset + 1;
                        &self.src[value_start..value_start + offset]
                    }
                    None => {
                        return Err(self.error(
                            tag_start,
                            format!("unterminated attribute value in <{}>", tag),
                        ));
                    }
                }
            }
            _ => {
                let value_start = self.pos;
                while let Some(b) = self.peek() {
                    if is_whitespace(b) || b == b'>' {
                        break;
                    }
                    self.pos += 1;
                }
                &self.src[value_start..self.pos]
            }
        };
        Ok(Attribute {
            name,
            value: Some(value.to_string()),
        })
    }

    /// Read a closing tag. The cursor must be on `</`.
    pub fn read_close_tag(&mut self) -> Result<&'a str, VurifError> {
        let start = self.pos;
        self.pos += 2;
        let name = self.read_name();
        match self.bytes[self.pos..].iter().position(|b| *b == b'>') {
            Some(offset) => {
                self.pos += offset + 1;
                Ok(name)
            }
            None => Err(self.error(start, format!("unterminated closing tag </{}>", name))),
        }
    }

    /// Position of the next `</name` (ASCII case-insensitive) at or after
    /// the cursor.
    pub fn find_close_tag(&self, name: &str) -> Option<usize> {
        let needle = format!("</{}", name.to_ascii_lowercase());
        let len = needle.len();
        (self.pos..self.bytes.len().saturating_sub(len - 1)).find(|&i| {
            self.bytes[i..i + len].eq_ignore_ascii_case(needle.as_bytes())
                && self
                    .bytes
                    .get(i + len)
                    .is_none_or(|b| is_whitespace(*b) || *b == b'>')
        })
    }
}
