//! Byte-level tokenizer for canonical S-expression text

/// Token kinds. Whitespace runs collapse into one token since the
/// grammar requires separators between elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    Open,
    Close,
    Whitespace,
    Atom(&'a [u8]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    /// Byte offset of the first byte of the token
    pub offset: usize,
}

pub fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Bytes that terminate an atom
pub fn is_delimiter(byte: u8) -> bool {
    byte == b'(' || byte == b')' || is_whitespace(byte)
}

/// Tokenizer over a borrowed input buffer
pub struct Lexer<'a> {
    input: &'a [u8],
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Lexer { input, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a [u8] {
        let start = self.position;
        while self.position < self.input.len() && pred(self.input[self.position]) {
            self.position += 1;
        }
        &self.input[start..self.position]
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let offset = self.position;
        let byte = *self.input.get(offset)?;

        let kind = match byte {
            b'(' => {
                self.position += 1;
                TokenKind::Open
            }
            b')' => {
                self.position += 1;
                TokenKind::Close
            }
            b if is_whitespace(b) => {
                self.take_while(is_whitespace);
                TokenKind::Whitespace
            }
            _ => TokenKind::Atom(self.take_while(|b| !is_delimiter(b))),
        };

        Some(Token { kind, offset })
    }
}
