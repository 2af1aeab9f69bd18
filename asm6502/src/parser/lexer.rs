//! Tokenizer for a single source line

/// One lexical unit of a source line. Whitespace is kept as a token because
/// the operand syntaxes care where it appears.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// Run of word characters (`[A-Za-z0-9_]+`)
    Word(&'a str),
    /// `$` followed by hex digits; the text includes the `$`
    Hex(&'a str),
    Space,
    Hash,
    Comma,
    Colon,
    Star,
    Equals,
    LParen,
    RParen,
    /// Anything the grammar has no use for
    Other(char),
}

impl<'a> Token<'a> {
    /// Text usable as an operand (`\w+` or `$hex`).
    pub fn operand(&self) -> Option<&'a str> {
        match self {
            Token::Word(s) | Token::Hex(s) => Some(*s),
            _ => None,
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Drop a trailing `;` comment and surrounding whitespace.
pub fn strip_comment(line: &str) -> &str {
    line.split(';').next().unwrap_or("").trim()
}

pub fn tokenize(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        let (token, len) = if c.is_whitespace() {
            let len = rest
                .find(|ch: char| !ch.is_whitespace())
                .unwrap_or(rest.len());
            (Token::Space, len)
        } else if is_word_char(c) {
            let len = rest.find(|ch: char| !is_word_char(ch)).unwrap_or(rest.len());
            (Token::Word(&rest[..len]), len)
        } else if c == '$' {
            let digits = rest[1..]
                .find(|ch: char| !ch.is_ascii_hexdigit())
                .unwrap_or(rest.len() - 1);
            if digits == 0 {
                (Token::Other('$'), 1)
            } else {
                (Token::Hex(&rest[..=digits]), digits + 1)
            }
        } else {
            let token = match c {
                '#' => Token::Hash,
                ',' => Token::Comma,
                ':' => Token::Colon,
                '*' => Token::Star,
                '=' => Token::Equals,
                '(' => Token::LParen,
                ')' => Token::RParen,
                other => Token::Other(other),
            };
            (token, c.len_utf8())
        };
        tokens.push(token);
        rest = &rest[len..];
    }

    tokens
}
