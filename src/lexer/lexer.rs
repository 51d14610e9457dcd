#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Normal,
    InSingle,
    InDouble,
}

/// Splits a raw line into words.
///
/// Quotes group whitespace into a word and are themselves dropped. A quote
/// left open at the end of the line is closed silently, so everything read so
/// far still becomes the trailing word. Redirection operators get no special
/// treatment here and must be written as separate words.
pub struct Lexer<'a> {
    input: &'a str,
    state: LexState,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            state: LexState::Normal,
        }
    }

    pub fn tokenize(&mut self) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut buf = String::new();
        self.state = LexState::Normal;

        for ch in self.input.chars() {
            match (self.state, ch) {
                (LexState::Normal, '\'') => self.state = LexState::InSingle,
                (LexState::InSingle, '\'') => self.state = LexState::Normal,
                (LexState::Normal, '"') => self.state = LexState::InDouble,
                (LexState::InDouble, '"') => self.state = LexState::Normal,
                (LexState::Normal, c) if is_blank(c) => {
                    if !buf.is_empty() {
                        tokens.push(std::mem::take(&mut buf));
                    }
                }
                (_, c) => buf.push(c),
            }
        }

        if !buf.is_empty() {
            tokens.push(buf);
        }
        tokens
    }

    /// True if the last `tokenize` call ended inside a quote.
    pub fn is_unterminated(&self) -> bool {
        self.state != LexState::Normal
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

pub fn tokenize(line: &str) -> Vec<String> {
    let mut lexer = Lexer::new(line);
    let tokens = lexer.tokenize();
    if lexer.is_unterminated() {
        log::warn!("unterminated quote in {:?}; closing it at end of line", line);
    }
    tokens
}
