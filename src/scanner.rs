use std::collections::HashMap;
use std::iter::Peekable;

use unicode_segmentation::{GraphemeIndices, UnicodeSegmentation};

use crate::error::*;
use crate::token::*;

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, TokenType> = {
        let mut m = HashMap::new();
        use crate::token::TokenType::*;
        m.insert("and", And);
        m.insert("class", Class);
        m.insert("else", Else);
        m.insert("false", False);
        m.insert("for", For);
        m.insert("fun", Fun);
        m.insert("if", If);
        m.insert("nil", Nil);
        m.insert("or", Or);
        m.insert("print", Print);
        m.insert("return", Return);
        m.insert("super", Super);
        m.insert("this", This);
        m.insert("true", True);
        m.insert("var", Var);
        m.insert("while", While);

        m
    };
}

// Single-use tokenizer.  Pulling tokens through the Iterator impl
// drives the cursor; after the Eof token the sequence is exhausted
// for good.
pub struct Scanner<'source, 'reporter> {
    source: &'source str,
    reporter: &'reporter mut dyn ErrorReporter,
    grapheme_indices: Peekable<GraphemeIndices<'source>>,
    start: usize,
    line: u32,
    eof_emitted: bool,
}

impl<'source, 'reporter> Scanner<'source, 'reporter> {
    pub fn new(source: &'source str,
               reporter: &'reporter mut dyn ErrorReporter)
        -> Scanner<'source, 'reporter>
    {
        Scanner {
            source,
            reporter,
            grapheme_indices: source.grapheme_indices(true).peekable(),
            start: 0,
            line: 1,
            eof_emitted: false,
        }
    }

    // Drains the whole token sequence, Eof included.  Consumes the
    // scanner; a finished scan cannot be restarted.
    pub fn scan_tokens(self) -> Vec<Token<'source>> {
        self.collect()
    }

    // Scans one lexeme.  Returns None when the lexeme produces no
    // token (whitespace, comments, lexical errors); the production
    // loop in next() keeps pulling until a real token appears.
    fn scan_token(&mut self) -> Option<Token<'source>> {
        let (_, grapheme_cluster) = self.advance()?;
        use crate::token::TokenType::*;
        match grapheme_cluster {
            "(" => Some(self.make_token(LeftParen)),
            ")" => Some(self.make_token(RightParen)),
            "{" => Some(self.make_token(LeftBrace)),
            "}" => Some(self.make_token(RightBrace)),
            "," => Some(self.make_token(Comma)),
            "." => Some(self.make_token(Dot)),
            "-" => Some(self.make_token(Minus)),
            "+" => Some(self.make_token(Plus)),
            ";" => Some(self.make_token(Semicolon)),
            "*" => Some(self.make_token(Star)),
            "!" => {
                let token_type = if self.matches("=") { BangEqual } else { Bang };
                Some(self.make_token(token_type))
            }
            "=" => {
                let token_type = if self.matches("=") { EqualEqual } else { Equal };
                Some(self.make_token(token_type))
            }
            "<" => {
                let token_type = if self.matches("=") { LessEqual } else { Less };
                Some(self.make_token(token_type))
            }
            ">" => {
                let token_type = if self.matches("=") { GreaterEqual } else { Greater };
                Some(self.make_token(token_type))
            }
            "/" => self.scan_slash(),
            " " | "\r" | "\t" => None, // Ignore whitespace.
            "\n" => {
                self.line = self.line.saturating_add(1);
                None
            }
            "\"" => self.scan_string(),
            _ => {
                if is_digit(grapheme_cluster) {
                    Some(self.scan_number())
                }
                else if is_alphabetic(grapheme_cluster) {
                    Some(self.scan_identifier())
                }
                else {
                    let message = format!("Unexpected character '{}'.", grapheme_cluster);
                    self.reporter.error(self.line, &message);
                    None
                }
            }
        }
    }

    fn scan_slash(&mut self) -> Option<Token<'source>> {
        if self.matches("/") {
            // A comment until the end of the line.
            while ! self.is_match("\n") && ! self.is_at_end() {
                self.advance();
            }
            None
        }
        else if self.matches("*") {
            self.scan_block_comment();
            None
        }
        else {
            Some(self.make_token(TokenType::Slash))
        }
    }

    // Block comments don't nest; the first "*/" closes the comment no
    // matter how many "/*" appeared inside it.
    fn scan_block_comment(&mut self) {
        while ! self.is_at_end() {
            if self.is_match("\n") {
                self.line = self.line.saturating_add(1);
            }
            if self.is_match("*") && self.peek_next_grapheme() == Some("/") {
                // Consume "*/".
                self.advance();
                self.advance();
                return;
            }
            self.advance();
        }

        self.reporter.error(self.line, "Unterminated block comment.");
    }

    fn scan_string(&mut self) -> Option<Token<'source>> {
        while ! self.is_match("\"") && ! self.is_at_end() {
            if self.is_match("\n") {
                self.line = self.line.saturating_add(1);
            }
            self.advance();
        }

        // Unterminated string.
        if self.is_at_end() {
            self.reporter.error(self.line, "Unterminated string.");
            return None;
        }

        // The closing quote.
        self.advance();

        // Trim the surrounding quotes.  Escape sequences are not
        // interpreted; interior bytes, newlines included, are kept
        // verbatim.
        let lexeme = &self.source[self.start..self.peek_index()];
        let value = &lexeme[1..lexeme.len() - 1];

        Some(Token::new(TokenType::String, lexeme, Literal::Str(value), self.line))
    }

    fn scan_number(&mut self) -> Token<'source> {
        while self.peek().map_or(false, is_digit) {
            self.advance();
        }

        // Look for a fractional part.  The dot is consumed only when
        // a digit follows, so "123." stays Number then Dot.
        if self.is_match(".") && self.peek_next_grapheme().map_or(false, is_digit) {
            // Consume the dot.
            self.advance();

            while self.peek().map_or(false, is_digit) {
                self.advance();
            }
        }

        let lexeme = &self.source[self.start..self.peek_index()];
        let number: f64 = lexeme.parse().unwrap_or_else(|_| panic!("Unable to parse string as f64: {}", lexeme));

        Token::new(TokenType::Number, lexeme, Literal::Number(number), self.line)
    }

    fn scan_identifier(&mut self) -> Token<'source> {
        while self.peek().map_or(false, is_alphanumeric) {
            self.advance();
        }

        let text = &self.source[self.start..self.peek_index()];

        // See if the identifier is a reserved word.
        let token_type = match KEYWORDS.get(text) {
            None => TokenType::Identifier,
            Some(token_type) => *token_type,
        };

        Token::new(token_type, text, Literal::None, self.line)
    }

    fn make_token(&mut self, token_type: TokenType) -> Token<'source> {
        let text = &self.source[self.start..self.peek_index()];
        Token::new(token_type, text, Literal::None, self.line)
    }

    // Conditionally advance if the next grapheme cluster matches an
    // expected string.  Returns true if we matched.
    fn matches(&mut self, expected: &str) -> bool {
        if ! self.is_match(expected) {
            return false;
        }

        // Consume this cluster when it's expected.
        self.advance();

        true
    }

    fn is_match(&mut self, expected: &str) -> bool {
        match self.grapheme_indices.peek() {
            None => false,
            Some((_, grapheme_cluster)) => *grapheme_cluster == expected,
        }
    }

    fn peek(&mut self) -> Option<&'source str> {
        match self.grapheme_indices.peek() {
            None => None,
            Some((_, grapheme_cluster)) => Some(*grapheme_cluster),
        }
    }

    fn peek_index(&mut self) -> usize {
        match self.grapheme_indices.peek() {
            None => self.source.len(),
            Some((i, _)) => *i,
        }
    }

    // This is looking ahead 2 grapheme clusters.
    fn peek_next_grapheme(&mut self) -> Option<&'source str> {
        self.grapheme_indices.peek()?;

        let mut cloned = self.grapheme_indices.clone();
        cloned.next();
        match cloned.peek() {
            None => None,
            Some((_, grapheme_cluster)) => Some(*grapheme_cluster),
        }
    }

    // Advance the grapheme cluster iterator.
    fn advance(&mut self) -> Option<(usize, &'source str)> {
        self.grapheme_indices.next()
    }

    fn is_at_end(&mut self) -> bool {
        self.grapheme_indices.peek().is_none()
    }
}

impl<'source, 'reporter> Iterator for Scanner<'source, 'reporter> {
    type Item = Token<'source>;

    fn next(&mut self) -> Option<Token<'source>> {
        while ! self.is_at_end() {
            // We are at the beginning of the next lexeme.
            self.start = self.peek_index();
            if let Some(token) = self.scan_token() {
                return Some(token);
            }
        }

        if self.eof_emitted {
            None
        }
        else {
            self.eof_emitted = true;
            Some(Token::new(TokenType::Eof, "", Literal::None, self.line))
        }
    }
}

// ASCII-only classification.  A multi-char grapheme cluster is never
// part of a number or identifier; it falls through to the unexpected
// character path instead.
fn is_digit(grapheme: &str) -> bool {
    match grapheme {
        "0" | "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9" => true,
        _ => false,
    }
}

fn is_alphabetic(grapheme: &str) -> bool {
    let mut chars = grapheme.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_ascii_alphabetic() || c == '_',
        _ => false,
    }
}

fn is_alphanumeric(grapheme: &str) -> bool {
    is_alphabetic(grapheme) || is_digit(grapheme)
}
