use std::fmt;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TokenType {
    // Single-character tokens.
    LeftParen, RightParen, LeftBrace, RightBrace,
    Comma, Dot, Minus, Plus, Semicolon, Slash, Star,

    // One or two character tokens.
    Bang, BangEqual,
    Equal, EqualEqual,
    Greater, GreaterEqual,
    Less, LessEqual,

    // Literals.
    Identifier, String, Number,

    // Keywords.
    And, Class, Else, False, Fun, For, If, Nil, Or,
    Print, Return, Super, This, True, Var, While,

    Eof,
}

// Decoded literal value.  Non-none only for String and Number tokens.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Literal<'a> {
    None,
    Str(&'a str),
    Number(f64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token<'a> {
    pub token_type: TokenType,
    pub lexeme: &'a str,
    pub literal: Literal<'a>,
    // Line on which the token's scan completed.  For a multi-line
    // string this is the line of the closing quote.
    pub line: u32,
}

impl<'a> Token<'a> {
    pub fn new(token_type: TokenType,
               lexeme: &'a str,
               literal: Literal<'a>,
               line: u32)
        -> Token<'a>
    {
        Token {
            token_type,
            lexeme,
            literal,
            line,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.literal {
            Literal::None => write!(f, "{:?} {}", self.token_type, self.lexeme),
            Literal::Str(s) => write!(f, "{:?} {} {}", self.token_type, self.lexeme, s),
            Literal::Number(n) => write!(f, "{:?} {} {}", self.token_type, self.lexeme, n),
        }
    }
}
