//! Lexer (tokenizer) for the teaching language
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Scanning tries an ordered list of patterns at the current position and commits
//! to the first one that matches, so pattern order (not match length) resolves
//! ambiguity: keywords beat identifiers, comments beat the division operator.
//!
//! Comments and whitespace are recognized and dropped. A character that no
//! pattern accepts becomes a [`TokenKind::Error`] token and scanning resumes at
//! the next character, so a single bad character never hides later tokens.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Source location information for error reporting (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Every lexical kind the scanner can produce.
///
/// All variants except [`TokenKind::Colon`] and [`TokenKind::Error`] are
/// terminals of the grammar. `End` is the synthetic end-of-input marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    // Type keywords
    Int,
    Float,
    String,

    // Statement keywords
    If,
    Else,
    While,
    Input,
    Print,

    Identifier,

    // Literals
    Integer,
    Real,
    StrLiteral,

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    Semicolon, // ;
    Colon,     // :

    // Assignment
    Assign, // =

    // Comparison
    EqEq,  // ==
    NotEq, // !=
    Lt,    // <
    Gt,    // >
    Le,    // <=
    Ge,    // >=

    // Arithmetic
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %

    End,
    Error,
}

impl TokenKind {
    /// All kinds that the grammar may reference, end-marker included.
    pub const TERMINALS: [TokenKind; 30] = [
        TokenKind::Int,
        TokenKind::Float,
        TokenKind::String,
        TokenKind::Identifier,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::While,
        TokenKind::Input,
        TokenKind::Print,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::LBrace,
        TokenKind::RBrace,
        TokenKind::Semicolon,
        TokenKind::Assign,
        TokenKind::EqEq,
        TokenKind::NotEq,
        TokenKind::Lt,
        TokenKind::Gt,
        TokenKind::Le,
        TokenKind::Ge,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::Percent,
        TokenKind::Integer,
        TokenKind::Real,
        TokenKind::StrLiteral,
        TokenKind::End,
    ];

    /// Whether the grammar can reference this kind.
    pub fn is_terminal(self) -> bool {
        !matches!(self, TokenKind::Colon | TokenKind::Error)
    }

    /// Arithmetic, comparison and assignment operators.
    pub fn is_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Assign
                | TokenKind::EqEq
                | TokenKind::NotEq
                | TokenKind::Lt
                | TokenKind::Gt
                | TokenKind::Le
                | TokenKind::Ge
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Percent
        )
    }

    /// Grammar name of the kind, as it appears in productions and messages.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Int => "int",
            TokenKind::Float => "float",
            TokenKind::String => "string",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Input => "input",
            TokenKind::Print => "print",
            TokenKind::Identifier => "identifier",
            TokenKind::Integer => "integer",
            TokenKind::Real => "real",
            TokenKind::StrLiteral => "str_literal",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Assign => "=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Le => "<=",
            TokenKind::Ge => ">=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::End => "$",
            TokenKind::Error => "error",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexical item with the exact text it was matched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line: location.line,
            column: location.column,
        }
    }

    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }

    /// Number of characters the lexeme spans.
    pub fn width(&self) -> usize {
        self.lexeme.chars().count()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.lexeme)
    }
}

/// What a successful pattern match produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Comment,
    BareSlashComment,
    Whitespace,
    Emit(TokenKind),
}

/// Patterns in priority order. The first one matching at the scan position wins.
const PATTERNS: &[(Rule, &str)] = &[
    (Rule::Comment, r"//.*"),
    (Rule::Comment, r"/\*[\s\S]*?\*/"),
    (Rule::BareSlashComment, r"/[^/*].*"),
    (Rule::Emit(TokenKind::Int), r"\bint\b"),
    (Rule::Emit(TokenKind::Float), r"\bfloat\b"),
    (Rule::Emit(TokenKind::String), r"\bstring\b"),
    (Rule::Emit(TokenKind::If), r"\bif\b"),
    (Rule::Emit(TokenKind::Else), r"\belse\b"),
    (Rule::Emit(TokenKind::While), r"\bwhile\b"),
    (Rule::Emit(TokenKind::Input), r"\binput\b"),
    (Rule::Emit(TokenKind::Print), r"\bprint\b"),
    (Rule::Emit(TokenKind::Identifier), r"[a-zA-Z_][a-zA-Z0-9_]*"),
    (Rule::Emit(TokenKind::Real), r"\d+\.\d+"),
    (Rule::Emit(TokenKind::Integer), r"\d+"),
    (Rule::Emit(TokenKind::StrLiteral), r#""[^"]*""#),
    (Rule::Emit(TokenKind::EqEq), r"=="),
    (Rule::Emit(TokenKind::NotEq), r"!="),
    (Rule::Emit(TokenKind::Le), r"<="),
    (Rule::Emit(TokenKind::Ge), r">="),
    (Rule::Emit(TokenKind::Lt), r"<"),
    (Rule::Emit(TokenKind::Gt), r">"),
    (Rule::Emit(TokenKind::Assign), r"="),
    (Rule::Emit(TokenKind::Semicolon), r";"),
    (Rule::Emit(TokenKind::LBrace), r"\{"),
    (Rule::Emit(TokenKind::RBrace), r"\}"),
    (Rule::Emit(TokenKind::LParen), r"\("),
    (Rule::Emit(TokenKind::RParen), r"\)"),
    (Rule::Emit(TokenKind::Plus), r"\+"),
    (Rule::Emit(TokenKind::Minus), r"-"),
    (Rule::Emit(TokenKind::Star), r"\*"),
    (Rule::Emit(TokenKind::Slash), r"/"),
    (Rule::Emit(TokenKind::Percent), r"%"),
    (Rule::Emit(TokenKind::Colon), r":"),
    (Rule::Whitespace, r"\s+"),
];

/// Compiled once; every pattern is anchored to the start of the remaining input.
static COMPILED: Lazy<Vec<(Rule, Regex)>> = Lazy::new(|| {
    PATTERNS
        .iter()
        .map(|&(rule, pattern)| {
            let anchored = format!("^(?:{})", pattern);
            (rule, Regex::new(&anchored).expect("token patterns are valid"))
        })
        .collect()
});

/// Lexer configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerOptions {
    /// Lex a lone `/` as the division operator instead of the start of a
    /// line comment.
    pub division_operator: bool,
}

/// Priority-ordered pattern scanner
pub struct Lexer<'src> {
    input: &'src str,
    position: usize,
    line: usize,
    column: usize,
    options: LexerOptions,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source string.
    pub fn new(input: &'src str) -> Self {
        Self {
            input,
            position: 0,
            line: 1,
            column: 1,
            options: LexerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: LexerOptions) -> Self {
        self.options = options;
        self
    }

    /// Tokenize the entire input.
    ///
    /// The result always ends with exactly one [`TokenKind::End`] token.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            match self.match_rule() {
                Some((rule, len)) => {
                    let location = self.current_location();
                    let text = &self.input[self.position..self.position + len];
                    if let Rule::Emit(kind) = rule {
                        tokens.push(Token::new(kind, text, location));
                    }
                    self.advance_over(text);
                    self.position += len;
                }
                None => tokens.push(self.unrecognized()),
            }
        }

        tokens.push(Token::new(TokenKind::End, "$", self.current_location()));
        tokens
    }

    /// First rule in priority order that matches at the current position,
    /// with the byte length of the match.
    fn match_rule(&self) -> Option<(Rule, usize)> {
        let rest = &self.input[self.position..];
        COMPILED
            .iter()
            .filter(|(rule, _)| !(self.options.division_operator && *rule == Rule::BareSlashComment))
            .find_map(|(rule, regex)| {
                regex
                    .find(rest)
                    .filter(|m| !m.as_str().is_empty())
                    .map(|m| (*rule, m.end()))
            })
    }

    /// Report and skip a character no pattern accepts.
    fn unrecognized(&mut self) -> Token {
        let location = self.current_location();
        // is_at_end() was checked by the caller
        let ch = self.input[self.position..].chars().next().unwrap_or('\0');

        log::warn!(
            "lexical error at {}: unrecognized character '{}'",
            location,
            ch.escape_debug()
        );

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.position += ch.len_utf8();

        Token::new(TokenKind::Error, ch.to_string(), location)
    }

    /// Update line/column after consuming `text`.
    fn advance_over(&mut self, text: &str) {
        let len = text.chars().count();
        let newlines = text.matches('\n').count();

        if newlines > 0 {
            self.line += newlines;
            // length minus the index of the last newline
            let tail = text.rsplit('\n').next().map_or(0, |tail| tail.chars().count());
            self.column = tail + 1;
        } else {
            self.column += len;
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Tokenize `source` with default options.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}
