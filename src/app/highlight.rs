use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

const KEYWORDS: &[&str] = &["const", "let", "await", "async", "return", "if"];
const DELIMITERS: &[char] = &['{', '}', '(', ')', '[', ']', ';', ',', '.'];
const QUOTES: &[char] = &['\'', '"', '`'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Keyword,
    Str,
    Number,
    Punct,
    Comment,
    Plain,
}

impl TokenKind {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Str => "string",
            Self::Number => "number",
            Self::Punct => "punct",
            Self::Comment => "comment",
            Self::Plain => "plain",
        }
    }

    pub(crate) fn color(self) -> Color {
        match self {
            Self::Keyword => Color::Rgb(192, 132, 252),
            Self::Str => Color::Rgb(74, 222, 128),
            Self::Number => Color::Rgb(96, 165, 250),
            Self::Punct => Color::Rgb(180, 150, 40),
            Self::Comment => Color::Rgb(115, 115, 115),
            Self::Plain => Color::Rgb(212, 212, 212),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) text: String,
    pub(crate) kind: TokenKind,
}

/// One emitted line: its gutter label and coloured tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RenderedLine {
    pub(crate) number: Option<u32>,
    pub(crate) tokens: Vec<Token>,
}

impl RenderedLine {
    pub(crate) fn new(number: Option<u32>, text: &str) -> Self {
        Self {
            number,
            tokens: highlight_line(text),
        }
    }

    pub(crate) fn number_label(&self) -> String {
        self.number.map(|n| n.to_string()).unwrap_or_default()
    }

    pub(crate) fn text(&self) -> String {
        self.tokens.iter().map(|token| token.text.as_str()).collect()
    }

    pub(crate) fn to_line(&self, gutter: Style) -> Line<'static> {
        let mut spans = Vec::with_capacity(self.tokens.len() + 1);
        spans.push(Span::styled(format!("{:>3}  ", self.number_label()), gutter));
        spans.extend(self.tokens.iter().map(|token| {
            Span::styled(token.text.clone(), Style::default().fg(token.kind.color()))
        }));
        Line::from(spans)
    }
}

pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

pub(crate) fn highlight_line(line: &str) -> Vec<Token> {
    split_tokens(line)
        .into_iter()
        .map(|text| Token {
            kind: classify(text),
            text: text.to_string(),
        })
        .collect()
}

/// Splits on whitespace runs and single delimiter chars, keeping both as
/// tokens. Never yields an empty fragment.
pub(crate) fn split_tokens(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space = false;

    for (idx, ch) in line.char_indices() {
        if DELIMITERS.contains(&ch) {
            if start < idx {
                tokens.push(&line[start..idx]);
            }
            let end = idx + ch.len_utf8();
            tokens.push(&line[idx..end]);
            start = end;
            in_space = false;
            continue;
        }

        let space = ch.is_whitespace();
        if space != in_space && start < idx {
            tokens.push(&line[start..idx]);
            start = idx;
        }
        in_space = space;
    }
    if start < line.len() {
        tokens.push(&line[start..]);
    }
    tokens
}

pub(crate) fn classify(token: &str) -> TokenKind {
    if KEYWORDS.contains(&token) {
        TokenKind::Keyword
    } else if is_quoted(token) {
        TokenKind::Str
    } else if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        TokenKind::Number
    } else if is_single_delimiter(token) {
        TokenKind::Punct
    } else if token.starts_with("//") {
        TokenKind::Comment
    } else {
        TokenKind::Plain
    }
}

fn is_quoted(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) => QUOTES.contains(&first) && first == last,
        _ => false,
    }
}

fn is_single_delimiter(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(ch), None) if DELIMITERS.contains(&ch))
}
