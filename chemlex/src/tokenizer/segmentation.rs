//! 語への分割
//!
//! 受理されたトークン列は、空白が省略された複数の語を含むことがあります。
//! 終端記号の直後を語の境界とみなして分割します。
use crate::errors::{ChemlexError, Result};
use crate::grammar::TerminatorSymbols;
use crate::token::{ParseTokens, ParseWord, WordType};

/// 1つのトークン列を語に分割したときの形
struct Shape {
    /// 各語の終わりのトークン位置（排他的）
    token_ends: Vec<usize>,
    /// 各語の終わりのバイト位置（排他的）
    byte_ends: Vec<usize>,
    /// 官能項の語の最大文字数
    longest_functional_term: usize,
}

impl Shape {
    fn new(terminators: &TerminatorSymbols, parse_tokens: &ParseTokens) -> Self {
        let mut token_ends = vec![];
        let mut byte_ends = vec![];
        let mut longest_functional_term = 0;
        let mut offset = 0;
        let mut chars_in_chunk = 0;
        let n = parse_tokens.len();
        for (i, (&symbol, token)) in parse_tokens
            .symbols()
            .iter()
            .zip(parse_tokens.tokens())
            .enumerate()
        {
            offset += token.len();
            chars_in_chunk += token.chars().count();
            let word_type = terminators.word_type(symbol);
            if word_type.is_some() || i + 1 == n {
                token_ends.push(i + 1);
                byte_ends.push(offset);
                if word_type == Some(WordType::FunctionalTerm) {
                    longest_functional_term = longest_functional_term.max(chars_in_chunk);
                }
                chars_in_chunk = 0;
            }
        }
        Self {
            token_ends,
            byte_ends,
            longest_functional_term,
        }
    }

    /// `other`より好ましい分割か
    fn is_preferred_to(&self, other: &Self) -> bool {
        if self.byte_ends.len() != other.byte_ends.len() {
            return self.byte_ends.len() < other.byte_ends.len();
        }
        self.longest_functional_term > other.longest_functional_term
    }
}

/// 候補のトークン列を語に分割します。
///
/// 全ての候補は同じテキストを消費している必要があります。
pub(crate) fn split_alternatives(
    terminators: &TerminatorSymbols,
    alternatives: &[ParseTokens],
    source: &str,
) -> Result<Vec<ParseWord>> {
    if alternatives.is_empty() {
        return Err(ChemlexError::invalid_argument(
            "alternatives",
            "at least one sequence of tokens is required",
        ));
    }
    for parse_tokens in alternatives {
        if parse_tokens.consumed_len() != source.len() {
            return Err(ChemlexError::invalid_argument(
                "source",
                format!(
                    "{parse_tokens} consumes {} bytes but the source {source:?} has {}",
                    parse_tokens.consumed_len(),
                    source.len(),
                ),
            ));
        }
    }

    let shapes: Vec<Shape> = alternatives
        .iter()
        .map(|parse_tokens| Shape::new(terminators, parse_tokens))
        .collect();
    let mut best = 0;
    for (i, shape) in shapes.iter().enumerate().skip(1) {
        if shape.is_preferred_to(&shapes[best]) {
            best = i;
        }
    }
    let chosen = &shapes[best].byte_ends;
    if chosen.len() > 1 {
        log::debug!("{source:?} contains {} words without spaces between them", chosen.len());
    }

    let mut texts = vec![];
    let mut start = 0;
    for &end in chosen {
        texts.push(&source[start..end]);
        start = end;
    }

    let mut readings: Vec<Vec<ParseTokens>> = vec![vec![]; chosen.len()];
    for (parse_tokens, shape) in alternatives.iter().zip(&shapes) {
        if shape.byte_ends != *chosen {
            continue;
        }
        let mut token_start = 0;
        for (word_readings, &token_end) in readings.iter_mut().zip(&shape.token_ends) {
            let reading = parse_tokens.slice(token_start, token_end);
            if !word_readings.contains(&reading) {
                word_readings.push(reading);
            }
            token_start = token_end;
        }
    }

    Ok(texts
        .into_iter()
        .zip(readings)
        .map(|(text, readings)| ParseWord::new(text.to_string(), readings))
        .collect())
}
