//! 読みの組み合わせの展開
//!
//! 語ごとの読みの候補の直積を、名称全体の読みとして列挙します。
//! 組み合わせ数は列挙の前に計算し、上限を超える場合は何も生成しません。
use crate::common::MAX_PARSE_COMBINATIONS;
use crate::errors::{ChemlexError, Result};
use crate::grammar::TerminatorSymbols;
use crate::token::{Parse, ParseWord};

pub(crate) fn expand(terminators: &TerminatorSymbols, words: &[ParseWord]) -> Result<Vec<Parse>> {
    let mut total: usize = 1;
    for word in words {
        let n = word.parse_tokens().len();
        if n == 0 {
            return Err(ChemlexError::invalid_state(
                "cannot expand the readings",
                format!("{:?} has no readings", word.text()),
            ));
        }
        total = total.saturating_mul(n);
        if total > MAX_PARSE_COMBINATIONS {
            log::warn!(
                "aborted the expansion at {:?}: more than {MAX_PARSE_COMBINATIONS} combinations",
                word.text()
            );
            return Err(ChemlexError::too_many_combinations(word.text(), total));
        }
    }

    // Odometer over the readings; the last word turns fastest.
    let mut parses = Vec::with_capacity(total);
    let mut digits = vec![0; words.len()];
    for _ in 0..total {
        let resolved = words
            .iter()
            .zip(&digits)
            .map(|(word, &d)| word.resolved(word.parse_tokens()[d].clone(), terminators))
            .collect::<Result<Vec<_>>>()?;
        parses.push(Parse::new(resolved));

        for (digit, word) in digits.iter_mut().zip(words).rev() {
            *digit += 1;
            if *digit < word.parse_tokens().len() {
                break;
            }
            *digit = 0;
        }
    }
    Ok(parses)
}
