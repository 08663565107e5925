//! 解析結果のコンテナ
//!
//! このモジュールは、名称の字句解析の結果として得られる型を提供します。
//!
//! - [`ParseTokens`]: 受理された1つのトークン列と記号列
//! - [`ParseRulesResults`]: 一語の探索結果と診断用の残り文字列
//! - [`ParseWord`]: 意味上の1語と、その（曖昧でありうる）読みの候補
//! - [`Parse`]: 名称全体の1つの読み

use std::fmt;

use crate::errors::{ChemlexError, Result};
use crate::grammar::{Symbol, TerminatorSymbols};

/// 語の種類
///
/// 語の記号列の最後の記号（終端記号）のみから決まります。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WordType {
    /// 主骨格を含む完全な語
    Full,
    /// 置換基
    Substituent,
    /// 官能項
    FunctionalTerm,
}

impl fmt::Display for WordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Full => "full",
            Self::Substituent => "substituent",
            Self::FunctionalTerm => "functionalTerm",
        };
        f.write_str(name)
    }
}

/// 受理された1つのトークン列
///
/// `symbols[i]` は `tokens[i]` に割り当てられた記号です。
/// 同じ語に複数の`ParseTokens`がある場合、それは字句レベルの曖昧性を表します。
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ParseTokens {
    symbols: Vec<Symbol>,
    tokens: Vec<String>,
}

impl ParseTokens {
    /// 新しいインスタンスを作成します。
    ///
    /// # エラー
    ///
    /// `symbols` と `tokens` の長さが異なる場合、[`ChemlexError`] を返します。
    pub fn new(symbols: Vec<Symbol>, tokens: Vec<String>) -> Result<Self> {
        if symbols.len() != tokens.len() {
            return Err(ChemlexError::invalid_argument(
                "tokens",
                format!(
                    "{} tokens were given for {} symbols",
                    tokens.len(),
                    symbols.len()
                ),
            ));
        }
        Ok(Self { symbols, tokens })
    }

    /// 記号列
    #[inline(always)]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// トークン列
    #[inline(always)]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// トークン数
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// トークンを1つも持たないか
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// 消費したテキストの長さ（バイト単位）
    pub fn consumed_len(&self) -> usize {
        self.tokens.iter().map(String::len).sum()
    }

    /// `start..end` のトークンだけを持つ新しいインスタンスを返します。
    pub(crate) fn slice(&self, start: usize, end: usize) -> Self {
        Self {
            symbols: self.symbols[start..end].to_vec(),
            tokens: self.tokens[start..end].to_vec(),
        }
    }

    /// 記号列とトークン列を反転します。
    pub(crate) fn reverse(&mut self) {
        self.symbols.reverse();
        self.tokens.reverse();
    }

    /// 語の種類を返します。
    ///
    /// 語の種類は最後の記号から決まります。途中に別の種類を示す終端記号が
    /// あれば、内部不変条件の違反としてエラーを返します。
    ///
    /// # エラー
    ///
    /// 最後の記号が終端記号でない場合、または終端記号が矛盾する場合。
    pub fn word_type(&self, terminators: &TerminatorSymbols) -> Result<WordType> {
        let last = self.symbols.last().copied().ok_or_else(|| {
            ChemlexError::invalid_state("cannot determine the word type", "no symbols")
        })?;
        let word_type = terminators.word_type(last).ok_or_else(|| {
            ChemlexError::invalid_state(
                "cannot determine the word type",
                format!("{last} does not terminate a word in {self}"),
            )
        })?;
        for &symbol in &self.symbols {
            if let Some(other) = terminators.word_type(symbol) {
                if other != word_type {
                    return Err(ChemlexError::invalid_state(
                        "inconsistent word types",
                        format!("{other} and {word_type} in {self}"),
                    ));
                }
            }
        }
        Ok(word_type)
    }
}

impl fmt::Display for ParseTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (symbol, token)) in self.symbols.iter().zip(&self.tokens).enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token:?}/{symbol}")?;
        }
        Ok(())
    }
}

/// 一語の探索結果
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseRulesResults {
    /// 最長一致で同点の受理されたトークン列
    pub parse_tokens_list: Vec<ParseTokens>,
    /// 受理状態のうち最も短い残り部分（解釈できなかった部分）
    pub uninterpretable: String,
    /// 受理の有無によらず最も遠くまで到達した状態の残り部分
    pub unparseable: String,
}

impl ParseRulesResults {
    /// 受理されたトークン列が消費した長さ（バイト単位）
    ///
    /// 同点の候補は全て同じ長さを消費します。
    pub fn consumed_len(&self) -> usize {
        self.parse_tokens_list
            .first()
            .map_or(0, ParseTokens::consumed_len)
    }
}

/// 意味上の1語
///
/// 入力で空白が省略されていた場合、空白で区切られた入力の1語より短くなります。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseWord {
    text: String,
    parse_tokens: Vec<ParseTokens>,
    word_type: Option<WordType>,
}

impl ParseWord {
    /// 新しいインスタンスを作成します。
    pub fn new(text: String, parse_tokens: Vec<ParseTokens>) -> Self {
        Self {
            text,
            parse_tokens,
            word_type: None,
        }
    }

    /// 語のテキスト
    #[inline(always)]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 読みの候補
    #[inline(always)]
    pub fn parse_tokens(&self) -> &[ParseTokens] {
        &self.parse_tokens
    }

    /// 語の種類。曖昧性が解消されるまでは`None`です。
    #[inline(always)]
    pub fn word_type(&self) -> Option<WordType> {
        self.word_type
    }

    /// 読みが1つに定まった語を作成し、語の種類を付与します。
    pub(crate) fn resolved(
        &self,
        parse_tokens: ParseTokens,
        terminators: &TerminatorSymbols,
    ) -> Result<Self> {
        let word_type = parse_tokens.word_type(terminators)?;
        Ok(Self {
            text: self.text.clone(),
            parse_tokens: vec![parse_tokens],
            word_type: Some(word_type),
        })
    }
}

/// 名称全体の1つの読み
///
/// 各語はちょうど1つの[`ParseTokens`]と語の種類を持ちます。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parse {
    words: Vec<ParseWord>,
}

impl Parse {
    pub(crate) fn new(words: Vec<ParseWord>) -> Self {
        Self { words }
    }

    /// 語の列
    #[inline(always)]
    pub fn words(&self) -> &[ParseWord] {
        &self.words
    }
}

impl fmt::Display for Parse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i != 0 {
                f.write_str(" | ")?;
            }
            match (word.word_type, word.parse_tokens.first()) {
                (Some(t), Some(pt)) => write!(f, "{t}: {pt}")?,
                _ => write!(f, "{:?}", word.text)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::symbols;

    const TERMINATORS: TerminatorSymbols = TerminatorSymbols {
        end_of_substituent: Symbol('e'),
        end_of_main_group: Symbol('m'),
        end_of_functional_term: Symbol('f'),
    };

    fn pt(symbols: Vec<Symbol>, tokens: &[&str]) -> ParseTokens {
        ParseTokens::new(symbols, tokens.iter().map(|t| t.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_mismatched_lengths() {
        let result = ParseTokens::new(symbols!['s', 'e'], vec!["ethyl".to_string()]);
        assert!(matches!(result, Err(ChemlexError::InvalidArgument(_))));
    }

    #[test]
    fn test_word_type_from_last_symbol() {
        let p = pt(symbols!['s', 'e'], &["eth", "yl"]);
        assert_eq!(p.word_type(&TERMINATORS).unwrap(), WordType::Substituent);
        let p = pt(symbols!['s', 'm'], &["eth", "ane"]);
        assert_eq!(p.word_type(&TERMINATORS).unwrap(), WordType::Full);
        let p = pt(symbols!['f'], &["oxime"]);
        assert_eq!(p.word_type(&TERMINATORS).unwrap(), WordType::FunctionalTerm);
    }

    #[test]
    fn test_word_type_inconsistent() {
        let p = pt(symbols!['s', 'e', 'f'], &["eth", "yl", "oxime"]);
        assert!(matches!(
            p.word_type(&TERMINATORS),
            Err(ChemlexError::InvalidState(_))
        ));
    }

    #[test]
    fn test_word_type_without_terminator() {
        let p = pt(symbols!['s'], &["eth"]);
        assert!(p.word_type(&TERMINATORS).is_err());
        assert!(ParseTokens::default().word_type(&TERMINATORS).is_err());
    }

    #[test]
    fn test_consumed_len() {
        let p = pt(symbols!['s', 'e'], &["eth", "yl"]);
        assert_eq!(p.consumed_len(), 5);
        assert_eq!(p.slice(1, 2), pt(symbols!['e'], &["yl"]));
    }
}
