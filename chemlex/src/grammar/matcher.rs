//! 記号ごとのトークン照合器
//!
//! 各記号は最大3種類の辞書を持ちます。
//!
//! - 字句トライ（小文字化したテキストと照合、複数の長さが一致しうる）
//! - トークンオートマトンのリスト（小文字化したテキストと照合、オートマトンごとに最長一致1つ）
//! - 正規表現のリスト（元のテキストと大文字小文字を区別して照合、パターンごとに1つ）

use regex::Regex;

use crate::errors::Result;
use crate::grammar::token_automaton::TokenAutomaton;
use crate::grammar::trie::RadixTrie;
use crate::grammar::Direction;

/// 照合で見つかったトークンの候補
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenMatch {
    /// 一致長（バイト単位、1以上）
    pub len: usize,
    /// トークンとして小文字化したテキストを記録するか
    pub lowered: bool,
}

/// 照合機構の種類
#[derive(Clone, Debug)]
pub enum MatcherKind {
    /// 字句トライ
    Trie(RadixTrie),
    /// トークンオートマトンのリスト
    AutomatonList(Vec<TokenAutomaton>),
    /// 正規表現のリスト
    PatternList(Vec<Regex>),
}

impl MatcherKind {
    /// 照合位置にある全てのトークン候補を `out` に追加します。
    ///
    /// # 引数
    ///
    /// * `raw` - 元のテキスト
    /// * `lower` - `raw` とバイト位置が揃った小文字化テキスト
    /// * `pos` - 順方向なら未消費部分の開始位置、逆方向なら終了位置
    /// * `direction` - 照合の向き
    /// * `out` - 候補の出力先
    pub fn collect_matches(
        &self,
        raw: &str,
        lower: &str,
        pos: usize,
        direction: Direction,
        out: &mut Vec<TokenMatch>,
    ) -> Result<()> {
        match self {
            Self::Trie(trie) => {
                let lengths = match direction {
                    Direction::Forward => trie.find_lengths_of_matches(&lower[pos..]),
                    Direction::Reverse => {
                        trie.find_lengths_of_matches_reading_right_to_left(&lower[..pos])
                    }
                };
                for len in lengths.into_iter().flatten() {
                    push_nonempty(out, len, true);
                }
            }
            Self::AutomatonList(automata) => {
                for automaton in automata {
                    let len = match direction {
                        Direction::Forward => automaton.longest_match_from(lower, pos)?,
                        Direction::Reverse => automaton.longest_match_ending_at(lower, pos)?,
                    };
                    if let Some(len) = len {
                        push_nonempty(out, len, false);
                    }
                }
            }
            Self::PatternList(patterns) => {
                for pattern in patterns {
                    match direction {
                        Direction::Forward => {
                            if let Some(m) = pattern.find(&raw[pos..]) {
                                push_nonempty(out, m.end(), false);
                            }
                        }
                        Direction::Reverse => {
                            if let Some(m) = pattern.find(&raw[..pos]) {
                                push_nonempty(out, pos - m.start(), false);
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[inline(always)]
fn push_nonempty(out: &mut Vec<TokenMatch>, len: usize, lowered: bool) {
    if len != 0 {
        out.push(TokenMatch { len, lowered });
    }
}

/// 生の正規表現を照合位置に固定してコンパイルします。
///
/// 順方向は先頭に、逆方向は末尾に固定されます。
pub fn compile_pattern(pattern: &str, direction: Direction) -> Result<Regex> {
    let anchored = match direction {
        Direction::Forward => format!("^(?:{pattern})"),
        Direction::Reverse => format!("(?:{pattern})$"),
    };
    Ok(Regex::new(&anchored)?)
}

/// 1つの記号が持つ照合器の集まり
#[derive(Clone, Debug, Default)]
pub struct SymbolMatchers {
    matchers: Vec<MatcherKind>,
}

impl SymbolMatchers {
    pub(crate) fn new(matchers: Vec<MatcherKind>) -> Self {
        Self { matchers }
    }

    /// 照合器を1つも持たないか
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// 照合器のリスト
    #[inline(always)]
    pub fn matchers(&self) -> &[MatcherKind] {
        &self.matchers
    }

    /// 全ての照合器による候補を `out` に追加します。
    pub fn collect_matches(
        &self,
        raw: &str,
        lower: &str,
        pos: usize,
        direction: Direction,
        out: &mut Vec<TokenMatch>,
    ) -> Result<()> {
        for matcher in &self.matchers {
            matcher.collect_matches(raw, lower, pos, direction, out)?;
        }
        Ok(())
    }
}
