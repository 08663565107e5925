//! 文法インターフェース
//!
//! 記号オートマトンと、記号ごとのトークン辞書をまとめた読み取り専用の
//! [`Grammar`]を提供します。文法は一度構築されたら変更されず、
//! `Arc`で共有して任意の数のトークナイザーから並行に参照できます。
//!
//! 左から右へ読む順方向と、診断用に右から左へ読む逆方向の2つの向きを持ちます。
pub mod automaton;
pub mod builder;
pub mod matcher;
pub mod token_automaton;
pub mod trie;

use std::fmt;

pub use crate::grammar::automaton::{Automaton, StateId, SymbolAutomaton};
pub use crate::grammar::builder::GrammarBuilder;
use crate::grammar::matcher::SymbolMatchers;
use crate::token::WordType;

/// 役割記号（アノテーション）
///
/// 記号オートマトンのアルファベットの1文字で、一致したトークンが
/// 名称の中で果たす役割を表します。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(pub char);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 読む向き
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// 左から右
    Forward,
    /// 右から左
    Reverse,
}

/// 語の終わりを示す記号
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerminatorSymbols {
    /// 置換基の終わり
    pub end_of_substituent: Symbol,
    /// 主骨格の終わり
    pub end_of_main_group: Symbol,
    /// 官能項の終わり
    pub end_of_functional_term: Symbol,
}

impl TerminatorSymbols {
    /// 終端記号に対応する語の種類を返します。終端記号でなければ`None`。
    #[inline(always)]
    pub fn word_type(&self, symbol: Symbol) -> Option<WordType> {
        if symbol == self.end_of_substituent {
            Some(WordType::Substituent)
        } else if symbol == self.end_of_main_group {
            Some(WordType::Full)
        } else if symbol == self.end_of_functional_term {
            Some(WordType::FunctionalTerm)
        } else {
            None
        }
    }

    /// 終端記号かどうかを返します。
    #[inline(always)]
    pub fn is_terminator(&self, symbol: Symbol) -> bool {
        self.word_type(symbol).is_some()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = Symbol> {
        [
            self.end_of_substituent,
            self.end_of_main_group,
            self.end_of_functional_term,
        ]
        .into_iter()
    }
}

/// 一方向分の文法
///
/// `matchers[i]` はオートマトンのアルファベットの`i`番目の記号の照合器です。
#[derive(Clone, Debug)]
pub struct DirectedGrammar {
    pub(crate) automaton: SymbolAutomaton,
    pub(crate) matchers: Vec<SymbolMatchers>,
}

impl DirectedGrammar {
    /// 記号オートマトン
    #[inline(always)]
    pub fn automaton(&self) -> &SymbolAutomaton {
        &self.automaton
    }

    /// アルファベット上の位置で指定した記号の照合器
    #[inline(always)]
    pub fn matchers(&self, symbol_idx: usize) -> &SymbolMatchers {
        &self.matchers[symbol_idx]
    }
}

/// 構築済みの文法
///
/// [`GrammarBuilder`]で構築します。
#[derive(Clone, Debug)]
pub struct Grammar {
    pub(crate) forward: DirectedGrammar,
    pub(crate) reverse: DirectedGrammar,
    pub(crate) terminators: TerminatorSymbols,
}

impl Grammar {
    /// 指定した向きの文法を返します。
    #[inline(always)]
    pub fn directed(&self, direction: Direction) -> &DirectedGrammar {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Reverse => &self.reverse,
        }
    }

    /// 終端記号
    #[inline(always)]
    pub fn terminators(&self) -> &TerminatorSymbols {
        &self.terminators
    }

    /// 記号のアルファベット
    #[inline(always)]
    pub fn alphabet(&self) -> &[Symbol] {
        self.forward.automaton.alphabet()
    }
}
