//! トークンオートマトン
//!
//! 正規表現からコンパイルしたDFAで、現在位置に固定した最長一致を求めます。
//! 右から左へ読む場合は逆向きのDFAを構築し、テキスト末尾に固定して探索します。

use regex_automata::dfa::{dense, Automaton as _, StartKind};
use regex_automata::nfa::thompson;
use regex_automata::{Anchored, Input, MatchKind};

use crate::errors::Result;
use crate::grammar::Direction;

/// 最長一致で照合するトークンオートマトン
#[derive(Clone, Debug)]
pub struct TokenAutomaton {
    dfa: dense::DFA<Vec<u32>>,
    pattern: String,
    direction: Direction,
}

impl TokenAutomaton {
    /// パターンからオートマトンを構築します。
    ///
    /// # 引数
    ///
    /// * `pattern` - 正規表現
    /// * `direction` - 照合の向き
    ///
    /// # エラー
    ///
    /// パターンが不正な場合にエラーを返します。
    pub fn new(pattern: &str, direction: Direction) -> Result<Self> {
        let dfa = dense::Builder::new()
            .configure(
                dense::DFA::config()
                    .match_kind(MatchKind::All)
                    .start_kind(StartKind::Anchored),
            )
            .thompson(thompson::Config::new().reverse(direction == Direction::Reverse))
            .build(pattern)?;
        Ok(Self {
            dfa,
            pattern: pattern.to_string(),
            direction,
        })
    }

    /// 元の正規表現
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// 照合の向き
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// `text[start..]` の先頭から始まる最長一致の長さを返します。
    ///
    /// 空文字列への一致は`Some(0)`になります。
    pub fn longest_match_from(&self, text: &str, start: usize) -> Result<Option<usize>> {
        debug_assert_eq!(self.direction, Direction::Forward);
        let input = Input::new(text).range(start..).anchored(Anchored::Yes);
        Ok(self.dfa.try_search_fwd(&input)?.map(|m| m.offset() - start))
    }

    /// `text[..end]` の末尾で終わる最長一致の長さを返します。
    pub fn longest_match_ending_at(&self, text: &str, end: usize) -> Result<Option<usize>> {
        debug_assert_eq!(self.direction, Direction::Reverse);
        let input = Input::new(text).range(..end).anchored(Anchored::Yes);
        Ok(self.dfa.try_search_rev(&input)?.map(|m| end - m.offset()))
    }
}
