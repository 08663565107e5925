//! 注釈付け探索
//!
//! 記号オートマトンの状態と入力上の消費位置の積空間を、スタックを用いた
//! 深さ優先探索で調べます。探索木のノードはアリーナに追加していくだけで、
//! 親ノードへの参照はインデックスで保持します。
//!
//! 受理状態のうち残り部分が最も短いものだけを候補として残し、
//! 同点の候補が[`MAX_TIED_PARSES`]を超えた場合は探索を中断します。
use crate::common::MAX_TIED_PARSES;
use crate::errors::{ChemlexError, Result};
use crate::grammar::matcher::TokenMatch;
use crate::grammar::{Automaton, Direction, Grammar, StateId};
use crate::token::{ParseRulesResults, ParseTokens};
use crate::utils::lowercase_aligned;

const NO_PARENT: u32 = u32::MAX;

/// 探索木のノード
#[derive(Clone, Copy, Debug)]
struct AnnotatorState {
    /// 記号オートマトンの状態
    state: StateId,
    /// 親ノードのインデックス。ルートは`NO_PARENT`。
    parent: u32,
    /// 親からこのノードへ進むときに消費した記号のアルファベット上の位置
    symbol_idx: u32,
    /// 順方向なら未消費部分の開始位置、逆方向なら終了位置
    pos: usize,
    /// 消費したトークンの長さ
    token_len: usize,
    /// トークンを小文字化したテキストから記録するか
    lowered: bool,
}

/// 探索用のバッファ
///
/// ワーカーが保持し、呼び出しのたびに再利用されます。
#[derive(Default)]
pub(crate) struct Annotator {
    states: Vec<AnnotatorState>,
    stack: Vec<u32>,
    accepted: Vec<u32>,
    matches: Vec<TokenMatch>,
}

impl Annotator {
    /// 一語を探索し、最長一致で同点の受理されたトークン列を返します。
    ///
    /// # 引数
    ///
    /// * `grammar` - 文法
    /// * `word` - 探索する語
    /// * `direction` - 読む向き
    ///
    /// # エラー
    ///
    /// 同点の候補が上限を超えた場合、または辞書を持たない記号に
    /// 遷移できる場合にエラーを返します。
    pub fn search(
        &mut self,
        grammar: &Grammar,
        word: &str,
        direction: Direction,
    ) -> Result<ParseRulesResults> {
        let lower = lowercase_aligned(word);
        let directed = grammar.directed(direction);
        let automaton = directed.automaton();
        let num_symbols = automaton.alphabet().len();
        let remaining = |pos: usize| match direction {
            Direction::Forward => word.len() - pos,
            Direction::Reverse => pos,
        };

        self.states.clear();
        self.stack.clear();
        self.accepted.clear();
        let mut matches = std::mem::take(&mut self.matches);

        self.states.push(AnnotatorState {
            state: automaton.initial_state(),
            parent: NO_PARENT,
            symbol_idx: 0,
            pos: match direction {
                Direction::Forward => 0,
                Direction::Reverse => word.len(),
            },
            token_len: 0,
            lowered: false,
        });
        self.stack.push(0);

        let mut best_remaining = word.len();
        let mut longest = 0;

        while let Some(idx) = self.stack.pop() {
            let current = self.states[idx as usize];
            let rest = remaining(current.pos);

            if rest < remaining(self.states[longest as usize].pos) {
                longest = idx;
            }
            if current.parent != NO_PARENT
                && automaton.is_accept(current.state)
                && rest <= best_remaining
            {
                if rest < best_remaining {
                    self.accepted.clear();
                    best_remaining = rest;
                }
                self.accepted.push(idx);
                if self.accepted.len() > MAX_TIED_PARSES {
                    log::warn!(
                        "aborted the search of {word:?}: more than {MAX_TIED_PARSES} equally long readings"
                    );
                    self.matches = matches;
                    return Err(ChemlexError::too_many_tied_parses(word, self.accepted.len()));
                }
            }
            if rest == 0 {
                continue;
            }

            for symbol_idx in 0..num_symbols {
                let Some(next_state) = automaton.step_by_index(current.state, symbol_idx) else {
                    continue;
                };
                let symbol_matchers = directed.matchers(symbol_idx);
                if symbol_matchers.is_empty() {
                    self.matches = matches;
                    return Err(ChemlexError::invalid_state(
                        "symbol without dictionaries",
                        format!("{} is reachable but cannot match anything", automaton.alphabet()[symbol_idx]),
                    ));
                }
                matches.clear();
                symbol_matchers.collect_matches(word, &lower, current.pos, direction, &mut matches)?;
                for m in &matches {
                    let pos = match direction {
                        Direction::Forward => current.pos + m.len,
                        Direction::Reverse => current.pos - m.len,
                    };
                    self.states.push(AnnotatorState {
                        state: next_state,
                        parent: idx,
                        symbol_idx: symbol_idx as u32,
                        pos,
                        token_len: m.len,
                        lowered: m.lowered,
                    });
                    self.stack.push((self.states.len() - 1) as u32);
                }
            }
        }
        self.matches = matches;

        let leftover = |rest: usize| match direction {
            Direction::Forward => word[word.len() - rest..].to_string(),
            Direction::Reverse => word[..rest].to_string(),
        };
        let parse_tokens_list = self
            .accepted
            .iter()
            .map(|&idx| self.parse_tokens(grammar, idx, word, &lower, direction))
            .collect::<Result<Vec<_>>>()?;
        let uninterpretable = if self.accepted.is_empty() {
            word.to_string()
        } else {
            leftover(best_remaining)
        };
        let unparseable = leftover(remaining(self.states[longest as usize].pos));

        Ok(ParseRulesResults {
            parse_tokens_list,
            uninterpretable,
            unparseable,
        })
    }

    /// ノードからルートまで辿り、消費したトークン列を左から右の順で返します。
    fn parse_tokens(
        &self,
        grammar: &Grammar,
        leaf: u32,
        word: &str,
        lower: &str,
        direction: Direction,
    ) -> Result<ParseTokens> {
        let alphabet = grammar.directed(direction).automaton().alphabet();
        let mut symbols = vec![];
        let mut tokens = vec![];
        let mut idx = leaf;
        while idx != NO_PARENT {
            let node = &self.states[idx as usize];
            if node.parent == NO_PARENT {
                break;
            }
            let range = match direction {
                Direction::Forward => node.pos - node.token_len..node.pos,
                Direction::Reverse => node.pos..node.pos + node.token_len,
            };
            let text = if node.lowered { lower } else { word };
            symbols.push(alphabet[node.symbol_idx as usize]);
            tokens.push(text[range].to_string());
            idx = node.parent;
        }
        // The walk goes from the last consumed token back to the first.
        let mut parse_tokens = ParseTokens::new(symbols, tokens)?;
        if direction == Direction::Forward {
            parse_tokens.reverse();
        }
        Ok(parse_tokens)
    }
}
