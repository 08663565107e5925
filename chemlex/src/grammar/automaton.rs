//! 記号オートマトン
//!
//! 名称の各部分に割り当てる役割記号（アノテーション）の並びを受理する
//! 決定性有限オートマトンです。

use hashbrown::HashMap;

use crate::errors::{ChemlexError, Result};
use crate::grammar::Symbol;

const INVALID_STATE: u32 = u32::MAX;

/// オートマトンの状態ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub u32);

impl StateId {
    #[inline(always)]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// 記号オートマトンの照会インターフェース
///
/// `alphabet()` の順序は固定で、探索で分岐を積む順序（ひいては同点の解析結果の
/// 並び順）を決定します。
pub trait Automaton {
    /// 初期状態を返します。
    fn initial_state(&self) -> StateId;

    /// 受理状態かどうかを返します。
    fn is_accept(&self, state: StateId) -> bool;

    /// 記号による遷移先を返します。遷移が定義されていなければ`None`。
    fn step(&self, state: StateId, symbol: Symbol) -> Option<StateId>;

    /// 記号のアルファベットを返します。
    fn alphabet(&self) -> &[Symbol];

    /// アルファベット上の位置で指定した記号による遷移先を返します。
    #[inline(always)]
    fn step_by_index(&self, state: StateId, symbol_idx: usize) -> Option<StateId> {
        self.step(state, self.alphabet()[symbol_idx])
    }
}

/// 遷移表を密な配列で保持する記号オートマトン
#[derive(Debug, Clone)]
pub struct SymbolAutomaton {
    alphabet: Vec<Symbol>,
    symbol_ids: HashMap<Symbol, usize>,
    transitions: Vec<u32>,
    accept: Vec<bool>,
    initial: StateId,
}

impl SymbolAutomaton {
    /// 遷移のない新しいオートマトンを作成します。
    ///
    /// # 引数
    ///
    /// * `alphabet` - 記号のアルファベット（順序に意味があります）
    /// * `num_states` - 状態数
    /// * `initial` - 初期状態
    ///
    /// # エラー
    ///
    /// アルファベットに重複がある場合や、初期状態が範囲外の場合にエラーを返します。
    pub fn new(alphabet: Vec<Symbol>, num_states: usize, initial: StateId) -> Result<Self> {
        let mut symbol_ids = HashMap::with_capacity(alphabet.len());
        for (i, &symbol) in alphabet.iter().enumerate() {
            if symbol_ids.insert(symbol, i).is_some() {
                return Err(ChemlexError::invalid_argument(
                    "alphabet",
                    format!("symbol {symbol} appears more than once"),
                ));
            }
        }
        if initial.index() >= num_states {
            return Err(ChemlexError::invalid_argument(
                "initial",
                format!("state {} is out of range 0..{num_states}", initial.0),
            ));
        }
        Ok(Self {
            transitions: vec![INVALID_STATE; num_states * alphabet.len()],
            accept: vec![false; num_states],
            alphabet,
            symbol_ids,
            initial,
        })
    }

    /// 状態数
    #[inline(always)]
    pub fn num_states(&self) -> usize {
        self.accept.len()
    }

    /// 記号のアルファベット上の位置を返します。
    #[inline(always)]
    pub fn symbol_index(&self, symbol: Symbol) -> Option<usize> {
        self.symbol_ids.get(&symbol).copied()
    }

    /// 状態を受理状態に設定します。
    pub fn set_accept(&mut self, state: StateId) -> Result<()> {
        self.check_state(state, "state")?;
        self.accept[state.index()] = true;
        Ok(())
    }

    /// 遷移を追加します。既存の遷移は上書きされます。
    pub fn add_transition(&mut self, from: StateId, symbol: Symbol, to: StateId) -> Result<()> {
        self.check_state(from, "from")?;
        self.check_state(to, "to")?;
        let idx = self.symbol_index(symbol).ok_or_else(|| {
            ChemlexError::invalid_argument("symbol", format!("{symbol} is not in the alphabet"))
        })?;
        self.transitions[from.index() * self.alphabet.len() + idx] = to.0;
        Ok(())
    }

    fn check_state(&self, state: StateId, arg: &'static str) -> Result<()> {
        if state.index() < self.num_states() {
            Ok(())
        } else {
            Err(ChemlexError::invalid_argument(
                arg,
                format!("state {} is out of range 0..{}", state.0, self.num_states()),
            ))
        }
    }

    /// 記号列を右から左へ読むオートマトンを作成します。
    ///
    /// 遷移を反転した非決定性オートマトンを部分集合構成法で決定化します。
    /// 元の受理状態の集合が新しい初期状態になり、元の初期状態を含む集合が
    /// 受理状態になります。アルファベットの順序は保たれます。
    pub fn reversed(&self) -> Self {
        let k = self.alphabet.len();
        let mut preds = vec![vec![]; self.transitions.len()];
        for (i, &to) in self.transitions.iter().enumerate() {
            if to != INVALID_STATE {
                let (from, symbol_idx) = (i / k, i % k);
                preds[to as usize * k + symbol_idx].push(from as u32);
            }
        }

        let start: Vec<u32> = (0..self.num_states())
            .filter(|&s| self.accept[s])
            .map(|s| s as u32)
            .collect();
        let mut ids = HashMap::new();
        ids.insert(start.clone(), 0u32);
        let mut sets = vec![start];
        let mut transitions = vec![];
        let mut accept = vec![];

        let mut i = 0;
        while i < sets.len() {
            accept.push(sets[i].contains(&self.initial.0));
            for symbol_idx in 0..k {
                let mut next: Vec<u32> = sets[i]
                    .iter()
                    .flat_map(|&s| preds[s as usize * k + symbol_idx].iter().copied())
                    .collect();
                next.sort_unstable();
                next.dedup();
                if next.is_empty() {
                    transitions.push(INVALID_STATE);
                    continue;
                }
                let id = match ids.get(&next) {
                    Some(&id) => id,
                    None => {
                        let id = sets.len() as u32;
                        ids.insert(next.clone(), id);
                        sets.push(next);
                        id
                    }
                };
                transitions.push(id);
            }
            i += 1;
        }

        Self {
            alphabet: self.alphabet.clone(),
            symbol_ids: self.symbol_ids.clone(),
            transitions,
            accept,
            initial: StateId(0),
        }
    }
}

impl Automaton for SymbolAutomaton {
    #[inline(always)]
    fn initial_state(&self) -> StateId {
        self.initial
    }

    #[inline(always)]
    fn is_accept(&self, state: StateId) -> bool {
        self.accept[state.index()]
    }

    #[inline(always)]
    fn step(&self, state: StateId, symbol: Symbol) -> Option<StateId> {
        self.step_by_index(state, self.symbol_index(symbol)?)
    }

    #[inline(always)]
    fn alphabet(&self) -> &[Symbol] {
        &self.alphabet
    }

    #[inline(always)]
    fn step_by_index(&self, state: StateId, symbol_idx: usize) -> Option<StateId> {
        let to = self.transitions[state.index() * self.alphabet.len() + symbol_idx];
        (to != INVALID_STATE).then_some(StateId(to))
    }
}
