//! 名称全体の字句解析
//!
//! 名称を先頭から一語ずつ解析し、語の境界（末尾、空白、ハイフン）で
//! 止まる最長一致を受理していきます。解析が行き詰まった場合は、
//! 設定された修正（[`Fixup`]）を順に試します。
//!
//! 逆方向の解析は同じ処理を末尾から行い、主に診断に用いられます。
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::common::is_word_boundary;
use crate::errors::{ChemlexError, Result};
use crate::grammar::Direction;
use crate::token::{ParseRulesResults, ParseTokens, ParseWord};
use crate::tokenizer::worker::Worker;

/// 解析が行き詰まったときに試す修正
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fixup {
    /// 「compound with」「compd. with」で区切られた複合体の成分を分ける
    CompoundPhrase,
    /// CAS索引の「(9CI)」のような注記を取り除く
    CollectiveIndex,
    /// 語の直後に空白なしで次の語が続く場合、そこで語を区切る
    ImplicitSpace,
    /// 誤って挿入された空白を1つ取り除く
    ///
    /// 名称全体の解析で`allow_space_repair`を指定した場合のみ試されます。
    SpaceRemoval,
}

impl Fixup {
    /// デフォルトの修正の順序
    pub const DEFAULT_ORDER: [Self; 4] = [
        Self::CompoundPhrase,
        Self::CollectiveIndex,
        Self::ImplicitSpace,
        Self::SpaceRemoval,
    ];
}

impl fmt::Display for Fixup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CompoundPhrase => "compound-phrase",
            Self::CollectiveIndex => "collective-index",
            Self::ImplicitSpace => "implicit-space",
            Self::SpaceRemoval => "space-removal",
        };
        f.write_str(name)
    }
}

impl FromStr for Fixup {
    type Err = ChemlexError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "compound-phrase" => Ok(Self::CompoundPhrase),
            "collective-index" => Ok(Self::CollectiveIndex),
            "implicit-space" => Ok(Self::ImplicitSpace),
            "space-removal" => Ok(Self::SpaceRemoval),
            _ => Err(ChemlexError::invalid_argument(
                "fixup",
                format!("unknown fixup {s:?}"),
            )),
        }
    }
}

static COMPOUND_PHRASE_AT_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:compd\.|compound)\s+with\s+").unwrap());

static COMPOUND_PHRASE_AT_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(?:compd\.|compound)\s+with\s*$").unwrap());

static COLLECTIVE_INDEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*[\[\(\{]\s*[1-9][0-9]?ci(?:\s*,\s*[1-9][0-9]?ci)*\s*[\]\)\}]").unwrap()
});

/// 名称全体の解析結果
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenizationResult {
    name: String,
    unparsed: String,
    working: String,
    words: Vec<ParseWord>,
    component_breaks: Vec<usize>,
    uninterpretable: String,
    unparseable: String,
}

impl TokenizationResult {
    /// 入力された名称
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 解析できずに残った部分。成功した場合は空です。
    #[inline(always)]
    pub fn unparsed(&self) -> &str {
        &self.unparsed
    }

    /// 最後に文法に与えた文字列
    #[inline(always)]
    pub fn working(&self) -> &str {
        &self.working
    }

    /// 解析された語の列（左から右の順）
    #[inline(always)]
    pub fn words(&self) -> &[ParseWord] {
        &self.words
    }

    /// 複合体の成分の区切り
    ///
    /// 各値は、新しい成分が始まる語のインデックスです。
    #[inline(always)]
    pub fn component_breaks(&self) -> &[usize] {
        &self.component_breaks
    }

    /// 最初に解析が行き詰まった語のうち、解釈できなかった部分
    #[inline(always)]
    pub fn uninterpretable(&self) -> &str {
        &self.uninterpretable
    }

    /// 最初に解析が行き詰まった語のうち、どの状態も到達できなかった部分
    #[inline(always)]
    pub fn unparseable(&self) -> &str {
        &self.unparseable
    }

    /// 名称全体が解析されたか
    #[inline(always)]
    pub fn is_successfully_tokenized(&self) -> bool {
        self.unparsed.is_empty()
    }
}

/// 受理された、空白で区切られた入力の一区間
struct Chunk {
    text: String,
    words: Vec<ParseWord>,
    /// 区間の外側で消費した区切り文字
    separator: Option<char>,
}

/// 解析途中の状態
///
/// 逆方向の場合、`chunks`は右から左の順に並びます。
struct NameState {
    unparsed: String,
    working: String,
    chunks: Vec<Chunk>,
    /// 複合体の区切りを検出した時点での`chunks`の長さ
    breaks: Vec<usize>,
    failure: Option<(String, String)>,
}

impl NameState {
    fn new(name: &str) -> Self {
        Self {
            unparsed: name.to_string(),
            working: String::new(),
            chunks: vec![],
            breaks: vec![],
            failure: None,
        }
    }

    fn record_failure(&mut self, results: &ParseRulesResults) {
        if self.failure.is_none() {
            self.failure = Some((
                results.uninterpretable.clone(),
                results.unparseable.clone(),
            ));
        }
    }

    /// 直前に受理した区間と結合してよいか
    fn last_chunk_is_mergeable(&self) -> Option<&Chunk> {
        if self.breaks.last() == Some(&self.chunks.len()) {
            return None;
        }
        self.chunks
            .last()
            .filter(|chunk| chunk.separator == Some(' '))
    }

    fn finish(self, name: &str, direction: Direction) -> TokenizationResult {
        let offsets: Vec<usize> = self
            .chunks
            .iter()
            .scan(0, |n, chunk| {
                *n += chunk.words.len();
                Some(*n)
            })
            .collect();
        let num_words = offsets.last().copied().unwrap_or(0);
        let words_before = |num_chunks: usize| match num_chunks {
            0 => 0,
            n => offsets[n - 1],
        };
        let component_breaks = self
            .breaks
            .iter()
            .map(|&n| match direction {
                Direction::Forward => words_before(n),
                Direction::Reverse => num_words - words_before(n),
            })
            .collect();
        let words = match direction {
            Direction::Forward => self.chunks.into_iter().flat_map(|c| c.words).collect(),
            Direction::Reverse => self.chunks.into_iter().rev().flat_map(|c| c.words).collect(),
        };
        let (uninterpretable, unparseable) = if self.unparsed.is_empty() {
            (String::new(), String::new())
        } else {
            self.failure.unwrap_or_default()
        };
        TokenizationResult {
            name: name.to_string(),
            unparsed: self.unparsed,
            working: self.working,
            words,
            component_breaks,
            uninterpretable,
            unparseable,
        }
    }
}

fn boundary_after(text: &str, end: usize) -> bool {
    text[end..].chars().next().map_or(true, is_word_boundary)
}

fn boundary_before(text: &str, start: usize) -> bool {
    text[..start].chars().next_back().map_or(true, is_word_boundary)
}

impl Worker {
    /// 名称全体を左から右へ解析します。
    ///
    /// 解析できなかった場合もエラーにはならず、
    /// [`TokenizationResult::is_successfully_tokenized`]が`false`を返します。
    ///
    /// # 引数
    ///
    /// * `name` - 化学物質名。前後の空白は無視されます。
    /// * `allow_space_repair` - 誤って挿入された空白の除去を試すか
    ///
    /// # エラー
    ///
    /// 曖昧性が上限を超えた場合、または文法の不正を検出した場合にエラーを返します。
    pub fn tokenize_name(
        &mut self,
        name: &str,
        allow_space_repair: bool,
    ) -> Result<TokenizationResult> {
        let mut state = NameState::new(name.trim());
        while !state.unparsed.is_empty() {
            let results = self.parse_word(&state.unparsed)?;
            state.working.clone_from(&state.unparsed);
            let consumed = results.consumed_len();
            if consumed != 0 && boundary_after(&state.unparsed, consumed) {
                let source = std::mem::take(&mut state.unparsed);
                self.accept_forward(&mut state, &source, &results.parse_tokens_list, consumed)?;
                continue;
            }
            state.record_failure(&results);
            if !self.try_fixups(&mut state, &results, Direction::Forward, allow_space_repair)? {
                break;
            }
        }
        Ok(state.finish(name, Direction::Forward))
    }

    /// 名称全体を右から左へ解析します。
    ///
    /// 語は左から右の順で返されます。
    pub fn tokenize_name_reverse(
        &mut self,
        name: &str,
        allow_space_repair: bool,
    ) -> Result<TokenizationResult> {
        let mut state = NameState::new(name.trim());
        while !state.unparsed.is_empty() {
            let results = self.parse_word_reverse(&state.unparsed)?;
            state.working.clone_from(&state.unparsed);
            let consumed = results.consumed_len();
            if consumed != 0 && boundary_before(&state.unparsed, state.unparsed.len() - consumed) {
                let source = std::mem::take(&mut state.unparsed);
                self.accept_reverse(&mut state, &source, &results.parse_tokens_list, consumed)?;
                continue;
            }
            state.record_failure(&results);
            if !self.try_fixups(&mut state, &results, Direction::Reverse, allow_space_repair)? {
                break;
            }
        }
        Ok(state.finish(name, Direction::Reverse))
    }

    fn try_fixups(
        &mut self,
        state: &mut NameState,
        results: &ParseRulesResults,
        direction: Direction,
        allow_space_repair: bool,
    ) -> Result<bool> {
        for i in 0..self.tokenizer.fixups().len() {
            let fixup = self.tokenizer.fixups()[i];
            let applied = match fixup {
                Fixup::CompoundPhrase => apply_compound_phrase(state, direction),
                Fixup::CollectiveIndex => apply_collective_index(state, direction),
                Fixup::ImplicitSpace => self.apply_implicit_space(state, results, direction)?,
                Fixup::SpaceRemoval if allow_space_repair => {
                    self.apply_space_removal(state, direction)?
                }
                Fixup::SpaceRemoval => false,
            };
            if applied {
                log::debug!("applied {fixup} to {:?}", state.working);
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// `source[..consumed]`を受理し、続く区切り文字を1つ消費します。
    fn accept_forward(
        &self,
        state: &mut NameState,
        source: &str,
        alternatives: &[ParseTokens],
        consumed: usize,
    ) -> Result<()> {
        let text = &source[..consumed];
        let words = self.tokenizer.split_alternatives_into_words(alternatives, text)?;
        let mut rest = &source[consumed..];
        let separator = rest.chars().next().filter(|&c| is_word_boundary(c));
        if let Some(c) = separator {
            rest = &rest[c.len_utf8()..];
        }
        state.chunks.push(Chunk {
            text: text.to_string(),
            words,
            separator,
        });
        state.unparsed = rest.to_string();
        Ok(())
    }

    /// `source`の末尾`consumed`バイトを受理し、その前の区切り文字を1つ消費します。
    fn accept_reverse(
        &self,
        state: &mut NameState,
        source: &str,
        alternatives: &[ParseTokens],
        consumed: usize,
    ) -> Result<()> {
        let start = source.len() - consumed;
        let text = &source[start..];
        let words = self.tokenizer.split_alternatives_into_words(alternatives, text)?;
        let mut rest = &source[..start];
        let separator = rest.chars().next_back().filter(|&c| is_word_boundary(c));
        if let Some(c) = separator {
            rest = &rest[..rest.len() - c.len_utf8()];
        }
        state.chunks.push(Chunk {
            text: text.to_string(),
            words,
            separator,
        });
        state.unparsed = rest.to_string();
        Ok(())
    }

    fn accept(
        &self,
        state: &mut NameState,
        source: &str,
        alternatives: &[ParseTokens],
        consumed: usize,
        direction: Direction,
    ) -> Result<()> {
        match direction {
            Direction::Forward => self.accept_forward(state, source, alternatives, consumed),
            Direction::Reverse => self.accept_reverse(state, source, alternatives, consumed),
        }
    }

    fn parse_directed(&mut self, word: &str, direction: Direction) -> Result<ParseRulesResults> {
        match direction {
            Direction::Forward => self.parse_word(word),
            Direction::Reverse => self.parse_word_reverse(word),
        }
    }

    fn ends_in_terminator(&self, alternatives: &[ParseTokens]) -> bool {
        let terminators = self.tokenizer.grammar().terminators();
        alternatives.iter().all(|parse_tokens| {
            parse_tokens
                .symbols()
                .last()
                .is_some_and(|&symbol| terminators.is_terminator(symbol))
        })
    }

    /// 受理された語の直後に次の語が空白なしで続いている場合に、そこで区切ります。
    fn apply_implicit_space(
        &mut self,
        state: &mut NameState,
        results: &ParseRulesResults,
        direction: Direction,
    ) -> Result<bool> {
        let consumed = results.consumed_len();
        if consumed == 0 {
            return Ok(false);
        }
        let source = std::mem::take(&mut state.unparsed);
        let rest = match direction {
            Direction::Forward => &source[consumed..],
            Direction::Reverse => &source[..source.len() - consumed],
        };
        let lookahead = self.parse_directed(rest, direction)?;
        // The left piece must end a word.
        let left = match direction {
            Direction::Forward => &results.parse_tokens_list,
            Direction::Reverse => &lookahead.parse_tokens_list,
        };
        if lookahead.consumed_len() == 0 || !self.ends_in_terminator(left) {
            state.unparsed = source;
            return Ok(false);
        }
        self.accept(state, &source, &results.parse_tokens_list, consumed, direction)?;
        Ok(true)
    }

    /// 空白を1つ取り除いて解析が進むか試します。
    ///
    /// 直前に受理した区間が空白で区切られていればまずそれと結合し、
    /// 次に未解析部分の中の空白を取り除きます。
    fn apply_space_removal(&mut self, state: &mut NameState, direction: Direction) -> Result<bool> {
        if let Some(chunk) = state.last_chunk_is_mergeable() {
            let candidate = match direction {
                Direction::Forward => format!("{}{}", chunk.text, state.unparsed),
                Direction::Reverse => format!("{}{}", state.unparsed, chunk.text),
            };
            let chunk_len = chunk.text.len();
            let merged = self.parse_directed(&candidate, direction)?;
            let consumed = merged.consumed_len();
            if consumed > chunk_len && is_accepted_at(&candidate, consumed, direction) {
                log::debug!("removed the space before {:?}", state.unparsed);
                state.chunks.pop();
                self.accept(state, &candidate, &merged.parse_tokens_list, consumed, direction)?;
                return Ok(true);
            }
        }

        let space = match direction {
            Direction::Forward => state.unparsed.find(' '),
            Direction::Reverse => state.unparsed.rfind(' '),
        };
        let Some(k) = space.filter(|&k| k != 0 && k + 1 != state.unparsed.len()) else {
            return Ok(false);
        };
        let candidate = format!("{}{}", &state.unparsed[..k], &state.unparsed[k + 1..]);
        let joined = self.parse_directed(&candidate, direction)?;
        let consumed = joined.consumed_len();
        let crosses = match direction {
            Direction::Forward => consumed > k,
            Direction::Reverse => consumed > candidate.len() - k,
        };
        if crosses && is_accepted_at(&candidate, consumed, direction) {
            log::debug!("removed a space from {:?}", state.unparsed);
            self.accept(state, &candidate, &joined.parse_tokens_list, consumed, direction)?;
            return Ok(true);
        }
        Ok(false)
    }
}

fn is_accepted_at(text: &str, consumed: usize, direction: Direction) -> bool {
    match direction {
        Direction::Forward => boundary_after(text, consumed),
        Direction::Reverse => boundary_before(text, text.len() - consumed),
    }
}

fn apply_compound_phrase(state: &mut NameState, direction: Direction) -> bool {
    // A connector joins two components, so one must already be accepted.
    if state.chunks.is_empty() {
        return false;
    }
    let phrase = match direction {
        Direction::Forward => COMPOUND_PHRASE_AT_START.find(&state.unparsed),
        Direction::Reverse => COMPOUND_PHRASE_AT_END.find(&state.unparsed),
    };
    let Some(m) = phrase else {
        return false;
    };
    state.unparsed.replace_range(m.range(), "");
    state.breaks.push(state.chunks.len());
    true
}

fn apply_collective_index(state: &mut NameState, direction: Direction) -> bool {
    let mut found = COLLECTIVE_INDEX.find_iter(&state.unparsed);
    let index = match direction {
        Direction::Forward => found.next(),
        Direction::Reverse => found.last(),
    };
    let Some(m) = index else {
        return false;
    };
    state.unparsed.replace_range(m.range(), "");
    state.unparsed = state.unparsed.trim().to_string();
    true
}
