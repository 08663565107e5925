//! 文法構築のためのビルダー
//!
//! 記号オートマトンと記号ごとの辞書エントリから[`Grammar`]を組み立てます。
//! 逆向きの辞書は順方向のエントリから自動的に作られます。
//! 逆向きの記号オートマトンは明示的に与えることも、
//! [`SymbolAutomaton::reversed`]で導出させることもできます。

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use hashbrown::HashMap;

use crate::errors::{ChemlexError, Result};
use crate::grammar::matcher::{compile_pattern, MatcherKind, SymbolMatchers};
use crate::grammar::token_automaton::TokenAutomaton;
use crate::grammar::trie::RadixTrie;
use crate::grammar::{
    Automaton, DirectedGrammar, Direction, Grammar, StateId, Symbol, SymbolAutomaton,
    TerminatorSymbols,
};
use crate::utils::{lowercase_aligned, parse_csv_row};

/// 1つの記号に登録された辞書エントリ
#[derive(Default, Debug)]
struct SymbolEntries {
    tokens: Vec<String>,
    automata: Vec<String>,
    patterns: Vec<String>,
}

/// [`Grammar`]を構築するビルダー
///
/// # 例
///
/// ```
/// use chemlex::grammar::{GrammarBuilder, StateId, Symbol, SymbolAutomaton, TerminatorSymbols};
///
/// let alphabet = vec![Symbol('s'), Symbol('e'), Symbol('m'), Symbol('f')];
/// let mut automaton = SymbolAutomaton::new(alphabet, 3, StateId(0))?;
/// automaton.add_transition(StateId(0), Symbol('s'), StateId(1))?;
/// automaton.add_transition(StateId(1), Symbol('e'), StateId(2))?;
/// automaton.set_accept(StateId(2))?;
///
/// let mut builder = GrammarBuilder::new(automaton).terminators(TerminatorSymbols {
///     end_of_substituent: Symbol('e'),
///     end_of_main_group: Symbol('m'),
///     end_of_functional_term: Symbol('f'),
/// });
/// builder.add_tokens(Symbol('s'), ["meth", "eth"])?;
/// builder.add_tokens(Symbol('e'), ["yl"])?;
/// builder.add_tokens(Symbol('m'), ["ane"])?;
/// builder.add_tokens(Symbol('f'), [" alcohol"])?;
/// let grammar = builder.build()?;
/// assert_eq!(grammar.alphabet().len(), 4);
/// # Ok::<(), chemlex::errors::ChemlexError>(())
/// ```
pub struct GrammarBuilder {
    automaton: SymbolAutomaton,
    reverse_automaton: Option<SymbolAutomaton>,
    terminators: Option<TerminatorSymbols>,
    entries: HashMap<Symbol, SymbolEntries>,
}

impl GrammarBuilder {
    /// 順方向の記号オートマトンから新しいビルダーを作成します。
    pub fn new(automaton: SymbolAutomaton) -> Self {
        Self {
            automaton,
            reverse_automaton: None,
            terminators: None,
            entries: HashMap::new(),
        }
    }

    /// 終端記号を設定します。
    pub fn terminators(mut self, terminators: TerminatorSymbols) -> Self {
        self.terminators = Some(terminators);
        self
    }

    /// 逆向きの記号オートマトンを明示的に設定します。
    ///
    /// 設定しない場合は順方向のオートマトンを反転して使用します。
    pub fn reverse_automaton(mut self, automaton: SymbolAutomaton) -> Self {
        self.reverse_automaton = Some(automaton);
        self
    }

    fn entries_mut(&mut self, symbol: Symbol) -> Result<&mut SymbolEntries> {
        if self.automaton.symbol_index(symbol).is_none() {
            return Err(ChemlexError::invalid_argument(
                "symbol",
                format!("{symbol} is not in the alphabet"),
            ));
        }
        Ok(self.entries.entry(symbol).or_default())
    }

    /// 記号に字句トークンを追加します。トークンは小文字化して登録されます。
    pub fn add_tokens<I, S>(&mut self, symbol: Symbol, tokens: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = self.entries_mut(symbol)?;
        entries
            .tokens
            .extend(tokens.into_iter().map(|t| lowercase_aligned(t.as_ref())));
        Ok(())
    }

    /// 記号にトークンオートマトンのパターンを追加します。
    ///
    /// パターンは小文字化したテキストと最長一致で照合されます。
    pub fn add_automaton(&mut self, symbol: Symbol, pattern: &str) -> Result<()> {
        self.entries_mut(symbol)?.automata.push(pattern.to_string());
        Ok(())
    }

    /// 記号に生の正規表現を追加します。
    ///
    /// パターンは元のテキストと大文字小文字を区別して照合されます。
    pub fn add_pattern(&mut self, symbol: Symbol, pattern: &str) -> Result<()> {
        self.entries_mut(symbol)?.patterns.push(pattern.to_string());
        Ok(())
    }

    /// 辞書を読み込み、新しいビルダーを作成します。
    ///
    /// # 引数
    ///
    ///  - `automaton_rdr`: オートマトン定義ファイル `automaton.def` のリーダー
    ///  - `lexicon_rdr`: 辞書ファイル `lexicon.csv` のリーダー
    ///
    /// # エラー
    ///
    /// 入力フォーマットが不正な場合に [`ChemlexError`] を返します。
    pub fn from_readers<A, L>(automaton_rdr: A, lexicon_rdr: L) -> Result<Self>
    where
        A: Read,
        L: Read,
    {
        let (automaton, terminators) = parse_automaton_def(automaton_rdr, "automaton.def")?;
        let mut builder = Self::new(automaton);
        builder.terminators = terminators;
        builder.read_lexicon(lexicon_rdr)?;
        Ok(builder)
    }

    /// ディレクトリから文法ファイルを読み込み、新しいビルダーを作成します。
    ///
    /// ディレクトリには`automaton.def`と`lexicon.csv`が必要です。
    /// `reverse.def`があれば逆向きのオートマトンとして読み込みます。
    ///
    /// # エラー
    ///
    /// ファイルが開けない場合、または入力フォーマットが不正な場合に
    /// [`ChemlexError`] を返します。
    pub fn from_dir<P>(dir: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let dir = dir.as_ref();
        let builder = Self::from_readers(
            File::open(dir.join("automaton.def"))?,
            File::open(dir.join("lexicon.csv"))?,
        )?;
        let reverse_path = dir.join("reverse.def");
        if reverse_path.exists() {
            log::debug!("reading the reverse automaton from {}", reverse_path.display());
            return builder.reverse_automaton_from_reader(File::open(reverse_path)?);
        }
        Ok(builder)
    }

    /// 逆向きのオートマトン定義ファイルを読み込んで設定します。
    pub fn reverse_automaton_from_reader<R>(self, rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let (automaton, _) = parse_automaton_def(rdr, "reverse.def")?;
        Ok(self.reverse_automaton(automaton))
    }

    fn read_lexicon<R>(&mut self, rdr: R) -> Result<()>
    where
        R: Read,
    {
        let rdr = BufReader::new(rdr);
        for line in rdr.lines() {
            let line = line?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let cols = parse_csv_row(&line)?;
            if cols.len() != 3 {
                let msg = format!("A csv row of lexicon must have three items, {line:?}");
                return Err(ChemlexError::invalid_format("lexicon.csv", msg));
            }
            let mut chars = cols[0].chars();
            let symbol = match (chars.next(), chars.next()) {
                (Some(c), None) => Symbol(c),
                _ => {
                    let msg = format!("A symbol must be a single character, {:?}", cols[0]);
                    return Err(ChemlexError::invalid_format("lexicon.csv", msg));
                }
            };
            if self.automaton.symbol_index(symbol).is_none() {
                let msg = format!("{symbol} is not in the alphabet, {line:?}");
                return Err(ChemlexError::invalid_format("lexicon.csv", msg));
            }
            match cols[1].as_str() {
                "token" => self.add_tokens(symbol, [&cols[2]])?,
                "automaton" => self.add_automaton(symbol, &cols[2])?,
                "regex" => self.add_pattern(symbol, &cols[2])?,
                kind => {
                    let msg = format!("Unknown entry kind {kind:?}, {line:?}");
                    return Err(ChemlexError::invalid_format("lexicon.csv", msg));
                }
            }
        }
        Ok(())
    }

    /// [`Grammar`]を構築します。
    ///
    /// # エラー
    ///
    /// 終端記号が未設定またはアルファベット外の場合、辞書を持たない記号がある場合、
    /// 逆向きのオートマトンのアルファベットが一致しない場合、
    /// パターンが不正な場合にエラーを返します。
    pub fn build(self) -> Result<Grammar> {
        let terminators = self.terminators.ok_or_else(|| {
            ChemlexError::invalid_argument("terminators", "terminator symbols are not set")
        })?;
        for symbol in terminators.iter() {
            if self.automaton.symbol_index(symbol).is_none() {
                return Err(ChemlexError::invalid_argument(
                    "terminators",
                    format!("terminator {symbol} is not in the alphabet"),
                ));
            }
        }

        let reverse_automaton = match self.reverse_automaton {
            Some(a) => {
                if a.alphabet() != self.automaton.alphabet() {
                    return Err(ChemlexError::invalid_argument(
                        "reverse_automaton",
                        "the alphabet differs from the forward automaton",
                    ));
                }
                a
            }
            None => self.automaton.reversed(),
        };

        let mut forward = vec![];
        let mut reverse = vec![];
        for &symbol in self.automaton.alphabet() {
            let Some(entries) = self.entries.get(&symbol) else {
                return Err(ChemlexError::invalid_state(
                    "symbol without dictionaries",
                    format!("no tokens, automata or patterns are registered for {symbol}"),
                ));
            };
            forward.push(build_matchers(entries, Direction::Forward)?);
            reverse.push(build_matchers(entries, Direction::Reverse)?);
        }

        Ok(Grammar {
            forward: DirectedGrammar {
                automaton: self.automaton,
                matchers: forward,
            },
            reverse: DirectedGrammar {
                automaton: reverse_automaton,
                matchers: reverse,
            },
            terminators,
        })
    }
}

fn build_matchers(entries: &SymbolEntries, direction: Direction) -> Result<SymbolMatchers> {
    let mut matchers = vec![];
    if !entries.tokens.is_empty() {
        matchers.push(MatcherKind::Trie(match direction {
            Direction::Forward => RadixTrie::from_tokens(&entries.tokens),
            Direction::Reverse => RadixTrie::from_tokens_reversed(&entries.tokens),
        }));
    }
    if !entries.automata.is_empty() {
        let automata = entries
            .automata
            .iter()
            .map(|p| TokenAutomaton::new(p, direction))
            .collect::<Result<Vec<_>>>()?;
        matchers.push(MatcherKind::AutomatonList(automata));
    }
    if !entries.patterns.is_empty() {
        let patterns = entries
            .patterns
            .iter()
            .map(|p| compile_pattern(p, direction))
            .collect::<Result<Vec<_>>>()?;
        matchers.push(MatcherKind::PatternList(patterns));
    }
    Ok(SymbolMatchers::new(matchers))
}

/// オートマトン定義を解析します。
///
/// ```text
/// alphabet <chars>
/// terminators <sub> <main> <func>
/// start <state>
/// accept <state> [<state> ...]
/// edge <from> <symbol> <to>
/// ```
fn parse_automaton_def<R>(
    rdr: R,
    name: &'static str,
) -> Result<(SymbolAutomaton, Option<TerminatorSymbols>)>
where
    R: Read,
{
    let mut alphabet = None;
    let mut terminators = None;
    let mut start = None;
    let mut accepts = vec![];
    let mut edges = vec![];
    let mut max_state = 0;

    let rdr = BufReader::new(rdr);
    for line in rdr.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let cols: Vec<_> = line.split_whitespace().collect();
        match cols[0] {
            "alphabet" if cols.len() == 2 => {
                alphabet = Some(cols[1].chars().map(Symbol).collect::<Vec<_>>());
            }
            "terminators" if cols.len() == 4 => {
                let symbols = cols[1..]
                    .iter()
                    .map(|c| parse_symbol(c, name))
                    .collect::<Result<Vec<_>>>()?;
                terminators = Some(TerminatorSymbols {
                    end_of_substituent: symbols[0],
                    end_of_main_group: symbols[1],
                    end_of_functional_term: symbols[2],
                });
            }
            "start" if cols.len() == 2 => {
                let state: u32 = cols[1].parse()?;
                max_state = max_state.max(state);
                start = Some(state);
            }
            "accept" if cols.len() >= 2 => {
                for col in &cols[1..] {
                    let state: u32 = col.parse()?;
                    max_state = max_state.max(state);
                    accepts.push(state);
                }
            }
            "edge" if cols.len() == 4 => {
                let from: u32 = cols[1].parse()?;
                let symbol = parse_symbol(cols[2], name)?;
                let to: u32 = cols[3].parse()?;
                max_state = max_state.max(from).max(to);
                edges.push((from, symbol, to));
            }
            _ => {
                let msg = format!("Unrecognized line, {line:?}");
                return Err(ChemlexError::invalid_format(name, msg));
            }
        }
    }

    let alphabet =
        alphabet.ok_or_else(|| ChemlexError::invalid_format(name, "alphabet is not defined"))?;
    let start = start.ok_or_else(|| ChemlexError::invalid_format(name, "start is not defined"))?;

    let mut automaton = SymbolAutomaton::new(alphabet, max_state as usize + 1, StateId(start))?;
    for state in accepts {
        automaton.set_accept(StateId(state))?;
    }
    for (from, symbol, to) in edges {
        automaton.add_transition(StateId(from), symbol, StateId(to))?;
    }
    Ok((automaton, terminators))
}

fn parse_symbol(col: &str, name: &'static str) -> Result<Symbol> {
    let mut chars = col.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Symbol(c)),
        _ => Err(ChemlexError::invalid_format(
            name,
            format!("A symbol must be a single character, {col:?}"),
        )),
    }
}
