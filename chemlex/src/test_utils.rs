//! テスト用ユーティリティ
//!
//! テストコードで使用する小さな文法と便利な関数を提供します。

use crate::grammar::{Grammar, GrammarBuilder, StateId, Symbol, SymbolAutomaton, TerminatorSymbols};
use crate::token::ParseTokens;
use crate::tokenizer::Tokenizer;

pub(crate) const AUTOMATON_DEF: &str = include_str!("./resources/toy/automaton.def");
pub(crate) const LEXICON_CSV: &str = include_str!("./resources/toy/lexicon.csv");

/// 置換基の直後に空白なしで官能項が続くことを許す遷移
const GLUED_EDGE: &str = "edge 3 f 7\n";

pub(crate) fn toy_grammar() -> Grammar {
    GrammarBuilder::from_readers(AUTOMATON_DEF.as_bytes(), LEXICON_CSV.as_bytes())
        .unwrap()
        .build()
        .unwrap()
}

/// `ethyloxime`のように語が空白なしで連続することを文法自体が許す変種
pub(crate) fn glued_grammar() -> Grammar {
    let def = format!("{AUTOMATON_DEF}{GLUED_EDGE}");
    GrammarBuilder::from_readers(def.as_bytes(), LEXICON_CSV.as_bytes())
        .unwrap()
        .build()
        .unwrap()
}

/// `q`の1文字ごとに2通りの記号が同じ長さで一致する文法
///
/// `q`を`n`文字並べた語は`2^n`通りの読みを持ちます。
pub(crate) fn tied_grammar() -> Grammar {
    let alphabet = "abxyz".chars().map(Symbol).collect();
    let mut automaton = SymbolAutomaton::new(alphabet, 1, StateId(0)).unwrap();
    automaton.set_accept(StateId(0)).unwrap();
    automaton.add_transition(StateId(0), Symbol('a'), StateId(0)).unwrap();
    automaton.add_transition(StateId(0), Symbol('b'), StateId(0)).unwrap();

    let mut builder = GrammarBuilder::new(automaton).terminators(TerminatorSymbols {
        end_of_substituent: Symbol('x'),
        end_of_main_group: Symbol('y'),
        end_of_functional_term: Symbol('z'),
    });
    for (symbol, token) in [('a', "q"), ('b', "q"), ('x', "x"), ('y', "y"), ('z', "z")] {
        builder.add_tokens(Symbol(symbol), [token]).unwrap();
    }
    builder.build().unwrap()
}

pub(crate) fn toy_tokenizer() -> Tokenizer {
    Tokenizer::new(toy_grammar())
}

/// トークン列を`"トークン/記号"`の形で並べます。
pub(crate) fn annotated(parse_tokens: &ParseTokens) -> Vec<String> {
    parse_tokens
        .tokens()
        .iter()
        .zip(parse_tokens.symbols())
        .map(|(token, symbol)| format!("{token}/{symbol}"))
        .collect()
}

/// 各候補を`annotated`で並べ、比較しやすいように整列します。
pub(crate) fn sorted_annotations(list: &[ParseTokens]) -> Vec<Vec<String>> {
    let mut v: Vec<_> = list.iter().map(annotated).collect();
    v.sort();
    v
}
