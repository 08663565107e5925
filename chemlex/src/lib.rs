//! # chemlex
//!
//! chemlexは、化学物質の体系名を語とトークンに分割する注釈付け字句解析器です。
//!
//! ## 概要
//!
//! 名称の文法は、役割記号の列を受理する記号オートマトンと、記号ごとの
//! トークン辞書（字句トライ、トークンオートマトン、正規表現）で表されます。
//! 字句解析器はオートマトンと辞書を同時に辿り、最長一致で受理される
//! 全てのトークン列を求めます。
//!
//! ## 主な機能
//!
//! - **一語の探索**: 最長一致で同点の全ての読みを列挙（[`Worker::parse_word`]）
//! - **名称全体の解析**: 空白とハイフンで区切られた語を順に解析し、
//!   空白の省略や誤った空白、複合体の区切りを補正（[`Worker::tokenize_name`]）
//! - **語への分割**: 空白が省略された語の分離（[`Tokenizer::split_into_words`]）
//! - **読みの展開**: 語ごとの読みの組み合わせの列挙（[`Tokenizer::expand_to_parses`]）
//! - **診断**: 双方向の解析による、解釈できない部分の特定（[`Worker::diagnose`]）
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use chemlex::{GrammarBuilder, Tokenizer, WordType};
//!
//! let automaton_def = "\
//! alphabet semf
//! terminators e m f
//! start 0
//! accept 1 3 4
//! edge 0 e 1
//! edge 0 s 2
//! edge 2 m 3
//! edge 0 f 4";
//! let lexicon_csv = "\
//! s,token,ethan
//! e,token,ethyl
//! m,token,ol
//! f,token,alcohol";
//!
//! let grammar = GrammarBuilder::from_readers(
//!     automaton_def.as_bytes(),
//!     lexicon_csv.as_bytes(),
//! )?
//! .build()?;
//!
//! let tokenizer = Tokenizer::new(grammar);
//! let mut worker = tokenizer.new_worker();
//!
//! let result = worker.tokenize_name("Ethyl alcohol", false)?;
//! assert!(result.is_successfully_tokenized());
//! assert_eq!(result.words().len(), 2);
//! assert_eq!(result.words()[0].text(), "Ethyl");
//! assert_eq!(result.words()[0].parse_tokens()[0].tokens(), &["ethyl"]);
//!
//! let parses = tokenizer.expand_to_parses(result.words())?;
//! assert_eq!(parses.len(), 1);
//! assert_eq!(parses[0].words()[0].word_type(), Some(WordType::Substituent));
//! assert_eq!(parses[0].words()[1].word_type(), Some(WordType::FunctionalTerm));
//! # Ok(())
//! # }
//! ```

#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
compile_error!("`target_pointer_width` must be 32 or 64");

/// 共通の定数
pub mod common;

/// エラー型の定義
pub mod errors;

/// 文法と辞書
pub mod grammar;

/// 解析結果の型定義
pub mod token;

/// 字句解析器の実装
pub mod tokenizer;

/// 内部ユーティリティ関数
pub mod utils;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod tests;

// Re-exports
pub use grammar::{Grammar, GrammarBuilder, Symbol, TerminatorSymbols};
pub use token::{Parse, ParseRulesResults, ParseTokens, ParseWord, WordType};
pub use tokenizer::{Diagnosis, Fixup, TokenizationResult, Tokenizer, Worker};

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
