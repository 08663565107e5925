//! 注釈付け字句解析器
//!
//! このモジュールは、化学物質名を語とトークンに分割する字句解析器を提供します。
//! 記号オートマトンと記号ごとの辞書を同時に辿り、最長一致で受理される
//! 全てのトークン列を求めます。
//!
//! # 主要な構造体
//!
//! - [`Tokenizer`]: 文法を保持し、ワーカーを生成する構造体
//! - [`Worker`]: 探索用のバッファを保持し、実際の解析処理を行う構造体
//!
//! # 例
//!
//! ```no_run
//! use std::fs::File;
//! use chemlex::{GrammarBuilder, Tokenizer};
//!
//! let grammar = GrammarBuilder::from_readers(
//!     File::open("grammar/automaton.def")?,
//!     File::open("grammar/lexicon.csv")?,
//! )?
//! .build()?;
//! let tokenizer = Tokenizer::new(grammar);
//! let mut worker = tokenizer.new_worker();
//!
//! let result = worker.tokenize_name("2-methylpropan-1-ol", false)?;
//! for word in result.words() {
//!     println!("{}", word.text());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
mod annotator;
mod combination;
pub mod diagnosis;
pub mod name;
mod segmentation;
pub mod worker;

use std::sync::Arc;

use crate::errors::Result;
use crate::grammar::Grammar;
use crate::token::{Parse, ParseTokens, ParseWord};
pub use crate::tokenizer::diagnosis::Diagnosis;
pub use crate::tokenizer::name::{Fixup, TokenizationResult};
pub use crate::tokenizer::worker::Worker;

/// 化学物質名の字句解析器
///
/// 文法と、名称全体の解析で試す修正の順序を保持します。
/// 文法は`Arc`で共有されるため、`Tokenizer`の複製は安価です。
///
/// # 例
///
/// ```no_run
/// use std::sync::Arc;
/// use std::fs::File;
/// use chemlex::{Fixup, GrammarBuilder, Tokenizer};
///
/// let grammar = Arc::new(
///     GrammarBuilder::from_readers(
///         File::open("grammar/automaton.def")?,
///         File::open("grammar/lexicon.csv")?,
///     )?
///     .build()?,
/// );
/// let tokenizer = Tokenizer::from_shared_grammar(grammar.clone())
///     .fixup_order(vec![Fixup::ImplicitSpace, Fixup::SpaceRemoval]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct Tokenizer {
    grammar: Arc<Grammar>,
    fixups: Vec<Fixup>,
}

impl Tokenizer {
    /// 新しいトークナイザーを作成します。
    ///
    /// 文法はトークナイザーに所有権が移動します。複数のトークナイザー間で文法を共有する
    /// 必要がある場合は、[`Tokenizer::from_shared_grammar`]を使用してください。
    pub fn new(grammar: Grammar) -> Self {
        Self::from_shared_grammar(Arc::new(grammar))
    }

    /// 共有された文法から新しいトークナイザーを作成します。
    pub fn from_shared_grammar(grammar: Arc<Grammar>) -> Self {
        Self {
            grammar,
            fixups: Fixup::DEFAULT_ORDER.to_vec(),
        }
    }

    /// 名称全体の解析が行き詰まったときに試す修正とその順序を指定します。
    ///
    /// 先頭から順に試し、最初に適用できた修正を採用します。
    /// 空のリストを指定すると修正を一切行いません。
    ///
    /// # 引数
    ///
    /// * `fixups` - 試す修正のリスト
    pub fn fixup_order(mut self, fixups: Vec<Fixup>) -> Self {
        self.fixups = fixups;
        self
    }

    /// 修正の順序
    #[inline(always)]
    pub fn fixups(&self) -> &[Fixup] {
        &self.fixups
    }

    /// 文法への参照を取得します。
    #[inline(always)]
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// 新しいワーカーを作成します。
    ///
    /// 各ワーカーは独立した探索用バッファを保持するため、複数のワーカーを
    /// 並列に使用して同時に複数の名称を解析できます。
    pub fn new_worker(&self) -> Worker {
        Worker::new(self.clone())
    }

    /// 1つのトークン列を終端記号の位置で意味上の語に分割します。
    ///
    /// # 引数
    ///
    /// * `parse_tokens` - 分割するトークン列
    /// * `source` - トークン列が消費した元のテキスト
    ///
    /// # エラー
    ///
    /// トークン列の消費長が`source`の長さと一致しない場合にエラーを返します。
    pub fn split_into_words(
        &self,
        parse_tokens: &ParseTokens,
        source: &str,
    ) -> Result<Vec<ParseWord>> {
        segmentation::split_alternatives(
            self.grammar.terminators(),
            std::slice::from_ref(parse_tokens),
            source,
        )
    }

    /// 同じテキストに対する複数のトークン列を意味上の語に分割します。
    ///
    /// 語の区切り方が異なる場合は、語数が最も少なく、次いで官能項が最も長い
    /// 区切り方を採用し、それと同じ区切り方の候補だけを語ごとにまとめます。
    ///
    /// # エラー
    ///
    /// 候補が空の場合、または消費長が`source`の長さと一致しない場合にエラーを返します。
    pub fn split_alternatives_into_words(
        &self,
        alternatives: &[ParseTokens],
        source: &str,
    ) -> Result<Vec<ParseWord>> {
        segmentation::split_alternatives(self.grammar.terminators(), alternatives, source)
    }

    /// 語ごとの読みの候補の直積を展開し、名称全体の読みを列挙します。
    ///
    /// 最後の語の候補が最も速く変化する順序で返します。
    ///
    /// # エラー
    ///
    /// 組み合わせ数が上限を超えた場合は、何も列挙せずにエラーを返します。
    pub fn expand_to_parses(&self, words: &[ParseWord]) -> Result<Vec<Parse>> {
        combination::expand(self.grammar.terminators(), words)
    }
}
