//! 字句解析のためのルーチンを提供するモジュール
//!
//! ワーカーは探索用のバッファを保持し、再利用することで不要なメモリアロケーションを避けます。
use crate::errors::Result;
use crate::grammar::Direction;
use crate::token::ParseRulesResults;
use crate::tokenizer::annotator::Annotator;
use crate::tokenizer::Tokenizer;

/// 字句解析のためのルーチンを提供する構造体
///
/// 探索に使用される内部データ構造を保持し、それらを再利用することで
/// 不要なメモリ再割り当てを回避します。1つのワーカーを複数のスレッドから
/// 同時に使うことはできません。スレッドごとに[`Tokenizer::new_worker`]で作成してください。
pub struct Worker {
    pub(crate) tokenizer: Tokenizer,
    pub(crate) annotator: Annotator,
}

impl Worker {
    /// 新しいインスタンスを作成します。
    pub(crate) fn new(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer,
            annotator: Annotator::default(),
        }
    }

    /// ワーカーが使用するトークナイザー
    #[inline(always)]
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// 一語を左から右へ探索し、最長一致で受理される全てのトークン列を返します。
    ///
    /// 入力の先頭から、できるだけ長い部分を受理します。受理されたトークン列は
    /// 全て同じ長さを消費しています。何も受理されなかった場合、
    /// [`ParseRulesResults::parse_tokens_list`]は空になり、
    /// `uninterpretable`は入力全体になります。
    ///
    /// # 引数
    ///
    /// * `word` - 探索する語。空白を含んでいても構いません。
    ///
    /// # エラー
    ///
    /// 同点の候補が上限を超えた場合、または文法の不正を検出した場合にエラーを返します。
    pub fn parse_word(&mut self, word: &str) -> Result<ParseRulesResults> {
        self.annotator
            .search(self.tokenizer.grammar(), word, Direction::Forward)
    }

    /// 一語を右から左へ探索します。
    ///
    /// 入力の末尾から、できるだけ長い部分を受理します。トークン列は左から右の順で返され、
    /// `uninterpretable`と`unparseable`は入力の先頭側の残りになります。
    pub fn parse_word_reverse(&mut self, word: &str) -> Result<ParseRulesResults> {
        self.annotator
            .search(self.tokenizer.grammar(), word, Direction::Reverse)
    }
}
