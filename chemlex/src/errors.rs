//! エラー型の定義
//!
//! このモジュールは、chemlexで使用されるすべてのエラー型を定義します。
//!
//! 文法に合致しない名称（字句的な失敗）はエラーではなく、
//! [`ParseRulesResults`](crate::token::ParseRulesResults) や
//! [`TokenizationResult`](crate::tokenizer::TokenizationResult) のデータとして表現されます。
//! ここで定義されるのは、曖昧性の上限超過と内部不変条件の違反、
//! そして呼び出し側の誤用や文法記述の不正のみです。

use std::error::Error;
use std::fmt::{self, Debug};

/// chemlex専用のResult型
///
/// エラー型としてデフォルトで[`ChemlexError`]を使用します。
pub type Result<T, E = ChemlexError> = std::result::Result<T, E>;

/// chemlexのエラー型
#[derive(Debug, thiserror::Error)]
pub enum ChemlexError {
    /// 曖昧性の上限超過エラー
    ///
    /// [`AmbiguityError`]のエラーバリアント。
    #[error(transparent)]
    Ambiguity(AmbiguityError),

    /// 無効な引数エラー
    ///
    /// [`InvalidArgumentError`]のエラーバリアント。
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// 無効なフォーマットエラー
    ///
    /// [`InvalidFormatError`]のエラーバリアント。
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// 無効な状態エラー
    ///
    /// 文法作成者またはプログラムのバグを示します。
    #[error(transparent)]
    InvalidState(InvalidStateError),

    /// 整数パースエラー
    #[error(transparent)]
    ParseInt(#[from] std::num::ParseIntError),

    /// UTF-8エンコーディングエラー
    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),

    /// 標準I/Oエラー
    #[error(transparent)]
    StdIo(#[from] std::io::Error),

    /// 正規表現のコンパイルエラー
    #[error(transparent)]
    Regex(#[from] regex::Error),

    /// トークンオートマトンの構築エラー
    #[error(transparent)]
    AutomatonBuild(#[from] regex_automata::dfa::dense::BuildError),

    /// トークンオートマトンの探索エラー
    #[error(transparent)]
    AutomatonMatch(#[from] regex_automata::MatchError),
}

impl ChemlexError {
    /// 同点の最長一致候補が上限を超えた場合のエラーを生成します
    ///
    /// # 引数
    ///
    /// * `word` - 探索中の語
    /// * `count` - 検出された候補数
    pub(crate) fn too_many_tied_parses<S>(word: S, count: usize) -> Self
    where
        S: Into<String>,
    {
        Self::Ambiguity(AmbiguityError {
            kind: AmbiguityKind::TiedParses,
            subject: word.into(),
            count,
        })
    }

    /// 語ごとの候補の組み合わせ数が上限を超えた場合のエラーを生成します
    ///
    /// # 引数
    ///
    /// * `word` - 上限を超えた時点で処理していた語
    /// * `count` - その時点での組み合わせ数
    pub(crate) fn too_many_combinations<S>(word: S, count: usize) -> Self
    where
        S: Into<String>,
    {
        Self::Ambiguity(AmbiguityError {
            kind: AmbiguityKind::Combinations,
            subject: word.into(),
            count,
        })
    }

    /// 無効な引数エラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - 引数の名前
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    /// 無効なフォーマットエラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - フォーマット名
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }

    /// 無効な状態エラーを生成します
    ///
    /// # 引数
    ///
    /// * `msg` - エラーメッセージ
    /// * `cause` - エラーの原因
    pub(crate) fn invalid_state<S, M>(msg: S, cause: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self::InvalidState(InvalidStateError {
            msg: msg.into(),
            cause: cause.into(),
        })
    }

    /// 曖昧性の上限超過エラーかどうかを返します。
    pub fn is_ambiguity(&self) -> bool {
        matches!(self, Self::Ambiguity(_))
    }
}

/// 上限を超えた曖昧性の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbiguityKind {
    /// 一語の探索で、同じ残り長を持つ受理状態が多すぎる
    TiedParses,
    /// 語ごとの候補の直積が大きすぎる
    Combinations,
}

/// 曖昧性が上限を超えた場合に使用されるエラー
///
/// 候補を切り捨てると正しい読みが黙って失われるため、
/// このエラーは常に呼び出し側へ伝播されます。
#[derive(Debug)]
pub struct AmbiguityError {
    pub(crate) kind: AmbiguityKind,
    pub(crate) subject: String,
    pub(crate) count: usize,
}

impl AmbiguityError {
    /// 上限を超えた曖昧性の種類
    pub fn kind(&self) -> AmbiguityKind {
        self.kind
    }

    /// 上限を超えたときの候補数
    pub fn count(&self) -> usize {
        self.count
    }
}

impl fmt::Display for AmbiguityError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            AmbiguityKind::TiedParses => write!(
                f,
                "AmbiguityError: {} equally long readings of {:?}; the grammar is too ambiguous",
                self.count, self.subject
            ),
            AmbiguityKind::Combinations => write!(
                f,
                "AmbiguityError: {} or more combinations of word readings at {:?}",
                self.count, self.subject
            ),
        }
    }
}

impl Error for AmbiguityError {}

/// 引数が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// 引数の名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// 入力フォーマットが無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidFormatError {
    /// フォーマットの名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidFormatError {}

/// 状態が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidStateError {
    /// エラーメッセージ
    pub(crate) msg: String,

    /// エラーの根本原因
    pub(crate) cause: String,
}

impl fmt::Display for InvalidStateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidStateError: {}: {}", self.msg, self.cause)
    }
}

impl Error for InvalidStateError {}
