//! 解析できなかった名称の診断
//!
//! 左から右への解析がどこまで進んだかと、右から左への解析がどこまで
//! 戻れたかを組み合わせ、解釈できない部分をできるだけ狭く特定します。
use std::fmt;

use crate::errors::Result;
use crate::tokenizer::worker::Worker;

/// 解析できなかった名称の診断結果
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnosis {
    name: String,
    interpretable_prefix: String,
    uninterpretable: String,
    unparseable: String,
}

impl Diagnosis {
    /// 診断した名称（前後の空白を除いたもの）
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 左から右へ解析できた部分
    #[inline(always)]
    pub fn interpretable_prefix(&self) -> &str {
        &self.interpretable_prefix
    }

    /// 解釈できない部分
    #[inline(always)]
    pub fn uninterpretable(&self) -> &str {
        &self.uninterpretable
    }

    /// 左から右への解析が到達できなかった残り全体
    #[inline(always)]
    pub fn unparseable(&self) -> &str {
        &self.unparseable
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} is unparsable due to the following being uninterpretable: {:?}",
            self.name, self.uninterpretable
        )?;
        if self.unparseable != self.uninterpretable {
            write!(f, "; the following was not reached: {:?}", self.unparseable)?;
        }
        Ok(())
    }
}

impl Worker {
    /// 名称を診断します。
    ///
    /// 名称全体が解析できる場合は`None`を返します。空白の除去は試しません。
    ///
    /// # エラー
    ///
    /// 曖昧性が上限を超えた場合、または文法の不正を検出した場合にエラーを返します。
    pub fn diagnose(&mut self, name: &str) -> Result<Option<Diagnosis>> {
        let forward = self.tokenize_name(name, false)?;
        if forward.is_successfully_tokenized() {
            return Ok(None);
        }
        let name = name.trim();
        let reverse = self.tokenize_name_reverse(name, false)?;

        // Failures are recorded before any fixup runs, so both reaches are
        // offsets into the trimmed name.
        let forward_reach = name.len().saturating_sub(forward.unparseable().len());
        let reverse_reach = reverse.unparseable().len();
        let span = if !reverse.is_successfully_tokenized() && forward_reach < reverse_reach {
            name.get(forward_reach..reverse_reach)
        } else {
            None
        };
        let uninterpretable = span.unwrap_or(forward.uninterpretable()).to_string();
        let interpretable_prefix = name
            .get(..forward_reach)
            .unwrap_or_default()
            .to_string();
        log::debug!("{name:?} fails at {uninterpretable:?}");

        Ok(Some(Diagnosis {
            name: name.to_string(),
            interpretable_prefix,
            uninterpretable,
            unparseable: forward.unparseable().to_string(),
        }))
    }
}
