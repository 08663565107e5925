//! 共通の定数定義

/// 一語の探索で保持する、同じ残り長を持つ受理状態の上限。
///
/// これを超えると文法が曖昧すぎるとみなし、探索を中断します。
pub const MAX_TIED_PARSES: usize = 128;

/// 語ごとの候補を掛け合わせた組み合わせ数の上限。
pub const MAX_PARSE_COMBINATIONS: usize = 128;

/// 受理された接頭辞の直後に許される語境界の文字。
pub const WORD_BOUNDARIES: [char; 2] = [' ', '-'];

/// 文字が語境界かどうかを判定します。
#[inline(always)]
pub fn is_word_boundary(c: char) -> bool {
    WORD_BOUNDARIES.contains(&c)
}
