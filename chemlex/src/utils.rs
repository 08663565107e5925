//! ユーティリティ関数を提供するモジュール
//!
//! - 生テキストとバイト位置が揃った小文字化
//! - CSV行の解析
//! - テスト用のマクロ

use csv_core::ReadFieldResult;

use crate::errors::{ChemlexError, Result};

/// バイト位置を保ったまま文字列を小文字化します。
///
/// 小文字化によってUTF-8のバイト幅が変わる文字（および複数文字に
/// 展開される文字）は変換せずにそのまま残します。これにより、
/// 小文字化したテキスト上で見つけた範囲を元のテキストにそのまま適用できます。
///
/// # 例
///
/// ```
/// # use chemlex::utils::lowercase_aligned;
/// assert_eq!(lowercase_aligned("N-Methyl"), "n-methyl");
/// assert_eq!(lowercase_aligned("Ⅻ"), "ⅻ");
/// ```
pub fn lowercase_aligned(text: &str) -> String {
    let mut lower = String::with_capacity(text.len());
    for c in text.chars() {
        let mut it = c.to_lowercase();
        match (it.next(), it.next()) {
            (Some(l), None) if l.len_utf8() == c.len_utf8() => lower.push(l),
            _ => lower.push(c),
        }
    }
    debug_assert_eq!(lower.len(), text.len());
    lower
}

/// CSV形式の行を解析してフィールドのベクターに分割する
///
/// ダブルクォートで囲まれたフィールドや、フィールド内のカンマも正しく処理します。
///
/// # 例
///
/// ```
/// # use chemlex::utils::parse_csv_row;
/// let fields = parse_csv_row("s,token,ethyl").unwrap();
/// assert_eq!(fields, vec!["s", "token", "ethyl"]);
///
/// let fields_with_quote = parse_csv_row("l,regex,\"[0-9]+(,[0-9]+)*\"").unwrap();
/// assert_eq!(fields_with_quote, vec!["l", "regex", "[0-9]+(,[0-9]+)*"]);
/// ```
pub fn parse_csv_row(row: &str) -> Result<Vec<String>> {
    let mut fields = vec![];
    let mut rdr = csv_core::Reader::new();
    let mut bytes = row.as_bytes();
    let mut output = [0; 4096];
    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        let end = match result {
            ReadFieldResult::InputEmpty => true,
            ReadFieldResult::Field { .. } => false,
            ReadFieldResult::End => true,
            ReadFieldResult::OutputFull => {
                return Err(ChemlexError::invalid_format("csv", "Field too large"));
            }
        };
        fields.push(std::str::from_utf8(&output[..nout])?.to_string());
        if end {
            break;
        }
        bytes = &bytes[nin..];
    }
    Ok(fields)
}

#[cfg(test)]
/// 記号列を簡潔に記述するためのマクロ
///
/// ```ignore
/// let symbols = symbols!['s', 'e'];
/// ```
macro_rules! symbols {
    ( $($c:expr),* $(,)? ) => {
        vec![$( $crate::grammar::Symbol($c), )*]
    };
}

#[cfg(test)]
pub(crate) use symbols;
