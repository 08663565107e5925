//! chemlexのテストモジュール群
//!
//! 一語の探索、名称全体の解析、語への分割と読みの展開、
//! 文法ファイルの読み込みを検証するテストを含みます。

mod annotator;
mod name;
mod pipeline;
