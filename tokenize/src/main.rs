//! 化学物質名の字句解析を実行するユーティリティ
//!
//! このバイナリは、標準入力から1行に1つずつ読み込んだ名称を字句解析し、
//! 指定された出力形式（tokens、words、detail）で結果を出力します。

use std::error::Error;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use chemlex::{Fixup, GrammarBuilder, TokenizationResult, Tokenizer, Worker};

use clap::Parser;

/// 出力モード
#[derive(Clone, Debug)]
enum OutputMode {
    Tokens,
    Words,
    Detail,
}

impl FromStr for OutputMode {
    type Err = &'static str;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "tokens" => Ok(Self::Tokens),
            "words" => Ok(Self::Words),
            "detail" => Ok(Self::Detail),
            _ => Err("Could not parse a mode"),
        }
    }
}

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "tokenize", about = "Splits chemical names into words and tokens")]
struct Args {
    /// Grammar directory containing automaton.def, lexicon.csv and optionally reverse.def.
    #[clap(short = 'g', long)]
    grammar: PathBuf,

    /// Output mode. Choices are tokens, words, and detail.
    #[clap(short = 'O', long, default_value = "tokens")]
    output_mode: OutputMode,

    /// Tries removing spaces that were inserted by mistake.
    #[clap(short = 'S', long)]
    allow_space_repair: bool,

    /// Reads names from right to left.
    #[clap(short = 'r', long)]
    reverse: bool,

    /// Comma-separated fixups to try in order, e.g. implicit-space,space-removal.
    #[clap(short = 'F', long, value_delimiter = ',')]
    fixups: Option<Vec<Fixup>>,
}

fn tokenize_line(
    worker: &mut Worker,
    args: &Args,
    line: &str,
) -> chemlex::errors::Result<TokenizationResult> {
    if args.reverse {
        worker.tokenize_name_reverse(line, args.allow_space_repair)
    } else {
        worker.tokenize_name(line, args.allow_space_repair)
    }
}

/// メイン関数
///
/// 文法を読み込み、標準入力から読み込んだ名称を字句解析して、
/// 指定された形式で結果を標準出力に出力します。
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    eprintln!("Loading the grammar...");
    let grammar = GrammarBuilder::from_dir(&args.grammar)?.build()?;

    let mut tokenizer = Tokenizer::new(grammar);
    if let Some(fixups) = args.fixups.clone() {
        tokenizer = tokenizer.fixup_order(fixups);
    }
    let mut worker = tokenizer.new_worker();

    eprintln!("Ready to tokenize");

    let is_tty = atty::is(atty::Stream::Stdout);

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    let lines = std::io::stdin().lock().lines();
    for line in lines {
        let line = line?;
        let result = match tokenize_line(&mut worker, &args, &line) {
            Ok(result) => result,
            Err(e) if e.is_ambiguity() => {
                writeln!(&mut out, "AMBIGUOUS\t{e}")?;
                out.write_all(b"EOS\n")?;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if !result.is_successfully_tokenized() {
            match worker.diagnose(&line)? {
                Some(diagnosis) => writeln!(&mut out, "FAILED\t{diagnosis}")?,
                None => writeln!(&mut out, "FAILED\t{:?}", result.unparsed())?,
            }
        }

        match args.output_mode {
            OutputMode::Tokens => {
                for word in result.words() {
                    for parse_tokens in word.parse_tokens() {
                        writeln!(&mut out, "{}\t{}", word.text(), parse_tokens)?;
                    }
                }
            }
            OutputMode::Words => {
                let words: Vec<_> = result.words().iter().map(|w| w.text()).collect();
                writeln!(&mut out, "{}", words.join(" | "))?;
            }
            OutputMode::Detail => {
                writeln!(
                    &mut out,
                    "name={:?}\twords={}\tcomponent_breaks={:?}",
                    result.name(),
                    result.words().len(),
                    result.component_breaks(),
                )?;
                match tokenizer.expand_to_parses(result.words()) {
                    Ok(parses) => {
                        for (i, parse) in parses.iter().enumerate() {
                            writeln!(&mut out, "parse={i}\t{parse}")?;
                        }
                    }
                    Err(e) if e.is_ambiguity() => writeln!(&mut out, "AMBIGUOUS\t{e}")?,
                    Err(e) => return Err(e.into()),
                }
            }
        }
        out.write_all(b"EOS\n")?;
        if is_tty {
            out.flush()?;
        }
    }

    Ok(())
}
