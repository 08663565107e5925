use crate::errors::ChemlexError;
use crate::test_utils::*;
use crate::token::ParseWord;
use crate::tokenizer::{Fixup, Tokenizer};

fn texts(words: &[ParseWord]) -> Vec<&str> {
    words.iter().map(ParseWord::text).collect()
}

#[test]
fn test_space_separated_words() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let result = worker.tokenize_name("ethyl alcohol", false).unwrap();
    assert!(result.is_successfully_tokenized());
    assert_eq!(texts(result.words()), vec!["ethyl", "alcohol"]);
    assert_eq!(result.unparsed(), "");
    assert_eq!(result.uninterpretable(), "");
    assert_eq!(result.unparseable(), "");
    assert!(result.component_breaks().is_empty());
}

#[test]
fn test_surrounding_whitespace() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let result = worker.tokenize_name("  2-methylpropane \n", false).unwrap();
    assert!(result.is_successfully_tokenized());
    assert_eq!(texts(result.words()), vec!["2-methylpropane"]);
    assert_eq!(result.name(), "  2-methylpropane \n");
}

#[test]
fn test_hyphen_separated_words() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let result = worker.tokenize_name("ethyl-ether", false).unwrap();
    assert!(result.is_successfully_tokenized());
    assert_eq!(texts(result.words()), vec!["ethyl", "ether"]);
}

#[test]
fn test_empty_name() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let result = worker.tokenize_name("   ", false).unwrap();
    assert!(result.is_successfully_tokenized());
    assert!(result.words().is_empty());
}

#[test]
fn test_implicit_space() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let result = worker.tokenize_name("ethyloxime", false).unwrap();
    assert!(result.is_successfully_tokenized());
    assert_eq!(texts(result.words()), vec!["ethyl", "oxime"]);
}

#[test]
fn test_failure_without_fixups() {
    let tokenizer = toy_tokenizer().fixup_order(vec![]);
    let mut worker = tokenizer.new_worker();
    let result = worker.tokenize_name("ethyloxime", false).unwrap();
    assert!(!result.is_successfully_tokenized());
    assert!(result.words().is_empty());
    assert_eq!(result.unparsed(), "ethyloxime");
    assert_eq!(result.working(), "ethyloxime");
    assert_eq!(result.uninterpretable(), "oxime");
    assert_eq!(result.unparseable(), "oxime");
}

#[test]
fn test_failure_keeps_accepted_words() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let result = worker.tokenize_name("ethyl xyz", false).unwrap();
    assert!(!result.is_successfully_tokenized());
    assert_eq!(texts(result.words()), vec!["ethyl"]);
    assert_eq!(result.unparsed(), "xyz");
    assert_eq!(result.uninterpretable(), "xyz");
}

#[test]
fn test_space_removal_within_word() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();

    let result = worker.tokenize_name("pent anol", false).unwrap();
    assert!(!result.is_successfully_tokenized());
    assert_eq!(result.uninterpretable(), "pent anol");
    assert_eq!(result.unparseable(), " anol");

    let result = worker.tokenize_name("pent anol", true).unwrap();
    assert!(result.is_successfully_tokenized());
    assert_eq!(texts(result.words()), vec!["pentanol"]);
    assert_eq!(result.words()[0].parse_tokens().len(), 2);
}

#[test]
fn test_space_removal_after_accepted_word() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let result = worker.tokenize_name("ethyl ethan ol", true).unwrap();
    assert!(result.is_successfully_tokenized());
    assert_eq!(texts(result.words()), vec!["ethyl", "ethanol"]);
}

#[test]
fn test_space_removal_merges_with_previous_word() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let result = worker.tokenize_name("ethyl idene", true).unwrap();
    assert!(result.is_successfully_tokenized());
    assert_eq!(texts(result.words()), vec!["ethylidene"]);

    let result = worker.tokenize_name("ethyl idene", false).unwrap();
    assert!(!result.is_successfully_tokenized());
    assert_eq!(texts(result.words()), vec!["ethyl"]);
}

#[test]
fn test_compound_phrase() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let result = worker
        .tokenize_name("ethanol compound with methanol", false)
        .unwrap();
    assert!(result.is_successfully_tokenized());
    assert_eq!(texts(result.words()), vec!["ethanol", "methanol"]);
    assert_eq!(result.component_breaks(), &[1]);

    let result = worker
        .tokenize_name("ethyl alcohol compd. with ethanol", false)
        .unwrap();
    assert_eq!(texts(result.words()), vec!["ethyl", "alcohol", "ethanol"]);
    assert_eq!(result.component_breaks(), &[2]);
}

#[test]
fn test_dangling_compound_phrase() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    for name in ["ethyl alcohol compound with", "compound with ethanol"] {
        let forward = worker.tokenize_name(name, false).unwrap();
        let reverse = worker.tokenize_name_reverse(name, false).unwrap();
        assert!(!forward.is_successfully_tokenized(), "{name}");
        assert!(!reverse.is_successfully_tokenized(), "{name}");
        assert!(forward.component_breaks().is_empty(), "{name}");
        assert!(reverse.component_breaks().is_empty(), "{name}");
    }

    let result = worker
        .tokenize_name("ethyl alcohol compound with", false)
        .unwrap();
    assert_eq!(texts(result.words()), vec!["ethyl", "alcohol"]);
    assert_eq!(result.unparsed(), "compound with");
}

#[test]
fn test_collective_index() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let result = worker.tokenize_name("ethanol (9CI)", false).unwrap();
    assert!(result.is_successfully_tokenized());
    assert_eq!(texts(result.words()), vec!["ethanol"]);

    let result = worker.tokenize_name("ethyl [8CI, 9CI] alcohol", false).unwrap();
    assert!(result.is_successfully_tokenized());
    assert_eq!(texts(result.words()), vec!["ethyl", "alcohol"]);
}

#[test]
fn test_fixup_order_is_configurable() {
    let tokenizer = toy_tokenizer().fixup_order(vec![Fixup::CompoundPhrase]);
    let mut worker = tokenizer.new_worker();
    let result = worker.tokenize_name("ethanol (9CI)", false).unwrap();
    assert!(!result.is_successfully_tokenized());
    assert_eq!(result.unparsed(), "(9CI)");

    let result = worker.tokenize_name("pent anol", true).unwrap();
    assert!(!result.is_successfully_tokenized());
}

#[test]
fn test_reverse_tokenization() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    for name in [
        "ethyl alcohol",
        "2-methylpropane",
        "ethyloxime",
        "ethanol compound with methanol",
        "ethanol (9CI)",
    ] {
        let forward = worker.tokenize_name(name, false).unwrap();
        let reverse = worker.tokenize_name_reverse(name, false).unwrap();
        assert!(reverse.is_successfully_tokenized(), "{name}");
        assert_eq!(forward.words(), reverse.words(), "{name}");
        assert_eq!(forward.component_breaks(), reverse.component_breaks(), "{name}");
    }
}

#[test]
fn test_reverse_failure() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let result = worker.tokenize_name_reverse("xyz alcohol", false).unwrap();
    assert!(!result.is_successfully_tokenized());
    assert_eq!(texts(result.words()), vec!["alcohol"]);
    assert_eq!(result.unparsed(), "xyz");
}

#[test]
fn test_reverse_space_removal() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let result = worker.tokenize_name_reverse("pent anol", true).unwrap();
    assert!(result.is_successfully_tokenized());
    assert_eq!(texts(result.words()), vec!["pentanol"]);
}

#[test]
fn test_diagnose() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    assert!(worker.diagnose("ethyl alcohol").unwrap().is_none());

    let diagnosis = worker.diagnose("2-methylxyzpropane").unwrap().unwrap();
    assert_eq!(diagnosis.name(), "2-methylxyzpropane");
    assert_eq!(diagnosis.interpretable_prefix(), "2-methyl");
    assert_eq!(diagnosis.uninterpretable(), "xyz");
    assert_eq!(diagnosis.unparseable(), "xyzpropane");
    assert!(diagnosis.to_string().contains("\"xyz\""));
}

#[test]
fn test_diagnose_at_a_junction() {
    // Each side reads up to the junction, so the forward view is reported.
    let tokenizer = toy_tokenizer().fixup_order(vec![]);
    let mut worker = tokenizer.new_worker();
    let diagnosis = worker.diagnose("ethyloxime").unwrap().unwrap();
    assert_eq!(diagnosis.interpretable_prefix(), "ethyl");
    assert_eq!(diagnosis.uninterpretable(), "oxime");
}

#[test]
fn test_ambiguity_is_propagated() {
    let tokenizer = Tokenizer::new(tied_grammar());
    let mut worker = tokenizer.new_worker();
    let err = worker.tokenize_name("qqqqqqqq", false).unwrap_err();
    assert!(err.is_ambiguity());
    assert!(matches!(err, ChemlexError::Ambiguity(_)));
}
