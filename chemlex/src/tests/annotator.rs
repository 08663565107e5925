use crate::errors::{AmbiguityKind, ChemlexError};
use crate::test_utils::*;
use crate::tokenizer::Tokenizer;

#[test]
fn test_single_reading() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let results = worker.parse_word("2-methylpropane").unwrap();
    assert_eq!(
        sorted_annotations(&results.parse_tokens_list),
        vec![vec!["2-/l", "methyl/s", "propan/c", "e/m"]]
    );
    assert_eq!(results.uninterpretable, "");
    assert_eq!(results.unparseable, "");
}

#[test]
fn test_shorter_acceptances_are_dropped() {
    // "2-methyl" alone is an accepted substituent word.
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let results = worker.parse_word("2-methylpropane").unwrap();
    assert!(results
        .parse_tokens_list
        .iter()
        .all(|p| p.consumed_len() == "2-methylpropane".len()));
}

#[test]
fn test_partial_acceptance() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let results = worker.parse_word("ethyloxime").unwrap();
    assert_eq!(
        sorted_annotations(&results.parse_tokens_list),
        vec![vec!["ethyl/e"]]
    );
    assert_eq!(results.uninterpretable, "oxime");
    assert_eq!(results.unparseable, "oxime");
}

#[test]
fn test_no_acceptance() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let results = worker.parse_word("eth").unwrap();
    assert!(results.parse_tokens_list.is_empty());
    assert_eq!(results.uninterpretable, "eth");
    assert_eq!(results.unparseable, "eth");
}

#[test]
fn test_unparseable_is_not_longer_than_uninterpretable() {
    // The chain "pent" is reached but never accepted.
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let results = worker.parse_word("ethylpentyne").unwrap();
    assert_eq!(
        sorted_annotations(&results.parse_tokens_list),
        vec![vec!["ethyl/e"]]
    );
    assert_eq!(results.uninterpretable, "pentyne");
    assert_eq!(results.unparseable, "yne");
}

#[test]
fn test_empty_word() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let results = worker.parse_word("").unwrap();
    assert!(results.parse_tokens_list.is_empty());
    assert_eq!(results.uninterpretable, "");
    assert_eq!(results.unparseable, "");
}

#[test]
fn test_lexical_ambiguity() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let results = worker.parse_word("pentanol").unwrap();
    assert_eq!(
        sorted_annotations(&results.parse_tokens_list),
        vec![vec!["pent/c", "anol/m"], vec!["pentan/c", "ol/m"]]
    );
}

#[test]
fn test_tie_order_follows_search_order() {
    // Longer matches of a symbol are pushed later and popped first.
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let results = worker.parse_word("pentanol").unwrap();
    let readings: Vec<_> = results.parse_tokens_list.iter().map(annotated).collect();
    assert_eq!(
        readings,
        vec![vec!["pentan/c", "ol/m"], vec!["pent/c", "anol/m"]]
    );

    let results = worker.parse_word_reverse("pentanol").unwrap();
    let readings: Vec<_> = results.parse_tokens_list.iter().map(annotated).collect();
    assert_eq!(
        readings,
        vec![vec!["pent/c", "anol/m"], vec!["pentan/c", "ol/m"]]
    );
}

#[test]
fn test_case_insensitive_tokens() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let results = worker.parse_word("2-METHYLPropane").unwrap();
    assert_eq!(
        sorted_annotations(&results.parse_tokens_list),
        vec![vec!["2-/l", "methyl/s", "propan/c", "e/m"]]
    );
}

#[test]
fn test_automaton_and_pattern_matchers() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let results = worker.parse_word("1,1,1-Trichloroethane").unwrap();
    assert_eq!(
        sorted_annotations(&results.parse_tokens_list),
        vec![vec!["1,1,1-/l", "Tri/p", "chloro/s", "ethan/c", "e/m"]]
    );
}

#[test]
fn test_tied_readings_at_the_cap() {
    let tokenizer = Tokenizer::new(tied_grammar());
    let mut worker = tokenizer.new_worker();
    let results = worker.parse_word("qqqqqqq").unwrap();
    assert_eq!(results.parse_tokens_list.len(), 128);
    assert_eq!(results.uninterpretable, "");
}

#[test]
fn test_too_many_tied_readings() {
    let tokenizer = Tokenizer::new(tied_grammar());
    let mut worker = tokenizer.new_worker();
    match worker.parse_word("qqqqqqqq") {
        Err(ChemlexError::Ambiguity(e)) => {
            assert_eq!(e.kind(), AmbiguityKind::TiedParses);
            assert_eq!(e.count(), 129);
        }
        _ => panic!("expected an ambiguity error"),
    }
    // The worker stays usable.
    assert_eq!(worker.parse_word("qq").unwrap().parse_tokens_list.len(), 4);
}

#[test]
fn test_reverse_matches_forward() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    for word in [
        "2-methylpropane",
        "pentanol",
        "1,1,1-trichloroethane",
        "ethyl",
        "oxime",
        "2-chloro-3-bromobutane",
    ] {
        let forward = worker.parse_word(word).unwrap();
        let reverse = worker.parse_word_reverse(word).unwrap();
        assert_eq!(forward.consumed_len(), word.len(), "{word}");
        assert_eq!(
            sorted_annotations(&forward.parse_tokens_list),
            sorted_annotations(&reverse.parse_tokens_list),
            "{word}"
        );
    }
}

#[test]
fn test_reverse_partial_acceptance() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let results = worker.parse_word_reverse("ethyloxime").unwrap();
    assert_eq!(
        sorted_annotations(&results.parse_tokens_list),
        vec![vec!["oxime/f"]]
    );
    assert_eq!(results.uninterpretable, "ethyl");
    assert_eq!(results.unparseable, "ethyl");
}

#[test]
fn test_worker_reuse() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let first = worker.parse_word("pentanol").unwrap();
    worker.parse_word("2-methylpropane").unwrap();
    let second = worker.parse_word("pentanol").unwrap();
    assert_eq!(first, second);
}
