use std::sync::Arc;
use std::thread;

use crate::errors::{AmbiguityKind, ChemlexError};
use crate::test_utils::*;
use crate::token::{ParseWord, WordType};
use crate::tokenizer::Tokenizer;

fn texts(words: &[ParseWord]) -> Vec<&str> {
    words.iter().map(ParseWord::text).collect()
}

#[test]
fn test_glued_words_are_split() {
    let tokenizer = Tokenizer::new(glued_grammar());
    let mut worker = tokenizer.new_worker();
    let results = worker.parse_word("Ethyloxime").unwrap();
    assert_eq!(
        sorted_annotations(&results.parse_tokens_list),
        vec![vec!["ethyl/e", "oxime/f"]]
    );

    let words = tokenizer
        .split_into_words(&results.parse_tokens_list[0], "Ethyloxime")
        .unwrap();
    assert_eq!(texts(&words), vec!["Ethyl", "oxime"]);

    let result = worker.tokenize_name("Ethyloxime", false).unwrap();
    assert_eq!(result.words(), &words[..]);

    let parses = tokenizer.expand_to_parses(result.words()).unwrap();
    assert_eq!(parses.len(), 1);
    let types: Vec<_> = parses[0].words().iter().map(|w| w.word_type()).collect();
    assert_eq!(
        types,
        vec![Some(WordType::Substituent), Some(WordType::FunctionalTerm)]
    );
}

#[test]
fn test_segmentation_is_idempotent() {
    let tokenizer = Tokenizer::new(glued_grammar());
    let mut worker = tokenizer.new_worker();
    let result = worker.tokenize_name("2-chloroethyloxime", false).unwrap();
    assert!(result.is_successfully_tokenized());
    assert_eq!(texts(result.words()), vec!["2-chloroethyl", "oxime"]);
    for word in result.words() {
        let again = tokenizer
            .split_alternatives_into_words(word.parse_tokens(), word.text())
            .unwrap();
        assert_eq!(again, vec![word.clone()]);
    }
}

#[test]
fn test_expansion_of_ambiguous_words() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();
    let result = worker
        .tokenize_name("pentanol pentanol pentanol", false)
        .unwrap();
    assert!(result.is_successfully_tokenized());
    assert!(result.words().iter().all(|w| w.parse_tokens().len() == 2));

    let parses = tokenizer.expand_to_parses(result.words()).unwrap();
    assert_eq!(parses.len(), 8);
    for parse in &parses {
        assert!(parse
            .words()
            .iter()
            .all(|w| w.parse_tokens().len() == 1 && w.word_type() == Some(WordType::Full)));
    }
    assert_eq!(
        parses[0].words()[2].parse_tokens()[0],
        result.words()[2].parse_tokens()[0]
    );
    assert_eq!(
        parses[1].words()[2].parse_tokens()[0],
        result.words()[2].parse_tokens()[1]
    );
}

#[test]
fn test_too_many_combinations() {
    let tokenizer = toy_tokenizer();
    let mut worker = tokenizer.new_worker();

    let name = vec!["pentanol"; 7].join(" ");
    let result = worker.tokenize_name(&name, false).unwrap();
    assert_eq!(tokenizer.expand_to_parses(result.words()).unwrap().len(), 128);

    let name = vec!["pentanol"; 8].join(" ");
    let result = worker.tokenize_name(&name, false).unwrap();
    match tokenizer.expand_to_parses(result.words()) {
        Err(ChemlexError::Ambiguity(e)) => assert_eq!(e.kind(), AmbiguityKind::Combinations),
        _ => panic!("expected an ambiguity error"),
    }
}

#[test]
fn test_shared_grammar_across_threads() {
    let grammar = Arc::new(toy_grammar());
    let handles: Vec<_> = ["2-methylpropane", "ethyl alcohol", "pentanol"]
        .into_iter()
        .map(|name| {
            let tokenizer = Tokenizer::from_shared_grammar(grammar.clone());
            thread::spawn(move || {
                let mut worker = tokenizer.new_worker();
                worker.tokenize_name(name, false).unwrap()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap().is_successfully_tokenized());
    }
}
