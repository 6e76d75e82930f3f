//! Compatibility table enforcement at registration and construction

mod common;

use common::{full_context, StubDictionary, StubParser, StubSplitter, StubTagger};
use morphlink_engine::{
    Context, Dictionary, EngineError, Family, Operation, Parser, SentenceSplitter, Tagger,
};

fn construct(context: &Context, family: Family, operation: Operation) -> Result<(), EngineError> {
    match operation {
        Operation::Tagging => Tagger::new(context, family).map(drop),
        Operation::Parsing => Parser::new(context, family).map(drop),
        Operation::SentenceSplitting => SentenceSplitter::new(context, family).map(drop),
        Operation::Dictionary => Dictionary::new(context, family).map(drop),
    }
}

#[test]
fn test_unsupported_pairs_fail_without_backend_calls() {
    common::init_logging();
    let tagger = StubTagger::new();
    let parser = StubParser::new();
    let splitter = StubSplitter::new();
    let dictionary = StubDictionary::new();
    let context = full_context(&tagger, &parser, &splitter, &dictionary);

    let mut rejected = 0;
    for operation in Operation::ALL {
        for family in Family::ALL {
            let outcome = construct(&context, family, operation);
            if family.supports(operation) {
                assert!(outcome.is_ok(), "{operation} on {family} should be allowed");
                continue;
            }
            rejected += 1;
            match outcome {
                Err(EngineError::Compatibility(err)) => {
                    assert_eq!(err.operation, operation);
                    assert_eq!(err.family, family);
                    let message = err.to_string();
                    assert!(message.contains(&operation.to_string()));
                    assert!(message.contains(family.name()));
                }
                other => panic!("expected compatibility error for {operation} on {family}, got {other:?}"),
            }
        }
    }

    // 5 non-parsers, 5 non-splitters, 1 dictionary-less family
    assert_eq!(rejected, 11);
    assert_eq!(tagger.calls(), 0);
    assert_eq!(parser.calls(), 0);
    assert_eq!(splitter.calls(), 0);
    assert_eq!(dictionary.calls(), 0);
}

#[test]
fn test_parser_with_unsupported_family_checks_before_tagger() {
    let tagger = StubTagger::new();
    let parser = StubParser::new();
    let context = Context::builder()
        .register_tagger(Family::Komoran, tagger.clone())
        .unwrap()
        .register_parser(Family::Kkma, parser.clone())
        .unwrap()
        .build();

    let err = Parser::with_tagger(&context, Family::Eunjeon, Family::Komoran).unwrap_err();
    assert!(matches!(err, EngineError::Compatibility(_)));

    let parser_front = Parser::with_tagger(&context, Family::Kkma, Family::Komoran).unwrap();
    assert_eq!(parser_front.family(), Family::Kkma);
    assert_eq!(parser_front.tagger_family(), Some(Family::Komoran));
    assert_eq!(tagger.calls() + parser.calls(), 0);
}

#[test]
fn test_registration_rejects_ineligible_families() {
    let err = Context::builder()
        .register_parser(Family::Twitter, StubParser::new())
        .unwrap_err();
    assert!(matches!(err, EngineError::Compatibility(e) if e.family == Family::Twitter));

    let err = Context::builder()
        .register_splitter(Family::Kkma, StubSplitter::new())
        .unwrap_err();
    assert!(matches!(err, EngineError::Compatibility(e) if e.operation == Operation::SentenceSplitting));

    let err = Context::builder()
        .register_dictionary(Family::Rhino, StubDictionary::new())
        .unwrap_err();
    assert!(matches!(err, EngineError::Compatibility(_)));
}

#[test]
fn test_supported_but_unregistered() {
    let context = Context::builder()
        .register_tagger(Family::Hannanum, StubTagger::new())
        .unwrap()
        .build();

    assert_eq!(context.registered(Operation::Tagging), vec![Family::Hannanum]);
    assert!(context.registered(Operation::Parsing).is_empty());

    let err = Tagger::new(&context, Family::Komoran).unwrap_err();
    assert_eq!(
        err,
        EngineError::Unregistered {
            family: Family::Komoran,
            operation: Operation::Tagging,
        }
    );

    let err = Parser::new(&context, Family::Hannanum).unwrap_err();
    assert!(matches!(err, EngineError::Unregistered { operation: Operation::Parsing, .. }));

    let err = Parser::with_tagger(&context, Family::Kkma, Family::Hannanum).unwrap_err();
    assert!(matches!(err, EngineError::Unregistered { family: Family::Kkma, .. }));
}
