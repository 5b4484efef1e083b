use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use chatterbox::analysis::Normalizer;
use chatterbox::config::ResponderConfig;
use chatterbox::corpus::Corpus;
use chatterbox::error::Result;
use chatterbox::ml::VectorizerConfig;
use chatterbox::responder::Responder;

fn sample_corpus() -> Result<Corpus> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/chatbot_dataset.csv");
    Corpus::from_csv_path(&path)
}

fn greetings() -> Corpus {
    Corpus::from_pairs([
        ("hi", "hello there"),
        ("hi there", "hello there"),
        ("bye", "goodbye"),
        ("see you", "goodbye"),
    ])
}

#[test]
fn greeting_scenario() -> Result<()> {
    let responder = Responder::train(&greetings(), &ResponderConfig::default())?;

    assert_eq!(responder.respond("Hi!")?, "hello there");
    assert_eq!(responder.respond("BYE")?, "goodbye");
    assert_eq!(responder.get_response("Hi!"), "hello there");
    assert_eq!(responder.get_response("BYE"), "goodbye");

    Ok(())
}

#[test]
fn normalization_is_case_insensitive_and_idempotent() -> Result<()> {
    let normalizer = Normalizer::new(None)?;
    assert_eq!(
        normalizer.normalize("Hello WORLD"),
        normalizer.normalize("hello world")
    );

    for entry in sample_corpus()?.entries() {
        let once = normalizer.normalize(&entry.question);
        assert_eq!(normalizer.normalize(&once), once);
        assert_eq!(once.trim(), once);
        assert!(!once.contains("  "));
    }

    Ok(())
}

#[test]
fn sample_corpus_answers() -> Result<()> {
    let responder = Responder::train(&sample_corpus()?, &ResponderConfig::default())?;

    assert_eq!(responder.respond("Hello!")?, "hello there");
    assert_eq!(responder.respond("See you later!")?, "goodbye");
    assert_eq!(
        responder.respond("How are you?")?,
        "I'm doing well, thanks for asking"
    );
    assert_eq!(responder.respond("What is your name?")?, "I'm Chatterbox");
    assert_eq!(responder.respond("Thanks!!")?, "you're welcome");

    Ok(())
}

#[test]
fn every_question_maps_to_a_known_answer() -> Result<()> {
    let corpus = sample_corpus()?;
    let responder = Responder::train(&corpus, &ResponderConfig::default())?;
    let labels = corpus.labels();

    for entry in corpus.entries() {
        let answer = responder.respond(&entry.question)?;
        assert!(labels.contains(&answer), "{:?} -> {answer:?}", entry.question);
    }

    Ok(())
}

#[test]
fn training_is_deterministic() -> Result<()> {
    let corpus = sample_corpus()?;
    let config = ResponderConfig::default();
    let first = Responder::train(&corpus, &config)?;
    let second = Responder::train(&corpus, &config)?;

    let questions = [
        "hello",
        "how's the weather",
        "tell me something funny",
        "I don't know",
        "",
        "???",
    ];
    for question in questions {
        assert_eq!(first.respond(question)?, second.respond(question)?, "{question:?}");
    }

    Ok(())
}

#[test]
fn unknown_and_empty_input_get_a_stable_known_answer() -> Result<()> {
    let responder = Responder::train(&sample_corpus()?, &ResponderConfig::default())?;

    let unknown = responder.respond("zzqxw flibberjabber")?;
    assert!(responder.knows(unknown));

    let empty = responder.respond("")?.to_string();
    assert!(responder.knows(&empty));
    for _ in 0..5 {
        assert_eq!(responder.respond("")?, empty);
    }
    // Two answers share the highest prior; the first in sorted order wins.
    assert_eq!(empty, "goodbye");

    Ok(())
}

#[test]
fn unusual_input_never_fails() -> Result<()> {
    let responder = Responder::train(&sample_corpus()?, &ResponderConfig::default())?;

    for input in ["", "   ", "!!!", "¿Qué tal?", "こんにちは", "\u{0}\u{7f}", "👋"] {
        let answer = responder.get_response(input);
        assert!(responder.knows(&answer), "{input:?} -> {answer:?}");
    }

    Ok(())
}

#[test]
fn concurrent_callers_see_the_same_answers() -> Result<()> {
    let responder = Arc::new(Responder::train(
        &sample_corpus()?,
        &ResponderConfig::default(),
    )?);
    let questions = ["hi", "thanks a lot", "tell me a joke", "what time is it?"];
    let expected: Vec<String> = questions
        .iter()
        .map(|q| responder.get_response(q))
        .collect();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let responder = Arc::clone(&responder);
            thread::spawn(move || {
                questions
                    .iter()
                    .map(|q| responder.get_response(q))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }

    Ok(())
}

#[test]
fn unigram_only_configuration() -> Result<()> {
    let config = ResponderConfig {
        vectorizer: VectorizerConfig {
            ngram_range: (1, 1),
            ..VectorizerConfig::default()
        },
        ..ResponderConfig::default()
    };
    let responder = Responder::train(&greetings(), &config)?;

    // hi, there, bye, see, you
    assert_eq!(responder.vocabulary_size(), 5);
    assert_eq!(responder.respond("hi")?, "hello there");

    Ok(())
}
