//! Integration tests against the sample models

use approx::assert_relative_eq;
use std::fs::File;
use std::path::PathBuf;
use wordvec::format::{write_binary, ElementWidth};
use wordvec::{
    load_path, Evaluator, Format, LoadOptions, Metric, Vector, VectorStore, WordVecError,
};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/text.model")
}

fn load_fixture() -> VectorStore {
    load_path(fixture(), &LoadOptions::default()).unwrap()
}

fn words(store_results: &[wordvec::Entry<'_>]) -> String {
    store_results.iter().map(|e| e.word()).collect()
}

#[test]
fn test_load_text_fixture() {
    let store = load_fixture();
    assert_eq!(store.len(), 4);
    assert_eq!(store.dimension(), Some(3));
    assert_eq!(store.find("あ").unwrap().as_slice(), &[1.5, 0.5, 0.0]);
    assert!(store.find("</s>").is_none());
    assert!(store.find("ん").is_none());
}

#[test]
fn test_neighbourhood_order() {
    let store = load_fixture();
    let results = store.neighbourhood(store.find("い").unwrap()).unwrap();
    assert_eq!(words(&results), "あうえ");
    assert!(results.windows(2).all(|w| w[0].score <= w[1].score));
}

#[test]
fn test_cosine_similars_order() {
    let store = load_fixture();
    let results = store.cosine_similars(store.find("う").unwrap()).unwrap();
    assert_eq!(words(&results), "えあい");
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_cosine_value() {
    let store = load_fixture();
    let sim = wordvec::cosine_similarity(store.find("あ").unwrap(), store.find("い").unwrap());
    assert_relative_eq!(sim, 0.9486832980505138, epsilon = 1e-12);
}

#[test]
fn test_expression_excludes_its_words() {
    let store = load_fixture();
    let query = Evaluator::new(&store).evaluate("あ + い").unwrap();
    assert_eq!(query.word(), "あ + い");
    assert!(query.derives_from("あ"));
    assert!(query.derives_from("い"));
    assert_eq!(query.as_slice(), &[2.5, 0.5, 0.0]);

    for metric in [Metric::Cosine, Metric::Euclidean] {
        let results = store.search(&query, metric, 10).unwrap();
        let found: Vec<&str> = results.iter().map(|e| e.word()).collect();
        assert_eq!(found.len(), 2);
        assert!(!found.contains(&"あ"));
        assert!(!found.contains(&"い"));
    }
}

#[test]
fn test_query_errors_leave_store_usable() {
    let store = load_fixture();
    let evaluator = Evaluator::new(&store);
    assert!(matches!(
        evaluator.evaluate("あ + ん"),
        Err(WordVecError::WordNotFound { .. })
    ));
    assert!(matches!(evaluator.evaluate("あ +"), Err(WordVecError::Syntax { .. })));

    let v = evaluator.evaluate("う").unwrap();
    assert_eq!(words(&store.cosine_similars(&v).unwrap()), "えあい");
}

#[test]
fn test_binary_file_round_trip() {
    let store = load_fixture();
    let dir = tempfile::tempdir().unwrap();

    for (width, format) in [
        (ElementWidth::F32, Format::Binary32),
        (ElementWidth::F64, Format::Binary64),
    ] {
        let path = dir.path().join(format!("model{}.bin", width.bits()));
        write_binary(&store, width, File::create(&path).unwrap()).unwrap();

        let loaded = load_path(&path, &LoadOptions::new(format).strict()).unwrap();
        let original: Vec<&str> = store.words().collect();
        let reloaded: Vec<&str> = loaded.words().collect();
        assert_eq!(original, reloaded);
        assert_eq!(words(&loaded.neighbourhood(loaded.find("い").unwrap()).unwrap()), "あうえ");
    }
}

#[test]
fn test_malformed_binary_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.bin");

    let store: VectorStore = vec![Vector::new("a", vec![1.0]), Vector::new("b", vec![2.0])]
        .into_iter()
        .collect();
    let mut bytes = Vec::new();
    write_binary(&store, ElementWidth::F32, &mut bytes).unwrap();
    let last = bytes.len() - 1;
    bytes[last] = b'\t';
    std::fs::write(&path, bytes).unwrap();

    let err = load_path(&path, &LoadOptions::new(Format::Binary32)).unwrap_err();
    assert!(matches!(err, WordVecError::Format { .. }));
}
