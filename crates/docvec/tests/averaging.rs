//! End-to-end tests for word2vec-backed document averaging.
//!
//! Trains real models on small corpora and checks the averaging contract:
//! known-word means, zero rows for unknown documents, row order, output
//! shape and seeded determinism.

use docvec::prelude::*;
use ndarray::Array1;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn biology_corpus() -> Vec<Vec<String>> {
    [
        "the cell membrane controls transport of molecules",
        "proteins in the membrane form channels and receptors",
        "the ribosome builds proteins from amino acids",
        "mitochondria produce energy for the cell",
        "transport proteins move molecules across the membrane",
        "receptors on the cell surface detect signals",
    ]
    .iter()
    .map(|s| s.split_whitespace().map(str::to_string).collect())
    .collect()
}

fn options(dimension: usize) -> Word2VecOptions {
    Word2VecOptions::default()
        .with_vector_size(dimension)
        .with_min_count(1)
        .with_epochs(10)
}

/// Mean of the model's vectors for `words`, computed independently.
fn expected_mean(model: &Word2VecModel, words: &[&str]) -> Array1<f32> {
    let dim = model.dimension();
    let mut sum = vec![0.0f32; dim];
    for word in words {
        let vector = model.vector_of(word).unwrap();
        for (s, v) in sum.iter_mut().zip(vector) {
            *s += v;
        }
    }
    Array1::from_vec(sum) / words.len() as f32
}

fn assert_close(actual: &[f32], expected: &[f32]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-6, "{:?} != {:?}", actual, expected);
    }
}

#[test]
fn cat_sat_scenario() {
    init_tracing();

    let corpus = vec![vec!["cat", "sat"], vec!["dog", "ran"]];
    let mut averager = DocumentEmbeddingAverager::new(options(4));
    averager.fit(&corpus).unwrap();

    let model = averager.model().unwrap();
    let features = averager.transform(&[vec!["cat", "sat"]]).unwrap();
    assert_eq!(features.dim(), (1, 4));
    assert_close(
        features.row(0).as_slice().unwrap(),
        expected_mean(model, &["cat", "sat"]).as_slice().unwrap(),
    );

    let unknown = averager.transform(&[vec!["unknown_word"]]).unwrap();
    assert_eq!(unknown.row(0).to_vec(), vec![0.0; 4]);
}

#[test]
fn known_words_average_to_their_mean() {
    init_tracing();

    let corpus = biology_corpus();
    let mut averager = DocumentEmbeddingAverager::new(options(12));
    averager.fit(&corpus).unwrap();
    let model = averager.model().unwrap();

    for doc in &corpus {
        let words: Vec<&str> = doc.iter().map(String::as_str).collect();
        let row = averager.embed_document(doc).unwrap();
        assert_close(
            row.as_slice().unwrap(),
            expected_mean(model, &words).as_slice().unwrap(),
        );
    }
}

#[test]
fn unknown_tokens_do_not_change_the_mean() {
    let mut averager = DocumentEmbeddingAverager::new(options(8));
    averager.fit(&biology_corpus()).unwrap();

    let clean = averager.embed_document(&["cell", "membrane"]).unwrap();
    let noisy = averager
        .embed_document(&["xylophone", "cell", "quasar", "membrane"])
        .unwrap();
    assert_eq!(clean, noisy);
}

#[test]
fn shape_and_order_hold_for_any_coverage() {
    let mut averager = DocumentEmbeddingAverager::new(options(6));
    averager.fit(&biology_corpus()).unwrap();

    let docs: Vec<Vec<&str>> = vec![
        vec!["ribosome"],
        vec![],
        vec!["never", "seen", "before"],
        vec!["cell", "cell", "energy", "unknown"],
    ];
    let features = averager.transform(&docs).unwrap();
    assert_eq!(features.dim(), (4, 6));

    for (i, doc) in docs.iter().enumerate() {
        let single = averager.transform(std::slice::from_ref(doc)).unwrap();
        assert_eq!(features.row(i), single.row(0));
    }
    assert!(features.row(1).iter().all(|&x| x == 0.0));
    assert!(features.row(2).iter().all(|&x| x == 0.0));
    assert!(features.row(0).iter().any(|&x| x != 0.0));
}

#[test]
fn seeded_training_is_reproducible() {
    let corpus = biology_corpus();
    let docs = vec![vec!["cell", "membrane", "transport"], vec!["ribosome"]];

    for algorithm in [Algorithm::Cbow, Algorithm::SkipGram] {
        let opts = options(10).with_algorithm(algorithm).with_seed(7);

        let mut first = DocumentEmbeddingAverager::new(opts.clone());
        let a = first.fit_transform(&corpus).unwrap();
        let a_docs = first.transform(&docs).unwrap();

        let mut second = DocumentEmbeddingAverager::new(opts);
        let b = second.fit_transform(&corpus).unwrap();
        let b_docs = second.transform(&docs).unwrap();

        assert_eq!(a, b);
        assert_eq!(a_docs, b_docs);
    }
}

#[test]
fn refit_replaces_model() {
    let mut averager = DocumentEmbeddingAverager::new(options(4));
    averager.fit(&[vec!["cat", "sat"]]).unwrap();
    assert!(averager.model().unwrap().contains("cat"));

    averager.fit(&[vec!["dog", "ran"]]).unwrap();
    let model = averager.model().unwrap();
    assert!(!model.contains("cat"));
    assert!(model.contains("dog"));

    let features = averager.transform(&[vec!["cat"]]).unwrap();
    assert_eq!(features.row(0).to_vec(), vec![0.0; 4]);
}

#[test]
fn options_from_toml_drive_training() {
    let opts = Word2VecOptions::from_toml_str(
        r#"
        size = 6
        min_count = 2
        algorithm = "skip_gram"
        iter = 5
        sample = 0.0
        "#,
    )
    .unwrap();

    let mut averager = DocumentEmbeddingAverager::new(opts);
    averager.fit(&biology_corpus()).unwrap();

    let model = averager.model().unwrap();
    assert!(model.contains("membrane"));
    assert!(!model.contains("ribosome"));
    assert_eq!(averager.transform(&[vec!["membrane"]]).unwrap().dim(), (1, 6));
}

#[test]
fn trainer_errors_surface_from_fit() {
    let mut averager = DocumentEmbeddingAverager::new(options(0));
    let err = averager.fit(&biology_corpus()).unwrap_err();
    assert!(matches!(err, EmbeddingError::InvalidConfig(_)));
    assert!(!averager.is_fitted());
}

#[test]
fn pretrained_vectors_substitute_for_training() {
    let mut table = KeyedVectors::new(2);
    table.insert("cell", &[1.0, 0.0]).unwrap();
    table.insert("membrane", &[0.0, 1.0]).unwrap();

    let averager =
        DocumentEmbeddingAverager::from_pretrained(options(2), table).unwrap();
    assert!(averager.is_fitted());

    let features = averager
        .transform(&[vec!["cell", "membrane"], vec!["nucleus"]])
        .unwrap();
    assert_eq!(features.row(0).to_vec(), vec![0.5, 0.5]);
    assert_eq!(features.row(1).to_vec(), vec![0.0, 0.0]);
}

#[test]
fn previously_trained_model_can_be_installed() {
    let trained = Word2Vec::new()
        .train(&biology_corpus(), &options(8))
        .unwrap();
    let expected = expected_mean(&trained, &["cell", "energy"]);

    let averager = DocumentEmbeddingAverager::new(options(8))
        .with_model(trained)
        .unwrap();
    let row = averager.embed_document(&["cell", "energy"]).unwrap();
    assert_close(row.as_slice().unwrap(), expected.as_slice().unwrap());
}

#[test]
fn pretrained_trainer_refits_to_same_table() {
    let table = KeyedVectors::from_pairs(3, [("a", vec![1.0, 1.0, 1.0])]).unwrap();
    let mut averager = DocumentEmbeddingAverager::with_trainer(options(3), Pretrained::new(table));
    assert!(!averager.is_fitted());

    let features = averager.fit_transform(&[vec!["a", "b"]]).unwrap();
    assert_eq!(features.row(0).to_vec(), vec![1.0, 1.0, 1.0]);
}
