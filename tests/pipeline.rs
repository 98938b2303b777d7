//! End-to-end checks of the public retrieval and parsing API.

use ragsift::corpus::{Chunk, Corpus, CorpusHandle};
use ragsift::rag::{parse_structured_answer, ParsedAnswer};
use ragsift::retrieval::{cosine_similarity, select_top_chunks, ScoredChunk, SelectionParams};
use ragsift::SiftError;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

const CORPUS: &str = r#"
{"id": 0, "text": "Paracetamol max dose is 4g per day.", "source": "paracetamol.pdf", "embedding": [0.9, 0.1, 0.0]}
{"id": 1, "text": "Paracetamol is metabolised by the liver.", "source": "paracetamol.pdf", "embedding": [0.8, 0.2, 0.1]}
{"id": 2, "text": "Paracetamol tablets are white.", "source": "paracetamol.pdf", "embedding": [0.7, 0.3, 0.0]}
{"id": 3, "text": "Paracetamol overdose causes liver damage.", "source": "paracetamol.pdf", "embedding": [0.95, 0.05, 0.05]}
{"id": 4, "text": "Paracetamol is sold over the counter.", "source": "paracetamol.pdf", "embedding": [0.85, 0.0, 0.2]}
{"id": 5, "text": "Ibuprofen is an NSAID.", "source": "ibuprofen.pdf", "embedding": [0.5, 0.5, 0.0]}
{"id": 6, "text": "Ibuprofen should be taken with food.", "source": "ibuprofen.pdf", "embedding": [0.6, 0.4, 0.1]}

{"id": 7, "text": "Store medicines away from children.", "source": "safety.pdf", "embedding": [0.0, 0.0, 1.0]}
"#;

fn corpus() -> Corpus {
    Corpus::from_reader(Cursor::new(CORPUS)).unwrap()
}

#[test]
fn test_selection_respects_bounds_and_order() {
    let corpus = corpus();
    let query = [1.0, 0.0, 0.0];

    for (per_doc_k, global_n) in [(1, 10), (2, 3), (3, 10), (10, 4), (5, 100)] {
        let params = SelectionParams::new(per_doc_k, global_n);
        let results = select_top_chunks(&corpus, &query, params).unwrap();

        assert!(results.len() <= global_n);

        let mut per_source: HashMap<&str, usize> = HashMap::new();
        for r in &results {
            *per_source.entry(r.chunk.source_id.as_str()).or_default() += 1;
            assert!(corpus.chunks().iter().any(|c| std::ptr::eq(c, r.chunk)));
        }
        assert!(per_source.values().all(|&n| n <= per_doc_k));

        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}

#[test]
fn test_dominant_source_does_not_crowd_out_others() {
    let corpus = corpus();
    let results = select_top_chunks(&corpus, &[1.0, 0.0, 0.0], SelectionParams::default()).unwrap();

    let ids: Vec<&str> = results.iter().map(|r| r.chunk.id.as_str()).collect();
    assert_eq!(ids, vec!["3", "0", "4", "6", "5", "7"]);
}

fn ranking_key(results: &[ScoredChunk<'_>]) -> Vec<(usize, u32)> {
    results.iter().map(|r| (r.index, r.score.to_bits())).collect()
}

#[test]
fn test_selection_is_repeatable() {
    let corpus = corpus();
    let query = [0.3, 0.6, 0.2];

    let first = select_top_chunks(&corpus, &query, SelectionParams::default()).unwrap();
    let second = select_top_chunks(&corpus, &query, SelectionParams::default()).unwrap();

    assert_eq!(ranking_key(&first), ranking_key(&second));
}

#[test]
fn test_dimension_mismatch_reported() {
    let corpus = corpus();
    let err = select_top_chunks(&corpus, &[1.0, 0.0], SelectionParams::default()).unwrap_err();
    assert!(matches!(
        err,
        SiftError::DimensionMismatch {
            expected: 3,
            actual: 2
        }
    ));
}

#[test]
fn test_scorer_properties() {
    let a = [0.25, -0.5, 2.0];
    let b = [1.5, 0.75, -0.125];

    assert!((cosine_similarity(&a, &a).unwrap() - 1.0).abs() < 1e-6);
    assert_eq!(
        cosine_similarity(&a, &b).unwrap(),
        cosine_similarity(&b, &a).unwrap()
    );
    assert_eq!(cosine_similarity(&a, &[0.0; 3]).unwrap(), 0.0);
}

#[test]
fn test_concurrent_readers_share_snapshot() {
    let handle = Arc::new(CorpusHandle::new(corpus()));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let handle = Arc::clone(&handle);
            std::thread::spawn(move || {
                let snapshot = handle.snapshot();
                let indices: Vec<usize> =
                    select_top_chunks(&snapshot, &[1.0, 0.0, 0.0], SelectionParams::default())
                        .unwrap()
                        .iter()
                        .map(|r| r.index)
                        .collect();
                indices
            })
        })
        .collect();

    let outputs: Vec<Vec<usize>> = readers.into_iter().map(|t| t.join().unwrap()).collect();
    assert!(outputs.windows(2).all(|w| w[0] == w[1]));

    handle.replace(Corpus::new(vec![Chunk::new("x", "only", "s", vec![0.0, 1.0, 0.0])]).unwrap());
    assert_eq!(handle.snapshot().len(), 1);
}

#[test]
fn test_parse_reference_replies() {
    assert_eq!(
        parse_structured_answer("Concise Answer: X\nDetailed Explanation: Y\nSources:\nS1\nS2"),
        ParsedAnswer {
            concise: "X".to_string(),
            detailed: "Y".to_string(),
            sources: vec!["S1".to_string(), "S2".to_string()],
        }
    );
    assert_eq!(parse_structured_answer(""), ParsedAnswer::default());
    assert_eq!(
        parse_structured_answer("Detailed Explanation: part1\npart2").detailed,
        "part1 part2"
    );
}

#[test]
fn test_parsed_answer_json_shape() {
    let answer = parse_structured_answer("Concise Answer: ok\nSources:\na");
    let value = serde_json::to_value(&answer).unwrap();
    assert_eq!(
        value,
        serde_json::json!({ "concise": "ok", "detailed": "", "sources": ["a"] })
    );
}
