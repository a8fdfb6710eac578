use crate::{DocumentAlignment, TreebankConfig, TreebankError, TreebankPipeline};
use layered_ptb::{tokenize, Granularity, Span};
use std::fs;
use std::path::Path;

const DOCUMENT: &str = "<DOC>\nMr. Vinken is chairman.\n</DOC>\n";
const REGION: Span = Span { begin: 6, end: 29 };
const TREEBANK: &str = "( (S (NP-SBJ (NNP Mr.) (NNP Vinken)) (VP (VBZ is) (NP-PRD (NN chairman))) (. .)) )\n";

fn write_treebank(root: &Path, name: &str, content: &str) {
    let subdirectory = root.join(&name[4..6]);
    fs::create_dir_all(&subdirectory).unwrap();
    fs::write(subdirectory.join(name), content).unwrap();
}

fn pipeline(root: &Path) -> TreebankPipeline {
    TreebankPipeline::from_config(&TreebankConfig::new(root))
}

#[test]
fn aligns_a_located_document() {
    let dir = tempfile::tempdir().unwrap();
    write_treebank(dir.path(), "wsj_0001.mrg", TREEBANK);

    let outcome = pipeline(dir.path())
        .process("wsj_0001.tml", DOCUMENT, &[REGION])
        .unwrap();
    let document = outcome.aligned().unwrap();
    assert_eq!(document.sentences, vec![REGION]);

    let tagged: Vec<(&str, &str)> = document
        .tokens
        .iter()
        .map(|t| (t.text(DOCUMENT), t.label.as_deref().unwrap()))
        .collect();
    assert_eq!(
        tagged,
        vec![
            ("Mr.", "NNP"),
            ("Vinken", "NNP"),
            ("is", "VBZ"),
            ("chairman", "NN"),
            (".", "."),
        ]
    );

    // the tokenizer agrees with the treebank on this sentence
    let spans: Vec<Span> = tokenize(DOCUMENT, REGION, Granularity::Token)
        .into_iter()
        .map(|t| t.span)
        .collect();
    let aligned: Vec<Span> = document.tokens.iter().map(|t| t.span).collect();
    assert_eq!(spans, aligned);
}

#[test]
fn mismatched_text_skips_the_document() {
    let dir = tempfile::tempdir().unwrap();
    write_treebank(dir.path(), "wsj_0002.mrg", TREEBANK);

    let text = "<DOC>\nMr. Vinken was chairman.\n</DOC>\n";
    let outcome = pipeline(dir.path())
        .process("wsj_0002.tml", text, &[Span::new(6, 30)])
        .unwrap();
    assert!(outcome.is_skipped());
    match outcome {
        DocumentAlignment::Skipped(failure) => {
            assert_eq!(failure.leaf_index, 2);
            assert_eq!(failure.leaf_text, "is");
            assert_eq!(failure.offset, 17);
        }
        DocumentAlignment::Aligned(_) => unreachable!(),
    }
}

#[test]
fn missing_treebank_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = pipeline(dir.path()).process("wsj_0003.tml", DOCUMENT, &[REGION]);
    assert!(matches!(result, Err(TreebankError::MissingTreebank { .. })));
}

#[test]
fn structural_errors_are_not_skips() {
    let dir = tempfile::tempdir().unwrap();
    write_treebank(dir.path(), "wsj_0004.mrg", "( (S (NP (NNP Mr.)) )");
    let result = pipeline(dir.path()).process("wsj_0004.tml", DOCUMENT, &[REGION]);
    assert!(matches!(result, Err(TreebankError::Structural { .. })));
}

#[test]
fn config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("treebank.toml");
    fs::write(
        &path,
        format!(
            "directory = {:?}\n[align]\nrecoveries = []\n",
            dir.path().display().to_string()
        ),
    )
    .unwrap();
    let config = TreebankConfig::load(&path).unwrap();
    assert!(config.align.recoveries.is_empty());
    assert_eq!(config.directory, dir.path());

    assert!(matches!(
        TreebankConfig::load(&dir.path().join("missing.toml")),
        Err(TreebankError::Io { .. })
    ));
}
