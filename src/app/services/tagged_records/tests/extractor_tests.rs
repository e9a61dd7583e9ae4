//! Tests for tagged block extraction

use super::*;
use crate::ParseError;
use crate::app::services::tagged_records::{MissingTagPolicy, TagCase, TaggedRecordExtractor};

#[test]
fn test_extracts_blocks_in_order_with_lines() {
    let content = create_paved_content();
    let extractor = TaggedRecordExtractor::new("PAVE");
    let blocks: Vec<_> = extractor.blocks(&content).map(|b| b.unwrap()).collect();

    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].text.starts_with("id 'GS01'"));
    assert!(blocks[0].text.ends_with("qh ''"));
    assert_eq!(blocks[0].line, 1);
    assert_eq!(blocks[1].line, 2);
    assert!(blocks[1].text.contains("qc 0 1.5 0.5"));
}

#[test]
fn test_non_greedy_matching() {
    let content = "STDF id 'a' ml 1 stdf STDF id 'b' ml 2 stdf";
    let extractor = TaggedRecordExtractor::new("STDF");
    let texts: Vec<_> = extractor
        .blocks(content)
        .map(|b| b.unwrap().text)
        .collect();

    assert_eq!(texts, vec!["id 'a' ml 1", "id 'b' ml 2"]);
}

#[test]
fn test_tags_inside_quotes_and_longer_words_are_ignored() {
    let content = "PAVE id 'pave 1' nm 'PAVED' ar 10 paved_area 3 pave";
    let extractor = TaggedRecordExtractor::new("PAVE");
    let blocks: Vec<_> = extractor.blocks(content).map(|b| b.unwrap()).collect();

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].text, "id 'pave 1' nm 'PAVED' ar 10 paved_area 3");
}

#[test]
fn test_zero_matches_is_empty() {
    let extractor = TaggedRecordExtractor::new("UNPV");
    assert_eq!(extractor.blocks("PAVE id 'x' pave").count(), 0);
    assert!(
        extractor
            .extract("PAVE id 'x' pave", MissingTagPolicy::Empty)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_missing_tag_policy_error() {
    let extractor = TaggedRecordExtractor::new("UNPV");
    let result = extractor.extract("", MissingTagPolicy::Error);
    assert_eq!(
        result.unwrap_err(),
        ParseError::MissingTag {
            tag: "UNPV".to_string()
        }
    );
}

#[test]
fn test_exact_case_requires_lowercase_close() {
    let content = "NODE id '1' NODE id '2' node";
    let exact = TaggedRecordExtractor::new("NODE").with_case(TagCase::Exact);
    let blocks: Vec<_> = exact.blocks(content).map(|b| b.unwrap()).collect();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].text, "id '1' NODE id '2'");

    // the second NODE closes the first block, the trailing node opens an unterminated one
    let insensitive = TaggedRecordExtractor::new("NODE");
    let results: Vec<_> = insensitive.blocks(content).collect();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].clone().unwrap().text, "id '1'");
    assert!(results[1].is_err());
}

#[test]
fn test_unterminated_block() {
    let content = "INFC id 'a' ic 1 infc\n\nINFC id 'b' ic 2";
    let extractor = TaggedRecordExtractor::new("INFC");
    let results: Vec<_> = extractor.blocks(content).collect();

    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert_eq!(
        results[1].clone().unwrap_err(),
        ParseError::UnterminatedRecord {
            tag: "INFC".to_string(),
            line: 3
        }
    );
}

#[test]
fn test_custom_tags() {
    let content = "TBLE 1 2 < 3 4 < tble";
    let extractor = TaggedRecordExtractor::with_tags("TBLE", "tble").with_case(TagCase::Exact);
    let block = extractor.blocks(content).next().unwrap().unwrap();
    assert_eq!(block.text, "1 2 < 3 4 <");
}

#[test]
fn test_default_case_accepts_any_spelling() {
    let content = "stdf id 'a' ml 1 STDF\nStdf id 'b' ml 2 sTdF";
    let blocks: Vec<_> = TaggedRecordExtractor::new("STDF")
        .blocks(content)
        .map(|b| b.unwrap().text)
        .collect();
    assert_eq!(blocks, vec!["id 'a' ml 1", "id 'b' ml 2"]);

    let exact = TaggedRecordExtractor::new("STDF").with_case(TagCase::Exact);
    assert_eq!(exact.blocks(content).filter(Result::is_ok).count(), 0);
}
