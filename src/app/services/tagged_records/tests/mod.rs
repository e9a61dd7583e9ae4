//! Test fixtures for tagged record extraction

mod extractor_tests;
mod fields_tests;

/// Paved area records as written by Sobek, spread over several lines
pub fn create_paved_content() -> String {
    r#"PAVE id 'GS01' ar 5400 lv 9.99 ss 1 sd 'PAV1' qc 0 0 0.0315 qo 2 0 ms 'GFE1000' aaf 1 is 0 np 70 dw '1' ro 0 ru 0 qh '' pave
PAVE id 'GS02' ar 1.2E3 lv -0.5 ss 0 sd 'PAV2'
  qc 0 1.5 0.5 qo 1 1 ms 'GFE1000' is 0 np 10 dw '1' ro 0 ru 0 qh '' pave"#
        .to_string()
}
