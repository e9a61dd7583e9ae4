//! Tests for individual Sobek RR record builders

use crate::ParseError;
use crate::app::services::sobek_rr::{
    BoundaryLevel, BoundaryRecord, DrainageComputation, GreenhouseRecord, InfiltrationRecord,
    NodeRecord, PavedRecord, SeepageRecord, SobekRecord, StorageRecord, UnpavedRecord,
};
use crate::app::services::tagged_records::RecordFields;

fn build<R: SobekRecord>(text: &str) -> Result<R, ParseError> {
    R::from_fields(&RecordFields::new(R::TAG, 1, text))
}

#[test]
fn test_storage_record() {
    let storage: StorageRecord = build("id 'S1' nm 'Storage1' ml 5.0 il 0.0").unwrap();
    assert_eq!(storage.id, "S1");
    assert_eq!(storage.name.as_deref(), Some("Storage1"));
    assert_eq!(storage.max_land_storage, Some(5.0));
    assert_eq!(storage.initial_land_storage, Some(0.0));
    assert_eq!(storage.max_sewer_storage, None);
}

#[test]
fn test_paved_storage_record() {
    let storage: StorageRecord =
        build("id 'PAV1' nm 'PAV1' ms 1 is 0 mr 0.5 0.25 ir 0 0.1").unwrap();
    assert_eq!(storage.max_street_storage, Some(1.0));
    assert_eq!(storage.initial_street_storage, Some(0.0));
    assert_eq!(storage.max_sewer_storage, Some((0.5, 0.25)));
    assert_eq!(storage.initial_sewer_storage, Some((0.0, 0.1)));
    assert_eq!(storage.max_land_storage, None);
}

#[test]
fn test_paved_record() {
    let paved: PavedRecord = build(
        "id 'GS01' ar 5400 lv 9.99 ss 1 sd 'PAV1' qc 0 0 0.0315 qo 2 0 ms 'GFE1000' aaf 1 is 0 np 70 dw '1' ro 0 ru 0 qh ''",
    )
    .unwrap();

    assert_eq!(paved.id, "GS01");
    assert_eq!(paved.area, 5400.0);
    assert_eq!(paved.street_level, 9.99);
    assert_eq!(paved.sewer_type, 1);
    assert_eq!(paved.storage_id.as_deref(), Some("PAV1"));

    let capacity = paved.pump_capacity.unwrap();
    assert!(!capacity.from_table);
    assert_eq!(capacity.mixed_or_rainfall, 0.0);
    assert_eq!(capacity.dry_weather_flow, 0.0315);

    assert_eq!(paved.pump_discharge_targets, Some((2, 0)));
    assert_eq!(paved.meteo_station.as_deref(), Some("GFE1000"));
    assert_eq!(paved.number_of_inhabitants, 70.0);
    assert_eq!(paved.dry_weather_flow_id.as_deref(), Some("1"));
}

#[test]
fn test_paved_defaults() {
    let paved: PavedRecord = build("id 'P'").unwrap();
    assert_eq!(paved.area, 0.0);
    assert_eq!(paved.area_adjustment_factor, 1.0);
    assert!(paved.pump_capacity.is_none());
}

#[test]
fn test_missing_id_is_parse_error() {
    let result: Result<InfiltrationRecord, _> = build("nm 'INF1' ic 99");
    assert!(matches!(
        result,
        Err(ParseError::MissingField { ref field, .. }) if field == "id"
    ));
}

#[test]
fn test_node_record() {
    let node: NodeRecord =
        build("id '3' nm 'node 3' ri '-1' mt 1 '6' ObID '3B_BOUNDARY' px 125.5 py -30").unwrap();
    assert_eq!(node.id, "3");
    assert_eq!(node.name.as_deref(), Some("node 3"));
    assert_eq!(node.branch_id.as_deref(), Some("-1"));
    assert_eq!(node.node_type, Some(6));
    assert_eq!(node.object_id.as_deref(), Some("3B_BOUNDARY"));
    assert_eq!((node.x, node.y), (125.5, -30.0));
}

#[test]
fn test_boundary_record() {
    let constant: BoundaryRecord = build("id 'B1' bl 0 -1.25 is 0").unwrap();
    assert_eq!(constant.level, BoundaryLevel::Constant(-1.25));

    let table: BoundaryRecord = build("id 'B2' bl 1 'table1' is 3").unwrap();
    assert_eq!(
        table.level,
        BoundaryLevel::Variable(Some("table1".to_string()))
    );
    assert_eq!(table.initial_salt_concentration, 3.0);
}

#[test]
fn test_greenhouse_record() {
    let greenhouse: GreenhouseRecord =
        build("id 'G1' na 3 ar 100 0 50 sl 1.5 as 20 si 'silo1' sd 'grs1' ms 'meteo' is 0")
            .unwrap();
    assert_eq!(greenhouse.areas, vec![100.0, 0.0, 50.0]);
    assert_eq!(greenhouse.surface_level, 1.5);
    assert_eq!(greenhouse.silo_area, 20.0);
    assert_eq!(greenhouse.silo_id.as_deref(), Some("silo1"));
}

#[test]
fn test_greenhouse_with_wrong_area_count_uses_zeros() {
    let greenhouse: GreenhouseRecord = build("id 'G1' na 3 ar 100 0 sl 1.5").unwrap();
    assert_eq!(greenhouse.areas, vec![0.0, 0.0, 0.0]);
}

#[test]
fn test_seepage_record() {
    let seepage: SeepageRecord =
        build("id 'GFE820' nm 'Kwel GFE820' co 2 cv 50 h0 'h0table' ss 0").unwrap();
    assert_eq!(seepage.name.as_deref(), Some("Kwel GFE820"));
    assert_eq!(seepage.computation_option, 2);
    assert_eq!(seepage.resistance, Some(50.0));
    assert_eq!(seepage.h0_table_id.as_deref(), Some("h0table"));
}

#[test]
fn test_drainage_computation_codes() {
    assert_eq!(
        DrainageComputation::from_code(1),
        Some(DrainageComputation::HellingaDeZeeuw)
    );
    assert_eq!(
        DrainageComputation::from_code(3),
        Some(DrainageComputation::Ernst)
    );
    assert_eq!(DrainageComputation::from_code(9), None);
}

#[test]
fn test_huge_area_count_is_invalid_field() {
    let unpaved = build::<UnpavedRecord>("id 'u' na 2000000000 ar 1 2");
    assert!(matches!(unpaved, Err(ParseError::InvalidField { ref field, .. }) if field == "na"));

    let greenhouse = build::<GreenhouseRecord>("id 'g' na 2000000000 ar 1 2 sl 0");
    assert!(matches!(greenhouse, Err(ParseError::InvalidField { ref field, .. }) if field == "na"));
}
