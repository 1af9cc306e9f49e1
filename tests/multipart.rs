extern crate ofwire;

use ofwire::ds::multipart::*;
use ofwire::ds::stats_v10::{StatsRequestBodyV10, StatsRequestV10};
use ofwire::ds::table_features::{TableFeatureProperty, TableFeatures};
use ofwire::ds::table_mod::TableConfig;
use ofwire::ds::{OfMsg, OfPayload};
use ofwire::err::*;
use ofwire::ser::default_registry;
use ofwire::Version;

fn features(name: &str, properties: Vec<TableFeatureProperty>) -> TableFeatures {
    TableFeatures {
        table_id: 0,
        name: name.to_string(),
        metadata_match: 0,
        metadata_write: 0,
        config: TableConfig::empty(),
        max_entries: 4096,
        properties,
    }
}

fn table_features_request(tables: Vec<TableFeatures>) -> OfMsg {
    OfMsg::new(
        Version::V1_3,
        7,
        OfPayload::MultipartRequest(MultipartRequest {
            flags: MultipartFlags::empty(),
            body: MultipartRequestBody::TableFeatures(tables),
        }),
    )
}

#[test]
fn next_tables_property_in_table_features_request() {
    let property = TableFeatureProperty::NextTables((1..=9).collect());
    let msg = table_features_request(vec![features("t0", vec![property])]);
    let bytes = default_registry().encode(&msg).unwrap();
    assert_eq!(bytes.len(), 16 + 64 + 16);
    assert_eq!(&bytes[..4], &[4, 18, 0, 96]);
    assert_eq!(&bytes[8..12], &[0, 12, 0, 0]);
    // features length counts the padded property
    assert_eq!(&bytes[16..18], &[0, 80]);
    assert_eq!(&bytes[80..84], &[0, 2, 0, 13]);
    assert_eq!(&bytes[84..93], &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(&bytes[93..], &[0, 0, 0]);
}

#[test]
fn desc_request_per_version() {
    let registry = default_registry();
    let v13 = OfMsg::new(
        Version::V1_3,
        1,
        OfPayload::MultipartRequest(MultipartRequest {
            flags: MultipartFlags::empty(),
            body: MultipartRequestBody::Desc,
        }),
    );
    assert_eq!(
        registry.encode(&v13).unwrap(),
        vec![4, 18, 0, 16, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0]
    );
    let v10 = OfMsg::new(
        Version::V1_0,
        1,
        OfPayload::StatsRequestV10(StatsRequestV10 {
            flags: MultipartFlags::empty(),
            body: StatsRequestBodyV10::Desc,
        }),
    );
    assert_eq!(
        registry.encode(&v10).unwrap(),
        vec![1, 16, 0, 12, 0, 0, 0, 1, 0, 0, 0, 0]
    );
}

#[test]
fn shapes_are_not_interchangeable() {
    let registry = default_registry();
    let stats = OfMsg::new(
        Version::V1_3,
        1,
        OfPayload::StatsRequestV10(StatsRequestV10 {
            flags: MultipartFlags::empty(),
            body: StatsRequestBodyV10::Table,
        }),
    );
    match registry.encode(&stats) {
        Err(Error(ErrorKind::UnexpectedPayload(_, _), _)) => {}
        other => panic!("unexpected {:?}", other),
    }
    let multipart = OfMsg::new(
        Version::V1_0,
        1,
        OfPayload::MultipartRequest(MultipartRequest {
            flags: MultipartFlags::empty(),
            body: MultipartRequestBody::Table,
        }),
    );
    assert!(registry.encode(&multipart).is_err());
}

#[test]
fn failed_message_leaves_buffer_untouched() {
    let registry = default_registry();
    let mut out = vec![0xaa; 3];
    let bad = table_features_request(vec![features(&"n".repeat(33), Vec::new())]);
    match registry.serialize(&bad, &mut out) {
        Err(Error(ErrorKind::IllegalValue(_, _), _)) => {}
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(out, vec![0xaa; 3]);

    let good = table_features_request(vec![features("ok", Vec::new())]);
    registry.serialize(&good, &mut out).unwrap();
    assert_eq!(out.len(), 3 + 16 + 64);
    assert_eq!(&out[3..5], &[4, 18]);
}

#[test]
fn more_flag_on_reply() {
    let reply = OfMsg::new(
        Version::V1_3,
        2,
        OfPayload::MultipartReply(MultipartReply {
            flags: MultipartFlags::MORE,
            body: MultipartReplyBody::PortDesc(Vec::new()),
        }),
    );
    let bytes = default_registry().encode(&reply).unwrap();
    assert_eq!(bytes, vec![4, 19, 0, 16, 0, 0, 0, 2, 0, 13, 0, 1, 0, 0, 0, 0]);
}
