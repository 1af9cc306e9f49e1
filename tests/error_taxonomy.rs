extern crate ofwire;

use ofwire::ds::symmetric::ErrorMsg;
use ofwire::ds::{OfMsg, OfPayload};
use ofwire::err::*;
use ofwire::ofp_err::*;
use ofwire::ser::default_registry;
use ofwire::Version;

#[test]
fn error_type_decode() {
    assert_eq!(ErrorType::decode(0, Version::V1_0).unwrap(), ErrorType::HelloFailed);
    assert_eq!(ErrorType::decode(0xffff, Version::V1_2).unwrap(), ErrorType::Experimenter);
    match ErrorType::decode(0xffff, Version::V1_0) {
        Err(Error(ErrorKind::UnknownValue(0xffff, _), _)) => {}
        other => panic!("unexpected {:?}", other),
    }
    // same wire value, different type per table
    assert_eq!(ErrorType::decode(3, Version::V1_0).unwrap(), ErrorType::FlowModFailed);
    assert_eq!(ErrorType::decode(3, Version::V1_3).unwrap(), ErrorType::BadInstruction);
}

#[test]
fn version_gate_after_structural_match() {
    // METER_MOD_FAILED is 12 in the current table, which 1.1 already uses
    assert_eq!(ErrorType::MeterModFailed.code(Version::V1_1), Some(12));
    match ErrorType::decode(12, Version::V1_1) {
        Err(Error(ErrorKind::VersionMismatch(Version::V1_1, Version::V1_3, _), _)) => {}
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn removed_code() {
    assert_eq!(
        FlowModFailed::decode(5, Version::V1_0).unwrap(),
        FlowModFailed::UnsupportedActionList
    );
    assert_eq!(FlowModFailed::UnsupportedActionList.code(Version::V1_3), None);
    assert!(FlowModFailed::UnsupportedActionList.encode(Version::V1_3).is_err());
}

#[test]
fn labels_follow_version() {
    assert_eq!(FlowModFailed::BadTimeout.label(Version::V1_0), "BAD_EMERG_TIMEOUT");
    assert_eq!(FlowModFailed::BadTimeout.label(Version::V1_3), "BAD_TIMEOUT");
    assert_eq!(BadRequest::BadMultipart.label(Version::V1_0), "BAD_STAT");
    assert_eq!(ErrorCode::from(BadRequest::BadMultipart).label(Version::V1_3), "BAD_MULTIPART");
}

#[test]
fn every_code_has_a_value_where_it_is_valid() {
    for version in Version::ALL.iter().copied() {
        for code in FlowModFailed::ALL {
            if code.validate(version).is_ok() {
                let wire = code.encode(version).unwrap();
                assert_eq!(FlowModFailed::decode(wire, version).unwrap(), *code);
            }
        }
        for code in BadInstruction::ALL {
            if code.validate(version).is_ok() {
                let wire = code.encode(version).unwrap();
                assert_eq!(BadInstruction::decode(wire, version).unwrap(), *code);
            }
        }
    }
}

#[test]
fn error_message_uses_version_numbering() {
    let registry = default_registry();
    let error = ErrorMsg::Standard {
        code: ErrorCode::from(PortModFailed::BadHwAddr),
        data: Vec::new(),
    };
    let v10 = registry
        .encode(&OfMsg::new(Version::V1_0, 1, OfPayload::Error(error.clone())))
        .unwrap();
    let v13 = registry
        .encode(&OfMsg::new(Version::V1_3, 1, OfPayload::Error(error)))
        .unwrap();
    assert_eq!(&v10[8..10], &[0, 4]);
    assert_eq!(&v13[8..10], &[0, 7]);

    let meter = ErrorMsg::Standard {
        code: ErrorCode::from(MeterModFailed::Unknown),
        data: Vec::new(),
    };
    match registry.encode(&OfMsg::new(Version::V1_0, 1, OfPayload::Error(meter))) {
        Err(Error(ErrorKind::VersionMismatch(Version::V1_0, Version::V1_3, _), _)) => {}
        other => panic!("unexpected {:?}", other),
    }
}
