extern crate byteorder;
extern crate ofwire;

use byteorder::{BigEndian, WriteBytesExt};
use std::io::Write;
use std::sync::Arc;
use std::thread;

use ofwire::ds::actions::{Action, ActionV10, ExperimenterAction};
use ofwire::ds::packet_out::PacketOutV10;
use ofwire::ds::ports::{PortNoV10, PortNumberV10};
use ofwire::ds::symmetric::ExperimenterMsg;
use ofwire::ds::{OfMsg, OfPayload};
use ofwire::err::*;
use ofwire::header::{update_header_length, write_header};
use ofwire::registry::*;
use ofwire::ser::{registry_builder, OpaqueExperimenterSerializer};
use ofwire::{SerializerRegistry, Type, Version};

const NICIRA: u32 = 0x2320;

/// Resubmit action: subtype, in port, table, pad 3.
struct Resubmit;

impl OfSerializer<ExperimenterAction> for Resubmit {
    fn serialize(
        &self,
        action: &ExperimenterAction,
        out: &mut Vec<u8>,
        _: &SerializerRegistry,
    ) -> Result<()> {
        out.write_u16::<BigEndian>(14)?;
        out.write_u16::<BigEndian>(0xfff8)?;
        out.write_u8(action.data.first().copied().unwrap_or(0))?;
        out.write_all(&[0; 3])?;
        Ok(())
    }
}

/// Barrier with a trailing marker byte.
struct TaggedBarrier;

impl OfSerializer<OfMsg> for TaggedBarrier {
    fn serialize(&self, msg: &OfMsg, out: &mut Vec<u8>, _: &SerializerRegistry) -> Result<()> {
        let start = write_header(20, msg, out)?;
        out.push(0x7a);
        update_header_length(out, start)
    }
}

fn packet_out(action: ActionV10) -> OfMsg {
    OfMsg::new(
        Version::V1_0,
        5,
        OfPayload::PacketOutV10(PacketOutV10 {
            buffer_id: 0xffff_ffff,
            in_port: PortNumberV10::Reserved(PortNoV10::Controller),
            actions: vec![action],
            data: Vec::new(),
        }),
    )
}

#[test]
fn vendor_action_plugin_per_version() {
    let registry = registry_builder()
        .register::<ExperimenterAction, _>(
            ExperimenterKey::new(Version::V1_0, ExperimenterSpace::Action, NICIRA, None),
            Resubmit,
        )
        .build();
    let action = ExperimenterAction {
        experimenter_id: NICIRA,
        data: vec![3],
    };
    let bytes = registry.encode(&packet_out(ActionV10::Vendor(action.clone()))).unwrap();
    // 16 byte packet out, then a 16 byte vendor action
    assert_eq!(&bytes[14..16], &[0, 16]);
    assert_eq!(
        &bytes[16..],
        &[0xff, 0xff, 0, 16, 0, 0, 0x23, 0x20, 0, 14, 0xff, 0xf8, 3, 0, 0, 0]
    );

    // registered for 1.0 only
    let mut out = Vec::new();
    let list = vec![Action::Experimenter(action)];
    match ofwire::ser::action_codec::write_actions(&list, Version::V1_3, &registry, &mut out) {
        Err(Error(ErrorKind::NoSerializer(key), _)) => {
            assert!(key.contains("experimenter 0x2320"), "{}", key)
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn experimenter_messages_keyed_by_subtype() {
    let registry = registry_builder()
        .register::<ExperimenterMsg, _>(
            ExperimenterKey::new(Version::V1_3, ExperimenterSpace::Message, NICIRA, Some(1)),
            OpaqueExperimenterSerializer,
        )
        .build();
    let msg = |exp_type| {
        OfMsg::new(
            Version::V1_3,
            1,
            OfPayload::Experimenter(ExperimenterMsg {
                experimenter_id: NICIRA,
                exp_type,
                data: vec![0xee],
            }),
        )
    };
    let bytes = registry.encode(&msg(1)).unwrap();
    assert_eq!(bytes, vec![4, 4, 0, 17, 0, 0, 0, 1, 0, 0, 0x23, 0x20, 0, 0, 0, 1, 0xee]);
    assert!(registry.encode(&msg(2)).is_err());
}

#[test]
fn later_registration_wins() {
    let registry = registry_builder()
        .register_message(Version::V1_3, Type::BarrierRequest, TaggedBarrier)
        .build();
    let v13 = registry
        .encode(&OfMsg::new(Version::V1_3, 1, OfPayload::BarrierRequest))
        .unwrap();
    assert_eq!(v13, vec![4, 20, 0, 9, 0, 0, 0, 1, 0x7a]);
    let v10 = registry
        .encode(&OfMsg::new(Version::V1_0, 1, OfPayload::BarrierRequest))
        .unwrap();
    assert_eq!(v10, vec![1, 18, 0, 8, 0, 0, 0, 1]);
}

#[test]
fn lookup_checks_element_type() {
    let registry = SerializerRegistry::builder().build();
    let key = MessageTypeKey::new(Version::V1_3, Type::Hello);
    assert!(registry.lookup::<OfMsg>(key).is_ok());
    assert!(registry.lookup::<ExperimenterAction>(key).is_err());
    let empty = RegistryBuilder::new().build();
    match empty.encode(&OfMsg::new(Version::V1_3, 1, OfPayload::BarrierRequest)) {
        Err(Error(ErrorKind::NoSerializer(key), _)) => assert_eq!(key, "(V1_3, BarrierRequest)"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn registry_is_shared_between_threads() {
    let registry = Arc::new(SerializerRegistry::builder().build());
    let handles: Vec<_> = (0..4u32)
        .map(|xid| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                registry
                    .encode(&OfMsg::new(Version::V1_3, xid, OfPayload::EchoRequest(vec![xid as u8])))
                    .unwrap()
            })
        })
        .collect();
    for (xid, handle) in handles.into_iter().enumerate() {
        let bytes = handle.join().unwrap();
        assert_eq!(bytes, vec![4, 2, 0, 9, 0, 0, 0, xid as u8, xid as u8]);
    }
}
