#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
extern crate ofwire;
extern crate simple_logger;

use std::env;

use ofwire::ds::actions::{Action, ActionV10};
use ofwire::ds::flow_instructions::Instruction;
use ofwire::ds::flow_match::{Match, MatchV10};
use ofwire::ds::flow_mod::{FlowMod, FlowModCommand, FlowModFlags, FlowModV10, GROUP_ANY, NO_BUFFER};
use ofwire::ds::ports::{PortNo, PortNoV10, PortNumber, PortNumberV10};
use ofwire::ds::switch_config::{FragHandling, SwitchConfig, DEFAULT_MISS_SEND_LEN};
use ofwire::ds::symmetric::Hello;
use ofwire::ds::{OfMsg, OfPayload};
use ofwire::err::*;
use ofwire::ser::default_registry;
use ofwire::Version;

/// Sends every packet without a matching flow to the controller.
fn table_miss(version: Version) -> OfPayload {
    if version == Version::V1_0 {
        return OfPayload::FlowModV10(FlowModV10 {
            mmatch: MatchV10::any(),
            cookie: 0,
            command: FlowModCommand::Add,
            idle_timeout: 0,
            hard_timeout: 0,
            priority: 0,
            buffer_id: NO_BUFFER,
            out_port: PortNumberV10::Reserved(PortNoV10::NoPort),
            flags: FlowModFlags::empty(),
            actions: vec![ActionV10::Output {
                port: PortNumberV10::Reserved(PortNoV10::Controller),
                max_len: 0xffff,
            }],
        });
    }
    OfPayload::FlowMod(FlowMod {
        cookie: 0,
        cookie_mask: 0,
        table_id: 0,
        command: FlowModCommand::Add,
        idle_timeout: 0,
        hard_timeout: 0,
        priority: 0,
        buffer_id: NO_BUFFER,
        out_port: PortNumber::Reserved(PortNo::Any),
        out_group: GROUP_ANY,
        flags: FlowModFlags::empty(),
        mmatch: Match::any(),
        instructions: vec![Instruction::ApplyActions(vec![Action::Output {
            port: PortNumber::Reserved(PortNo::Controller),
            max_len: 0xffff,
        }])],
    })
}

fn handshake(version: Version) -> Vec<OfPayload> {
    let hello = if version == Version::V1_0 {
        Hello::default()
    } else {
        Hello::with_versions(&[version])
    };
    vec![
        OfPayload::Hello(hello),
        OfPayload::FeaturesRequest,
        OfPayload::SetConfig(SwitchConfig {
            flags: FragHandling::Normal,
            miss_send_len: DEFAULT_MISS_SEND_LEN,
        }),
        table_miss(version),
        OfPayload::BarrierRequest,
    ]
}

fn run() -> Result<()> {
    simple_logger::init().chain_err(|| "could not init logger")?;
    let version = match env::args().nth(1).as_deref() {
        None | Some("1.3") => Version::V1_3,
        Some("1.0") => Version::V1_0,
        Some(other) => bail!("unsupported version '{}', expected 1.0 or 1.3", other),
    };
    let registry = default_registry();
    for (xid, payload) in handshake(version).into_iter().enumerate() {
        let msg = OfMsg::new(version, xid as u32 + 1, payload);
        let bytes = registry.encode(&msg)?;
        info!("{:?} xid {}", msg.message_type(), msg.xid());
        let hex: Vec<String> = bytes.iter().map(|b| format!("{:02x}", b)).collect();
        println!("{}", hex.join(" "));
    }
    Ok(())
}

quick_main!(run);
