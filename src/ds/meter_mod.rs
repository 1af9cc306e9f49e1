/// Adds, changes or removes a meter. 1.3 only.
#[derive(Debug, PartialEq, Clone)]
pub struct MeterMod {
    pub command: MeterModCommand,
    pub flags: MeterFlags,
    pub meter_id: u32,
    pub bands: Vec<MeterBand>,
}

#[derive(Primitive, PartialEq, Eq, Debug, Clone, Copy)]
pub enum MeterModCommand {
    Add = 0,
    Modify = 1,
    Delete = 2,
}

bitflags! {
    #[derive(Default)]
    pub struct MeterFlags: u16 {
        /// Rates are kilobits per second.
        const KBPS = 1 << 0;
        /// Rates are packets per second.
        const PKTPS = 1 << 1;
        /// Honour `burst_size` on the bands.
        const BURST = 1 << 2;
        const STATS = 1 << 3;
    }
}

#[derive(Primitive, PartialEq, Eq, Debug, Clone, Copy)]
pub enum MeterBandType {
    Drop = 1,
    DscpRemark = 2,
    Experimenter = 0xFFFF,
}

/// Length of drop and DSCP remark bands.
pub const METER_BAND_LEN: u16 = 16;

#[derive(Debug, PartialEq, Clone)]
pub enum MeterBand {
    Drop {
        rate: u32,
        burst_size: u32,
    },
    DscpRemark {
        rate: u32,
        burst_size: u32,
        /// Added to the drop precedence of the DSCP field.
        prec_level: u8,
    },
    Experimenter {
        rate: u32,
        burst_size: u32,
        experimenter_id: u32,
        data: Vec<u8>,
    },
}

impl MeterBand {
    pub fn band_type(&self) -> MeterBandType {
        match *self {
            MeterBand::Drop { .. } => MeterBandType::Drop,
            MeterBand::DscpRemark { .. } => MeterBandType::DscpRemark,
            MeterBand::Experimenter { .. } => MeterBandType::Experimenter,
        }
    }
}

bitflags! {
    /// Band types supported by the switch, in meter features.
    #[derive(Default)]
    pub struct MeterBandTypes: u32 {
        const DROP = 1 << 0;
        const DSCP_REMARK = 1 << 1;
    }
}
