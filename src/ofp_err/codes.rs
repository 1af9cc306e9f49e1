// Legacy tables are OpenFlow 1.0 (1.1 for BadInstruction), current tables
// are the OpenFlow 1.3 numbering.

error_codes! {
    /// Value of the `type` field of an error message.
    pub enum ErrorType, current from V1_1 {
        HelloFailed("HELLO_FAILED") = [0, 0] since V1_0,
        BadRequest("BAD_REQUEST") = [1, 1] since V1_0,
        BadAction("BAD_ACTION") = [2, 2] since V1_0,
        BadInstruction("BAD_INSTRUCTION") = [-1, 3] since V1_1,
        BadMatch("BAD_MATCH") = [-1, 4] since V1_1,
        FlowModFailed("FLOW_MOD_FAILED") = [3, 5] since V1_0,
        GroupModFailed("GROUP_MOD_FAILED") = [-1, 6] since V1_1,
        PortModFailed("PORT_MOD_FAILED") = [4, 7] since V1_0,
        TableModFailed("TABLE_MOD_FAILED") = [-1, 8] since V1_1,
        QueueOpFailed("QUEUE_OP_FAILED") = [5, 9] since V1_0,
        SwitchConfigFailed("SWITCH_CONFIG_FAILED") = [-1, 10] since V1_1,
        RoleRequestFailed("ROLE_REQUEST_FAILED") = [-1, 11] since V1_2,
        MeterModFailed("METER_MOD_FAILED") = [-1, 12] since V1_3,
        TableFeaturesFailed("TABLE_FEATURES_FAILED") = [-1, 13] since V1_3,
        /// Experimenter error, carries its own id and type instead of a code.
        Experimenter("EXPERIMENTER") = [-1, 0xffff] since V1_2,
    }
}

error_codes! {
    pub enum HelloFailed in HelloFailed, current from V1_1 {
        Incompatible("INCOMPATIBLE") = [0, 0] since V1_0,
        Eperm("EPERM") = [1, 1] since V1_0,
    }
}

error_codes! {
    pub enum BadRequest in BadRequest, current from V1_1 {
        BadVersion("BAD_VERSION") = [0, 0] since V1_0,
        BadType("BAD_TYPE") = [1, 1] since V1_0,
        BadMultipart("BAD_MULTIPART") = [2, 2] since V1_0 aka "BAD_STAT",
        BadExperimenter("BAD_EXPERIMENTER") = [3, 3] since V1_0 aka "BAD_VENDOR",
        BadExpType("BAD_EXP_TYPE") = [4, 4] since V1_0 aka "BAD_SUBTYPE",
        Eperm("EPERM") = [5, 5] since V1_0,
        BadLen("BAD_LEN") = [6, 6] since V1_0,
        BufferEmpty("BUFFER_EMPTY") = [7, 7] since V1_0,
        BufferUnknown("BUFFER_UNKNOWN") = [8, 8] since V1_0,
        BadTableId("BAD_TABLE_ID") = [-1, 9] since V1_1,
        IsSlave("IS_SLAVE") = [-1, 10] since V1_2,
        BadPort("BAD_PORT") = [-1, 11] since V1_2,
        BadPacket("BAD_PACKET") = [-1, 12] since V1_2,
        MultipartBufferOverflow("MULTIPART_BUFFER_OVERFLOW") = [-1, 13] since V1_3,
    }
}

error_codes! {
    pub enum BadAction in BadAction, current from V1_1 {
        BadType("BAD_TYPE") = [0, 0] since V1_0,
        BadLen("BAD_LEN") = [1, 1] since V1_0,
        BadExperimenter("BAD_EXPERIMENTER") = [2, 2] since V1_0 aka "BAD_VENDOR",
        BadExpType("BAD_EXP_TYPE") = [3, 3] since V1_0 aka "BAD_VENDOR_TYPE",
        BadOutPort("BAD_OUT_PORT") = [4, 4] since V1_0,
        BadArgument("BAD_ARGUMENT") = [5, 5] since V1_0,
        Eperm("EPERM") = [6, 6] since V1_0,
        TooMany("TOO_MANY") = [7, 7] since V1_0,
        BadQueue("BAD_QUEUE") = [8, 8] since V1_0,
        BadOutGroup("BAD_OUT_GROUP") = [-1, 9] since V1_1,
        MatchInconsistent("MATCH_INCONSISTENT") = [-1, 10] since V1_1,
        UnsupportedOrder("UNSUPPORTED_ORDER") = [-1, 11] since V1_1,
        BadTag("BAD_TAG") = [-1, 12] since V1_1,
        BadSetType("BAD_SET_TYPE") = [-1, 13] since V1_2,
        BadSetLen("BAD_SET_LEN") = [-1, 14] since V1_2,
        BadSetArgument("BAD_SET_ARGUMENT") = [-1, 15] since V1_2,
    }
}

error_codes! {
    /// OpenFlow 1.2 inserted BAD_EXPERIMENTER at 5 and shifted the
    /// experimenter type code up by one.
    pub enum BadInstruction in BadInstruction, current from V1_2 {
        UnknownInst("UNKNOWN_INST") = [0, 0] since V1_1,
        UnsupInst("UNSUP_INST") = [1, 1] since V1_1,
        BadTableId("BAD_TABLE_ID") = [2, 2] since V1_1,
        UnsupMetadata("UNSUP_METADATA") = [3, 3] since V1_1,
        UnsupMetadataMask("UNSUP_METADATA_MASK") = [4, 4] since V1_1,
        BadExperimenter("BAD_EXPERIMENTER") = [-1, 5] since V1_2,
        BadExpType("BAD_EXP_TYPE") = [5, 6] since V1_1 aka "UNSUP_EXP_INST",
        BadLen("BAD_LEN") = [-1, 7] since V1_2,
        Eperm("EPERM") = [-1, 8] since V1_2,
    }
}

error_codes! {
    pub enum BadMatch in BadMatch, current from V1_1 {
        BadType("BAD_TYPE") = [-1, 0] since V1_1,
        BadLen("BAD_LEN") = [-1, 1] since V1_1,
        BadTag("BAD_TAG") = [-1, 2] since V1_1,
        BadDlAddrMask("BAD_DL_ADDR_MASK") = [-1, 3] since V1_1,
        BadNwAddrMask("BAD_NW_ADDR_MASK") = [-1, 4] since V1_1,
        BadWildcards("BAD_WILDCARDS") = [-1, 5] since V1_1,
        BadField("BAD_FIELD") = [-1, 6] since V1_1,
        BadValue("BAD_VALUE") = [-1, 7] since V1_1,
        BadMask("BAD_MASK") = [-1, 8] since V1_2,
        BadPrereq("BAD_PREREQ") = [-1, 9] since V1_2,
        DupField("DUP_FIELD") = [-1, 10] since V1_2,
        Eperm("EPERM") = [-1, 11] since V1_2,
    }
}

error_codes! {
    pub enum FlowModFailed in FlowModFailed, current from V1_1 {
        Unknown("UNKNOWN") = [-1, 0] since V1_1,
        TableFull("TABLE_FULL") = [0, 1] since V1_0 aka "ALL_TABLES_FULL",
        BadTableId("BAD_TABLE_ID") = [-1, 2] since V1_1,
        Overlap("OVERLAP") = [1, 3] since V1_0,
        Eperm("EPERM") = [2, 4] since V1_0,
        BadTimeout("BAD_TIMEOUT") = [3, 5] since V1_0 aka "BAD_EMERG_TIMEOUT",
        BadCommand("BAD_COMMAND") = [4, 6] since V1_0,
        BadFlags("BAD_FLAGS") = [-1, 7] since V1_2,
        /// Only defined by OpenFlow 1.0.
        UnsupportedActionList("UNSUPPORTED_ACTION_LIST") = [5, -1] since V1_0 until V1_0,
    }
}

error_codes! {
    pub enum GroupModFailed in GroupModFailed, current from V1_1 {
        GroupExists("GROUP_EXISTS") = [-1, 0] since V1_1,
        InvalidGroup("INVALID_GROUP") = [-1, 1] since V1_1,
        WeightUnsupported("WEIGHT_UNSUPPORTED") = [-1, 2] since V1_1,
        OutOfGroups("OUT_OF_GROUPS") = [-1, 3] since V1_1,
        OutOfBuckets("OUT_OF_BUCKETS") = [-1, 4] since V1_1,
        ChainingUnsupported("CHAINING_UNSUPPORTED") = [-1, 5] since V1_1,
        WatchUnsupported("WATCH_UNSUPPORTED") = [-1, 6] since V1_1,
        Loop("LOOP") = [-1, 7] since V1_1,
        UnknownGroup("UNKNOWN_GROUP") = [-1, 8] since V1_1,
        ChainedGroup("CHAINED_GROUP") = [-1, 9] since V1_2,
        BadType("BAD_TYPE") = [-1, 10] since V1_2,
        BadCommand("BAD_COMMAND") = [-1, 11] since V1_2,
        BadBucket("BAD_BUCKET") = [-1, 12] since V1_2,
        BadWatch("BAD_WATCH") = [-1, 13] since V1_2,
        Eperm("EPERM") = [-1, 14] since V1_2,
    }
}

error_codes! {
    pub enum PortModFailed in PortModFailed, current from V1_1 {
        BadPort("BAD_PORT") = [0, 0] since V1_0,
        BadHwAddr("BAD_HW_ADDR") = [1, 1] since V1_0,
        BadConfig("BAD_CONFIG") = [-1, 2] since V1_1,
        BadAdvertise("BAD_ADVERTISE") = [-1, 3] since V1_1,
        Eperm("EPERM") = [-1, 4] since V1_2,
    }
}

error_codes! {
    pub enum TableModFailed in TableModFailed, current from V1_1 {
        BadTable("BAD_TABLE") = [-1, 0] since V1_1,
        BadConfig("BAD_CONFIG") = [-1, 1] since V1_1,
        Eperm("EPERM") = [-1, 2] since V1_2,
    }
}

error_codes! {
    pub enum QueueOpFailed in QueueOpFailed, current from V1_1 {
        BadPort("BAD_PORT") = [0, 0] since V1_0,
        BadQueue("BAD_QUEUE") = [1, 1] since V1_0,
        Eperm("EPERM") = [2, 2] since V1_0,
    }
}

error_codes! {
    pub enum SwitchConfigFailed in SwitchConfigFailed, current from V1_1 {
        BadFlags("BAD_FLAGS") = [-1, 0] since V1_1,
        BadLen("BAD_LEN") = [-1, 1] since V1_1,
        Eperm("EPERM") = [-1, 2] since V1_2,
    }
}

error_codes! {
    pub enum RoleRequestFailed in RoleRequestFailed, current from V1_1 {
        /// Stale message, old generation id.
        Stale("STALE") = [-1, 0] since V1_2,
        Unsup("UNSUP") = [-1, 1] since V1_2,
        BadRole("BAD_ROLE") = [-1, 2] since V1_2,
    }
}

error_codes! {
    pub enum MeterModFailed in MeterModFailed, current from V1_1 {
        Unknown("UNKNOWN") = [-1, 0] since V1_3,
        MeterExists("METER_EXISTS") = [-1, 1] since V1_3,
        InvalidMeter("INVALID_METER") = [-1, 2] since V1_3,
        UnknownMeter("UNKNOWN_METER") = [-1, 3] since V1_3,
        BadCommand("BAD_COMMAND") = [-1, 4] since V1_3,
        BadFlags("BAD_FLAGS") = [-1, 5] since V1_3,
        BadRate("BAD_RATE") = [-1, 6] since V1_3,
        BadBurst("BAD_BURST") = [-1, 7] since V1_3,
        BadBand("BAD_BAND") = [-1, 8] since V1_3,
        BadBandValue("BAD_BAND_VALUE") = [-1, 9] since V1_3,
        OutOfMeters("OUT_OF_METERS") = [-1, 10] since V1_3,
        OutOfBands("OUT_OF_BANDS") = [-1, 11] since V1_3,
    }
}

error_codes! {
    pub enum TableFeaturesFailed in TableFeaturesFailed, current from V1_1 {
        BadTable("BAD_TABLE") = [-1, 0] since V1_3,
        BadMetadata("BAD_METADATA") = [-1, 1] since V1_3,
        BadType("BAD_TYPE") = [-1, 2] since V1_3,
        BadLen("BAD_LEN") = [-1, 3] since V1_3,
        BadArgument("BAD_ARGUMENT") = [-1, 4] since V1_3,
        Eperm("EPERM") = [-1, 5] since V1_3,
    }
}
