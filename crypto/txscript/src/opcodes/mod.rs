//! Script opcode numbers, including the transaction introspection and
//! covenant opcodes used by the redeem script templates.

pub const OP_SMALL_INT_MIN_VAL: u8 = 1;
pub const OP_SMALL_INT_MAX_VAL: u8 = 16;
pub const OP_DATA_MIN_VAL: u8 = self::codes::OpData1;
pub const OP_DATA_MAX_VAL: u8 = self::codes::OpData75;
pub const OP_1_NEGATE_VAL: u8 = 0x81;

#[allow(non_upper_case_globals)]
pub mod codes {
    pub const Op0: u8 = 0x00;
    pub const OpFalse: u8 = 0x00;
    pub const OpData1: u8 = 0x01;
    pub const OpData2: u8 = 0x02;
    pub const OpData3: u8 = 0x03;
    pub const OpData4: u8 = 0x04;
    pub const OpData5: u8 = 0x05;
    pub const OpData6: u8 = 0x06;
    pub const OpData7: u8 = 0x07;
    pub const OpData8: u8 = 0x08;
    pub const OpData9: u8 = 0x09;
    pub const OpData10: u8 = 0x0a;
    pub const OpData11: u8 = 0x0b;
    pub const OpData12: u8 = 0x0c;
    pub const OpData13: u8 = 0x0d;
    pub const OpData14: u8 = 0x0e;
    pub const OpData15: u8 = 0x0f;
    pub const OpData16: u8 = 0x10;
    pub const OpData17: u8 = 0x11;
    pub const OpData18: u8 = 0x12;
    pub const OpData19: u8 = 0x13;
    pub const OpData20: u8 = 0x14;
    pub const OpData21: u8 = 0x15;
    pub const OpData22: u8 = 0x16;
    pub const OpData23: u8 = 0x17;
    pub const OpData24: u8 = 0x18;
    pub const OpData25: u8 = 0x19;
    pub const OpData26: u8 = 0x1a;
    pub const OpData27: u8 = 0x1b;
    pub const OpData28: u8 = 0x1c;
    pub const OpData29: u8 = 0x1d;
    pub const OpData30: u8 = 0x1e;
    pub const OpData31: u8 = 0x1f;
    pub const OpData32: u8 = 0x20;
    pub const OpData33: u8 = 0x21;
    pub const OpData34: u8 = 0x22;
    pub const OpData35: u8 = 0x23;
    pub const OpData36: u8 = 0x24;
    pub const OpData37: u8 = 0x25;
    pub const OpData38: u8 = 0x26;
    pub const OpData39: u8 = 0x27;
    pub const OpData40: u8 = 0x28;
    pub const OpData41: u8 = 0x29;
    pub const OpData42: u8 = 0x2a;
    pub const OpData43: u8 = 0x2b;
    pub const OpData44: u8 = 0x2c;
    pub const OpData45: u8 = 0x2d;
    pub const OpData46: u8 = 0x2e;
    pub const OpData47: u8 = 0x2f;
    pub const OpData48: u8 = 0x30;
    pub const OpData49: u8 = 0x31;
    pub const OpData50: u8 = 0x32;
    pub const OpData51: u8 = 0x33;
    pub const OpData52: u8 = 0x34;
    pub const OpData53: u8 = 0x35;
    pub const OpData54: u8 = 0x36;
    pub const OpData55: u8 = 0x37;
    pub const OpData56: u8 = 0x38;
    pub const OpData57: u8 = 0x39;
    pub const OpData58: u8 = 0x3a;
    pub const OpData59: u8 = 0x3b;
    pub const OpData60: u8 = 0x3c;
    pub const OpData61: u8 = 0x3d;
    pub const OpData62: u8 = 0x3e;
    pub const OpData63: u8 = 0x3f;
    pub const OpData64: u8 = 0x40;
    pub const OpData65: u8 = 0x41;
    pub const OpData66: u8 = 0x42;
    pub const OpData67: u8 = 0x43;
    pub const OpData68: u8 = 0x44;
    pub const OpData69: u8 = 0x45;
    pub const OpData70: u8 = 0x46;
    pub const OpData71: u8 = 0x47;
    pub const OpData72: u8 = 0x48;
    pub const OpData73: u8 = 0x49;
    pub const OpData74: u8 = 0x4a;
    pub const OpData75: u8 = 0x4b;
    pub const OpPushData1: u8 = 0x4c;
    pub const OpPushData2: u8 = 0x4d;
    pub const OpPushData4: u8 = 0x4e;
    pub const Op1Negate: u8 = 0x4f;
    pub const OpReserved: u8 = 0x50;
    pub const Op1: u8 = 0x51;
    pub const OpTrue: u8 = 0x51;
    pub const Op2: u8 = 0x52;
    pub const Op3: u8 = 0x53;
    pub const Op4: u8 = 0x54;
    pub const Op5: u8 = 0x55;
    pub const Op6: u8 = 0x56;
    pub const Op7: u8 = 0x57;
    pub const Op8: u8 = 0x58;
    pub const Op9: u8 = 0x59;
    pub const Op10: u8 = 0x5a;
    pub const Op11: u8 = 0x5b;
    pub const Op12: u8 = 0x5c;
    pub const Op13: u8 = 0x5d;
    pub const Op14: u8 = 0x5e;
    pub const Op15: u8 = 0x5f;
    pub const Op16: u8 = 0x60;
    pub const OpNop: u8 = 0x61;
    pub const OpVer: u8 = 0x62;
    pub const OpIf: u8 = 0x63;
    pub const OpNotIf: u8 = 0x64;
    pub const OpVerIf: u8 = 0x65;
    pub const OpVerNotIf: u8 = 0x66;
    pub const OpElse: u8 = 0x67;
    pub const OpEndIf: u8 = 0x68;
    pub const OpVerify: u8 = 0x69;
    pub const OpReturn: u8 = 0x6a;
    pub const OpToAltStack: u8 = 0x6b;
    pub const OpFromAltStack: u8 = 0x6c;
    pub const Op2Drop: u8 = 0x6d;
    pub const Op2Dup: u8 = 0x6e;
    pub const Op3Dup: u8 = 0x6f;
    pub const Op2Over: u8 = 0x70;
    pub const Op2Rot: u8 = 0x71;
    pub const Op2Swap: u8 = 0x72;
    pub const OpIfDup: u8 = 0x73;
    pub const OpDepth: u8 = 0x74;
    pub const OpDrop: u8 = 0x75;
    pub const OpDup: u8 = 0x76;
    pub const OpNip: u8 = 0x77;
    pub const OpOver: u8 = 0x78;
    pub const OpPick: u8 = 0x79;
    pub const OpRoll: u8 = 0x7a;
    pub const OpRot: u8 = 0x7b;
    pub const OpSwap: u8 = 0x7c;
    pub const OpTuck: u8 = 0x7d;
    pub const OpCat: u8 = 0x7e;
    pub const OpSubStr: u8 = 0x7f;
    pub const OpLeft: u8 = 0x80;
    pub const OpRight: u8 = 0x81;
    pub const OpSize: u8 = 0x82;
    pub const OpInvert: u8 = 0x83;
    pub const OpAnd: u8 = 0x84;
    pub const OpOr: u8 = 0x85;
    pub const OpXor: u8 = 0x86;
    pub const OpEqual: u8 = 0x87;
    pub const OpEqualVerify: u8 = 0x88;
    pub const OpReserved1: u8 = 0x89;
    pub const OpReserved2: u8 = 0x8a;
    pub const Op1Add: u8 = 0x8b;
    pub const Op1Sub: u8 = 0x8c;
    pub const Op2Mul: u8 = 0x8d;
    pub const Op2Div: u8 = 0x8e;
    pub const OpNegate: u8 = 0x8f;
    pub const OpAbs: u8 = 0x90;
    pub const OpNot: u8 = 0x91;
    pub const Op0NotEqual: u8 = 0x92;
    pub const OpAdd: u8 = 0x93;
    pub const OpSub: u8 = 0x94;
    pub const OpMul: u8 = 0x95;
    pub const OpDiv: u8 = 0x96;
    pub const OpMod: u8 = 0x97;
    pub const OpLShift: u8 = 0x98;
    pub const OpRShift: u8 = 0x99;
    pub const OpBoolAnd: u8 = 0x9a;
    pub const OpBoolOr: u8 = 0x9b;
    pub const OpNumEqual: u8 = 0x9c;
    pub const OpNumEqualVerify: u8 = 0x9d;
    pub const OpNumNotEqual: u8 = 0x9e;
    pub const OpLessThan: u8 = 0x9f;
    pub const OpGreaterThan: u8 = 0xa0;
    pub const OpLessThanOrEqual: u8 = 0xa1;
    pub const OpGreaterThanOrEqual: u8 = 0xa2;
    pub const OpMin: u8 = 0xa3;
    pub const OpMax: u8 = 0xa4;
    pub const OpWithin: u8 = 0xa5;
    pub const OpUnknown166: u8 = 0xa6;
    pub const OpUnknown167: u8 = 0xa7;
    pub const OpSHA256: u8 = 0xa8;
    pub const OpCheckMultiSigECDSA: u8 = 0xa9;
    pub const OpBlake2b: u8 = 0xaa;
    pub const OpCheckSigECDSA: u8 = 0xab;
    pub const OpCheckSig: u8 = 0xac;
    pub const OpCheckSigVerify: u8 = 0xad;
    pub const OpCheckMultiSig: u8 = 0xae;
    pub const OpCheckMultiSigVerify: u8 = 0xaf;
    pub const OpCheckLockTimeVerify: u8 = 0xb0;
    pub const OpCheckSequenceVerify: u8 = 0xb1;

    // Transaction introspection opcodes (KIP-10).
    pub const OpTxVersion: u8 = 0xb2;
    pub const OpTxInputCount: u8 = 0xb3;
    pub const OpTxOutputCount: u8 = 0xb4;
    pub const OpTxLockTime: u8 = 0xb5;
    pub const OpTxSubnetId: u8 = 0xb6;
    pub const OpTxGas: u8 = 0xb7;
    pub const OpTxPayload: u8 = 0xb8;
    pub const OpTxInputIndex: u8 = 0xb9;
    pub const OpOutpointTxId: u8 = 0xba;
    pub const OpOutpointIndex: u8 = 0xbb;
    pub const OpTxInputScriptSig: u8 = 0xbc;
    pub const OpTxInputSeq: u8 = 0xbd;
    pub const OpTxInputAmount: u8 = 0xbe;
    pub const OpTxInputSpk: u8 = 0xbf;
    pub const OpTxInputBlockDaaScore: u8 = 0xc0;
    pub const OpTxInputIsCoinbase: u8 = 0xc1;
    pub const OpTxOutputAmount: u8 = 0xc2;
    pub const OpTxOutputSpk: u8 = 0xc3;

    // Covenant introspection opcodes.
    pub const OpAuthOutputCount: u8 = 0xc4;
    pub const OpAuthOutputIdx: u8 = 0xc5;
    pub const OpInputCovenantId: u8 = 0xc6;
    pub const OpCovInputIdx: u8 = 0xc7;
    pub const OpCovOutputIdx: u8 = 0xc8;

    pub const OpSmallInteger: u8 = 0xfa;
    pub const OpPubKeys: u8 = 0xfb;
    pub const OpUnknown252: u8 = 0xfc;
    pub const OpPubKeyHash: u8 = 0xfd;
    pub const OpPubKey: u8 = 0xfe;
    pub const OpInvalidOpCode: u8 = 0xff;
}
