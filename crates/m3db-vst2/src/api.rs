//! Raw VST 2.4 binary interface.
//!
//! Layouts, constants and opcode values are fixed by the host side of the
//! interface and must not change. Field names follow Rust conventions; the
//! order and types are what matters.

use std::ffi::c_void;

/// Pack a four character code the way the VST2 headers' `CCONST` does.
///
/// ```
/// use m3db_vst2::api::fourcc;
///
/// assert_eq!(fourcc(b"VstP"), 0x5673_7450);
/// ```
#[inline]
pub const fn fourcc(code: &[u8; 4]) -> i32 {
    i32::from_be_bytes(*code)
}

/// Magic number identifying a valid [`AEffect`].
pub const VST_MAGIC: i32 = fourcc(b"VstP");

/// Size of the host buffer for [`OpCode::GetVendorString`].
pub const MAX_VENDOR_STR_LEN: usize = 64;

/// Size of the host buffer for [`OpCode::GetProductString`].
pub const MAX_PRODUCT_STR_LEN: usize = 64;

/// Size of the host buffer for [`OpCode::GetEffectName`].
pub const MAX_EFFECT_NAME_LEN: usize = 32;

/// Capability bits stored in [`AEffect::flags`].
pub mod flags {
    /// Plugin provides a custom editor.
    pub const HAS_EDITOR: i32 = 1 << 0;
    /// Plugin supports `process_replacing` (f32).
    pub const CAN_REPLACING: i32 = 1 << 4;
    /// Plugin state is saved as an opaque chunk.
    pub const PROGRAM_CHUNKS: i32 = 1 << 5;
    /// Plugin is an instrument.
    pub const IS_SYNTH: i32 = 1 << 8;
    /// Plugin produces no sound when its input is silent.
    pub const NO_SOUND_IN_STOP: i32 = 1 << 9;
    /// Plugin supports `process_double_replacing` (f64).
    pub const CAN_DOUBLE_REPLACING: i32 = 1 << 12;
}

/// Callback the host passes to the entry point.
pub type HostCallbackProc = unsafe extern "C" fn(
    effect: *mut AEffect,
    opcode: i32,
    index: i32,
    value: isize,
    ptr: *mut c_void,
    opt: f32,
) -> isize;

/// Host-to-plugin command callback.
pub type DispatcherProc = unsafe extern "C" fn(
    effect: *mut AEffect,
    opcode: i32,
    index: i32,
    value: isize,
    ptr: *mut c_void,
    opt: f32,
) -> isize;

/// Audio callback, generic over the sample width.
pub type ProcessProc<S> = unsafe extern "C" fn(
    effect: *mut AEffect,
    inputs: *const *const S,
    outputs: *mut *mut S,
    sample_frames: i32,
);

pub type SetParameterProc = unsafe extern "C" fn(effect: *mut AEffect, index: i32, parameter: f32);

pub type GetParameterProc = unsafe extern "C" fn(effect: *mut AEffect, index: i32) -> f32;

/// Plugin descriptor handed to the host.
#[repr(C)]
pub struct AEffect {
    /// Must be [`VST_MAGIC`].
    pub magic: i32,
    pub dispatcher: DispatcherProc,
    /// Deprecated accumulating process callback.
    pub process: Option<ProcessProc<f32>>,
    pub set_parameter: SetParameterProc,
    pub get_parameter: GetParameterProc,
    pub num_programs: i32,
    pub num_params: i32,
    pub num_inputs: i32,
    pub num_outputs: i32,
    /// See [`flags`].
    pub flags: i32,
    pub reserved1: isize,
    pub reserved2: isize,
    pub initial_delay: i32,
    pub real_qualities: i32,
    pub off_qualities: i32,
    pub io_ratio: f32,
    /// Opaque pointer to the plugin side of the instance.
    pub object: *mut c_void,
    /// Reserved for the host.
    pub user: *mut c_void,
    pub unique_id: i32,
    pub version: i32,
    pub process_replacing: ProcessProc<f32>,
    pub process_double_replacing: ProcessProc<f64>,
    pub future: [u8; 56],
}

impl AEffect {
    /// Create a descriptor with the given callbacks and every other field zeroed.
    pub fn new(
        dispatcher: DispatcherProc,
        get_parameter: GetParameterProc,
        set_parameter: SetParameterProc,
        process_replacing: ProcessProc<f32>,
        process_double_replacing: ProcessProc<f64>,
    ) -> Self {
        Self {
            magic: VST_MAGIC,
            dispatcher,
            process: None,
            set_parameter,
            get_parameter,
            num_programs: 0,
            num_params: 0,
            num_inputs: 0,
            num_outputs: 0,
            flags: 0,
            reserved1: 0,
            reserved2: 0,
            initial_delay: 0,
            real_qualities: 0,
            off_qualities: 0,
            io_ratio: 0.0,
            object: std::ptr::null_mut(),
            user: std::ptr::null_mut(),
            unique_id: 0,
            version: 0,
            process_replacing,
            process_double_replacing,
            future: [0; 56],
        }
    }
}

/// Value returned for [`OpCode::GetPlugCategory`].
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlugCategory {
    Unknown = 0,
    Effect = 1,
    Synth = 2,
    Analysis = 3,
    Mastering = 4,
    Spacializer = 5,
    RoomFx = 6,
    SurroundFx = 7,
    Restoration = 8,
    OfflineProcess = 9,
    Shell = 10,
    Generator = 11,
}

macro_rules! opcodes {
    ($($(#[$meta:meta])* $name:ident = $value:literal,)*) => {
        /// Host-to-plugin dispatcher command.
        #[repr(i32)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum OpCode {
            $($(#[$meta])* $name = $value,)*
        }

        impl OpCode {
            /// Every opcode, in numeric order.
            pub const ALL: &'static [OpCode] = &[$(OpCode::$name,)*];
        }

        impl TryFrom<i32> for OpCode {
            /// The unrecognized raw code.
            type Error = i32;

            fn try_from(code: i32) -> Result<Self, i32> {
                match code {
                    $($value => Ok(OpCode::$name),)*
                    other => Err(other),
                }
            }
        }
    };
}

opcodes! {
    Open = 0,
    /// Last call on an instance; the plugin releases itself.
    Close = 1,
    SetProgram = 2,
    GetProgram = 3,
    SetProgramName = 4,
    GetProgramName = 5,
    GetParamLabel = 6,
    GetParamDisplay = 7,
    GetParamName = 8,
    GetVu = 9,
    SetSampleRate = 10,
    SetBlockSize = 11,
    MainsChanged = 12,
    EditGetRect = 13,
    EditOpen = 14,
    EditClose = 15,
    EditDraw = 16,
    EditMouse = 17,
    EditKey = 18,
    EditIdle = 19,
    EditTop = 20,
    EditSleep = 21,
    Identify = 22,
    GetChunk = 23,
    SetChunk = 24,
    ProcessEvents = 25,
    CanBeAutomated = 26,
    String2Parameter = 27,
    GetNumProgramCategories = 28,
    GetProgramNameIndexed = 29,
    CopyProgram = 30,
    ConnectInput = 31,
    ConnectOutput = 32,
    GetInputProperties = 33,
    GetOutputProperties = 34,
    GetPlugCategory = 35,
    GetCurrentPosition = 36,
    GetDestinationBuffer = 37,
    OfflineNotify = 38,
    OfflinePrepare = 39,
    OfflineRun = 40,
    ProcessVarIo = 41,
    SetSpeakerArrangement = 42,
    SetBlockSizeAndSampleRate = 43,
    SetBypass = 44,
    GetEffectName = 45,
    GetErrorText = 46,
    /// `ptr` is a `char[MAX_VENDOR_STR_LEN]` owned by the host.
    GetVendorString = 47,
    GetProductString = 48,
    GetVendorVersion = 49,
    VendorSpecific = 50,
    CanDo = 51,
    GetTailSize = 52,
    Idle = 53,
    GetIcon = 54,
    SetViewPosition = 55,
    GetParameterProperties = 56,
    KeysRequired = 57,
    GetVstVersion = 58,
    EditKeyDown = 59,
    EditKeyUp = 60,
    SetEditKnobMode = 61,
    GetMidiProgramName = 62,
    GetCurrentMidiProgram = 63,
    GetMidiProgramCategory = 64,
    HasMidiProgramsChanged = 65,
    GetMidiKeyName = 66,
    BeginSetProgram = 67,
    EndSetProgram = 68,
    GetSpeakerArrangement = 69,
    ShellGetNextPlugin = 70,
    StartProcess = 71,
    StopProcess = 72,
    SetTotalSampleToProcess = 73,
    SetPanLaw = 74,
    BeginLoadBank = 75,
    BeginLoadProgram = 76,
    SetProcessPrecision = 77,
    GetNumMidiInputChannels = 78,
    GetNumMidiOutputChannels = 79,
}
