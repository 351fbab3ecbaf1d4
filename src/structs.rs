use binrw::{binrw, BinRead, BinResult, BinWrite, Endian};
use std::io::{Read, Seek, Write};

// note: a bank is a flat list of sections, each one a 4 byte signature and a payload size.
// Multi byte fields use the endianness the reader is configured with, nothing here is fixed.

#[binrw]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    // raw ascii, never byte swapped
    pub signature: [u8; 4],
    // payload only, the 8 header bytes are not included
    pub size: u32,
}

impl Section {
    pub const BKHD: [u8; 4] = *b"BKHD";
    pub const DIDX: [u8; 4] = *b"DIDX";
    pub const STID: [u8; 4] = *b"STID";
    pub const DATA: [u8; 4] = *b"DATA";
    pub const HIRC: [u8; 4] = *b"HIRC";

    pub fn byte_len() -> u32 {
        8
    }

    /// signature as text, for messages
    pub fn name(&self) -> String {
        String::from_utf8_lossy(&self.signature).into_owned()
    }
}

#[binrw]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BankHeader {
    pub version: u32,
    pub id: u32,
}

impl BankHeader {
    pub fn byte_len() -> u32 {
        8
    }
}

/// Descriptor of one embedded wem in the DIDX section.
#[binrw]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Index {
    pub id: u32,
    pub offset: u32,
    pub size: u32,
}

impl Index {
    pub fn byte_len() -> u32 {
        12
    }
}

#[binrw]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectHeader {
    pub object_type: ObjectType,
    // covers the id and the payload, not the type byte
    pub size: u32,
    pub id: u32,
}

impl ObjectHeader {
    pub fn byte_len() -> u32 {
        9
    }

    /// number of payload bytes following the id, `None` if `size` can't even hold the id
    pub fn payload_len(&self) -> Option<u32> {
        self.size.checked_sub(4)
    }
}

/// Declares a one byte code enum. Codes without a named variant are kept in `Other`,
/// so an unfamiliar value never fails a read.
macro_rules! byte_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $value:literal,)* }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)*
            Other(u8),
        }

        impl From<u8> for $name {
            fn from(value: u8) -> Self {
                match value {
                    $($value => Self::$variant,)*
                    other => Self::Other(other),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                match value {
                    $($name::$variant => $value,)*
                    $name::Other(other) => other,
                }
            }
        }

        impl BinRead for $name {
            type Args<'a> = ();

            fn read_options<R: Read + Seek>(
                reader: &mut R,
                endian: Endian,
                args: Self::Args<'_>,
            ) -> BinResult<Self> {
                u8::read_options(reader, endian, args).map(Self::from)
            }
        }

        impl BinWrite for $name {
            type Args<'a> = ();

            fn write_options<W: Write + Seek>(
                &self,
                writer: &mut W,
                endian: Endian,
                args: Self::Args<'_>,
            ) -> BinResult<()> {
                u8::from(*self).write_options(writer, endian, args)
            }
        }
    };
}

byte_enum! {
    /// Kind of a HIRC object. Only `Event` and `EventAction` have their payload decoded.
    ObjectType {
        SoundEffectOrVoice = 2,
        EventAction = 3,
        Event = 4,
        RandomOrSequenceContainer = 5,
        SwitchContainer = 6,
        ActorMixer = 7,
        AudioBus = 8,
        BlendContainer = 9,
        MusicSegment = 10,
        MusicTrack = 11,
        MusicSwitchContainer = 12,
        MusicPlaylistContainer = 13,
        Attenuation = 14,
        DialogueEvent = 15,
        MotionBus = 16,
        MotionFx = 17,
        Effect = 18,
        Unknown = 19,
        AuxiliaryBus = 20,
    }
}

byte_enum! {
    EventActionScope {
        SwitchOrTrigger = 1,
        Global = 2,
        GameObject = 3,
        State = 4,
        All = 5,
        AllExcept = 6,
    }
}

byte_enum! {
    EventActionType {
        Stop = 1,
        Pause = 2,
        Resume = 3,
        Play = 4,
        Trigger = 5,
        Mute = 6,
        UnMute = 7,
        SetVoicePitch = 8,
        ResetVoicePitch = 9,
        SetVoiceVolume = 10,
        ResetVoiceVolume = 11,
        SetBusVolume = 12,
        ResetBusVolume = 13,
        SetVoiceLowPassFilter = 14,
        ResetVoiceLowPassFilter = 15,
        EnableState = 16,
        DisableState = 17,
        SetState = 18,
        SetGameParameter = 19,
        ResetGameParameter = 20,
        SetSwitch = 21,
        ToggleBypass = 22,
        ResetBypassEffect = 23,
        Break = 24,
        Seek = 25,
    }
}

byte_enum! {
    EventActionParameterType {
        Delay = 0x0E,
        Play = 0x0F,
        Probability = 0x10,
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::{BinReaderExt, BinWriterExt};

    use crate::structs::{BankHeader, Index, ObjectHeader, ObjectType, Section};

    #[test]
    pub fn check_byte_lens() {
        let mut buf = Vec::new();

        Cursor::new(&mut buf).write_le(&Section::default()).unwrap();
        assert_eq!(Section::byte_len() as usize, buf.len());

        buf.clear();
        Cursor::new(&mut buf).write_le(&BankHeader::default()).unwrap();
        assert_eq!(BankHeader::byte_len() as usize, buf.len());

        buf.clear();
        Cursor::new(&mut buf).write_le(&Index::default()).unwrap();
        assert_eq!(Index::byte_len() as usize, buf.len());

        buf.clear();
        let header = ObjectHeader {
            object_type: ObjectType::Event,
            size: 4,
            id: 0,
        };
        Cursor::new(&mut buf).write_le(&header).unwrap();
        assert_eq!(ObjectHeader::byte_len() as usize, buf.len());
    }

    #[test]
    pub fn signature_is_not_swapped() {
        let section = Section {
            signature: Section::HIRC,
            size: 0x10,
        };
        let mut buf = Vec::new();
        Cursor::new(&mut buf).write_be(&section).unwrap();
        assert_eq!(&buf, b"HIRC\x00\x00\x00\x10");
        let read: Section = Cursor::new(&buf).read_be().unwrap();
        assert_eq!(read, section);
        assert_eq!(read.name(), "HIRC");
    }

    #[test]
    pub fn unknown_object_codes_are_kept() {
        let header: ObjectHeader = Cursor::new([0x63u8, 4, 0, 0, 0, 7, 0, 0, 0])
            .read_le()
            .unwrap();
        assert_eq!(header.object_type, ObjectType::Other(0x63));
        assert_eq!(u8::from(header.object_type), 0x63);
        assert_eq!(header.payload_len(), Some(0));

        assert_eq!(ObjectType::from(4), ObjectType::Event);
        assert_eq!(ObjectType::from(19), ObjectType::Unknown);
    }

    #[test]
    pub fn payload_len_needs_room_for_the_id() {
        let header = ObjectHeader {
            object_type: ObjectType::Event,
            size: 3,
            id: 1,
        };
        assert_eq!(header.payload_len(), None);
    }
}
