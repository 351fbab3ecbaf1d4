use std::{
    io::{Read, Seek},
    iter::FusedIterator,
};

use binrw::Endian;
use log::{debug, warn};

use crate::{
    error::ExtractError,
    objects::{EventActionObject, EventObject, PassContext},
    reader::BnkReader,
    structs::{BankHeader, Index, ObjectHeader, ObjectType, Section},
};

#[derive(Debug, Default, Clone, Copy)]
pub struct ExtractOptions {
    /// read multi byte fields as big endian instead of little endian
    pub swap_byte_order: bool,
}

impl ExtractOptions {
    pub fn endian(&self) -> Endian {
        if self.swap_byte_order {
            Endian::Big
        } else {
            Endian::Little
        }
    }
}

/// A wem blob from the DATA section together with its DIDX descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedWem {
    pub index: Index,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Wem(ExtractedWem),
    Object(ObjectHeader),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitSection,
    // next_entry indexes into the index table of the context
    Data { section_end: u64, next_entry: usize },
    Hirc { section_end: u64, remaining: u32 },
    Done,
    Failed,
}

/// Single forward pass over a bank.
///
/// Yields the wem blobs of the DATA section and the object headers of the HIRC section,
/// both in file order. Event and event action payloads are collected into the
/// [`PassContext`] instead. After any error the iterator is finished; to read the bank
/// again, start a new extractor on a fresh source.
pub struct BankExtractor<R> {
    reader: BnkReader<R>,
    state: State,
    context: PassContext,
}

impl<R: Read + Seek> BankExtractor<R> {
    pub fn new(source: R, options: ExtractOptions) -> Self {
        Self {
            reader: BnkReader::new(source, options.endian()),
            state: State::AwaitSection,
            context: PassContext::default(),
        }
    }

    pub fn context(&self) -> &PassContext {
        &self.context
    }

    pub fn into_context(self) -> PassContext {
        self.context
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    fn step(&mut self) -> Result<Option<Extracted>, ExtractError> {
        loop {
            match self.state {
                State::Done | State::Failed => return Ok(None),
                State::AwaitSection => {
                    let Some(section) = self.reader.read_section()? else {
                        self.state = State::Done;
                        return Ok(None);
                    };
                    let section_end = self.reader.position()? + u64::from(section.size);
                    debug!("section {} with {} bytes", section.name(), section.size);
                    self.begin_section(section, section_end)?;
                }
                State::Data {
                    section_end,
                    next_entry,
                } => {
                    let Some(index) = self.context.index.get(next_entry).copied() else {
                        self.finish_section(section_end)?;
                        continue;
                    };
                    self.state = State::Data {
                        section_end,
                        next_entry: next_entry + 1,
                    };
                    // blobs are back to back, in DIDX order, the offset field is not used
                    let data = self.reader.read_bytes(index.size as usize)?;
                    let pos = self.reader.position()?;
                    if pos > section_end {
                        warn!(
                            "wem {} ends {} bytes past the DATA section",
                            index.id,
                            pos - section_end
                        );
                    }
                    return Ok(Some(Extracted::Wem(ExtractedWem { index, data })));
                }
                State::Hirc {
                    section_end,
                    remaining,
                } => {
                    if remaining == 0 {
                        self.finish_section(section_end)?;
                        continue;
                    }
                    self.state = State::Hirc {
                        section_end,
                        remaining: remaining - 1,
                    };
                    let object = self.decode_object()?;
                    return Ok(Some(Extracted::Object(object)));
                }
            }
        }
    }

    fn begin_section(&mut self, section: Section, section_end: u64) -> Result<(), ExtractError> {
        match section.signature {
            Section::BKHD => {
                let rest = section
                    .size
                    .checked_sub(BankHeader::byte_len())
                    .ok_or_else(|| too_small(&section, BankHeader::byte_len()))?;
                let header: BankHeader = self.reader.read()?;
                debug!("bank {} version {}", header.id, header.version);
                self.context.bank_header = Some(header);
                self.reader.skip(rest)?;
            }
            Section::DIDX => {
                if section.size % Index::byte_len() != 0 {
                    return Err(ExtractError::MisalignedIndex { size: section.size });
                }
                let count = section.size / Index::byte_len();
                self.context.index.reserve(count as usize);
                for _ in 0..count {
                    let index: Index = self.reader.read()?;
                    self.context.index.push(index);
                }
            }
            // string table, not needed for anything
            Section::STID => {}
            Section::DATA => {
                self.state = State::Data {
                    section_end,
                    next_entry: 0,
                };
                return Ok(());
            }
            Section::HIRC => {
                if section.size < 4 {
                    return Err(too_small(&section, 4));
                }
                let object_count: u32 = self.reader.read()?;
                debug!("{object_count} objects");
                self.state = State::Hirc {
                    section_end,
                    remaining: object_count,
                };
                return Ok(());
            }
            _ => debug!("skipping section {}", section.name()),
        }
        self.finish_section(section_end)
    }

    // the one place that realigns to the next section, no matter how much was read
    fn finish_section(&mut self, section_end: u64) -> Result<(), ExtractError> {
        self.reader.seek_to(section_end)?;
        self.state = State::AwaitSection;
        Ok(())
    }

    fn decode_object(&mut self) -> Result<ObjectHeader, ExtractError> {
        let header: ObjectHeader = self.reader.read()?;
        let payload_len = header.payload_len().ok_or(ExtractError::ObjectTooSmall {
            id: header.id,
            size: header.size,
        })?;
        let payload_start = self.reader.position()?;
        match header.object_type {
            ObjectType::Event => {
                let event: EventObject = self.reader.read_args((self.context.version(),))?;
                self.context.events.insert(header.id, event);
            }
            ObjectType::EventAction => {
                let action: EventActionObject = self.reader.read()?;
                self.context.event_actions.insert(header.id, action);
            }
            ObjectType::Other(tag) => {
                debug!("object {} has unrecognized type {tag}", header.id);
            }
            _ => {}
        }
        let consumed = self.reader.position()? - payload_start;
        if consumed > u64::from(payload_len) {
            warn!(
                "{:?} object {} read {consumed} bytes, but only has {payload_len}",
                header.object_type, header.id
            );
        }
        self.reader.seek_to(payload_start + u64::from(payload_len))?;
        Ok(header)
    }
}

fn too_small(section: &Section, needed: u32) -> ExtractError {
    ExtractError::SectionTooSmall {
        signature: section.name(),
        size: section.size,
        needed,
    }
}

impl<R: Read + Seek> Iterator for BankExtractor<R> {
    type Item = Result<Extracted, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            Ok(item) => item.map(Ok),
            Err(e) => {
                self.state = State::Failed;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read + Seek> FusedIterator for BankExtractor<R> {}
