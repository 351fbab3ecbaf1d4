use std::collections::HashMap;

use binrw::binread;

use crate::structs::{
    BankHeader, EventActionParameterType, EventActionScope, EventActionType, Index,
};

/// From this bank version on the event action count is a single byte.
pub const COMPACT_EVENT_COUNT_VERSION: u32 = 134;

#[binread]
#[br(import(version: u32))]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventObject {
    #[br(temp, if(version >= COMPACT_EVENT_COUNT_VERSION))]
    compact_count: Option<u8>,
    #[br(temp, if(version < COMPACT_EVENT_COUNT_VERSION))]
    wide_count: Option<u32>,
    #[br(count = compact_count.map(u32::from).or(wide_count).unwrap_or_default())]
    pub action_ids: Vec<u32>,
}

#[binread]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventActionObject {
    pub scope: EventActionScope,
    pub action_type: EventActionType,
    // followed by a byte nobody has figured out yet
    #[br(pad_after = 1)]
    pub game_object_id: u32,
    pub parameter_count: u8,
    #[br(count = parameter_count)]
    pub parameter_types: Vec<EventActionParameterType>,
    #[br(count = parameter_count, pad_after = 1)]
    pub parameter_values: Vec<i8>,
}

impl EventActionObject {
    /// parameter types zipped with their values
    pub fn parameters(&self) -> impl Iterator<Item = (EventActionParameterType, i8)> + '_ {
        self.parameter_types
            .iter()
            .copied()
            .zip(self.parameter_values.iter().copied())
    }
}

/// Everything a single pass over a bank learns, besides what it yields.
#[derive(Debug, Default, Clone)]
pub struct PassContext {
    pub bank_header: Option<BankHeader>,
    // in DIDX order, which is also the order of the DATA blobs
    pub index: Vec<Index>,
    pub events: HashMap<u32, EventObject>,
    pub event_actions: HashMap<u32, EventActionObject>,
}

impl PassContext {
    /// bank version, 0 if no BKHD section was read yet
    pub fn version(&self) -> u32 {
        self.bank_header.map_or(0, |header| header.version)
    }
}
