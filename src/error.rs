use thiserror::Error;

/// Anything that stops a pass over a bank. There is no recovery, the pass ends with it.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExtractError {
    /// Failed or cut off reads, whether inside a record or a wem blob.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A record read completely, but binrw rejected it.
    #[error("could not parse record: {0}")]
    Parse(#[source] binrw::Error),
    #[error("bank ends inside a section header ({read} of 8 bytes)")]
    TruncatedSection { read: usize },
    #[error("DIDX section size {size} is not a multiple of 12")]
    MisalignedIndex { size: u32 },
    #[error("{signature} section of size {size} can't hold its {needed} byte header")]
    SectionTooSmall {
        signature: String,
        size: u32,
        needed: u32,
    },
    #[error("object {id:#010x} has size {size}, smaller than its 4 byte id")]
    ObjectTooSmall { id: u32, size: u32 },
}

// derived readers wrap field errors in backtraces, the io error sits at the bottom
fn is_io(e: &binrw::Error) -> bool {
    match e {
        binrw::Error::Io(_) => true,
        binrw::Error::Backtrace(bt) => is_io(&bt.error),
        _ => false,
    }
}

impl From<binrw::Error> for ExtractError {
    fn from(e: binrw::Error) -> Self {
        match e {
            binrw::Error::Io(e) => Self::Io(e),
            binrw::Error::Backtrace(bt) if is_io(&bt.error) => Self::from(*bt.error),
            other => Self::Parse(other),
        }
    }
}
