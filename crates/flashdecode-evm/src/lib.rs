//! # flashdecode-evm
//!
//! Call-data decoder for the flash-loan entry points of EVM lending pools.
//!
//! ## Implementation notes
//! - First 4 bytes of call-data → selector → `Descriptor` via `DispatchTable`
//! - Remaining bytes → head words (inline statics, offsets for dynamics) and tail payloads
//! - Every offset and length is bounds-checked; array counts are capped by `DecodeLimits`

pub mod batch;
pub mod calldata;
pub mod decoder;
pub mod dispatch;
pub mod selector;
pub mod word;

pub use batch::{decode_records, BatchOutcome};
pub use calldata::Calldata;
pub use decoder::{decode, decode_with_limits, CallDecoder, DecodeLimits};
pub use dispatch::{DispatchTable, FLASH_LOAN_SELECTOR, FLASH_LOAN_SIMPLE_SELECTOR};
