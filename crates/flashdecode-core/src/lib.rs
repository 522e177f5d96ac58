//! # flashdecode-core
//!
//! Types shared by every flashdecode crate: the ABI value model, the decoded
//! call record, the error taxonomy, the transaction record consumed by the
//! analyses and the `Cache` capability they are given.

pub mod cache;
pub mod call;
pub mod error;
pub mod record;
pub mod types;

pub use cache::Cache;
pub use call::DecodedCall;
pub use error::DecodeError;
pub use record::TransactionRecord;
pub use types::{AbiValue, Descriptor, Param, ParamType, Selector};
