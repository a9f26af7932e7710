//! The messages exchanged between the control plane and the schema tools, and the textual
//! codec they travel in.
//!
//! Every message is wrapped in an envelope naming its kind and the protocol version, serialized
//! as JSON, then base64 encoded so that it fits in a single process argument or output line.

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod codec;
mod diff;
mod stitching;

pub use self::{
    codec::{decode, encode, FormatError, Message, PROTOCOL_VERSION},
    diff::{Change, Criticality, CriticalityLevel, DiffInput, DiffOutput},
    stitching::{MergedTypeConfig, StitchingInput, StitchingOutput, SubschemaInput, TypeMergeConfig},
};
