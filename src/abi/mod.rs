//! Contract ABI: primitive codec, parameters, functions/events and headers.
//!
//! A [`Header`] describes one contract's interface. Calls are encoded through
//! a [`Function`]'s parameters into an [`Invocation`] triple that becomes a
//! transaction payload.
//!
//! Two header byte layouts exist in the wild and both are supported:
//! - [`HeaderLayout::MethodId`] (default): entries sorted by method id,
//!   parameters as `[name, is_array, type]`.
//! - [`HeaderLayout::Legacy`]: entries sorted by name, parameters as
//!   `[name, is_array, type, size=0]`.
//!
//! Decoding accepts either.

pub mod function;
pub mod header;
pub mod json;
pub mod param;
pub mod primitive;

pub use function::{Event, Function, Invocation, MethodId, ZERO_METHOD_ID};
pub use header::{DecodedCall, Header};
pub use json::{FunctionJson, HeaderJson, ParameterJson};
pub use param::{format_type, parse_type, Argument, Parameter};
pub use primitive::PrimitiveType;

/// Canonical byte layout used when serializing a [`Header`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeaderLayout {
    #[default]
    MethodId,
    Legacy,
}
