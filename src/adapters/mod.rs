//! Bus adapter implementations.
//!
//! Implementations of the [`crate::scpi`] traits: real VISA hardware behind
//! the `instrument_visa` feature, and a scripted mock for tests.

pub mod mock_adapter;
#[cfg(feature = "instrument_visa")]
pub mod visa_adapter;

pub use mock_adapter::{MockResource, MockResourceManager};
#[cfg(feature = "instrument_visa")]
pub use visa_adapter::VisaResourceManager;
