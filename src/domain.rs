// Domain layer modules
pub mod envelope_validator;
pub mod event_envelope;

// Re-exports
pub use envelope_validator::{EnvelopeValidator, ValidationError};
pub use event_envelope::{DecodeError, EncodeError, EventEnvelope};
