//! Public library API for encoding and decoding tagged table items as JSON Lines.

/// Item value model, JSON Lines encoder and decoder, and stream compression helpers.
pub mod attr;
