//! Codec and document tests.
//!
//! These tests exercise the serializer, deserializer and document boundary
//! together, including full save/load cycles through the transform pipeline.
