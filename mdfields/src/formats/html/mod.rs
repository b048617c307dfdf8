//! HTML support: fragment serialization via html5ever.

pub mod serializer;

pub use serializer::serialize_to_html;
