// Parser module: recognizes the envelopes upstream responses arrive in.

pub mod destination;
pub mod shape;

pub use destination::extract_destination_id;
pub use shape::{ResponseShape, detect_shape};
