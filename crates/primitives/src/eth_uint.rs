pub use primitive_types::{U128, U256, U512};
