pub mod c32;
pub mod serialize;
mod value;

pub use c32::{C32Error, StandardPrincipal, decode_address};
pub use serialize::{EncodeError, serialize, to_hex};
pub use value::ClarityValue;
