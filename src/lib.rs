#[macro_use]
extern crate getset;

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;

#[macro_use]
extern crate enum_primitive_derive;
extern crate byteorder;
extern crate num_traits;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate bitfield;

pub mod bits;
pub mod buf;
pub mod de;
pub mod ds;
pub mod err;
pub mod header;
pub mod list;
pub mod ofp_err;
pub mod registry;
pub mod ser;

pub use crate::header::{Type, Version};
pub use crate::registry::SerializerRegistry;
