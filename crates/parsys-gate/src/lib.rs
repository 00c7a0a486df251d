//! Paragraph system (parsys) page object for the authoring console
//!
//! A parsys is the drop zone components are inserted into. Opening its insert
//! surface is a two-phase, race-prone interaction: the drop area has to be
//! selected first, and the click that opens the surface may land just after
//! the surface popped up. Child components are looked up by data path.

pub mod errors;
pub mod path;
mod parsys;
pub mod ports;

pub use errors::ParsysError;
pub use parsys::Parsys;
pub use ports::{Component, ComponentBinder, InsertSurface, ParsysPorts};
