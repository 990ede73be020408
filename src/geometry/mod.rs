pub mod chord;
pub mod perimeter;

pub use chord::{chord_crosses, port_t};
