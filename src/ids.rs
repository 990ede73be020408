use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// identifies a [`crate::model::region::Region`] by its index in the hypergraph's region arena.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegionId(pub usize);

/// identifies a [`crate::model::port::Port`] by its index in the hypergraph's port arena.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PortId(pub usize);

/// identifies a [`crate::model::connection::Connection`] as given by the caller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub usize);

/// identifies the mutually-connected net that a [`crate::model::connection::Connection`] belongs to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NetId(pub usize);

macro_rules! impl_display {
    ($t:ty, $label:expr) => {
        impl Display for $t {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", $label, self.0)
            }
        }
    };
}

impl_display!(RegionId, "Region");
impl_display!(PortId, "Port");
impl_display!(ConnectionId, "Connection");
impl_display!(NetId, "Net");
