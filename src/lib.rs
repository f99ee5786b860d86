//! An ordered map backed by a left-leaning red-black tree
//!
//! See [`OrderedMap`] for the map itself and [`map::Node`] for the low-level node API used to
//! inspect the shape of the tree.

pub mod map;
mod error;

pub use error::{Error, Result};
pub use map::OrderedMap;

#[macro_export(local_inner_macros)]
macro_rules! llrbmap {
    // trailing comma case
    ($($key:expr => $value:expr,)+) => (llrbmap!($($key => $value),+));

    ( $($key:expr => $value:expr),* ) => {
        {
            let mut _map = $crate::OrderedMap::new();
            $(
                let _ = _map.insert($key, $value);
            )*
            _map
        }
    };
}
