//! Depth-first search over a rampgrid [`Grid`](rampgrid_core::Grid).
//!
//! The engine, [`DepthFirst`], explores 4-directional neighbors with an
//! explicit LIFO stack and finds *a* path (not necessarily the shortest)
//! from a start to a goal. It reports every newly visited coordinate, then
//! either the path or exhaustion, to a [`SearchObserver`], so rendering stays
//! outside the algorithm and the search runs headless with `&mut ()`.
//!
//! | Item | Role |
//! |---|---|
//! | [`Pather`] | neighbor enumeration (implemented for `Grid`) |
//! | [`DepthFirst`] | reusable search engine |
//! | [`SearchObserver`] | visit / path-found / exhausted events |
//! | [`reachable`] | flood fill over the same neighbor relation |
//! | [`Context`] | optional cooperative cancellation |

mod context;
mod dfs;
mod neighbors;
mod observer;
mod reach;
mod traits;

pub use context::{Cancelled, Context};
pub use dfs::{DepthFirst, Path, dfs_path};
pub use neighbors::{CARDINAL, cardinal};
pub use observer::{Recorder, SearchEvent, SearchObserver};
pub use reach::reachable;
pub use traits::Pather;
