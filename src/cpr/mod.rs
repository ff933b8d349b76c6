//! Course progress report core: pure functions over the subject tree and
//! its flattened rows. Nothing here touches the clock or the network.

pub mod diff;
pub mod flatten;
pub mod progress;
pub mod transition;

pub use diff::change_set;
pub use flatten::flatten;
pub use progress::{Progress, progress};
pub use transition::{is_delayed, transition};
