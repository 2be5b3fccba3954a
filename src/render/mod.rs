pub mod animator;
pub mod canvas;
pub mod layout;
pub mod list;
pub mod view;

pub use layout::{RaceLayout, RacerId, Selection};
pub use view::RaceView;
