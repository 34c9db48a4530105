pub use self::{board::*, direction::*, spawn::*};

pub(crate) mod board;
pub(crate) mod direction;
pub(crate) mod spawn;
