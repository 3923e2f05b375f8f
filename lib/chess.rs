mod candidate;
mod change;
mod color;
mod delta;
mod family;
mod file;
mod forfeits;
mod game;
mod mutation;
mod pattern;
mod piece;
mod pixel;
mod position;
mod promotion;
mod rank;
mod role;
mod rules;
mod setup;
mod square;

pub use candidate::*;
pub use change::*;
pub use color::*;
pub use delta::*;
pub use family::*;
pub use file::*;
pub use forfeits::*;
pub use game::*;
pub use pattern::*;
pub use piece::*;
pub use pixel::*;
pub use position::*;
pub use promotion::*;
pub use rank::*;
pub use role::*;
pub use rules::*;
pub use setup::*;
pub use square::*;
