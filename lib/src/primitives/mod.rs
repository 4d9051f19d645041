pub mod card;
pub mod cardvector;
pub mod eplayerindex;
pub mod hand;
pub mod stich;

pub use card::*;
pub use eplayerindex::*;
pub use hand::*;
pub use stich::*;
