#[macro_use]
pub mod if_dbg_else;
pub use self::if_dbg_else::*;
#[macro_use]
pub mod verify;
pub use self::verify::*;
#[macro_use]
pub mod mutate_return;
pub use self::mutate_return::*;
pub mod parser;
pub use self::parser::*;
