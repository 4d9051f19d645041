pub use plain_enum::*;
pub use derive_new::new;
pub use failure::{bail, format_err, Error};
pub use schafrunde_logging::{debug, error, info, trace, warn};
pub use schafrunde_util::*;
