mod impls;
mod responses;
mod sportsbook;
mod util;

pub use self::sportsbook::*;
pub use responses::*;
pub use util::*;
