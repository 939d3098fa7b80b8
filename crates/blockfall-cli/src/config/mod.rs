pub use self::key_map::*;

mod key_map;
