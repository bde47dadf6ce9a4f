mod book;
pub mod exp;
mod info;
pub mod traits;

pub use book::*;
pub use exp::*;
pub use info::*;
pub use traits::*;

pub type HashMap<K, V> = fxhash::FxHashMap<K, V>;
pub type HashSet<V> = fxhash::FxHashSet<V>;
