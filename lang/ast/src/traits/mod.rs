mod bind;
mod deps;
mod metas;
mod opened;
mod replace;
mod same;
mod subst;

pub use bind::*;
pub use deps::*;
pub use metas::*;
pub use opened::*;
pub use replace::*;
pub use same::*;
pub use subst::*;
