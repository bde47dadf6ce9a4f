pub mod conversion_checking;
pub mod normalizer;
pub mod result;
pub mod typechecker;
pub mod unifier;

pub use conversion_checking::{equal, identical, incompatible};
pub use normalizer::{normal, reduce, Captured, Level, Output, Stdout};
pub use result::{ElabError, InternalError, TcResult, TypeError};
pub use typechecker::{do_annotate, do_check, do_check_mode, CheckInfer, Ctx, Mode};
pub use unifier::{occur, solve, unify, valid};
