//! Bidirectional elaboration
//!
//! Checking and inference return the elaborated term: the input with the
//! types of its subterms attached as trusted annotations.

pub mod ctx;
pub mod exprs;
mod telescope;
mod toplevel;
mod unreachable;
pub mod util;

pub use crate::result::TypeError;
pub use ctx::{Check, Ctx, Mode, PLACEHOLDER};
pub use exprs::CheckInfer;
pub use telescope::{check_constructor, check_tele};
pub use toplevel::{do_annotate, do_check, do_check_mode};
pub use unreachable::{check_unreachable, UNREACHABLE};
pub use util::{check_later, cmp};
