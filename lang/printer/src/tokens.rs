//! This module contains the symbols and keywords used when we prettyprint terms.

// Symbols
//
//

/// The symbol `∀`
pub const FORALL: &str = "∀";

/// The symbol `λ`
pub const LAMBDA: &str = "λ";

/// The symbol `$`
pub const SELF_TYPE: &str = "$";

/// The symbol `~`
pub const SELF_INST: &str = "~";

/// The symbol `#`
pub const HASH: &str = "#";

/// The symbol `?`
pub const HOLE: &str = "?";

/// The symbol `_`
pub const UNDERSCORE: &str = "_";

/// The symbol `*`
pub const TYPE: &str = "*";

/// The symbol `:`
pub const COLON: &str = ":";

/// The symbol `;`
pub const SEMI: &str = ";";

/// The symbol `,`
pub const COMMA: &str = ",";

/// The symbol `=`
pub const EQ: &str = "=";

/// The symbol `:=`
pub const COLONEQ: &str = ":=";

/// The symbol `@`
pub const AT: &str = "@";

/// The symbol `|`
pub const PIPE: &str = "|";

/// The symbol `^`
pub const LEVEL: &str = "^";

// Keywords
//
//

/// The keyword `let`
pub const LET: &str = "let";

/// The keyword `use`
pub const USE: &str = "use";

/// The keyword `get`
pub const GET: &str = "get";

/// The keyword `put`
pub const PUT: &str = "put";

/// The keyword `log`
pub const LOG: &str = "log";

/// The keyword `Map`
pub const MAP: &str = "Map";

/// The keyword `U64`
pub const U64: &str = "U64";

/// The keyword `F64`
pub const F64: &str = "F64";
