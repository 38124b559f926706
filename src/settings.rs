//! Settings defining what to do

/// How the parser treats brackets without a partner.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum BracketPolicy {
    /// Unbalanced brackets are a parse error.
    #[default]
    Strict,
    /// A stray `]` at top level ends the program text, and loops still open
    /// at end of input are closed there.
    Lenient,
}

/// What `,` does once the input is exhausted.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum EofBehaviour {
    /// Store 0 in the current cell.
    #[default]
    SetZero,
    /// Leave the current cell as it was.
    Unchanged,
}

/// Parser settings
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ParseSettings {
    pub brackets: BracketPolicy,
    /// Fold runs of the same command and rewrite `[-]`/`[+]` into a set.
    pub optimise: bool,
}

impl Default for ParseSettings {
    fn default() -> Self {
        Self {
            brackets: BracketPolicy::Strict,
            optimise: true,
        }
    }
}

/// C code generation settings
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct CodegenSettings {
    /// Must match what the interpreter would use for the same program.
    pub eof: EofBehaviour,
}
