use thiserror::Error;
use tracing::debug;

use crate::ast::*;
use crate::settings::{BracketPolicy, ParseSettings};

/// Tokens in source file
#[derive(Debug, PartialEq, Clone, Copy)]
enum Token {
    Command(Command),
    BeginLoop,
    EndLoop,
    /// Any other byte. Kept so that it can break up runs of commands.
    Comment,
}

/// Parses source code, producing a stream of tokens with their byte offsets.
fn lexer(source_code: &'_ [u8]) -> impl Iterator<Item = (usize, Token)> + '_ {
    source_code.iter().enumerate().map(|(pos, c)| {
        let token = match c {
            b'[' => Token::BeginLoop,
            b']' => Token::EndLoop,
            _ => Command::from_byte(*c).map_or(Token::Comment, Token::Command),
        };
        (pos, token)
    })
}

/// Errors during parsing
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ParseError {
    /// A `[` without matching `]`.
    #[error("Loop starting at byte {position} is never closed")]
    UnterminatedLoop { position: usize },
    /// A `]` without matching `[`.
    #[error("End of loop (]) at byte {position} without matching start")]
    UnmatchedLoopEnd { position: usize },
}

/// A container being filled by the parser. The parser has a stack of these
/// for dealing with loops.
#[derive(Debug)]
struct ParseState {
    children: Vec<Node>,
    /// Offset of the `[` that opened this container
    start: usize,
}

impl ParseState {
    fn new(start: usize) -> Self {
        Self {
            children: vec![],
            start,
        }
    }

    /// Append a finished loop, replacing it with a set if it is a zero loop.
    fn push_loop(&mut self, body: Vec<Node>, optimise: bool) {
        // Only odd steps are guaranteed to reach zero: [--] on an odd cell
        // never terminates.
        let is_zero_loop = optimise
            && matches!(
                body.as_slice(),
                [Node::Leaf(Leaf {
                    command: Command::Increment | Command::Decrement,
                    count,
                })] if count % 2 == 1
            );
        if is_zero_loop {
            self.children.push(Node::leaf(Command::ZeroSet, 1));
        } else {
            self.children.push(Node::Loop(body));
        }
    }
}

/// Build AST.
///
/// Runs of the same command are folded and zero loops rewritten here already,
/// unless disabled in the settings.
fn build_ast(
    tokens: impl Iterator<Item = (usize, Token)>,
    settings: &ParseSettings,
) -> Result<Program, ParseError> {
    let mut tokens = tokens.peekable();
    let mut current = ParseState::new(0);
    // Enclosing containers of `current`, outermost first.
    let mut outer: Vec<ParseState> = vec![];

    while let Some((pos, token)) = tokens.next() {
        match token {
            Token::Comment => (),
            Token::Command(cmd) => {
                let mut count = 1;
                if settings.optimise {
                    while tokens.next_if(|(_, next)| *next == token).is_some() {
                        count += 1;
                    }
                }
                current.children.push(Node::leaf(cmd, count));
            }
            Token::BeginLoop => {
                outer.push(std::mem::replace(&mut current, ParseState::new(pos)));
            }
            Token::EndLoop => match outer.pop() {
                Some(parent) => {
                    let body = std::mem::replace(&mut current, parent);
                    current.push_loop(body.children, settings.optimise);
                }
                None => match settings.brackets {
                    BracketPolicy::Strict => {
                        return Err(ParseError::UnmatchedLoopEnd { position: pos })
                    }
                    BracketPolicy::Lenient => {
                        debug!(position = pos, "unmatched ], ignoring rest of input");
                        break;
                    }
                },
            },
        }
    }

    while let Some(parent) = outer.pop() {
        if settings.brackets == BracketPolicy::Strict {
            return Err(ParseError::UnterminatedLoop {
                position: current.start,
            });
        }
        debug!(position = current.start, "closing unterminated loop");
        let body = std::mem::replace(&mut current, parent);
        current.push_loop(body.children, settings.optimise);
    }
    Ok(Program::new(current.children))
}

/// Parse source code into AST with default settings
pub fn parse_source(source_code: &[u8]) -> Result<Program, ParseError> {
    parse_source_with(source_code, &ParseSettings::default())
}

/// Parse source code into AST
pub fn parse_source_with(
    source_code: &[u8],
    settings: &ParseSettings,
) -> Result<Program, ParseError> {
    let program = build_ast(lexer(source_code), settings)?;
    debug!(
        source_len = source_code.len(),
        nodes = program.node_count(),
        "parsed program"
    );
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::{parse_source, parse_source_with, ParseError};
    use crate::ast::{Command, Node, Program};
    use crate::settings::{BracketPolicy, ParseSettings};

    const LENIENT: ParseSettings = ParseSettings {
        brackets: BracketPolicy::Lenient,
        optimise: true,
    };

    #[test]
    fn simple_parse() {
        parse_source(b"++>->,>.").unwrap();
        parse_source(b"++>->,>.>[-]").unwrap();
        parse_source(b"++>->,>.>[-[+>]]").unwrap();
        assert_eq!(parse_source(b"").unwrap(), Program::default());
        assert_eq!(parse_source(b"no commands here").unwrap(), Program::default());
    }

    #[test]
    fn test_run_length_folding() {
        assert_eq!(
            parse_source(b"+++").unwrap(),
            Program::new(vec![Node::leaf(Command::Increment, 3)])
        );
        assert_eq!(
            parse_source(b">>--<.,,").unwrap(),
            Program::new(vec![
                Node::leaf(Command::ShiftRight, 2),
                Node::leaf(Command::Decrement, 2),
                Node::leaf(Command::ShiftLeft, 1),
                Node::leaf(Command::Output, 1),
                Node::leaf(Command::Input, 2),
            ])
        );
        // Only directly adjacent bytes fold
        assert_eq!(
            parse_source(b"+ +").unwrap(),
            Program::new(vec![
                Node::leaf(Command::Increment, 1),
                Node::leaf(Command::Increment, 1),
            ])
        );
    }

    #[test]
    fn test_zero_loop() {
        let zero = Program::new(vec![Node::leaf(Command::ZeroSet, 1)]);
        assert_eq!(parse_source(b"[-]").unwrap(), zero);
        assert_eq!(parse_source(b"[+]").unwrap(), zero);
        assert_eq!(parse_source(b"[---]").unwrap(), zero);
        assert_eq!(
            parse_source(b">[[-]]").unwrap(),
            Program::new(vec![
                Node::leaf(Command::ShiftRight, 1),
                Node::Loop(vec![Node::leaf(Command::ZeroSet, 1)]),
            ])
        );
        // An even step may never reach zero
        assert_eq!(
            parse_source(b"[--]").unwrap(),
            Program::new(vec![Node::Loop(vec![Node::leaf(Command::Decrement, 2)])])
        );
        assert_eq!(
            parse_source(b"[>]").unwrap(),
            Program::new(vec![Node::Loop(vec![Node::leaf(Command::ShiftRight, 1)])])
        );
        assert_eq!(
            parse_source(b"[-+]").unwrap(),
            Program::new(vec![Node::Loop(vec![
                Node::leaf(Command::Decrement, 1),
                Node::leaf(Command::Increment, 1),
            ])])
        );
        assert_eq!(parse_source(b"[]").unwrap(), Program::new(vec![Node::Loop(vec![])]));
    }

    #[test]
    fn test_no_optimise() {
        let settings = ParseSettings {
            optimise: false,
            ..Default::default()
        };
        assert_eq!(
            parse_source_with(b"++[-]", &settings).unwrap(),
            Program::new(vec![
                Node::leaf(Command::Increment, 1),
                Node::leaf(Command::Increment, 1),
                Node::Loop(vec![Node::leaf(Command::Decrement, 1)]),
            ])
        );
    }

    #[test]
    fn test_strict_brackets() {
        assert_eq!(
            parse_source(b"++>->,>.>[-]]"),
            Err(ParseError::UnmatchedLoopEnd { position: 12 })
        );
        assert_eq!(
            parse_source(b"++>->,>.>[-]["),
            Err(ParseError::UnterminatedLoop { position: 12 })
        );
        assert_eq!(
            parse_source(b"[[]"),
            Err(ParseError::UnterminatedLoop { position: 0 })
        );
        assert_eq!(
            parse_source(b"]["),
            Err(ParseError::UnmatchedLoopEnd { position: 0 })
        );
    }

    #[test]
    fn test_lenient_brackets() {
        // Everything after a stray ] is dropped
        assert_eq!(
            parse_source_with(b"+]+++[", &LENIENT).unwrap(),
            Program::new(vec![Node::leaf(Command::Increment, 1)])
        );
        // Open loops get closed at the end, zero loop rewrite still applies
        assert_eq!(
            parse_source_with(b"+[>[-", &LENIENT).unwrap(),
            Program::new(vec![
                Node::leaf(Command::Increment, 1),
                Node::Loop(vec![
                    Node::leaf(Command::ShiftRight, 1),
                    Node::leaf(Command::ZeroSet, 1),
                ]),
            ])
        );
        // Balanced input parses the same either way
        assert_eq!(
            parse_source_with(b"+[>+<-]", &LENIENT),
            parse_source(b"+[>+<-]")
        );
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 100_000;
        let mut src = "[".repeat(depth);
        src.push('>');
        src.push_str(&"]".repeat(depth));
        let program = parse_source(src.as_bytes()).unwrap();
        assert_eq!(program.node_count(), depth + 1);
        drop(program);
    }

    #[test]
    fn test_deep_nesting_error() {
        // The partly built tree is thrown away on the error path too.
        let depth = 100_000;
        let mut src = String::from("[");
        src.push_str(&"[".repeat(depth));
        src.push_str(&"]".repeat(depth));
        assert_eq!(
            parse_source(src.as_bytes()),
            Err(ParseError::UnterminatedLoop { position: 0 })
        );
    }
}
