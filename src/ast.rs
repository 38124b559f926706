//! Types and functions for the AST.
//!
//! The tree is built once by the parser and then only read. Backends walk it
//! through the [`Visitor`] trait.

/// A primitive operation.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Command {
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// `<`
    ShiftLeft,
    /// `>`
    ShiftRight,
    /// `,`
    Input,
    /// `.`
    Output,
    /// Set the current cell to zero. Produced from a loop holding only an odd
    /// run of `+` or `-`; `[-]` and `[+]` are the count-1 cases.
    ZeroSet,
}

impl Command {
    /// Map a source byte to a command, if it is one.
    pub fn from_byte(c: u8) -> Option<Self> {
        match c {
            b'+' => Some(Self::Increment),
            b'-' => Some(Self::Decrement),
            b'<' => Some(Self::ShiftLeft),
            b'>' => Some(Self::ShiftRight),
            b',' => Some(Self::Input),
            b'.' => Some(Self::Output),
            _ => None,
        }
    }

    /// Source text for a single repetition of this command.
    pub fn as_source(&self) -> &'static str {
        match self {
            Self::Increment => "+",
            Self::Decrement => "-",
            Self::ShiftLeft => "<",
            Self::ShiftRight => ">",
            Self::Input => ",",
            Self::Output => ".",
            Self::ZeroSet => "[-]",
        }
    }
}

/// A command repeated `count` times.
///
/// The parser never produces a count of zero.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Leaf {
    pub command: Command,
    pub count: usize,
}

impl Leaf {
    pub fn new(command: Command, count: usize) -> Self {
        Self { command, count }
    }
}

/// A node in a program.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Node {
    Leaf(Leaf),
    /// A bracketed region, repeated while the current cell is non-zero.
    Loop(Vec<Node>),
}

/// Loops are torn down with a worklist, so dropping a deeply nested tree
/// does not recurse once per level.
impl Drop for Node {
    fn drop(&mut self) {
        let Node::Loop(body) = self else {
            return;
        };
        let mut pending = std::mem::take(body);
        while let Some(mut node) = pending.pop() {
            if let Node::Loop(inner) = &mut node {
                pending.append(inner);
            }
        }
    }
}

impl Node {
    pub fn leaf(command: Command, count: usize) -> Self {
        Self::Leaf(Leaf::new(command, count))
    }

    /// Dispatch to the handler for this node type.
    pub fn accept<'ast, V: Visitor<'ast> + ?Sized>(
        &'ast self,
        v: &mut V,
    ) -> Result<(), V::Error> {
        match self {
            Node::Leaf(leaf) => v.visit_leaf(leaf),
            Node::Loop(body) => v.visit_loop(body),
        }
    }
}

/// Root of a parsed program.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Program {
    pub children: Vec<Node>,
}

impl Program {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn accept<'ast, V: Visitor<'ast> + ?Sized>(
        &'ast self,
        v: &mut V,
    ) -> Result<(), V::Error> {
        v.visit_program(self)
    }

    /// Number of nodes in the tree, excluding the root.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending: Vec<&[Node]> = vec![self.children.as_slice()];
        while let Some(nodes) = pending.pop() {
            count += nodes.len();
            for node in nodes {
                if let Node::Loop(body) = node {
                    pending.push(body);
                }
            }
        }
        count
    }
}

/// A backend walking the AST.
///
/// Container handlers get the children and decide themselves how to walk
/// them, typically with [`walk_nodes`].
pub trait Visitor<'ast> {
    type Error;

    fn visit_leaf(&mut self, leaf: &'ast Leaf) -> Result<(), Self::Error>;
    fn visit_loop(&mut self, body: &'ast [Node]) -> Result<(), Self::Error>;
    fn visit_program(&mut self, program: &'ast Program) -> Result<(), Self::Error>;
}

/// Visit `nodes` once, in order.
pub fn walk_nodes<'ast, V: Visitor<'ast> + ?Sized>(
    nodes: &'ast [Node],
    v: &mut V,
) -> Result<(), V::Error> {
    for node in nodes {
        node.accept(v)?;
    }
    Ok(())
}
