//! Source reconstruction

use std::convert::Infallible;

use crate::ast::{walk_nodes, Leaf, Node, Program, Visitor};

/// Writes the tree back as BF source.
struct SourcePrinter {
    out: String,
}

impl<'ast> Visitor<'ast> for SourcePrinter {
    type Error = Infallible;

    fn visit_leaf(&mut self, leaf: &'ast Leaf) -> Result<(), Infallible> {
        self.out += leaf.command.as_source().repeat(leaf.count).as_str();
        Ok(())
    }

    fn visit_loop(&mut self, body: &'ast [Node]) -> Result<(), Infallible> {
        self.out.push('[');
        walk_nodes(body, self)?;
        self.out.push(']');
        Ok(())
    }

    fn visit_program(&mut self, program: &'ast Program) -> Result<(), Infallible> {
        walk_nodes(&program.children, self)?;
        self.out.push('\n');
        Ok(())
    }
}

/// Print the normalised source of a program, followed by a newline.
///
/// Comments are gone and zero loops come out as `[-]`, so the result is not
/// the input text, but parsing it again gives back the same output.
pub fn print_source(program: &Program) -> String {
    let mut printer = SourcePrinter { out: String::new() };
    match program.accept(&mut printer) {
        Ok(()) => printer.out,
        Err(never) => match never {},
    }
}
