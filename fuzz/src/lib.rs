//! Fuzzing helper types

use std::collections::VecDeque;
use std::convert::Infallible;
use std::fmt::Debug;

use brainleaf::ast::{walk_nodes, Leaf, Node, Program, Visitor};

#[derive(Debug, arbitrary::Arbitrary)]
pub struct FuzzInputAST {
    pub program: Program,
    pub input: VecDeque<u8>,
}

#[derive(arbitrary::Arbitrary)]
pub struct FuzzInputSrc {
    pub code: Vec<u8>,
    pub input: VecDeque<u8>,
}

impl Debug for FuzzInputSrc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzInputSrc")
            .field("code", &String::from_utf8_lossy(&self.code))
            .field("input", &self.input)
            .finish()
    }
}

/// Finds the largest repeat count in a tree. Huge counts on I/O leaves only
/// make the fuzzer time out.
#[derive(Default)]
struct MaxCount(usize);

impl<'ast> Visitor<'ast> for MaxCount {
    type Error = Infallible;

    fn visit_leaf(&mut self, leaf: &'ast Leaf) -> Result<(), Infallible> {
        self.0 = self.0.max(leaf.count);
        Ok(())
    }

    fn visit_loop(&mut self, body: &'ast [Node]) -> Result<(), Infallible> {
        walk_nodes(body, self)
    }

    fn visit_program(&mut self, program: &'ast Program) -> Result<(), Infallible> {
        walk_nodes(&program.children, self)
    }
}

pub fn max_count(program: &Program) -> usize {
    let mut max = MaxCount::default();
    match program.accept(&mut max) {
        Ok(()) => max.0,
        Err(never) => match never {},
    }
}
