//! Code generation

use std::convert::Infallible;

use crate::{
    ast::{walk_nodes, Command, Leaf, Node, Program, Visitor},
    settings::{CodegenSettings, EofBehaviour},
    tape::TAPE_LEN,
    BfNum,
};

/// Emits C source for a program.
struct CGenerator {
    out: String,
    indentation: usize,
    settings: CodegenSettings,
}

impl CGenerator {
    fn line(&mut self, code: &str) {
        self.out += indent(self.indentation).as_str();
        self.out += code;
        self.out.push('\n');
    }

    /// Emit `code` once per repetition.
    fn repeated(&mut self, code: &str, count: usize) {
        for _ in 0..count {
            self.line(code);
        }
    }

    fn prelude(&mut self) {
        self.out += "#include <stddef.h>\n#include <stdint.h>\n#include <stdio.h>\n\n";
        self.out += format!("static uint8_t tape[{TAPE_LEN}];\n").as_str();
        self.out += "static size_t ptr = 0;\n\n";
        self.out += "static void read_byte(void) {\n";
        self.out += "  fflush(stdout);\n";
        self.out += "  int c = getchar();\n";
        match self.settings.eof {
            EofBehaviour::SetZero => self.out += "  tape[ptr] = c == EOF ? 0 : (uint8_t)c;\n",
            EofBehaviour::Unchanged => {
                self.out += "  if (c != EOF) {\n    tape[ptr] = (uint8_t)c;\n  }\n"
            }
        }
        self.out += "}\n\n";
    }
}

impl<'ast> Visitor<'ast> for CGenerator {
    type Error = Infallible;

    fn visit_leaf(&mut self, leaf: &'ast Leaf) -> Result<(), Infallible> {
        let n = leaf.count;
        match leaf.command {
            Command::Increment => self.line(&format!("tape[ptr] += {};", BfNum::from(n))),
            Command::Decrement => self.line(&format!("tape[ptr] -= {};", BfNum::from(n))),
            Command::ShiftLeft => self.line(&format!("ptr -= {n};")),
            Command::ShiftRight => self.line(&format!("ptr += {n};")),
            Command::Input => self.repeated("read_byte();", n),
            Command::Output => self.repeated("putchar(tape[ptr]);", n),
            Command::ZeroSet => self.line("tape[ptr] = 0;"),
        }
        Ok(())
    }

    fn visit_loop(&mut self, body: &'ast [Node]) -> Result<(), Infallible> {
        self.line("while (tape[ptr] != 0) {");
        self.indentation += 1;
        walk_nodes(body, self)?;
        self.indentation -= 1;
        self.line("}");
        Ok(())
    }

    fn visit_program(&mut self, program: &'ast Program) -> Result<(), Infallible> {
        self.prelude();
        self.line("int main(void) {");
        self.indentation += 1;
        walk_nodes(&program.children, self)?;
        self.line("return 0;");
        self.indentation -= 1;
        self.line("}");
        Ok(())
    }
}

/// Generate C code
///
/// The generated program does not check the tape pointer against the ends of
/// the tape.
pub fn generate_c(program: &Program, settings: &CodegenSettings) -> String {
    let mut generator = CGenerator {
        out: String::new(),
        indentation: 0,
        settings: *settings,
    };
    match program.accept(&mut generator) {
        Ok(()) => generator.out,
        Err(never) => match never {},
    }
}

/// Compute the indentation string for a given indentation level.
fn indent(i: usize) -> String {
    "  ".repeat(i)
}
