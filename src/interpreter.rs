use std::io::Read;
use std::io::Write;

use thiserror::Error;

use crate::ast::*;
use crate::settings::EofBehaviour;
use crate::tape::FixedTape;
use crate::BfNum;
use crate::TapeAddr;
use crate::TapeAddrError;

/// Error type for execution
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// Tape pointer error.
    #[error("Tape pointer error: {0}")]
    TapeError(#[from] TapeAddrError),
    /// Io error during program execution.
    #[error("Unexpected IO Error: {0}")]
    IoError(#[from] std::io::Error),
    /// Aborted by callback
    #[error("Callback aborted execution")]
    Aborted,
}

impl PartialEq for ExecutionError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::IoError(l0), Self::IoError(r0)) => l0.kind() == r0.kind(),
            (Self::TapeError(l0), Self::TapeError(r0)) => l0 == r0,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

/// Data sent to execution callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExecuteCallbackData<'program> {
    /// We are about to execute a leaf
    Leaf(&'program Leaf),
    /// We are starting an iteration of a loop
    InLoop,
}

/// Reply type for callback
pub enum ExecuteCallbackResult {
    /// Continue execution
    Continue,
    /// Abort execution
    Abort,
}

/// Tree walking interpreter. Borrows the machine state for one run.
struct Interpreter<'a, R, W, F> {
    tape: &'a mut FixedTape,
    tape_ptr: &'a mut TapeAddr,
    input: &'a mut R,
    output: &'a mut W,
    eof: EofBehaviour,
    callback: &'a mut F,
}

impl<'a, 'program, R, W, F> Interpreter<'a, R, W, F>
where
    R: Read,
    W: Write,
    F: FnMut(ExecuteCallbackData<'program>, &FixedTape, &TapeAddr) -> ExecuteCallbackResult,
{
    fn notify(&mut self, data: ExecuteCallbackData<'program>) -> Result<(), ExecutionError> {
        match (self.callback)(data, &*self.tape, &*self.tape_ptr) {
            ExecuteCallbackResult::Continue => Ok(()),
            ExecuteCallbackResult::Abort => Err(ExecutionError::Aborted),
        }
    }

    fn read_cell(&mut self) -> Result<(), ExecutionError> {
        let mut tmp: [u8; 1] = [0; 1];
        // We may need to flush output here if there wasn't a newline.
        self.output.flush()?;
        let n_bytes = self.input.read(&mut tmp)?;
        if n_bytes != 0 {
            self.tape.try_set(*self.tape_ptr, tmp[0].into())?;
        } else if self.eof == EofBehaviour::SetZero {
            self.tape.try_set(*self.tape_ptr, BfNum::default())?;
        }
        Ok(())
    }
}

impl<'a, 'program, R, W, F> Visitor<'program> for Interpreter<'a, R, W, F>
where
    R: Read,
    W: Write,
    F: FnMut(ExecuteCallbackData<'program>, &FixedTape, &TapeAddr) -> ExecuteCallbackResult,
{
    type Error = ExecutionError;

    fn visit_leaf(&mut self, leaf: &'program Leaf) -> Result<(), ExecutionError> {
        self.notify(ExecuteCallbackData::Leaf(leaf))?;
        let ptr = *self.tape_ptr;
        match leaf.command {
            Command::Increment => self.tape.try_modify(ptr, leaf.count.into())?,
            Command::Decrement => {
                self.tape
                    .try_modify(ptr, BfNum::default() - BfNum::from(leaf.count))?;
            }
            Command::ShiftLeft => *self.tape_ptr = ptr.shift_left(leaf.count)?,
            Command::ShiftRight => {
                *self.tape_ptr = ptr.shift_right(leaf.count, self.tape.len())?;
            }
            Command::Input => {
                for _ in 0..leaf.count {
                    self.read_cell()?;
                }
            }
            Command::Output => {
                let tmp: [u8; 1] = [self.tape.try_get(ptr)?.into()];
                for _ in 0..leaf.count {
                    self.output.write_all(&tmp)?;
                }
            }
            Command::ZeroSet => self.tape.try_set(ptr, BfNum::default())?,
        }
        Ok(())
    }

    fn visit_loop(&mut self, body: &'program [Node]) -> Result<(), ExecutionError> {
        while !self.tape.try_get(*self.tape_ptr)?.is_zero() {
            self.notify(ExecuteCallbackData::InLoop)?;
            walk_nodes(body, self)?;
        }
        Ok(())
    }

    fn visit_program(&mut self, program: &'program Program) -> Result<(), ExecutionError> {
        self.tape.clear();
        *self.tape_ptr = TapeAddr::default();
        walk_nodes(&program.children, self)?;
        self.output.flush()?;
        Ok(())
    }
}

/// Run a program.
///
/// The tape is cleared and the pointer reset before the first instruction.
/// Both are left in their final state afterwards, also on error.
pub fn execute<'program, R: Read, W: Write, F>(
    program: &'program Program,
    tape: &mut FixedTape,
    tape_ptr: &mut TapeAddr,
    input: &mut R,
    output: &mut W,
    eof: EofBehaviour,
    callback: &mut F,
) -> Result<(), ExecutionError>
where
    F: FnMut(ExecuteCallbackData<'program>, &FixedTape, &TapeAddr) -> ExecuteCallbackResult,
{
    let mut interpreter = Interpreter {
        tape,
        tape_ptr,
        input,
        output,
        eof,
        callback,
    };
    program.accept(&mut interpreter)
}
