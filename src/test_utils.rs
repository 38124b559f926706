use crate::{
    ast::Program, settings::EofBehaviour, tape::FixedTape, ExecuteCallbackResult, ExecutionError,
    TapeAddr,
};

/// Steps (leaves plus loop iterations) before a test run is aborted.
pub const STEP_LIMIT: usize = 500000;

#[derive(Debug, Default, PartialEq)]
pub struct ExecutionState {
    pub result: Option<Result<(), ExecutionError>>,
    pub tape: FixedTape,
    pub tape_ptr: TapeAddr,
    pub output: Vec<u8>,
}

pub fn test_execute(program: &Program, input: &mut impl std::io::Read) -> ExecutionState {
    test_execute_with(program, input, EofBehaviour::default())
}

/// Run `program` against an in-memory output, aborting after
/// [`STEP_LIMIT`] steps.
pub fn test_execute_with(
    program: &Program,
    input: &mut impl std::io::Read,
    eof: EofBehaviour,
) -> ExecutionState {
    let mut steps = 0;
    let mut exec = ExecutionState::default();
    exec.result = Some(crate::execute(
        program,
        &mut exec.tape,
        &mut exec.tape_ptr,
        input,
        &mut exec.output,
        eof,
        &mut |_, _, _| {
            steps += 1;
            if steps > STEP_LIMIT {
                ExecuteCallbackResult::Abort
            } else {
                ExecuteCallbackResult::Continue
            }
        },
    ));

    exec
}
