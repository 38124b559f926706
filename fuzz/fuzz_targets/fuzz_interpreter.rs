#![no_main]

use brainleaf::execute;
use brainleaf::settings::EofBehaviour;
use brainleaf::tape::FixedTape;
use brainleaf::ExecuteCallbackResult;
use brainleaf::ExecutionError;
use brainleaf::TapeAddr;
use brainleaf_fuzz::{max_count, FuzzInputAST};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: FuzzInputAST| {
    let program = data.program;
    if max_count(&program) > 4096 {
        return;
    }
    let mut input = data.input;

    let mut steps = 0;
    let mut tape = FixedTape::new();
    let mut tape_ptr = TapeAddr::default();
    let mut output: Vec<u8> = Vec::new();
    let exec_result = execute(
        &program,
        &mut tape,
        &mut tape_ptr,
        &mut input,
        &mut output,
        EofBehaviour::SetZero,
        &mut |_, _, _| {
            steps += 1;
            if steps > 500 {
                ExecuteCallbackResult::Abort
            } else {
                ExecuteCallbackResult::Continue
            }
        },
    );
    match exec_result {
        Ok(_) => (),
        Err(err) => match err {
            ExecutionError::TapeError(_) => (),
            ExecutionError::IoError(_) => (),
            ExecutionError::Aborted => (),
        },
    }
    assert!(usize::from(tape_ptr) < tape.len());
});
