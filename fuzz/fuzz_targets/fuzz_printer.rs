#![no_main]

use brainleaf::{parse_source, print_source, test_utils::test_execute, ExecutionError};
use brainleaf_fuzz::FuzzInputSrc;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: FuzzInputSrc| {
    let Ok(program) = parse_source(&data.code) else {
        return;
    };
    let printed = print_source(&program);
    let reparsed = parse_source(printed.as_bytes()).unwrap();
    assert_eq!(print_source(&reparsed), printed);

    let exec1 = test_execute(&program, &mut data.input.clone());
    let exec2 = test_execute(&reparsed, &mut data.input.clone());
    match (&exec1.result, &exec2.result) {
        // Step counts differ between the two trees, so the limit can hit
        // at different points.
        (Some(Err(ExecutionError::Aborted)), _) | (_, Some(Err(ExecutionError::Aborted))) => (),
        _ => assert_eq!(exec1, exec2),
    }
});
