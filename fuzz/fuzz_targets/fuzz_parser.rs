#![no_main]

use libfuzzer_sys::fuzz_target;

use brainleaf::{
    parse_source, parse_source_with,
    settings::{BracketPolicy, ParseSettings},
    ParseError,
};

/// Reference bracket matcher, reporting the same positions as the parser.
fn check_loop_balance(data: &[u8]) -> Option<ParseError> {
    let mut open = vec![];
    for (pos, c) in data.iter().enumerate() {
        match c {
            b'[' => open.push(pos),
            b']' => {
                if open.pop().is_none() {
                    return Some(ParseError::UnmatchedLoopEnd { position: pos });
                }
            }
            _ => (),
        }
    }
    open.pop().map(|position| ParseError::UnterminatedLoop { position })
}

fuzz_target!(|data: &[u8]| {
    let strict = parse_source(data);
    assert_eq!(strict.as_ref().err().copied(), check_loop_balance(data));

    // Lenient parsing never fails, and agrees on balanced input.
    let lenient = parse_source_with(
        data,
        &ParseSettings {
            brackets: BracketPolicy::Lenient,
            ..Default::default()
        },
    )
    .unwrap();
    if let Ok(program) = strict {
        assert_eq!(program, lenient);
    }
});
