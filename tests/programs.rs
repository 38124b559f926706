//! Runs every program in the programs directory and checks its output.

use std::{collections::VecDeque, env, error::Error, path::PathBuf};

use brainleaf::{
    parse_source, parse_source_with, print_source,
    settings::{BracketPolicy, ParseSettings},
    test_utils::test_execute,
};
use pretty_assertions::assert_eq;

fn find_programs() -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut path: PathBuf = env::var("CARGO_MANIFEST_DIR")?.into();
    path.push("tests");
    path.push("programs");

    let mut results = vec![];
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some("bf") = path.extension().and_then(|x| x.to_str()) {
            results.push(path);
        }
    }
    results.sort();
    Ok(results)
}

fn run_program(
    program_file: &PathBuf,
    input: Option<PathBuf>,
    expected_output: PathBuf,
) -> Result<(), Box<dyn Error>> {
    let src = std::fs::read(program_file)?;
    let out = std::fs::read(expected_output)?;
    let input: VecDeque<_> = match input {
        Some(f) => std::fs::read(f)?.into(),
        None => VecDeque::new(),
    };

    let ast = parse_source(src.as_slice())?;
    let exec1 = test_execute(&ast, &mut input.clone());
    assert_eq!(exec1.result, Some(Ok(())));
    assert_eq!(exec1.output, out);

    // The unoptimised tree must behave the same.
    let plain = parse_source_with(
        src.as_slice(),
        &ParseSettings {
            optimise: false,
            ..Default::default()
        },
    )?;
    let exec2 = test_execute(&plain, &mut input.clone());
    assert_eq!(exec1, exec2);

    // Balanced programs parse the same in lenient mode.
    let lenient = parse_source_with(
        src.as_slice(),
        &ParseSettings {
            brackets: BracketPolicy::Lenient,
            ..Default::default()
        },
    )?;
    assert_eq!(lenient, ast);

    // Printing normalises once, then is stable, and keeps the behaviour.
    let printed = print_source(&ast);
    let reparsed = parse_source(printed.as_bytes())?;
    assert_eq!(print_source(&reparsed), printed);
    let exec3 = test_execute(&reparsed, &mut input.clone());
    assert_eq!(exec1, exec3);

    Ok(())
}

#[test]
fn test_programs() {
    let programs = find_programs().unwrap();
    assert!(!programs.is_empty());
    for program in programs {
        let in_file = program.with_extension("in");
        let in_file = if in_file.exists() {
            Some(in_file)
        } else {
            None
        };
        let out_file = program.with_extension("out");
        match run_program(&program, in_file, out_file) {
            Ok(_) => (),
            Err(err) => panic!("{err:?} {program:?}"),
        }
    }
}

#[test]
fn test_print_round_trip() {
    let src = b"++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.";
    let printed = print_source(&parse_source(src).unwrap());
    assert_eq!(
        printed,
        "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.\n"
    );
    assert_eq!(print_source(&parse_source(printed.as_bytes()).unwrap()), printed);
}
