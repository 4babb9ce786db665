// Whole programs and the exact text they print.

use mforth::run_forth;
use test_case::test_case;

const VARIABLES: &str = "
    variable a
    variable b
    20 a ! 80 b !
    a @ b @ * .";

const FIBONACCI: &str = "
    variable a
    variable b
    : fib
        1 b !  0 a !
        0 do
          a @ b @ +
          dup .
            b @ a !
          b !
        loop ;
    10 fib";

#[test_case("3 8 + .", "11 "; "add")]
#[test_case("3 8 swap - .", "5 "; "swap then subtract")]
#[test_case("3 8 - .", "-5 "; "subtract")]
#[test_case(": add + ; 4 8 add .", "12 "; "colon definition")]
#[test_case(": count 0 do i . loop ; 10 count", "0 1 2 3 4 5 6 7 8 9 "; "counted loop")]
#[test_case("5 6 * . cr bl emit", "30 \n "; "newline and blank")]
#[test_case(": tmp 1 if 100 else 33 then . ; tmp", "100 "; "if else true")]
#[test_case(": tmp 0 if 100 else 33 then . ; tmp", "33 "; "if else false")]
#[test_case(": tmp 88 1 if 100 then . ; tmp", "100 "; "if true")]
#[test_case(": tmp 88 0 if 100 then . ; tmp", "88 "; "if false")]
#[test_case(VARIABLES, "1600 "; "variables")]
#[test_case(FIBONACCI, "1 2 3 5 8 13 21 34 55 89 "; "fibonacci")]
#[test_case(".\" Hello, World!\" cr", "Hello, World!\n"; "print literal")]
#[test_case(": hi .\" hi\" ; : ho .\" ho\" ; hi ho hi", "hihohi"; "print literals stay distinct")]
#[test_case("s\" Forth\" .s", "Forth"; "string literal printed from memory")]
#[test_case("5 begin dup . 1- dup while repeat drop", "5 4 3 2 1 "; "begin while repeat")]
#[test_case("72 EMIT 105 Emit", "Hi"; "case insensitive words")]
#[test_case("5 0 do j . loop", "5 5 5 5 5 "; "loop limit")]
#[test_case(": star 42 emit ; : stars 0 ?do star loop ; 3 stars 0 stars", "***"; "question do")]
fn forth_output_cases(program: &str, expected: &str) {
    assert_eq!(run_forth(program).unwrap(), expected);
}

#[test]
fn postponed_words_compile_into_the_caller() {
    // The postponed `+` becomes the body of `plus`.
    let program = ": plus postpone + ; : add3 plus plus ; 1 2 3 add3 .";

    assert_eq!(run_forth(program).unwrap(), "6 ");
}

#[test]
fn postponing_an_immediate_word_runs_it_at_compile_time() {
    let program = ": mark 42 emit ; immediate : user postpone mark 1 . ; user";

    assert_eq!(run_forth(program).unwrap(), "*1 ");
}

#[test]
fn immediate_words_run_while_compiling() {
    let program = ": loud 33 emit ; immediate : quiet loud 2 . ; quiet quiet";

    assert_eq!(run_forth(program).unwrap(), "!2 2 ");
}

#[test]
fn output_before_an_error_is_kept() {
    let output = mforth::OutputBuffer::new();
    let mut interpreter = mforth::ForthInterpreter::new(Box::new(output.clone()));

    let result = mforth::CodeManagement::run_program(&mut interpreter, "1 . 2 . drop drop");

    assert!(result.is_err());
    assert_eq!(output.contents(), "1 2 ");
}
