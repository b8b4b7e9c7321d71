//! Whole-pipeline scenarios driven through a `Session`, the way the
//! interactive front end uses the crate.

use sysf::emit::transpile;
use sysf::interpreter::Strategy;
use sysf::lexer::lex;
use sysf::parser::parse_entry;
use sysf::session::{Session, SessionError};
use sysf::types::TypeError;

fn run(session: &mut Session, line: &str) -> String {
    session
        .eval_line(line)
        .unwrap_or_else(|e| panic!("'{line}' failed: {e}"))
        .to_string()
}

#[test]
fn test_declarations_accumulate() {
    let mut session = Session::new();
    run(&mut session, "let two = 2");
    run(&mut session, "let three = two + 1");
    assert_eq!(run(&mut session, "two * three"), "number: 6");
}

#[test]
fn test_polymorphic_library_session() {
    let mut session = Session::new();
    assert_eq!(
        run(&mut session, r"let id = /\a. \x: a. x"),
        "forall a. a -> a: <type closure>"
    );
    assert_eq!(
        run(&mut session, r"let twice = /\a. \f: a -> a. \x: a. f (f x)"),
        "forall a. (a -> a) -> a -> a: <type closure>"
    );
    assert_eq!(
        run(&mut session, r"twice [number] (\n: number. n * 2) 3"),
        "number: 12"
    );
    assert_eq!(
        run(&mut session, "twice [bool] (id [bool]) true"),
        "bool: true"
    );
}

#[test]
fn test_recursive_declaration() {
    let mut session = Session::new();
    run(
        &mut session,
        r"let fact = fix (\f: number -> number. \n: number. if n < 1 then 1 else n * f (n - 1))",
    );
    assert_eq!(run(&mut session, "fact 5"), "number: 120");
    session.set_strategy(Strategy::Need);
    assert_eq!(run(&mut session, "fact 6"), "number: 720");
}

#[test]
fn test_strategy_switch_mid_session() {
    let mut session = Session::new();
    // Eager evaluation touches the unused argument.
    assert!(matches!(
        session.eval_line(r"(\x: number. 1) (fix (\f: number. f))"),
        Err(SessionError::Runtime(_))
    ));
    session.set_strategy(Strategy::Name);
    assert_eq!(
        run(&mut session, r"(\x: number. 1) (fix (\f: number. f))"),
        "number: 1"
    );
}

#[test]
fn test_errors_leave_the_session_usable() {
    let mut session = Session::new();
    assert!(session.eval_line("1 +").is_err());
    assert!(session.eval_line("1 + true").is_err());
    assert!(session.eval_line(r"\x:").is_err());
    assert_eq!(run(&mut session, "1 + 1"), "number: 2");
}

#[test]
fn test_duplicate_declaration() {
    let mut session = Session::new();
    run(&mut session, "let x = 1");
    assert_eq!(
        session.eval_line("let x = true"),
        Err(SessionError::Type(TypeError::duplicate_binding("x")))
    );
    assert_eq!(run(&mut session, "x"), "number: 1");
}

#[test]
fn test_fractional_and_negative_output() {
    let mut session = Session::new();
    assert_eq!(run(&mut session, "7 / 2"), "number: 3.5");
    assert_eq!(run(&mut session, "-7 + 3"), "number: -4");
    assert_eq!(run(&mut session, "1 / 0 > 100"), "bool: true");
}

#[test]
fn test_shadowing_in_nested_scopes() {
    let mut session = Session::new();
    run(&mut session, "let x = 1");
    assert_eq!(run(&mut session, "let x = 2 in x + x"), "number: 4");
    assert_eq!(run(&mut session, "x"), "number: 1");
}

#[test]
fn test_transpiled_source_for_parsed_terms() {
    let emit = |source: &str| {
        let expr = parse_entry(lex(source).expect("lexing failed")).expect("parsing failed");
        transpile(&expr).expect("transpiling failed")
    };
    assert_eq!(emit(r"(\x: number. x + 1) 2"), "(((x) => ((x) + (1)))(2))");
    assert_eq!(emit(r"(/\a. \x: a. x) [bool] true"), "(((x) => x)(true))");
    assert_eq!(
        emit("if 1 == 1 then 1 else 2"),
        "((((1) === (1))) ? (1) : (2))"
    );
}

#[test]
fn test_transpile_rejects_ill_typed_input() {
    let expr = parse_entry(lex("1 true").expect("lexing failed")).expect("parsing failed");
    assert!(transpile(&expr).is_err());
}
