//! Evaluating source text under each of the three strategies.

use sysf::interpreter::{EvalEnv, Evaluator, RuntimeError, Strategy, Value};
use sysf::lexer::lex;
use sysf::parser::parse_entry;

const ALL: [Strategy; 3] = [Strategy::Value, Strategy::Name, Strategy::Need];

fn parse(source: &str) -> sysf::ast::Expr {
    parse_entry(lex(source).expect("lexing failed")).expect("parsing failed")
}

fn eval(strategy: Strategy, source: &str) -> Result<Value, RuntimeError> {
    Evaluator::new(strategy).evaluate(&parse(source), &EvalEnv::root())
}

fn eval_num(strategy: Strategy, source: &str) -> f64 {
    match eval(strategy, source) {
        Ok(Value::Num(n)) => n,
        other => panic!("'{source}' under {strategy}: expected a number, got {other:?}"),
    }
}

#[test]
fn test_arithmetic() {
    for strategy in ALL {
        assert_eq!(eval_num(strategy, "1 + 2 * 3 - 4"), 3.0);
        assert_eq!(eval_num(strategy, "10 / 4"), 2.5);
    }
}

#[test]
fn test_application_result_agrees_across_strategies() {
    for strategy in ALL {
        assert_eq!(eval_num(strategy, r"(\x: number. x) 5"), 5.0);
        assert_eq!(
            eval_num(strategy, r"(\x: number. \y: number. x - y) 10 4"),
            6.0
        );
    }
}

#[test]
fn test_type_application_is_erased() {
    for strategy in ALL {
        assert_eq!(eval_num(strategy, r"(/\a. \x: a. x) [number] 5"), 5.0);
    }
}

#[test]
fn test_boolean_operators() {
    assert_eq!(
        eval(Strategy::Value, "true && !false || false"),
        Ok(Value::Bool(true))
    );
    assert_eq!(
        eval(Strategy::Value, "1 < 2 == true"),
        Ok(Value::Bool(true))
    );
}

#[test]
fn test_untaken_branch_is_never_evaluated() {
    for strategy in ALL {
        assert_eq!(
            eval_num(strategy, "if true then 1 else ghost"),
            1.0,
            "under {strategy}"
        );
        assert_eq!(
            eval_num(strategy, "if false then ghost else 2"),
            2.0,
            "under {strategy}"
        );
    }
}

#[test]
fn test_unused_argument_only_fails_eagerly() {
    let source = r"(\x: number. 1) ghost";
    assert_eq!(
        eval(Strategy::Value, source),
        Err(RuntimeError::not_in_scope("ghost"))
    );
    assert_eq!(eval_num(Strategy::Name, source), 1.0);
    assert_eq!(eval_num(Strategy::Need, source), 1.0);
}

#[test]
fn test_need_evaluates_a_shared_binding_once() {
    let expr = parse("let x = 1 + 2 in x + x + x");

    let need = Evaluator::new(Strategy::Need);
    assert_eq!(need.evaluate(&expr, &EvalEnv::root()), Ok(Value::Num(9.0)));
    // One addition inside the binding, two in the body.
    assert_eq!(need.op_count(), 3);

    let name = Evaluator::new(Strategy::Name);
    assert_eq!(name.evaluate(&expr, &EvalEnv::root()), Ok(Value::Num(9.0)));
    // The binding's addition reruns at all three uses.
    assert_eq!(name.op_count(), 5);

    let value = Evaluator::new(Strategy::Value);
    assert_eq!(value.evaluate(&expr, &EvalEnv::root()), Ok(Value::Num(9.0)));
    assert_eq!(value.op_count(), 3);
}

#[test]
fn test_factorial_under_every_strategy() {
    let source = r"fix (\f: number -> number. \n: number. if n < 1 then 1 else n * f (n - 1)) 6";
    for strategy in ALL {
        assert_eq!(eval_num(strategy, source), 720.0, "under {strategy}");
    }
}

#[test]
fn test_fibonacci_under_every_strategy() {
    let source = r"fix (\f: number -> number. \n: number. if n < 2 then n else f (n - 1) + f (n - 2)) 10";
    for strategy in ALL {
        assert_eq!(eval_num(strategy, source), 55.0, "under {strategy}");
    }
}

#[test]
fn test_unconditional_recursion_is_cut_off() {
    let source = r"fix (\f: number -> number. \n: number. f n) 1";
    for strategy in ALL {
        assert_eq!(
            eval(strategy, source),
            Err(RuntimeError::StackExhausted),
            "under {strategy}"
        );
    }
}

#[test]
fn test_need_reports_cyclic_fixed_point() {
    assert_eq!(
        eval(Strategy::Need, r"fix (\f: number -> number. f)"),
        Err(RuntimeError::cyclic_force("f"))
    );
}

#[test]
fn test_closures_capture_their_definition_scope() {
    let source = r"let y = 10 in (let f = \x: number. x + y in (let y = 0 in f 1))";
    for strategy in ALL {
        assert_eq!(eval_num(strategy, source), 11.0, "under {strategy}");
    }
}

#[test]
fn test_equality_is_value_equality_for_ground_types() {
    assert_eq!(eval(Strategy::Value, "2 + 2 == 4"), Ok(Value::Bool(true)));
    assert_eq!(
        eval(Strategy::Value, "true == false"),
        Ok(Value::Bool(false))
    );
    assert_eq!(
        eval(Strategy::Value, "unit == unit"),
        Ok(Value::Bool(true))
    );
}
