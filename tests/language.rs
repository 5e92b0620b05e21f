use std::fs;

use numera::run_source;
use walkdir::WalkDir;

fn eval_script(src: &str) -> Option<f64> {
    run_source(src, false).unwrap_or_else(|e| panic!("Script failed: {e}\nScript: {src:?}"))
}

fn assert_value(src: &str, expected: f64) {
    match eval_script(src) {
        Some(value) => assert_eq!(value, expected, "wrong value for {src:?}"),
        None => panic!("Script produced no value: {src:?}"),
    }
}

fn assert_failure(src: &str) {
    if run_source(src, false).is_ok() {
        panic!("Script succeeded but was expected to fail: {src:?}")
    }
}

#[test]
fn arithmetic_and_precedence() {
    assert_value("1 + 2", 3.0);
    assert_value("2 + 3 * 4", 14.0);
    assert_value("(2 + 3) * 4", 20.0);
    assert_value("10 / 4", 2.5);
    assert_value("7 - 2 - 1", 4.0);
}

#[test]
fn unary_minus_and_absolute_value() {
    assert_value("-5 + 8", 3.0);
    assert_value("--4", 4.0);
    assert_value("|3 - 5|", 2.0);
    assert_value("-|2 - 6|", -4.0);
}

#[test]
fn assignment_chains_and_yields_its_value() {
    assert_value("a = 3; a = a + 1; a", 4.0);
    assert_value("a = b = 5; a + b", 10.0);
    assert_value("(x = 6) + 1", 7.0);
}

#[test]
fn comparisons_yield_one_or_zero() {
    assert_value("3 > 2", 1.0);
    assert_value("2 > 3", 0.0);
    assert_value("2 < 3", 1.0);
    assert_value("2 <= 2", 1.0);
    assert_value("3 >= 4", 0.0);
    assert_value("2 == 2", 1.0);
    assert_value("2 <> 3", 1.0);
    assert_value("2 <> 2", 0.0);
}

#[test]
fn arithmetic_follows_ieee_semantics() {
    assert_eq!(eval_script("1 / 0"), Some(f64::INFINITY));
    assert_eq!(eval_script("-1 / 0"), Some(f64::NEG_INFINITY));
    assert!(eval_script("0 / 0").is_some_and(f64::is_nan));
    assert!(eval_script("sqrt(-1)").is_some_and(f64::is_nan));
    assert_eq!(eval_script("log(0)"), Some(f64::NEG_INFINITY));
}

#[test]
fn builtin_functions() {
    assert_value("sqrt(9)", 3.0);
    assert_value("exp(0)", 1.0);
    assert_value("log(1)", 0.0);

    let value = eval_script("log(exp(2))").expect("no value");
    assert!((value - 2.0).abs() < 1e-12);
}

#[test]
fn print_returns_its_value() {
    assert_value("print(7) + 1", 8.0);
    assert_value("x = print(2) + 1; x", 3.0);
}

#[test]
fn if_selects_a_branch() {
    assert_value("if 1 then 7; else 11;", 7.0);
    assert_value("if 0 then 7; else 11;", 11.0);
    assert_value("if 3 < 5 then 1;", 1.0);
    assert_value("if 0 then 7;", 0.0);
    assert_value("if 1 then else 9;", 0.0);
}

#[test]
fn while_loops() {
    assert_value("a = 0; while a < 5 do a = a + 1;", 5.0);
    assert_value("while 0 > 1 do 42;", 0.0);
    assert_value("i = 10\ntotal = 0\nwhile i > 0 do total = total + i; i = i - 1\ntotal",
                 55.0);
}

#[test]
fn user_defined_functions_and_calls() {
    assert_value("let sq(x) = x * x\nsq(4)", 16.0);
    assert_value("let avg(a, b) = (a + b) / 2\navg(3, 5)", 4.0);
    assert_value("let f(x) = y = x * 2; y + 1\nf(3)", 7.0);
}

#[test]
fn definitions_produce_no_value() {
    assert_eq!(eval_script("let g(x) = x"), None);
}

#[test]
fn redefinition_replaces_the_old_body() {
    assert_value("let f(x) = x + 1\nlet f(x) = x * 10\nf(2)", 20.0);
}

#[test]
fn recursive_functions() {
    assert_value("let fact(n) = if n <= 1 then 1; else n * fact(n - 1);\nfact(5)",
                 120.0);
    assert_value("let fib(n) = if n < 2 then n; else fib(n - 1) + fib(n - 2);\nfib(10)",
                 55.0);
}

#[test]
fn parameters_are_restored_after_a_call() {
    assert_value("n = 10\nlet double(n) = n * 2\ndouble(3) + n", 16.0);
}

#[test]
fn functions_can_mutate_globals() {
    assert_value("x = 1\nlet setx(v) = x = v\nsetx(99); x", 99.0);
}

#[test]
fn missing_arguments_keep_the_parameter_value() {
    assert_value("b = 100\nlet add2(a, b) = a + b\nadd2(1)", 101.0);
}

#[test]
fn excess_arguments_are_not_evaluated() {
    assert_value("t = 0\nlet one(x) = x\none(5, t = 99); t", 0.0);
}

#[test]
fn unset_variables_read_as_zero() {
    assert_value("q + 1", 1.0);
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    assert_value("// nothing here\n\nx = 2 // set x\nx * 2", 4.0);
}

#[test]
fn calling_an_undefined_function_is_an_error() {
    assert_failure("foo(1)");
}

#[test]
fn unbounded_recursion_is_reported() {
    assert_failure("let inf(x) = inf(x + 1)\ninf(0)");
}

#[test]
fn builtin_names_are_reserved() {
    assert_failure("let sqrt(x) = x");
    assert_failure("sqrt = 3");
    assert_failure("sqrt(1, 2)");
    assert_failure("print");
}

#[test]
fn malformed_input_is_an_error() {
    assert_failure("1 +");
    assert_failure("(1 + 2");
    assert_failure("|1 + 2");
    assert_failure("1 2");
    assert_failure("let f = 3");
    assert_failure("a < b < c");
    assert_failure("$");
}

#[test]
fn demo_scripts_run() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "num"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = run_source(&content, false) {
            panic!("Demo script {path:?} failed:\nError: {e}");
        }
    }

    assert!(count > 0, "No demo scripts found in demos/");
}
