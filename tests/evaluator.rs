use std::{cell::RefCell, rc::Rc};

use numera::{
    ast::{BinaryOperator, Builtin, ComparisonOperator, Node},
    interpreter::{evaluator::core::Evaluator, symbol::SymbolTable},
};

#[test]
fn numeric_literals_evaluate_to_themselves() {
    let mut evaluator = Evaluator::new();

    for value in [0.0, 1.5, -3.25, 1e300] {
        assert_eq!(evaluator.eval(&Node::number(value, 1)).unwrap(), value);
    }
}

#[test]
fn lookup_returns_the_same_cell_for_the_same_name() {
    let mut table = SymbolTable::new();

    let a = table.lookup("a");
    let b = table.lookup("b");

    assert!(Rc::ptr_eq(&a, &table.lookup("a")));
    assert!(!Rc::ptr_eq(&a, &b));
}

#[test]
fn assignment_stores_and_returns_the_value() {
    let mut table = SymbolTable::new();
    let mut evaluator = Evaluator::new();
    let s = table.lookup("s");

    let tree = Node::assign(Rc::clone(&s), Node::number(8.5, 1), 1);

    assert_eq!(evaluator.eval(&tree).unwrap(), 8.5);
    assert_eq!(s.borrow().value, 8.5);
    assert_eq!(evaluator.eval(&Node::variable(s, 1)).unwrap(), 8.5);
}

#[test]
fn comparison_nodes_yield_one_or_zero() {
    let mut evaluator = Evaluator::new();

    let holds = Node::compare(ComparisonOperator::Less,
                              Node::number(2.0, 1),
                              Node::number(3.0, 1),
                              1);
    let fails = Node::compare(ComparisonOperator::Equal,
                              Node::number(2.0, 1),
                              Node::number(3.0, 1),
                              1);

    assert_eq!(evaluator.eval(&holds).unwrap(), 1.0);
    assert_eq!(evaluator.eval(&fails).unwrap(), 0.0);
}

#[test]
fn if_evaluates_only_the_taken_branch() {
    let mut table = SymbolTable::new();
    let mut evaluator = Evaluator::new();
    let taken = table.lookup("taken");
    let other = table.lookup("other");

    let tree = Node::if_else(Node::number(0.0, 1),
                             Some(Node::assign(Rc::clone(&taken), Node::number(1.0, 1), 1)),
                             Some(Node::assign(Rc::clone(&other), Node::number(1.0, 1), 1)),
                             1);

    assert_eq!(evaluator.eval(&tree).unwrap(), 1.0);
    assert_eq!(taken.borrow().value, 0.0);
    assert_eq!(other.borrow().value, 1.0);
}

#[test]
fn if_without_branches_yields_zero() {
    let mut evaluator = Evaluator::new();

    let no_then = Node::if_else(Node::number(1.0, 1), None, Some(Node::number(9.0, 1)), 1);
    let no_else = Node::if_else(Node::number(0.0, 1), Some(Node::number(9.0, 1)), None, 1);

    assert_eq!(evaluator.eval(&no_then).unwrap(), 0.0);
    assert_eq!(evaluator.eval(&no_else).unwrap(), 0.0);
}

#[test]
fn while_with_false_condition_never_runs_its_body() {
    let mut table = SymbolTable::new();
    let mut evaluator = Evaluator::new();
    let flag = table.lookup("flag");

    let body = Node::assign(Rc::clone(&flag), Node::number(1.0, 1), 1);
    let tree = Node::while_do(Node::number(0.0, 1), Some(body), 1);

    assert_eq!(evaluator.eval(&tree).unwrap(), 0.0);
    assert_eq!(flag.borrow().value, 0.0);
}

#[test]
fn while_without_body_skips_the_condition() {
    let mut table = SymbolTable::new();
    let mut evaluator = Evaluator::new();
    let probe = table.lookup("probe");

    let condition = Node::assign(Rc::clone(&probe), Node::number(1.0, 1), 1);
    let tree = Node::while_do(condition, None, 1);

    assert_eq!(evaluator.eval(&tree).unwrap(), 0.0);
    assert_eq!(probe.borrow().value, 0.0);
}

#[test]
fn while_yields_the_last_body_value() {
    let mut table = SymbolTable::new();
    let mut evaluator = Evaluator::new();
    let i = table.lookup("i");

    // while i < 3 do i = i + 1
    let condition = Node::compare(ComparisonOperator::Less,
                                  Node::variable(Rc::clone(&i), 1),
                                  Node::number(3.0, 1),
                                  1);
    let body = Node::assign(Rc::clone(&i),
                            Node::binary(BinaryOperator::Add,
                                         Node::variable(Rc::clone(&i), 1),
                                         Node::number(1.0, 1),
                                         1),
                            1);
    let tree = Node::while_do(condition, Some(body), 1);

    assert_eq!(evaluator.eval(&tree).unwrap(), 3.0);
    assert_eq!(i.borrow().value, 3.0);
}

#[test]
fn division_by_zero_follows_ieee_semantics() {
    let mut evaluator = Evaluator::new();

    let divide = |l: f64, r: f64| {
        Node::binary(BinaryOperator::Div, Node::number(l, 1), Node::number(r, 1), 1)
    };

    assert_eq!(evaluator.eval(&divide(1.0, 0.0)).unwrap(), f64::INFINITY);
    assert_eq!(evaluator.eval(&divide(-1.0, 0.0)).unwrap(), f64::NEG_INFINITY);
    assert!(evaluator.eval(&divide(0.0, 0.0)).unwrap().is_nan());
}

#[test]
fn sequences_yield_their_second_value() {
    let mut table = SymbolTable::new();
    let mut evaluator = Evaluator::new();
    let a = table.lookup("a");

    // a = 2; a + 1
    let tree = Node::sequence(Node::assign(Rc::clone(&a), Node::number(2.0, 1), 1),
                              Node::binary(BinaryOperator::Add,
                                           Node::variable(a, 1),
                                           Node::number(1.0, 1),
                                           1),
                              1);

    assert_eq!(evaluator.eval(&tree).unwrap(), 3.0);
}

#[test]
fn releasing_a_tree_drops_its_symbol_handles() {
    let mut table = SymbolTable::new();
    let x = table.lookup("x");
    let baseline = Rc::strong_count(&x);

    let tree = Node::binary(BinaryOperator::Add,
                            Node::variable(table.lookup("x"), 1),
                            Node::variable(table.lookup("x"), 1),
                            1);
    assert_eq!(Rc::strong_count(&x), baseline + 2);

    drop(tree);
    assert_eq!(Rc::strong_count(&x), baseline);
}

#[test]
fn print_emits_and_returns_its_value() {
    let printed = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&printed);
    let mut evaluator = Evaluator::with_print(move |v| sink.borrow_mut().push(v));

    let tree = Node::builtin_call(Builtin::Print, Node::number(6.5, 1), 1);

    assert_eq!(evaluator.eval(&tree).unwrap(), 6.5);
    assert_eq!(*printed.borrow(), vec![6.5]);
}

#[test]
fn user_call_binds_evaluates_and_restores() {
    let mut table = SymbolTable::new();
    let mut evaluator = Evaluator::new();

    let x = table.lookup("x");
    x.borrow_mut().value = 7.0;

    // let sq(x) = x * x
    let body = Node::binary(BinaryOperator::Mul,
                            Node::variable(Rc::clone(&x), 1),
                            Node::variable(Rc::clone(&x), 1),
                            1);
    let sq = table.define_function("sq", vec![Rc::clone(&x)], body);

    let call = Node::user_call(sq, vec![Node::number(4.0, 2)], 2);

    assert_eq!(evaluator.eval(&call).unwrap(), 16.0);
    assert_eq!(x.borrow().value, 7.0);
}

#[test]
fn define_function_replaces_the_previous_body() {
    let mut table = SymbolTable::new();
    let mut evaluator = Evaluator::new();
    let x = table.lookup("x");

    table.define_function("f", vec![Rc::clone(&x)], Node::variable(Rc::clone(&x), 1));
    let f = table.define_function("f",
                                  vec![Rc::clone(&x)],
                                  Node::binary(BinaryOperator::Mul,
                                               Node::variable(Rc::clone(&x), 2),
                                               Node::number(10.0, 2),
                                               2));

    let call = Node::user_call(f, vec![Node::number(3.0, 3)], 3);
    assert_eq!(evaluator.eval(&call).unwrap(), 30.0);
}

#[test]
fn calling_a_symbol_without_a_body_is_an_error() {
    let mut table = SymbolTable::new();
    let mut evaluator = Evaluator::new();

    let call = Node::user_call(table.lookup("ghost"), Vec::new(), 4);

    assert!(evaluator.eval(&call).is_err());
}
