use std::rc::Rc;

use lingua::{
    ast::{Argument, ArgumentItem, ArgumentList, AssignmentExpression, Block, CallExpression,
          DeclarationStatement, ElseClause, Expression, ForClause, ForCondition, ForStatement,
          ForUpdate, FunctionBlock, GuardStatement, IfStatement, Literal, Operator, Position,
          RangeCondition, ReturnStatement, Selector, Statement, SwitchBlock, SwitchCase,
          ThrowStatement, TypeExpression, WhileStatement},
    engine::symbol::SymbolTable,
    error::EngineError,
    kernel::{
        class::{Class, Object, Signature, TypeFields},
        function::Function,
        value::{ErrorValue, IterableValue, ObjectValue, Value},
    },
};
use rustc_hash::FxHashMap;

fn pos() -> Position {
    Position::new(1, 1)
}

fn int(value: i64) -> Expression {
    Expression::Literal { value:    Literal::Integer(value),
                          position: pos(), }
}

fn num(value: f64) -> Expression {
    Expression::Literal { value:    Literal::Number(value),
                          position: pos(), }
}

fn text(value: &str) -> Expression {
    Expression::Literal { value:    Literal::String(value.to_string()),
                          position: pos(), }
}

fn sel(members: &[&str]) -> Expression {
    Expression::Selector(Selector::new(members.iter().copied(), pos()))
}

fn binary(left: Expression, operator: Operator, right: Expression) -> Expression {
    Expression::Binary { left: Box::new(left),
                         operator,
                         right: Box::new(right),
                         position: pos() }
}

fn call(target: Expression, arguments: Vec<Expression>) -> Expression {
    Expression::Call(CallExpression { target: Box::new(target),
                                      arguments,
                                      position: pos() })
}

fn let_stmt(name: &str, init: Expression) -> Statement {
    Statement::Declaration(DeclarationStatement { name: name.to_string(),
                                                  init,
                                                  position: pos() })
}

fn assign(members: &[&str], operator: Operator, init: Expression) -> Statement {
    Statement::Assignment(AssignmentExpression { name: Selector::new(members.iter().copied(),
                                                                     pos()),
                                                 operator,
                                                 init,
                                                 position: pos() })
}

fn ret(init: Expression) -> Statement {
    Statement::Return(ReturnStatement { init, position: pos() })
}

fn block(statements: Vec<Statement>) -> Block {
    Block { statements,
            position: pos() }
}

fn type_expr(name: &str) -> TypeExpression {
    TypeExpression { selector: Selector::new([name], pos()) }
}

fn case(condition: Expression, body: Vec<Statement>) -> SwitchCase {
    SwitchCase { is_default: false,
                 condition:  Some(condition),
                 body:       block(body),
                 position:   pos(), }
}

fn default_case(body: Vec<Statement>) -> SwitchCase {
    SwitchCase { is_default: true,
                 condition:  None,
                 body:       block(body),
                 position:   pos(), }
}

/// Validates and then evaluates a program, asserting the validation pass
/// accepts it first.
fn run(program: &Block, table: &SymbolTable) -> Option<Value> {
    if let Err(error) = lingua::validate(program, table) {
        panic!("validation failed: {error}");
    }
    match lingua::evaluate(program, table) {
        Ok(value) => value,
        Err(error) => panic!("evaluation failed: {error}"),
    }
}

#[test]
fn arithmetic_and_coercion() {
    let program = block(vec![let_stmt("x", int(3)),
                             let_stmt("y", binary(sel(&["x"]), Operator::Add, int(2))),
                             ret(sel(&["y"]))]);
    assert_eq!(run(&program, &SymbolTable::new()), Some(Value::Integer(5)));
}

#[test]
fn double_arithmetic_quantizes_at_every_boundary() {
    let program = block(vec![let_stmt("d",
                                      binary(call(sel(&["Double"]), vec![num(1.005)]),
                                             Operator::Add,
                                             call(sel(&["Double"]), vec![num(1.004)]))),
                             ret(sel(&["d"]))]);
    assert_eq!(run(&program, &SymbolTable::prelude()), Some(Value::Double(2.02)));
}

#[test]
fn double_comparison_after_quantization() {
    let program = block(vec![let_stmt("d", call(sel(&["Double"]), vec![num(2.011)])),
                             ret(binary(sel(&["d"]), Operator::Equals, num(2.02)))]);
    assert_eq!(run(&program, &SymbolTable::prelude()), Some(Value::Boolean(true)));
}

fn switch_program(target: i64) -> Block {
    block(vec![Statement::Switch(SwitchBlock { target:   int(target),
                                               cases:    vec![case(int(1), vec![ret(text("a"))]),
                                                              case(int(3), vec![ret(text("c"))]),
                                                              default_case(vec![ret(text("z"))])],
                                               position: pos(), })])
}

#[test]
fn switch_runs_the_first_matching_case() {
    assert_eq!(run(&switch_program(3), &SymbolTable::new()),
               Some(Value::String("c".into())));
}

#[test]
fn switch_falls_back_to_the_default_case() {
    assert_eq!(run(&switch_program(4), &SymbolTable::new()),
               Some(Value::String("z".into())));
}

#[test]
fn switch_rejects_a_second_default_case() {
    let program = block(vec![Statement::Switch(SwitchBlock { target:   int(1),
                                                             cases:    vec![default_case(vec![]),
                                                                            default_case(vec![])],
                                                             position: pos(), })]);
    let error = lingua::validate(&program, &SymbolTable::new()).unwrap_err();
    assert!(error.to_string().contains("one default block"), "{error}");
}

#[test]
fn switch_rejects_a_non_comparable_target() {
    let program = block(vec![Statement::Switch(SwitchBlock { target:   text("s"),
                                                             cases:    vec![],
                                                             position: pos(), })]);
    assert!(matches!(lingua::validate(&program, &SymbolTable::new()),
                     Err(EngineError::InoperableSwitchTarget { .. })));
}

fn seeded_iterable() -> SymbolTable {
    let mut table = SymbolTable::new();
    table.insert("xs",
                 Object::Value(Value::Iterable(IterableValue { parent: Class::Integer,
                                                               items:  vec![Value::Integer(10),
                                                                            Value::Integer(20),
                                                                            Value::Integer(30)], })));
    table
}

#[test]
fn range_loop_sums_an_iterable() {
    let body = block(vec![assign(&["s"],
                                 Operator::Assign,
                                 binary(sel(&["s"]), Operator::Add, sel(&["v"])))]);
    let program =
        block(vec![let_stmt("s", int(0)),
                   Statement::For(ForStatement { clause:   ForClause::Range(RangeCondition {
                                                     index:  "i".to_string(),
                                                     value:  "v".to_string(),
                                                     target: sel(&["xs"]),
                                                 }),
                                                 body,
                                                 position: pos(), }),
                   ret(sel(&["s"]))]);
    assert_eq!(run(&program, &seeded_iterable()), Some(Value::Integer(60)));
}

#[test]
fn range_loop_rejects_a_non_iterable_target() {
    let program =
        block(vec![Statement::For(ForStatement { clause:   ForClause::Range(RangeCondition {
                                                     index:  "i".to_string(),
                                                     value:  "v".to_string(),
                                                     target: int(5),
                                                 }),
                                                 body:     block(vec![]),
                                                 position: pos(), })]);
    assert!(matches!(lingua::validate(&program, &SymbolTable::new()),
                     Err(EngineError::NotIterable { .. })));
}

#[test]
fn conditional_for_loop_reconciles_outer_assignments() {
    let clause = ForCondition { init:      Some(DeclarationStatement { name:     "i".to_string(),
                                                                       init:     int(0),
                                                                       position: pos(), }),
                                condition: binary(sel(&["i"]), Operator::Less, int(3)),
                                update:    Some(ForUpdate::Assignment(AssignmentExpression {
                                    name:     Selector::new(["i"], pos()),
                                    operator: Operator::Inc,
                                    init:     int(1),
                                    position: pos(),
                                })), };
    let program =
        block(vec![let_stmt("s", int(0)),
                   Statement::For(ForStatement { clause:   ForClause::Condition(clause),
                                                 body:     block(vec![assign(&["s"],
                                                                             Operator::AddAssign,
                                                                             int(2))]),
                                                 position: pos(), }),
                   ret(sel(&["s"]))]);
    assert_eq!(run(&program, &SymbolTable::new()), Some(Value::Integer(6)));
}

#[test]
fn loop_declarations_die_with_the_loop() {
    let clause = ForCondition { init:      Some(DeclarationStatement { name:     "i".to_string(),
                                                                       init:     int(0),
                                                                       position: pos(), }),
                                condition: binary(sel(&["i"]), Operator::Less, int(1)),
                                update:    Some(ForUpdate::Assignment(AssignmentExpression {
                                    name:     Selector::new(["i"], pos()),
                                    operator: Operator::Inc,
                                    init:     int(1),
                                    position: pos(),
                                })), };
    let program =
        block(vec![Statement::For(ForStatement { clause:   ForClause::Condition(clause),
                                                 body:     block(vec![]),
                                                 position: pos(), }),
                   ret(sel(&["i"]))]);
    assert!(lingua::validate(&program, &SymbolTable::new()).is_err());
}

#[test]
fn while_loop_with_compound_assignments() {
    let body = block(vec![assign(&["i"], Operator::Inc, int(1)),
                          assign(&["s"], Operator::AddAssign, sel(&["i"]))]);
    let program = block(vec![let_stmt("i", int(0)),
                             let_stmt("s", int(0)),
                             Statement::While(WhileStatement { condition: binary(sel(&["i"]),
                                                                                 Operator::Less,
                                                                                 int(3)),
                                                               body,
                                                               position: pos() }),
                             ret(sel(&["s"]))]);
    assert_eq!(run(&program, &SymbolTable::new()), Some(Value::Integer(6)));
}

#[test]
fn break_ends_the_loop_as_a_direct_child() {
    let program = block(vec![let_stmt("i", int(0)),
                             Statement::While(WhileStatement { condition:
                                                                   Expression::Literal {
                                                                       value:    Literal::Boolean(true),
                                                                       position: pos(),
                                                                   },
                                                               body: block(vec![Statement::Break {
                                                                   position: pos(),
                                                               }]),
                                                               position: pos() }),
                             ret(sel(&["i"]))]);
    assert_eq!(run(&program, &SymbolTable::new()), Some(Value::Integer(0)));
}

#[test]
fn break_is_rejected_outside_a_loop() {
    let program = block(vec![Statement::Break { position: Position::new(4, 2) }]);
    let error = lingua::validate(&program, &SymbolTable::new()).unwrap_err();
    assert_eq!(error.to_string(), "4:2: break statement outside loop");
}

#[test]
fn continue_is_rejected_inside_a_nested_block() {
    let nested = IfStatement { condition: Expression::Literal { value:    Literal::Boolean(true),
                                                                position: pos(), },
                               body:      block(vec![Statement::Continue { position: pos() }]),
                               alternate: None,
                               position:  pos(), };
    let program =
        block(vec![Statement::While(WhileStatement { condition: Expression::Literal {
                                                         value:    Literal::Boolean(true),
                                                         position: pos(),
                                                     },
                                                     body:      block(vec![Statement::If(nested)]),
                                                     position:  pos(), })]);
    let error = lingua::validate(&program, &SymbolTable::new()).unwrap_err();
    assert!(error.to_string().contains("continue statement outside loop"), "{error}");
}

fn guarded_receiver() -> Value {
    let guard = Function::new(vec![Class::Integer],
                              None,
                              Rc::new(|args, _| match &args[0] {
                                  Value::Integer(n) if *n < 0 => {
                                      Err(EngineError::Thrown(ErrorValue::new("GuardError",
                                                                              "value must not be negative")))
                                  },
                                  _ => Ok(None),
                              }));
    let class = Rc::new(TypeFields { name:   Rc::from("Receiver"),
                                     fields: FxHashMap::from_iter([("guard".to_string(),
                                                                    Class::Function(Rc::new(Signature {
                                                                        arguments: vec![Class::Integer],
                                                                        returns:   None,
                                                                    })))]), });
    let mut fields = FxHashMap::default();
    fields.insert("guard".to_string(), Value::Function(guard));
    Value::Object(ObjectValue { class, fields })
}

#[test]
fn guard_failure_propagates_the_thrown_error() {
    let mut table = SymbolTable::new();
    table.pin("self", Object::Value(guarded_receiver()));
    let program = block(vec![Statement::Guard(GuardStatement { init:     int(-1),
                                                               position: pos(), })]);
    assert!(lingua::validate(&program, &table).is_ok());
    let error = lingua::evaluate(&program, &table).unwrap_err();
    assert!(error.is_thrown(), "{error}");
}

#[test]
fn guard_success_proceeds() {
    let mut table = SymbolTable::new();
    table.pin("self", Object::Value(guarded_receiver()));
    let program = block(vec![Statement::Guard(GuardStatement { init:     int(1),
                                                               position: pos(), }),
                             ret(int(7))]);
    assert_eq!(run(&program, &table), Some(Value::Integer(7)));
}

#[test]
fn guard_requires_a_receiver() {
    let program = block(vec![Statement::Guard(GuardStatement { init:     int(1),
                                                               position: pos(), })]);
    let error = lingua::validate(&program, &SymbolTable::new()).unwrap_err();
    assert!(error.to_string().contains("no guard directive"), "{error}");
}

fn function_returning_integer(alternate: Option<ElseClause>) -> FunctionBlock {
    let body = block(vec![Statement::If(IfStatement { condition: sel(&["flag"]),
                                                      body: block(vec![ret(int(1))]),
                                                      alternate: alternate.map(Box::new),
                                                      position: pos() })]);
    FunctionBlock { arguments:   ArgumentList { items:    vec![Argument::Item(ArgumentItem {
                                                    key:  "flag".to_string(),
                                                    init: type_expr("Boolean"),
                                                })],
                                                position: pos(), },
                    return_type: Some(type_expr("Integer")),
                    body,
                    position:    Position::new(2, 5), }
}

#[test]
fn uncovered_return_path_is_rejected() {
    let table = SymbolTable::prelude();
    let error = table.resolve_function_block(&function_returning_integer(None), None)
                     .unwrap_err();
    assert_eq!(error.to_string(), "2:5: expected return");
}

#[test]
fn covered_return_path_compiles_and_calls() {
    let table = SymbolTable::prelude();
    let alternate = ElseClause::Block(block(vec![ret(int(2))]));
    let function = table.resolve_function_block(&function_returning_integer(Some(alternate)),
                                                None)
                        .unwrap();
    assert_eq!(function.call(vec![Value::Boolean(true)], None).unwrap(),
               Some(Value::Integer(1)));
    assert_eq!(function.call(vec![Value::Boolean(false)], None).unwrap(),
               Some(Value::Integer(2)));
}

#[test]
fn function_calls_enforce_arity_and_coerce_arguments() {
    let table = SymbolTable::prelude();
    let node = FunctionBlock { arguments:   ArgumentList { items:    vec![Argument::Item(ArgumentItem {
                                                               key:  "n".to_string(),
                                                               init: type_expr("Number"),
                                                           })],
                                                           position: pos(), },
                               return_type: Some(type_expr("Number")),
                               body:        block(vec![ret(binary(sel(&["n"]),
                                                                  Operator::Mul,
                                                                  num(2.0)))]),
                               position:    pos(), };
    let function = table.resolve_function_block(&node, None).unwrap();
    assert_eq!(function.call(vec![Value::Integer(4)], None).unwrap(),
               Some(Value::Number(8.0)));
    assert!(function.call(vec![], None).is_err());
}

#[test]
fn destructured_arguments_bind_each_field() {
    let table = SymbolTable::prelude();
    let items = vec![ArgumentItem { key:  "x".to_string(),
                                    init: type_expr("Integer"), },
                     ArgumentItem { key:  "y".to_string(),
                                    init: type_expr("Integer"), }];
    let node = FunctionBlock { arguments:   ArgumentList { items:    vec![Argument::Object(
                                   lingua::ast::ArgumentObject { items, position: pos() },
                               )],
                                                           position: pos(), },
                               return_type: Some(type_expr("Integer")),
                               body:        block(vec![ret(binary(sel(&["x"]),
                                                                  Operator::Add,
                                                                  sel(&["y"])))]),
                               position:    pos(), };
    let function = table.resolve_function_block(&node, None).unwrap();

    let class = Rc::new(TypeFields { name:   Rc::from("Point"),
                                     fields: FxHashMap::from_iter([("x".to_string(),
                                                                    Class::Integer),
                                                                   ("y".to_string(),
                                                                    Class::Integer)]), });
    let mut fields = FxHashMap::default();
    fields.insert("x".to_string(), Value::Integer(1));
    fields.insert("y".to_string(), Value::Integer(2));
    let point = Value::Object(ObjectValue { class, fields });

    assert_eq!(function.call(vec![point], None).unwrap(), Some(Value::Integer(3)));
}

#[test]
fn selector_assignment_writes_back_through_members() {
    let class = Rc::new(TypeFields { name:   Rc::from("Counter"),
                                     fields: FxHashMap::from_iter([("count".to_string(),
                                                                    Class::Integer)]), });
    let mut fields = FxHashMap::default();
    fields.insert("count".to_string(), Value::Integer(1));
    let mut table = SymbolTable::new();
    table.insert("counter", Object::Value(Value::Object(ObjectValue { class, fields })));

    let program = block(vec![assign(&["counter", "count"], Operator::AddAssign, int(5)),
                             ret(sel(&["counter", "count"]))]);
    assert_eq!(run(&program, &table), Some(Value::Integer(6)));
}

#[test]
fn missing_members_are_reported_with_the_carrier_class() {
    let mut table = SymbolTable::new();
    table.insert("x", Object::Value(Value::Integer(1)));
    let program = block(vec![ret(sel(&["x", "missing"]))]);
    let error = lingua::validate(&program, &table).unwrap_err();
    assert!(error.to_string().contains("Integer has no member missing"), "{error}");
}

#[test]
fn declarations_cannot_shadow_or_rebind() {
    let program = block(vec![let_stmt("x", int(1)), let_stmt("x", int(2))]);
    let error = lingua::validate(&program, &SymbolTable::new()).unwrap_err();
    assert!(error.to_string().contains("cannot redeclare variable x"), "{error}");

    let program = block(vec![let_stmt("Double", int(1))]);
    let error = lingua::validate(&program, &SymbolTable::prelude()).unwrap_err();
    assert!(error.to_string().contains("cannot reassign immutable variable Double"),
            "{error}");
}

#[test]
fn assignments_cannot_target_immutable_bindings() {
    let mut table = SymbolTable::new();
    table.pin("self", Object::Value(Value::Integer(1)));
    let program = block(vec![assign(&["self"], Operator::Assign, int(2))]);
    let error = lingua::validate(&program, &table).unwrap_err();
    assert!(error.to_string().contains("cannot reassign immutable variable self"),
            "{error}");
}

#[test]
fn thrown_errors_are_distinguishable_from_structural_ones() {
    let mut table = SymbolTable::new();
    table.insert("boom", Object::Value(Value::Error(ErrorValue::new("Boom", "gone"))));
    let program = block(vec![Statement::Throw(ThrowStatement { init:     sel(&["boom"]),
                                                               position: pos(), })]);
    assert!(lingua::validate(&program, &table).is_ok());
    let error = lingua::evaluate(&program, &table).unwrap_err();
    assert!(error.is_thrown());
    assert_eq!(error.to_string(), "Boom: gone");

    let structural = block(vec![Statement::Throw(ThrowStatement { init:     int(1),
                                                                  position: pos(), })]);
    let error = lingua::validate(&structural, &table).unwrap_err();
    assert!(!error.is_thrown());
    assert!(error.to_string().contains("throw statement must be an error"), "{error}");
}

#[test]
fn string_methods_and_static_members_resolve_through_selectors() {
    let mut table = SymbolTable::prelude();
    table.insert("s", Object::Value(Value::String("Mixed".into())));

    let program = block(vec![ret(call(sel(&["s", "upper"]), vec![]))]);
    assert_eq!(run(&program, &table), Some(Value::String("MIXED".into())));

    let program = block(vec![ret(call(sel(&["s", "lower"]), vec![]))]);
    assert_eq!(run(&program, &table), Some(Value::String("mixed".into())));

    let program = block(vec![ret(call(sel(&["Date", "now"]), vec![]))]);
    let value = run(&program, &table);
    assert!(matches!(value, Some(Value::Date(_))));
}

#[test]
fn if_conditions_must_be_boolean_in_both_passes() {
    let program = block(vec![Statement::If(IfStatement { condition: int(1),
                                                         body:      block(vec![]),
                                                         alternate: None,
                                                         position:  pos(), })]);
    let error = lingua::validate(&program, &SymbolTable::new()).unwrap_err();
    assert!(error.to_string().contains("if condition must be a boolean"), "{error}");
    let error = lingua::evaluate(&program, &SymbolTable::new()).unwrap_err();
    assert!(error.to_string().contains("if condition must be a boolean"), "{error}");
}

#[test]
fn validation_leaves_the_seeded_table_untouched() {
    let table = SymbolTable::new();
    let program = block(vec![let_stmt("x", int(1))]);
    assert!(lingua::validate(&program, &table).is_ok());
    assert!(lingua::evaluate(&program, &table).is_ok());
    assert!(table.lookup("x").is_none());
}

#[test]
fn function_literals_are_values_with_a_function_class() {
    let node = FunctionBlock { arguments:   ArgumentList { items:    vec![],
                                                           position: pos(), },
                               return_type: Some(type_expr("Integer")),
                               body:        block(vec![ret(int(9))]),
                               position:    pos(), };
    let program = block(vec![let_stmt("f", Expression::FunctionLiteral(Box::new(node))),
                             ret(call(sel(&["f"]), vec![]))]);
    assert_eq!(run(&program, &SymbolTable::prelude()), Some(Value::Integer(9)));
}
