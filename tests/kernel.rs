use lingua::{
    ast::Operator,
    error::EngineError,
    kernel::{
        class::{Class, ClassKey, Object},
        dispatch::{construct, operate, should_construct, should_operate},
        value::{ErrorValue, Value},
    },
};

#[test]
fn primitive_construction_is_the_identity() {
    for value in [Value::Boolean(true),
                  Value::String("abc".into()),
                  Value::Number(2.5),
                  Value::Integer(7),
                  Value::Float(1.25),
                  Value::Double(2.25)]
    {
        assert_eq!(construct(&value.class(), &value).unwrap(), value);
    }
}

#[test]
fn nil_constructs_from_nothing() {
    assert!(matches!(construct(&Class::Nil, &Value::Nil),
                     Err(EngineError::Construct { .. })));
    assert!(should_construct(&Class::Nil, &Class::Nil).is_err());
}

#[test]
fn double_construction_rounds_up_to_two_decimals() {
    assert_eq!(construct(&Class::Double, &Value::Number(1.005)).unwrap(),
               Value::Double(1.01));
    assert_eq!(construct(&Class::Double, &Value::Number(1.004)).unwrap(),
               Value::Double(1.01));
    assert_eq!(construct(&Class::Double, &Value::Number(2.0)).unwrap(), Value::Double(2.0));
    assert_eq!(construct(&Class::Double, &Value::Integer(3)).unwrap(), Value::Double(3.0));
}

#[test]
fn integer_construction_truncates() {
    assert_eq!(construct(&Class::Integer, &Value::Number(9.99)).unwrap(), Value::Integer(9));
    assert_eq!(construct(&Class::Integer, &Value::Double(4.5)).unwrap(), Value::Integer(4));
}

#[test]
fn string_constructs_textually_from_the_numeric_family() {
    assert_eq!(construct(&Class::String, &Value::Number(5.0)).unwrap(),
               Value::String("5".into()));
    assert_eq!(construct(&Class::String, &Value::Integer(42)).unwrap(),
               Value::String("42".into()));
    assert_eq!(construct(&Class::String, &Value::Boolean(true)).unwrap(),
               Value::String("true".into()));
    assert!(construct(&Class::String, &Value::Nil).is_err());
}

#[test]
fn arithmetic_results_keep_the_left_operand_class() {
    let operands = [Value::Number(6.0), Value::Integer(6), Value::Float(6.0), Value::Double(6.0)];
    for left in &operands {
        for right in &operands {
            let result = operate(Operator::Add, left, right).unwrap();
            assert_eq!(result.class(), left.class(), "{left:?} + {right:?}");
            let result = operate(Operator::Less, left, right).unwrap();
            assert_eq!(result.class(), Class::Boolean, "{left:?} < {right:?}");
        }
    }
}

#[test]
fn numeric_operators_cover_the_token_set() {
    assert_eq!(operate(Operator::Sub, &Value::Integer(7), &Value::Integer(2)).unwrap(),
               Value::Integer(5));
    assert_eq!(operate(Operator::Mul, &Value::Number(1.5), &Value::Integer(4)).unwrap(),
               Value::Number(6.0));
    assert_eq!(operate(Operator::Pwr, &Value::Integer(2), &Value::Integer(10)).unwrap(),
               Value::Integer(1024));
    assert_eq!(operate(Operator::Quo, &Value::Integer(7), &Value::Integer(2)).unwrap(),
               Value::Integer(3));
    assert_eq!(operate(Operator::Rem, &Value::Integer(7), &Value::Integer(4)).unwrap(),
               Value::Integer(3));
}

#[test]
fn comparisons_coerce_across_the_numeric_family() {
    assert_eq!(operate(Operator::Equals, &Value::Integer(3), &Value::Number(3.0)).unwrap(),
               Value::Boolean(true));
    assert_eq!(operate(Operator::GreaterEqual, &Value::Double(2.5), &Value::Integer(2)).unwrap(),
               Value::Boolean(true));
    assert_eq!(operate(Operator::NotEquals, &Value::Float(1.5), &Value::Integer(1)).unwrap(),
               Value::Boolean(true));
}

#[test]
fn boolean_comparators_are_conjunction_and_disjunction() {
    assert_eq!(operate(Operator::And, &Value::Boolean(true), &Value::Boolean(false)).unwrap(),
               Value::Boolean(false));
    assert_eq!(operate(Operator::Or, &Value::Boolean(true), &Value::Boolean(false)).unwrap(),
               Value::Boolean(true));
    assert!(matches!(operate(Operator::Equals, &Value::Boolean(true), &Value::Boolean(true)),
                     Err(EngineError::Operator { .. })));
}

#[test]
fn operating_on_non_operable_classes_fails() {
    let error = operate(Operator::Add,
                        &Value::String("a".into()),
                        &Value::String("b".into())).unwrap_err();
    assert_eq!(error.to_string(), "no operator rule for String + String");
    assert!(should_operate(Operator::Add, &Class::String, &Class::String).is_err());
}

#[test]
fn static_dispatch_mirrors_runtime_dispatch() {
    assert!(should_construct(&Class::Number, &Class::Integer).is_ok());
    assert!(should_construct(&Class::Integer, &Class::String).is_err());
    assert!(should_operate(Operator::Rem, &Class::Float, &Class::Double).is_ok());
    assert!(should_operate(Operator::And, &Class::Boolean, &Class::Boolean).is_ok());
    assert!(should_operate(Operator::And, &Class::Boolean, &Class::Integer).is_err());
}

#[test]
fn generic_accepts_anything() {
    assert!(should_construct(&Class::Generic, &Class::String).is_ok());
    assert_eq!(construct(&Class::Generic, &Value::Integer(1)).unwrap(), Value::Integer(1));
}

#[test]
fn class_identity_is_by_name() {
    assert_eq!(Class::Integer, Class::Integer);
    assert_ne!(Class::Integer, Class::Number);
    assert_eq!(Class::Iterable(Box::new(Class::Integer)).key(),
               ClassKey::Iterable(Box::new(ClassKey::Integer)));
    assert_eq!(Class::Iterable(Box::new(Class::Integer)).name(), "[Integer]");
}

#[test]
fn error_values_expose_name_and_message() {
    let value = Value::Error(ErrorValue::new("Boom", "gone"));
    assert_eq!(value.get("name"), Some(Object::Value(Value::String("Boom".into()))));
    assert_eq!(value.get("message"), Some(Object::Value(Value::String("gone".into()))));
    assert_eq!(value.get("detail"), None);
}

#[test]
fn dates_expose_a_static_now() {
    let Some(Object::Value(Value::Function(now))) = Class::Date.get("now") else {
        panic!("Date has no static now");
    };
    assert!(matches!(now.call(vec![], None).unwrap(), Some(Value::Date(_))));

    let Some(Object::Value(Value::Function(now))) = Class::DateTime.get("now") else {
        panic!("DateTime has no static now");
    };
    assert!(matches!(now.call(vec![], None).unwrap(), Some(Value::DateTime(_))));
}
