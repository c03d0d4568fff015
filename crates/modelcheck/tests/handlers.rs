//! Built-in handlers against a single property `p`.

use modelcheck::{Model, RulesMap};
use serde_json::{Value, json};

struct Fixture {
    rule: &'static str,
    param: Value,
    correct: Vec<Value>,
    incorrect: Vec<Value>,
}

fn fixtures() -> Vec<Fixture> {
    vec![
        Fixture {
            rule: "required",
            param: json!(true),
            correct: vec![json!("req1"), json!(0), json!(false)],
            incorrect: vec![Value::Null, json!(""), json!("   ")],
        },
        Fixture {
            rule: "minlength",
            param: json!(4),
            correct: vec![json!("abcd")],
            incorrect: vec![json!("abc")],
        },
        Fixture {
            rule: "maxlength",
            param: json!(6),
            correct: vec![json!("abcdef")],
            incorrect: vec![json!("abcdefg")],
        },
        Fixture {
            rule: "min",
            param: json!(11),
            correct: vec![json!(11), json!(12)],
            incorrect: vec![json!(10)],
        },
        Fixture {
            rule: "max",
            param: json!(6),
            correct: vec![json!(6)],
            incorrect: vec![json!(7)],
        },
        Fixture {
            rule: "pattern",
            param: json!("^[A-Z]{2}-\\d+$"),
            correct: vec![json!("AB-12")],
            incorrect: vec![json!("ab-12"), json!("AB12")],
        },
        Fixture {
            rule: "email",
            param: json!(true),
            correct: vec![json!("a@b.c"), json!("first.last+tag@example.co.uk")],
            incorrect: vec![json!("a@"), json!("@b.c"), json!("a b@c.d")],
        },
        Fixture {
            rule: "url",
            param: json!(true),
            correct: vec![json!("http://example.com"), json!("ftp://10.0.0.1/pub")],
            incorrect: vec![json!("mailto:a@b.c"), json!("http://")],
        },
        Fixture {
            rule: "number",
            param: json!(true),
            correct: vec![json!("1,234.5"), json!("-.5"), json!(42)],
            incorrect: vec![json!("1.2.3"), json!("12a")],
        },
        Fixture {
            rule: "digits",
            param: json!(true),
            correct: vec![json!("007"), json!(7)],
            incorrect: vec![json!("7.0"), json!("x")],
        },
        Fixture {
            rule: "creditcard",
            param: json!(true),
            correct: vec![json!("370000000000002"), json!("4111-1111-1111-1111")],
            incorrect: vec![json!("5424180832"), json!("4111.1111.1111.1111")],
        },
    ]
}

#[test]
fn incorrect_values_fail_with_the_rule_message() {
    for fixture in fixtures() {
        let model = Model::base().extend(RulesMap::new().rule("p", fixture.rule, fixture.param.clone()));
        let expected = model.error_message(fixture.rule, Some(&fixture.param));
        for value in &fixture.incorrect {
            let errors = model
                .validate(&json!({ "p": value }))
                .expect("no config error")
                .unwrap_or_else(|| panic!("{} accepted {value}", fixture.rule));
            assert_eq!(errors.len(), 1);
            assert_eq!(errors["p"], [expected.clone()], "{} on {value}", fixture.rule);
        }
    }
}

#[test]
fn correct_values_pass() {
    for fixture in fixtures() {
        let model = Model::base().extend(RulesMap::new().rule("p", fixture.rule, fixture.param));
        for value in &fixture.correct {
            let outcome = model.validate(&json!({ "p": value })).expect("no config error");
            assert!(outcome.is_none(), "{} rejected {value}: {outcome:?}", fixture.rule);
        }
    }
}

#[test]
fn only_required_rejects_absent_values() {
    for fixture in fixtures() {
        let model = Model::base().extend(RulesMap::new().rule("p", fixture.rule, fixture.param));
        let outcome = model.validate(&json!({})).expect("no config error");
        assert_eq!(outcome.is_some(), fixture.rule == "required", "{}", fixture.rule);
    }
}
