//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs:
//! - `let` and `return` statements
//! - Prefix/infix expressions and operator precedence
//! - `if`/`else`, blocks, function literals and calls
//! - Error accumulation and recovery

use crate::{
    ast::{
        ast::{Expression, Node, Program, Statement},
        statements::BlockStatement,
    },
    errors::errors::ErrorImpl,
    lexer::{lexer::Lexer, tokens::TokenKind},
};

use super::parser::{parse, ParseResult, Parser};

fn parse_source(source: &str) -> ParseResult {
    parse(Lexer::new(source.to_string(), Some("test.simply".to_string())))
}

fn parse_ok(source: &str) -> Program {
    let result = parse_source(source);
    assert!(
        result.is_ok(),
        "unexpected errors for {:?}: {:?}",
        source,
        result.error_messages()
    );
    result.program
}

fn single_expression(source: &str) -> Expression {
    let program = parse_ok(source);
    assert_eq!(program.len(), 1, "expected one statement in {:?}", source);

    match &program.statements[0] {
        Statement::Expression(stmt) => stmt.expression.clone(),
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

fn assert_identifier(expression: &Expression, name: &str) {
    match expression {
        Expression::Identifier(identifier) => {
            assert_eq!(identifier.value, name);
            assert_eq!(identifier.token_value(), name);
        }
        other => panic!("expected identifier {}, got {:?}", name, other),
    }
}

fn assert_integer(expression: &Expression, value: i64) {
    match expression {
        Expression::Integer(integer) => assert_eq!(integer.value, value),
        other => panic!("expected integer {}, got {:?}", value, other),
    }
}

fn block_identifier(block: &BlockStatement, name: &str) {
    assert_eq!(block.len(), 1);
    match &block.statements[0] {
        Statement::Expression(stmt) => assert_identifier(&stmt.expression, name),
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_let_statement() {
    let program = parse_ok("let x = 5;");

    assert_eq!(program.len(), 1);
    match &program.statements[0] {
        Statement::Let(stmt) => {
            assert_eq!(stmt.token_value(), "let");
            assert_eq!(stmt.name.value, "x");
            assert_integer(&stmt.value, 5);
        }
        other => panic!("expected let statement, got {:?}", other),
    }
}

#[test]
fn test_parse_let_statements() {
    let program = parse_ok("let x = 5; let y = true; let foobar = y;");
    let names: Vec<&str> = program
        .statements()
        .iter()
        .map(|stmt| match stmt {
            Statement::Let(stmt) => stmt.name.value.as_str(),
            other => panic!("expected let statement, got {:?}", other),
        })
        .collect();

    assert_eq!(names, vec!["x", "y", "foobar"]);
    assert_eq!(program.to_string(), "let x = 5; let y = true; let foobar = y;");
}

#[test]
fn test_parse_let_with_expression_value() {
    let program = parse_ok("let total = a + b * 2;");

    match &program.statements[0] {
        Statement::Let(stmt) => assert_eq!(stmt.value.to_string(), "(a + (b * 2))"),
        other => panic!("expected let statement, got {:?}", other),
    }
}

#[test]
fn test_parse_return_statement() {
    let program = parse_ok("return 5; return x + 1;");

    assert_eq!(program.len(), 2);
    match &program.statements[1] {
        Statement::Return(stmt) => {
            assert_eq!(stmt.token_value(), "return");
            assert_eq!(stmt.value.to_string(), "(x + 1)");
        }
        other => panic!("expected return statement, got {:?}", other),
    }
}

#[test]
fn test_parse_identifier_expression() {
    assert_identifier(&single_expression("foobar;"), "foobar");
}

#[test]
fn test_parse_integer_literal() {
    let expression = single_expression("5;");
    assert_integer(&expression, 5);
    assert_eq!(expression.token_value(), "5");
}

#[test]
fn test_parse_boolean_literals() {
    for (source, expected) in [("true;", true), ("false", false)] {
        match single_expression(source) {
            Expression::Boolean(boolean) => assert_eq!(boolean.value, expected),
            other => panic!("expected boolean, got {:?}", other),
        }
    }
}

#[test]
fn test_parse_prefix_expressions() {
    for (source, operator, operand) in [("!5;", "!", "5"), ("-15;", "-", "15"), ("!true", "!", "true")] {
        match single_expression(source) {
            Expression::Prefix(prefix) => {
                assert_eq!(prefix.operator, operator);
                assert_eq!(prefix.right.to_string(), operand);
            }
            other => panic!("expected prefix expression, got {:?}", other),
        }
    }
}

#[test]
fn test_parse_infix_expressions() {
    let operators = ["+", "-", "*", "/", "<", ">", "==", "!="];

    for operator in operators {
        let source = format!("5 {} 6;", operator);
        match single_expression(&source) {
            Expression::Infix(infix) => {
                assert_eq!(infix.operator, operator);
                assert_eq!(infix.token_value(), operator);
                assert_integer(&infix.left, 5);
                assert_integer(&infix.right, 6);
            }
            other => panic!("expected infix expression, got {:?}", other),
        }
    }
}

#[test]
fn test_operator_precedence() {
    let cases = [
        ("3 + 4 * 5", "(3 + (4 * 5))"),
        ("-3 - 5", "((-3) - 5)"),
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("a * b * c", "((a * b) * c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b / c", "(a + (b / c))"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        ("3 + 4 * 5 == 3 * 1 + 4 * 5", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))"),
        ("true", "true"),
        ("3 > 5 == false", "((3 > 5) == false)"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
        ("2 / (5 + 5)", "(2 / (5 + 5))"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("!(true == true)", "(!(true == true))"),
        ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
        ("add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))", "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))"),
        ("add(a + b + c * d / f + g)", "add((((a + b) + ((c * d) / f)) + g))"),
    ];

    for (source, expected) in cases {
        let program = parse_ok(source);
        assert_eq!(program.to_string(), expected, "source: {}", source);
    }
}

#[test]
fn test_parse_if_expression() {
    match single_expression("if (x < y) { x }") {
        Expression::If(expr) => {
            assert_eq!(expr.token_value(), "if");
            assert_eq!(expr.condition.to_string(), "(x < y)");
            block_identifier(&expr.consequence, "x");
            assert!(expr.alternative.is_none());
        }
        other => panic!("expected if expression, got {:?}", other),
    }
}

#[test]
fn test_parse_if_else_expression() {
    match single_expression("if (x < y) { x } else { y }") {
        Expression::If(expr) => {
            block_identifier(&expr.consequence, "x");
            let alternative = expr.alternative.as_ref().expect("alternative block");
            block_identifier(alternative, "y");
        }
        other => panic!("expected if expression, got {:?}", other),
    }
}

#[test]
fn test_parse_if_with_statements_in_blocks() {
    let expression = single_expression("if (a) { let b = 1; return b; } else { }");

    match &expression {
        Expression::If(expr) => {
            assert_eq!(expr.consequence.len(), 2);
            assert!(matches!(expr.consequence.statements[0], Statement::Let(_)));
            assert!(matches!(expr.consequence.statements[1], Statement::Return(_)));
            assert!(expr.alternative.as_ref().unwrap().is_empty());
        }
        other => panic!("expected if expression, got {:?}", other),
    }
    assert_eq!(
        expression.to_string(),
        "if (a) { let b = 1; return b; } else { }"
    );
}

#[test]
fn test_parse_block_statement() {
    let program = parse_ok("{ x; y }");

    match &program.statements[0] {
        Statement::Block(block) => {
            assert_eq!(block.token_value(), "{");
            let rendered: Vec<String> = block.iter().map(|stmt| stmt.to_string()).collect();
            assert_eq!(rendered, vec!["x", "y"]);
        }
        other => panic!("expected block statement, got {:?}", other),
    }
}

#[test]
fn test_parse_function_literal() {
    match single_expression("fn(x, y) { x + y; }") {
        Expression::Function(function) => {
            let parameters: Vec<&str> = function
                .parameters
                .iter()
                .map(|parameter| parameter.value.as_str())
                .collect();
            assert_eq!(parameters, vec!["x", "y"]);
            assert_eq!(function.body.len(), 1);
            assert_eq!(function.body.statements[0].to_string(), "(x + y)");
        }
        other => panic!("expected function literal, got {:?}", other),
    }
}

#[test]
fn test_parse_function_parameters() {
    let cases: [(&str, Vec<&str>); 4] = [
        ("fn() {};", vec![]),
        ("fn(x) {};", vec!["x"]),
        ("fn(x, y, z) {};", vec!["x", "y", "z"]),
        ("function(a) { a }", vec!["a"]),
    ];

    for (source, expected) in cases {
        match single_expression(source) {
            Expression::Function(function) => {
                let parameters: Vec<&str> = function
                    .parameters
                    .iter()
                    .map(|parameter| parameter.value.as_str())
                    .collect();
                assert_eq!(parameters, expected, "source: {}", source);
            }
            other => panic!("expected function literal, got {:?}", other),
        }
    }
}

#[test]
fn test_parse_call_expression() {
    match single_expression("add(1, 2 * 3, 4 + 5);") {
        Expression::Call(call) => {
            assert_eq!(call.token_value(), "(");
            assert_identifier(&call.function, "add");
            assert_eq!(call.arguments.len(), 3);
            assert_integer(&call.arguments[0], 1);
            assert_eq!(call.arguments[1].to_string(), "(2 * 3)");
            assert_eq!(call.arguments[2].to_string(), "(4 + 5)");
        }
        other => panic!("expected call expression, got {:?}", other),
    }
}

#[test]
fn test_parse_immediately_invoked_function() {
    let program = parse_ok("fn(x) { x }(5)");
    assert_eq!(program.to_string(), "fn(x) { x }(5)");
}

#[test]
fn test_semicolons_optional_after_expressions() {
    let program = parse_ok("x\ny;\nz");
    assert_eq!(program.len(), 3);
    assert_eq!(program.to_string(), "x; y; z");
}

#[test]
fn test_empty_input() {
    for source in ["", "   ", "\n\t"] {
        let result = parse_source(source);
        assert!(result.is_ok());
        assert!(result.program.is_empty());
    }
}

#[test]
fn test_let_missing_assignment() {
    let result = parse_source("let x 5;");

    assert!(!result.errors.is_empty());
    assert_eq!(
        result.error_messages()[0],
        "expected next token to be =, got INT (5) instead"
    );
    assert_eq!(
        result.errors[0].get_error(),
        &ErrorImpl::UnexpectedPeek {
            expected: TokenKind::Assignment,
            found: String::from("INT (5)"),
        }
    );
    // The failed let yields nothing; parsing resumes on the following tokens
    assert!(result
        .program
        .statements()
        .iter()
        .all(|stmt| !matches!(stmt, Statement::Let(_))));
}

#[test]
fn test_let_errors_accumulate() {
    let result = parse_source("let = 10; let 838383; let x = 1;");

    let messages = result.error_messages();
    assert!(messages.len() >= 2);
    assert_eq!(messages[0], "expected next token to be IDENT, got = instead");
    assert!(messages.contains(&String::from(
        "expected next token to be IDENT, got INT (838383) instead"
    )));
    assert!(result
        .program
        .statements()
        .iter()
        .any(|stmt| stmt.to_string() == "let x = 1;"));
}

#[test]
fn test_let_requires_semicolon() {
    let result = parse_source("let x = 5");

    assert_eq!(
        result.error_messages(),
        vec!["expected next token to be ;, got EOF instead"]
    );
    assert!(result.program.is_empty());
}

#[test]
fn test_return_without_value() {
    let result = parse_source("return;");

    assert_eq!(
        result.error_messages()[0],
        "no prefix parse function for ; found"
    );
}

#[test]
fn test_no_prefix_parse_fn() {
    let result = parse_source("let x = @;");

    assert_eq!(
        result.error_messages()[0],
        "no prefix parse function for ILLEGAL (@) found"
    );
}

#[test]
fn test_missing_operand() {
    let result = parse_source("5 +");

    assert_eq!(
        result.error_messages(),
        vec!["no prefix parse function for EOF found"]
    );
}

#[test]
fn test_integer_overflow() {
    let result = parse_source("92233720368547758070");

    assert_eq!(
        result.error_messages(),
        vec!["could not parse \"92233720368547758070\" as integer"]
    );

    // i64::MAX itself is fine
    assert_integer(&single_expression("9223372036854775807"), i64::MAX);
}

#[test]
fn test_if_missing_paren() {
    let result = parse_source("if x { y }");

    assert_eq!(
        result.error_messages()[0],
        "expected next token to be (, got IDENT (x) instead"
    );
}

#[test]
fn test_unterminated_block() {
    let result = parse_source("if (x) { y");

    assert_eq!(
        result.error_messages(),
        vec!["unterminated block, expected } before end of input"]
    );
    assert_eq!(result.errors[0].get_position().0, 10);

    // End of input closes the block and the if is kept
    assert_eq!(result.program.len(), 1);
    assert_eq!(result.program.to_string(), "if (x) { y }");
}

#[test]
fn test_unterminated_function_body() {
    let result = parse_source("fn(a) { let b = a;");

    assert_eq!(
        result.error_messages(),
        vec!["unterminated block, expected } before end of input"]
    );
    assert_eq!(result.program.to_string(), "fn(a) { let b = a; }");
}

#[test]
fn test_unterminated_nested_blocks() {
    let result = parse_source("{ if (a) { b");

    assert_eq!(
        result.error_messages(),
        vec![
            "unterminated block, expected } before end of input",
            "unterminated block, expected } before end of input",
        ]
    );
    assert_eq!(result.program.to_string(), "{ if (a) { b } }");
}

#[test]
fn test_unclosed_call() {
    let result = parse_source("add(1, 2");

    assert_eq!(
        result.error_messages(),
        vec!["expected next token to be ), got EOF instead"]
    );
}

#[test]
fn test_bad_function_parameter() {
    let result = parse_source("fn(x, 1) { x }");

    assert_eq!(
        result.error_messages()[0],
        "expected next token to be IDENT, got INT (1) instead"
    );
}

#[test]
fn test_error_positions() {
    let result = parse_source("let x 5;");
    assert_eq!(result.errors[0].get_position().0, 6);

    let result = parse_source("1 + ;");
    assert_eq!(result.errors[0].get_position().0, 4);
}

#[test]
fn test_parser_cursor() {
    let mut parser = Parser::new(Lexer::new("let x".to_string(), None));

    assert_eq!(parser.current_token_kind(), TokenKind::Let);
    assert_eq!(parser.peek_token_kind(), TokenKind::Identifier);

    // A mismatch leaves the cursor where it was
    assert!(parser.expect_peek(TokenKind::Assignment).is_err());
    assert_eq!(parser.current_token_kind(), TokenKind::Let);

    let token = parser.expect_peek(TokenKind::Identifier).unwrap();
    assert_eq!(token.value, "x");
    assert_eq!(parser.current_token().value, "x");
    assert_eq!(parser.peek_token_kind(), TokenKind::EOF);

    let previous = parser.advance();
    assert_eq!(previous.value, "x");
    assert_eq!(parser.current_token_kind(), TokenKind::EOF);
    parser.advance();
    assert_eq!(parser.current_token_kind(), TokenKind::EOF);
}

#[test]
fn test_parse_program_resets_errors() {
    let mut parser = Parser::new(Lexer::new("let 1;".to_string(), None));

    parser.parse_program();
    assert_eq!(parser.errors().len(), 1);

    // Input is exhausted, so a second pass records nothing new
    let program = parser.parse_program();
    assert!(program.is_empty());
    assert!(parser.errors().is_empty());
}

#[test]
fn test_node_token_values() {
    let program = parse_ok("let f = function(a) { a }; f(1)");

    assert_eq!(program.token_value(), "let");
    match &program.statements[0] {
        Statement::Let(stmt) => assert_eq!(stmt.value.token_value(), "function"),
        other => panic!("expected let statement, got {:?}", other),
    }
    assert_eq!(program.statements[1].token_value(), "f");
    assert_eq!(program.to_string(), "let f = function(a) { a }; f(1)");
}

#[test]
fn test_round_trip() {
    let sources = [
        "let x = 5; return x;",
        "-a * b + !c == d < e",
        "if (x < y) { x } else { y }",
        "if (a) { if (b) { c } }; d",
        "let add = fn(a, b) { return a + b; }; add(1, 2 * 3)",
        "fn() { }()",
        "{ let a = 1; a } (a)",
        "x (y)",
        "f(g)(h)",
        "!!true != false",
    ];

    for source in sources {
        let first = parse_ok(source).to_string();
        let second = parse_ok(&first).to_string();
        assert_eq!(first, second, "source: {}", source);
    }
}
