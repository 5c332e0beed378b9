use super::*;
use crate::ast::Ast;
use crate::lexer::tokenize;

// Helper function to parse input straight from a string
fn parse_str(input: &str) -> Result<Ast, ParseError> {
    let tokens = tokenize(input).expect("test input should tokenize");
    Parser::new(&tokens).parse_program()
}

fn first_body(ast: &Ast) -> NodeId {
    let root = ast.root().unwrap();
    let function = ast.children(root)[0];
    ast.children_of_kind(function, NodeKind::Body).next().unwrap()
}

fn body_expressions(ast: &Ast) -> Vec<NodeId> {
    ast.children_of_kind(first_body(ast), NodeKind::Expression)
        .collect()
}

#[test]
fn test_parse_simple_function() {
    let ast = parse_str("f(x){ x; }").unwrap();

    let expected = "\
Program
  Function
    BasicValue `f`
    Params
      Terminal `(`
      BasicValue `x`
      Terminal `)`
    Body
      Terminal `{`
      Expression
        BasicValue `x`
      Terminal `;`
      Terminal `}`
";
    assert_eq!(ast.render(), expected);
}

#[test]
fn test_parse_several_functions() {
    let ast = parse_str("a(){ 1; } b(){ 2; } main(){ b(); }").unwrap();
    let root = ast.root().unwrap();

    assert_eq!(ast.kind(root), NodeKind::Program);
    assert_eq!(ast.children(root).len(), 3);
    assert!(
        ast.children(root)
            .iter()
            .all(|function| ast.kind(*function) == NodeKind::Function)
    );
}

#[test]
fn test_parse_bare_params() {
    let ast = parse_str("add x y { x + y; }").unwrap();
    let root = ast.root().unwrap();
    let function = ast.children(root)[0];
    let params = ast.children_of_kind(function, NodeKind::Params).next().unwrap();

    let names: Vec<_> = ast
        .children_of_kind(params, NodeKind::BasicValue)
        .map(|id| ast.token(id).unwrap().text.clone())
        .collect();
    assert_eq!(names, vec!["x", "y"]);
}

#[test]
fn test_parse_parenthesized_params() {
    let ast = parse_str("add(x, y){ x + y; }").unwrap();
    let root = ast.root().unwrap();
    let function = ast.children(root)[0];
    let params = ast.children_of_kind(function, NodeKind::Params).next().unwrap();

    assert_eq!(ast.children_of_kind(params, NodeKind::BasicValue).count(), 2);
    assert_eq!(ast.children(params).len(), 5);
}

#[test]
fn test_empty_program_fails() {
    let err = parse_str("").unwrap_err();
    assert!(err.found.is_none());
    assert_eq!(err.expected, vec![TokenKind::Identifier]);

    assert!(parse_str("  \n ").is_err());
}

#[test]
fn test_empty_body_fails() {
    let err = parse_str("main(){ }").unwrap_err();
    assert_eq!(err.found.unwrap().kind, TokenKind::RBrace);
}

#[test]
fn test_missing_semicolon_fails() {
    assert!(parse_str("main(){ 1 }").is_err());
    assert!(parse_str("main(){ 1; 2 }").is_err());
}

#[test]
fn test_trailing_tokens_fail() {
    let err = parse_str("main(){ 1; } }").unwrap_err();
    assert_eq!(err.found.unwrap().span, 13..14);
}

#[test]
fn test_error_at_end_of_file() {
    let err = parse_str("main(){ 1;").unwrap_err();
    assert!(err.found.is_none());
    assert_eq!(err.span, 10..10);
    assert!(err.expected.contains(&TokenKind::RBrace));
}

#[test]
fn test_binary_operators_are_right_associative() {
    let ast = parse_str("f(){ 10 - 3 - 2; }").unwrap();
    let expressions = body_expressions(&ast);
    assert_eq!(expressions.len(), 1);

    // 10 (- (3 (- 2)))
    let outer = ast.children(expressions[0]);
    assert_eq!(ast.token(outer[0]).unwrap().text, "10");
    assert_eq!(ast.kind(outer[1]), NodeKind::BinaryOperator);

    let operation = ast.children(outer[1]);
    assert!(ast.node(operation[0]).is_token(TokenKind::Minus));

    let inner = ast.children(operation[1]);
    assert_eq!(ast.token(inner[0]).unwrap().text, "3");
    assert_eq!(ast.kind(inner[1]), NodeKind::BinaryOperator);

    let innermost = ast.children(inner[1]);
    let last = ast.children(innermost[1]);
    assert_eq!(last.len(), 1);
    assert_eq!(ast.token(last[0]).unwrap().text, "2");
}

#[test]
fn test_parse_function_call_arguments_are_flat() {
    let ast = parse_str("main(){ f(1, x, g()); }").unwrap();
    let expressions = body_expressions(&ast);
    let call = ast.children(expressions[0])[0];
    assert_eq!(ast.kind(call), NodeKind::FunctionCall);

    let arguments = ast.children_of_kind(call, NodeKind::Arguments).next().unwrap();
    let kinds: Vec<_> = ast
        .children(arguments)
        .iter()
        .map(|id| ast.kind(*id))
        .collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Expression,
            NodeKind::Terminal,
            NodeKind::Expression,
            NodeKind::Terminal,
            NodeKind::Expression,
        ]
    );
}

#[test]
fn test_parse_call_without_arguments() {
    let ast = parse_str("main(){ read(); }").unwrap();
    let expressions = body_expressions(&ast);
    let call = ast.children(expressions[0])[0];
    let arguments = ast.children_of_kind(call, NodeKind::Arguments).next().unwrap();
    assert!(ast.children(arguments).is_empty());
}

#[test]
fn test_trailing_comma_in_call_fails() {
    let err = parse_str("main(){ f(1,); }").unwrap_err();
    let found = err.found.unwrap();
    assert_eq!(found.kind, TokenKind::RParen);
    assert_eq!(found.span, 12..13);
}

#[test]
fn test_body_is_preferred_over_group() {
    let ast = parse_str("main(){ { 1; 2; } + (3); }").unwrap();
    let expressions = body_expressions(&ast);
    let outer = ast.children(expressions[0]);
    assert_eq!(ast.kind(outer[0]), NodeKind::Body);

    let rhs = ast.children(outer[1])[1];
    assert_eq!(ast.kind(ast.children(rhs)[0]), NodeKind::Group);
}

#[test]
fn test_parse_conditional_expression() {
    let ast = parse_str("main(){ if (!x == 1 && y) { 2; } { 3; }; }").unwrap();
    let expressions = body_expressions(&ast);
    let conditional = ast.children(expressions[0])[0];
    assert_eq!(ast.kind(conditional), NodeKind::ConditionalExpression);

    let condition = ast
        .children_of_kind(conditional, NodeKind::Condition)
        .next()
        .unwrap();
    let parts = ast.children(condition);
    assert_eq!(parts.len(), 3);
    assert!(ast.node(parts[0]).is_token(TokenKind::Not));
    assert_eq!(ast.kind(parts[1]), NodeKind::Expression);
    assert_eq!(ast.kind(parts[2]), NodeKind::LogicalOperator);

    assert_eq!(ast.children_of_kind(conditional, NodeKind::Body).count(), 2);
}

#[test]
fn test_conditional_needs_two_bodies() {
    assert!(parse_str("main(){ if (1) { 2; }; }").is_err());
}

#[test]
fn test_keyword_is_not_an_identifier() {
    assert!(parse_str("if(){ 1; }").is_err());
    assert!(parse_str("main(if){ 1; }").is_err());
}

#[test]
fn test_failed_alternatives_leave_no_nodes_behind() {
    let ast = parse_str("main(){ f(x) + x; }").unwrap();
    // every node is reachable from the root
    let rendered = ast.render();
    assert_eq!(rendered.lines().count(), ast.len());
}

#[test]
fn test_long_operator_chain_nests_to_the_right() {
    let terms = vec!["x"; 20_000].join(" - ");
    let ast = parse_str(&format!("f(x){{ {}; }}", terms)).unwrap();
    assert_eq!(ast.render().lines().count(), ast.len());

    let mut expression = body_expressions(&ast)[0];
    let mut depth = 0;
    while let &[_, operation] = ast.children(expression) {
        expression = ast.children(operation)[1];
        depth += 1;
    }
    assert_eq!(depth, 19_999);
}

#[test]
fn test_dangling_operator_is_left_unconsumed() {
    let err = parse_str("main(){ 1 + ; }").unwrap_err();
    assert_eq!(err.found.unwrap().kind, TokenKind::Semicolon);
    assert!(err.expected.contains(&TokenKind::Number));
}
