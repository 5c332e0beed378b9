use exprc::codegen::SemanticError;
use exprc::lexer::TokenKind;
use exprc::{CompileError, compile_bytes, compile_source, parse_source};

#[test]
fn test_write_from_main() {
    let program = compile_source("main(){ write(5); }").unwrap();

    assert!(program.contains("typedef uint64_t number;"));
    assert!(program.contains("number read() {"));
    assert!(program.contains("number write(number x) {"));
    assert!(program.contains("int main() {\n    return ((write((number)5)), 0);\n}"));
}

#[test]
fn test_builtins_come_before_user_functions() {
    let program = compile_source("first(){ 1; } second(){ first(); }").unwrap();

    let read = program.find("number read()").unwrap();
    let write = program.find("number write(").unwrap();
    let first = program.find("number first()").unwrap();
    let second = program.find("number second()").unwrap();
    assert!(read < write && write < first && first < second);
}

#[test]
fn test_fibonacci() {
    let source = "
        fib(n) {
            if (n < 2) { n; } { fib(n - 1) + fib(n - 2); };
        }

        main() {
            write(fib(read()));
        }
    ";
    let program = compile_source(source).unwrap();
    assert!(program.contains(
        "return (((n < (number)2) ? (n) : ((fib((n - (number)1)) + fib((n - (number)2))))));"
    ));
}

#[test]
fn test_lexical_failure() {
    let err = compile_source("main(){ 1 $ 2; }").unwrap_err();
    assert!(matches!(&err, CompileError::Lex(error) if error.found == "$"));
    assert_eq!(err.exit_code(), 2);
    assert_eq!(err.stage(), "lexical analysis");
}

#[test]
fn test_syntax_failure() {
    let err = compile_source("main(){ }").unwrap_err();
    assert!(matches!(&err, CompileError::Parse(_)));
    assert_eq!(err.exit_code(), 3);

    let err = compile_source("").unwrap_err();
    assert!(matches!(&err, CompileError::Parse(_)));
}

#[test]
fn test_semantic_failure() {
    let err = compile_source("f(x){ x; } g(){ f(1,2); }").unwrap_err();
    assert_eq!(err.exit_code(), 4);

    let CompileError::Semantic(failure) = &err else {
        panic!("expected a semantic failure, got {}", err);
    };
    assert!(matches!(
        &failure.errors[..],
        [SemanticError::ArityMismatch { expected: 1, found: 2, .. }]
    ));
    assert_eq!(err.reports("test").len(), 1);
}

#[test]
fn test_forward_reference_fails() {
    let err = compile_source("main(){ helper(); } helper(){ 1; }").unwrap_err();
    let CompileError::Semantic(failure) = err else {
        panic!("expected a semantic failure");
    };
    assert!(matches!(
        &failure.errors[0],
        SemanticError::UndeclaredFunction { declared_later: true, .. }
    ));
}

#[test]
fn test_words_starting_with_if_split_off_the_keyword() {
    // `ifx` is `if` followed by `x`, so it cannot name a function
    let err = compile_source("ifx(){ 1; }").unwrap_err();
    assert_eq!(err.exit_code(), 3);
    assert!(matches!(
        &err,
        CompileError::Parse(error) if error.found.as_ref().unwrap().kind == TokenKind::KeywordIf
    ));

    assert!(matches!(
        compile_source("iff(x){ x; }").unwrap_err(),
        CompileError::Parse(_)
    ));
    assert!(compile_source("fif(x){ x; } main(){ write(fif(1)); }").is_ok());
}

#[test]
fn test_invalid_utf8_fails_lexing() {
    let err = compile_bytes(b"main(){ write(5); }\n\xE9").unwrap_err();
    assert!(matches!(&err, CompileError::Lex(error) if error.span == (20..21)));
    assert_eq!(err.exit_code(), 2);
    assert_eq!(err.stage(), "lexical analysis");
}

#[test]
fn test_parse_source_renders_tree() {
    let ast = parse_source("main(){ 1; }").unwrap();
    assert!(ast.render().starts_with("Program\n  Function\n    BasicValue `main`"));
}
