use crate::codegen::Compiler;

pub fn add_io_functions(compiler: &mut Compiler) {
    // read() -> number
    compiler.insert_builtin(
        "read",
        0,
        "number read() {
    number x;
    std::cin >> x;
    return x;
}
",
    );

    // write(x: number) -> number
    compiler.insert_builtin(
        "write",
        1,
        "number write(number x) {
    std::cout << x << std::endl;
    return x;
}
",
    );
}
