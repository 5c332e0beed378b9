pub mod io;

use crate::codegen::Compiler;

/// The one numeric type of the language, as spelled in the generated C++.
/// It is reserved: no function or parameter may take this name.
pub const NUMBER_TYPE: &str = "number";

pub const HEADER: &str = "#include <cstdint>
#include <iostream>

typedef uint64_t number;
";

pub fn add_stdlib_to_env(compiler: &mut Compiler) {
    io::add_io_functions(compiler);
}
