//! C compiler proxy: records the call, then runs the configured C compiler.

use cmakegen::proxy::{self, Driver};

fn main() {
    std::process::exit(proxy::main(Driver::C));
}
