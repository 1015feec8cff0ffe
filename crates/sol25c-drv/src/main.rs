fn main() {
    sol25c_drv::logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    std::process::exit(sol25c_drv::run(&args));
}
