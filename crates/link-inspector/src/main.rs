fn main() -> std::process::ExitCode {
    link_inspector::start(std::env::args())
}
