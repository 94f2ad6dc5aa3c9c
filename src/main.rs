fn main() {
    if let Err(err) = fittrack_lib::run() {
        eprintln!("fittrack: {err:#}");
        std::process::exit(1);
    }
}
