fn main() {
    if let Err(err) = dataset_loader::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
