fn main() {
    if let Err(err) = vendorfix_cli::main_entry() {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}
