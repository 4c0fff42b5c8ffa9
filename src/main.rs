fn main() {
    if let Err(err) = ldap_filter::run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
