fn main() {
    println!("cargo:rerun-if-env-changed=DOORSENSE_WIFI_SSID");
    println!("cargo:rerun-if-env-changed=DOORSENSE_WIFI_PASS");
    println!("cargo:rerun-if-env-changed=DOORSENSE_API_URL");
    println!("cargo:rerun-if-env-changed=DOORSENSE_API_KEY");

    // Host builds (`--no-default-features`) have no ESP-IDF environment.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
