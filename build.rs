// Build script to load .env variables at compile time
fn main() {
    // .env is optional here - Jamendo client ids are not secrets and the
    // shared development id works out of the box
    let _ = dotenvy::dotenv();

    let client_id =
        std::env::var("JAMENDO_CLIENT_ID").unwrap_or_else(|_| "76d25516".to_string());

    println!("cargo:rustc-env=JAMENDO_CLIENT_ID={}", client_id);
    println!("cargo:rerun-if-changed=.env");
}
