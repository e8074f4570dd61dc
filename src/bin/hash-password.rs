use bcrypt::{hash, DEFAULT_COST};
use std::env;

fn main() {
    let password = env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: cargo run --bin hash-password <PASSWORD>");
        std::process::exit(1);
    });

    match hash(&password, DEFAULT_COST) {
        Ok(hashed) => {
            println!("ADMIN_PASSWORD_HASH={}", hashed);
            println!();
            println!("# Or seed admin_users directly:");
            println!("# INSERT INTO admin_users (id, email, password_hash, is_admin)");
            println!("#   VALUES (gen_random_uuid(), 'admin@example.com', '{}', true);", hashed);
        }
        Err(e) => {
            eprintln!("Error hashing password: {}", e);
            std::process::exit(1);
        }
    }
}
