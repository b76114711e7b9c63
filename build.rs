use std::env;
use std::fs;
use std::path::Path;

// Reenvía las variables de `.env` a `option_env!` (ver src/config.rs).
fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env");

    let env_file = Path::new(".env");
    let Ok(contents) = fs::read_to_string(env_file) else {
        println!("cargo:warning=Sin archivo .env, se usan los valores por defecto (ver .env.example)");
        return;
    };

    for (key, value) in contents.lines().filter_map(parse_line) {
        // El entorno real tiene prioridad sobre el archivo
        if env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    let value = value.trim().trim_matches('"');
    Some((key.trim(), value))
}
