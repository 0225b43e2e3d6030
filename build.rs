use std::env;
use std::fs;
use std::path::Path;

/// Claves que `config.rs` lee con `option_env!`
const CONFIG_KEYS: &[&str] = &[
    "API_BASE",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "REQUEST_TIMEOUT_MS",
    "SSE_RECONNECT_INITIAL_MS",
    "SSE_RECONNECT_MAX_MS",
    "PUSH_BOOTSTRAP_DELAY_MS",
    "PUSH_LOGIN_DELAY_MS",
    "SERVICE_WORKER_PATH",
    "CUSTOMER_ORDERS_LIMIT",
    "ANALYTICS_WEEKS",
];

/// `KEY=VALUE` del .env de la consola; ignora comentarios y comillas
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    Some((key.trim(), value.trim().trim_matches('"')))
}

fn main() {
    let env_file = Path::new(".env");

    match fs::read_to_string(env_file) {
        Ok(contents) => {
            println!("cargo:rerun-if-changed=.env");
            for (key, value) in contents.lines().filter_map(parse_line) {
                if !CONFIG_KEYS.contains(&key) {
                    println!("cargo:warning=.env: clave desconocida {}", key);
                    continue;
                }
                // Una variable exportada en el shell gana al .env
                if env::var(key).is_err() {
                    println!("cargo:rustc-env={}={}", key, value);
                }
            }
        }
        Err(_) => {
            println!("cargo:warning=Sin .env: la consola usa la API de producción y los tiempos por defecto");
        }
    }

    println!("cargo:rerun-if-changed=build.rs");
    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }
}
