use std::env;

use chrono::Utc;
use orapool::{client, ConnectionConfig};

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("failed to serialize: {}", e),
    }
}

fn usage() {
    eprintln!(
        "Orapool Smoke CLI\n\n\
        Commands:\n\
          ready [--client-dir <dir>]            Check instant client detection\n\
          prime [--client-dir <dir>]            Load the instant client library\n\
          open --host <host> --port <port> --service <service> --user <user> \\\n\
               [--pass <pass>] [--protocol <proto>] [--timezone <tz>] \\\n\
               [--extra <k=v&k=v>] [--debug] [--max-open <n>] [--max-idle <n>]\n\
                                                Open a pool and ping it\n\
        \n\
        The password falls back to the PASSWORD environment variable.\n\
        "
    );
}

fn flag_value(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn cmd_ready(args: &[String]) -> i32 {
    let custom = flag_value(args, "--client-dir");
    let dir = client::resolve_client_path(custom.as_deref());
    let ready = client::check_client_ready(custom.as_deref());
    print_json(&serde_json::json!({
        "ready": ready,
        "client_dir": dir.display().to_string(),
        "primed": client::is_client_primed(),
    }));
    if ready {
        0
    } else {
        1
    }
}

fn cmd_prime(args: &[String]) -> i32 {
    let custom = flag_value(args, "--client-dir");
    match client::prime_client(custom.as_deref()) {
        Ok(()) => {
            print_json(&serde_json::json!({ "primed": true }));
            0
        }
        Err(e) => {
            eprintln!("prime failed: {}", e);
            1
        }
    }
}

fn cmd_open(args: &[String]) -> i32 {
    let host = flag_value(args, "--host");
    let port = flag_value(args, "--port").and_then(|p| p.parse::<u16>().ok());
    let service = flag_value(args, "--service");
    let user = flag_value(args, "--user");
    let (host, port, service, user) = match (host, port, service, user) {
        (Some(h), Some(p), Some(s), Some(u)) => (h, p, s, u),
        _ => {
            usage();
            return 2;
        }
    };
    let pass = flag_value(args, "--pass")
        .or_else(|| env::var("PASSWORD").ok())
        .unwrap_or_default();

    let mut config = ConnectionConfig::new(
        host,
        port,
        flag_value(args, "--protocol").unwrap_or_else(|| "tcp".to_string()),
        service,
        user,
        pass,
        flag_value(args, "--max-open")
            .and_then(|v| v.parse().ok())
            .unwrap_or(4),
        flag_value(args, "--max-idle")
            .and_then(|v| v.parse().ok())
            .unwrap_or(1),
    );
    config.timezone = flag_value(args, "--timezone").unwrap_or_default();
    config.extra = flag_value(args, "--extra").unwrap_or_default();
    config.debug = args.iter().any(|a| a == "--debug");

    match orapool::open(&config) {
        Ok(pool) => {
            print_json(&serde_json::json!({
                "live": true,
                "connect_string": pool.connect_string(),
                "timezone": pool.timezone().to_string(),
                "now": Utc::now().with_timezone(&pool.timezone()).to_rfc3339(),
            }));
            if let Err(e) = pool.close() {
                eprintln!("pool close failed: {}", e);
            }
            0
        }
        Err(e) => {
            eprintln!("open failed: {}", e);
            1
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let code = match args.first().map(String::as_str) {
        Some("ready") => cmd_ready(&args[1..]),
        Some("prime") => cmd_prime(&args[1..]),
        Some("open") => cmd_open(&args[1..]),
        _ => {
            usage();
            2
        }
    };
    std::process::exit(code);
}
