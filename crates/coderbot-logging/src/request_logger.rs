use colored::Colorize;
use serde::Serialize;

use crate::safe_truncate;

const MAX_LOGGED_CHARS: usize = 5000;

/// Log HTTP request details for debugging (stderr, verbose only)
pub fn log_request<T: Serialize + ?Sized>(url: &str, body: &T, verbose: bool) {
    if !verbose {
        return;
    }

    eprintln!("\n{}", "═".repeat(80).bright_cyan());
    eprintln!("{}", "🔍 HTTP REQUEST DEBUG".bright_cyan().bold());
    eprintln!("{}", "═".repeat(80).bright_cyan());

    // Parse URL to show host and port
    if let Ok(parsed_url) = reqwest::Url::parse(url) {
        eprintln!("{}: {}", "URL".bright_yellow(), url);
        eprintln!(
            "{}: {}",
            "Host".bright_yellow(),
            parsed_url.host_str().unwrap_or("unknown")
        );
        eprintln!(
            "{}: {}",
            "Port".bright_yellow(),
            parsed_url
                .port_or_known_default()
                .map(|p| p.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        );
    } else {
        eprintln!("{}: {}", "URL".bright_yellow(), url);
    }

    eprintln!("\n{}", "Request Body:".bright_yellow());
    match serde_json::to_string_pretty(body) {
        Ok(json) => print_truncated(&json),
        Err(e) => eprintln!("{}", format!("Error serializing request: {}", e).red()),
    }

    eprintln!("{}", "═".repeat(80).bright_cyan());
    eprintln!();
}

/// Log HTTP response details for debugging (stderr, verbose only)
pub fn log_response(status: &reqwest::StatusCode, body: &str, verbose: bool) {
    if !verbose {
        return;
    }

    eprintln!("\n{}", "═".repeat(80).bright_green());
    eprintln!("{}", "📥 HTTP RESPONSE DEBUG".bright_green().bold());
    eprintln!("{}", "═".repeat(80).bright_green());
    eprintln!(
        "{}: {} {}",
        "Status".bright_yellow(),
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    );

    eprintln!("\n{}", "Response Body:".bright_yellow());
    // Try to pretty-print JSON, fall back to raw text
    let pretty = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| serde_json::to_string_pretty(&v).ok());
    print_truncated(pretty.as_deref().unwrap_or(body));

    eprintln!("{}", "═".repeat(80).bright_green());
    eprintln!();
}

/// Log one raw streamed line for debugging (stderr, verbose only)
pub fn log_stream_chunk(chunk_num: usize, data: &str, verbose: bool) {
    if !verbose {
        return;
    }

    let shown = if data.chars().count() > 200 {
        format!("{} ({} bytes)", safe_truncate(data, 200), data.len())
    } else {
        data.to_string()
    };
    eprintln!(
        "{}",
        format!("📦 Stream Chunk #{}: {}", chunk_num, shown).bright_black()
    );
}

fn print_truncated(text: &str) {
    if text.chars().count() > MAX_LOGGED_CHARS {
        eprintln!("{}", safe_truncate(text, MAX_LOGGED_CHARS));
        eprintln!(
            "\n{}",
            format!("... (truncated, total {} bytes)", text.len()).bright_black()
        );
    } else {
        eprintln!("{}", text);
    }
}
