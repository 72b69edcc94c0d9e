use colored::Colorize;

use crate::safe_truncate;
use timechat_models::ChatRequest;

/// Log outgoing request details for debugging (console output)
pub fn log_request(url: &str, request: &ChatRequest, token: Option<&str>, verbose: bool) {
    if !verbose {
        return;
    }

    println!("\n{}", "═".repeat(80).bright_cyan());
    println!("{}", "HTTP REQUEST DEBUG".bright_cyan().bold());
    println!("{}", "═".repeat(80).bright_cyan());

    if let Ok(parsed_url) = reqwest::Url::parse(url) {
        println!("{}: {}", "URL".bright_yellow(), url);
        println!(
            "{}: {}",
            "Host".bright_yellow(),
            parsed_url.host_str().unwrap_or("unknown")
        );
        println!("{}: {}", "Scheme".bright_yellow(), parsed_url.scheme());
    } else {
        println!("{}: {}", "URL".bright_yellow(), url);
    }

    match token {
        Some(token) => println!(
            "{}: {}***",
            "Token".bright_yellow(),
            token.chars().take(6).collect::<String>()
        ),
        None => println!("{}: <none>", "Token".bright_yellow()),
    }

    println!("\n{}", "Request Body:".bright_yellow());
    match serde_json::to_string_pretty(&request) {
        Ok(json) => {
            // Truncate very long requests for readability
            if json.chars().count() > 5000 {
                println!("{}", safe_truncate(&json, 5000));
            } else {
                println!("{}", json);
            }
        }
        Err(e) => println!("{}", format!("Error serializing request: {}", e).red()),
    }

    println!("{}", "═".repeat(80).bright_cyan());
    println!();
}

/// Log a raw stream event payload in verbose mode
pub fn log_stream_chunk(chunk_number: usize, data: &str, verbose: bool) {
    if !verbose {
        return;
    }
    println!(
        "{} {}",
        format!("[chunk {}]", chunk_number).bright_black(),
        safe_truncate(data, 200).bright_black()
    );
}

/// Log an error response from the inference endpoint
pub fn log_response_error(status: reqwest::StatusCode, body: &str, verbose: bool) {
    if !verbose {
        return;
    }
    println!(
        "{} {} {}",
        "HTTP error".red().bold(),
        status.to_string().red(),
        safe_truncate(body, 500)
    );
}
