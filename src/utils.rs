//! Utility functions and helpers.

/// Checks whether a media source string refers to a remote resource.
///
/// Anything starting with `http` (so both `http://` and `https://`) is remote;
/// everything else is treated as a local path.
pub fn is_remote_source(source: &str) -> bool {
    source.starts_with("http")
}

/// Sanitizes a string for use as a filename.
pub fn sanitize_filename(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Builds the upload filename for a converted remote image: the slug with
/// dashes turned into underscores, plus the encoding's extension.
pub fn media_file_name(slug: &str, extension: &str) -> String {
    format!("{}.{}", sanitize_filename(&slug.replace('-', "_")), extension)
}

/// Rejects payloads above `max_size` bytes.
pub fn validate_file_size(size: u64, max_size: u64, what: &str) -> Result<(), String> {
    if size > max_size {
        return Err(format!(
            "{what} is too large: {} (max: {})",
            format_file_size(size),
            format_file_size(max_size)
        ));
    }
    Ok(())
}

/// Formats file size in human-readable format.
pub fn format_file_size(size: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: u64 = 1024;

    if size == 0 {
        return "0 B".to_string();
    }

    let mut size = size as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD as f64 && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD as f64;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size as u64, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Validates the site URL and basic-auth credentials format.
pub fn validate_credentials(site_url: &str, username: &str, password: &str) -> Result<(), String> {
    if site_url.is_empty() {
        return Err("Site URL cannot be empty".to_string());
    }

    if !site_url.starts_with("http://") && !site_url.starts_with("https://") {
        return Err("Site URL must start with http:// or https://".to_string());
    }

    if username.is_empty() {
        return Err("Username cannot be empty".to_string());
    }

    if password.is_empty() {
        return Err("Password cannot be empty".to_string());
    }

    Ok(())
}
