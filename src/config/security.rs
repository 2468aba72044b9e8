use crate::errors::PortalError;

/// Rejected anywhere inside a config string.
const DANGEROUS_PATTERNS: &[&str] = &["../", "..\\", "<script"];

/// Rejected only as the leading scheme, so hosts like `bigdata` still pass.
const BLOCKED_SCHEMES: &[&str] = &["javascript:", "data:", "file:", "vbscript:"];

pub fn validate_security_patterns(value: &serde_yaml::Value) -> Result<(), PortalError> {
    check_value(value, &[])
}

fn check_value(value: &serde_yaml::Value, path: &[String]) -> Result<(), PortalError> {
    match value {
        serde_yaml::Value::String(s) => {
            let lower = s.trim().to_lowercase();
            let found = DANGEROUS_PATTERNS.iter().find(|p| lower.contains(*p))
                .or_else(|| BLOCKED_SCHEMES.iter().find(|p| lower.starts_with(*p)));
            if let Some(pattern) = found {
                let path_str = if path.is_empty() { "root".to_string() } else { path.join(".") };
                return Err(PortalError::Config(
                    format!("Dangerous pattern '{}' found at config path: {}", pattern, path_str)
                ));
            }
            Ok(())
        }
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let mut new_path = path.to_vec();
                new_path.push(k.as_str().unwrap_or("unknown").to_string());
                check_value(v, &new_path)?;
            }
            Ok(())
        }
        serde_yaml::Value::Sequence(seq) => {
            for (i, v) in seq.iter().enumerate() {
                let mut new_path = path.to_vec();
                new_path.push(format!("[{}]", i));
                check_value(v, &new_path)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Sanity check a scan target typed at the prompt before it is sent.
pub fn validate_target_url(url: &str) -> Result<(), PortalError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(PortalError::InvalidTarget("URL is required".into()));
    }
    let lower = trimmed.to_lowercase();
    if let Some(scheme) = BLOCKED_SCHEMES.iter().find(|s| lower.starts_with(*s)) {
        return Err(PortalError::InvalidTarget(format!("'{}' URLs cannot be scanned", scheme)));
    }
    if lower.contains("<script") {
        return Err(PortalError::InvalidTarget("URL contains markup".into()));
    }
    Ok(())
}
