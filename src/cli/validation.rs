use crate::adapter::Envelope;
use crate::cli::args::CliArgs;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.envelope.as_deref() {
        if Envelope::parse(raw).is_none() {
            return Err(format!(
                "invalid --envelope '{raw}', expected auto, combined, or flat"
            ));
        }
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid timeout, expected positive integer".to_string());
        }
    }
    if let Some(workers) = args.workers {
        if workers == 0 {
            return Err("invalid workers, expected positive integer".to_string());
        }
    }
    if let Some(raw) = args.api_url.as_deref() {
        validate_api_url(raw).map_err(|e| format!("invalid --api-url '{raw}': {e}"))?;
    }
    if args.interactive && args.order_id.is_some() {
        return Err("use either ORDER_ID or --interactive, not both".to_string());
    }
    Ok(())
}

pub fn validate_api_url(raw: &str) -> Result<(), String> {
    let url = reqwest::Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}
