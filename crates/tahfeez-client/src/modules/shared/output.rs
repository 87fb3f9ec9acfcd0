use serde::Serialize;
use tahfeez_client::SourceResult;

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints the payload of a successful envelope; a failed one becomes the
/// command's error.
pub(crate) fn print_envelope<T: Serialize>(result: SourceResult<T>) -> anyhow::Result<()> {
    let response = result?;
    if !response.success {
        anyhow::bail!(response
            .error
            .unwrap_or_else(|| "request failed".to_string()));
    }
    match response.data {
        Some(data) => print_json(&data),
        None => Ok(()),
    }
}
