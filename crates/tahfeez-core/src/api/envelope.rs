use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform result of every data-source operation, whichever backend served it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (_, _) => Err(self
                .error
                .unwrap_or_else(|| "Request failed".to_string())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct PaginatedResponse<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    /// Slices `items` into one page. `page` is 1-based; out-of-range pages
    /// yield an empty result list with the full count.
    pub fn paginate(items: Vec<T>, page: u32, page_size: u32, path: &str) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let count = items.len() as u64;
        let start = (page as usize - 1) * page_size as usize;
        let results: Vec<T> = items
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();
        let has_next = (start + results.len()) < count as usize;
        let next = has_next.then(|| format!("{path}?page={}", page + 1));
        let previous = (page > 1).then(|| format!("{path}?page={}", page - 1));
        Self {
            count,
            next,
            previous,
            results,
        }
    }
}

/// Pulls a human-readable message out of an error body. Handles the usual
/// REST framework shapes: `detail`, `error`, `message`, `non_field_errors`
/// and per-field error lists.
pub fn extract_error_message(body: &Value) -> Option<String> {
    match body {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Array(items) => items.iter().find_map(extract_error_message),
        Value::Object(map) => {
            for key in ["detail", "error", "message", "non_field_errors"] {
                if let Some(message) = map.get(key).and_then(extract_error_message) {
                    return Some(message);
                }
            }
            map.iter().find_map(|(field, value)| {
                extract_error_message(value).map(|message| format!("{field}: {message}"))
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failure_omits_data_and_serializes_error() {
        let response: ApiResponse<u32> = ApiResponse::failure("boom");
        let value = serde_json::to_value(&response).expect("serialize");
        assert_eq!(value, json!({"success": false, "data": null, "error": "boom"}));
    }

    #[test]
    fn ok_has_no_error_key() {
        let value = serde_json::to_value(ApiResponse::ok(7)).expect("serialize");
        assert_eq!(value, json!({"success": true, "data": 7}));
    }

    #[test]
    fn into_result_uses_error_text() {
        let response: ApiResponse<u32> = ApiResponse::failure("nope");
        assert_eq!(response.into_result(), Err("nope".to_string()));
        assert_eq!(ApiResponse::ok(1).into_result(), Ok(1));
    }

    #[test]
    fn paginate_links_pages() {
        let page = PaginatedResponse::paginate((1..=5).collect::<Vec<u32>>(), 2, 2, "/goals/");
        assert_eq!(page.count, 5);
        assert_eq!(page.results, vec![3, 4]);
        assert_eq!(page.next.as_deref(), Some("/goals/?page=3"));
        assert_eq!(page.previous.as_deref(), Some("/goals/?page=1"));

        let last = PaginatedResponse::paginate((1..=5).collect::<Vec<u32>>(), 3, 2, "/goals/");
        assert_eq!(last.results, vec![5]);
        assert!(last.next.is_none());

        let beyond = PaginatedResponse::paginate((1..=5).collect::<Vec<u32>>(), 9, 2, "/goals/");
        assert!(beyond.results.is_empty());
        assert_eq!(beyond.count, 5);
    }

    #[test]
    fn extracts_common_error_shapes() {
        assert_eq!(
            extract_error_message(&json!({"detail": "No active account found"})).as_deref(),
            Some("No active account found")
        );
        assert_eq!(
            extract_error_message(&json!({"non_field_errors": ["Passwords differ"]})).as_deref(),
            Some("Passwords differ")
        );
        assert_eq!(
            extract_error_message(&json!({"email": ["Enter a valid email address."]})).as_deref(),
            Some("email: Enter a valid email address.")
        );
        assert_eq!(extract_error_message(&json!({})), None);
        assert_eq!(extract_error_message(&json!(42)), None);
    }
}
