/// Root route
use chrono::Local;

/// GET / - current server time as plain text
pub async fn now() -> String {
    Local::now().to_rfc3339()
}
