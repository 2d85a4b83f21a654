use std::time::Duration;

const DELAY: Duration = Duration::from_millis(5);

/// Resolve to `value` after a short delay
pub async fn get_async_value<T>(value: T) -> T {
    tokio::time::sleep(DELAY).await;
    value
}
