//! Transport trait for remote procedure calls

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// A handle able to invoke a named remote endpoint
///
/// Implementations own whatever connection state they need and must be safe
/// to share between threads; calls are independent of each other. The
/// blocking variant must not be called from within an async runtime.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Invoke `api_name` with positional `args` and wait for its text result
    ///
    /// Dropping the returned future abandons the call without affecting
    /// other calls on the same transport.
    async fn predict(&self, api_name: &str, args: Vec<Value>) -> Result<String>;

    /// Invoke `api_name` with positional `args`, blocking the current thread
    fn predict_blocking(&self, api_name: &str, args: Vec<Value>) -> Result<String>;
}
