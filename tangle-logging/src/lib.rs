// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Structured trace events: `tangle_trace!("event.name", {"key": value})`
//! emits one `trace` line whose payload is JSON.

#[macro_export]
macro_rules! tangle_trace {
    ($evt:expr, $params:tt) => {
        tracing::trace!("tangle_trace:{}:{}", $evt, serde_json::json!($params));
    };
}
