//! Async properties
//!
//! The body of an async property is awaited, while generation stays
//! synchronous so a seed always reproduces the same values.

use futures::executor::block_on;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use urchin::*;

/// An in-memory store with an async interface and a bug for empty keys.
#[derive(Clone, Default)]
struct Store {
    entries: Arc<Mutex<HashMap<String, u32>>>,
}

impl Store {
    async fn put(&self, key: &str, value: u32) {
        if key.is_empty() {
            return;
        }
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value);
        }
    }

    async fn get(&self, key: &str) -> Option<u32> {
        self.entries.lock().ok()?.get(key).copied()
    }
}

fn main() -> Result<()> {
    let entries = Gen::tuple_of(
        Gen::string(Range::linear(0usize, 8), Gen::ascii_alphanumeric()),
        Gen::integral(Range::linear(0u32, 10_000)),
    );

    let prop = AsyncProperty::new(entries, |(key, value), journal: Journal| async move {
        let store = Store::default();
        store.put(&key, value).await;
        let read = store.get(&key).await;
        journal.annotate(format!("read back {read:?}"));
        read == Some(value)
    })
    .with_name("put_then_get")
    .with_variable_name("(key, value)");

    let report = block_on(prop.report(&Config::from_env()?));
    println!("{report}");
    Ok(())
}
