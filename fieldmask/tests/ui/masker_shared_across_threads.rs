use std::{sync::Arc, thread};

use fieldmask::{Masker, TextPolicy};
use regex::Regex;

fn assert_send_sync<T: Send + Sync>() {}

fn main() {
    assert_send_sync::<Masker>();

    let masker = Arc::new(
        Masker::builder()
            .always_mask(Regex::new("password").unwrap())
            .custom(Regex::new("card").unwrap(), TextPolicy::KeepLast(4))
            .custom_fn(Regex::new("note").unwrap(), |_, value| value.to_uppercase())
            .build(),
    );

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let masker = Arc::clone(&masker);
            thread::spawn(move || masker.mask(&serde_json::json!({"password": "x"})).is_ok())
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
