use std::sync::Once;

static INIT_ENV_ONCE: Once = Once::new();

pub fn init_env() {
    INIT_ENV_ONCE.call_once(|| {
        let _ = dotenvy::dotenv();
    });
}

pub fn address() -> String {
    std::env::var("PUSH_BROADCASTER_BIND_ADDRESS").unwrap()
}

pub fn admin_key() -> String {
    std::env::var("PUSH_BROADCASTER_ADMIN_KEY").unwrap()
}

pub fn max_http_content_len() -> usize {
    std::env::var("PUSH_BROADCASTER_MAX_HTTP_CONTENT_LEN")
        .unwrap()
        .parse()
        .unwrap()
}
