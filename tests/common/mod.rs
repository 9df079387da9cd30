use std::path::PathBuf;

use histoquest::chat::GeminiClient;
use histoquest::content::store::ContentStore;
use histoquest::AppState;

pub fn create_test_store() -> (ContentStore, PathBuf) {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("histoquest_test_{}_{}", std::process::id(), id));
    // Clean up leftover files from previous runs
    let _ = std::fs::remove_dir_all(&dir);
    (ContentStore::new(&dir), dir)
}

pub fn create_test_state(admin_password: &str) -> AppState {
    let (store, _) = create_test_store();
    let assistant = GeminiClient::new(String::new(), "gemini-2.5-flash".to_string());
    AppState::new(store, assistant, admin_password.to_string())
}
