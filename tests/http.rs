use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Stats {
    total: u64,
    completed: u64,
    remaining: u64,
}

#[derive(Debug, Deserialize)]
struct Task {
    id: u64,
    text: String,
    completed: bool,
}

#[derive(Debug, Deserialize)]
struct TaskResponse {
    task: Task,
    stats: Stats,
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    stats: Stats,
}

#[derive(Debug, Deserialize)]
struct TaskListResponse {
    tasks: Vec<Task>,
    stats: Stats,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/stats")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_todo_app"))
        .env("PORT", port.to_string())
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn get_stats(client: &Client, base_url: &str) -> Stats {
    client
        .get(format!("{base_url}/api/stats"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn add_task(client: &Client, base_url: &str, text: &str) -> TaskResponse {
    let response = client
        .post(format!("{base_url}/api/tasks"))
        .json(&serde_json::json!({ "text": text }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

#[tokio::test]
async fn http_add_task_updates_counts() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = get_stats(&client, &server.base_url).await;
    let added = add_task(&client, &server.base_url, "  Buy groceries  ").await;

    assert_eq!(added.task.text, "Buy groceries");
    assert!(!added.task.completed);
    assert_eq!(added.stats.total, before.total + 1);
    assert_eq!(added.stats.completed, before.completed);
    assert_eq!(added.stats.remaining, before.remaining + 1);
}

#[tokio::test]
async fn http_add_rejects_empty_text() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = get_stats(&client, &server.base_url).await;
    let response = client
        .post(format!("{}/api/tasks", server.base_url))
        .json(&serde_json::json!({ "text": "   \t " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let after = get_stats(&client, &server.base_url).await;
    assert_eq!(after.total, before.total);
    assert_eq!(after.completed, before.completed);
    assert_eq!(after.remaining, before.remaining);
}

#[tokio::test]
async fn http_add_caps_text_at_100_chars() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let long = "x".repeat(150);
    let added = add_task(&client, &server.base_url, &long).await;
    assert_eq!(added.task.text.chars().count(), 100);
}

#[tokio::test]
async fn http_toggle_moves_counts_between_buckets() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let added = add_task(&client, &server.base_url, "Water plants").await;

    let toggled: TaskResponse = client
        .post(format!("{}/api/tasks/{}/toggle", server.base_url, added.task.id))
        .json(&serde_json::json!({ "completed": true }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(toggled.task.completed);
    assert_eq!(toggled.stats.total, added.stats.total);
    assert_eq!(toggled.stats.completed, added.stats.completed + 1);
    assert_eq!(toggled.stats.remaining, added.stats.remaining - 1);

    let untoggled: TaskResponse = client
        .post(format!("{}/api/tasks/{}/toggle", server.base_url, added.task.id))
        .json(&serde_json::json!({ "completed": false }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!untoggled.task.completed);
    assert_eq!(untoggled.stats.completed, added.stats.completed);
    assert_eq!(untoggled.stats.remaining, added.stats.remaining);
}

#[tokio::test]
async fn http_toggle_unknown_id_is_not_found() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/tasks/999999/toggle", server.base_url))
        .json(&serde_json::json!({ "completed": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_delete_removes_task() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let added = add_task(&client, &server.base_url, "Throwaway").await;

    let deleted: DeleteResponse = client
        .delete(format!("{}/api/tasks/{}", server.base_url, added.task.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(deleted.stats.total, added.stats.total - 1);

    let again = client
        .delete(format!("{}/api/tasks/{}", server.base_url, added.task.id))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_index_serves_widget_page() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client.get(&server.base_url).send().await.unwrap();
    assert!(response.status().is_success());

    let body = response.text().await.unwrap();
    assert!(body.contains(r#"id="task-form""#));
    assert!(body.contains(r#"id="task-input""#));
    assert!(body.contains(r#"id="todo-list""#));
    assert!(body.contains(r#"id="total-tasks""#));
    assert!(body.contains(r#"id="completed-tasks""#));
    assert!(body.contains(r#"id="remaining-tasks""#));
}

#[tokio::test]
async fn http_form_fallback_adds_and_redirects() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = get_stats(&client, &server.base_url).await;

    // reqwest follows the redirect back to the index page.
    let response = client
        .post(format!("{}/tasks", server.base_url))
        .form(&[("text", "From the form")])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("From the form"));

    let after = get_stats(&client, &server.base_url).await;
    assert_eq!(after.total, before.total + 1);

    // An empty form submission redirects without adding anything.
    let response = client
        .post(format!("{}/tasks", server.base_url))
        .form(&[("text", "   ")])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let unchanged = get_stats(&client, &server.base_url).await;
    assert_eq!(unchanged.total, after.total);
}

#[tokio::test]
async fn http_full_lifecycle_scenario() {
    let _guard = TEST_LOCK.lock().await;
    // Fresh server: the scenario asserts absolute counter values.
    let server = spawn_server().await;
    let client = Client::new();

    let milk = add_task(&client, &server.base_url, "Buy milk").await;
    assert_eq!(milk.stats.total, 1);
    assert_eq!(milk.stats.completed, 0);
    assert_eq!(milk.stats.remaining, 1);

    let checked: TaskResponse = client
        .post(format!("{}/api/tasks/{}/toggle", server.base_url, milk.task.id))
        .json(&serde_json::json!({ "completed": true }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(checked.stats.completed, 1);
    assert_eq!(checked.stats.remaining, 0);

    let dog = add_task(&client, &server.base_url, "Walk dog").await;
    assert_eq!(dog.stats.total, 2);
    assert_eq!(dog.stats.completed, 1);
    assert_eq!(dog.stats.remaining, 1);

    let deleted: DeleteResponse = client
        .delete(format!("{}/api/tasks/{}", server.base_url, milk.task.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(deleted.stats.total, 1);
    assert_eq!(deleted.stats.completed, 0);
    assert_eq!(deleted.stats.remaining, 1);

    let list: TaskListResponse = client
        .get(format!("{}/api/tasks", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.tasks.len(), 1);
    assert_eq!(list.tasks[0].text, "Walk dog");
    assert!(!list.tasks[0].completed);
    assert_eq!(list.stats.total, 1);
}
