use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::path::Path;
use std::process::{Command, Output};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a lightweight HTTP server for tests. Routes on the request
/// path: `/missing` answers 404, `/echo-content-type` echoes the
/// received Content-Type header as its body, everything else answers
/// 200 `OK`.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_http_server() -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    thread::spawn(move || handle_client(stream));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

fn handle_client(mut stream: TcpStream) {
    let mut buffer = [0u8; 4096];
    let Ok(read) = stream.read(&mut buffer) else {
        return;
    };
    let Some(bytes) = buffer.get(..read) else {
        return;
    };
    let request = String::from_utf8_lossy(bytes);

    let (status_line, body) = route(&request);
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    );
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

fn route(request: &str) -> (&'static str, String) {
    let path = request.split_whitespace().nth(1).unwrap_or("");
    if path.starts_with("/missing") {
        return ("404 Not Found", "not here".to_owned());
    }
    if path.starts_with("/echo-content-type") {
        let content_type = request
            .lines()
            .find_map(|line| {
                let (key, value) = line.split_once(':')?;
                key.trim()
                    .eq_ignore_ascii_case("content-type")
                    .then(|| value.trim().to_owned())
            })
            .unwrap_or_else(|| "none".to_owned());
        return ("200 OK", content_type);
    }
    ("200 OK", "OK".to_owned())
}

/// Run the `postrun` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_postrun<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = postrun_bin()?;
    Command::new(bin)
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .map_err(|err| format!("run postrun failed: {}", err))
}

fn postrun_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_postrun").map_or_else(
        || Err("CARGO_BIN_EXE_postrun missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}

/// Write a collection file holding one folder with a passing and a
/// failing request against `base_url`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_mixed_collection(path: &Path, name: &str, base_url: &str) -> Result<(), String> {
    let content = format!(
        r#"{{
  "info": {{ "name": "{name}" }},
  "item": [
    {{
      "name": "Folder",
      "item": [
        {{ "name": "ok", "request": {{ "method": "GET", "url": "{base_url}/ok" }} }},
        {{ "name": "missing", "request": {{ "method": "GET", "url": "{base_url}/missing" }} }}
      ]
    }}
  ]
}}"#
    );
    std::fs::write(path, content).map_err(|err| format!("write collection failed: {}", err))
}

/// Write a collection file holding a single passing request.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_passing_collection(path: &Path, name: &str, base_url: &str) -> Result<(), String> {
    let content = format!(
        r#"{{
  "info": {{ "name": "{name}" }},
  "item": [
    {{ "name": "ok", "request": {{ "method": "GET", "url": "{base_url}/ok" }} }}
  ]
}}"#
    );
    std::fs::write(path, content).map_err(|err| format!("write collection failed: {}", err))
}
