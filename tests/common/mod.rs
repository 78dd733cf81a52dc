//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use html_inject::{HttpServer, Injection, ServerConfig, Shutdown};
use tokio::net::TcpListener;

pub const PAYLOAD: &str = "<script>alert('injected!')</script>";

/// Write a small static site into `root`.
pub fn write_site(root: &Path) {
    std::fs::write(root.join("index.html"), "<html><body>hi</body></html>").unwrap();
    std::fs::write(
        root.join("tricky.html"),
        "<html><body><pre>type &lt;/html&gt; or </html> to close</pre></body></html>\n",
    )
    .unwrap();
    std::fs::write(root.join("fragment.html"), "<p>no closing tag</p>").unwrap();
    std::fs::write(root.join("app.js"), "document.write('</html>');").unwrap();
}

/// Start the server on an ephemeral port; returns its address.
pub async fn start_server(root: &Path, shutdown: &Shutdown) -> SocketAddr {
    let mut config = ServerConfig::default();
    config.server.root_dir = root.to_path_buf();

    let server = HttpServer::new(config, Arc::new(Injection::new(PAYLOAD, "</html>")));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    addr
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
