use tokio::net::TcpListener;

use fileshare_core::config::DEV_FILE_SHARE_HOST;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let addr = std::env::var("FILE_SHARE_HOST").unwrap_or_else(|_| DEV_FILE_SHARE_HOST.to_string());
    let listener = TcpListener::bind(&addr).await?;
    println!("file-share emulator listening on {addr}");
    mock_server::run(listener).await
}
