use tinyserve_rs::{HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = ServerConfig::from_env();
    let server = HttpServer::new(config);
    server.start().await?;

    Ok(())
}
