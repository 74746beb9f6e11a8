use tracing::error;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(error) = plan_desk::run().await {
        error!("Server exited with error: {}", error);
        std::process::exit(1);
    }
}
