#[tokio::main]
async fn main() {
    let code = reqevents::app::startup::startup().await;
    std::process::exit(code);
}
