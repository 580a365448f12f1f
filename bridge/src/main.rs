use spanbridge::core::BridgeApp;

#[tokio::main]
async fn main() {
    if let Err(e) = BridgeApp::run().await {
        eprintln!("\nError: {:#}\n", e);
        std::process::exit(1);
    }
}
